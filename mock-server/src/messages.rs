//! Protobuf schema served by the mock backend.

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Header {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct TestCase {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub moves_list: ::prost::alloc::vec::Vec<Header>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct TestCaseList {
    #[prost(message, repeated, tag = "1")]
    pub test_cases: ::prost::alloc::vec::Vec<TestCase>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct TestSuite {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
    #[prost(message, repeated, tag = "3")]
    pub tests_cases: ::prost::alloc::vec::Vec<Header>,
}

#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct TestSuiteList {
    #[prost(message, repeated, tag = "1")]
    pub test_suites: ::prost::alloc::vec::Vec<TestSuite>,
}

pub(crate) fn named(id: u32, name: &str) -> Header {
    Header {
        id,
        name: name.to_string(),
    }
}
