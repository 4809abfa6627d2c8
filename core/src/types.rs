//! Wire messages exchanged with the test database backend.
//!
//! # Design
//! These mirror the mock-server's schema but are defined independently,
//! the same way generated prost code would be. Integration tests catch any
//! drift between the two crates.

/// Reference to a test case (or a robot position inside one) by id and name.
#[derive(Clone, PartialEq, Eq, ::prost::Message)]
pub struct Header {
    #[prost(uint32, tag = "1")]
    pub id: u32,
    #[prost(string, tag = "2")]
    pub name: ::prost::alloc::string::String,
}

/// A single test case: its identity plus the ordered list of moves.
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

/// A named group of test cases, referenced through `Header`s.
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

impl Header {
    pub fn new(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}
