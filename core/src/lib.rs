//! Synchronous protobuf-over-HTTP client core.
//!
//! # Overview
//! `ProtoClient` performs GET/POST/PUT/DELETE against caller-assembled URLs,
//! encoding outgoing prost messages and decoding incoming bodies into the
//! message type the caller asks for.
//!
//! # Design
//! - `ProtoClient` is stateless: one blocking round trip per call, nothing
//!   kept between calls.
//! - Non-success statuses are outcomes, not errors. Typed operations return
//!   `Outcome::Rejected` with the raw response; `ClientError` covers only
//!   transport and decode failures.
//! - The network sits behind the `Transport` trait (`UreqTransport` in
//!   production), and logging goes through `tracing` with an optional
//!   per-client dispatcher.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod types;

pub use client::{Outcome, ProtoClient};
pub use config::ClientConfig;
pub use error::{BoxError, ClientError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{Header, TestCase, TestCaseList, TestSuite, TestSuiteList};
