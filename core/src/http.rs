//! HTTP transport types and the blocking transport behind `ProtoClient`.
//!
//! # Design
//! Requests and responses are plain data. `ProtoClient` builds an
//! `HttpRequest`, hands it to a `Transport`, and classifies the returned
//! `HttpResponse`. Swapping the transport is how tests run the client
//! without a network.
//!
//! `UreqTransport` is the production transport: one blocking round trip per
//! request, with ureq's status-as-error behavior disabled so 4xx/5xx
//! responses come back as data for the client to classify.

use std::fmt;
use std::time::Duration;

use crate::error::BoxError;

/// Media type used for protobuf request and response bodies.
pub const PROTOBUF_CONTENT_TYPE: &str = "application/x-protobuf";

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

/// An HTTP response described as plain data.
///
/// Returned unparsed to callers whenever the status is not one the
/// operation accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl HttpResponse {
    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// First header value matching `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Executes a single HTTP exchange.
///
/// Implementations return `Ok` for every response the server produced,
/// whatever its status. `Err` is reserved for failures where no response
/// exists (connection refused, DNS, timeout).
pub trait Transport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    /// Build a transport; `timeout` bounds the whole exchange when set.
    pub fn new(timeout: Option<Duration>) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(timeout)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, BoxError> {
        let url = request.url.as_str();
        let body = request.body.as_deref().unwrap_or_default();

        let result = match request.method {
            HttpMethod::Get => with_headers(self.agent.get(url), &request.headers).call(),
            HttpMethod::Delete => with_headers(self.agent.delete(url), &request.headers).call(),
            HttpMethod::Post => with_headers(self.agent.post(url), &request.headers).send(body),
            HttpMethod::Put => with_headers(self.agent.put(url), &request.headers).send(body),
        };
        let mut response = result?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        // ureq caps body reads at 10 MB unless told otherwise; list bodies can exceed that.
        let body = response
            .body_mut()
            .with_config()
            .limit(u64::MAX)
            .read_to_vec()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(
    mut builder: ureq::RequestBuilder<B>,
    headers: &[(String, String)],
) -> ureq::RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}
