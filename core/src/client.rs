//! Stateless protobuf-over-HTTP client.
//!
//! # Design
//! `ProtoClient` holds only a `Transport` and an optional log dispatcher. Each
//! operation builds an `HttpRequest`, executes it once, and classifies the
//! `HttpResponse` by status: accepted statuses are decoded into the requested
//! message type, anything else is handed back unparsed. Every completed
//! exchange emits exactly one log line.

use prost::Message;
use tracing::{error, info, Dispatch};

use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport, PROTOBUF_CONTENT_TYPE};

const OK: u16 = 200;
const CREATED: u16 = 201;

/// Result of a typed operation that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<M> {
    /// The status was accepted and the body decoded as `M`.
    Decoded(M),
    /// The status was not accepted; the response is returned as received.
    Rejected(HttpResponse),
}

impl<M> Outcome<M> {
    /// The decoded message, or `None` when the server rejected the request.
    pub fn decoded(self) -> Option<M> {
        match self {
            Outcome::Decoded(message) => Some(message),
            Outcome::Rejected(_) => None,
        }
    }

    pub fn rejected(self) -> Option<HttpResponse> {
        match self {
            Outcome::Decoded(_) => None,
            Outcome::Rejected(response) => Some(response),
        }
    }

    pub fn is_decoded(&self) -> bool {
        matches!(self, Outcome::Decoded(_))
    }

    pub fn into_result(self) -> Result<M, HttpResponse> {
        match self {
            Outcome::Decoded(message) => Ok(message),
            Outcome::Rejected(response) => Err(response),
        }
    }
}

/// Synchronous client issuing one blocking request per call.
///
/// URLs are absolute and assembled by the caller, usually through
/// `ClientConfig::endpoint`.
#[derive(Debug, Clone)]
pub struct ProtoClient<T = UreqTransport> {
    transport: T,
    dispatch: Option<Dispatch>,
}

impl ProtoClient<UreqTransport> {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::default())
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::with_transport(UreqTransport::new(config.timeout()))
    }
}

impl Default for ProtoClient<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> ProtoClient<T> {
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport,
            dispatch: None,
        }
    }

    /// Route this client's log events to `dispatch` instead of the
    /// process-wide default subscriber.
    pub fn with_dispatch(mut self, dispatch: Dispatch) -> Self {
        self.dispatch = Some(dispatch);
        self
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// GET `url` and decode a 200 body as `M`.
    pub fn fetch<M>(&self, url: &str) -> Result<Outcome<M>, ClientError>
    where
        M: Message + Default,
    {
        let response = self.send(build_request(HttpMethod::Get, url, None))?;
        self.classify(HttpMethod::Get, url, response, &[OK])
    }

    /// POST `message` to `url` and decode a 200 or 201 body as `R`.
    pub fn create<M, R>(&self, url: &str, message: &M) -> Result<Outcome<R>, ClientError>
    where
        M: Message,
        R: Message + Default,
    {
        let request = build_request(HttpMethod::Post, url, Some(message.encode_to_vec()));
        let response = self.send(request)?;
        self.classify(HttpMethod::Post, url, response, &[OK, CREATED])
    }

    /// PUT `message` to `url` and decode a 200 body as `R`.
    pub fn replace<M, R>(&self, url: &str, message: &M) -> Result<Outcome<R>, ClientError>
    where
        M: Message,
        R: Message + Default,
    {
        let request = build_request(HttpMethod::Put, url, Some(message.encode_to_vec()));
        let response = self.send(request)?;
        self.classify(HttpMethod::Put, url, response, &[OK])
    }

    /// DELETE `url`. The response is returned as received; its body is
    /// never decoded.
    pub fn remove(&self, url: &str) -> Result<HttpResponse, ClientError> {
        let response = self.send(build_request(HttpMethod::Delete, url, None))?;
        let summary = format!("DELETE {url} - {} - {}", response.status, response.text());
        if response.status == OK {
            self.log(|| info!("{summary}"));
        } else {
            self.log(|| error!("{summary}"));
        }
        Ok(response)
    }

    fn send(&self, request: HttpRequest) -> Result<HttpResponse, ClientError> {
        let method = request.method;
        let url = request.url.clone();
        self.transport
            .execute(request)
            .map_err(|source| ClientError::Transport {
                method,
                url,
                source,
            })
    }

    fn classify<R>(
        &self,
        method: HttpMethod,
        url: &str,
        response: HttpResponse,
        accepted: &[u16],
    ) -> Result<Outcome<R>, ClientError>
    where
        R: Message + Default,
    {
        let status = response.status;
        if !accepted.contains(&status) {
            let text = response.text();
            self.log(|| error!("{method} {url} - {status} - {text}"));
            return Ok(Outcome::Rejected(response));
        }

        match R::decode(response.body.as_slice()) {
            Ok(decoded) => {
                self.log(|| info!("{method} {url} - {status} - {decoded:?}"));
                Ok(Outcome::Decoded(decoded))
            }
            Err(source) => {
                let message = std::any::type_name::<R>();
                self.log(|| error!("{method} {url} - {status} - undecodable {message}: {source}"));
                Err(ClientError::Decode {
                    method,
                    url: url.to_string(),
                    message,
                    source,
                })
            }
        }
    }

    fn log(&self, emit: impl FnOnce()) {
        match &self.dispatch {
            Some(dispatch) => tracing::dispatcher::with_default(dispatch, emit),
            None => emit(),
        }
    }
}

fn build_request(method: HttpMethod, url: &str, body: Option<Vec<u8>>) -> HttpRequest {
    let mut headers = vec![("accept".to_string(), PROTOBUF_CONTENT_TYPE.to_string())];
    if body.is_some() {
        headers.push(("content-type".to_string(), PROTOBUF_CONTENT_TYPE.to_string()));
    }
    HttpRequest {
        method,
        url: url.to_string(),
        headers,
        body,
    }
}
