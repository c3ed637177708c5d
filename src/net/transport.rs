//! HTTP transport seam.
//!
//! Client-side (hydrate): [`GlooTransport`] issues real `fetch` calls via
//! `gloo-net`, racing each against the configured timeout ceiling.

use async_trait::async_trait;

use super::request::DispatchedRequest;

/// Status and raw body of a completed HTTP exchange.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// No HTTP response was received.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0} ms")]
    Timeout(u128),
}

#[async_trait(?Send)]
pub trait Transport {
    /// Execute one request. Any HTTP status, including errors, is a
    /// completed exchange; only a missing response is an `Err`.
    async fn execute(&self, request: &DispatchedRequest) -> Result<RawResponse, TransportError>;
}

#[cfg(feature = "hydrate")]
#[derive(Clone, Copy, Debug, Default)]
pub struct GlooTransport;

#[cfg(feature = "hydrate")]
#[async_trait(?Send)]
impl Transport for GlooTransport {
    async fn execute(&self, request: &DispatchedRequest) -> Result<RawResponse, TransportError> {
        use super::request::Method;
        use futures::future::{Either, select};
        use gloo_net::http::RequestBuilder;

        let builder = match request.method {
            Method::Get => RequestBuilder::new(&request.url).method(gloo_net::http::Method::GET),
            Method::Post => RequestBuilder::new(&request.url).method(gloo_net::http::Method::POST),
            Method::Put => RequestBuilder::new(&request.url).method(gloo_net::http::Method::PUT),
            Method::Delete => RequestBuilder::new(&request.url).method(gloo_net::http::Method::DELETE),
        };
        let builder = request
            .headers
            .iter()
            .fold(builder, |b, (name, value)| b.header(name, value));
        let prepared = match &request.body {
            Some(body) => builder.json(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Network(e.to_string()))?;

        let millis = u32::try_from(request.timeout.as_millis()).unwrap_or(u32::MAX);
        let send = Box::pin(prepared.send());
        let timeout = Box::pin(gloo_timers::future::TimeoutFuture::new(millis));
        let resp = match select(send, timeout).await {
            Either::Left((result, _)) => result.map_err(|e| TransportError::Network(e.to_string()))?,
            Either::Right(((), _)) => return Err(TransportError::Timeout(request.timeout.as_millis())),
        };

        let status = resp.status();
        let body = resp.text().await.map_err(|e| TransportError::Network(e.to_string()))?;
        Ok(RawResponse { status, body })
    }
}
