use std::sync::Arc;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{OutboundRequest, Payload};

/// Raw result of one attempt as seen on the wire: status code plus body
/// text, before any classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

/// Capability behind the resilient caller: send one request, get one wire
/// response or a network-level error.
///
/// Tests and offline mode implement this to substitute canned responses
/// without touching the retry logic.
#[async_trait]
pub trait InferenceTransport: Send + Sync {
    async fn send(&self, request: &OutboundRequest) -> Result<WireResponse, TransportError>;
}

#[async_trait]
impl<T> InferenceTransport for Arc<T>
where
    T: InferenceTransport + ?Sized,
{
    async fn send(&self, request: &OutboundRequest) -> Result<WireResponse, TransportError> {
        (**self).send(request).await
    }
}

#[async_trait]
impl<T> InferenceTransport for &T
where
    T: InferenceTransport + ?Sized,
{
    async fn send(&self, request: &OutboundRequest) -> Result<WireResponse, TransportError> {
        (**self).send(request).await
    }
}

/// Real HTTP transport over reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, TransportError> {
        let client = reqwest::Client::builder()
            .build()
            .map_err(TransportError::from)?;
        Ok(Self { client })
    }
}

#[async_trait]
impl InferenceTransport for HttpTransport {
    async fn send(&self, request: &OutboundRequest) -> Result<WireResponse, TransportError> {
        let mut builder = self
            .client
            .post(&request.endpoint)
            .timeout(request.timeout);

        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }

        builder = match &request.payload {
            Payload::Binary(bytes) => builder
                .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
                .body(bytes.clone()),
            Payload::Json(value) => builder.json(value),
        };

        let response = builder.send().await.map_err(TransportError::from)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(TransportError::from)?;

        Ok(WireResponse { status, body })
    }
}

/// Offline transport answering every request with one canned response.
///
/// Lets an embedding application run without network access, and replaces
/// the ad hoc fake-response objects the retry logic would otherwise need.
pub struct OfflineTransport {
    status: u16,
    body: String,
}

impl OfflineTransport {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    /// Canned `200` response.
    pub fn success(body: impl Into<String>) -> Self {
        Self::new(200, body)
    }
}

#[async_trait]
impl InferenceTransport for OfflineTransport {
    async fn send(&self, _request: &OutboundRequest) -> Result<WireResponse, TransportError> {
        Ok(WireResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}
