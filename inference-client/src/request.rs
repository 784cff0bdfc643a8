use std::time::Duration;

/// Request body for an inference call.
///
/// Transcription endpoints take the raw audio bytes as the POST body;
/// generation endpoints take a structured JSON document.
#[derive(Debug, Clone)]
pub enum Payload {
    Binary(Vec<u8>),
    Json(serde_json::Value),
}

/// One outbound inference request. Immutable once constructed; a new value
/// is created per logical call.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    pub endpoint: String,
    pub bearer_token: Option<String>,
    pub payload: Payload,
    /// Per-attempt timeout. Bounds worst-case latency of a single attempt;
    /// the retry schedule bounds the call as a whole.
    pub timeout: Duration,
}

impl OutboundRequest {
    /// Build a binary-body request (audio upload).
    pub fn binary(endpoint: impl Into<String>, body: Vec<u8>, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: None,
            payload: Payload::Binary(body),
            timeout,
        }
    }

    /// Build a JSON-body request (text generation).
    pub fn json(endpoint: impl Into<String>, body: serde_json::Value, timeout: Duration) -> Self {
        Self {
            endpoint: endpoint.into(),
            bearer_token: None,
            payload: Payload::Json(body),
            timeout,
        }
    }

    /// Attach a bearer credential sent as `Authorization: Bearer <token>`.
    pub fn with_bearer_token(mut self, token: impl Into<String>) -> Self {
        self.bearer_token = Some(token.into());
        self
    }
}
