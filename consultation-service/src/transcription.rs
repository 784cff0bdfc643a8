use std::time::Duration;

use inference_client::{InferenceTransport, OutboundRequest, ResilientCaller};
use serde::Deserialize;
use tracing::{debug, info};

use crate::config::ConsultationConfig;
use crate::error::{ConsultationError, ConsultationResult};

#[derive(Debug, Deserialize)]
struct AsrResponse {
    text: Option<String>,
}

/// Sends recorded audio to the ASR endpoint and extracts the recognized
/// text from its JSON response.
pub struct TranscriptionRequester<T> {
    caller: ResilientCaller<T>,
    endpoint: String,
    bearer_token: Option<String>,
    timeout: Duration,
}

impl<T: InferenceTransport> TranscriptionRequester<T> {
    pub fn new(config: &ConsultationConfig, transport: T) -> Self {
        Self {
            caller: ResilientCaller::new(transport, config.call_policy()),
            endpoint: config.asr_endpoint.clone(),
            bearer_token: config.api_token.clone(),
            timeout: config.request_timeout,
        }
    }

    /// Transcribe an audio buffer to text.
    ///
    /// Empty input is rejected before anything is sent upstream. A `200`
    /// body without a usable `text` field is a malformed response, never
    /// silently coerced to empty text.
    pub async fn transcribe(&self, audio: &[u8]) -> ConsultationResult<String> {
        if audio.is_empty() {
            return Err(ConsultationError::InvalidInput("audio buffer is empty"));
        }

        debug!(audio_bytes = audio.len(), "submitting audio for transcription");

        let mut request = OutboundRequest::binary(&self.endpoint, audio.to_vec(), self.timeout);
        if let Some(token) = &self.bearer_token {
            request = request.with_bearer_token(token);
        }

        let body = self.caller.execute(&request).await?;
        let parsed: AsrResponse = serde_json::from_str(&body)?;

        match parsed.text {
            Some(text) if !text.trim().is_empty() => {
                info!(chars = text.len(), "transcription complete");
                Ok(text)
            }
            _ => Err(ConsultationError::MalformedResponse(
                "transcription response is missing the text field".to_string(),
            )),
        }
    }
}
