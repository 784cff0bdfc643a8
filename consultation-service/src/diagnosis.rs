use std::time::Duration;

use inference_client::{InferenceTransport, OutboundRequest, ResilientCaller};
use serde_json::{json, Value};
use tracing::{debug, info, warn};

use crate::config::{ConsultationConfig, GenerationParams, PromptStyle};
use crate::error::{ConsultationError, ConsultationResult};

/// Which of the known upstream response shapes matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// `[{"generated_text": ...}, ...]`
    GeneratedTextList,
    /// `{"generated_text": ...}`
    GeneratedTextObject,
    /// `[{"role": "assistant", "content": ...}, ...]`
    ChatMessageList,
    /// Nothing matched; the raw body was used as-is.
    RawBody,
}

/// Sends symptom text to the generation endpoint and normalizes the reply
/// into a single diagnostic message.
///
/// Hosted generation models have answered with several different body
/// shapes over time; the normalization here is an ordered list of shape
/// matchers rather than nested probing, with a raw-body fallback that is
/// logged as an anomaly but never fails the call.
pub struct DiagnosisRequester<T> {
    caller: ResilientCaller<T>,
    endpoint: String,
    bearer_token: Option<String>,
    timeout: Duration,
    framing_instruction: String,
    prompt_style: PromptStyle,
    generation: GenerationParams,
}

impl<T: InferenceTransport> DiagnosisRequester<T> {
    pub fn new(config: &ConsultationConfig, transport: T) -> Self {
        Self {
            caller: ResilientCaller::new(transport, config.call_policy()),
            endpoint: config.generation_endpoint.clone(),
            bearer_token: config.api_token.clone(),
            timeout: config.request_timeout,
            framing_instruction: config.framing_instruction.clone(),
            prompt_style: config.prompt_style,
            generation: config.generation.clone(),
        }
    }

    /// Generate a diagnostic message for the given symptom description.
    pub async fn diagnose(&self, symptoms: &str) -> ConsultationResult<String> {
        let symptoms = symptoms.trim();
        if symptoms.is_empty() {
            return Err(ConsultationError::InvalidInput("symptom text is empty"));
        }

        let prompt = format!("{} {}", self.framing_instruction, symptoms);
        let payload = self.build_payload(symptoms, &prompt);
        debug!(endpoint = %self.endpoint, style = ?self.prompt_style, "requesting diagnosis");

        let mut request = OutboundRequest::json(&self.endpoint, payload, self.timeout);
        if let Some(token) = &self.bearer_token {
            request = request.with_bearer_token(token);
        }

        let body = self.caller.execute(&request).await?;
        let normalized = normalize_generation_body(&body);
        let message = strip_redundant_preamble(&normalized.text, &prompt, symptoms);

        info!(shape = ?normalized.shape, chars = message.len(), "diagnosis complete");
        Ok(message)
    }

    fn build_payload(&self, symptoms: &str, prompt: &str) -> Value {
        let inputs = match self.prompt_style {
            PromptStyle::Instruction => json!([prompt]),
            PromptStyle::Chat => json!([
                {"role": "system", "content": self.framing_instruction},
                {"role": "user", "content": symptoms},
            ]),
        };

        if self.generation.is_empty() {
            json!({ "inputs": inputs })
        } else {
            json!({ "inputs": inputs, "parameters": self.generation })
        }
    }
}

pub(crate) struct NormalizedGeneration {
    pub text: String,
    pub shape: ResponseShape,
}

/// Resolve the upstream body to the generated text, trying each known
/// shape in order. An unrecognized shape degrades to the raw body with a
/// logged anomaly instead of an error.
pub(crate) fn normalize_generation_body(body: &str) -> NormalizedGeneration {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(text) = first_generated_text_in_list(&value) {
            return NormalizedGeneration {
                text,
                shape: ResponseShape::GeneratedTextList,
            };
        }
        if let Some(text) = generated_text_field(&value) {
            return NormalizedGeneration {
                text,
                shape: ResponseShape::GeneratedTextObject,
            };
        }
        if let Some(text) = first_assistant_message(&value) {
            return NormalizedGeneration {
                text,
                shape: ResponseShape::ChatMessageList,
            };
        }
    }

    warn!(
        body_len = body.len(),
        "generation response matched no known shape, using raw body"
    );
    NormalizedGeneration {
        text: body.trim().to_string(),
        shape: ResponseShape::RawBody,
    }
}

fn first_generated_text_in_list(value: &Value) -> Option<String> {
    value
        .as_array()?
        .first()?
        .get("generated_text")?
        .as_str()
        .map(str::to_string)
}

fn generated_text_field(value: &Value) -> Option<String> {
    value.get("generated_text")?.as_str().map(str::to_string)
}

fn first_assistant_message(value: &Value) -> Option<String> {
    value
        .as_array()?
        .iter()
        .find(|entry| {
            entry
                .get("role")
                .and_then(Value::as_str)
                .map(|role| role.eq_ignore_ascii_case("assistant"))
                .unwrap_or(false)
        })?
        .get("content")?
        .as_str()
        .map(str::to_string)
}

/// Strip redundant lead-ins the generation models are known to echo: a
/// `Doctor:` speaker label, and a repeat of the submitted prompt (or of
/// the bare symptom text) at the start of the reply.
pub(crate) fn strip_redundant_preamble(text: &str, prompt: &str, symptoms: &str) -> String {
    let mut result = text.trim();

    if let Some(rest) = result.strip_prefix("Doctor:") {
        result = rest.trim_start();
    }

    for echoed in [prompt, symptoms] {
        if echoed.is_empty() {
            continue;
        }
        if let Some(rest) = result.strip_prefix(echoed) {
            result = rest
                .trim_start_matches([':', ',', '.', ';', '-'])
                .trim_start();
            break;
        }
    }

    result.to_string()
}
