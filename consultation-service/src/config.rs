use std::time::Duration;

use inference_client::CallPolicy;
use serde::{Deserialize, Serialize};

/// Default ASR endpoint of the hosted deployment.
pub const DEFAULT_ASR_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/jonatasgrosman/wav2vec2-large-xlsr-53-english";

/// Default text-generation endpoint of the hosted deployment.
pub const DEFAULT_GENERATION_ENDPOINT: &str =
    "https://api-inference.huggingface.co/models/shanover/medbot_godel_v3";

const DEFAULT_FRAMING_INSTRUCTION: &str =
    "You are a clinical assistant. Based on the symptoms the patient describes, \
     suggest the most likely diagnosis and sensible next steps.";

/// Wire shape of the generation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptStyle {
    /// `{"inputs": ["<framing> <symptoms>"]}`
    Instruction,
    /// `{"inputs": [{"role": "system", ...}, {"role": "user", ...}]}`
    Chat,
}

/// Optional generation parameters forwarded to the generation endpoint.
/// Absent fields are omitted from the wire payload entirely.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerationParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_new_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub do_sample: Option<bool>,
}

impl GenerationParams {
    pub fn is_empty(&self) -> bool {
        self.max_new_tokens.is_none()
            && self.temperature.is_none()
            && self.top_p.is_none()
            && self.do_sample.is_none()
    }
}

/// Consultation service configuration.
///
/// All knobs are supplied at construction time; nothing is hardcoded in
/// the requesters themselves.
#[derive(Debug, Clone)]
pub struct ConsultationConfig {
    pub asr_endpoint: String,
    pub generation_endpoint: String,
    pub api_token: Option<String>,
    pub max_attempts: u32,
    pub base_backoff: Duration,
    pub jitter_ceiling: Duration,
    /// Per-attempt timeout for both endpoints.
    pub request_timeout: Duration,
    pub framing_instruction: String,
    pub prompt_style: PromptStyle,
    pub generation: GenerationParams,
}

impl Default for ConsultationConfig {
    fn default() -> Self {
        Self {
            asr_endpoint: DEFAULT_ASR_ENDPOINT.to_string(),
            generation_endpoint: DEFAULT_GENERATION_ENDPOINT.to_string(),
            api_token: None,
            max_attempts: 4,
            base_backoff: Duration::from_secs(1),
            jitter_ceiling: Duration::from_millis(500),
            request_timeout: Duration::from_secs(30),
            framing_instruction: DEFAULT_FRAMING_INSTRUCTION.to_string(),
            prompt_style: PromptStyle::Instruction,
            generation: GenerationParams::default(),
        }
    }
}

impl ConsultationConfig {
    /// Load configuration from environment variables.
    ///
    /// Reads a `.env` file when present. Unset or unparseable variables
    /// fall back to the deployment defaults above.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();

        let asr_endpoint = std::env::var("MEDVOICE_ASR_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_ASR_ENDPOINT.to_string());

        let generation_endpoint = std::env::var("MEDVOICE_GENERATION_ENDPOINT")
            .unwrap_or_else(|_| DEFAULT_GENERATION_ENDPOINT.to_string());

        let api_token = std::env::var("HUGGINGFACE_API_KEY").ok();

        let max_attempts = std::env::var("MEDVOICE_MAX_ATTEMPTS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(4);

        let base_backoff = std::env::var("MEDVOICE_BASE_BACKOFF_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_secs(1));

        let jitter_ceiling = std::env::var("MEDVOICE_JITTER_CEILING_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or_else(|| Duration::from_millis(500));

        let request_timeout = std::env::var("MEDVOICE_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(30));

        let framing_instruction = std::env::var("MEDVOICE_FRAMING_INSTRUCTION")
            .unwrap_or_else(|_| DEFAULT_FRAMING_INSTRUCTION.to_string());

        let prompt_style = match std::env::var("MEDVOICE_PROMPT_STYLE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "chat" => PromptStyle::Chat,
            _ => PromptStyle::Instruction,
        };

        let generation = GenerationParams {
            max_new_tokens: std::env::var("MEDVOICE_MAX_NEW_TOKENS")
                .ok()
                .and_then(|s| s.parse().ok()),
            temperature: std::env::var("MEDVOICE_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok()),
            top_p: std::env::var("MEDVOICE_TOP_P")
                .ok()
                .and_then(|s| s.parse().ok()),
            do_sample: std::env::var("MEDVOICE_DO_SAMPLE")
                .ok()
                .and_then(|s| s.parse().ok()),
        };

        Self {
            asr_endpoint,
            generation_endpoint,
            api_token,
            max_attempts,
            base_backoff,
            jitter_ceiling,
            request_timeout,
            framing_instruction,
            prompt_style,
            generation,
        }
    }

    /// Retry schedule handed to the resilient caller.
    pub fn call_policy(&self) -> CallPolicy {
        CallPolicy {
            max_attempts: self.max_attempts,
            base_backoff: self.base_backoff,
            jitter_ceiling: self.jitter_ceiling,
        }
    }
}
