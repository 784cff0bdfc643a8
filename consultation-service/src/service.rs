use std::sync::Arc;

use inference_client::{HttpTransport, InferenceTransport};
use tracing::info;

use crate::config::ConsultationConfig;
use crate::conversation::ConversationLog;
use crate::diagnosis::DiagnosisRequester;
use crate::error::{ConsultationError, ConsultationResult};
use crate::transcription::TranscriptionRequester;

/// Result of one full consultation turn.
#[derive(Debug, Clone)]
pub struct ConsultationTurn {
    /// What the patient said (recognized or typed).
    pub utterance: String,
    /// The generated diagnostic message.
    pub diagnosis: String,
}

/// Facade exposed to the UI/session layer.
///
/// Holds the two requesters over one shared transport. One logical call is
/// outstanding per interaction; every entry point awaits its way to a
/// single terminal outcome.
pub struct ConsultationService<T> {
    transcription: TranscriptionRequester<Arc<T>>,
    diagnosis: DiagnosisRequester<Arc<T>>,
}

impl ConsultationService<HttpTransport> {
    /// Build the service against the real HTTP transport.
    pub fn from_config(config: ConsultationConfig) -> ConsultationResult<Self> {
        let transport =
            HttpTransport::new().map_err(|err| ConsultationError::Config(err.to_string()))?;
        Ok(Self::with_transport(config, transport))
    }
}

impl<T: InferenceTransport> ConsultationService<T> {
    /// Build the service over an injected transport (offline mode, tests).
    pub fn with_transport(config: ConsultationConfig, transport: T) -> Self {
        let transport = Arc::new(transport);
        Self {
            transcription: TranscriptionRequester::new(&config, Arc::clone(&transport)),
            diagnosis: DiagnosisRequester::new(&config, transport),
        }
    }

    /// Recognize speech from an audio buffer.
    pub async fn transcribe(&self, audio: &[u8]) -> ConsultationResult<String> {
        self.transcription.transcribe(audio).await
    }

    /// Generate a diagnostic message for symptom text.
    pub async fn diagnose(&self, symptoms: &str) -> ConsultationResult<String> {
        self.diagnosis.diagnose(symptoms).await
    }

    /// Full voice flow: transcribe, diagnose, and append both sides of the
    /// exchange to the session's conversation log (patient first).
    pub async fn run_voice_consultation(
        &self,
        audio: &[u8],
        log: &mut ConversationLog,
    ) -> ConsultationResult<ConsultationTurn> {
        let utterance = self.transcription.transcribe(audio).await?;
        let diagnosis = self.diagnosis.diagnose(&utterance).await?;

        log.record_user(&utterance);
        log.record_assistant(&diagnosis);
        info!(entries = log.len(), "voice consultation turn recorded");

        Ok(ConsultationTurn {
            utterance,
            diagnosis,
        })
    }

    /// Typed-input flow: diagnose the text directly and append the
    /// exchange to the conversation log.
    pub async fn run_text_consultation(
        &self,
        symptoms: &str,
        log: &mut ConversationLog,
    ) -> ConsultationResult<ConsultationTurn> {
        let diagnosis = self.diagnosis.diagnose(symptoms).await?;

        log.record_user(symptoms.trim());
        log.record_assistant(&diagnosis);

        Ok(ConsultationTurn {
            utterance: symptoms.trim().to_string(),
            diagnosis,
        })
    }
}
