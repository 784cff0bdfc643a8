//! Voice Consultation Service
//!
//! Turns a patient's spoken or typed symptom description into a generated
//! diagnostic message via two remote inference endpoints:
//!
//! 1. **Transcription** — raw audio bytes are POSTed to an ASR endpoint and
//!    the recognized text is extracted from its JSON response.
//! 2. **Diagnosis** — the symptom text (with a clinical framing
//!    instruction) is POSTed to a text-generation endpoint, and the reply
//!    is normalized across the several response shapes hosted generation
//!    models are known to return.
//!
//! Both requesters run their calls through the bounded-retry caller in
//! `inference-client`, so transient upstream failures (model warming up,
//! connection errors) are absorbed before a result ever reaches the UI
//! layer. Conversation history lives in an explicit [`ConversationLog`]
//! owned by the session layer; the requesters never touch shared state.
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use consultation_service::{ConsultationConfig, ConsultationService, ConversationLog};
//!
//! # async fn example(audio: Vec<u8>) -> Result<(), Box<dyn std::error::Error>> {
//! let config = ConsultationConfig::from_env();
//! let service = ConsultationService::from_config(config)?;
//! let mut log = ConversationLog::new();
//!
//! let turn = service.run_voice_consultation(&audio, &mut log).await?;
//! println!("patient: {}", turn.utterance);
//! println!("assistant: {}", turn.diagnosis);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod conversation;
pub mod diagnosis;
pub mod error;
pub mod service;
pub mod transcription;

pub use config::*;
pub use conversation::*;
pub use diagnosis::*;
pub use error::*;
pub use service::*;
pub use transcription::*;
