use inference_client::CallError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConsultationError {
    /// Empty/missing audio or text, rejected before any network call.
    #[error("invalid input: {0}")]
    InvalidInput(&'static str),

    #[error("configuration error: {0}")]
    Config(String),

    /// 503s or network errors on every attempt; the retry budget is spent.
    #[error("upstream unavailable after {attempts} attempts: {reason}")]
    TransientExhausted { attempts: u32, reason: String },

    /// Non-retryable upstream status (404, 500, ...), surfaced immediately.
    #[error("upstream rejected the request with status {status}: {excerpt}")]
    PermanentUpstream { status: u16, excerpt: String },

    /// `200` body that does not carry the expected fields.
    #[error("malformed upstream response: {0}")]
    MalformedResponse(String),

    /// Body is not valid JSON where structured data was expected.
    #[error("response parse failure: {0}")]
    ResponseParse(#[from] serde_json::Error),
}

pub type ConsultationResult<T> = Result<T, ConsultationError>;

impl From<CallError> for ConsultationError {
    fn from(err: CallError) -> Self {
        match err {
            CallError::Exhausted { attempts, reason } => {
                Self::TransientExhausted { attempts, reason }
            }
            CallError::Permanent { status, excerpt } => {
                Self::PermanentUpstream { status, excerpt }
            }
        }
    }
}
