use thiserror::Error;

/// Terminal failure of one logical remote call.
///
/// Every call through the resilient caller ends in exactly one of: a
/// successful body, a permanent upstream rejection, or an exhausted retry
/// budget. Transient failures never escape as errors on their own; they
/// only surface here once no attempts remain.
#[derive(Error, Debug)]
pub enum CallError {
    #[error("upstream rejected the request with status {status}: {excerpt}")]
    Permanent { status: u16, excerpt: String },

    #[error("retries exhausted after {attempts} attempts: {reason}")]
    Exhausted { attempts: u32, reason: String },
}

pub type CallResult<T> = Result<T, CallError>;

/// Network-level failure reported by a transport: connection refused,
/// timeout, TLS failure. Always classified as retryable by the caller.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct TransportError {
    message: String,
}

impl TransportError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::new(format!("request timed out: {err}"))
        } else {
            Self::new(format!("network error: {err}"))
        }
    }
}
