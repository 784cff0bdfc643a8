use crate::transport::WireResponse;

/// Upper bound on the response-body excerpt carried in terminal failures.
/// Upstream error pages can be large; diagnostics only need the head.
pub const EXCERPT_LIMIT: usize = 256;

/// Why an attempt is worth retrying.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RetryReason {
    /// HTTP 503 — the hosted model is still loading / warming up.
    ServiceWarming { status: u16, body: String },
    /// Connection failure or timeout before any status was received.
    Network(String),
}

impl RetryReason {
    pub fn describe(&self) -> String {
        match self {
            Self::ServiceWarming { status, body } => {
                format!("service unavailable (status {status}): {}", excerpt(body))
            }
            Self::Network(message) => format!("network error: {message}"),
        }
    }
}

/// Classification of a single call attempt. Produced once per attempt and
/// consumed immediately by the retry loop to decide the next action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallOutcome {
    Success(String),
    Retryable(RetryReason),
    Terminal { status: u16, excerpt: String },
}

impl CallOutcome {
    /// Classify a wire response by status code.
    ///
    /// `200` succeeds, `503` is the only retryable status (model warming
    /// up), and everything else — 404 and 500 included — is permanent:
    /// those indicate a bad endpoint or upstream bug, and retrying will
    /// not help.
    pub fn classify(response: WireResponse) -> Self {
        match response.status {
            200 => Self::Success(response.body),
            503 => Self::Retryable(RetryReason::ServiceWarming {
                status: 503,
                body: response.body,
            }),
            status => Self::Terminal {
                status,
                excerpt: excerpt(&response.body),
            },
        }
    }
}

/// Bounded, char-safe excerpt of a response body for diagnostics.
pub(crate) fn excerpt(body: &str) -> String {
    if body.chars().count() <= EXCERPT_LIMIT {
        body.to_string()
    } else {
        let mut head: String = body.chars().take(EXCERPT_LIMIT).collect();
        head.push_str("...");
        head
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_success() {
        let outcome = CallOutcome::classify(WireResponse {
            status: 200,
            body: "{\"text\": \"hello\"}".to_string(),
        });
        assert_eq!(outcome, CallOutcome::Success("{\"text\": \"hello\"}".to_string()));
    }

    #[test]
    fn test_classify_503_is_retryable() {
        let outcome = CallOutcome::classify(WireResponse {
            status: 503,
            body: "model is loading".to_string(),
        });
        match outcome {
            CallOutcome::Retryable(RetryReason::ServiceWarming { status, body }) => {
                assert_eq!(status, 503);
                assert_eq!(body, "model is loading");
            }
            other => panic!("expected retryable outcome, got {other:?}"),
        }
    }

    #[test]
    fn test_classify_404_is_terminal() {
        let outcome = CallOutcome::classify(WireResponse {
            status: 404,
            body: "model not found".to_string(),
        });
        assert_eq!(
            outcome,
            CallOutcome::Terminal {
                status: 404,
                excerpt: "model not found".to_string(),
            }
        );
    }

    #[test]
    fn test_classify_500_is_terminal() {
        let outcome = CallOutcome::classify(WireResponse {
            status: 500,
            body: String::new(),
        });
        assert!(matches!(outcome, CallOutcome::Terminal { status: 500, .. }));
    }

    #[test]
    fn test_excerpt_is_bounded() {
        let long = "x".repeat(EXCERPT_LIMIT * 4);
        let short = excerpt(&long);
        assert_eq!(short.chars().count(), EXCERPT_LIMIT + 3);
        assert!(short.ends_with("..."));
    }

    #[test]
    fn test_excerpt_keeps_short_bodies_intact() {
        assert_eq!(excerpt("not found"), "not found");
    }
}
