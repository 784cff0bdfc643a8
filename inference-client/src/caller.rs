use std::time::Duration;

use rand::Rng;
use tracing::{debug, warn};

use crate::error::{CallError, CallResult};
use crate::outcome::{CallOutcome, RetryReason};
use crate::policy::CallPolicy;
use crate::request::OutboundRequest;
use crate::transport::InferenceTransport;

/// Executes one logical remote call with bounded retries.
///
/// Each attempt is classified via [`CallOutcome::classify`]; successes and
/// permanent failures return immediately, retryable outcomes sleep for the
/// current backoff plus jitter and try again until the attempt budget is
/// spent. The loop holds no state beyond its local attempt counter and
/// backoff value, so callers in independent sessions never interfere.
pub struct ResilientCaller<T> {
    transport: T,
    policy: CallPolicy,
}

impl<T: InferenceTransport> ResilientCaller<T> {
    pub fn new(transport: T, policy: CallPolicy) -> Self {
        Self { transport, policy }
    }

    pub fn policy(&self) -> &CallPolicy {
        &self.policy
    }

    /// Run the request to a single terminal outcome: the raw `200` body,
    /// or a classified [`CallError`].
    pub async fn execute(&self, request: &OutboundRequest) -> CallResult<String> {
        let mut backoff = self.policy.base_backoff;
        let mut attempt: u32 = 1;

        loop {
            debug!(
                endpoint = %request.endpoint,
                attempt,
                max_attempts = self.policy.max_attempts,
                "issuing inference request"
            );

            let outcome = match self.transport.send(request).await {
                Ok(response) => CallOutcome::classify(response),
                Err(err) => CallOutcome::Retryable(RetryReason::Network(err.message().to_string())),
            };

            match outcome {
                CallOutcome::Success(body) => {
                    debug!(attempt, "inference request succeeded");
                    return Ok(body);
                }
                CallOutcome::Terminal { status, excerpt } => {
                    warn!(status, attempt, "upstream returned a permanent failure");
                    return Err(CallError::Permanent { status, excerpt });
                }
                CallOutcome::Retryable(reason) => {
                    if attempt >= self.policy.max_attempts {
                        warn!(attempts = attempt, "retry budget exhausted");
                        return Err(CallError::Exhausted {
                            attempts: attempt,
                            reason: reason.describe(),
                        });
                    }

                    let delay = backoff + sample_jitter(self.policy.jitter_ceiling);
                    warn!(
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        reason = %reason.describe(),
                        "transient upstream failure, retrying"
                    );
                    tokio::time::sleep(delay).await;

                    backoff *= 2;
                    attempt += 1;
                }
            }
        }
    }
}

fn sample_jitter(ceiling: Duration) -> Duration {
    if ceiling.is_zero() {
        return Duration::ZERO;
    }
    let secs = rand::thread_rng().gen_range(0.0..ceiling.as_secs_f64());
    Duration::from_secs_f64(secs)
}
