//! Resilient HTTP client for remote model-inference endpoints
//!
//! Hosted inference services routinely answer `503` while a model is still
//! loading, and connection errors are common enough that a single failed
//! attempt says very little. This crate wraps one logical POST to such an
//! endpoint in a bounded retry loop with exponential backoff and jitter,
//! and classifies every attempt into exactly one of three outcomes:
//!
//! - **Success** — `200`, raw body returned immediately, no further attempts
//! - **Retryable** — `503` (service warming up) or a network-level error,
//!   retried on a `b, 2b, 4b, ...` backoff schedule plus uniform jitter
//! - **Terminal** — any other status (`404`, `500`, ...), surfaced at once;
//!   these are configuration or permanent errors and retrying will not help
//!
//! The caller is generic over an [`InferenceTransport`], so tests and
//! offline mode can substitute a canned transport without touching the
//! retry logic.
//!
//! # Example
//!
//! ```rust,no_run
//! use std::time::Duration;
//! use inference_client::{CallPolicy, HttpTransport, OutboundRequest, ResilientCaller};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let caller = ResilientCaller::new(HttpTransport::new()?, CallPolicy::default());
//!
//! let request = OutboundRequest::json(
//!     "https://api-inference.example.com/models/some-model",
//!     serde_json::json!({ "inputs": ["hello"] }),
//!     Duration::from_secs(30),
//! );
//!
//! let body = caller.execute(&request).await?;
//! println!("raw response: {}", body);
//! # Ok(())
//! # }
//! ```

pub mod caller;
pub mod error;
pub mod outcome;
pub mod policy;
pub mod request;
pub mod transport;

pub use caller::*;
pub use error::*;
pub use outcome::*;
pub use policy::*;
pub use request::*;
pub use transport::*;
