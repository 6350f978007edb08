//! Async utilities for common async patterns
//!
//! - Timeout wrappers for calls to external collaborators
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::async_utils::timeout::with_deadline;
//! use std::time::Duration;
//!
//! async fn call_with_timeout() -> Result<String, String> {
//!     with_deadline("remote_call", Duration::from_secs(30), async {
//!         Ok("done".to_string())
//!     })
//!     .await
//!     .map_err(|e| e.to_string())
//! }
//! ```

pub mod timeout;
