//! Logging utilities
//!
//! Subscriber setup for binaries plus helpers for structured logging with
//! tracing.

use crate::{Result, ToolingError};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Install the global fmt subscriber
///
/// Filter directives come from `RUST_LOG`; `default_directive` (for example
/// `"info"` or `"artsearch=debug,info"`) applies when it is unset or invalid.
/// Logs are written to stderr.
pub fn init_tracing(default_directive: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive))
        .map_err(|e| ToolingError::Logging(e.to_string()))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| ToolingError::Logging(e.to_string()))
}

/// Log execution time of a future at debug level
///
/// # Example
///
/// ```rust,ignore
/// use tooling::logging::timed;
///
/// let body = timed("fetch_catalog", client.fetch()).await;
/// ```
pub async fn timed<F, T>(name: &str, future: F) -> T
where
    F: std::future::Future<Output = T>,
{
    let start = Instant::now();
    debug!("Starting: {}", name);

    let result = future.await;

    debug!("Completed: {} in {}", name, format_duration(start.elapsed()));
    result
}

/// Format duration in human-readable form
///
/// # Example
///
/// ```rust
/// use tooling::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
/// ```
pub fn format_duration(duration: std::time::Duration) -> String {
    let micros = duration.as_micros();

    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{}ms", micros / 1000)
    } else if micros < 60_000_000 {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    } else {
        let seconds = micros / 1_000_000;
        format!("{}m{}s", seconds / 60, seconds % 60)
    }
}

fn secret_patterns() -> &'static [(Regex, &'static str)] {
    static PATTERNS: OnceLock<Vec<(Regex, &'static str)>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"(?i)(api[\s_-]?key|apikey)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(x-access-token|access[_-]?token)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(password|passwd|pwd)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(secret)\s*[:=]\s*\S+", "$1: [REDACTED]"),
            (r"(?i)(authorization|auth)\s*:\s*bearer\s+\S+", "$1: Bearer [REDACTED]"),
            (r"sk-[A-Za-z0-9_-]{8,}", "[REDACTED]"),
        ]
        .into_iter()
        .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
        .collect()
    })
}

/// Sanitize string for logging (remove sensitive data)
///
/// # Example
///
/// ```rust
/// use tooling::logging::sanitize_for_logging;
///
/// let sanitized = sanitize_for_logging("API key: sk-abc123");
/// assert!(sanitized.contains("[REDACTED]"));
/// ```
pub fn sanitize_for_logging(input: &str) -> String {
    let mut result = input.to_string();
    for (re, replacement) in secret_patterns() {
        result = re.replace_all(&result, *replacement).into_owned();
    }
    result
}

/// Sanitize and cap a payload (such as an upstream error body) for logging
pub fn truncate_for_logging(input: &str, max_chars: usize) -> String {
    let sanitized = sanitize_for_logging(input);
    if sanitized.chars().count() <= max_chars {
        return sanitized;
    }
    let mut truncated: String = sanitized.chars().take(max_chars).collect();
    truncated.push_str("…[truncated]");
    truncated
}
