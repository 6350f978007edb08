//! Configuration management utilities
//!
//! Helpers for resolving process environment into explicit configuration
//! values once, at startup. Callers build their own config structs from these
//! and pass them down; nothing here caches or holds global state.
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::config::{get_env_parse_or, require_env};
//!
//! struct AppConfig {
//!     token: String,
//!     port: u16,
//! }
//!
//! let config = AppConfig {
//!     token: require_env("APP_TOKEN")?,
//!     port: get_env_parse_or("APP_PORT", 8080)?,
//! };
//! ```

mod env;

pub use env::{
    get_env, get_env_non_blank, get_env_or, get_env_parse, get_env_parse_or, missing_env,
    require_env,
};
