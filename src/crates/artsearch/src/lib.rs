//! Natural-language artwork search
//!
//! A free-text query goes through four stages:
//!
//! 1. [`extract::IntentExtractor`] asks a chat model to call a search tool
//!    and returns its arguments, or a failure reason.
//! 2. [`sanitize::sanitize`] turns that into a non-empty [`FilterSpec`],
//!    falling back to the raw query as a keyword.
//! 3. [`QueryBuilder`] compiles the spec and an optional cursor into a
//!    GraphQL document.
//! 4. [`CatalogClient`] executes it and normalizes the response into
//!    [`SearchResults`], which always carries page info.
//!
//! [`SearchPipeline`] runs the stages for one request; [`api`] exposes it
//! over HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use artsearch::{SearchConfig, SearchPipeline, SearchRequest};
//!
//! let pipeline = SearchPipeline::from_config(SearchConfig::from_env()?)?;
//! let request = SearchRequest::new("red paintings by picasso", None)?;
//! let results = pipeline.search(&request).await?;
//!
//! if let Some(cursor) = results.artworks_connection.page_info.next_cursor() {
//!     let next = SearchRequest::new("red paintings by picasso", Some(cursor.to_string()))?;
//!     pipeline.search(&next).await?;
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod query;
pub mod sanitize;

pub use catalog::{ArtworkEdge, CatalogClient, PageInfo, SearchResults};
pub use config::{CatalogConfig, SearchConfig};
pub use error::{Result, SearchError};
pub use extract::{Extraction, ExtractionFailure, IntentExtractor};
pub use filter::{FilterField, FilterSpec, FilterValue};
pub use pipeline::{SearchPipeline, SearchRequest};
pub use query::{PageRequest, QueryBuilder, QueryDocument};
pub use sanitize::sanitize;
