//! API request handlers

pub mod health;
pub mod search;

pub use health::health;
pub use search::search;
