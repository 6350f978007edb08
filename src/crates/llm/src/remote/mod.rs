//! Remote chat model providers.
//!
//! - **OpenAI** - OpenAI and any OpenAI-compatible `chat/completions` API

pub mod openai;

pub use openai::OpenAiClient;
