//! Search service configuration
//!
//! Everything the pipeline needs from the deployment environment is resolved
//! once by [`SearchConfig::from_env`] into an explicit value and handed to
//! [`crate::SearchPipeline::from_config`]. Nothing deeper in the pipeline
//! reads the environment.

use crate::error::{Result, SearchError};
use llm::RemoteLlmConfig;
use std::time::Duration;
use tooling::config::{get_env_or, get_env_parse_or, missing_env, require_env};

pub const ENV_ARTSY_ACCESS_TOKEN: &str = "ARTSY_ACCESS_TOKEN";
pub const ENV_ARTSY_USER_ID: &str = "ARTSY_USER_ID";
pub const ENV_OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ARTSY_GRAPHQL_URL: &str = "ARTSY_GRAPHQL_URL";
pub const ENV_OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const ENV_OPENAI_MODEL: &str = "OPENAI_MODEL";
pub const ENV_PAGE_SIZE: &str = "ARTSEARCH_PAGE_SIZE";
pub const ENV_EXTRACT_TIMEOUT_SECS: &str = "ARTSEARCH_EXTRACT_TIMEOUT_SECS";
pub const ENV_CATALOG_TIMEOUT_SECS: &str = "ARTSEARCH_CATALOG_TIMEOUT_SECS";

/// Variables that must be present and non-blank.
pub const REQUIRED_ENV: [&str; 3] = [ENV_ARTSY_ACCESS_TOKEN, ENV_ARTSY_USER_ID, ENV_OPENAI_API_KEY];

pub const DEFAULT_GRAPHQL_URL: &str = "https://metaphysics-production.artsy.net/v2";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_EXTRACT_TIMEOUT: Duration = Duration::from_secs(15);
pub const DEFAULT_CATALOG_TIMEOUT: Duration = Duration::from_secs(20);

/// Connection settings for the artwork catalog.
#[derive(Clone)]
pub struct CatalogConfig {
    pub endpoint: String,
    pub access_token: String,
    pub user_id: String,
    pub timeout: Duration,
}

impl CatalogConfig {
    pub fn new(
        endpoint: impl Into<String>,
        access_token: impl Into<String>,
        user_id: impl Into<String>,
    ) -> Self {
        Self {
            endpoint: endpoint.into(),
            access_token: access_token.into(),
            user_id: user_id.into(),
            timeout: DEFAULT_CATALOG_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("endpoint", &self.endpoint)
            .field("access_token", &"[REDACTED]")
            .field("user_id", &"[REDACTED]")
            .field("timeout", &self.timeout)
            .finish()
    }
}

/// Complete configuration for one [`crate::SearchPipeline`].
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub catalog: CatalogConfig,
    pub model: RemoteLlmConfig,
    pub page_size: u32,
    pub extract_timeout: Duration,
}

impl SearchConfig {
    pub fn new(catalog: CatalogConfig, model: RemoteLlmConfig) -> Self {
        Self {
            catalog,
            model,
            page_size: DEFAULT_PAGE_SIZE,
            extract_timeout: DEFAULT_EXTRACT_TIMEOUT,
        }
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    pub fn with_extract_timeout(mut self, timeout: Duration) -> Self {
        self.extract_timeout = timeout;
        self
    }

    /// Resolve configuration from the process environment.
    ///
    /// All missing credentials are reported together.
    pub fn from_env() -> Result<Self> {
        let missing = missing_env(&REQUIRED_ENV);
        if !missing.is_empty() {
            return Err(SearchError::Configuration(format!(
                "missing required environment variables: {}",
                missing.join(", ")
            )));
        }

        let catalog_timeout = Duration::from_secs(get_env_parse_or(
            ENV_CATALOG_TIMEOUT_SECS,
            DEFAULT_CATALOG_TIMEOUT.as_secs(),
        )?);
        let extract_timeout = Duration::from_secs(get_env_parse_or(
            ENV_EXTRACT_TIMEOUT_SECS,
            DEFAULT_EXTRACT_TIMEOUT.as_secs(),
        )?);

        let catalog = CatalogConfig::new(
            get_env_or(ENV_ARTSY_GRAPHQL_URL, DEFAULT_GRAPHQL_URL)?,
            require_env(ENV_ARTSY_ACCESS_TOKEN)?,
            require_env(ENV_ARTSY_USER_ID)?,
        )
        .with_timeout(catalog_timeout);

        let model = RemoteLlmConfig::new(
            require_env(ENV_OPENAI_API_KEY)?,
            get_env_or(ENV_OPENAI_BASE_URL, DEFAULT_OPENAI_BASE_URL)?,
            get_env_or(ENV_OPENAI_MODEL, DEFAULT_OPENAI_MODEL)?,
        )
        .with_timeout(extract_timeout);

        let config = Self::new(catalog, model)
            .with_page_size(page_size_from_env()?)
            .with_extract_timeout(extract_timeout);

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        validate_page_size(self.page_size)?;

        if self.catalog.endpoint.trim().is_empty() {
            return Err(SearchError::Configuration("catalog endpoint is empty".into()));
        }
        if self.catalog.access_token.trim().is_empty() || self.catalog.user_id.trim().is_empty() {
            return Err(SearchError::Configuration(
                "catalog credentials must not be blank".into(),
            ));
        }
        if self.extract_timeout.is_zero() || self.catalog.timeout.is_zero() {
            return Err(SearchError::Configuration("timeouts must be non-zero".into()));
        }

        self.model.validate()?;
        Ok(())
    }
}

/// Page size from the environment, for callers that need no credentials.
pub fn page_size_from_env() -> Result<u32> {
    let size = get_env_parse_or(ENV_PAGE_SIZE, DEFAULT_PAGE_SIZE)?;
    validate_page_size(size)?;
    Ok(size)
}

fn validate_page_size(size: u32) -> Result<()> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(SearchError::Configuration(format!(
            "page size must be between 1 and {}, got {}",
            MAX_PAGE_SIZE, size
        )));
    }
    Ok(())
}
