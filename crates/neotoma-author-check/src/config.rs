//! Configuration for the Neotoma author check.

use std::path::PathBuf;
use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the Neotoma v2.0 API.
    pub const NEOTOMA_API: &str = "https://api.neotomadb.org/v2.0";

    /// Base URL for the OpenAlex API.
    pub const OPENALEX_API: &str = "https://api.openalex.org";

    /// Resolver prefix used to address OpenAlex works by DOI.
    pub const DOI_RESOLVER: &str = "https://doi.org";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Records per page. One publication per page keeps page index and
    /// publication index aligned.
    pub const PAGE_SIZE: u32 = 1;

    /// Candidates the navigator may reject before reporting an error.
    pub const MAX_SKIP_STEPS: usize = 250;

    /// Maximum idle keepalive connections per host.
    pub const MAX_KEEPALIVE: usize = 4;

    /// Keepalive expiry.
    pub const KEEPALIVE_EXPIRY: Duration = Duration::from_secs(30);
}

/// Verdict partition file names.
pub mod files {
    /// Publications whose author lists were confirmed.
    pub const VERIFIED: &str = "verified.json";

    /// Publications flagged for follow-up.
    pub const PROBLEMATIC: &str = "problematic.json";
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL for the Neotoma API (overridable for mock servers).
    pub neotoma_api_url: String,

    /// Base URL for the OpenAlex API (overridable for mock servers).
    pub openalex_api_url: String,

    /// Contact address sent to OpenAlex as `mailto` (polite pool).
    pub mailto: Option<String>,

    /// Directory holding `verified.json` and `problematic.json`.
    pub data_dir: PathBuf,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Navigator iteration ceiling.
    pub max_skip_steps: usize,
}

impl Config {
    /// Create a configuration against the public APIs.
    #[must_use]
    pub fn new(mailto: Option<String>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            neotoma_api_url: api::NEOTOMA_API.to_string(),
            openalex_api_url: api::OPENALEX_API.to_string(),
            mailto,
            data_dir: data_dir.into(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            max_skip_steps: api::MAX_SKIP_STEPS,
        }
    }

    /// Create a test configuration pointing both APIs at one mock server.
    ///
    /// Neotoma is served under `/neotoma`, OpenAlex under `/openalex`.
    #[must_use]
    pub fn for_testing(base_url: &str, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            neotoma_api_url: format!("{base_url}/neotoma"),
            openalex_api_url: format!("{base_url}/openalex"),
            mailto: None,
            data_dir: data_dir.into(),
            request_timeout: Duration::from_secs(2),
            connect_timeout: Duration::from_secs(1),
            max_skip_steps: 50,
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `OPENALEX_MAILTO`, `NEOTOMA_REVIEW_DATA_DIR`, `NEOTOMA_API_URL`,
    /// `OPENALEX_API_URL` and `NEOTOMA_MAX_SKIP_STEPS`.
    ///
    /// # Errors
    ///
    /// Returns error if environment variables are invalid.
    pub fn from_env() -> anyhow::Result<Self> {
        let mailto = std::env::var("OPENALEX_MAILTO").ok();
        let data_dir = std::env::var("NEOTOMA_REVIEW_DATA_DIR").unwrap_or_else(|_| ".".into());
        let mut config = Self::new(mailto, data_dir);

        if let Ok(url) = std::env::var("NEOTOMA_API_URL") {
            config.neotoma_api_url = url;
        }
        if let Ok(url) = std::env::var("OPENALEX_API_URL") {
            config.openalex_api_url = url;
        }
        if let Ok(steps) = std::env::var("NEOTOMA_MAX_SKIP_STEPS") {
            config.max_skip_steps = steps.parse().map_err(|e| {
                anyhow::anyhow!("NEOTOMA_MAX_SKIP_STEPS must be a positive integer: {e}")
            })?;
        }

        Ok(config)
    }

    /// Check if an OpenAlex contact address is configured.
    #[must_use]
    pub const fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(None, ".")
    }
}
