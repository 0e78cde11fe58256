//! OpenAlex works adapter.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::{AuthorshipSource, build_http_client, get_json};
use crate::config::{Config, api};
use crate::error::ClientResult;
use crate::models::{Authorship, OpenAlexWork};

/// Client for `GET {openalex}/works/https://doi.org/{doi}`.
#[derive(Clone)]
pub struct OpenAlexClient {
    client: Client,
    base_url: String,
    mailto: Option<String>,
    timeout: Duration,
}

impl OpenAlexClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.openalex_api_url.trim_end_matches('/').to_string(),
            mailto: config.mailto.clone(),
            timeout: config.request_timeout,
        })
    }

    /// Check if a polite-pool contact address is configured.
    #[must_use]
    pub fn has_mailto(&self) -> bool {
        self.mailto.is_some()
    }

    /// `{base}/works/https://doi.org/{doi}`, with each DOI segment percent-encoded.
    fn work_url(&self, doi: &str) -> ClientResult<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .push("works")
            .extend(api::DOI_RESOLVER.split('/'))
            .extend(doi.trim().split('/'));
        if let Some(mailto) = &self.mailto {
            url.query_pairs_mut().append_pair("mailto", mailto);
        }
        Ok(url)
    }

    /// Get the work registered under a DOI.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for unknown DOIs, other errors on transport or parse failure.
    pub async fn get_work(&self, doi: &str) -> ClientResult<Authorship> {
        let url = self.work_url(doi)?;
        tracing::debug!(doi, "Fetching OpenAlex work");

        let work: OpenAlexWork = get_json(&self.client, url, self.timeout).await?;
        Ok(Authorship::from(work))
    }
}

#[async_trait::async_trait]
impl AuthorshipSource for OpenAlexClient {
    async fn fetch_authorship(&self, doi: &str) -> ClientResult<Authorship> {
        self.get_work(doi).await
    }
}

impl std::fmt::Debug for OpenAlexClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAlexClient").field("has_mailto", &self.has_mailto()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_url_embeds_doi_resolver() {
        let client = OpenAlexClient::new(&Config::for_testing("http://localhost:1", ".")).unwrap();
        let url = client.work_url("10.1/x").unwrap();
        assert_eq!(url.as_str(), "http://localhost:1/openalex/works/https://doi.org/10.1/x");
    }

    #[test]
    fn test_work_url_escapes_reserved_characters() {
        let client = OpenAlexClient::new(&Config::for_testing("http://localhost:1", ".")).unwrap();

        let url = client
            .work_url("10.1002/(SICI)1099-1417(199709/10)12:5<419::AID-JQS316>3.0.CO;2-#")
            .unwrap();
        assert!(url.path().ends_with("/(SICI)1099-1417(199709/10)12:5%3C419::AID-JQS316%3E3.0.CO;2-%23"));
        assert_eq!(url.fragment(), None);

        let url = client.work_url("10.1/a?b").unwrap();
        assert_eq!(url.path(), "/openalex/works/https://doi.org/10.1/a%3Fb");
        assert_eq!(url.query(), None);

        let url = client.work_url("10.1/50%off").unwrap();
        assert_eq!(url.path(), "/openalex/works/https://doi.org/10.1/50%25off");
    }

    #[test]
    fn test_work_url_against_root_base() {
        let mut config = Config::for_testing("http://localhost:1", ".");
        config.openalex_api_url = "https://api.openalex.org/".into();
        let client = OpenAlexClient::new(&config).unwrap();
        let url = client.work_url(" 10.1/x ").unwrap();
        assert_eq!(url.as_str(), "https://api.openalex.org/works/https://doi.org/10.1/x");
    }

    #[test]
    fn test_work_url_with_mailto() {
        let mut config = Config::for_testing("http://localhost:1", ".");
        config.mailto = Some("reviewer@example.org".into());
        let client = OpenAlexClient::new(&config).unwrap();
        let url = client.work_url("10.1/x").unwrap();
        assert_eq!(url.query(), Some("mailto=reviewer%40example.org"));
    }
}
