//! Neotoma publications adapter.

use std::time::Duration;

use reqwest::Client;
use url::Url;

use super::{PublicationSource, build_http_client, get_json};
use crate::config::Config;
use crate::error::ClientResult;
use crate::models::{NeotomaResponse, PublicationRecord};

/// Client for `GET {neotoma}/data/publications`.
#[derive(Clone)]
pub struct NeotomaClient {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl NeotomaClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            client: build_http_client(config)?,
            base_url: config.neotoma_api_url.trim_end_matches('/').to_string(),
            timeout: config.request_timeout,
        })
    }

    fn publications_url(&self, limit: u32, offset: u32) -> ClientResult<Url> {
        let mut url = Url::parse(&format!("{}/data/publications", self.base_url))?;
        url.query_pairs_mut()
            .append_pair("limit", &limit.to_string())
            .append_pair("offset", &offset.to_string());
        Ok(url)
    }

    /// Fetch one page of publications, keeping records that lack a DOI.
    ///
    /// # Errors
    ///
    /// Returns error on transport failure, non-2xx status, or a malformed body.
    pub async fn get_publications(
        &self,
        limit: u32,
        offset: u32,
    ) -> ClientResult<Vec<PublicationRecord>> {
        let url = self.publications_url(limit, offset)?;
        tracing::debug!(limit, offset, "Fetching Neotoma publications");

        let response: NeotomaResponse = get_json(&self.client, url, self.timeout).await?;
        Ok(response.into_records())
    }
}

#[async_trait::async_trait]
impl PublicationSource for NeotomaClient {
    async fn fetch_page(&self, limit: u32, offset: u32) -> ClientResult<Vec<PublicationRecord>> {
        self.get_publications(limit, offset).await
    }
}

impl std::fmt::Debug for NeotomaClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NeotomaClient").field("base_url", &self.base_url).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publications_url() {
        let client = NeotomaClient::new(&Config::for_testing("http://localhost:1", ".")).unwrap();
        let url = client.publications_url(1, 40).unwrap();
        assert_eq!(url.as_str(), "http://localhost:1/neotoma/data/publications?limit=1&offset=40");
    }
}
