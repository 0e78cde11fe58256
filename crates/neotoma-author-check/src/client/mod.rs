//! Upstream API clients.
//!
//! Provides async HTTP adapters for:
//! - Neotoma publications (paged by `limit`/`offset`)
//! - OpenAlex works (looked up by DOI)
//!
//! Adapters report every failure as a [`ClientError`]; the navigator and the
//! assembler decide how each failure degrades.

mod neotoma;
mod openalex;

pub use neotoma::NeotomaClient;
pub use openalex::OpenAlexClient;

use reqwest::Client;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::models::{Authorship, PublicationRecord};

/// A paged source of publication records.
#[async_trait::async_trait]
pub trait PublicationSource: Send + Sync {
    /// Fetch up to `limit` records starting at `offset`.
    ///
    /// An empty list means the source has no records at that offset.
    async fn fetch_page(&self, limit: u32, offset: u32) -> ClientResult<Vec<PublicationRecord>>;
}

/// A DOI-keyed source of authorship.
#[async_trait::async_trait]
pub trait AuthorshipSource: Send + Sync {
    /// Look up the authors and title of the work with this DOI.
    async fn fetch_authorship(&self, doi: &str) -> ClientResult<Authorship>;
}

/// Build the shared reqwest client used by both adapters.
fn build_http_client(config: &Config) -> anyhow::Result<Client> {
    let mut headers = reqwest::header::HeaderMap::new();
    headers.insert(reqwest::header::ACCEPT, "application/json".parse()?);

    let client = Client::builder()
        .default_headers(headers)
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .timeout(config.request_timeout)
        .connect_timeout(config.connect_timeout)
        .pool_max_idle_per_host(api::MAX_KEEPALIVE)
        .pool_idle_timeout(api::KEEPALIVE_EXPIRY)
        .gzip(true)
        .build()?;

    Ok(client)
}

/// Send a GET request and decode a JSON body.
async fn get_json<T>(client: &Client, url: url::Url, timeout: std::time::Duration) -> ClientResult<T>
where
    T: serde::de::DeserializeOwned,
{
    let response = client.get(url).send().await.map_err(|e| {
        if e.is_timeout() { ClientError::Timeout(timeout) } else { ClientError::Http(e) }
    })?;

    let response = handle_response(response).await?;
    let bytes = response.bytes().await?;

    serde_json::from_slice(&bytes).map_err(ClientError::from)
}

/// Map API response status codes to errors.
async fn handle_response(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();

    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    match status.as_u16() {
        404 => Err(ClientError::not_found(text)),
        400 => Err(ClientError::bad_request(text)),
        500..=599 => Err(ClientError::server(status.as_u16(), text)),
        _ => Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text }),
    }
}
