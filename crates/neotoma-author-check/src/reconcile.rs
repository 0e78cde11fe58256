//! Reconciliation of a Neotoma publication with its OpenAlex counterpart.

use crate::client::AuthorshipSource;
use crate::models::{Authorship, ComparisonView, PublicationRecord};

/// Look up OpenAlex authorship for a DOI, degrading every failure to the placeholder.
pub async fn lookup_authorship<A: AuthorshipSource + ?Sized>(source: &A, doi: &str) -> Authorship {
    match source.fetch_authorship(doi).await {
        Ok(authorship) => authorship,
        Err(e) if e.is_not_found() => {
            tracing::info!(doi, "DOI not indexed by OpenAlex");
            Authorship::unavailable()
        }
        Err(e) => {
            tracing::warn!(doi, error = %e, "OpenAlex lookup failed");
            Authorship::unavailable()
        }
    }
}

/// Build the side-by-side view for one publication. Never fails.
///
/// A record without a DOI is not looked up and gets the OpenAlex placeholder.
pub async fn assemble<A: AuthorshipSource + ?Sized>(
    source: &A,
    publication: &PublicationRecord,
) -> ComparisonView {
    let doi = publication.doi().unwrap_or_default();
    let authorship = if doi.is_empty() {
        Authorship::unavailable()
    } else {
        lookup_authorship(source, doi).await
    };

    ComparisonView {
        publication_id: publication.publication_id.clone(),
        doi: doi.to_string(),
        neotoma_title: publication.title.clone(),
        openalex_title: authorship.title,
        neotoma_authors: publication.formatted_authors(),
        openalex_authors: authorship.authors,
    }
}
