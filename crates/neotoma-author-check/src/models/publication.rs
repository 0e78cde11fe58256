//! Publication data model matching the Neotoma publications endpoint.

use serde::{Deserialize, Serialize};

use super::lenient;

/// An author as recorded by Neotoma.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NeotomaAuthor {
    /// Family name.
    #[serde(default, rename = "familyname")]
    pub family_name: Option<String>,

    /// Given names or initials.
    #[serde(default, rename = "givennames")]
    pub given_names: Option<String>,
}

impl NeotomaAuthor {
    /// Create an author from optional name parts.
    #[must_use]
    pub fn new(family_name: Option<&str>, given_names: Option<&str>) -> Self {
        Self {
            family_name: family_name.map(str::to_owned),
            given_names: given_names.map(str::to_owned),
        }
    }

    /// `family,given`, with missing parts rendered empty. The comma is always present.
    #[must_use]
    pub fn formatted(&self) -> String {
        format!(
            "{},{}",
            self.family_name.as_deref().unwrap_or(""),
            self.given_names.as_deref().unwrap_or("")
        )
    }
}

/// One Neotoma publication, the unit shown on a review page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublicationRecord {
    /// Neotoma publication ID (normalized).
    pub publication_id: String,

    /// DOI, if Neotoma has one.
    #[serde(default)]
    pub doi: Option<String>,

    /// Article title.
    #[serde(default)]
    pub title: String,

    /// Authors in Neotoma order.
    #[serde(default)]
    pub authors: Vec<NeotomaAuthor>,
}

impl PublicationRecord {
    /// The DOI, if present and non-blank.
    #[must_use]
    pub fn doi(&self) -> Option<&str> {
        self.doi.as_deref().map(str::trim).filter(|d| !d.is_empty())
    }

    /// Check whether this record can be joined against OpenAlex.
    #[must_use]
    pub fn has_doi(&self) -> bool {
        self.doi().is_some()
    }

    /// Authors formatted as `family,given`.
    #[must_use]
    pub fn formatted_authors(&self) -> Vec<String> {
        self.authors.iter().map(NeotomaAuthor::formatted).collect()
    }
}

/// Envelope of `GET /data/publications`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct NeotomaResponse {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    data: NeotomaData,
}

#[derive(Debug, Default, Deserialize)]
struct NeotomaData {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    result: Vec<NeotomaItem>,
}

#[derive(Debug, Default, Deserialize)]
struct NeotomaItem {
    #[serde(default, deserialize_with = "lenient::null_as_default")]
    publication: NeotomaPublication,
}

#[derive(Debug, Default, Deserialize)]
struct NeotomaPublication {
    #[serde(default)]
    doi: Option<String>,

    #[serde(default, deserialize_with = "lenient::optional_publication_id")]
    publicationid: Option<String>,

    #[serde(default, deserialize_with = "lenient::text")]
    articletitle: String,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    author: Vec<NeotomaAuthor>,
}

impl NeotomaResponse {
    /// Unwrap the envelope, keeping records without a DOI.
    pub(crate) fn into_records(self) -> Vec<PublicationRecord> {
        self.data
            .result
            .into_iter()
            .map(|item| {
                let p = item.publication;
                PublicationRecord {
                    publication_id: p.publicationid.unwrap_or_default(),
                    doi: p.doi,
                    title: p.articletitle,
                    authors: p.author,
                }
            })
            .collect()
    }
}
