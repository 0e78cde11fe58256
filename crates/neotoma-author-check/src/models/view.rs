//! Views handed to the presentation layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::PageIndex;

/// One publication as seen by both sources, side by side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonView {
    /// Neotoma publication ID.
    pub publication_id: String,

    /// DOI used as the join key.
    pub doi: String,

    /// Title according to Neotoma.
    pub neotoma_title: String,

    /// Title according to OpenAlex, or `"N/A"`.
    pub openalex_title: String,

    /// Neotoma authors as `family,given`.
    pub neotoma_authors: Vec<String>,

    /// OpenAlex author descriptors, unmodified.
    pub openalex_authors: Vec<Value>,
}

impl ComparisonView {
    /// Check whether the OpenAlex side is the lookup-failure placeholder.
    #[must_use]
    pub fn openalex_missing(&self) -> bool {
        self.openalex_authors.is_empty()
            && self.openalex_title == super::authorship::UNAVAILABLE_TITLE
    }
}

/// Everything needed to render one review page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageView {
    /// Page being displayed (0 when nothing is reviewable).
    pub current_page: PageIndex,

    /// The comparison, if the page holds a publication.
    pub publication: Option<ComparisonView>,

    /// Nearest reviewable page before this one.
    pub prev_page: Option<PageIndex>,

    /// Nearest reviewable page after this one.
    pub next_page: Option<PageIndex>,

    /// Degradation notes for the reviewer.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notices: Vec<String>,
}

impl PageView {
    /// A view with nothing to show.
    #[must_use]
    pub fn empty(current_page: PageIndex, notice: impl Into<String>) -> Self {
        Self {
            current_page,
            publication: None,
            prev_page: None,
            next_page: None,
            notices: vec![notice.into()],
        }
    }
}
