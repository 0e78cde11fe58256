//! OpenAlex authorship model.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::lenient;

/// Title shown when OpenAlex has no usable record.
pub const UNAVAILABLE_TITLE: &str = "N/A";

/// Authorship and title of an OpenAlex work.
///
/// Author descriptors are kept exactly as OpenAlex returns them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Authorship {
    /// `authorships[].author` objects, in OpenAlex order.
    pub authors: Vec<Value>,

    /// Work title, or `"N/A"`.
    pub title: String,
}

impl Authorship {
    /// The placeholder used when a lookup fails.
    #[must_use]
    pub fn unavailable() -> Self {
        Self { authors: Vec::new(), title: UNAVAILABLE_TITLE.to_string() }
    }

    /// Check whether this is the lookup-failure placeholder.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        self.authors.is_empty() && self.title == UNAVAILABLE_TITLE
    }

    /// `display_name` of each author, for text rendering.
    #[must_use]
    pub fn display_names(&self) -> Vec<String> {
        self.authors
            .iter()
            .map(|a| match a.get("display_name").and_then(Value::as_str) {
                Some(name) => name.to_string(),
                None => a.to_string(),
            })
            .collect()
    }

    /// ORCID URLs carried by OpenAlex, in author order, skipping authors without one.
    #[must_use]
    pub fn orcids(&self) -> Vec<String> {
        self.authors
            .iter()
            .filter_map(|a| a.get("orcid").and_then(Value::as_str))
            .map(str::to_owned)
            .collect()
    }
}

impl Default for Authorship {
    fn default() -> Self {
        Self::unavailable()
    }
}

/// Subset of an OpenAlex `Work` object.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct OpenAlexWork {
    #[serde(default)]
    title: Option<String>,

    #[serde(default)]
    display_name: Option<String>,

    #[serde(default, deserialize_with = "lenient::null_as_default")]
    authorships: Vec<OpenAlexAuthorship>,
}

#[derive(Debug, Default, Deserialize)]
struct OpenAlexAuthorship {
    #[serde(default)]
    author: Option<Value>,
}

impl From<OpenAlexWork> for Authorship {
    fn from(work: OpenAlexWork) -> Self {
        let title = work
            .title
            .or(work.display_name)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNAVAILABLE_TITLE.to_string());

        let authors = work
            .authorships
            .into_iter()
            .filter_map(|a| a.author)
            .filter(|a| !a.is_null())
            .collect();

        Self { authors, title }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_work_conversion() {
        let work: OpenAlexWork = serde_json::from_value(json!({
            "id": "https://openalex.org/W1",
            "title": "Holocene vegetation",
            "authorships": [
                {"author": {"id": "https://openalex.org/A1", "display_name": "A. Smith",
                            "orcid": "https://orcid.org/0000-0001-2345-6789"}},
                {"author": {"id": "https://openalex.org/A2", "display_name": "B. Jones"}}
            ]
        }))
        .unwrap();

        let authorship = Authorship::from(work);
        assert_eq!(authorship.title, "Holocene vegetation");
        assert_eq!(authorship.display_names(), vec!["A. Smith", "B. Jones"]);
        assert_eq!(authorship.orcids(), vec!["https://orcid.org/0000-0001-2345-6789"]);
        assert!(!authorship.is_unavailable());
    }

    #[test]
    fn test_null_title_falls_back() {
        let work: OpenAlexWork =
            serde_json::from_value(json!({"title": null, "display_name": "Shown"})).unwrap();
        assert_eq!(Authorship::from(work).title, "Shown");

        let work: OpenAlexWork =
            serde_json::from_value(json!({"title": null, "authorships": null})).unwrap();
        let authorship = Authorship::from(work);
        assert_eq!(authorship.title, UNAVAILABLE_TITLE);
        assert!(authorship.authors.is_empty());
    }

    #[test]
    fn test_unavailable_placeholder() {
        let a = Authorship::unavailable();
        assert!(a.is_unavailable());
        assert_eq!(a.title, "N/A");
    }
}
