//! Reviewer verdicts and the action that produces them.

use std::collections::HashSet;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::lenient;
use crate::config::files;
use crate::error::{ReviewError, ReviewResult};

/// Which verdict file an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Partition {
    /// Author lists agree.
    Verified,
    /// Author lists need attention.
    Problematic,
}

impl Partition {
    /// Both partitions, in file order.
    pub const ALL: [Self; 2] = [Self::Verified, Self::Problematic];

    /// File name under the data directory.
    #[must_use]
    pub const fn file_name(self) -> &'static str {
        match self {
            Self::Verified => files::VERIFIED,
            Self::Problematic => files::PROBLEMATIC,
        }
    }

    /// Partition selected by a reviewer action name (`verify` / `problematic`).
    #[must_use]
    pub fn from_action(action: &str) -> Option<Self> {
        match action.trim() {
            "verify" => Some(Self::Verified),
            "problematic" => Some(Self::Problematic),
            _ => None,
        }
    }
}

impl fmt::Display for Partition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Verified => "verified",
            Self::Problematic => "problematic",
        })
    }
}

/// One persisted reviewer decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerdictEntry {
    /// Neotoma publication ID. Empty when the reviewer action carried none.
    #[serde(rename = "Publication ID", default, deserialize_with = "lenient::publication_id")]
    pub publication_id: String,

    /// Title as shown to the reviewer.
    #[serde(rename = "Title", default, deserialize_with = "lenient::text")]
    pub title: String,

    /// DOI the verdict was recorded against.
    #[serde(rename = "DOI", default, deserialize_with = "lenient::text")]
    pub doi: String,

    /// Author list as submitted by the presentation layer.
    #[serde(rename = "Authors", default, deserialize_with = "lenient::text")]
    pub authors: String,

    /// Free-text reason.
    #[serde(rename = "Reason", default)]
    pub reason: Option<String>,

    /// ORCID identifiers noted by the reviewer.
    #[serde(rename = "ORCIDs", default)]
    pub orcids: Option<String>,

    /// When the verdict was recorded. Absent in older files.
    #[serde(rename = "Reviewed At", default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

/// A reviewer action as received from the presentation layer.
///
/// Field names follow the query parameters of `/save-doi`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewAction {
    /// `verify` or `problematic`.
    #[serde(default)]
    pub action: Option<String>,

    /// DOI of the reviewed publication.
    #[serde(default)]
    pub doi: Option<String>,

    /// Neotoma publication ID.
    #[serde(default, deserialize_with = "lenient::optional_publication_id")]
    pub publicationid: Option<String>,

    /// Serialized author list.
    #[serde(default)]
    pub authors: Option<String>,

    /// Article title.
    #[serde(default)]
    pub articletitle: Option<String>,

    /// Reason for the verdict.
    #[serde(default)]
    pub reason: Option<String>,

    /// ORCID identifiers.
    #[serde(default)]
    pub orcid: Option<String>,
}

impl ReviewAction {
    /// Partition named by `action`, if recognized.
    #[must_use]
    pub fn partition(&self) -> Option<Partition> {
        self.action.as_deref().and_then(Partition::from_action)
    }

    /// Validate and convert into a verdict entry.
    ///
    /// Requires a non-blank `doi` and a recognized `action`.
    pub fn into_entry(
        self,
        reviewed_at: DateTime<Utc>,
    ) -> ReviewResult<(Partition, VerdictEntry)> {
        let partition = self.partition().ok_or(ReviewError::MissingParameters)?;
        let doi = non_blank(self.doi).ok_or(ReviewError::MissingParameters)?;

        let entry = VerdictEntry {
            publication_id: self.publicationid.unwrap_or_default(),
            title: self.articletitle.unwrap_or_default(),
            doi,
            authors: self.authors.unwrap_or_default(),
            reason: non_blank(self.reason),
            orcids: non_blank(self.orcid),
            reviewed_at: Some(reviewed_at),
        };

        Ok((partition, entry))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Publication IDs that already carry a verdict.
///
/// Membership is tested on normalized IDs, so `"12"` and `12` match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkipSet {
    ids: HashSet<String>,
}

impl SkipSet {
    /// Create an empty skip set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an ID. Blank IDs are ignored.
    pub fn insert(&mut self, id: &str) -> bool {
        let id = lenient::normalize_publication_id(id);
        !id.is_empty() && self.ids.insert(id)
    }

    /// Check whether an ID has been reviewed.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(&lenient::normalize_publication_id(id))
    }

    /// Number of distinct reviewed IDs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Check whether nothing has been reviewed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate over normalized IDs.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

impl<S: AsRef<str>> FromIterator<S> for SkipSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        for id in iter {
            set.insert(id.as_ref());
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn action(kind: &str, doi: &str) -> ReviewAction {
        ReviewAction {
            action: Some(kind.into()),
            doi: Some(doi.into()),
            publicationid: Some("77".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_partition_from_action() {
        assert_eq!(Partition::from_action("verify"), Some(Partition::Verified));
        assert_eq!(Partition::from_action("problematic"), Some(Partition::Problematic));
        assert_eq!(Partition::from_action("verified"), None);
        assert_eq!(Partition::Verified.file_name(), "verified.json");
    }

    #[test]
    fn test_action_requires_doi_and_action() {
        let now = Utc::now();
        assert!(matches!(
            action("verify", "  ").into_entry(now),
            Err(ReviewError::MissingParameters)
        ));
        assert!(matches!(
            action("delete", "10.1/x").into_entry(now),
            Err(ReviewError::MissingParameters)
        ));
        assert!(matches!(
            ReviewAction::default().into_entry(now),
            Err(ReviewError::MissingParameters)
        ));
    }

    #[test]
    fn test_action_into_entry() {
        let mut a = action("problematic", "10.1/x");
        a.reason = Some("missing second author".into());
        a.orcid = Some(String::new());

        let (partition, entry) = a.into_entry(Utc::now()).unwrap();
        assert_eq!(partition, Partition::Problematic);
        assert_eq!(entry.publication_id, "77");
        assert_eq!(entry.reason.as_deref(), Some("missing second author"));
        assert_eq!(entry.orcids, None);
        assert!(entry.reviewed_at.is_some());
    }

    #[test]
    fn test_entry_wire_keys() {
        let entry = VerdictEntry {
            publication_id: "77".into(),
            title: "T".into(),
            doi: "10.1/x".into(),
            authors: "Smith,A".into(),
            reason: None,
            orcids: None,
            reviewed_at: None,
        };
        let value = serde_json::to_value(&entry).unwrap();
        assert_eq!(
            value,
            json!({
                "Publication ID": "77",
                "Title": "T",
                "DOI": "10.1/x",
                "Authors": "Smith,A",
                "Reason": null,
                "ORCIDs": null
            })
        );
    }

    #[test]
    fn test_entry_accepts_numeric_id_and_list_authors() {
        let entry: VerdictEntry = serde_json::from_value(json!({
            "Publication ID": 12,
            "DOI": "10.1/y",
            "Authors": ["Smith,A"],
            "Title": null
        }))
        .unwrap();
        assert_eq!(entry.publication_id, "12");
        assert_eq!(entry.authors, r#"["Smith,A"]"#);
        assert_eq!(entry.title, "");
    }

    #[test]
    fn test_skip_set_normalizes() {
        let set: SkipSet = ["12", " 12", "012", "abc"].into_iter().collect();
        assert_eq!(set.len(), 2);
        assert!(set.contains("12"));
        assert!(set.contains("12.0"));
        assert!(!set.contains("13"));
    }
}
