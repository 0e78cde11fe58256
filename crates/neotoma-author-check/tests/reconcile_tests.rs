//! Reconciliation assembler tests.

use std::sync::Mutex;
use std::time::Duration;

use serde_json::json;

use neotoma_author_check::client::AuthorshipSource;
use neotoma_author_check::error::{ClientError, ClientResult};
use neotoma_author_check::models::{Authorship, NeotomaAuthor, PublicationRecord};
use neotoma_author_check::reconcile::{assemble, lookup_authorship};

/// Answers from a fixed result and remembers which DOIs were asked for.
struct ScriptedOpenAlex {
    answer: fn() -> ClientResult<Authorship>,
    asked: Mutex<Vec<String>>,
}

impl ScriptedOpenAlex {
    fn new(answer: fn() -> ClientResult<Authorship>) -> Self {
        Self { answer, asked: Mutex::new(Vec::new()) }
    }

    fn asked(&self) -> Vec<String> {
        self.asked.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AuthorshipSource for ScriptedOpenAlex {
    async fn fetch_authorship(&self, doi: &str) -> ClientResult<Authorship> {
        self.asked.lock().unwrap().push(doi.to_string());
        (self.answer)()
    }
}

fn publication() -> PublicationRecord {
    PublicationRecord {
        publication_id: "77".into(),
        doi: Some(" 10.1/x ".into()),
        title: "Pollen at Lake X".into(),
        authors: vec![
            NeotomaAuthor::new(Some("Smith"), Some("A")),
            NeotomaAuthor::new(None, Some("A")),
            NeotomaAuthor::new(Some("Jones"), None),
        ],
    }
}

#[tokio::test]
async fn test_assemble_side_by_side() {
    let openalex = ScriptedOpenAlex::new(|| {
        Ok(Authorship {
            authors: vec![json!({"id": "https://openalex.org/A1", "display_name": "A. Smith"})],
            title: "Pollen at Lake X".into(),
        })
    });

    let view = assemble(&openalex, &publication()).await;

    assert_eq!(openalex.asked(), vec!["10.1/x"]);
    assert_eq!(view.publication_id, "77");
    assert_eq!(view.doi, "10.1/x");
    assert_eq!(view.neotoma_title, "Pollen at Lake X");
    assert_eq!(view.openalex_title, "Pollen at Lake X");
    assert_eq!(view.neotoma_authors, vec!["Smith,A", ",A", "Jones,"]);
    assert_eq!(view.openalex_authors[0]["display_name"], "A. Smith");
    assert!(!view.openalex_missing());
}

#[tokio::test]
async fn test_timeout_degrades_to_placeholder() {
    let openalex = ScriptedOpenAlex::new(|| Err(ClientError::Timeout(Duration::from_secs(30))));

    let view = assemble(&openalex, &publication()).await;

    assert!(view.openalex_authors.is_empty());
    assert_eq!(view.openalex_title, "N/A");
    assert!(view.openalex_missing());
    assert_eq!(view.neotoma_authors.len(), 3);
    assert_eq!(view.neotoma_title, "Pollen at Lake X");
}

#[tokio::test]
async fn test_not_found_and_malformed_degrade_identically() {
    let not_found = ScriptedOpenAlex::new(|| Err(ClientError::not_found("10.1/x")));
    let malformed = ScriptedOpenAlex::new(|| {
        Err(ClientError::Parse(serde_json::from_str::<serde_json::Value>("{").unwrap_err()))
    });

    assert_eq!(lookup_authorship(&not_found, "10.1/x").await, Authorship::unavailable());
    assert_eq!(lookup_authorship(&malformed, "10.1/x").await, Authorship::unavailable());
}

#[tokio::test]
async fn test_record_without_doi_is_not_looked_up() {
    let openalex = ScriptedOpenAlex::new(|| panic!("no lookup expected"));
    let record = PublicationRecord { doi: None, ..publication() };

    let view = assemble(&openalex, &record).await;

    assert!(openalex.asked().is_empty());
    assert_eq!(view.doi, "");
    assert_eq!(view.openalex_title, "N/A");
}
