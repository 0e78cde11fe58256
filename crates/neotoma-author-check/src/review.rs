//! Review workflow: page views, landing view, and reviewer actions.
//!
//! Every call recomputes the skip set from the verdict store, so a verdict
//! recorded by one request is honored by the next.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::client::{AuthorshipSource, NeotomaClient, OpenAlexClient, PublicationSource};
use crate::config::Config;
use crate::error::{NavigationResult, ReviewResult};
use crate::models::{Direction, Navigation, PageIndex, PageView, Partition, ReviewAction, SkipSet};
use crate::navigator::{Navigator, Rejection, check_reviewable};
use crate::reconcile;
use crate::store::VerdictStore;

/// Confirmation message returned after a verdict is saved.
pub const SAVED_MESSAGE: &str = "DOI saved successfully!";

/// A verdict that was just recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedVerdict {
    /// Partition the entry went to.
    pub partition: Partition,
    /// Publication ID of the entry.
    pub publication_id: String,
    /// DOI of the entry.
    pub doi: String,
}

/// Entry counts per partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VerdictStats {
    /// Entries in `verified.json`.
    pub verified: usize,
    /// Entries in `problematic.json`.
    pub problematic: usize,
}

/// Review service shared by the HTTP boundary and the CLI.
#[derive(Clone)]
pub struct ReviewService {
    neotoma: Arc<dyn PublicationSource>,
    openalex: Arc<dyn AuthorshipSource>,
    store: Arc<VerdictStore>,
    max_skip_steps: usize,
}

impl ReviewService {
    /// Create a service from explicit collaborators.
    #[must_use]
    pub fn new(
        neotoma: Arc<dyn PublicationSource>,
        openalex: Arc<dyn AuthorshipSource>,
        store: Arc<VerdictStore>,
        max_skip_steps: usize,
    ) -> Self {
        Self { neotoma, openalex, store, max_skip_steps }
    }

    /// Create a service talking to the configured APIs and data directory.
    ///
    /// # Errors
    ///
    /// Returns error if an HTTP client cannot be built.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self::new(
            Arc::new(NeotomaClient::new(config)?),
            Arc::new(OpenAlexClient::new(config)?),
            Arc::new(VerdictStore::new(config.data_dir.clone())),
            config.max_skip_steps,
        ))
    }

    /// The verdict store.
    #[must_use]
    pub fn store(&self) -> &VerdictStore {
        &self.store
    }

    fn navigator(&self) -> Navigator<'_, dyn PublicationSource> {
        Navigator::new(self.neotoma.as_ref(), self.max_skip_steps)
    }

    /// Nearest reviewable page from `current`, against a fresh skip set.
    pub async fn next_valid_page(
        &self,
        current: PageIndex,
        direction: Direction,
    ) -> NavigationResult<Navigation> {
        let skip = self.store.skip_set().await;
        self.navigator().next_valid_page(current, direction, &skip).await
    }

    /// Comparison and navigation targets for `page`.
    ///
    /// Upstream and navigation failures become notices; this never fails.
    pub async fn page_view(&self, page: PageIndex) -> PageView {
        let page = page.max(1);
        let skip = self.store.skip_set().await;
        let navigator = self.navigator();
        let mut notices = Vec::new();

        let publication = match navigator.record_at(page).await {
            Ok(Some(record)) => {
                if let Err(reason) = check_reviewable(&record, &skip) {
                    tracing::debug!(page, ?reason, "Displaying non-reviewable page");
                    notices.push(match reason {
                        Rejection::MissingDoi => {
                            format!("Publication {} has no DOI", record.publication_id)
                        }
                        Rejection::AlreadyReviewed => {
                            format!("Publication {} already has a verdict", record.publication_id)
                        }
                    });
                }
                Some(reconcile::assemble(self.openalex.as_ref(), &record).await)
            }
            Ok(None) => {
                notices.push(format!("No publication on page {page}"));
                None
            }
            Err(e) => {
                tracing::warn!(page, error = %e, "Neotoma fetch failed");
                notices.push(format!("Neotoma unavailable: {e}"));
                None
            }
        };

        let prev_page = target(&navigator, page, Direction::Backward, &skip, &mut notices).await;
        let next_page = target(&navigator, page, Direction::Forward, &skip, &mut notices).await;

        tracing::debug!(
            page,
            neotoma_fetches = navigator.fetches(),
            openalex_lookups = usize::from(publication.as_ref().is_some_and(|p| !p.doi.is_empty())),
            "Page view assembled"
        );

        PageView { current_page: page, publication, prev_page, next_page, notices }
    }

    /// View of the first reviewable page.
    pub async fn landing_view(&self) -> PageView {
        match self.next_valid_page(0, Direction::Forward).await {
            Ok(Navigation::Page(page)) => self.page_view(page).await,
            Ok(Navigation::Exhausted) => PageView::empty(0, "Nothing left to review"),
            Err(e) => {
                tracing::warn!(error = %e, "Initial discovery failed");
                PageView::empty(0, e.to_string())
            }
        }
    }

    /// Validate and record a reviewer action.
    ///
    /// A publication that already has a verdict may be reviewed again; both
    /// entries are kept.
    pub async fn submit(&self, action: ReviewAction) -> ReviewResult<SavedVerdict> {
        let (partition, entry) = action.into_entry(Utc::now())?;

        if !entry.publication_id.is_empty()
            && self.store.skip_set().await.contains(&entry.publication_id)
        {
            tracing::warn!(
                publication_id = %entry.publication_id,
                partition = %partition,
                "Publication already has a verdict, recording another"
            );
        }

        self.store.append(partition, &entry).await?;

        Ok(SavedVerdict { partition, publication_id: entry.publication_id, doi: entry.doi })
    }

    /// Entry counts per partition.
    pub async fn stats(&self) -> VerdictStats {
        VerdictStats {
            verified: self.store.count(Partition::Verified).await,
            problematic: self.store.count(Partition::Problematic).await,
        }
    }
}

async fn target(
    navigator: &Navigator<'_, dyn PublicationSource>,
    page: PageIndex,
    direction: Direction,
    skip: &SkipSet,
    notices: &mut Vec<String>,
) -> Option<PageIndex> {
    match navigator.next_valid_page(page, direction, skip).await {
        Ok(nav) => nav.page(),
        Err(e) => {
            tracing::warn!(page, %direction, error = %e, "Navigation failed");
            notices.push(e.to_string());
            None
        }
    }
}

impl std::fmt::Debug for ReviewService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReviewService")
            .field("store", &self.store)
            .field("max_skip_steps", &self.max_skip_steps)
            .finish()
    }
}
