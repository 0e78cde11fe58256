//! Page navigation over a sparse publication list.
//!
//! A page is reviewable when its publication has a DOI and no verdict yet.
//! The navigator walks one page at a time in a fixed direction until it finds
//! a reviewable page, runs off the end of the source, or hits its step ceiling.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::client::PublicationSource;
use crate::config::api;
use crate::error::{NavigationError, NavigationResult};
use crate::models::{Direction, Navigation, PageIndex, PublicationRecord, SkipSet};

/// Why a candidate page was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// The publication has no DOI to join on.
    MissingDoi,
    /// The publication already has a verdict.
    AlreadyReviewed,
}

/// Acceptance test for a candidate page.
pub fn check_reviewable(record: &PublicationRecord, skip: &SkipSet) -> Result<(), Rejection> {
    if !record.has_doi() {
        return Err(Rejection::MissingDoi);
    }
    if skip.contains(&record.publication_id) {
        return Err(Rejection::AlreadyReviewed);
    }
    Ok(())
}

/// Offset of the first record on `page` (1-based).
#[must_use]
pub const fn page_offset(page: PageIndex) -> u32 {
    page.saturating_sub(1).saturating_mul(api::PAGE_SIZE)
}

/// Finds the nearest reviewable page.
pub struct Navigator<'a, S: PublicationSource + ?Sized> {
    source: &'a S,
    max_steps: usize,
    fetches: AtomicUsize,
}

impl<'a, S: PublicationSource + ?Sized> Navigator<'a, S> {
    /// Create a navigator over `source` that examines at most `max_steps` candidates.
    #[must_use]
    pub fn new(source: &'a S, max_steps: usize) -> Self {
        Self { source, max_steps, fetches: AtomicUsize::new(0) }
    }

    /// Upstream page fetches issued through this navigator so far.
    #[must_use]
    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::Relaxed)
    }

    /// Fetch the publication shown on `page`, if any.
    pub async fn record_at(
        &self,
        page: PageIndex,
    ) -> crate::error::ClientResult<Option<PublicationRecord>> {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        let records = self.source.fetch_page(api::PAGE_SIZE, page_offset(page)).await?;
        Ok(records.into_iter().next())
    }

    /// Nearest reviewable page strictly in `direction` from `current`.
    ///
    /// Backward steps reflect at page 1: from page 1 the only candidate is page 1
    /// itself, and if it is rejected the scan reports [`Navigation::Exhausted`].
    /// Start from page 0 moving forward to find the first reviewable page.
    pub async fn next_valid_page(
        &self,
        current: PageIndex,
        direction: Direction,
        skip: &SkipSet,
    ) -> NavigationResult<Navigation> {
        let mut page = current;
        let mut steps = 0usize;

        loop {
            let candidate = direction.step(page);
            if steps > 0 && candidate == page {
                return Ok(Navigation::Exhausted);
            }
            if steps >= self.max_steps {
                tracing::warn!(start = current, %direction, steps, "Navigation step limit reached");
                return Err(NavigationError::StepLimitExceeded { start: current, direction, steps });
            }
            steps += 1;

            let Some(record) = self
                .record_at(candidate)
                .await
                .map_err(|source| NavigationError::Upstream { page: candidate, source })?
            else {
                tracing::debug!(page = candidate, %direction, "Source exhausted");
                return Ok(Navigation::Exhausted);
            };

            match check_reviewable(&record, skip) {
                Ok(()) => {
                    tracing::debug!(
                        from = current,
                        page = candidate,
                        skipped = steps - 1,
                        "Found reviewable page"
                    );
                    return Ok(Navigation::Page(candidate));
                }
                Err(reason) => {
                    tracing::debug!(
                        page = candidate,
                        publication_id = %record.publication_id,
                        ?reason,
                        "Skipping page"
                    );
                }
            }

            page = candidate;
        }
    }
}

impl<S: PublicationSource + ?Sized> std::fmt::Debug for Navigator<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Navigator")
            .field("max_steps", &self.max_steps)
            .field("fetches", &self.fetches())
            .finish()
    }
}
