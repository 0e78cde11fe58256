//! Page indices and navigation outcomes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// 1-based page number. Page 0 is only used as the starting point of
/// initial discovery.
pub type PageIndex = u32;

/// Direction of a navigation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Towards higher page numbers.
    #[default]
    Forward,
    /// Towards page 1.
    Backward,
}

impl Direction {
    /// One step from `page`. Backward steps reflect at page 1.
    #[must_use]
    pub const fn step(self, page: PageIndex) -> PageIndex {
        match self {
            Self::Forward => page.saturating_add(1),
            Self::Backward => {
                if page > 1 {
                    page - 1
                } else {
                    1
                }
            }
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
        })
    }
}

/// Result of a navigation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "page")]
pub enum Navigation {
    /// The nearest reviewable page.
    Page(PageIndex),
    /// No reviewable page remains in this direction.
    Exhausted,
}

impl Navigation {
    /// The page, if one was found.
    #[must_use]
    pub const fn page(self) -> Option<PageIndex> {
        match self {
            Self::Page(p) => Some(p),
            Self::Exhausted => None,
        }
    }
}
