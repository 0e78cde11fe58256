//! Data models for Neotoma, OpenAlex, and reviewer verdicts.
//!
//! Upstream models use `#[serde(default)]` and the helpers in [`lenient`]
//! so that partial or loosely-typed responses still parse.

mod authorship;
pub mod lenient;
mod navigation;
mod publication;
mod verdict;
mod view;

pub use authorship::{Authorship, UNAVAILABLE_TITLE};
pub(crate) use authorship::OpenAlexWork;
pub use navigation::{Direction, Navigation, PageIndex};
pub use publication::{NeotomaAuthor, PublicationRecord};
pub(crate) use publication::NeotomaResponse;
pub use verdict::{Partition, ReviewAction, SkipSet, VerdictEntry};
pub use view::{ComparisonView, PageView};
