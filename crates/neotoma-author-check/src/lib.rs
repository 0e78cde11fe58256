//! Neotoma Author Check
//!
//! Pages through Neotoma publications one at a time, looks each DOI up in
//! OpenAlex, and shows both author lists side by side so a reviewer can record
//! a verdict. Verdicts are kept in `verified.json` / `problematic.json` and
//! double as a skip list: a publication with a verdict is never offered again.
//!
//! # Features
//!
//! - **Skip-aware navigation**: bounded scan past pages without a DOI or with a verdict
//! - **Never-failing reconciliation**: OpenAlex failures show as `"N/A"`, not errors
//! - **Serialized appends**: one writer at a time, files replaced atomically
//!
//! # Example
//!
//! ```no_run
//! use neotoma_author_check::{config::Config, review::ReviewService};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let service = ReviewService::from_config(&config)?;
//!
//!     let view = service.landing_view().await;
//!     println!("{}", neotoma_author_check::formatters::format_page_markdown(&view));
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod formatters;
pub mod models;
pub mod navigator;
pub mod reconcile;
pub mod review;
pub mod server;
pub mod store;

pub use client::{NeotomaClient, OpenAlexClient};
pub use config::Config;
pub use error::{ClientError, NavigationError, ReviewError, StoreError};
pub use review::ReviewService;
pub use store::VerdictStore;
