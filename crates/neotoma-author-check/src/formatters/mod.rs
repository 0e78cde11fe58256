//! Output formatters for terminal display.

mod markdown;

pub use markdown::*;
