#![warn(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! On-disk memoization of per-sentence extraction results.
//!
//! Results are addressed by [`nlmodel_core::cache_key`], so sentences that
//! differ only in whitespace, periods or commas share one entry.

mod error;
mod extract;
mod keyed;
mod store;

pub use error::{CacheError, Result};
pub use extract::{Extraction, extract_all};
pub use keyed::SharedTextCache;
pub use nlmodel_core::cache_key;
pub use store::{CacheEntry, TextCache};
