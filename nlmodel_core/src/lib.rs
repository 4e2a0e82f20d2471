#![deny(
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

pub mod error;
pub mod model;
pub mod util;

pub use error::{Error, Result, Violation};
pub use model::{Builder, Module, ModuleContent, Parameter, Sentence, Units, Walk};
pub use util::{cache_key, content_hash};
