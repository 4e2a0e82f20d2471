//! Natural-language model documents.
//!
//! A model is a forest of [`Module`] trees loaded from YAML documents by a
//! [`Builder`]. Each module holds either child modules or leaf
//! [`Sentence`]s, never both.

mod builder;
mod module;
mod sentence;

pub use builder::Builder;
pub use module::{Module, ModuleContent, Units, Walk};
pub use sentence::{Parameter, Sentence};

/// Origin label used for documents that were not read from a file.
pub const INLINE_ORIGIN: &str = "<inline>";
