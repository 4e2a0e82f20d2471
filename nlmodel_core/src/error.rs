use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read model document {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse model document {origin}: {source}")]
    Yaml {
        origin: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid model in {origin} at {path}: {violation}")]
    Validation {
        origin: String,
        path: String,
        violation: Violation,
    },
}

impl Error {
    /// The structural rule that was broken, if this is a validation error.
    #[must_use]
    pub const fn violation(&self) -> Option<Violation> {
        match self {
            Self::Validation { violation, .. } => Some(*violation),
            Self::Io { .. } | Self::Yaml { .. } => None,
        }
    }
}

/// Structural rules a model document must satisfy.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("a module cannot contain both submodules and sentences")]
    BothChildKinds,

    #[error("a module must contain either submodules or sentences")]
    NoChildKind,

    #[error("a sentence must have a `text` field")]
    MissingText,
}
