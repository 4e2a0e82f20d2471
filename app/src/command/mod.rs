//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy type with its own input type, so
//! `main` dispatches without boxing or runtime casting.

use std::path::PathBuf;

use nlmodel_core::Builder;
use tracing::info;

mod cache_key;
mod extract;
mod info;
mod init;
mod sentences;
mod tree;
mod version;

pub use cache_key::CacheKeyStrategy;
pub use extract::{ExtractInput, ExtractStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use sentences::{SentencesInput, SentencesStrategy};
pub use tree::TreeStrategy;
pub use version::VersionStrategy;

/// Load the model files named on the command line.
fn load_model(files: Vec<PathBuf>) -> anyhow::Result<Builder> {
    info!("Loading {} model file(s)", files.len());
    Ok(Builder::from_paths(files)?)
}

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust,ignore
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}
