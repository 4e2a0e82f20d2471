use std::io::Write;
use std::path::PathBuf;

use nlmodel_cache::{TextCache, extract_all};
use nlmodel_config::Config;
use tracing::info;

use crate::extractor::{CommandExtractor, CommandSpec};

/// Input parameters for the Extract command strategy.
#[derive(Debug, Clone)]
pub struct ExtractInput {
    /// Model files, loaded in this order
    pub files: Vec<PathBuf>,
    /// Overrides `cache.dir` from the config file
    pub cache_dir: Option<PathBuf>,
}

/// Strategy for running the configured extractor over every sentence.
///
/// Results go through the text cache, so re-running over an unchanged model
/// does not invoke the extractor again. Output is one JSON object per
/// sentence.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy;

impl super::CommandStrategy for ExtractStrategy {
    type Input = ExtractInput;

    fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
        let config = Config::load()?;
        let extractor = CommandExtractor::new(CommandSpec::from_config(&config.extractor)?);
        let cache_dir = match input.cache_dir {
            Some(dir) => dir,
            None => config.cache.resolved_dir()?,
        };
        let cache = TextCache::new(cache_dir);

        let builder = super::load_model(input.files)?;
        let extractions = extract_all(&builder, &cache, |text| extractor.extract(text))?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        for extraction in &extractions {
            writeln!(out, "{}", serde_json::to_string(extraction)?)?;
        }

        info!(
            "Extracted {} sentence(s), cache now holds {} entr(ies)",
            extractions.len(),
            cache.len()?
        );
        Ok(())
    }
}
