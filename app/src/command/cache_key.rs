use nlmodel_cache::{TextCache, cache_key};
use nlmodel_config::Config;

/// Strategy for printing the cache key of a sentence and where its entry lives.
#[derive(Debug, Clone, Copy)]
pub struct CacheKeyStrategy;

impl super::CommandStrategy for CacheKeyStrategy {
    type Input = String;

    fn execute(&self, text: Self::Input) -> anyhow::Result<()> {
        let config = Config::load_or_default()?;
        let cache = TextCache::new(config.cache.resolved_dir()?);
        let key = cache_key(&text);

        println!("Key:    {key}");
        println!("File:   {}", cache.entry_path(&key).display());
        println!("Cached: {}", cache.contains(&text)?);
        Ok(())
    }
}
