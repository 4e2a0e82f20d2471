use nlmodel_cache::TextCache;
use nlmodel_config::Config;

/// Strategy for displaying configuration information.
///
/// Prints the config file location, the resolved cache directory with its
/// entry count, and the extractor command.
#[derive(Debug, Clone, Copy)]
pub struct InfoStrategy;

impl super::CommandStrategy for InfoStrategy {
    type Input = ();

    fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let config_path = Config::config_path()?;
        let config = Config::load_or_default()?;

        println!("=== nlmodel Configuration ===\n");

        println!("Config File:");
        if config_path.exists() {
            println!("  Path: {}", config_path.display());
        } else {
            println!("  Path: {} (not created, using defaults)", config_path.display());
        }
        println!();

        println!("Cache:");
        let cache_dir = config.cache.resolved_dir()?;
        println!("  Directory: {}", cache_dir.display());
        match TextCache::new(&cache_dir).len() {
            Ok(count) => println!("  Entries: {count}"),
            Err(e) => {
                println!("  Entries: unreadable");
                println!("  Error: {e}");
            }
        }
        println!();

        println!("Extractor:");
        match config.extractor.program() {
            Ok(program) => {
                println!("  Program: {program}");
                if !config.extractor.args.is_empty() {
                    println!("  Args: {}", config.extractor.args.join(" "));
                }
            }
            Err(_) => println!("  Program: (not set)"),
        }

        Ok(())
    }
}
