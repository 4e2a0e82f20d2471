use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const APP_DIR: &str = "nlmodel";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub extractor: ExtractorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct CacheConfig {
    /// Cache directory; `~/` is expanded. Defaults to `~/nlmodel/cache`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<PathBuf>,
}

impl CacheConfig {
    pub fn resolved_dir(&self) -> anyhow::Result<PathBuf> {
        match &self.dir {
            Some(dir) => expand_home(dir),
            None => Ok(Config::config_dir()?.join("cache")),
        }
    }
}

/// External NLP engine: reads one sentence on stdin, writes a JSON array on stdout.
#[derive(Debug, Default, Deserialize, Serialize, Clone)]
pub struct ExtractorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub program: Option<String>,
    #[serde(default)]
    pub args: Vec<String>,
}

impl ExtractorConfig {
    pub fn program(&self) -> anyhow::Result<&str> {
        self.program
            .as_deref()
            .filter(|p| !p.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!(
                    "No extractor configured. Set 'extractor.program' in {}",
                    Config::config_path()
                        .map_or_else(|_| CONFIG_FILE.to_string(), |p| p.display().to_string())
                )
            })
    }
}

fn expand_home(path: &Path) -> anyhow::Result<PathBuf> {
    match path.strip_prefix("~") {
        Ok(rest) => Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(rest)),
        Err(_) => Ok(path.to_path_buf()),
    }
}

impl Config {
    pub fn config_dir() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(APP_DIR))
    }

    pub fn config_path() -> anyhow::Result<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    pub fn load() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            anyhow::bail!(
                "Config file not found at: {}. Please run 'nlmodel init' to create config.",
                config_path.display()
            );
        }

        Self::load_from(&config_path)
    }

    /// Like [`Config::load`], but falls back to defaults when no file exists.
    pub fn load_or_default() -> anyhow::Result<Self> {
        let config_path = Self::config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            info!("No config at {}, using defaults", config_path.display());
            Ok(Self::default())
        }
    }

    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    pub fn ensure_config_dir() -> anyhow::Result<PathBuf> {
        let config_dir = Self::config_dir()?;
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }

    pub fn create_config() -> anyhow::Result<()> {
        let config_dir = Self::ensure_config_dir()?;
        let config_path = config_dir.join(CONFIG_FILE);
        Self::write_template(&config_path)?;

        println!("✅ Created config file at: {}", config_path.display());
        println!();
        println!("📝 Next steps:");
        println!("   1. Set extractor.program to the NLP engine command");
        println!("   2. Run 'nlmodel sentences model.yml' to check your model files");
        println!("   3. Run 'nlmodel extract model.yml' to extract mechanisms");
        println!();
        println!("🔧 Configuration options:");
        println!("   - cache.dir: where extraction results are cached");
        println!("   - extractor.args: extra arguments passed to the engine");
        println!();
        Ok(())
    }

    fn write_template(config_path: &Path) -> anyhow::Result<()> {
        if config_path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                config_path.display()
            );
        }

        let config_template = r#"{
  "cache": {
    "dir": "~/nlmodel/cache"
  },
  "extractor": {
    "program": "",
    "args": []
  }
}"#;

        std::fs::write(config_path, config_template)?;
        Ok(())
    }
}
