use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use nlmodel_core::{cache_key, content_hash};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{CacheError, Result};

/// Longest key that is used verbatim as a file name.
const MAX_PLAIN_STEM_LEN: usize = 120;

const ENTRY_EXTENSION: &str = "json";

/// One persisted cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheEntry<R> {
    pub key: String,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub results: R,
}

#[derive(Deserialize)]
struct EntryHeader {
    key: String,
}

/// Directory of cached extraction results, one JSON file per cache key.
///
/// There is no eviction and no locking: two callers missing on the same key
/// at once will both compute and the last write wins. Use
/// [`SharedTextCache`](crate::SharedTextCache) when that matters.
#[derive(Debug, Clone)]
pub struct TextCache {
    dir: PathBuf,
}

impl TextCache {
    /// Bind a cache to `dir`. The directory is created on the first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the entry for `key`.
    ///
    /// Short keys made only of lowercase ASCII letters, digits, `-` and `_`
    /// are used as the file stem; anything else is stored under its SHA-256
    /// digest. Keeping uppercase out of plain stems means keys that differ
    /// only in case never share a file on case-insensitive filesystems.
    #[must_use]
    pub fn entry_path(&self, key: &str) -> PathBuf {
        let plain = !key.is_empty()
            && key.len() <= MAX_PLAIN_STEM_LEN
            && key
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
        let stem = if plain {
            key.to_string()
        } else {
            content_hash(key)
        };
        self.dir.join(format!("{stem}.{ENTRY_EXTENSION}"))
    }

    /// Return the cached results for `text`, or compute, persist and return them.
    ///
    /// `compute` is called only on a miss. Its error is returned as-is and
    /// nothing is written for it.
    pub fn lookup_or_compute<T, E, F>(
        &self,
        text: &str,
        compute: F,
    ) -> std::result::Result<Vec<T>, E>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce(&str) -> std::result::Result<Vec<T>, E>,
        E: From<CacheError>,
    {
        let key = cache_key(text);
        if let Some(entry) = self.read_entry::<T>(&key)? {
            debug!("Cache hit for key {key}");
            return Ok(entry.results);
        }

        debug!("Cache miss for key {key}, computing");
        let results = compute(text)?;
        self.write_entry(&key, text, &results)?;
        Ok(results)
    }

    /// Cached results for `text`, if any.
    pub fn get<T: DeserializeOwned>(&self, text: &str) -> Result<Option<Vec<T>>> {
        Ok(self.entry(text)?.map(|entry| entry.results))
    }

    /// Full cached entry for `text`, if any.
    pub fn entry<T: DeserializeOwned>(&self, text: &str) -> Result<Option<CacheEntry<Vec<T>>>> {
        self.read_entry(&cache_key(text))
    }

    pub fn contains(&self, text: &str) -> Result<bool> {
        let key = cache_key(text);
        Ok(self.read_header(&self.entry_path(&key))?.is_some_and(|stored| stored == key))
    }

    /// Keys of every persisted entry, sorted.
    pub fn keys(&self) -> Result<Vec<String>> {
        let read_dir = match fs::read_dir(&self.dir) {
            Ok(read_dir) => read_dir,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CacheError::Io {
                    path: self.dir.clone(),
                    source,
                });
            }
        };

        let mut keys = Vec::new();
        for dir_entry in read_dir {
            let path = dir_entry
                .map_err(|source| CacheError::Io {
                    path: self.dir.clone(),
                    source,
                })?
                .path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(ENTRY_EXTENSION) {
                continue;
            }
            if let Some(key) = self.read_header(&path)? {
                keys.push(key);
            }
        }
        keys.sort();
        Ok(keys)
    }

    pub fn len(&self) -> Result<usize> {
        Ok(self.keys()?.len())
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    fn read_entry<T: DeserializeOwned>(&self, key: &str) -> Result<Option<CacheEntry<Vec<T>>>> {
        let path = self.entry_path(key);
        let Some(content) = read_optional(&path)? else {
            return Ok(None);
        };
        let entry: CacheEntry<Vec<T>> = serde_json::from_str(&content)
            .map_err(|source| CacheError::Corrupt { path: path.clone(), source })?;

        if entry.key != key {
            warn!(
                "Cache file {} holds key {} instead of {key}, treating as miss",
                path.display(),
                entry.key
            );
            return Ok(None);
        }
        Ok(Some(entry))
    }

    fn read_header(&self, path: &Path) -> Result<Option<String>> {
        let Some(content) = read_optional(path)? else {
            return Ok(None);
        };
        let header: EntryHeader = serde_json::from_str(&content).map_err(|source| {
            CacheError::Corrupt {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Ok(Some(header.key))
    }

    fn write_entry<T: Serialize>(&self, key: &str, text: &str, results: &[T]) -> Result<()> {
        fs::create_dir_all(&self.dir).map_err(|source| CacheError::Io {
            path: self.dir.clone(),
            source,
        })?;

        let entry = CacheEntry {
            key: key.to_string(),
            text: text.to_string(),
            created_at: Utc::now(),
            results,
        };
        let json = serde_json::to_string_pretty(&entry).map_err(|source| CacheError::Serialize {
            key: key.to_string(),
            source,
        })?;

        // Write beside the target and rename so readers never see a partial file.
        let path = self.entry_path(key);
        let staging = path.with_extension(format!("{}.tmp", std::process::id()));
        fs::write(&staging, json).map_err(|source| CacheError::Io {
            path: staging.clone(),
            source,
        })?;
        fs::rename(&staging, &path).map_err(|source| CacheError::Io {
            path: path.clone(),
            source,
        })?;

        info!("Cached {} result(s) at {}", results.len(), path.display());
        Ok(())
    }
}

fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(CacheError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}
