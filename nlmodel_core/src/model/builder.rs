use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::module::Module;
use super::sentence::Sentence;
use crate::error::{Error, Result};

/// Loads model documents into an ordered forest of root modules.
///
/// Every source becomes one root [`Module`]. Construction is all-or-nothing:
/// the first unreadable, unparsable or invalid document fails the whole load.
#[derive(Debug, Clone)]
pub struct Builder {
    sources: Vec<PathBuf>,
    roots: Vec<Module>,
}

impl Builder {
    /// Load every document in `paths`, keeping their order.
    pub fn from_paths<I, P>(paths: I) -> Result<Self>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let sources: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        let roots = sources
            .iter()
            .map(|path| load_document(path))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Loaded {} model document(s) with {} sentence(s)",
            roots.len(),
            roots.iter().map(Module::sentence_count).sum::<usize>()
        );

        Ok(Self { sources, roots })
    }

    /// Load a single document.
    pub fn from_path(path: impl Into<PathBuf>) -> Result<Self> {
        Self::from_paths([path.into()])
    }

    #[must_use]
    pub fn sources(&self) -> &[PathBuf] {
        &self.sources
    }

    #[must_use]
    pub fn roots(&self) -> &[Module] {
        &self.roots
    }

    /// Every sentence of every root, in source order then document order.
    #[must_use]
    pub fn all_sentences(&self) -> Vec<&Sentence> {
        self.roots.iter().flat_map(Module::all_sentences).collect()
    }

    #[must_use]
    pub fn sentence_count(&self) -> usize {
        self.roots.iter().map(Module::sentence_count).sum()
    }
}

fn load_document(path: &Path) -> Result<Module> {
    debug!("Reading model document: {}", path.display());
    let content = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Module::parse_document(&content, &path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Violation;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn empty_source_list_builds_empty_forest() {
        let builder = Builder::from_paths(Vec::<PathBuf>::new()).unwrap();
        assert!(builder.sources().is_empty());
        assert!(builder.roots().is_empty());
        assert!(builder.all_sentences().is_empty());
    }

    #[test]
    fn single_path_becomes_one_element_source_list() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "m.yml", "sentences: [{text: a}]");

        let builder = Builder::from_path(&path).unwrap();
        assert_eq!(builder.sources(), &[path]);
        assert_eq!(builder.roots().len(), 1);
    }

    #[test]
    fn sources_keep_input_order() {
        let dir = TempDir::new().unwrap();
        let second = write(&dir, "b.yml", "sentences: [{text: b}]");
        let first = write(&dir, "a.yml", "sentences: [{text: a}]");

        let builder = Builder::from_paths([second.clone(), first.clone()]).unwrap();
        assert_eq!(builder.sources(), &[second, first]);

        let texts: Vec<&str> = builder.all_sentences().into_iter().map(Sentence::text).collect();
        assert_eq!(texts, vec!["b", "a"]);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("missing.yml");

        let err = Builder::from_path(&missing).unwrap_err();
        match err {
            Error::Io { path, .. } => assert_eq!(path, missing),
            other => panic!("expected io error, got {other}"),
        }
    }

    #[test]
    fn invalid_document_fails_whole_load() {
        let dir = TempDir::new().unwrap();
        let good = write(&dir, "good.yml", "sentences: [{text: a}]");
        let bad = write(&dir, "bad.yml", "name: empty\n");

        let err = Builder::from_paths([good, bad.clone()]).unwrap_err();
        assert_eq!(err.violation(), Some(Violation::NoChildKind));
        assert!(err.to_string().contains(&bad.display().to_string()));
    }
}
