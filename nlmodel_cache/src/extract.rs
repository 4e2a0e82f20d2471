use nlmodel_core::{Builder, Sentence};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::info;

use crate::error::CacheError;
use crate::store::TextCache;

/// Results extracted from one sentence of a model.
#[derive(Debug, Clone, Serialize)]
pub struct Extraction<'a, T> {
    pub sentence: &'a Sentence,
    pub results: Vec<T>,
}

/// Run `compute` through `cache` for every sentence of `builder`, in order.
///
/// Stops at the first error; entries cached before the failure stay on disk.
pub fn extract_all<'a, T, E, F>(
    builder: &'a Builder,
    cache: &TextCache,
    mut compute: F,
) -> Result<Vec<Extraction<'a, T>>, E>
where
    T: Serialize + DeserializeOwned,
    F: FnMut(&str) -> Result<Vec<T>, E>,
    E: From<CacheError>,
{
    let sentences = builder.all_sentences();
    info!(
        "Extracting {} sentence(s) with cache at {}",
        sentences.len(),
        cache.dir().display()
    );

    sentences
        .into_iter()
        .map(|sentence| -> Result<Extraction<'a, T>, E> {
            let results = cache.lookup_or_compute(sentence.text(), &mut compute)?;
            Ok(Extraction { sentence, results })
        })
        .collect()
}
