//! Cache key derivation and content hashing.

use sha2::{Digest, Sha256};

/// Derive the cache key for a sentence.
///
/// Whitespace, periods and commas are dropped; case and every other
/// character are kept, so `"A, b.c"` and `"Abc"` map to the same key.
#[must_use]
pub fn cache_key(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace() && *c != '.' && *c != ',')
        .collect()
}

/// Hex-encoded SHA-256 digest of `content`.
#[must_use]
pub fn content_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_drops_whitespace_periods_and_commas() {
        assert_eq!(cache_key("A, b.c"), "Abc");
        assert_eq!(cache_key("X activates Y."), "XactivatesY");
        assert_eq!(cache_key(" \tX\n"), "X");
    }

    #[test]
    fn key_keeps_case_and_other_punctuation() {
        assert_ne!(cache_key("abc"), cache_key("Abc"));
        assert_eq!(cache_key("p53-MDM2; active!"), "p53-MDM2;active!");
    }

    #[test]
    fn key_is_deterministic() {
        let text = "MEK phosphorylates ERK, which activates ELK1.";
        assert_eq!(cache_key(text), cache_key(text));
    }

    #[test]
    fn deterministic_hash() {
        let h1 = content_hash("XactivatesY");
        let h2 = content_hash("XactivatesY");
        assert_eq!(h1, h2);
        assert_eq!(h1.len(), 64); // SHA-256 hex length
    }

    #[test]
    fn different_inputs_different_hashes() {
        assert_ne!(content_hash("XactivatesY"), content_hash("YactivatesX"));
    }
}
