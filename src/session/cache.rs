// Per-session result cache, keyed by (mode, language)

use crate::models::api::{GenerationResult, Language, Mode};
use lru::LruCache;
use std::num::NonZeroUsize;

/// Holds the last decoded result per (mode, language) so revisiting a tab
/// without changing inputs does not re-issue a request.
///
/// Invalidation is wholesale: any change to the document, pasted text, or
/// language clears everything. Capacity covers every possible key, so in
/// practice nothing is ever evicted before it is invalidated.
pub struct ContentCache {
    entries: LruCache<(Mode, Language), GenerationResult>,
}

impl ContentCache {
    pub fn new() -> Self {
        // 6 modes × 2 languages.
        Self {
            entries: LruCache::new(NonZeroUsize::new(12).unwrap()),
        }
    }

    pub fn get(&mut self, mode: Mode, language: Language) -> Option<&GenerationResult> {
        self.entries.get(&(mode, language))
    }

    pub fn insert(&mut self, mode: Mode, language: Language, result: GenerationResult) {
        self.entries.put((mode, language), result);
    }

    /// Wholesale invalidation on any input change.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for ContentCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_and_miss() {
        let mut cache = ContentCache::new();
        assert!(cache.get(Mode::Summary, Language::En).is_none());

        cache.insert(
            Mode::Summary,
            Language::En,
            GenerationResult::Text("summary".to_string()),
        );

        assert!(cache.get(Mode::Summary, Language::En).is_some());
        // Same mode, other language is a distinct key.
        assert!(cache.get(Mode::Summary, Language::Fr).is_none());
    }

    #[test]
    fn test_clear_invalidates_everything() {
        let mut cache = ContentCache::new();
        cache.insert(
            Mode::Summary,
            Language::En,
            GenerationResult::Text("a".to_string()),
        );
        cache.insert(
            Mode::Quiz,
            Language::Fr,
            GenerationResult::Text("b".to_string()),
        );

        cache.clear();
        assert!(cache.is_empty());
    }
}
