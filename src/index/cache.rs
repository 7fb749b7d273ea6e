//! Caller-owned cache of chapter indexes keyed by document content

use crate::config::{LayoutConfig, ScanOptions};
use crate::error::Result;
use crate::index::{hash_text, ChapterIndex, ChapterPagination};
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CacheKey {
    content_hash: u64,
    content_len: usize,
    config: LayoutConfig,
    options: ScanOptions,
}

/// Reuses chapter page counts across single-chapter requests for the same
/// document and settings. Results are identical to the uncached functions.
///
/// The engine never creates one of these itself; callers that navigate a
/// large document chapter by chapter keep one alive between calls.
#[derive(Debug, Clone)]
pub struct PageCountCache {
    entries: FxHashMap<CacheKey, ChapterIndex>,
    capacity: usize,
    hits: u64,
    misses: u64,
}

impl Default for PageCountCache {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}

impl PageCountCache {
    /// Documents kept by `new()`
    pub const DEFAULT_CAPACITY: usize = 16;

    pub fn new() -> Self {
        Self::default()
    }

    /// Keep at most `capacity` documents; the whole map is dropped when full
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: FxHashMap::default(),
            capacity: capacity.max(1),
            hits: 0,
            misses: 0,
        }
    }

    /// Chapter index for `document`, built on first use
    pub fn index(
        &mut self,
        document: &str,
        config: &LayoutConfig,
        options: &ScanOptions,
    ) -> &ChapterIndex {
        let key = CacheKey {
            content_hash: hash_text(document),
            content_len: document.len(),
            config: *config,
            options: options.clone(),
        };

        if self.entries.contains_key(&key) {
            self.hits += 1;
        } else {
            self.misses += 1;
            if self.entries.len() >= self.capacity {
                log::debug!("page count cache full ({} entries), clearing", self.entries.len());
                self.entries.clear();
            }
            let index = ChapterIndex::build(document, config, options);
            self.entries.insert(key.clone(), index);
        }

        &self.entries[&key]
    }

    /// Same result as [`crate::index::paginate_chapter`]
    pub fn paginate_chapter(
        &mut self,
        document: &str,
        config: &LayoutConfig,
        options: &ScanOptions,
        chapter_index: usize,
    ) -> Result<ChapterPagination> {
        self.index(document, config, options)
            .paginate_chapter(document, chapter_index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// (hits, misses) since creation
    pub fn stats(&self) -> (u64, u64) {
        (self.hits, self.misses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::paginate_chapter;

    const DOC: &str = "# A\nline1\nline2\nline3\n\n# B\nline4";

    #[test]
    fn test_cached_matches_uncached() {
        let config = LayoutConfig::new(2, 80).unwrap();
        let options = ScanOptions::default();
        let mut cache = PageCountCache::new();

        for i in 0..2 {
            let cached = cache.paginate_chapter(DOC, &config, &options, i).unwrap();
            let direct = paginate_chapter(DOC, &config, &options, i).unwrap();
            assert_eq!(cached, direct);
        }

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.stats(), (1, 1));
    }

    #[test]
    fn test_settings_are_part_of_the_key() {
        let options = ScanOptions::default();
        let mut cache = PageCountCache::new();

        let small = LayoutConfig::new(1, 80).unwrap();
        let large = LayoutConfig::new(10, 80).unwrap();
        assert_eq!(cache.index(DOC, &small, &options).total_page_count(), 4);
        assert_eq!(cache.index(DOC, &large, &options).total_page_count(), 2);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_capacity_clears() {
        let config = LayoutConfig::default();
        let options = ScanOptions::default();
        let mut cache = PageCountCache::with_capacity(2);

        cache.index("one", &config, &options);
        cache.index("two", &config, &options);
        assert_eq!(cache.len(), 2);
        cache.index("three", &config, &options);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_invalid_index_through_cache() {
        let mut cache = PageCountCache::new();
        let result = cache.paginate_chapter(DOC, &LayoutConfig::default(), &ScanOptions::default(), 9);
        assert!(result.is_err());
    }
}
