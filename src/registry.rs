use std::num::NonZeroUsize;
use std::sync::Arc;

use lru::LruCache;

use crate::collator::Collator;
use crate::engine::SearchEngine;
use crate::error::SearchError;
use crate::index::InverseWeightIndex;

/// An explicit cache of inverse indexes, keyed by collator configuration.
///
/// Building an [`InverseWeightIndex`] is the expensive part of engine
/// construction, and the result is immutable and shareable. Rather than a
/// process-wide singleton, the cache is an ordinary value: pass it where
/// engines are built, and drop it for deterministic teardown. Least
/// recently used configurations are evicted beyond the capacity.
pub struct IndexRegistry {
    cache: LruCache<Collator, Arc<InverseWeightIndex>>,
}

impl IndexRegistry {
    /// A registry retaining up to `capacity` configurations (at least
    /// one).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: LruCache::new(capacity),
        }
    }

    /// The shared index for `collator`, building it on first use.
    pub fn get(&mut self, collator: &Collator) -> Arc<InverseWeightIndex> {
        if let Some(index) = self.cache.get(collator) {
            return Arc::clone(index);
        }

        let index = Arc::new(InverseWeightIndex::build(collator));
        self.cache.put(*collator, Arc::clone(&index));
        index
    }

    /// Builds a search engine through the registry, sharing the index
    /// with every other engine built for the same configuration.
    ///
    /// # Errors
    ///
    /// As for [`SearchEngine::with_index`].
    pub fn engine(
        &mut self,
        collator: Collator,
        pattern: &str,
    ) -> Result<SearchEngine, SearchError> {
        collator.validate()?;
        let index = self.get(&collator);
        SearchEngine::with_index(collator, pattern, index)
    }

    /// Number of cached configurations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Whether nothing is cached yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Drops every cached index.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl Default for IndexRegistry {
    fn default() -> Self {
        Self::new(8)
    }
}
