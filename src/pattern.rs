use crate::collator::Collator;
use crate::normalize::Normalizer;
use crate::stream::{CollationElements, WeightEntry};
use crate::types::NormalizationMode;

/// The materialized weight sequence of a string, closed by a null
/// sentinel entry. Built once per pattern (and once per inverse-index
/// string) at engine construction; immutable thereafter.
#[derive(Debug, Clone)]
pub struct WeightList {
    entries: Vec<WeightEntry>,
}

impl WeightList {
    /// Collates `text` under `collator` into a weight list. With
    /// normalization on, the text is decomposed first; offsets within a
    /// weight list never reach callers, so the remapping is safe here
    /// (unlike for search targets).
    #[must_use]
    pub fn new(collator: &Collator, text: &str) -> Self {
        let normalized;
        let text = if collator.normalization == NormalizationMode::On {
            normalized = Normalizer::Nfd.normalize(text);
            normalized.as_ref()
        } else {
            text
        };

        let mut stream = CollationElements::new(*collator, text);
        Self::from_stream(&mut stream)
    }

    pub(crate) fn from_stream(stream: &mut CollationElements) -> Self {
        let mut entries = Vec::new();

        loop {
            let e = stream.next();
            let done = e.is_null();
            entries.push(e);

            if done {
                return Self { entries };
            }
        }
    }

    /// Number of entries, including the sentinel.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false: even an empty string yields the sentinel.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of real weights, excluding the sentinel.
    #[must_use]
    pub fn weight_count(&self) -> usize {
        self.entries.len() - 1
    }

    /// Entry at `index`; the sentinel for any out-of-range index.
    #[must_use]
    pub fn get(&self, index: usize) -> WeightEntry {
        self.entries
            .get(index)
            .copied()
            .unwrap_or_else(|| self.entries[self.entries.len() - 1])
    }

    /// Weight at `index`; `NULL_WEIGHT` for any out-of-range index.
    #[must_use]
    pub fn weight(&self, index: usize) -> u32 {
        self.get(index).weight
    }

    /// Whether the real weights of `other` appear at `offset` in `self`.
    /// Compares weights only, never offsets; false when there is not
    /// enough room.
    #[must_use]
    pub fn matches_at(&self, offset: usize, other: &WeightList) -> bool {
        let count = other.weight_count();

        if self.weight_count() < offset || self.weight_count() - offset < count {
            return false;
        }

        (0..count).all(|j| self.entries[offset + j].weight == other.entries[j].weight)
    }
}
