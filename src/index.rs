use rustc_hash::FxHashMap;

use crate::collator::Collator;
use crate::pattern::WeightList;

/// One indexed source string with its collation data.
#[derive(Debug)]
pub(crate) struct IndexEntry {
    pub(crate) text: Box<str>,
    pub(crate) char_count: i32,
    pub(crate) weights: WeightList,
}

/// A map from a first weight to every indexed source string whose weight
/// list begins with it. The index is built over the full character set the
/// collator's tables assign weights to, plus one string per declared
/// contraction, and is read-only after construction.
///
/// Strings are owned here and referenced by entry index, so the buckets
/// and the per-string weight lists never point at each other.
#[derive(Debug)]
pub struct InverseWeightIndex {
    entries: Vec<IndexEntry>,
    buckets: FxHashMap<u32, Vec<u32>>,
}

impl InverseWeightIndex {
    /// Builds the index for a collator configuration. This is the
    /// expensive part of engine construction; share the result across
    /// engines via [`IndexRegistry`](crate::IndexRegistry) when searching
    /// for many patterns under one configuration.
    #[must_use]
    pub fn build(collator: &Collator) -> Self {
        let mut index = Self {
            entries: Vec::new(),
            buckets: FxHashMap::default(),
        };

        let mut buf = [0_u8; 4];

        for cp in collator.indexed_code_points() {
            if let Some(c) = char::from_u32(cp) {
                index.add(collator, c.encode_utf8(&mut buf));
            }
        }

        for contraction in collator.contractions() {
            index.add(collator, &contraction);
        }

        index
    }

    fn add(&mut self, collator: &Collator, text: &str) {
        let weights = WeightList::new(collator, text);

        // Nothing to bucket under if every weight is ignorable at the
        // collator's strength
        if weights.weight_count() == 0 {
            return;
        }

        let first = weights.weight(0);

        #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
        let entry_index = self.entries.len() as u32;

        #[allow(clippy::cast_possible_wrap)]
        self.entries.push(IndexEntry {
            text: text.into(),
            char_count: text.chars().count() as i32,
            weights,
        });

        self.buckets.entry(first).or_default().push(entry_index);
    }

    /// Indices of the entries whose weight lists begin with `weight`;
    /// empty when no indexed string starts with it.
    pub(crate) fn strings_starting_with(&self, weight: u32) -> &[u32] {
        self.buckets.get(&weight).map_or(&[], Vec::as_slice)
    }

    pub(crate) fn entry(&self, index: u32) -> &IndexEntry {
        &self.entries[index as usize]
    }

    /// Number of indexed strings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the index holds no strings at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
