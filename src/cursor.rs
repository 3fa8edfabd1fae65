use bstr::ByteSlice;

use crate::collator::Collator;
use crate::error::SearchError;
use crate::stream::{CollationElements, WeightEntry};

// Pad beyond the pattern's weight count, absorbing worst-case expansions
// around the anchor. Twice the longest expansion would be tighter.
const CE_BUFFER_PAD: usize = 40;

/// A bounded, bidirectional window of weights over the target string,
/// with grapheme-boundary and combining-safe-boundary queries. One cursor
/// is owned by one engine; rebinding a target replaces the cursor.
///
/// The buffer holds weights counted from the current anchor, backward
/// (after [`set_anchor`](Self::set_anchor) plus
/// [`prev_ce`](Self::prev_ce)) or forward ([`next_ce`](Self::next_ce));
/// re-anchoring resets it. Entries are pulled from the stream one at a
/// time and retained, so repeated reads are cheap and never re-drive the
/// stream.
pub struct TargetCursor {
    collator: Collator,
    stream: CollationElements,
    // Grapheme cluster starts, plus the total length
    boundaries: Vec<usize>,
    text_len: usize,
    buffer: Vec<WeightEntry>,
    buffer_max: usize,
}

impl TargetCursor {
    /// Binds a cursor to `text` with room for `pattern_weights` weights
    /// plus slack. The buffer is the engine's only per-search storage and
    /// is preallocated here; this is the surfaced out-of-memory path.
    pub fn new(
        collator: Collator,
        text: &str,
        pattern_weights: usize,
    ) -> Result<Self, SearchError> {
        let mut buffer = Vec::new();
        buffer.try_reserve_exact(pattern_weights + CE_BUFFER_PAD)?;
        buffer.resize(pattern_weights + CE_BUFFER_PAD, WeightEntry::default());

        let mut boundaries = Vec::new();
        boundaries.try_reserve(text.len() + 1)?;

        for (start, _, _) in text.as_bytes().grapheme_indices() {
            boundaries.push(start);
        }
        boundaries.push(text.len());

        Ok(Self {
            collator,
            stream: CollationElements::new(collator, text),
            boundaries,
            text_len: text.len(),
            buffer,
            buffer_max: 0,
        })
    }

    /// Length of the target in bytes.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text_len
    }

    pub(crate) fn capacity(&self) -> usize {
        self.buffer.len()
    }

    /// Resets the buffer and positions the stream at `off` for a forward
    /// or backward scan.
    pub fn set_anchor(&mut self, off: usize) {
        self.buffer_max = 0;
        self.stream.seek(off);
    }

    /// Primes the buffer with a single synthetic null entry at `off` and
    /// positions the stream there; used when the window under test ends
    /// exactly at the end of the target.
    pub fn set_anchor_at_end(&mut self, off: usize) {
        self.buffer[0] = WeightEntry::null_at(off);
        self.buffer_max = 1;
        self.stream.seek(off);
    }

    /// The `index`-th weight counted backward from the anchor. Pulls at
    /// most one new weight per call; out-of-range reads return a null
    /// entry.
    pub fn prev_ce(&mut self, index: usize) -> WeightEntry {
        if index < self.buffer_max {
            return self.buffer[index];
        }

        if index == self.buffer_max && index < self.buffer.len() {
            let e = self.stream.previous();
            self.buffer[index] = e;
            self.buffer_max += 1;
            return e;
        }

        WeightEntry::null_at(self.stream.offset())
    }

    /// The `index`-th weight counted forward from the anchor; symmetric
    /// to [`prev_ce`](Self::prev_ce).
    pub fn next_ce(&mut self, index: usize) -> WeightEntry {
        if index < self.buffer_max {
            return self.buffer[index];
        }

        if index == self.buffer_max && index < self.buffer.len() {
            let e = self.stream.next();
            self.buffer[index] = e;
            self.buffer_max += 1;
            return e;
        }

        WeightEntry::null_at(self.stream.offset())
    }

    /// Whether `off` lies on a grapheme cluster boundary.
    #[must_use]
    pub fn is_boundary(&self, off: usize) -> bool {
        self.boundaries.binary_search(&off).is_ok()
    }

    /// The first grapheme cluster boundary strictly after `off`; the text
    /// length when there is none.
    #[must_use]
    pub fn next_boundary(&self, off: usize) -> usize {
        let i = self.boundaries.partition_point(|&b| b <= off);
        self.boundaries.get(i).copied().unwrap_or(self.text_len)
    }

    /// The first position at or after `off` where backward iteration can
    /// be seeded: past any combining-unsafe characters, rounded up to a
    /// character boundary. The weight stream reconstructed from the
    /// returned position agrees with the stream from the start.
    #[must_use]
    pub fn next_safe_boundary(&self, off: usize) -> usize {
        let mut i = self.stream.char_index_at(off);

        while let Some(cp) = self.stream.char_at(i) {
            if !self.collator.is_unsafe(cp) {
                break;
            }
            i += 1;
        }

        self.stream.start_of(i)
    }

    // Materializes the target's weight list from `from` to the end,
    // sentinel included; the naive reference path
    pub(crate) fn orders_from(&mut self, from: usize) -> Vec<WeightEntry> {
        self.buffer_max = 0;
        self.stream.seek(from);

        let mut orders = Vec::new();

        loop {
            let e = self.stream.next();
            let done = e.is_null();
            orders.push(e);

            if done {
                return orders;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NormalizationMode, Strength, Tailoring};
    use crate::weights::NULL_WEIGHT;

    fn cursor(text: &str) -> TargetCursor {
        let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
        TargetCursor::new(collator, text, 4).unwrap()
    }

    #[test]
    fn backward_reads_are_buffered() {
        let mut cursor = cursor("abc");
        cursor.set_anchor(3);

        let first = cursor.prev_ce(0);
        assert_eq!((first.low, first.high), (2, 3));

        // Same index again comes from the buffer, not the stream
        assert_eq!(cursor.prev_ce(0), first);

        let second = cursor.prev_ce(1);
        assert_eq!((second.low, second.high), (1, 2));
    }

    #[test]
    fn end_anchor_is_a_synthetic_null() {
        let mut cursor = cursor("ab");
        cursor.set_anchor_at_end(2);

        let sentinel = cursor.prev_ce(0);
        assert_eq!(sentinel.weight, NULL_WEIGHT);
        assert_eq!((sentinel.low, sentinel.high), (2, 2));

        assert_eq!(cursor.prev_ce(1).low, 1);
    }

    #[test]
    fn reading_past_the_start_yields_nulls() {
        let mut cursor = cursor("ab");
        cursor.set_anchor(2);

        assert!(!cursor.prev_ce(0).is_null());
        assert!(!cursor.prev_ce(1).is_null());
        assert!(cursor.prev_ce(2).is_null());
        assert!(cursor.prev_ce(3).is_null());
    }

    #[test]
    fn grapheme_boundaries() {
        // A + combining acute + combining dot below form one cluster
        let cursor = cursor("A\u{0301}\u{0323}B");

        assert!(cursor.is_boundary(0));
        assert!(!cursor.is_boundary(1));
        assert!(!cursor.is_boundary(3));
        assert!(cursor.is_boundary(5));
        assert!(cursor.is_boundary(6));

        assert_eq!(cursor.next_boundary(0), 5);
        assert_eq!(cursor.next_boundary(5), 6);
    }

    #[test]
    fn safe_boundary_skips_combining_marks() {
        let cursor = cursor("A\u{0301}\u{0323}B");

        assert_eq!(cursor.next_safe_boundary(0), 0);
        assert_eq!(cursor.next_safe_boundary(1), 5);
        assert_eq!(cursor.next_safe_boundary(4), 5);
        assert_eq!(cursor.next_safe_boundary(6), 6);
    }
}
