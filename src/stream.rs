use tinyvec::ArrayVec;

use crate::collator::Collator;
use crate::consts::{implicit_weights, LOW_PLANE_LEN};
use crate::normalize;
use crate::types::NormalizationMode;
use crate::weights::NULL_WEIGHT;

/// One collation element together with the half-open byte span
/// `[low, high)` of the source characters that produced it.
///
/// When a single character expands into several weights, the first weight
/// carries the character's span and every later weight carries
/// `low == high ==` the offset just past the character. That zero-width
/// span is the signal the match validator uses to reject matches beginning
/// or ending inside an expansion.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct WeightEntry {
    /// The packed weight, masked to the collator's strength
    pub weight: u32,
    /// Byte offset where the producing character(s) begin
    pub low: usize,
    /// Byte offset just past the producing character(s)
    pub high: usize,
}

impl WeightEntry {
    pub(crate) const fn null_at(off: usize) -> Self {
        Self {
            weight: NULL_WEIGHT,
            low: off,
            high: off,
        }
    }

    /// Whether this is the end-of-stream marker.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.weight == NULL_WEIGHT
    }
}

type Row = ArrayVec<[u32; 32]>;
type Entries = ArrayVec<[WeightEntry; 32]>;

/// A finite, resettable, bidirectional stream of [`WeightEntry`] values
/// over one string. Ignorable weights are dropped before they surface; a
/// final null entry closes the stream in each direction.
///
/// Backward iteration steps to the nearest combining-safe position,
/// collates that run forward, and drains it from the back, so the spans it
/// reports agree with forward iteration by construction.
pub struct CollationElements {
    collator: Collator,
    chars: Vec<u32>,
    // Byte offset of each character, plus the total length
    starts: Vec<usize>,
    // Character index of the iteration frontier
    pos: usize,
    // Forward spill for expansions, drained front to back
    pending: Entries,
    // Backward spill for the current safe run, drained back to front
    run: Vec<WeightEntry>,
}

impl CollationElements {
    /// Prepares a stream over `text`. All allocation happens here; the
    /// iteration calls below do not allocate.
    #[must_use]
    pub fn new(collator: Collator, text: &str) -> Self {
        let mut chars = Vec::with_capacity(text.len());
        let mut starts = Vec::with_capacity(text.len() + 1);

        for (i, c) in text.char_indices() {
            starts.push(i);
            chars.push(c as u32);
        }

        starts.push(text.len());

        Self {
            collator,
            chars,
            starts,
            pos: 0,
            pending: Entries::default(),
            run: Vec::with_capacity(64),
        }
    }

    /// Total length of the underlying text in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.starts[self.chars.len()]
    }

    // Index of the first character starting at or after `byte_off`
    pub(crate) fn char_index_at(&self, byte_off: usize) -> usize {
        self.starts
            .partition_point(|&b| b < byte_off)
            .min(self.chars.len())
    }

    pub(crate) fn char_at(&self, index: usize) -> Option<u32> {
        self.chars.get(index).copied()
    }

    pub(crate) fn start_of(&self, index: usize) -> usize {
        self.starts[index]
    }

    /// Repositions the stream at the first character boundary at or after
    /// `byte_off` and discards any buffered state.
    pub fn seek(&mut self, byte_off: usize) {
        self.pos = self.char_index_at(byte_off);
        self.pending.clear();
        self.run.clear();
    }

    /// Byte offset of the iteration frontier.
    #[must_use]
    pub fn offset(&self) -> usize {
        self.starts[self.pos]
    }

    /// The next weight at or after the frontier; a null entry at end of
    /// text.
    pub fn next(&mut self) -> WeightEntry {
        loop {
            if !self.pending.is_empty() {
                return self.pending.remove(0);
            }

            if self.pos >= self.chars.len() {
                return WeightEntry::null_at(self.byte_len());
            }

            let (entries, consumed) = self.collate_at(self.pos, self.chars.len());
            self.pos += consumed;

            for e in entries {
                self.pending.push(e);
            }
        }
    }

    /// The next weight before the frontier, moving backward; a null entry
    /// at the start of text.
    pub fn previous(&mut self) -> WeightEntry {
        loop {
            if let Some(e) = self.run.pop() {
                return e;
            }

            if self.pos == 0 {
                return WeightEntry::null_at(0);
            }

            let mut start = self.pos - 1;
            while start > 0 && self.collator.is_unsafe(self.chars[start]) {
                start -= 1;
            }

            let limit = self.pos;
            let mut i = start;

            while i < limit {
                let (entries, consumed) = self.collate_at(i, limit);
                i += consumed;

                for e in entries {
                    self.run.push(e);
                }
            }

            self.pos = start;
        }
    }

    // Weights for the character (or contraction) at `left`, looking no
    // further than `limit`. Returns the surviving entries and the number
    // of characters consumed.
    fn collate_at(&self, left: usize, limit: usize) -> (Entries, usize) {
        let cp = self.chars[left];
        let low_off = self.starts[left];

        let mut row = Row::default();
        let mut consumed = 1_usize;

        if cp < LOW_PLANE_LEN as u32 && !self.collator.contraction_starts().contains(&cp) {
            let w = self.collator.low_weight(cp);
            if w != 0 {
                row.push(w);
            }
        } else {
            let (singles, multis) = self.collator.tables();

            let mut len = self.collator.max_contraction().min(limit - left);
            let mut matched = false;

            while len >= 2 {
                if let Some(&found) = multis.get(&self.chars[left..left + len]) {
                    for &w in found {
                        row.push(w);
                    }
                    consumed = len;
                    matched = true;
                    break;
                }
                len -= 1;
            }

            if !matched {
                if let Some(&found) = singles.get(&cp) {
                    for &w in found {
                        row.push(w);
                    }
                } else if cp < LOW_PLANE_LEN as u32 {
                    // A contraction starter with no contraction here
                    let w = self.collator.low_weight(cp);
                    if w != 0 {
                        row.push(w);
                    }
                } else if self.collator.normalization == NormalizationMode::On
                    && normalize::decomposes(cp)
                {
                    let mut parts = ArrayVec::<[u32; 8]>::default();
                    normalize::decompose(cp, &mut parts);

                    for part in parts {
                        self.push_weights_of(part, &mut row);
                    }
                } else {
                    for w in implicit_weights(cp) {
                        row.push(w);
                    }
                }
            }
        }

        if self.collator.shifting && consumed == 1 && self.collator.is_variable(cp) {
            row.clear();
        }

        let high_off = self.starts[left + consumed];
        let mut out = Entries::default();

        for (j, &w) in row.iter().enumerate() {
            let masked = self.collator.mask(w);
            if masked == 0 {
                continue;
            }

            let (low, high) = if j == 0 {
                (low_off, high_off)
            } else {
                (high_off, high_off)
            };

            out.push(WeightEntry {
                weight: masked,
                low,
                high,
            });
        }

        (out, consumed)
    }

    // Weights for one code point of a canonical decomposition
    fn push_weights_of(&self, cp: u32, row: &mut Row) {
        if cp < LOW_PLANE_LEN as u32 {
            let w = self.collator.low_weight(cp);
            if w != 0 {
                row.push(w);
            }
            return;
        }

        let (singles, _) = self.collator.tables();

        if let Some(&found) = singles.get(&cp) {
            for &w in found {
                row.push(w);
            }
        } else {
            for w in implicit_weights(cp) {
                row.push(w);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{NormalizationMode, Strength, Tailoring};
    use crate::weights::primary;

    fn primary_collator() -> Collator {
        Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On)
    }

    fn drain(stream: &mut CollationElements) -> Vec<WeightEntry> {
        let mut out = Vec::new();
        loop {
            let e = stream.next();
            if e.is_null() {
                return out;
            }
            out.push(e);
        }
    }

    #[test]
    fn expansion_spans() {
        let mut stream = CollationElements::new(primary_collator(), "fuß");
        let entries = drain(&mut stream);

        // ß is two bytes and two weights; the second weight has an empty
        // span at the end of the character
        assert_eq!(entries.len(), 4);
        assert_eq!((entries[2].low, entries[2].high), (2, 4));
        assert_eq!((entries[3].low, entries[3].high), (4, 4));
        assert_eq!(primary(entries[2].weight), primary(entries[3].weight));
    }

    #[test]
    fn marks_drop_at_primary() {
        let mut stream = CollationElements::new(primary_collator(), "a\u{0301}b");
        let entries = drain(&mut stream);

        assert_eq!(entries.len(), 2);
        assert_eq!((entries[0].low, entries[0].high), (0, 1));
        assert_eq!((entries[1].low, entries[1].high), (3, 4));
    }

    #[test]
    fn marks_survive_at_secondary() {
        let collator = Collator::new(Tailoring::Root, Strength::Secondary, NormalizationMode::On);
        let mut stream = CollationElements::new(collator, "a\u{0301}");
        let entries = drain(&mut stream);

        assert_eq!(entries.len(), 2);
        assert_eq!(primary(entries[1].weight), 0);
    }

    #[test]
    fn precomposed_decomposes_on_the_fly() {
        let collator = Collator::new(Tailoring::Root, Strength::Secondary, NormalizationMode::On);

        let mut composed = CollationElements::new(collator, "\u{00E9}");
        let mut spelled = CollationElements::new(collator, "e\u{0301}");

        let a: Vec<u32> = drain(&mut composed).iter().map(|e| e.weight).collect();
        let b: Vec<u32> = drain(&mut spelled).iter().map(|e| e.weight).collect();

        assert_eq!(a, b);
    }

    #[test]
    fn normalization_off_goes_implicit() {
        let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::Off);

        let mut composed = CollationElements::new(collator, "\u{00E9}");
        let mut spelled = CollationElements::new(collator, "e\u{0301}");

        let a: Vec<u32> = drain(&mut composed).iter().map(|e| e.weight).collect();
        let b: Vec<u32> = drain(&mut spelled).iter().map(|e| e.weight).collect();

        assert_ne!(a, b);
    }

    #[test]
    fn contraction_consumes_two_chars() {
        let collator = Collator::new(
            Tailoring::GermanPhonebook,
            Strength::Primary,
            NormalizationMode::On,
        );
        let mut stream = CollationElements::new(collator, "echo");
        let entries = drain(&mut stream);

        assert_eq!(entries.len(), 3);
        assert_eq!((entries[1].low, entries[1].high), (1, 3));
    }

    #[test]
    fn backward_agrees_with_forward() {
        let collator = primary_collator();
        let text = "1fu\u{00DF}ball";

        let mut stream = CollationElements::new(collator, text);
        let forward = drain(&mut stream);

        stream.seek(text.len());
        let mut backward = Vec::new();
        loop {
            let e = stream.previous();
            if e.is_null() {
                break;
            }
            backward.push(e);
        }
        backward.reverse();

        assert_eq!(forward, backward);
    }

    #[test]
    fn seek_rounds_up_to_char_boundary() {
        let mut stream = CollationElements::new(primary_collator(), "fußball");

        // Byte 3 is inside ß; the frontier lands on the next character
        stream.seek(3);
        assert_eq!(stream.offset(), 4);
        assert_eq!(stream.next().low, 4);
    }
}
