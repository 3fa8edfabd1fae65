use crate::min_length::MinLengthCache;
use crate::pattern::WeightList;
use crate::weights::primary;

// A small prime; collisions are tolerated because the later (smaller)
// skip wins and a smaller skip is always safe
const HASH_TABLE_SIZE: usize = 257;

fn hash(weight: u32) -> usize {
    primary(weight) as usize % HASH_TABLE_SIZE
}

/// Bad-character shifts: how many source characters the anchor may advance
/// when a target weight mismatches the pattern. Slots hold character
/// counts drawn from the min-length cache; unset slots hold the maximum
/// skip.
#[derive(Debug)]
pub struct BadCharacterTable {
    table: [i32; HASH_TABLE_SIZE],
    max_skip: i32,
}

impl BadCharacterTable {
    /// Fills the table for a pattern: every slot starts at the maximum
    /// skip, then each non-terminal pattern weight writes the character
    /// count of the suffix after it.
    #[must_use]
    pub fn build(pattern: &WeightList, lengths: &MinLengthCache) -> Self {
        let max_skip = lengths.max_skip();
        let mut table = [max_skip; HASH_TABLE_SIZE];
        let plen = pattern.weight_count();

        // Last write wins on collision
        for p in 0..plen.saturating_sub(1) {
            table[hash(pattern.weight(p))] = lengths.get(p + 1);
        }

        Self { table, max_skip }
    }

    /// Skip distance, in characters, for a mismatching target weight.
    #[must_use]
    pub fn skip_for(&self, weight: u32) -> i32 {
        self.table[hash(weight)]
    }

    /// `cache[0]`: the largest safe skip from a fresh anchor.
    #[must_use]
    pub fn max_skip(&self) -> i32 {
        self.max_skip
    }
}

/// Good-suffix shifts: how many source characters the anchor may advance
/// when the weights strictly right of a position matched but the position
/// itself did not. Built from the classical suffix function, with every
/// distance translated to characters through the min-length cache.
#[derive(Debug)]
pub struct GoodSuffixTable {
    table: Vec<i32>,
}

impl GoodSuffixTable {
    /// Builds the table for a pattern in two passes: one for matching
    /// suffixes that are also prefixes, one for suffixes recurring
    /// elsewhere in the pattern.
    #[must_use]
    pub fn build(
        pattern: &WeightList,
        bad_char: &BadCharacterTable,
        lengths: &MinLengthCache,
    ) -> Self {
        #[allow(clippy::cast_possible_wrap)]
        let patlen = pattern.weight_count() as i32;
        let max_skip = bad_char.max_skip();

        // suff[i] = length of the longest suffix of the pattern ending at
        // i that is also a suffix of the whole pattern
        let mut suff = vec![0_i32; patlen as usize];
        suff[(patlen - 1) as usize] = patlen;

        let mut start = patlen - 1;
        let mut end = -1_i32;

        let mut i = patlen - 2;
        while i >= 0 {
            // (i > start) means we're inside the last suffix match we
            // found; (i + patlen - 1 - end) is the index of the same
            // weight at the end of the pattern, so any suffix match there
            // that doesn't extend past the last match carries over
            if i > start && suff[(i + patlen - 1 - end) as usize] < i - start {
                suff[i as usize] = suff[(i + patlen - 1 - end) as usize];
            } else {
                start = i;
                end = i;

                let mut s = patlen;

                while start >= 0 && {
                    s -= 1;
                    pattern.weight(start as usize) == pattern.weight(s as usize)
                } {
                    start -= 1;
                }

                suff[i as usize] = end - start;
            }

            i -= 1;
        }

        let mut table = vec![max_skip; patlen as usize];
        let mut prefix = 0_i32;

        let mut i = patlen - 2;
        while i >= 0 {
            if suff[i as usize] == i + 1 {
                // This matching suffix is a prefix of the pattern: for any
                // mismatch before it, shift so the front of the pattern
                // lines up with the front of the suffix
                let prefix_skip = lengths.get((i + 1) as usize);

                while prefix < patlen - 1 - i {
                    if table[prefix as usize] == max_skip {
                        table[prefix as usize] = prefix_skip;
                    }

                    prefix += 1;
                }
            }

            i -= 1;
        }

        for i in 0..(patlen - 1) {
            table[(patlen - 1 - suff[i as usize]) as usize] = lengths.get((i + 1) as usize);
        }

        Self { table }
    }

    /// Shift, in characters, for a mismatch at pattern position `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> i32 {
        self.table[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collator::Collator;
    use crate::index::InverseWeightIndex;
    use crate::types::{NormalizationMode, Strength, Tailoring};

    fn tables(pattern: &str) -> (WeightList, MinLengthCache, BadCharacterTable, GoodSuffixTable) {
        let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
        let index = InverseWeightIndex::build(&collator);
        let weights = WeightList::new(&collator, pattern);
        let lengths = MinLengthCache::build(&weights, &index).unwrap();
        let bad_char = BadCharacterTable::build(&weights, &lengths);
        let good_suffix = GoodSuffixTable::build(&weights, &bad_char, &lengths);
        (weights, lengths, bad_char, good_suffix)
    }

    #[test]
    fn unseen_weight_skips_the_maximum() {
        let (weights, lengths, bad_char, _) = tables("fuss");
        let z = WeightList::new(
            &Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On),
            "z",
        );

        assert_eq!(bad_char.skip_for(z.weight(0)), lengths.max_skip());
        assert!(bad_char.skip_for(weights.weight(0)) < lengths.max_skip());
    }

    #[test]
    fn no_skip_exceeds_the_maximum() {
        let (weights, lengths, bad_char, good_suffix) = tables("fussball");

        for p in 0..weights.weight_count() {
            assert!(bad_char.skip_for(weights.weight(p)) <= lengths.max_skip());
            assert!(good_suffix.get(p) <= lengths.max_skip());
            assert!(good_suffix.get(p) >= 1);
        }
    }

    #[test]
    fn repeated_suffix_shifts_to_earlier_occurrence() {
        // For "abcabc", a mismatch right before the final "abc" should
        // shift by the three characters to the earlier occurrence, not by
        // the whole pattern
        let (weights, _, _, good_suffix) = tables("abcabc");

        let plen = weights.weight_count();
        assert_eq!(plen, 6);
        assert_eq!(good_suffix.get(plen - 4), 3);
    }
}
