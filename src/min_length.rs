use crate::error::SearchError;
use crate::index::InverseWeightIndex;
use crate::pattern::WeightList;

const UNSET: i32 = i32::MIN;
const DEAD: i32 = -1;

/// For each offset into the pattern's weight list, the minimum number of
/// source characters whose weights can begin with the suffix starting
/// there. Boyer-Moore skips must be safe underestimates of characters, and
/// expansions and contractions make the weight-to-character conversion
/// nontrivial; this cache is the bridge.
///
/// Invariants: `cache[i] >= cache[i + 1]` and `cache[weight_count] == 0`.
#[derive(Debug)]
pub struct MinLengthCache {
    cache: Vec<i32>,
}

impl MinLengthCache {
    /// Solves the pattern against the inverse index. Fails with
    /// [`SearchError::DataDependency`] when no decomposition of the full
    /// pattern exists, i.e. no safe skip distance can be established.
    pub fn build(
        pattern: &WeightList,
        index: &InverseWeightIndex,
    ) -> Result<Self, SearchError> {
        let plen = pattern.weight_count();

        let mut memo = vec![UNSET; plen + 1];
        memo[plen] = 0;

        let head = solve(pattern, index, &mut memo, 0);

        if head <= 0 {
            // Report the shallowest weight that could not be decomposed
            let weight = (0..plen)
                .find(|&p| memo[p] == DEAD)
                .map_or_else(|| pattern.weight(0), |p| pattern.weight(p));

            return Err(SearchError::DataDependency { weight });
        }

        let mut cache = vec![0_i32; plen + 1];
        cache[0] = head;

        for p in 1..plen {
            cache[p] = solve(pattern, index, &mut memo, p);

            // A dead or growing entry would let the engine skip too far;
            // carry the previous value forward instead
            if cache[p] < 0 || cache[p] > cache[p - 1] {
                cache[p] = cache[p - 1];
            }
        }

        Ok(Self { cache })
    }

    /// The largest safe character-count advance from a fresh anchor.
    #[must_use]
    pub fn max_skip(&self) -> i32 {
        self.cache[0]
    }

    /// Minimum character count for the weight suffix starting at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> i32 {
        self.cache[index]
    }

    /// Number of cached offsets: pattern weight count plus one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Never true; even an empty suffix has a cached zero.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

// Shortest source string count for the weight suffix at `offset`,
// memoized; DEAD marks offsets with no valid decomposition
fn solve(
    pattern: &WeightList,
    index: &InverseWeightIndex,
    memo: &mut Vec<i32>,
    offset: usize,
) -> i32 {
    if memo[offset] != UNSET {
        return memo[offset];
    }

    let mut shortest = i32::MAX;

    for &k in index.strings_starting_with(pattern.weight(offset)) {
        let entry = index.entry(k);

        if !pattern.matches_at(offset, &entry.weights) {
            continue;
        }

        let rest_offset = offset + entry.weights.weight_count();
        let mut rest = 0_i32;

        if rest_offset < pattern.weight_count() {
            rest = solve(pattern, index, memo, rest_offset);

            if rest <= 0 {
                // Ignore any dead ends
                continue;
            }
        }

        shortest = shortest.min(entry.char_count + rest);
    }

    memo[offset] = if shortest == i32::MAX { DEAD } else { shortest };
    memo[offset]
}
