use std::fmt;
use std::sync::Arc;

use log::{debug, trace};

use crate::collator::Collator;
use crate::cursor::TargetCursor;
use crate::error::SearchError;
use crate::index::InverseWeightIndex;
use crate::min_length::MinLengthCache;
use crate::pattern::WeightList;
use crate::shift::{BadCharacterTable, GoodSuffixTable};
use crate::stream::WeightEntry;
use crate::weights::NULL_WEIGHT;

/// A collation-aware string search engine for one pattern under one
/// collator configuration.
///
/// Construction collates the pattern, solves its character-count cache,
/// and builds the shift tables; all of that is immutable afterward, so a
/// single engine can scan any number of targets via
/// [`set_target`](Self::set_target). Searching allocates nothing and
/// cannot fail.
///
/// Matches are reported as half-open byte ranges `(start, end)` into the
/// target; both ends are guaranteed to lie on grapheme cluster boundaries,
/// and the target's non-ignorable weights over the range equal the
/// pattern's under the collator's strength. An engine is single-threaded;
/// engines built from the same shared index may run on separate threads.
pub struct SearchEngine {
    collator: Collator,
    pattern: WeightList,
    index: Arc<InverseWeightIndex>,
    lengths: MinLengthCache,
    bad_char: BadCharacterTable,
    good_suffix: GoodSuffixTable,
    target: Option<TargetCursor>,
}

impl SearchEngine {
    /// Builds an engine, constructing a fresh inverse index for the
    /// collator configuration. When creating several engines under one
    /// configuration, build the index once via
    /// [`IndexRegistry`](crate::IndexRegistry) and use
    /// [`with_index`](Self::with_index) instead.
    ///
    /// # Errors
    ///
    /// [`SearchError::InvalidArgument`] for an empty or fully ignorable
    /// pattern, [`SearchError::Unsupported`] for an unusable collator
    /// configuration, and [`SearchError::DataDependency`] when the pattern
    /// has no decomposition in the index.
    pub fn new(collator: Collator, pattern: &str) -> Result<Self, SearchError> {
        collator.validate()?;
        let index = Arc::new(InverseWeightIndex::build(&collator));
        Self::with_index(collator, pattern, index)
    }

    /// Builds an engine around a shared inverse index. The index must
    /// have been built for the same collator configuration.
    ///
    /// # Errors
    ///
    /// As for [`new`](Self::new).
    pub fn with_index(
        collator: Collator,
        pattern: &str,
        index: Arc<InverseWeightIndex>,
    ) -> Result<Self, SearchError> {
        collator.validate()?;

        let pattern = WeightList::new(&collator, pattern);

        if pattern.weight_count() == 0 {
            return Err(SearchError::InvalidArgument(
                "pattern is empty or entirely ignorable",
            ));
        }

        let lengths = MinLengthCache::build(&pattern, &index)?;
        let bad_char = BadCharacterTable::build(&pattern, &lengths);
        let good_suffix = GoodSuffixTable::build(&pattern, &bad_char, &lengths);

        debug!(
            "engine ready: {} pattern weights, max skip {}",
            pattern.weight_count(),
            lengths.max_skip()
        );

        Ok(Self {
            collator,
            pattern,
            index,
            lengths,
            bad_char,
            good_suffix,
            target: None,
        })
    }

    /// Binds (or rebinds) the target string to scan. Allocates the weight
    /// buffer and grapheme boundary set for this target; `search` itself
    /// never allocates.
    ///
    /// # Errors
    ///
    /// [`SearchError::OutOfMemory`] when the cursor buffer cannot be
    /// reserved.
    pub fn set_target(&mut self, text: &str) -> Result<(), SearchError> {
        let qc = self.collator.target_normalizer().quick_check(text);
        if qc < text.len() {
            debug!(
                "target not in normalized form past byte {qc}; matches may \
                 differ from fully normalized comparison"
            );
        }

        self.target = Some(TargetCursor::new(
            self.collator,
            text,
            self.pattern.weight_count(),
        )?);

        Ok(())
    }

    /// Drops the bound target, releasing its buffers.
    pub fn clear_target(&mut self) {
        self.target = None;
    }

    /// The engine's collator configuration.
    #[must_use]
    pub fn collator(&self) -> Collator {
        self.collator
    }

    /// The shared inverse index this engine searches with.
    #[must_use]
    pub fn index(&self) -> &Arc<InverseWeightIndex> {
        &self.index
    }

    /// Finds the first acceptable match starting at or after `from` (a
    /// byte offset into the target). Returns the match as a half-open
    /// byte range, or `None` when the pattern does not occur or no target
    /// is bound.
    ///
    /// Successive calls `search(0), search(end_0), search(end_1), ...`
    /// yield matches in strictly increasing start order.
    #[allow(
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss,
        clippy::too_many_lines
    )]
    pub fn search(&mut self, from: usize) -> Option<(usize, usize)> {
        let cursor = self.target.as_mut()?;

        let plen = self.pattern.weight_count();
        let tlen = cursor.text_len();
        let max_skip = self.lengths.max_skip() as usize;

        let mut t_off = from.checked_add(max_skip)?;

        'outer: while t_off <= tlen {
            // Seed the anchor so it sits just after the last complete
            // weight under test
            let mut l_idx: i64 = 0;

            if t_off < tlen {
                let safe = cursor.next_safe_boundary(t_off + 1);
                cursor.set_anchor(safe);

                loop {
                    let e = cursor.prev_ce(l_idx as usize);

                    if e.high == 0 || (e.low < e.high && e.low <= t_off) {
                        if e.low < t_off {
                            // The span crosses the anchor: back out of
                            // every weight sharing its high end, then bump
                            // the anchor to that end
                            while l_idx >= 0 && cursor.prev_ce(l_idx as usize).high == e.high {
                                l_idx -= 1;
                            }

                            if e.high > t_off {
                                t_off = e.high;
                            }
                        }

                        break;
                    }

                    l_idx += 1;

                    if l_idx as usize >= cursor.capacity() {
                        // Expansion run larger than the window; creep
                        t_off += 1;
                        continue 'outer;
                    }
                }
            } else {
                cursor.set_anchor_at_end(tlen);
            }

            l_idx += 1;
            let mut t_idx = l_idx;

            // Walk the pattern backward from its last weight
            let mut p_idx = plen as i64 - 1;

            while p_idx >= 0 {
                let pce = self.pattern.weight(p_idx as usize);
                let tcei = cursor.prev_ce(t_idx as usize);
                t_idx += 1;

                if tcei.weight != pce {
                    // Mismatch: shift by the larger of the two tables,
                    // guaranteeing at least one byte of progress
                    let old = t_off as i64;
                    let gs_off = old + i64::from(self.good_suffix.get(p_idx as usize));

                    let mut new_off = old + i64::from(self.bad_char.skip_for(tcei.weight))
                        - i64::from(self.lengths.get(p_idx as usize + 1));

                    if gs_off > new_off && gs_off <= tlen as i64 {
                        new_off = gs_off;
                    }

                    if new_off <= old {
                        new_off = old + 1;
                    }

                    t_off = new_off as usize;
                    continue 'outer;
                }

                p_idx -= 1;
            }

            // Every weight matched; validate the candidate range
            let first = cursor.prev_ce((t_idx - 1) as usize);
            let last = cursor.prev_ce(l_idx as usize);

            let m_start = first.low;
            let min_limit = last.low;
            let mut max_limit = last.high;

            cursor.set_anchor(max_limit);
            let next_cei = cursor.next_ce(0);

            if next_cei.low > max_limit {
                max_limit = next_cei.low;
            }

            let mut found = true;

            // The weight after the match is part of an expansion whose
            // earlier weights fell inside the match
            if next_cei.low == next_cei.high && next_cei.weight != NULL_WEIGHT {
                found = false;
            }

            // The match begins inside an expansion
            if first.low == first.high {
                found = false;
            }

            if !cursor.is_boundary(m_start) {
                found = false;
            }

            let mut m_limit = max_limit;

            if min_limit < max_limit {
                let nbb = cursor.next_boundary(min_limit);

                if nbb >= last.high {
                    m_limit = nbb;
                }
            }

            if m_limit > max_limit {
                found = false;
            }

            if !cursor.is_boundary(m_limit) {
                found = false;
            }

            if found {
                trace!("match at ({m_start}, {m_limit})");
                return Some((m_start, m_limit));
            }

            t_off += self.good_suffix.get(0) as usize;
        }

        trace!("no match from byte {from}");
        None
    }

    /// Reference matcher: compares the pattern's weights against the
    /// target's materialized weight list at every position, applying the
    /// same validation filters as [`search`](Self::search). Quadratic, and
    /// allocating per call, but independent of the shift tables — the
    /// documented fallback for patterns that fail with
    /// [`SearchError::DataDependency`], and the oracle the engine is
    /// tested against.
    pub fn simple_search(&mut self, from: usize) -> Option<(usize, usize)> {
        let Self {
            target, pattern, ..
        } = self;

        let cursor = target.as_mut()?;
        let orders = cursor.orders_from(from);

        Self::matches_in_orders(cursor, &orders, pattern)
            .into_iter()
            .next()
    }

    /// Finds the last acceptable match ending at or before `from`.
    /// Provided over the reference matcher rather than a mirrored
    /// Boyer-Moore loop; allocates per call.
    pub fn search_backward(&mut self, from: usize) -> Option<(usize, usize)> {
        let Self {
            target, pattern, ..
        } = self;

        let cursor = target.as_mut()?;
        let orders = cursor.orders_from(0);

        Self::matches_in_orders(cursor, &orders, pattern)
            .into_iter()
            .filter(|&(_, end)| end <= from)
            .last()
    }

    // Every acceptable match over a materialized weight list, in
    // increasing start order (overlaps included); the weight index order
    // and the byte order of match ends coincide, since a pattern always
    // spans a fixed number of weights
    fn matches_in_orders(
        cursor: &TargetCursor,
        orders: &[WeightEntry],
        pattern: &WeightList,
    ) -> Vec<(usize, usize)> {
        let psize = pattern.weight_count();
        let tsize = orders.len() - 1;
        let mut out = Vec::new();

        for i in 0..tsize {
            if i + psize > tsize {
                break;
            }

            if (0..psize).any(|j| orders[i + j].weight != pattern.weight(j)) {
                continue;
            }

            let start = orders[i].low;
            let following = orders[i + psize];
            let last = orders[i + psize - 1];

            // All but the first weight of an expansion carry the offset of
            // the following character; a match may not start there
            if start == orders[i].high {
                continue;
            }

            if !cursor.is_boundary(start) {
                continue;
            }

            // Nor may the match end in the middle of an expansion
            if following.low == following.high && following.weight != NULL_WEIGHT {
                continue;
            }

            let max_limit = following.low;
            let min_limit = last.low;
            let mut end = max_limit;

            if min_limit < max_limit {
                let nbb = cursor.next_boundary(min_limit);

                if nbb >= last.high {
                    end = nbb;
                }
            }

            if end > max_limit {
                continue;
            }

            if !cursor.is_boundary(end) {
                continue;
            }

            out.push((start, end));
        }

        out
    }
}

impl fmt::Debug for SearchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchEngine")
            .field("collator", &self.collator)
            .field("pattern_weights", &self.pattern.weight_count())
            .field("max_skip", &self.lengths.max_skip())
            .field("has_target", &self.target.is_some())
            .finish_non_exhaustive()
    }
}
