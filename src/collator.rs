use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::consts::{EMPTY_SET, LOW, LOW_PLANE_LEN, MULT, SING, VARIABLE};
use crate::error::SearchError;
use crate::normalize::{combining_class, Normalizer};
use crate::tailor::{
    CONTRACTION_STARTS_PHONEBOOK, MAX_CONTRACTION_PHONEBOOK, MULT_PHONEBOOK, SING_PHONEBOOK,
    UNSAFE_TRAILING_PHONEBOOK,
};
use crate::types::{MultisTable, NormalizationMode, SinglesTable, Strength, Tailoring};

/// The `Collator` struct is the configuration handle for the search
/// engine. It selects a tailoring (which table of character weights to
/// use), a comparison strength, a normalization mode, and the treatment of
/// variable-weight characters.
///
/// The default is the root tailoring at tertiary strength with
/// normalization on — a reasonable starting point for exact-but-accentless
/// searching is `Strength::Primary` instead.
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Collator {
    /// The table of weights to be used: the root order, or a locale
    /// tailoring based on it
    pub tailoring: Tailoring,
    /// The deepest weight field compared
    pub strength: Strength,
    /// Whether text is decomposed canonically during weight lookup
    pub normalization: NormalizationMode,
    /// Whether variable-weight characters (whitespace, punctuation,
    /// symbols) are ignored for matching
    pub shifting: bool,
}

impl Default for Collator {
    fn default() -> Self {
        Self::new(
            Tailoring::default(),
            Strength::default(),
            NormalizationMode::default(),
        )
    }
}

impl Collator {
    /// Create a new `Collator` with the given options and `shifting`
    /// disabled. NB: it is also possible to call `Collator::default()`.
    #[must_use]
    pub fn new(
        tailoring: Tailoring,
        strength: Strength,
        normalization: NormalizationMode,
    ) -> Self {
        Self {
            tailoring,
            strength,
            normalization,
            shifting: false,
        }
    }

    pub(crate) fn tables(&self) -> (&'static SinglesTable, &'static MultisTable) {
        match self.tailoring {
            Tailoring::Root => (&SING, &MULT),
            Tailoring::GermanPhonebook => (&SING_PHONEBOOK, &MULT_PHONEBOOK),
        }
    }

    pub(crate) fn contraction_starts(&self) -> &'static FxHashSet<u32> {
        match self.tailoring {
            Tailoring::Root => &EMPTY_SET,
            Tailoring::GermanPhonebook => &CONTRACTION_STARTS_PHONEBOOK,
        }
    }

    pub(crate) fn max_contraction(&self) -> usize {
        match self.tailoring {
            Tailoring::Root => 1,
            Tailoring::GermanPhonebook => MAX_CONTRACTION_PHONEBOOK,
        }
    }

    pub(crate) fn low_weight(&self, cp: u32) -> u32 {
        LOW[cp as usize]
    }

    pub(crate) fn is_variable(&self, cp: u32) -> bool {
        VARIABLE.contains(&cp)
    }

    pub(crate) fn mask(&self, weight: u32) -> u32 {
        weight & self.strength.mask()
    }

    /// Whether backward collation iteration may not start at `cp`: true
    /// for combining marks and for non-initial characters of declared
    /// contractions. The weight stream reconstructed from such a position
    /// would disagree with the stream from the start of the text.
    #[must_use]
    pub fn is_unsafe(&self, cp: u32) -> bool {
        if combining_class(cp) != 0 {
            return true;
        }

        match self.tailoring {
            Tailoring::Root => false,
            Tailoring::GermanPhonebook => UNSAFE_TRAILING_PHONEBOOK.contains(&cp),
        }
    }

    /// The multi-character sequences this configuration collates as a
    /// unit.
    #[must_use]
    pub fn contractions(&self) -> Vec<String> {
        let (_, multis) = self.tables();

        let mut out: Vec<String> = multis
            .keys()
            .map(|key| {
                key.iter()
                    .filter_map(|&cp| char::from_u32(cp))
                    .collect::<String>()
            })
            .collect();

        out.sort_unstable();
        out
    }

    /// The single characters this configuration expands into more than one
    /// weight.
    #[must_use]
    pub fn expansions(&self) -> Vec<char> {
        let (singles, _) = self.tables();

        let mut out: Vec<char> = singles
            .iter()
            .filter(|(_, row)| row.len() > 1)
            .filter_map(|(&cp, _)| char::from_u32(cp))
            .collect();

        out.sort_unstable();
        out
    }

    // Every code point the tables assign weights to; the character set the
    // inverse index is built over
    pub(crate) fn indexed_code_points(&self) -> Vec<u32> {
        let (singles, _) = self.tables();

        let low = (0..LOW_PLANE_LEN as u32).filter(|&cp| LOW[cp as usize] != 0);
        let mut out: Vec<u32> = low.chain(singles.keys().copied()).collect();

        out.sort_unstable();
        out
    }

    pub(crate) fn target_normalizer(&self) -> Normalizer {
        match self.normalization {
            NormalizationMode::On => Normalizer::Fcd,
            NormalizationMode::Off => Normalizer::NoOp,
        }
    }

    pub(crate) fn validate(&self) -> Result<(), SearchError> {
        if self.strength == Strength::Identical && self.normalization == NormalizationMode::Off {
            return Err(SearchError::Unsupported(
                "Identical strength requires normalization",
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phonebook_declares_ch() {
        let collator = Collator::new(
            Tailoring::GermanPhonebook,
            Strength::Primary,
            NormalizationMode::On,
        );

        assert!(collator.contractions().iter().any(|s| s == "ch"));
        assert!(collator.is_unsafe('h' as u32));
        assert!(!collator.is_unsafe('c' as u32));
    }

    #[test]
    fn root_declares_expansions() {
        let collator = Collator::default();
        let expansions = collator.expansions();

        assert!(expansions.contains(&'\u{00DF}'));
        assert!(expansions.contains(&'\u{00E6}'));
        assert!(collator.contractions().is_empty());
    }

    #[test]
    fn combining_marks_are_unsafe_everywhere() {
        let collator = Collator::default();
        assert!(collator.is_unsafe(0x0301));
        assert!(collator.is_unsafe(0x0323));
    }

    #[test]
    fn identical_needs_normalization() {
        let mut collator = Collator::new(
            Tailoring::Root,
            Strength::Identical,
            NormalizationMode::Off,
        );
        assert!(collator.validate().is_err());

        collator.normalization = NormalizationMode::On;
        assert!(collator.validate().is_ok());
    }
}
