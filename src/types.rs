use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::weights::{PRIMARY_MASK, SECONDARY_MASK, TERTIARY_MASK};

// Aliases for annoying types
pub type SinglesTable = FxHashMap<u32, &'static [u32]>;
pub type MultisTable = FxHashMap<Box<[u32]>, &'static [u32]>;

/// This enum provides for a choice of collation tailoring, i.e., which
/// table of character weights to use. The root table is a curated,
/// language-neutral ordering; tailorings adjust it for a locale.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default, Serialize, Deserialize)]
pub enum Tailoring {
    /// The root collation order, unmodified
    #[default]
    Root,
    /// German phone-book order: umlauted vowels expand to base letter plus
    /// `e`, and `ch` collates as a unit between `c` and `d`
    GermanPhonebook,
}

/// The deepest weight field considered when comparing collation elements.
/// Lower strengths equate more characters; at `Primary`, for example, case
/// and diacritics are ignored.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Serialize, Deserialize)]
pub enum Strength {
    /// Base letters only
    Primary,
    /// Base letters and diacritics
    Secondary,
    /// Base letters, diacritics, and case/variant distinctions
    Tertiary,
    /// Tertiary distinctions plus variable-weight separation
    Quaternary,
    /// Code-point-level equality on top of `Quaternary`; requires
    /// normalization to be enabled
    Identical,
}

impl Default for Strength {
    fn default() -> Self {
        Self::Tertiary
    }
}

impl Strength {
    /// The mask applied to every weight drawn from the tables at this
    /// strength.
    #[must_use]
    pub const fn mask(self) -> u32 {
        match self {
            Self::Primary => PRIMARY_MASK,
            Self::Secondary => SECONDARY_MASK,
            Self::Tertiary | Self::Quaternary | Self::Identical => TERTIARY_MASK,
        }
    }
}

/// Whether input text is decomposed before weight lookup. With `On`,
/// precomposed characters match their decomposed spellings; with `Off`,
/// only code-point-identical text produces equal weights.
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Hash, Default, Serialize, Deserialize)]
pub enum NormalizationMode {
    /// Decompose characters canonically during weight lookup (recommended)
    #[default]
    On,
    /// Look up weights for code points exactly as written
    Off,
}
