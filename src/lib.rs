//! This crate provides collation-aware string search: finding a pattern
//! inside a target text under language-sensitive comparison rules rather
//! than raw code-point equality. Matching respects comparison strength
//! (primary/secondary/tertiary), contractions (`ch` collating as a unit in
//! phone-book German), expansions (`ß` collating as `ss`), and grapheme
//! cluster boundaries at the edges of every reported match.
//!
//! The core is a Boyer-Moore loop over collation weights. Because a single
//! character can produce several weights and several characters can
//! produce one, skip distances are computed in *source characters* via a
//! shortest-decomposition solver, never in weights. Simple usage looks
//! like the following...
//!
//! ```
//! use quaero::{Collator, NormalizationMode, SearchEngine, Strength, Tailoring};
//!
//! let collator = Collator::new(Tailoring::Root, Strength::Primary, NormalizationMode::On);
//! let mut engine = SearchEngine::new(collator, "fuss").unwrap();
//!
//! engine.set_target("1234fu\u{00DF}ball").unwrap();
//! assert_eq!(engine.search(0), Some((4, 8)));
//! ```
//!
//! All offsets, in both directions, are UTF-8 byte offsets into the
//! target. Engines are cheap once the inverse index exists; share the
//! index across patterns with [`IndexRegistry`].

#![warn(clippy::pedantic, clippy::cargo)]
#![allow(clippy::module_name_repetitions)]
#![deny(missing_docs)]

mod collator;
pub use collator::Collator;

mod cursor;
pub use cursor::TargetCursor;

mod engine;
pub use engine::SearchEngine;

mod error;
pub use error::SearchError;

mod index;
pub use index::InverseWeightIndex;

mod min_length;
pub use min_length::MinLengthCache;

mod normalize;
pub use normalize::Normalizer;

mod pattern;
pub use pattern::WeightList;

mod registry;
pub use registry::IndexRegistry;

mod shift;
pub use shift::{BadCharacterTable, GoodSuffixTable};

mod stream;
pub use stream::{CollationElements, WeightEntry};

mod types;
pub use types::{NormalizationMode, Strength, Tailoring};

mod consts;
mod tailor;

mod weights;
pub use weights::{IGNORABLE, NULL_WEIGHT};
