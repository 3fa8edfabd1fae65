use std::borrow::Cow;

use tinyvec::ArrayVec;
use unicode_normalization::char::{
    canonical_combining_class, decompose_canonical, decompose_compatible,
};
use unicode_normalization::{is_nfc_quick, is_nfkc_quick, IsNormalized, UnicodeNormalization};

/// A normalization form reduced to the two operations the search core
/// needs: a quick check yielding the accepted prefix, and a full
/// normalization pass.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Normalizer {
    /// Canonical composition
    Nfc,
    /// Canonical decomposition
    Nfd,
    /// Compatibility composition
    Nfkc,
    /// Compatibility decomposition
    Nfkd,
    /// "Fast C or D": canonically ordered text, composed or not
    Fcd,
    /// Pass text through untouched
    NoOp,
}

impl Normalizer {
    /// Returns the byte offset up to which `input` is already in this
    /// form. The composed variants check at whole-string granularity; the
    /// decomposed variants and `Fcd` report the start of the first
    /// offending combining run.
    #[must_use]
    pub fn quick_check(self, input: &str) -> usize {
        match self {
            Self::NoOp => input.len(),
            Self::Nfc => match is_nfc_quick(input.chars()) {
                IsNormalized::Yes => input.len(),
                _ => 0,
            },
            Self::Nfkc => match is_nfkc_quick(input.chars()) {
                IsNormalized::Yes => input.len(),
                _ => 0,
            },
            Self::Nfd => scan_decomposed(input, false),
            Self::Nfkd => scan_decomposed(input, true),
            Self::Fcd => scan_fcd(input),
        }
    }

    /// Normalizes `input`, borrowing when the quick check accepts it
    /// whole.
    #[must_use]
    pub fn normalize<'a>(self, input: &'a str) -> Cow<'a, str> {
        if self.quick_check(input) == input.len() {
            return Cow::Borrowed(input);
        }

        match self {
            Self::NoOp => Cow::Borrowed(input),
            Self::Nfc => input.nfc().collect::<String>().into(),
            Self::Nfd | Self::Fcd => input.nfd().collect::<String>().into(),
            Self::Nfkc => input.nfkc().collect::<String>().into(),
            Self::Nfkd => input.nfkd().collect::<String>().into(),
        }
    }
}

// Accepted prefix for the decomposed forms: no decomposable characters, no
// combining marks out of canonical order. Failures report the start of the
// enclosing combining run, a safe cut point.
fn scan_decomposed(input: &str, compat: bool) -> usize {
    let mut run_start = 0;
    let mut prev_ccc = 0_u8;

    for (i, c) in input.char_indices() {
        let ccc = canonical_combining_class(c);

        if ccc == 0 {
            run_start = i;
        }

        if char_decomposes(c, compat) {
            return if ccc == 0 { i } else { run_start };
        }

        if ccc != 0 && ccc < prev_ccc {
            return run_start;
        }

        prev_ccc = ccc;
    }

    input.len()
}

// FCD check: the lead combining class of each character's decomposition
// must not undercut the trail class of its predecessor
fn scan_fcd(input: &str) -> usize {
    let mut run_start = 0;
    let mut prev_trail = 0_u8;

    for (i, c) in input.char_indices() {
        if (c as u32) < 192 {
            prev_trail = 0;
            run_start = i;
            continue;
        }

        if canonical_combining_class(c) == 0 {
            run_start = i;
        }

        let (lead, trail) = decomposition_cccs(c);

        if lead != 0 && lead < prev_trail {
            return run_start;
        }

        prev_trail = trail;
    }

    input.len()
}

fn decomposition_cccs(c: char) -> (u8, u8) {
    let mut lead = 0_u8;
    let mut trail = 0_u8;
    let mut first = true;

    decompose_canonical(c, |d| {
        let ccc = canonical_combining_class(d);
        if first {
            lead = ccc;
            first = false;
        }
        trail = ccc;
    });

    (lead, trail)
}

fn char_decomposes(c: char, compat: bool) -> bool {
    let mut count = 0_u32;
    let mut same = true;

    let probe = |d: char| {
        if count == 0 && d != c {
            same = false;
        }
        count += 1;
    };

    if compat {
        decompose_compatible(c, probe);
    } else {
        decompose_canonical(c, probe);
    }

    count > 1 || !same
}

/// Whether a code point has a canonical decomposition.
pub(crate) fn decomposes(cp: u32) -> bool {
    char::from_u32(cp).is_some_and(|c| char_decomposes(c, false))
}

/// Full canonical decomposition of one code point.
pub(crate) fn decompose(cp: u32, out: &mut ArrayVec<[u32; 8]>) {
    match char::from_u32(cp) {
        Some(c) => decompose_canonical(c, |d| {
            let _ = out.try_push(d as u32);
        }),
        None => {
            let _ = out.try_push(cp);
        }
    }
}

/// Canonical combining class of a code point; zero for non-characters.
pub(crate) fn combining_class(cp: u32) -> u8 {
    char::from_u32(cp).map_or(0, canonical_combining_class)
}
