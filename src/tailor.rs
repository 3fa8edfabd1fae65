use once_cell::sync::Lazy;
use rustc_hash::FxHashSet;

use crate::consts::{letter_primary, MULT, P_A, P_E, P_O, P_U, SEC, SING, TER_LOW, TER_UP};
use crate::types::{MultisTable, SinglesTable};
use crate::weights::pack_weights;

// The phone-book contraction unit sorts between c and d
const P_CH: u16 = letter_primary(b'c') + 0x20;

// Umlaut expansions mark the inserted e with a raised secondary, keeping
// "ae" and "ä" apart below full strength only at the secondary level
const SEC_UMLAUT: u8 = 0x21;

const SINGLES_ROWS: &[(u32, &[u32])] = &[
    (
        0x00C4, // Ä
        &[
            pack_weights(P_A, SEC, TER_UP),
            pack_weights(P_E, SEC_UMLAUT, TER_UP),
        ],
    ),
    (
        0x00D6, // Ö
        &[
            pack_weights(P_O, SEC, TER_UP),
            pack_weights(P_E, SEC_UMLAUT, TER_UP),
        ],
    ),
    (
        0x00DC, // Ü
        &[
            pack_weights(P_U, SEC, TER_UP),
            pack_weights(P_E, SEC_UMLAUT, TER_UP),
        ],
    ),
    (
        0x00E4, // ä
        &[
            pack_weights(P_A, SEC, TER_LOW),
            pack_weights(P_E, SEC_UMLAUT, TER_LOW),
        ],
    ),
    (
        0x00F6, // ö
        &[
            pack_weights(P_O, SEC, TER_LOW),
            pack_weights(P_E, SEC_UMLAUT, TER_LOW),
        ],
    ),
    (
        0x00FC, // ü
        &[
            pack_weights(P_U, SEC, TER_LOW),
            pack_weights(P_E, SEC_UMLAUT, TER_LOW),
        ],
    ),
];

const MULTIS_ROWS: &[(&[u32], &[u32])] = &[
    (&[0x63, 0x68], &[pack_weights(P_CH, SEC, TER_LOW)]), // ch
    (&[0x43, 0x68], &[pack_weights(P_CH, SEC, 0x04)]),    // Ch
    (&[0x43, 0x48], &[pack_weights(P_CH, SEC, TER_UP)]),  // CH
];

pub const MAX_CONTRACTION_PHONEBOOK: usize = 2;

pub static SING_PHONEBOOK: Lazy<SinglesTable> = Lazy::new(|| {
    let mut sing = SING.clone();
    sing.extend(SINGLES_ROWS.iter().map(|&(cp, row)| (cp, row)));
    sing
});

pub static MULT_PHONEBOOK: Lazy<MultisTable> = Lazy::new(|| {
    let mut mult = MULT.clone();
    mult.extend(
        MULTIS_ROWS
            .iter()
            .map(|&(key, row)| (key.to_vec().into_boxed_slice(), row)),
    );
    mult
});

// First code points of the declared contractions; these bypass the
// low-plane fast path so the contraction window gets a chance to match
pub static CONTRACTION_STARTS_PHONEBOOK: Lazy<FxHashSet<u32>> = Lazy::new(|| {
    MULTIS_ROWS
        .iter()
        .map(|&(key, _)| key[0])
        .collect::<FxHashSet<u32>>()
});

// Non-initial code points of the declared contractions; unsafe to start
// backward iteration on
pub static UNSAFE_TRAILING_PHONEBOOK: Lazy<FxHashSet<u32>> = Lazy::new(|| {
    MULTIS_ROWS
        .iter()
        .flat_map(|&(key, _)| key[1..].iter().copied())
        .collect::<FxHashSet<u32>>()
});
