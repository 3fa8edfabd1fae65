use once_cell::sync::Lazy;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::types::{MultisTable, SinglesTable};
use crate::weights::pack_weights;

//
// Const
//

// Default secondary weight; diacritics get their own values
pub const SEC: u8 = 0x20;

// Tertiary weights for case
pub const TER_LOW: u8 = 0x02;
pub const TER_UP: u8 = 0x08;

// Tertiary weights marking one-character expansions (ß, æ, œ), so that the
// expansion stays distinguishable from its spelled-out form at full strength
pub const TER_EXP_LOW: u8 = 0x04;
pub const TER_EXP_UP: u8 = 0x0A;

// The fast-path table covers code points below this limit
pub const LOW_PLANE_LEN: usize = 0xB7;

// Letter primaries run from 0x2800 in steps of 0x40, leaving room for
// tailored units (e.g. phone-book "ch") between adjacent letters
pub(crate) const fn letter_primary(letter: u8) -> u16 {
    0x2800 + (letter - b'a') as u16 * 0x40
}

// Digit primaries, below the letters
pub(crate) const fn digit_primary(digit: u8) -> u16 {
    0x1FC0 + (digit - b'0') as u16 * 0x10
}

pub(crate) const P_A: u16 = letter_primary(b'a');
pub(crate) const P_E: u16 = letter_primary(b'e');
pub(crate) const P_L: u16 = letter_primary(b'l');
pub(crate) const P_O: u16 = letter_primary(b'o');
pub(crate) const P_S: u16 = letter_primary(b's');
pub(crate) const P_U: u16 = letter_primary(b'u');

// Eth sorts after d, thorn after t
const P_ETH: u16 = letter_primary(b'd') + 0x20;
const P_THORN: u16 = letter_primary(b't') + 0x20;

// Punctuation, symbol, and currency weights for the low plane. Code points
// absent from this list and outside the alphanumeric ranges are ignorable
// (controls, soft hyphen).
const LOW_ROWS: &[(u32, u32)] = &[
    (0x09, pack_weights(0x0201, SEC, TER_LOW)),
    (0x0A, pack_weights(0x0202, SEC, TER_LOW)),
    (0x0B, pack_weights(0x0203, SEC, TER_LOW)),
    (0x0C, pack_weights(0x0204, SEC, TER_LOW)),
    (0x0D, pack_weights(0x0205, SEC, TER_LOW)),
    (0x20, pack_weights(0x0209, SEC, TER_LOW)),
    (0x21, pack_weights(0x0260, SEC, TER_LOW)),
    (0x22, pack_weights(0x0270, SEC, TER_LOW)),
    (0x23, pack_weights(0x0486, SEC, TER_LOW)),
    (0x24, pack_weights(0x1E00, SEC, TER_LOW)),
    (0x25, pack_weights(0x0490, SEC, TER_LOW)),
    (0x26, pack_weights(0x04A0, SEC, TER_LOW)),
    (0x27, pack_weights(0x0276, SEC, TER_LOW)),
    (0x28, pack_weights(0x02C0, SEC, TER_LOW)),
    (0x29, pack_weights(0x02C6, SEC, TER_LOW)),
    (0x2A, pack_weights(0x04B0, SEC, TER_LOW)),
    (0x2B, pack_weights(0x0520, SEC, TER_LOW)),
    (0x2C, pack_weights(0x0230, SEC, TER_LOW)),
    (0x2D, pack_weights(0x0222, SEC, TER_LOW)),
    (0x2E, pack_weights(0x0246, SEC, TER_LOW)),
    (0x2F, pack_weights(0x04C0, SEC, TER_LOW)),
    (0x3A, pack_weights(0x0310, SEC, TER_LOW)),
    (0x3B, pack_weights(0x030A, SEC, TER_LOW)),
    (0x3C, pack_weights(0x0530, SEC, TER_LOW)),
    (0x3D, pack_weights(0x0532, SEC, TER_LOW)),
    (0x3E, pack_weights(0x0534, SEC, TER_LOW)),
    (0x3F, pack_weights(0x0266, SEC, TER_LOW)),
    (0x40, pack_weights(0x04D0, SEC, TER_LOW)),
    (0x5B, pack_weights(0x02C8, SEC, TER_LOW)),
    (0x5C, pack_weights(0x04D6, SEC, TER_LOW)),
    (0x5D, pack_weights(0x02C9, SEC, TER_LOW)),
    (0x5E, pack_weights(0x04DC, SEC, TER_LOW)),
    (0x5F, pack_weights(0x0212, SEC, TER_LOW)),
    (0x60, pack_weights(0x04E0, SEC, TER_LOW)),
    (0x7B, pack_weights(0x02CA, SEC, TER_LOW)),
    (0x7C, pack_weights(0x0542, SEC, TER_LOW)),
    (0x7D, pack_weights(0x02CB, SEC, TER_LOW)),
    (0x7E, pack_weights(0x0546, SEC, TER_LOW)),
    (0xA0, pack_weights(0x0209, SEC, 0x10)),
    (0xA1, pack_weights(0x0262, SEC, TER_LOW)),
    (0xA2, pack_weights(0x1E10, SEC, TER_LOW)),
    (0xA3, pack_weights(0x1E15, SEC, TER_LOW)),
    (0xA4, pack_weights(0x1E1A, SEC, TER_LOW)),
    (0xA5, pack_weights(0x1E1F, SEC, TER_LOW)),
    (0xA6, pack_weights(0x0548, SEC, TER_LOW)),
    (0xA7, pack_weights(0x04F0, SEC, TER_LOW)),
    (0xA8, pack_weights(0x0550, SEC, TER_LOW)),
    (0xA9, pack_weights(0x0552, SEC, TER_LOW)),
    (0xAA, pack_weights(P_A, SEC, 0x1D)),
    (0xAB, pack_weights(0x0278, SEC, TER_LOW)),
    (0xAC, pack_weights(0x0554, SEC, TER_LOW)),
    (0xAE, pack_weights(0x0556, SEC, TER_LOW)),
    (0xAF, pack_weights(0x0558, SEC, TER_LOW)),
    (0xB0, pack_weights(0x055A, SEC, TER_LOW)),
    (0xB1, pack_weights(0x0526, SEC, TER_LOW)),
    (0xB2, pack_weights(digit_primary(b'2'), SEC, 0x14)),
    (0xB3, pack_weights(digit_primary(b'3'), SEC, 0x14)),
    (0xB4, pack_weights(0x055C, SEC, TER_LOW)),
    (0xB5, pack_weights(0x2F40, SEC, TER_LOW)),
    (0xB6, pack_weights(0x04F4, SEC, TER_LOW)),
];

// Code points with a variable weight: whitespace, punctuation, symbols,
// currency. With the "shifting" option set, these become ignorable for
// search purposes.
const VARIABLE_ROWS: &[u32] = &[
    0x09, 0x0A, 0x0B, 0x0C, 0x0D, 0x20, 0x21, 0x22, 0x23, 0x24, 0x25, 0x26, 0x27, 0x28, 0x29,
    0x2A, 0x2B, 0x2C, 0x2D, 0x2E, 0x2F, 0x3A, 0x3B, 0x3C, 0x3D, 0x3E, 0x3F, 0x40, 0x5B, 0x5C,
    0x5D, 0x5E, 0x5F, 0x60, 0x7B, 0x7C, 0x7D, 0x7E, 0xA0, 0xA1, 0xA2, 0xA3, 0xA4, 0xA5, 0xA6,
    0xA7, 0xA8, 0xA9, 0xAB, 0xAC, 0xAE, 0xAF, 0xB0, 0xB1, 0xB4, 0xB6,
];

// Latin letters beyond the low plane that have no canonical decomposition,
// plus the common combining marks. Letters with decompositions (é, ü, å, …)
// are resolved by decomposing at lookup time.
const SINGLES_ROWS: &[(u32, &[u32])] = &[
    (
        0x00C6, // Æ
        &[
            pack_weights(P_A, SEC, TER_EXP_UP),
            pack_weights(P_E, SEC, TER_EXP_UP),
        ],
    ),
    (0x00D0, &[pack_weights(P_ETH, SEC, TER_UP)]), // Ð
    (0x00D8, &[pack_weights(P_O, 0x33, TER_UP)]),  // Ø
    (0x00DE, &[pack_weights(P_THORN, SEC, TER_UP)]), // Þ
    (
        0x00DF, // ß
        &[
            pack_weights(P_S, SEC, TER_EXP_LOW),
            pack_weights(P_S, SEC, TER_EXP_LOW),
        ],
    ),
    (
        0x00E6, // æ
        &[
            pack_weights(P_A, SEC, TER_EXP_LOW),
            pack_weights(P_E, SEC, TER_EXP_LOW),
        ],
    ),
    (0x00F0, &[pack_weights(P_ETH, SEC, TER_LOW)]), // ð
    (0x00F8, &[pack_weights(P_O, 0x33, TER_LOW)]),  // ø
    (0x00FE, &[pack_weights(P_THORN, SEC, TER_LOW)]), // þ
    (0x0141, &[pack_weights(P_L, 0x35, TER_UP)]),   // Ł
    (0x0142, &[pack_weights(P_L, 0x35, TER_LOW)]),  // ł
    (
        0x0152, // Œ
        &[
            pack_weights(P_O, SEC, TER_EXP_UP),
            pack_weights(P_E, SEC, TER_EXP_UP),
        ],
    ),
    (
        0x0153, // œ
        &[
            pack_weights(P_O, SEC, TER_EXP_LOW),
            pack_weights(P_E, SEC, TER_EXP_LOW),
        ],
    ),
    (
        0x1E9E, // ẞ
        &[
            pack_weights(P_S, SEC, 0x09),
            pack_weights(P_S, SEC, 0x09),
        ],
    ),
    (0x0300, &[pack_weights(0, 0x25, 0x02)]), // grave
    (0x0301, &[pack_weights(0, 0x24, 0x02)]), // acute
    (0x0302, &[pack_weights(0, 0x27, 0x02)]), // circumflex
    (0x0303, &[pack_weights(0, 0x28, 0x02)]), // tilde
    (0x0304, &[pack_weights(0, 0x32, 0x02)]), // macron
    (0x0306, &[pack_weights(0, 0x37, 0x02)]), // breve
    (0x0307, &[pack_weights(0, 0x3A, 0x02)]), // dot above
    (0x0308, &[pack_weights(0, 0x2B, 0x02)]), // diaeresis
    (0x030A, &[pack_weights(0, 0x2C, 0x02)]), // ring above
    (0x030B, &[pack_weights(0, 0x2E, 0x02)]), // double acute
    (0x030C, &[pack_weights(0, 0x30, 0x02)]), // caron
    (0x0323, &[pack_weights(0, 0x42, 0x02)]), // dot below
    (0x0327, &[pack_weights(0, 0x56, 0x02)]), // cedilla
    (0x0328, &[pack_weights(0, 0x59, 0x02)]), // ogonek
];

// Unassigned code points that fall inside one of the ranges used to
// calculate implicit weights
const INCLUDED_UNASSIGNED: [u32; 4] = [0x2B73A, 0x2B81E, 0x2CEA2, 0x2EBE1];

//
// Static
//

// Map a low code point to its collation weights; zero means ignorable
pub static LOW: Lazy<[u32; LOW_PLANE_LEN]> = Lazy::new(|| {
    let mut low = [0_u32; LOW_PLANE_LEN];

    for &(cp, w) in LOW_ROWS {
        low[cp as usize] = w;
    }

    for d in b'0'..=b'9' {
        low[d as usize] = pack_weights(digit_primary(d), SEC, TER_LOW);
    }

    for k in b'a'..=b'z' {
        low[k as usize] = pack_weights(letter_primary(k), SEC, TER_LOW);
        low[(k - 0x20) as usize] = pack_weights(letter_primary(k), SEC, TER_UP);
    }

    low
});

// Map a single code point (above the low plane) to its collation weights
pub static SING: Lazy<SinglesTable> = Lazy::new(|| {
    SINGLES_ROWS
        .iter()
        .map(|&(cp, row)| (cp, row))
        .collect::<SinglesTable>()
});

// The root table declares no contractions
pub static MULT: Lazy<MultisTable> = Lazy::new(FxHashMap::default);

pub static VARIABLE: Lazy<FxHashSet<u32>> = Lazy::new(|| {
    VARIABLE_ROWS.iter().copied().collect::<FxHashSet<u32>>()
});

pub static EMPTY_SET: Lazy<FxHashSet<u32>> = Lazy::new(FxHashSet::default);

//
// Implicit weights
//

// Two weights for a code point not listed in any table
#[allow(clippy::manual_range_contains)]
pub fn implicit_weights(code_point: u32) -> [u32; 2] {
    let mut aaaa = match code_point {
        x if x >= 13_312 && x <= 19_903 => 64_384 + (code_point >> 15), //     CJK2
        x if x >= 19_968 && x <= 40_959 => 64_320 + (code_point >> 15), //     CJK1
        x if x >= 63_744 && x <= 64_255 => 64_320 + (code_point >> 15), //     CJK1
        x if x >= 94_208 && x <= 101_119 => 64_256,                     //     Tangut
        x if x >= 101_120 && x <= 101_631 => 64_258,                    //     Khitan
        x if x >= 101_632 && x <= 101_775 => 64_256,                    //     Tangut
        x if x >= 110_960 && x <= 111_359 => 64_257,                    //     Nushu
        x if x >= 131_072 && x <= 173_791 => 64_384 + (code_point >> 15), //   CJK2
        x if x >= 173_824 && x <= 191_471 => 64_384 + (code_point >> 15), //   CJK2
        x if x >= 196_608 && x <= 201_551 => 64_384 + (code_point >> 15), //   CJK2
        _ => 64_448 + (code_point >> 15),                               //     unass.
    };

    let mut bbbb = match code_point {
        x if x >= 94_208 && x <= 101_119 => code_point - 94_208, //     Tangut
        x if x >= 101_120 && x <= 101_631 => code_point - 101_120, //   Khitan
        x if x >= 101_632 && x <= 101_775 => code_point - 94_208, //    Tangut
        x if x >= 110_960 && x <= 111_359 => code_point - 110_960, //   Nushu
        _ => code_point & 32_767,
    };

    if INCLUDED_UNASSIGNED.contains(&code_point) {
        aaaa = 64_448 + (code_point >> 15);
        bbbb = code_point & 32_767;
    }

    // BBBB always gets bitwise ORed with this value
    bbbb |= 32_768;

    #[allow(clippy::cast_possible_truncation)]
    [
        pack_weights(aaaa as u16, SEC, TER_LOW),
        pack_weights(bbbb as u16, 0, 0),
    ]
}
