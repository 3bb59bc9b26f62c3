//! Lookup tables for the MGRS lettering scheme.
//!
//! Letters are handled as alphabet indices (`A` = 0 .. `Z` = 25).

use crate::proj::ellipsoid::Ellipsoid;

pub(crate) mod letter {
    pub const A: u8 = 0;
    pub const B: u8 = 1;
    pub const C: u8 = 2;
    pub const D: u8 = 3;
    pub const E: u8 = 4;
    pub const F: u8 = 5;
    pub const G: u8 = 6;
    pub const H: u8 = 7;
    pub const I: u8 = 8;
    pub const J: u8 = 9;
    pub const K: u8 = 10;
    pub const L: u8 = 11;
    pub const M: u8 = 12;
    pub const N: u8 = 13;
    pub const O: u8 = 14;
    pub const P: u8 = 15;
    pub const Q: u8 = 16;
    pub const R: u8 = 17;
    pub const S: u8 = 18;
    pub const T: u8 = 19;
    pub const U: u8 = 20;
    pub const V: u8 = 21;
    pub const W: u8 = 22;
    pub const X: u8 = 23;
    pub const Y: u8 = 24;
    pub const Z: u8 = 25;

    pub fn to_char(index: u8) -> char {
        char::from(b'A' + index)
    }
}

use letter::*;

pub const ONE_HT: f64 = 100_000.0;
pub const TWO_MIL: f64 = 2_000_000.0;

/// One 8° (12° for X) latitude band of the UTM grid.
#[derive(Clone, Copy, Debug)]
pub struct LatitudeBand {
    pub letter: u8,
    /// Northing just south of the band's southern edge (metres).
    pub min_northing: f64,
    /// Northern edge (degrees).
    pub north: f64,
    /// Southern edge (degrees).
    pub south: f64,
}

const fn band(letter: u8, min_northing: f64, north: f64, south: f64) -> LatitudeBand {
    LatitudeBand {
        letter,
        min_northing,
        north,
        south,
    }
}

pub const LATITUDE_BANDS: [LatitudeBand; 20] = [
    band(C, 1_100_000.0, -72.0, -80.5),
    band(D, 2_000_000.0, -64.0, -72.0),
    band(E, 2_800_000.0, -56.0, -64.0),
    band(F, 3_700_000.0, -48.0, -56.0),
    band(G, 4_600_000.0, -40.0, -48.0),
    band(H, 5_500_000.0, -32.0, -40.0),
    band(J, 6_400_000.0, -24.0, -32.0),
    band(K, 7_300_000.0, -16.0, -24.0),
    band(L, 8_200_000.0, -8.0, -16.0),
    band(M, 9_100_000.0, 0.0, -8.0),
    band(N, 0.0, 8.0, 0.0),
    band(P, 800_000.0, 16.0, 8.0),
    band(Q, 1_700_000.0, 24.0, 16.0),
    band(R, 2_600_000.0, 32.0, 24.0),
    band(S, 3_500_000.0, 40.0, 32.0),
    band(T, 4_400_000.0, 48.0, 40.0),
    band(U, 5_300_000.0, 56.0, 48.0),
    band(V, 6_200_000.0, 64.0, 56.0),
    band(W, 7_000_000.0, 72.0, 64.0),
    band(X, 7_900_000.0, 84.5, 72.0),
];

/// Band letter for a latitude in radians, or `None` outside the UTM bands.
pub fn band_letter(lat: f64) -> Option<u8> {
    let deg = lat.to_degrees();
    if (72.0..84.5).contains(&deg) {
        Some(X)
    } else if deg > -80.5 && deg < 72.0 {
        // Negative quotients just below -80° truncate into band C.
        let index = ((deg + 80.0) / 8.0 + 1.0e-12) as usize;
        Some(LATITUDE_BANDS[index].letter)
    } else {
        None
    }
}

pub fn latitude_band(letter: u8) -> Option<&'static LatitudeBand> {
    LATITUDE_BANDS.iter().find(|b| b.letter == letter)
}

/// Lettering of one polar grid quadrant.
#[derive(Clone, Copy, Debug)]
pub struct PolarLetters {
    pub letter: u8,
    pub col_low: u8,
    pub col_high: u8,
    pub row_high: u8,
    pub false_easting: f64,
    pub false_northing: f64,
}

pub const POLAR_LETTERS: [PolarLetters; 4] = [
    PolarLetters {
        letter: A,
        col_low: J,
        col_high: Z,
        row_high: Z,
        false_easting: 800_000.0,
        false_northing: 800_000.0,
    },
    PolarLetters {
        letter: B,
        col_low: A,
        col_high: R,
        row_high: Z,
        false_easting: 2_000_000.0,
        false_northing: 800_000.0,
    },
    PolarLetters {
        letter: Y,
        col_low: J,
        col_high: Z,
        row_high: P,
        false_easting: 800_000.0,
        false_northing: 1_300_000.0,
    },
    PolarLetters {
        letter: Z,
        col_low: A,
        col_high: J,
        row_high: P,
        false_easting: 2_000_000.0,
        false_northing: 1_300_000.0,
    },
];

pub fn polar_letters(letter: u8) -> Option<&'static PolarLetters> {
    POLAR_LETTERS.iter().find(|p| p.letter == letter)
}

/// Column letters never used on the polar grids.
pub const POLAR_SKIPPED_COLUMNS: [u8; 6] = [D, E, M, N, V, W];

/// Row lettering scheme of the 100 km squares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterPattern {
    /// Current scheme: row `A` starts at the equator in odd column sets.
    AA,
    /// Legacy scheme kept for Clarke and Bessel based grids.
    AL,
}

impl LetterPattern {
    pub fn for_ellipsoid(ellipsoid: &Ellipsoid) -> Self {
        match ellipsoid.code() {
            Some("CC" | "CD" | "BR" | "BN") => Self::AL,
            _ => Self::AA,
        }
    }
}

/// Column range and row offset for the six-zone lettering cycle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneLetters {
    pub col_low: u8,
    pub col_high: u8,
    pub row_offset: f64,
}

pub fn zone_letters(zone: u8, pattern: LetterPattern) -> ZoneLetters {
    let set = match zone % 6 {
        0 => 6,
        s => s,
    };
    let (col_low, col_high) = match set {
        1 | 4 => (A, H),
        2 | 5 => (J, R),
        _ => (S, Z),
    };
    let even = set % 2 == 0;
    let row_offset = match (pattern, even) {
        (LetterPattern::AA, false) => 0.0,
        (LetterPattern::AA, true) => 500_000.0,
        (LetterPattern::AL, false) => 1_000_000.0,
        (LetterPattern::AL, true) => 1_500_000.0,
    };
    ZoneLetters {
        col_low,
        col_high,
        row_offset,
    }
}
