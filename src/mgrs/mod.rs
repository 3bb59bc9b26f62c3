//! MGRS references: parsing, rendering and the grid encoder/decoder.

pub mod grid;
pub mod tables;

use std::fmt;
use std::str::FromStr;

use crate::error::{MgrsError, Status};
use tables::letter::{self, I, O, X};
use tables::{latitude_band, polar_letters, zone_letters, LetterPattern, POLAR_SKIPPED_COLUMNS};

pub use grid::GridPosition;

/// Finest precision: five digit pairs, one metre.
pub const MAX_PRECISION: u8 = 5;

/// A parsed or freshly encoded MGRS reference.
///
/// Letters are stored as alphabet indices; the numeric part is kept as the
/// integer value of each digit half, together with the number of digits.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MgrsReference {
    zone: Option<u8>,
    letters: [u8; 3],
    easting: u32,
    northing: u32,
    precision: u8,
}

impl MgrsReference {
    pub(crate) fn from_parts(
        zone: Option<u8>,
        letters: [u8; 3],
        easting: u32,
        northing: u32,
        precision: u8,
    ) -> Self {
        Self {
            zone,
            letters,
            easting,
            northing,
            precision,
        }
    }

    /// UTM zone number, `None` for polar references.
    pub fn zone(&self) -> Option<u8> {
        self.zone
    }

    pub fn is_polar(&self) -> bool {
        self.zone.is_none()
    }

    /// Latitude band letter (UTM) or polar letter (UPS).
    pub fn band(&self) -> char {
        letter::to_char(self.letters[0])
    }

    /// The two-letter 100 km square identifier.
    pub fn square(&self) -> String {
        self.letters[1..].iter().map(|&l| letter::to_char(l)).collect()
    }

    /// Zone number and band letter, e.g. `"48P"` or `"Z"`.
    pub fn grid_zone_designator(&self) -> String {
        match self.zone {
            Some(zone) => format!("{zone:02}{}", self.band()),
            None => self.band().to_string(),
        }
    }

    /// Number of digit pairs (0 = 100 km, 5 = 1 m).
    pub fn precision(&self) -> u8 {
        self.precision
    }

    /// Easting within the square, in units of `10^(5 - precision)` metres.
    pub fn easting_value(&self) -> u32 {
        self.easting
    }

    /// Northing within the square, in units of `10^(5 - precision)` metres.
    pub fn northing_value(&self) -> u32 {
        self.northing
    }

    pub fn easting_digits(&self) -> String {
        pad_digits(self.easting, self.precision)
    }

    pub fn northing_digits(&self) -> String {
        pad_digits(self.northing, self.precision)
    }

    /// Metres represented by one unit of the numeric part.
    pub fn resolution(&self) -> f64 {
        10f64.powi(MAX_PRECISION as i32 - self.precision as i32)
    }

    pub(crate) fn letters(&self) -> [u8; 3] {
        self.letters
    }
}

fn pad_digits(value: u32, precision: u8) -> String {
    if precision == 0 {
        String::new()
    } else {
        format!("{:0width$}", value, width = precision as usize)
    }
}

impl fmt::Display for MgrsReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}",
            self.grid_zone_designator(),
            self.square(),
            self.easting_digits(),
            self.northing_digits()
        )
    }
}

fn malformed() -> MgrsError {
    MgrsError::Conversion(Status::STRING)
}

impl FromStr for MgrsReference {
    type Err = MgrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let bytes = s.as_bytes();

        let zone_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
        let zone = match zone_len {
            0 => None,
            1 | 2 => {
                let zone: u8 = s[..zone_len].parse().map_err(|_| malformed())?;
                if !(1..=60).contains(&zone) {
                    return Err(malformed());
                }
                Some(zone)
            }
            _ => return Err(malformed()),
        };

        let rest = &bytes[zone_len..];
        let letter_len = rest.iter().take_while(|b| b.is_ascii_alphabetic()).count();
        if letter_len != 3 {
            return Err(malformed());
        }
        let mut letters = [0u8; 3];
        for (slot, b) in letters.iter_mut().zip(&rest[..3]) {
            let index = b.to_ascii_uppercase() - b'A';
            if index == I || index == O {
                return Err(malformed());
            }
            *slot = index;
        }

        let tail = &rest[3..];
        if tail.len() > 2 * MAX_PRECISION as usize
            || tail.len() % 2 != 0
            || !tail.iter().all(u8::is_ascii_digit)
        {
            return Err(malformed());
        }
        let precision = tail.len() / 2;
        let easting = digits_value(&tail[..precision]);
        let northing = digits_value(&tail[precision..]);

        let reference = Self::from_parts(zone, letters, easting, northing, precision as u8);
        reference.check_letters()?;
        Ok(reference)
    }
}

fn digits_value(digits: &[u8]) -> u32 {
    digits
        .iter()
        .fold(0, |acc, d| acc * 10 + u32::from(d - b'0'))
}

impl MgrsReference {
    /// Reject letter combinations the grid never produces.
    fn check_letters(&self) -> Result<(), MgrsError> {
        let [band, col, row] = self.letters;
        let consistent = match self.zone {
            Some(zone) => {
                // Column sets do not depend on the row pattern.
                let zl = zone_letters(zone, LetterPattern::AA);
                latitude_band(band).is_some()
                    && !(band == X && matches!(zone, 32 | 34 | 36))
                    && (zl.col_low..=zl.col_high).contains(&col)
                    && row <= letter::V
            }
            None => polar_letters(band).is_some_and(|p| {
                (p.col_low..=p.col_high).contains(&col)
                    && !POLAR_SKIPPED_COLUMNS.contains(&col)
                    && row <= p.row_high
            }),
        };
        if consistent {
            Ok(())
        } else {
            Err(malformed())
        }
    }
}
