//! 100 km square lettering: UTM/UPS positions to MGRS references and back.

use crate::coords::{Hemisphere, UpsCoord, UtmCoord};
use crate::error::{MgrsError, Status};
use crate::mgrs::tables::letter::{A, B, C, H, I, J, L, N, O, U, V, Y, Z};
use crate::mgrs::tables::{
    band_letter, latitude_band, polar_letters, zone_letters, LetterPattern, ONE_HT, TWO_MIL,
};
use crate::mgrs::{MgrsReference, MAX_PRECISION};

/// Slack (metres) absorbed before truncating, so a value that is a whole
/// number of cells up to floating-point residue is not pushed one cell down.
const TRUNCATION_SLACK: f64 = 1.0e-6;

/// Absolute grid position decoded from a reference.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GridPosition {
    Utm(UtmCoord),
    Ups(UpsCoord),
}

fn cell_size(precision: u8) -> Result<f64, MgrsError> {
    if precision > MAX_PRECISION {
        return Err(MgrsError::Conversion(Status::PRECISION));
    }
    Ok(10f64.powi((MAX_PRECISION - precision) as i32))
}

/// Round down to the south-west corner of the cell.
fn truncate(value: f64, cell: f64) -> f64 {
    ((value + TRUNCATION_SLACK) / cell).floor() * cell
}

/// Offset within the 100 km square, in cell units.
fn square_digits(value: f64, cell: f64) -> u32 {
    ((value % ONE_HT) / cell).round() as u32
}

impl MgrsReference {
    /// Encode a UTM position. `latitude` (radians) selects the band letter.
    pub fn from_utm(
        zone: u8,
        latitude: f64,
        easting: f64,
        northing: f64,
        precision: u8,
        pattern: LetterPattern,
    ) -> Result<Self, MgrsError> {
        let cell = cell_size(precision)?;
        if !(1..=60).contains(&zone) {
            return Err(MgrsError::Conversion(Status::ZONE));
        }
        let band = band_letter(latitude).ok_or(MgrsError::Conversion(Status::LATITUDE))?;
        let easting = truncate(easting, cell);
        let northing = truncate(northing, cell);
        let zl = zone_letters(zone, pattern);

        let mut grid_northing = northing;
        if grid_northing == 10_000_000.0 {
            grid_northing -= 1.0;
        }
        grid_northing = (grid_northing.rem_euclid(TWO_MIL) + zl.row_offset) % TWO_MIL;
        let mut row = (grid_northing / ONE_HT).floor() as i32;
        if row > H as i32 {
            row += 1;
        }
        if row > N as i32 {
            row += 1;
        }

        let mut grid_easting = easting;
        if band == V && zone == 31 && grid_easting == 500_000.0 {
            grid_easting -= 1.0;
        }
        let mut col = zl.col_low as i32 + (grid_easting / ONE_HT).floor() as i32 - 1;
        if zl.col_low == J && col > N as i32 {
            col += 1;
        }

        let mut status = Status::empty();
        if !(zl.col_low as i32..=zl.col_high as i32).contains(&col) {
            status |= Status::EASTING;
        }
        if !(0..=V as i32).contains(&row) {
            status |= Status::NORTHING;
        }
        if !status.is_empty() {
            return Err(MgrsError::Conversion(status));
        }

        Ok(Self::from_parts(
            Some(zone),
            [band, col as u8, row as u8],
            square_digits(easting, cell),
            square_digits(northing, cell),
            precision,
        ))
    }

    /// Encode a UPS position.
    pub fn from_ups(
        hemisphere: Hemisphere,
        easting: f64,
        northing: f64,
        precision: u8,
    ) -> Result<Self, MgrsError> {
        let cell = cell_size(precision)?;
        let easting = truncate(easting, cell);
        let northing = truncate(northing, cell);

        let east_half = easting >= TWO_MIL;
        let polar = match (hemisphere, east_half) {
            (Hemisphere::North, true) => Z,
            (Hemisphere::North, false) => Y,
            (Hemisphere::South, true) => B,
            (Hemisphere::South, false) => A,
        };
        let pl = polar_letters(polar).ok_or(MgrsError::Conversion(Status::HEMISPHERE))?;

        let mut row = ((northing - pl.false_northing) / ONE_HT).floor() as i32;
        if row > H as i32 {
            row += 1;
        }
        if row > N as i32 {
            row += 1;
        }

        let mut col = pl.col_low as i32 + ((easting - pl.false_easting) / ONE_HT).floor() as i32;
        if east_half {
            if col > C as i32 {
                col += 2;
            }
            if col > H as i32 {
                col += 1;
            }
            if col > L as i32 {
                col += 3;
            }
        } else {
            if col > L as i32 {
                col += 3;
            }
            if col > U as i32 {
                col += 2;
            }
        }

        let mut status = Status::empty();
        if !(pl.col_low as i32..=pl.col_high as i32).contains(&col) {
            status |= Status::EASTING;
        }
        if !(0..=pl.row_high as i32).contains(&row) {
            status |= Status::NORTHING;
        }
        if !status.is_empty() {
            return Err(MgrsError::Conversion(status));
        }

        Ok(Self::from_parts(
            None,
            [polar, col as u8, row as u8],
            square_digits(easting, cell),
            square_digits(northing, cell),
            precision,
        ))
    }

    /// Hemisphere implied by the band or polar letter.
    pub fn hemisphere(&self) -> Hemisphere {
        let band = self.letters()[0];
        match self.zone() {
            Some(_) if band < N => Hemisphere::South,
            Some(_) => Hemisphere::North,
            None if band <= B => Hemisphere::South,
            None => Hemisphere::North,
        }
    }

    /// Absolute UTM easting/northing of the south-west corner of the cell.
    pub fn to_utm(&self, pattern: LetterPattern) -> Result<UtmCoord, MgrsError> {
        let zone = self.zone().ok_or(MgrsError::Conversion(Status::STRING))?;
        let [band, col, row] = self.letters();
        let band = latitude_band(band).ok_or(MgrsError::Conversion(Status::STRING))?;
        let zl = zone_letters(zone, pattern);

        let mut row_index = row as i32;
        if row > O {
            row_index -= 1;
        }
        if row > I {
            row_index -= 1;
        }
        let grid_northing = (row_index as f64 * ONE_HT - zl.row_offset).rem_euclid(TWO_MIL);

        let mut grid_easting = (col as i32 - zl.col_low as i32 + 1) as f64 * ONE_HT;
        if zl.col_low == J && col > O {
            grid_easting -= ONE_HT;
        }

        // Squares repeat every 2000 km; take the first repeat north of the
        // band's minimum northing.
        let mut offset = grid_northing - band.min_northing % TWO_MIL;
        if offset < 0.0 {
            offset += TWO_MIL;
        }
        let northing = band.min_northing + offset;

        let cell = self.resolution();
        Ok(UtmCoord {
            zone,
            hemisphere: self.hemisphere(),
            easting: grid_easting + self.easting_value() as f64 * cell,
            northing: northing + self.northing_value() as f64 * cell,
        })
    }

    /// Absolute UPS easting/northing of the south-west corner of the cell.
    pub fn to_ups(&self) -> Result<UpsCoord, MgrsError> {
        if self.zone().is_some() {
            return Err(MgrsError::Conversion(Status::STRING));
        }
        let [polar, col, row] = self.letters();
        let pl = polar_letters(polar).ok_or(MgrsError::Conversion(Status::STRING))?;

        let mut grid_northing = row as f64 * ONE_HT + pl.false_northing;
        if row > I {
            grid_northing -= ONE_HT;
        }
        if row > O {
            grid_northing -= ONE_HT;
        }

        let mut grid_easting = (col - pl.col_low) as f64 * ONE_HT + pl.false_easting;
        if pl.col_low == A {
            if col > C {
                grid_easting -= 2.0 * ONE_HT;
            }
            if col > I {
                grid_easting -= ONE_HT;
            }
            if col > L {
                grid_easting -= 3.0 * ONE_HT;
            }
        } else {
            if col > L {
                grid_easting -= 3.0 * ONE_HT;
            }
            if col > U {
                grid_easting -= 2.0 * ONE_HT;
            }
        }

        let cell = self.resolution();
        Ok(UpsCoord {
            hemisphere: self.hemisphere(),
            easting: grid_easting + self.easting_value() as f64 * cell,
            northing: grid_northing + self.northing_value() as f64 * cell,
        })
    }

    /// Decode to whichever grid the reference belongs to.
    pub fn to_grid(&self, pattern: LetterPattern) -> Result<GridPosition, MgrsError> {
        if self.is_polar() {
            self.to_ups().map(GridPosition::Ups)
        } else {
            self.to_utm(pattern).map(GridPosition::Utm)
        }
    }
}
