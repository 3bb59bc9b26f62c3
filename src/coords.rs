//! Coordinate value types shared by the projectors, the MGRS grid and the dispatcher.
//!
//! Angles are radians throughout; projected values are metres.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// Parse the single-letter hemisphere designator (`N`/`S`, either case).
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'S' => Some(Self::South),
            _ => None,
        }
    }

    pub fn as_char(self) -> char {
        match self {
            Self::North => 'N',
            Self::South => 'S',
        }
    }

    /// Hemisphere of a latitude; values a hair below zero count as north.
    pub fn of_latitude(lat: f64) -> Self {
        if lat < -1.0e-9 {
            Self::South
        } else {
            Self::North
        }
    }

    pub fn is_north(self) -> bool {
        self == Self::North
    }
}

impl fmt::Display for Hemisphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// Latitude/longitude on the reference ellipsoid, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Geodetic {
    pub lat: f64,
    pub lon: f64,
}

impl Geodetic {
    pub fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn from_degrees(lat: f64, lon: f64) -> Self {
        Self {
            lat: lat.to_radians(),
            lon: lon.to_radians(),
        }
    }

    /// (lat, lon) in degrees.
    pub fn to_degrees(self) -> (f64, f64) {
        (self.lat.to_degrees(), self.lon.to_degrees())
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UtmCoord {
    pub zone: u8,
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
}

impl fmt::Display for UtmCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{} {:.3} {:.3}",
            self.zone, self.hemisphere, self.easting, self.northing
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UpsCoord {
    pub hemisphere: Hemisphere,
    pub easting: f64,
    pub northing: f64,
}

impl fmt::Display for UpsCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:.3} {:.3}",
            self.hemisphere, self.easting, self.northing
        )
    }
}
