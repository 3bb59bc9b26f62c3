//! Universal Polar Stereographic: range policy and the geodetic <-> UPS
//! conversions built on [`PolarStereographic`].

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use crate::coords::{Geodetic, Hemisphere, UpsCoord};
use crate::error::{check, ConvResult, Converted, MgrsError, Status};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::stereographic::PolarStereographic;
use crate::proj::Projection;
use crate::utm::{MAX_UTM_LAT_DEG, MIN_UTM_LAT_DEG};

/// Lowest latitude accepted for the north polar grid (degrees).
const MIN_NORTH_LAT_DEG: f64 = 83.5;
/// Highest latitude accepted for the south polar grid (degrees).
const MAX_SOUTH_LAT_DEG: f64 = -79.5;

pub const MIN_EAST_NORTH: f64 = 0.0;
pub const MAX_EAST_NORTH: f64 = 4_000_000.0;

fn in_polar_domain(lat: f64) -> bool {
    if lat >= 0.0 {
        (MIN_NORTH_LAT_DEG.to_radians()..=FRAC_PI_2).contains(&lat)
    } else {
        (-FRAC_PI_2..=MAX_SOUTH_LAT_DEG.to_radians()).contains(&lat)
    }
}

/// Latitudes the polar grid accepts but which UTM still covers.
fn overlap_warning(lat: f64) -> Status {
    if (MIN_UTM_LAT_DEG.to_radians()..=MAX_UTM_LAT_DEG.to_radians()).contains(&lat) {
        Status::LATITUDE_WARNING
    } else {
        Status::empty()
    }
}

/// Project a polar geodetic position onto the UPS grid of its pole.
pub fn geodetic_to_ups(ellipsoid: &Ellipsoid, lat: f64, lon: f64) -> ConvResult<UpsCoord> {
    let mut status = Status::empty();
    if !in_polar_domain(lat) {
        status |= Status::LATITUDE;
    }
    if !(-PI..=TAU).contains(&lon) {
        status |= Status::LONGITUDE;
    }
    check(status)?;

    let hemisphere = if lat < 0.0 {
        Hemisphere::South
    } else {
        Hemisphere::North
    };
    let ps = PolarStereographic::ups(ellipsoid, hemisphere);
    let (easting, northing) = ps.forward(lon, lat)?;

    let coord = UpsCoord {
        hemisphere,
        easting,
        northing,
    };
    Ok(Converted::with_status(coord, overlap_warning(lat)))
}

/// Validate primitive UPS inputs, reporting every fault at once.
pub(crate) fn ups_status(hemisphere: char, easting: f64, northing: f64) -> Status {
    let mut status = Status::empty();
    if Hemisphere::from_char(hemisphere).is_none() {
        status |= Status::HEMISPHERE;
    }
    if !(MIN_EAST_NORTH..=MAX_EAST_NORTH).contains(&easting) {
        status |= Status::EASTING;
    }
    if !(MIN_EAST_NORTH..=MAX_EAST_NORTH).contains(&northing) {
        status |= Status::NORTHING;
    }
    status
}

/// Inverse UPS: hemisphere/easting/northing back to latitude/longitude.
pub fn ups_to_geodetic(
    ellipsoid: &Ellipsoid,
    hemisphere: char,
    easting: f64,
    northing: f64,
) -> ConvResult<Geodetic> {
    check(ups_status(hemisphere, easting, northing))?;
    let hemisphere = Hemisphere::from_char(hemisphere)
        .ok_or(MgrsError::Conversion(Status::HEMISPHERE))?;

    let ps = PolarStereographic::ups(ellipsoid, hemisphere);
    let (lon, lat) = ps.inverse(easting, northing)?;

    if !in_polar_domain(lat) {
        return Err(MgrsError::Conversion(Status::LATITUDE));
    }
    Ok(Converted::with_status(Geodetic::new(lat, lon), overlap_warning(lat)))
}
