//! Universal Transverse Mercator: zone selection, range policy and the
//! geodetic <-> UTM conversions built on [`TransverseMercator`].

use crate::coords::{Geodetic, Hemisphere, UtmCoord};
use crate::error::{check, ConvResult, Converted, MgrsError, Status};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::transverse_mercator::TransverseMercator;
use crate::proj::Projection;

/// Southern limit of the MGRS/UTM latitude bands (degrees).
pub const MIN_UTM_LAT_DEG: f64 = -80.0;
/// Northern limit of the MGRS/UTM latitude bands (degrees).
pub const MAX_UTM_LAT_DEG: f64 = 84.0;
/// Hard projection limits; the half degree beyond the bands overlaps UPS.
const MIN_LAT_DEG: f64 = -80.5;
const MAX_LAT_DEG: f64 = 84.5;

pub const MIN_EASTING: f64 = 100_000.0;
pub const MAX_EASTING: f64 = 900_000.0;
pub const MIN_NORTHING: f64 = 0.0;
pub const MAX_NORTHING: f64 = 10_000_000.0;

/// A latitude/longitude window in degrees where the zone width is irregular.
struct ZoneException {
    lat_min: f64,
    lat_max: f64,
    lon_min: f64,
    lon_max: f64,
    zone: u8,
}

/// Norway (band V) and Svalbard (band X) exceptions. Ranges are half-open.
const IRREGULAR_ZONES: [ZoneException; 6] = [
    ZoneException { lat_min: 56.0, lat_max: 64.0, lon_min: 0.0, lon_max: 3.0, zone: 31 },
    ZoneException { lat_min: 56.0, lat_max: 64.0, lon_min: 3.0, lon_max: 12.0, zone: 32 },
    ZoneException { lat_min: 72.0, lat_max: 90.0, lon_min: 0.0, lon_max: 9.0, zone: 31 },
    ZoneException { lat_min: 72.0, lat_max: 90.0, lon_min: 9.0, lon_max: 21.0, zone: 33 },
    ZoneException { lat_min: 72.0, lat_max: 90.0, lon_min: 21.0, lon_max: 33.0, zone: 35 },
    ZoneException { lat_min: 72.0, lat_max: 90.0, lon_min: 33.0, lon_max: 42.0, zone: 37 },
];

/// UTM zone for a position given in degrees, honouring the irregular zones.
pub fn zone_for(lat_deg: f64, lon_deg: f64) -> u8 {
    let mut lon = lon_deg % 360.0;
    if lon >= 180.0 {
        lon -= 360.0;
    } else if lon < -180.0 {
        lon += 360.0;
    }

    let mut zone = ((lon + 180.0) / 6.0).floor() as i64 + 1;
    if zone > 60 {
        zone = 1;
    }

    IRREGULAR_ZONES
        .iter()
        .find(|x| {
            (x.lat_min..x.lat_max).contains(&lat_deg) && (x.lon_min..x.lon_max).contains(&lon)
        })
        .map_or(zone as u8, |x| x.zone)
}

/// Project a geodetic position into its standard UTM zone.
pub fn geodetic_to_utm(ellipsoid: &Ellipsoid, lat: f64, lon: f64) -> ConvResult<UtmCoord> {
    check(geodetic_status(lat, lon))?;
    let zone = zone_for(lat.to_degrees(), lon.to_degrees());
    project(ellipsoid, lat, lon, zone)
}

/// Project a geodetic position into an explicitly chosen UTM zone.
pub fn geodetic_to_utm_in_zone(
    ellipsoid: &Ellipsoid,
    lat: f64,
    lon: f64,
    zone: u8,
) -> ConvResult<UtmCoord> {
    let mut status = geodetic_status(lat, lon);
    if !(1..=60).contains(&zone) {
        status |= Status::ZONE;
    }
    check(status)?;
    project(ellipsoid, lat, lon, zone)
}

fn geodetic_status(lat: f64, lon: f64) -> Status {
    let mut status = Status::empty();
    if !(MIN_LAT_DEG.to_radians()..=MAX_LAT_DEG.to_radians()).contains(&lat) {
        status |= Status::LATITUDE;
    }
    if !(-std::f64::consts::PI..=std::f64::consts::TAU).contains(&lon) {
        status |= Status::LONGITUDE;
    }
    status
}

fn project(ellipsoid: &Ellipsoid, lat: f64, lon: f64, zone: u8) -> ConvResult<UtmCoord> {
    let lat = if (-1.0e-9..0.0).contains(&lat) { 0.0 } else { lat };
    let hemisphere = Hemisphere::of_latitude(lat);

    let tm = TransverseMercator::utm_zone(ellipsoid, zone, hemisphere);
    let (easting, northing) = tm.forward(lon, lat)?;

    let mut status = Status::empty();
    if !(MIN_EASTING..=MAX_EASTING).contains(&easting) {
        status |= Status::EASTING;
    }
    if !(MIN_NORTHING..=MAX_NORTHING).contains(&northing) {
        status |= Status::NORTHING;
    }
    check(status)?;

    let coord = UtmCoord {
        zone,
        hemisphere,
        easting,
        northing,
    };
    Ok(Converted::with_status(coord, band_warning(lat)))
}

fn band_warning(lat: f64) -> Status {
    if (MIN_UTM_LAT_DEG.to_radians()..=MAX_UTM_LAT_DEG.to_radians()).contains(&lat) {
        Status::empty()
    } else {
        Status::LATITUDE_WARNING
    }
}

/// Validate primitive UTM inputs, reporting every fault at once.
pub(crate) fn utm_status(zone: i32, hemisphere: char, easting: f64, northing: f64) -> Status {
    let mut status = Status::empty();
    if !(1..=60).contains(&zone) {
        status |= Status::ZONE;
    }
    if Hemisphere::from_char(hemisphere).is_none() {
        status |= Status::HEMISPHERE;
    }
    if !(MIN_EASTING..=MAX_EASTING).contains(&easting) {
        status |= Status::EASTING;
    }
    if !(MIN_NORTHING..=MAX_NORTHING).contains(&northing) {
        status |= Status::NORTHING;
    }
    status
}

/// Inverse UTM: zone/hemisphere/easting/northing back to latitude/longitude.
pub fn utm_to_geodetic(
    ellipsoid: &Ellipsoid,
    zone: i32,
    hemisphere: char,
    easting: f64,
    northing: f64,
) -> ConvResult<Geodetic> {
    check(utm_status(zone, hemisphere, easting, northing))?;
    let hemisphere = Hemisphere::from_char(hemisphere)
        .ok_or(MgrsError::Conversion(Status::HEMISPHERE))?;

    let tm = TransverseMercator::utm_zone(ellipsoid, zone as u8, hemisphere);
    let (lon, lat) = tm.inverse(easting, northing)?;

    if !(MIN_LAT_DEG.to_radians()..=MAX_LAT_DEG.to_radians()).contains(&lat) {
        return Err(MgrsError::Conversion(Status::NORTHING));
    }
    Ok(Converted::with_status(Geodetic::new(lat, lon), band_warning(lat)))
}
