//! Conversion dispatcher: the public entry points tying geodetic, UTM, UPS
//! and MGRS together.
//!
//! Positions beyond 80°S / 84°N use the polar grid; everything else,
//! including the two limits themselves, goes through UTM.

use std::f64::consts::{FRAC_PI_2, PI, TAU};

use tracing::trace;

use crate::context;
use crate::coords::{Geodetic, Hemisphere, UpsCoord, UtmCoord};
use crate::error::{check, ConvResult, Converted, MgrsError, Status};
use crate::mgrs::tables::{latitude_band, LetterPattern};
use crate::mgrs::{MgrsReference, MAX_PRECISION};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::transverse_mercator::UTM_FALSE_EASTING;
use crate::ups;
use crate::utm::{self, MAX_UTM_LAT_DEG, MIN_UTM_LAT_DEG};

/// Norway exception window re-projected out of zone 31 on encode.
const ZONE_31V_LAT_DEG: (f64, f64) = (56.0, 64.0);
const ZONE_31V_EAST_EDGE_DEG: f64 = 3.0;

/// Converter bound to one ellipsoid.
///
/// Cheap to clone and safe to share across threads; every method is a pure
/// function of its arguments and the ellipsoid captured at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Converter {
    ellipsoid: Ellipsoid,
    pattern: LetterPattern,
}

impl Default for Converter {
    fn default() -> Self {
        Self::wgs84()
    }
}

fn precision_status(precision: i32) -> Status {
    if (0..=MAX_PRECISION as i32).contains(&precision) {
        Status::empty()
    } else {
        Status::PRECISION
    }
}

fn hemisphere_char(hemisphere: char) -> Result<Hemisphere, MgrsError> {
    Hemisphere::from_char(hemisphere).ok_or(MgrsError::Conversion(Status::HEMISPHERE))
}

/// Latitude used to pick the band letter, kept on the projected hemisphere's
/// side of the equator.
fn band_latitude(lat: f64, hemisphere: Hemisphere) -> f64 {
    match hemisphere {
        Hemisphere::North => lat.max(0.0),
        Hemisphere::South => lat.min(-1.0e-12),
    }
}

fn uses_polar_grid(lat: f64) -> bool {
    lat < MIN_UTM_LAT_DEG.to_radians() || lat > MAX_UTM_LAT_DEG.to_radians()
}

impl Converter {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        let pattern = LetterPattern::for_ellipsoid(&ellipsoid);
        Self { ellipsoid, pattern }
    }

    pub fn wgs84() -> Self {
        Self::new(Ellipsoid::default())
    }

    /// Snapshot of the process-wide ellipsoid (WGS84 unless reconfigured).
    pub fn current() -> Self {
        Self::new(context::ellipsoid_parameters())
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    pub fn letter_pattern(&self) -> LetterPattern {
        self.pattern
    }

    /// Geodetic (radians) to an MGRS reference with `precision` digit pairs.
    pub fn geodetic_to_reference(
        &self,
        lat: f64,
        lon: f64,
        precision: i32,
    ) -> ConvResult<MgrsReference> {
        let mut status = precision_status(precision);
        if !(-FRAC_PI_2..=FRAC_PI_2).contains(&lat) {
            status |= Status::LATITUDE;
        }
        if !(-PI..=TAU).contains(&lon) {
            status |= Status::LONGITUDE;
        }
        check(status)?;
        let precision = precision as u8;

        if uses_polar_grid(lat) {
            trace!(lat, lon, "geodetic position routed to UPS");
            let ups = ups::geodetic_to_ups(&self.ellipsoid, lat, lon)?;
            let UpsCoord {
                hemisphere,
                easting,
                northing,
            } = ups.value;
            let reference = MgrsReference::from_ups(hemisphere, easting, northing, precision)
                .map_err(|e| e.with(ups.status))?;
            Ok(Converted::with_status(reference, ups.status))
        } else {
            trace!(lat, lon, "geodetic position routed to UTM");
            let utm = utm::geodetic_to_utm(&self.ellipsoid, lat, lon)?;
            let UtmCoord {
                zone,
                hemisphere,
                easting,
                northing,
            } = utm.value;
            let band_lat = band_latitude(lat, hemisphere);
            let reference =
                MgrsReference::from_utm(zone, band_lat, easting, northing, precision, self.pattern)
                    .map_err(|e| e.with(utm.status))?;
            Ok(Converted::with_status(reference, utm.status))
        }
    }

    pub fn geodetic_to_mgrs(&self, lat: f64, lon: f64, precision: i32) -> ConvResult<String> {
        self.geodetic_to_reference(lat, lon, precision)
            .map(|r| r.map(|m| m.to_string()))
    }

    /// Geodetic position of the centre of the referenced cell.
    pub fn mgrs_to_geodetic(&self, mgrs: &str) -> ConvResult<Geodetic> {
        let reference: MgrsReference = mgrs.parse()?;
        self.reference_to_geodetic(&reference)
    }

    pub fn reference_to_geodetic(&self, reference: &MgrsReference) -> ConvResult<Geodetic> {
        let half = reference.resolution() / 2.0;
        if reference.is_polar() {
            let ups = reference.to_ups()?;
            ups::ups_to_geodetic(
                &self.ellipsoid,
                ups.hemisphere.as_char(),
                ups.easting + half,
                ups.northing + half,
            )
        } else {
            let utm = self.reference_to_utm(reference)?;
            let UtmCoord {
                zone,
                hemisphere,
                easting,
                northing,
            } = utm.value;
            let geo = utm::utm_to_geodetic(
                &self.ellipsoid,
                i32::from(zone),
                hemisphere.as_char(),
                easting + half,
                northing + half,
            )
            .map_err(|e| e.with(utm.status))?;
            Ok(Converted::with_status(geo.value, geo.status | utm.status))
        }
    }

    /// UTM to MGRS. The band letter comes from the inverse-projected latitude.
    pub fn utm_to_mgrs(
        &self,
        zone: i32,
        hemisphere: char,
        easting: f64,
        northing: f64,
        precision: i32,
    ) -> ConvResult<String> {
        check(utm::utm_status(zone, hemisphere, easting, northing) | precision_status(precision))?;
        let geo = utm::utm_to_geodetic(&self.ellipsoid, zone, hemisphere, easting, northing)?;
        let Geodetic { lat, lon } = geo.value;

        let (lat_deg, lon_deg) = geo.value.to_degrees();
        let in_31v = (ZONE_31V_LAT_DEG.0..ZONE_31V_LAT_DEG.1).contains(&lat_deg)
            && (lon_deg >= ZONE_31V_EAST_EDGE_DEG || easting >= UTM_FALSE_EASTING);
        let band_lat = band_latitude(lat, hemisphere_char(hemisphere)?);
        let (zone, easting, northing, status) = if zone == 31 && in_31v {
            trace!(lat_deg, lon_deg, "re-projecting 31V position into zone 32");
            let utm = utm::geodetic_to_utm_in_zone(&self.ellipsoid, lat, lon, 32)
                .map_err(|e| e.with(geo.status))?;
            (32, utm.value.easting, utm.value.northing, geo.status | utm.status)
        } else {
            (zone as u8, easting, northing, geo.status)
        };

        let reference = MgrsReference::from_utm(
            zone,
            band_lat,
            easting,
            northing,
            precision as u8,
            self.pattern,
        )
        .map_err(|e| e.with(status))?;
        Ok(Converted::with_status(reference.to_string(), status))
    }

    pub fn mgrs_to_utm(&self, mgrs: &str) -> ConvResult<UtmCoord> {
        let reference: MgrsReference = mgrs.parse()?;
        if reference.is_polar() {
            trace!(mgrs, "polar reference converted to UTM through geodetic");
            let geo = self.reference_to_geodetic(&reference)?;
            let utm = utm::geodetic_to_utm(&self.ellipsoid, geo.value.lat, geo.value.lon)
                .map_err(|e| e.with(geo.status))?;
            return Ok(Converted::with_status(utm.value, utm.status | geo.status));
        }
        self.reference_to_utm(&reference)
    }

    /// Absolute UTM position of a zoned reference, flagging positions that
    /// fall outside the band letter's latitude range.
    fn reference_to_utm(&self, reference: &MgrsReference) -> ConvResult<UtmCoord> {
        let utm = reference.to_utm(self.pattern)?;
        let geo = utm::utm_to_geodetic(
            &self.ellipsoid,
            i32::from(utm.zone),
            utm.hemisphere.as_char(),
            utm.easting,
            utm.northing,
        )?;

        let band = reference.letters()[0];
        let band = latitude_band(band).ok_or(MgrsError::Conversion(Status::STRING))?;
        let slack = 1.0 / 10f64.powi(i32::from(reference.precision()));
        let lat_deg = geo.value.lat.to_degrees();
        let status = if (band.south - slack..=band.north + slack).contains(&lat_deg) {
            Status::empty()
        } else {
            Status::LATITUDE_WARNING
        };
        Ok(Converted::with_status(utm, status))
    }

    pub fn ups_to_mgrs(
        &self,
        hemisphere: char,
        easting: f64,
        northing: f64,
        precision: i32,
    ) -> ConvResult<String> {
        check(ups::ups_status(hemisphere, easting, northing) | precision_status(precision))?;
        // Only positions that invert into the polar caps get polar letters.
        let geo = ups::ups_to_geodetic(&self.ellipsoid, hemisphere, easting, northing)?;
        let hemisphere = hemisphere_char(hemisphere)?;
        let reference = MgrsReference::from_ups(hemisphere, easting, northing, precision as u8)
            .map_err(|e| e.with(geo.status))?;
        Ok(Converted::with_status(reference.to_string(), geo.status))
    }

    pub fn mgrs_to_ups(&self, mgrs: &str) -> ConvResult<UpsCoord> {
        let reference: MgrsReference = mgrs.parse()?;
        if reference.is_polar() {
            return reference.to_ups().map(Converted::new);
        }
        trace!(mgrs, "zoned reference converted to UPS through geodetic");
        let geo = self.reference_to_geodetic(&reference)?;
        let ups = ups::geodetic_to_ups(&self.ellipsoid, geo.value.lat, geo.value.lon)
            .map_err(|e| e.with(geo.status))?;
        Ok(Converted::with_status(ups.value, ups.status | geo.status))
    }

    pub fn utm_to_geodetic(
        &self,
        zone: i32,
        hemisphere: char,
        easting: f64,
        northing: f64,
    ) -> ConvResult<Geodetic> {
        utm::utm_to_geodetic(&self.ellipsoid, zone, hemisphere, easting, northing)
    }

    pub fn ups_to_geodetic(&self, hemisphere: char, easting: f64, northing: f64) -> ConvResult<Geodetic> {
        ups::ups_to_geodetic(&self.ellipsoid, hemisphere, easting, northing)
    }

    pub fn geodetic_to_utm(&self, lat: f64, lon: f64) -> ConvResult<UtmCoord> {
        utm::geodetic_to_utm(&self.ellipsoid, lat, lon)
    }

    pub fn geodetic_to_ups(&self, lat: f64, lon: f64) -> ConvResult<UpsCoord> {
        ups::geodetic_to_ups(&self.ellipsoid, lat, lon)
    }
}
