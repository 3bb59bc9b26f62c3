//! Polar Stereographic projection, scale-at-pole variant (UPS).
//!
//! Easting grows toward 90°E in both hemispheres; northing grows toward the
//! Greenwich meridian in the south and away from it in the north.

use crate::coords::Hemisphere;
use crate::error::{MgrsError, Status};
use crate::proj::common::{phi_from_ts, tsfn, wrap_lon};
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::Projection;

/// UPS scale factor at the pole.
pub const UPS_K0: f64 = 0.994;
/// UPS false easting and false northing (metres).
pub const UPS_FALSE_ORIGIN: f64 = 2_000_000.0;

pub struct PolarStereographic {
    e: f64,
    lon0: f64,
    hemisphere: Hemisphere,
    false_easting: f64,
    false_northing: f64,
    /// `ρ = rho_per_t * t(φ)`
    rho_per_t: f64,
}

impl PolarStereographic {
    /// Create a Polar Stereographic with the scale factor `k0` fixed at the pole.
    pub fn new(
        ellipsoid: &Ellipsoid,
        hemisphere: Hemisphere,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let e = ellipsoid.eccentricity();
        let pole_factor = ((1.0 + e).powf(1.0 + e) * (1.0 - e).powf(1.0 - e)).sqrt();
        Self {
            e,
            lon0,
            hemisphere,
            false_easting,
            false_northing,
            rho_per_t: 2.0 * k0 * ellipsoid.a / pole_factor,
        }
    }

    /// Universal Polar Stereographic for one pole.
    pub fn ups(ellipsoid: &Ellipsoid, hemisphere: Hemisphere) -> Self {
        Self::new(
            ellipsoid,
            hemisphere,
            0.0,
            UPS_K0,
            UPS_FALSE_ORIGIN,
            UPS_FALSE_ORIGIN,
        )
    }
}

impl Projection for PolarStereographic {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), MgrsError> {
        let (lat_adj, sign) = match self.hemisphere {
            Hemisphere::North => (lat, 1.0),
            Hemisphere::South => (-lat, -1.0),
        };

        let rho = self.rho_per_t * tsfn(lat_adj, self.e);
        let (sin_l, cos_l) = wrap_lon(lon - self.lon0).sin_cos();

        let x = self.false_easting + rho * sin_l;
        let y = self.false_northing - sign * rho * cos_l;

        if !(x.is_finite() && y.is_finite()) {
            return Err(MgrsError::Conversion(Status::LATITUDE));
        }
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), MgrsError> {
        let dx = x - self.false_easting;
        let dy = y - self.false_northing;

        let rho = dx.hypot(dy);
        if rho == 0.0 {
            let lat = match self.hemisphere {
                Hemisphere::North => std::f64::consts::FRAC_PI_2,
                Hemisphere::South => -std::f64::consts::FRAC_PI_2,
            };
            return Ok((self.lon0, lat));
        }

        let lat_adj = phi_from_ts(rho / self.rho_per_t, self.e);

        let (lon, lat) = match self.hemisphere {
            Hemisphere::North => (dx.atan2(-dy), lat_adj),
            Hemisphere::South => (dx.atan2(dy), -lat_adj),
        };

        if !lat.is_finite() {
            return Err(MgrsError::Conversion(Status::EASTING | Status::NORTHING));
        }
        Ok((wrap_lon(self.lon0 + lon), lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_ups_roundtrip_both_caps() {
        let north = PolarStereographic::ups(&WGS84, Hemisphere::North);
        let south = PolarStereographic::ups(&WGS84, Hemisphere::South);
        let cases = [(-45.0, 85.0), (0.0, 88.0), (90.0, 84.5), (179.0, 86.0), (0.0, -85.0), (90.0, -80.5), (-120.0, -88.0)];
        for (lon_deg, lat_deg) in cases {
            let proj = if lat_deg > 0.0 { &north } else { &south };
            let (lon, lat) = (f64::to_radians(lon_deg), f64::to_radians(lat_deg));
            let (x, y) = proj.forward(lon, lat).unwrap();
            let (lon2, lat2) = proj.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_poles_at_false_origin() {
        let north = PolarStereographic::ups(&WGS84, Hemisphere::North);
        let (x, y) = north.forward(0.0, FRAC_PI_2).unwrap();
        assert_relative_eq!(x, 2_000_000.0, epsilon = 1e-6);
        assert_relative_eq!(y, 2_000_000.0, epsilon = 1e-6);

        let south = PolarStereographic::ups(&WGS84, Hemisphere::South);
        let (lon, lat) = south.inverse(2_000_000.0, 2_000_000.0).unwrap();
        assert_eq!(lon, 0.0);
        assert_eq!(lat, -FRAC_PI_2);
    }

    #[test]
    fn test_axis_orientation() {
        // 90°E lies east of the pole in both hemispheres.
        let north = PolarStereographic::ups(&WGS84, Hemisphere::North);
        let (x, _) = north.forward(90.0_f64.to_radians(), 85.0_f64.to_radians()).unwrap();
        assert!(x > 2_000_000.0);
        let south = PolarStereographic::ups(&WGS84, Hemisphere::South);
        let (x, _) = south.forward(90.0_f64.to_radians(), (-85.0_f64).to_radians()).unwrap();
        assert!(x > 2_000_000.0);

        // Greenwich: north of the pole in the south, south of the pole in the north.
        let (_, y) = north.forward(0.0, 85.0_f64.to_radians()).unwrap();
        assert!(y < 2_000_000.0);
        let (_, y) = south.forward(0.0, (-85.0_f64).to_radians()).unwrap();
        assert!(y > 2_000_000.0);
    }

    #[test]
    fn test_scale_at_pole() {
        // A small step away from the pole scales by k0 = 0.994.
        let proj = PolarStereographic::ups(&WGS84, Hemisphere::North);
        let dlat = 1e-6_f64;
        let (_, y) = proj.forward(0.0, FRAC_PI_2 - dlat).unwrap();
        let rho = 2_000_000.0 - y;
        // Meridian radius of curvature at the pole: a / sqrt(1 - e²)
        let m_pole = WGS84.a / (1.0 - WGS84.e2).sqrt();
        assert_relative_eq!(rho / (m_pole * dlat), UPS_K0, epsilon = 1e-6);
    }
}
