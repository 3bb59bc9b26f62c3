//! Transverse Mercator on the ellipsoid, the projection behind every UTM zone.
//!
//! Uses Krüger's series in the third flattening `n`, carried to sixth order.
//! The trigonometric sums are evaluated with Clenshaw's recurrence on the
//! complex argument `ζ = ξ + iη`, so each point costs one `sin_cos` and one
//! `sinh`/`cosh` pair regardless of the series length.

use crate::coords::Hemisphere;
use crate::error::{MgrsError, Status};
use crate::proj::common::wrap_lon;
use crate::proj::ellipsoid::Ellipsoid;
use crate::proj::Projection;

/// UTM central scale factor.
pub const UTM_K0: f64 = 0.9996;
/// UTM false easting (metres).
pub const UTM_FALSE_EASTING: f64 = 500_000.0;
/// False northing applied in the southern hemisphere (metres).
pub const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

const ORDER: usize = 6;

// Row j lists the coefficients of n^(j+1), n^(j+2), ... for the j-th term.
const ALPHA: [&[f64]; ORDER] = [
    &[1.0 / 2.0, -2.0 / 3.0, 5.0 / 16.0, 41.0 / 180.0, -127.0 / 288.0, 7891.0 / 37800.0],
    &[13.0 / 48.0, -3.0 / 5.0, 557.0 / 1440.0, 281.0 / 630.0, -1983433.0 / 1935360.0],
    &[61.0 / 240.0, -103.0 / 140.0, 15061.0 / 26880.0, 167603.0 / 181440.0],
    &[49561.0 / 161280.0, -179.0 / 168.0, 6601661.0 / 7257600.0],
    &[34729.0 / 80640.0, -3418889.0 / 1995840.0],
    &[212378941.0 / 319334400.0],
];

const BETA: [&[f64]; ORDER] = [
    &[1.0 / 2.0, -2.0 / 3.0, 37.0 / 96.0, -1.0 / 360.0, -81.0 / 512.0, 96199.0 / 604800.0],
    &[1.0 / 48.0, 1.0 / 15.0, -437.0 / 1440.0, 46.0 / 105.0, -1118711.0 / 3870720.0],
    &[17.0 / 480.0, -37.0 / 840.0, -209.0 / 4480.0, 5569.0 / 90720.0],
    &[4397.0 / 161280.0, -11.0 / 504.0, -830251.0 / 7257600.0],
    &[4583.0 / 161280.0, -108847.0 / 3991680.0],
    &[20648693.0 / 638668800.0],
];

/// A single Transverse Mercator zone with the origin latitude on the equator.
#[derive(Debug, Clone)]
pub struct TransverseMercator {
    lon0: f64,
    false_easting: f64,
    false_northing: f64,
    /// `k0` times the rectifying radius.
    scale: f64,
    ecc: f64,
    one_minus_e2: f64,
    alpha: [f64; ORDER],
    beta: [f64; ORDER],
}

impl TransverseMercator {
    pub fn new(
        ellipsoid: &Ellipsoid,
        lon0: f64,
        k0: f64,
        false_easting: f64,
        false_northing: f64,
    ) -> Self {
        let n = ellipsoid.n;
        let n2 = n * n;
        let rectifying_radius = ellipsoid.a / (1.0 + n) * (1.0 + n2 * (0.25 + n2 / 64.0));
        Self {
            lon0,
            false_easting,
            false_northing,
            scale: k0 * rectifying_radius,
            ecc: ellipsoid.eccentricity(),
            one_minus_e2: 1.0 - ellipsoid.e2,
            alpha: series(&ALPHA, n),
            beta: series(&BETA, n),
        }
    }

    /// The projection for one UTM zone.
    pub fn utm_zone(ellipsoid: &Ellipsoid, zone: u8, hemisphere: Hemisphere) -> Self {
        let false_northing = match hemisphere {
            Hemisphere::North => 0.0,
            Hemisphere::South => UTM_FALSE_NORTHING_SOUTH,
        };
        Self::new(
            ellipsoid,
            central_meridian(zone),
            UTM_K0,
            UTM_FALSE_EASTING,
            false_northing,
        )
    }

    pub fn lon0(&self) -> f64 {
        self.lon0
    }

    /// tan of the conformal latitude for a given tan of the geodetic latitude.
    fn conformal_tan(&self, tau: f64) -> f64 {
        let sec = tau.hypot(1.0);
        let sig = (self.ecc * (self.ecc * tau / sec).atanh()).sinh();
        tau * sig.hypot(1.0) - sig * sec
    }

    /// Newton inversion of [`Self::conformal_tan`].
    fn geodetic_tan(&self, tau_c: f64) -> f64 {
        let mut tau = tau_c / self.one_minus_e2;
        for _ in 0..8 {
            let est = self.conformal_tan(tau);
            let slope = self.one_minus_e2 * tau.hypot(1.0) * est.hypot(1.0)
                / (1.0 + self.one_minus_e2 * tau * tau);
            let step = (tau_c - est) / slope;
            tau += step;
            if step.abs() <= 1e-14 * tau.abs().max(1.0) {
                break;
            }
        }
        tau
    }
}

/// Evaluate each coefficient row as `n^(j+1) * poly(n)` in Horner form.
fn series(rows: &[&[f64]; ORDER], n: f64) -> [f64; ORDER] {
    let mut out = [0.0; ORDER];
    let mut power = n;
    for (slot, row) in out.iter_mut().zip(rows) {
        *slot = power * row.iter().rev().fold(0.0, |acc, &c| acc * n + c);
        power *= n;
    }
    out
}

/// `Σ c[k] sin(2(k+1)ζ)` for `ζ = xi + i eta`, returned as (real, imaginary).
fn clenshaw_sin(coeffs: &[f64; ORDER], xi: f64, eta: f64) -> (f64, f64) {
    let (s, c) = (2.0 * xi).sin_cos();
    let (sh, ch) = ((2.0 * eta).sinh(), (2.0 * eta).cosh());
    // 2 cos 2ζ
    let (ar, ai) = (2.0 * c * ch, -2.0 * s * sh);

    let (mut b1, mut b2) = ((0.0, 0.0), (0.0, 0.0));
    for &k in coeffs.iter().rev() {
        let next = (ar * b1.0 - ai * b1.1 - b2.0 + k, ar * b1.1 + ai * b1.0 - b2.1);
        b2 = b1;
        b1 = next;
    }
    // b1 * sin 2ζ
    let (sr, si) = (s * ch, c * sh);
    (b1.0 * sr - b1.1 * si, b1.0 * si + b1.1 * sr)
}

/// Central meridian of a UTM zone, in radians.
pub fn central_meridian(zone: u8) -> f64 {
    (6.0 * f64::from(zone) - 183.0).to_radians()
}

impl Projection for TransverseMercator {
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), MgrsError> {
        let (sin_l, cos_l) = wrap_lon(lon - self.lon0).sin_cos();
        let tau_c = self.conformal_tan(lat.tan());

        let xi_c = tau_c.atan2(cos_l);
        let eta_c = (sin_l / tau_c.hypot(cos_l)).asinh();
        let (dxi, deta) = clenshaw_sin(&self.alpha, xi_c, eta_c);

        let x = self.false_easting + self.scale * (eta_c + deta);
        let y = self.false_northing + self.scale * (xi_c + dxi);
        if !(x.is_finite() && y.is_finite()) {
            return Err(MgrsError::Conversion(Status::LATITUDE));
        }
        Ok((x, y))
    }

    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), MgrsError> {
        let xi = (y - self.false_northing) / self.scale;
        let eta = (x - self.false_easting) / self.scale;
        let (dxi, deta) = clenshaw_sin(&self.beta, xi, eta);
        let (xi_c, eta_c) = (xi - dxi, eta - deta);

        let (sin_xi, cos_xi) = xi_c.sin_cos();
        let sinh_eta = eta_c.sinh();
        let tau = self.geodetic_tan(sin_xi / sinh_eta.hypot(cos_xi));

        let lat = tau.atan();
        let lon = wrap_lon(self.lon0 + sinh_eta.atan2(cos_xi));
        if !(lat.is_finite() && lon.is_finite()) {
            return Err(MgrsError::Conversion(Status::EASTING | Status::NORTHING));
        }
        Ok((lon, lat))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::{INTERNATIONAL_1924, WGS84};
    use approx::assert_relative_eq;

    fn utm(zone: u8) -> TransverseMercator {
        TransverseMercator::utm_zone(&WGS84, zone, Hemisphere::North)
    }

    #[test]
    fn test_clenshaw_matches_direct_sum() {
        let tm = utm(33);
        let (xi, eta) = (0.7, 0.04);
        let (mut re, mut im) = (0.0, 0.0);
        for (j, a) in tm.alpha.iter().enumerate() {
            let k = 2.0 * (j as f64 + 1.0);
            re += a * (k * xi).sin() * (k * eta).cosh();
            im += a * (k * xi).cos() * (k * eta).sinh();
        }
        let (cr, ci) = clenshaw_sin(&tm.alpha, xi, eta);
        assert_relative_eq!(cr, re, epsilon = 1e-15);
        assert_relative_eq!(ci, im, epsilon = 1e-15);
    }

    #[test]
    fn test_leading_coefficients() {
        let n = WGS84.n;
        let alpha = series(&ALPHA, n);
        assert_relative_eq!(alpha[0], n / 2.0, max_relative = 1e-2);
        assert_relative_eq!(alpha[5], 212378941.0 / 319334400.0 * n.powi(6));
    }

    #[test]
    fn test_conformal_tan_inverts() {
        let tm = TransverseMercator::utm_zone(&INTERNATIONAL_1924, 31, Hemisphere::North);
        for deg in [-89.0, -45.0, -1.0, 0.0, 0.5, 30.0, 72.0, 84.0] {
            let tau = f64::tan(f64::to_radians(deg));
            assert_relative_eq!(tm.geodetic_tan(tm.conformal_tan(tau)), tau, max_relative = 1e-13);
        }
    }

    #[test]
    fn test_roundtrip_utm33() {
        let tm = utm(33);
        for &(lon_deg, lat_deg) in &[(15.0, 52.0), (12.0, 50.0), (18.0, 50.0), (15.0, 0.0), (15.0, 80.0), (13.5, 52.5)]
        {
            let (lon, lat) = (f64::to_radians(lon_deg), f64::to_radians(lat_deg));
            let (x, y) = tm.forward(lon, lat).unwrap();
            let (lon2, lat2) = tm.inverse(x, y).unwrap();
            assert_relative_eq!(lon2, lon, epsilon = 1e-9);
            assert_relative_eq!(lat2, lat, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_central_meridian_easting_is_exact() {
        let (e, n) = utm(15)
            .forward((-93.0_f64).to_radians(), 42.0_f64.to_radians())
            .unwrap();
        assert_eq!(e, 500_000.0);
        assert!(n > 4_649_776.0 && n < 4_649_777.0, "northing = {n}");
    }

    #[test]
    fn test_equator_on_meridian_is_origin() {
        let (e, n) = utm(31).forward(3.0_f64.to_radians(), 0.0).unwrap();
        assert_eq!(e, 500_000.0);
        assert_relative_eq!(n, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_utm_zone_central_meridian() {
        assert_relative_eq!(utm(1).lon0(), (-177.0_f64).to_radians(), epsilon = 1e-10);
        assert_relative_eq!(utm(31).lon0(), 3.0_f64.to_radians(), epsilon = 1e-10);
        assert_relative_eq!(utm(60).lon0(), 177.0_f64.to_radians(), epsilon = 1e-10);
    }

    #[test]
    fn test_southern_hemisphere() {
        let tm = TransverseMercator::utm_zone(&WGS84, 56, Hemisphere::South);
        let (lon, lat) = (151.2_f64.to_radians(), (-33.9_f64).to_radians());
        let (x, y) = tm.forward(lon, lat).unwrap();
        assert!(y > 6_000_000.0 && y < 6_500_000.0, "northing = {y}");
        let (lon2, lat2) = tm.inverse(x, y).unwrap();
        assert_relative_eq!(lon2, lon, epsilon = 1e-9);
        assert_relative_eq!(lat2, lat, epsilon = 1e-9);
    }

    #[test]
    fn test_antimeridian_wraps() {
        let tm = utm(60);
        let (lon, lat) = ((-179.5_f64).to_radians(), 10.0_f64.to_radians());
        let (x, y) = tm.forward(lon, lat).unwrap();
        assert!(x > 800_000.0 && x < 900_000.0, "easting = {x}");
        let (lon2, _) = tm.inverse(x, y).unwrap();
        assert_relative_eq!(lon2, lon, epsilon = 1e-9);
    }

    #[test]
    fn test_batch_matches_single() {
        let tm = utm(48);
        let mut coords = vec![
            (105.2_f64.to_radians(), 13.4_f64.to_radians()),
            (103.0_f64.to_radians(), 20.0_f64.to_radians()),
        ];
        let expected: Vec<_> = coords
            .iter()
            .map(|&(lon, lat)| tm.forward(lon, lat).unwrap())
            .collect();
        tm.forward_batch(&mut coords).unwrap();
        assert_eq!(coords, expected);
    }
}
