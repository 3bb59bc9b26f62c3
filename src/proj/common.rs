//! Common helpers for projection math (isometric latitude, longitude wrapping).

use std::f64::consts::{FRAC_PI_2, PI, TAU};

/// Wrap a longitude (or longitude difference) into (-π, π].
pub fn wrap_lon(lon: f64) -> f64 {
    let mut l = lon % TAU;
    if l > PI {
        l -= TAU;
    } else if l <= -PI {
        l += TAU;
    }
    l
}

/// Snyder's t(φ): tan(π/4 - φ/2) / ((1 - e sinφ)/(1 + e sinφ))^(e/2).
pub fn tsfn(phi: f64, e: f64) -> f64 {
    let con = e * phi.sin();
    (0.5 * (FRAC_PI_2 - phi)).tan() / ((1.0 - con) / (1.0 + con)).powf(0.5 * e)
}

/// Invert `tsfn` by fixed-point iteration.
pub fn phi_from_ts(ts: f64, e: f64) -> f64 {
    let half_e = 0.5 * e;
    let mut phi = FRAC_PI_2 - 2.0 * ts.atan();
    for _ in 0..15 {
        let con = e * phi.sin();
        let dphi = FRAC_PI_2 - 2.0 * (ts * ((1.0 - con) / (1.0 + con)).powf(half_e)).atan() - phi;
        phi += dphi;
        if dphi.abs() < 1e-14 {
            break;
        }
    }
    phi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proj::ellipsoid::WGS84;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_lon() {
        assert_relative_eq!(wrap_lon(0.0), 0.0);
        assert_relative_eq!(wrap_lon(PI), PI);
        assert_relative_eq!(wrap_lon(-PI), PI);
        assert_relative_eq!(wrap_lon(1.5 * PI), -0.5 * PI, epsilon = 1e-15);
        assert_relative_eq!(wrap_lon(-1.5 * PI), 0.5 * PI, epsilon = 1e-15);
    }

    #[test]
    fn test_tsfn_pole_is_zero() {
        let e = WGS84.eccentricity();
        assert_relative_eq!(tsfn(FRAC_PI_2, e), 0.0, epsilon = 1e-15);
        assert_relative_eq!(phi_from_ts(0.0, e), FRAC_PI_2, epsilon = 1e-15);
    }

    #[test]
    fn test_phi_from_ts_inverts_tsfn() {
        let e = WGS84.eccentricity();
        for deg in [60.0_f64, 75.0, 80.0, 84.0, 89.9] {
            let phi = deg.to_radians();
            assert_relative_eq!(phi_from_ts(tsfn(phi, e), e), phi, epsilon = 1e-12);
        }
    }
}
