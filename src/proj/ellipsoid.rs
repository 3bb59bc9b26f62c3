use std::borrow::Cow;

use crate::error::{MgrsError, Status};

/// An ellipsoid of revolution, defined by `a` and `f`, with the derived
/// quantities the UTM and UPS projections need.
///
/// The optional two-letter code selects the legacy MGRS lettering for the
/// older datums (see [`crate::mgrs::tables::LetterPattern`]).
#[derive(Clone, Debug, PartialEq)]
pub struct Ellipsoid {
    /// Equatorial radius in metres.
    pub a: f64,
    pub f: f64,
    /// `2f - f²`
    pub e2: f64,
    /// `f / (2 - f)`
    pub n: f64,
    code: Option<Cow<'static, str>>,
}

impl Ellipsoid {
    const fn from_parts(a: f64, f: f64, code: &'static str) -> Self {
        Self {
            a,
            f,
            e2: f * (2.0 - f),
            n: f / (2.0 - f),
            code: Some(Cow::Borrowed(code)),
        }
    }

    /// Build an ellipsoid from its semi-major axis and flattening.
    ///
    /// Both parameters are checked; a failure reports every bad one.
    pub fn new(a: f64, f: f64) -> Result<Self, MgrsError> {
        let mut status = Status::empty();
        if !(a.is_finite() && a > 0.0) {
            status |= Status::SEMI_MAJOR_AXIS;
        }
        if !(f > 0.0 && f < 1.0) {
            status |= Status::FLATTENING;
        }
        if !status.is_empty() {
            return Err(MgrsError::Ellipsoid(status));
        }
        let mut ellipsoid = Self::from_parts(a, f, "");
        ellipsoid.code = None;
        Ok(ellipsoid)
    }

    /// Attach a short identifying code (e.g. `"WE"`). Blank codes are dropped.
    pub fn with_code(mut self, code: &str) -> Self {
        let code = code.trim();
        self.code = if code.is_empty() {
            None
        } else {
            Some(Cow::Owned(code.to_ascii_uppercase()))
        };
        self
    }

    pub fn code(&self) -> Option<&str> {
        self.code.as_deref()
    }

    /// Look up one of the built-in ellipsoids by its two-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        KNOWN_ELLIPSOIDS
            .iter()
            .find(|e| e.code().is_some_and(|c| c.eq_ignore_ascii_case(code)))
            .cloned()
    }

    pub fn eccentricity(&self) -> f64 {
        self.e2.sqrt()
    }

}

impl Default for Ellipsoid {
    fn default() -> Self {
        WGS84
    }
}

pub const WGS84: Ellipsoid = Ellipsoid::from_parts(6_378_137.0, 1.0 / 298.257_223_563, "WE");
pub const WGS72: Ellipsoid = Ellipsoid::from_parts(6_378_135.0, 1.0 / 298.26, "WD");
pub const GRS80: Ellipsoid = Ellipsoid::from_parts(6_378_137.0, 1.0 / 298.257_222_101, "RF");
pub const CLARKE_1866: Ellipsoid = Ellipsoid::from_parts(6_378_206.4, 1.0 / 294.978_698_2, "CC");
pub const CLARKE_1880: Ellipsoid = Ellipsoid::from_parts(6_378_249.145, 1.0 / 293.465, "CD");
pub const BESSEL_1841: Ellipsoid =
    Ellipsoid::from_parts(6_377_397.155, 1.0 / 299.152_812_8, "BR");
pub const BESSEL_1841_NAMIBIA: Ellipsoid =
    Ellipsoid::from_parts(6_377_483.865, 1.0 / 299.152_812_8, "BN");
pub const INTERNATIONAL_1924: Ellipsoid = Ellipsoid::from_parts(6_378_388.0, 1.0 / 297.0, "IN");
pub const KRASSOVSKY: Ellipsoid = Ellipsoid::from_parts(6_378_245.0, 1.0 / 298.3, "KA");
pub const AIRY_1830: Ellipsoid = Ellipsoid::from_parts(6_377_563.396, 1.0 / 299.324_964_6, "AA");
pub const EVEREST_1830: Ellipsoid = Ellipsoid::from_parts(6_377_276.345, 1.0 / 300.8017, "EA");

const KNOWN_ELLIPSOIDS: [Ellipsoid; 11] = [
    WGS84,
    WGS72,
    GRS80,
    CLARKE_1866,
    CLARKE_1880,
    BESSEL_1841,
    BESSEL_1841_NAMIBIA,
    INTERNATIONAL_1924,
    KRASSOVSKY,
    AIRY_1830,
    EVEREST_1830,
];
