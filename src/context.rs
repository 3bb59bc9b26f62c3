//! Process-wide ellipsoid setting.
//!
//! [`Converter`](crate::convert::Converter) is the primary API and carries
//! its own ellipsoid. This module backs the classic configure-once entry
//! points used by [`Converter::current`](crate::convert::Converter::current)
//! and the Python binding. Reconfigure before starting conversions, not
//! while they are in flight.

use parking_lot::{const_rwlock, RwLock};
use tracing::debug;

use crate::error::MgrsError;
use crate::proj::ellipsoid::Ellipsoid;

static ELLIPSOID: RwLock<Option<Ellipsoid>> = const_rwlock(None);

/// Validate and install new ellipsoid parameters.
///
/// On failure the previous configuration stays in place.
pub fn set_ellipsoid_parameters(a: f64, f: f64, code: &str) -> Result<(), MgrsError> {
    match Ellipsoid::new(a, f) {
        Ok(ellipsoid) => {
            let ellipsoid = ellipsoid.with_code(code);
            debug!(a, f, code, "ellipsoid reconfigured");
            *ELLIPSOID.write() = Some(ellipsoid);
            Ok(())
        }
        Err(err) => {
            debug!(a, f, code, %err, "ellipsoid reconfiguration rejected");
            Err(err)
        }
    }
}

/// The active ellipsoid, WGS84 until configured.
pub fn ellipsoid_parameters() -> Ellipsoid {
    ELLIPSOID.read().clone().unwrap_or_default()
}

/// Return to the WGS84 default.
pub fn reset_ellipsoid_parameters() {
    debug!("ellipsoid reset to default");
    *ELLIPSOID.write() = None;
}
