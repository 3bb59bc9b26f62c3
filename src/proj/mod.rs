pub mod common;
pub mod ellipsoid;
pub mod stereographic;
pub mod transverse_mercator;

use crate::error::MgrsError;

/// Trait for map projections supporting forward and inverse transforms.
///
/// Implementations do the raw math only; range policy belongs to the
/// UTM/UPS layers built on top.
pub trait Projection: Send + Sync {
    /// Forward: (lon_rad, lat_rad) -> (easting, northing)
    fn forward(&self, lon: f64, lat: f64) -> Result<(f64, f64), MgrsError>;

    /// Inverse: (easting, northing) -> (lon_rad, lat_rad)
    fn inverse(&self, x: f64, y: f64) -> Result<(f64, f64), MgrsError>;

    /// Batch forward transform (default: loop).
    fn forward_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), MgrsError> {
        for c in coords.iter_mut() {
            *c = self.forward(c.0, c.1)?;
        }
        Ok(())
    }

    /// Batch inverse transform.
    fn inverse_batch(&self, coords: &mut [(f64, f64)]) -> Result<(), MgrsError> {
        for c in coords.iter_mut() {
            *c = self.inverse(c.0, c.1)?;
        }
        Ok(())
    }
}
