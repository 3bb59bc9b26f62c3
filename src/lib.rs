pub mod batch;
pub mod context;
pub mod convert;
pub mod coords;
pub mod error;
pub mod mgrs;
pub mod proj;
pub mod ups;
pub mod utm;

#[cfg(feature = "python")]
mod py;

pub use convert::Converter;
pub use coords::{Geodetic, Hemisphere, UpsCoord, UtmCoord};
pub use error::{ConvResult, Converted, MgrsError, Status};
pub use mgrs::MgrsReference;
pub use proj::ellipsoid::Ellipsoid;

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pymodule]
fn _rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
    py::register(m)?;
    Ok(())
}
