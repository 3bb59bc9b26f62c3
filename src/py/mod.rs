use pyo3::prelude::*;

mod convert;

/// Register all Python-visible functions.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(convert::latlng_to_mgrs, m)?)?;
    m.add_function(wrap_pyfunction!(convert::mgrs_to_latlng, m)?)?;
    m.add_function(wrap_pyfunction!(convert::utm_to_mgrs, m)?)?;
    m.add_function(wrap_pyfunction!(convert::mgrs_to_utm, m)?)?;
    m.add_function(wrap_pyfunction!(convert::ups_to_mgrs, m)?)?;
    m.add_function(wrap_pyfunction!(convert::mgrs_to_ups, m)?)?;
    m.add_function(wrap_pyfunction!(convert::set_ellipsoid_parameters, m)?)?;
    m.add_function(wrap_pyfunction!(convert::get_ellipsoid_parameters, m)?)?;
    Ok(())
}
