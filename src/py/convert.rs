//! PyO3 bindings for the conversion entry points.
//!
//! Angles cross this boundary in degrees. Array functions never raise for a
//! bad element: it comes back as `None` (strings) or NaN (coordinates), and
//! the per-element status codes plus the failure count are returned too.

use numpy::{PyArray1, PyReadonlyArray1};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::context;
use crate::convert::Converter;
use crate::error::MgrsError;

fn value_error(err: MgrsError) -> PyErr {
    PyValueError::new_err(format!("{err} (status 0x{:04x})", err.code()))
}

/// Convert arrays of latitude/longitude (degrees) to MGRS strings.
///
/// Args:
///     lat: 1D array of latitudes in degrees.
///     lon: 1D array of longitudes in degrees.
///     precision: Digit pairs per reference, 0 (100 km) to 5 (1 m).
///
/// Returns:
///     Tuple of (references, status codes, failure count). References are
///     None where a point could not be converted; status codes are the
///     per-point fault flags (0 for a clean conversion).
#[pyfunction]
#[pyo3(signature = (lat, lon, precision=5))]
#[allow(clippy::type_complexity)]
pub fn latlng_to_mgrs<'py>(
    py: Python<'py>,
    lat: PyReadonlyArray1<'py, f64>,
    lon: PyReadonlyArray1<'py, f64>,
    precision: i32,
) -> PyResult<(Vec<Option<String>>, Bound<'py, PyArray1<u32>>, usize)> {
    let lat_view = lat.as_array();
    let lon_view = lon.as_array();
    if lat_view.len() != lon_view.len() {
        return Err(PyValueError::new_err(format!(
            "lat and lon must have same length, got {} and {}",
            lat_view.len(),
            lon_view.len()
        )));
    }

    let points: Vec<(f64, f64)> = lat_view
        .iter()
        .zip(lon_view.iter())
        .map(|(&la, &lo)| (la.to_radians(), lo.to_radians()))
        .collect();

    let (values, codes, failures) = py
        .allow_threads(move || Converter::current().geodetic_to_mgrs_batch(&points, precision))
        .into_parts();
    Ok((values, PyArray1::from_owned_array(py, ndarray::Array1::from(codes)), failures))
}

/// Convert MGRS strings to latitude/longitude arrays (degrees).
///
/// Returns:
///     Tuple of (lat, lon, status codes, failure count). NaN marks
///     references that failed to decode.
#[pyfunction]
#[allow(clippy::type_complexity)]
pub fn mgrs_to_latlng<'py>(
    py: Python<'py>,
    mgrs: Vec<String>,
) -> PyResult<(
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<f64>>,
    Bound<'py, PyArray1<u32>>,
    usize,
)> {
    let (values, codes, failures) = py
        .allow_threads(move || Converter::current().mgrs_to_geodetic_batch(&mgrs))
        .into_parts();

    let (lats, lons): (Vec<f64>, Vec<f64>) = values
        .into_iter()
        .map(|g| g.map_or((f64::NAN, f64::NAN), |g| g.to_degrees()))
        .unzip();

    Ok((
        PyArray1::from_owned_array(py, ndarray::Array1::from(lats)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(lons)),
        PyArray1::from_owned_array(py, ndarray::Array1::from(codes)),
        failures,
    ))
}

#[pyfunction]
#[pyo3(signature = (zone, hemisphere, easting, northing, precision=5))]
pub fn utm_to_mgrs(
    zone: i32,
    hemisphere: char,
    easting: f64,
    northing: f64,
    precision: i32,
) -> PyResult<String> {
    Converter::current()
        .utm_to_mgrs(zone, hemisphere, easting, northing, precision)
        .map(|c| c.value)
        .map_err(value_error)
}

/// Returns:
///     Tuple of (zone, hemisphere, easting, northing).
#[pyfunction]
pub fn mgrs_to_utm(mgrs: &str) -> PyResult<(u8, char, f64, f64)> {
    let utm = Converter::current().mgrs_to_utm(mgrs).map_err(value_error)?.value;
    Ok((utm.zone, utm.hemisphere.as_char(), utm.easting, utm.northing))
}

#[pyfunction]
#[pyo3(signature = (hemisphere, easting, northing, precision=5))]
pub fn ups_to_mgrs(hemisphere: char, easting: f64, northing: f64, precision: i32) -> PyResult<String> {
    Converter::current()
        .ups_to_mgrs(hemisphere, easting, northing, precision)
        .map(|c| c.value)
        .map_err(value_error)
}

/// Returns:
///     Tuple of (hemisphere, easting, northing).
#[pyfunction]
pub fn mgrs_to_ups(mgrs: &str) -> PyResult<(char, f64, f64)> {
    let ups = Converter::current().mgrs_to_ups(mgrs).map_err(value_error)?.value;
    Ok((ups.hemisphere.as_char(), ups.easting, ups.northing))
}

/// Set the process-wide ellipsoid used by every other function.
#[pyfunction]
#[pyo3(signature = (a, f, code=""))]
pub fn set_ellipsoid_parameters(a: f64, f: f64, code: &str) -> PyResult<()> {
    context::set_ellipsoid_parameters(a, f, code).map_err(value_error)
}

/// Returns:
///     Tuple of (semi-major axis, flattening, code or None).
#[pyfunction]
pub fn get_ellipsoid_parameters() -> (f64, f64, Option<String>) {
    let e = context::ellipsoid_parameters();
    (e.a, e.f, e.code().map(str::to_owned))
}
