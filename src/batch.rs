//! Order-preserving parallel conversion of many independent inputs.

use rayon::prelude::*;
use tracing::debug;

use crate::convert::Converter;
use crate::coords::{Geodetic, UtmCoord};
use crate::error::{ConvResult, Status};

/// Per-element results of a batch, in input order.
///
/// A failed element has `None` in `values` and its fault flags in
/// `statuses`; successful elements may still carry warnings.
#[derive(Clone, Debug, PartialEq)]
pub struct BatchOutput<T> {
    pub values: Vec<Option<T>>,
    pub statuses: Vec<Status>,
    pub failures: usize,
}

impl<T> BatchOutput<T> {
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Raw status codes, one per element.
    pub fn codes(&self) -> Vec<u32> {
        self.statuses.iter().map(|s| s.bits()).collect()
    }

    /// Split into values, raw status codes and the failure count.
    pub fn into_parts(self) -> (Vec<Option<T>>, Vec<u32>, usize) {
        let codes = self.codes();
        (self.values, codes, self.failures)
    }
}

/// Apply `convert` to every input on the rayon pool.
pub fn convert_batch<I, T, F>(inputs: &[I], convert: F) -> BatchOutput<T>
where
    I: Sync,
    T: Send,
    F: Fn(&I) -> ConvResult<T> + Sync + Send,
{
    let (values, statuses): (Vec<Option<T>>, Vec<Status>) = inputs
        .par_iter()
        .map(|input| match convert(input) {
            Ok(converted) => (Some(converted.value), converted.status),
            Err(err) => (None, err.status()),
        })
        .unzip();

    let failures = values.iter().filter(|v| v.is_none()).count();
    if failures > 0 {
        debug!(failures, total = inputs.len(), "batch finished with failures");
    }
    BatchOutput {
        values,
        statuses,
        failures,
    }
}

impl Converter {
    /// `(lat, lon)` pairs in radians to MGRS strings.
    pub fn geodetic_to_mgrs_batch(
        &self,
        points: &[(f64, f64)],
        precision: i32,
    ) -> BatchOutput<String> {
        convert_batch(points, |&(lat, lon)| {
            self.geodetic_to_mgrs(lat, lon, precision)
        })
    }

    pub fn mgrs_to_geodetic_batch<S>(&self, references: &[S]) -> BatchOutput<Geodetic>
    where
        S: AsRef<str> + Sync,
    {
        convert_batch(references, |r| self.mgrs_to_geodetic(r.as_ref()))
    }

    pub fn mgrs_to_utm_batch<S>(&self, references: &[S]) -> BatchOutput<UtmCoord>
    where
        S: AsRef<str> + Sync,
    {
        convert_batch(references, |r| self.mgrs_to_utm(r.as_ref()))
    }
}
