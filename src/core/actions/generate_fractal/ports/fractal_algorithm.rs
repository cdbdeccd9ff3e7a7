use std::error::Error;

use crate::core::data::complex::Complex;

/// Per-point escape-time computation shared by every dispatcher.
pub trait FractalAlgorithm: Sync {
    type Failure: Error + Send + 'static;

    fn max_iterations(&self) -> u32;

    /// Iteration count in `0..=max_iterations` for the plane point.
    fn compute(&self, point: Complex) -> Result<u32, Self::Failure>;
}
