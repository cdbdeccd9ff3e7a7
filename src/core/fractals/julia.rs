use std::convert::Infallible;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::escape_count;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JuliaAlgorithm {
    c: Complex,
    max_iterations: u32,
}

impl JuliaAlgorithm {
    #[must_use]
    pub fn new(c: Complex, max_iterations: u32) -> Self {
        Self { c, max_iterations }
    }

    #[must_use]
    pub fn c(&self) -> Complex {
        self.c
    }
}

impl FractalAlgorithm for JuliaAlgorithm {
    type Failure = Infallible;

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[inline]
    fn compute(&self, point: Complex) -> Result<u32, Self::Failure> {
        let c = self.c;
        Ok(escape_count(point, self.max_iterations, |z| Some(z * z + c)))
    }
}
