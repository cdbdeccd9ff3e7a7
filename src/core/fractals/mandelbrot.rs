use std::convert::Infallible;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::escape_count;

/// `z <- z^2 + c` from `z = 0`, with `c` the sampled point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MandelbrotAlgorithm {
    max_iterations: u32,
}

impl MandelbrotAlgorithm {
    #[must_use]
    pub fn new(max_iterations: u32) -> Self {
        Self { max_iterations }
    }
}

impl FractalAlgorithm for MandelbrotAlgorithm {
    type Failure = Infallible;

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[inline]
    fn compute(&self, c: Complex) -> Result<u32, Self::Failure> {
        Ok(escape_count(Complex::ZERO, self.max_iterations, |z| {
            Some(z * z + c)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origin_never_escapes() {
        let algorithm = MandelbrotAlgorithm::new(100);
        assert_eq!(algorithm.compute(Complex::ZERO).unwrap(), 100);
    }

    #[test]
    fn test_minus_one_cycles_and_stays_bounded() {
        let algorithm = MandelbrotAlgorithm::new(64);
        assert_eq!(algorithm.compute(Complex::new(-1.0, 0.0)).unwrap(), 64);
    }

    #[test]
    fn test_point_far_outside_escapes_after_first_step() {
        // z1 = c = 3, |z1| >= 2
        let algorithm = MandelbrotAlgorithm::new(100);
        assert_eq!(algorithm.compute(Complex::new(3.0, 0.0)).unwrap(), 1);
    }

    #[test]
    fn test_point_near_boundary_takes_several_steps() {
        // z: 0 -> 1 -> 2, escapes on the second step
        let algorithm = MandelbrotAlgorithm::new(100);
        assert_eq!(algorithm.compute(Complex::new(1.0, 0.0)).unwrap(), 2);
    }
}
