use std::convert::Infallible;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::fractals::escape_time::escape_count;

/// Newton iteration for `z^n - 1` from `z = point`.
///
/// Points that settle on a root never reach the escape radius and report
/// `max_iterations`; a vanishing derivative ends the orbit on that step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FatouAlgorithm {
    exponent: u32,
    max_iterations: u32,
}

impl FatouAlgorithm {
    #[must_use]
    pub fn new(exponent: u32, max_iterations: u32) -> Self {
        Self {
            exponent,
            max_iterations,
        }
    }
}

impl FractalAlgorithm for FatouAlgorithm {
    type Failure = Infallible;

    fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    #[inline]
    fn compute(&self, point: Complex) -> Result<u32, Self::Failure> {
        let n = self.exponent;
        let n_f = f64::from(n);

        Ok(escape_count(point, self.max_iterations, |z| {
            let z_pow = z.powu(n - 1);
            let derivative = z_pow.scale(n_f);

            if derivative.magnitude_squared() == 0.0 {
                return None;
            }

            Some(z - (z_pow * z - Complex::ONE) / derivative)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_is_a_fixed_point() {
        let algorithm = FatouAlgorithm::new(3, 50);
        assert_eq!(algorithm.compute(Complex::ONE).unwrap(), 50);
    }

    #[test]
    fn test_zero_has_vanishing_derivative() {
        let algorithm = FatouAlgorithm::new(3, 50);
        assert_eq!(algorithm.compute(Complex::ZERO).unwrap(), 1);
    }

    #[test]
    fn test_start_outside_radius_is_zero() {
        let algorithm = FatouAlgorithm::new(3, 50);
        assert_eq!(algorithm.compute(Complex::new(0.0, -2.5)).unwrap(), 0);
    }

    #[test]
    fn test_nearby_point_converges_and_stays_bounded() {
        let algorithm = FatouAlgorithm::new(3, 50);
        assert_eq!(algorithm.compute(Complex::new(0.9, 0.1)).unwrap(), 50);
    }
}
