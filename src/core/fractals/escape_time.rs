use std::convert::Infallible;

use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{FractalFamily, FractalParameters};
use crate::core::fractals::fatou::FatouAlgorithm;
use crate::core::fractals::julia::JuliaAlgorithm;
use crate::core::fractals::mandelbrot::MandelbrotAlgorithm;

pub const ESCAPE_RADIUS: f64 = 2.0;
pub(crate) const ESCAPE_RADIUS_SQUARED: f64 = ESCAPE_RADIUS * ESCAPE_RADIUS;

/// Iterates `step` from `z0` until `|z| >= 2` or `max_iterations` steps ran.
///
/// `step` returns `None` when the orbit cannot continue; that step still counts.
#[inline]
pub(crate) fn escape_count<F>(z0: Complex, max_iterations: u32, mut step: F) -> u32
where
    F: FnMut(Complex) -> Option<Complex>,
{
    let mut z = z0;
    let mut count = 0;

    while count < max_iterations && z.magnitude_squared() < ESCAPE_RADIUS_SQUARED {
        count += 1;
        match step(z) {
            Some(next) => z = next,
            None => break,
        }
    }

    count
}

/// The kernel for one render, selected from the family in [`FractalParameters`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EscapeTimeKernel {
    Mandelbrot(MandelbrotAlgorithm),
    Julia(JuliaAlgorithm),
    Fatou(FatouAlgorithm),
}

impl EscapeTimeKernel {
    #[must_use]
    pub fn new(params: &FractalParameters) -> Self {
        let max_iterations = params.max_iterations();

        match params.family() {
            FractalFamily::Mandelbrot => Self::Mandelbrot(MandelbrotAlgorithm::new(max_iterations)),
            FractalFamily::Julia { c } => Self::Julia(JuliaAlgorithm::new(c, max_iterations)),
            FractalFamily::Fatou { exponent } => {
                Self::Fatou(FatouAlgorithm::new(exponent, max_iterations))
            }
        }
    }
}

impl FractalAlgorithm for EscapeTimeKernel {
    type Failure = Infallible;

    fn max_iterations(&self) -> u32 {
        match self {
            Self::Mandelbrot(alg) => alg.max_iterations(),
            Self::Julia(alg) => alg.max_iterations(),
            Self::Fatou(alg) => alg.max_iterations(),
        }
    }

    #[inline]
    fn compute(&self, point: Complex) -> Result<u32, Self::Failure> {
        match self {
            Self::Mandelbrot(alg) => alg.compute(point),
            Self::Julia(alg) => alg.compute(point),
            Self::Fatou(alg) => alg.compute(point),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::fractal_params::DEFAULT_JULIA_CONSTANT;

    #[test]
    fn escape_count_stops_at_limit() {
        assert_eq!(escape_count(Complex::ZERO, 25, Some), 25);
    }

    #[test]
    fn escape_count_is_zero_outside_radius() {
        assert_eq!(escape_count(Complex::new(2.0, 0.0), 25, |z| Some(z * z)), 0);
    }

    #[test]
    fn escape_count_counts_the_failing_step() {
        assert_eq!(escape_count(Complex::ZERO, 25, |_| None), 1);
    }

    #[test]
    fn kernel_selects_family() {
        let mandelbrot = FractalParameters::new(FractalFamily::Mandelbrot, 10).unwrap();
        let julia = FractalParameters::new(
            FractalFamily::Julia {
                c: DEFAULT_JULIA_CONSTANT,
            },
            20,
        )
        .unwrap();
        let fatou = FractalParameters::new(FractalFamily::Fatou { exponent: 3 }, 30).unwrap();

        assert!(matches!(
            EscapeTimeKernel::new(&mandelbrot),
            EscapeTimeKernel::Mandelbrot(_)
        ));
        assert!(matches!(EscapeTimeKernel::new(&julia), EscapeTimeKernel::Julia(_)));
        assert_eq!(EscapeTimeKernel::new(&fatou).max_iterations(), 30);
    }

    #[test]
    fn kernel_is_deterministic() {
        let params = FractalParameters::new(FractalFamily::Mandelbrot, 200).unwrap();
        let kernel = EscapeTimeKernel::new(&params);
        let point = Complex::new(-0.743_643_887, 0.131_825_904);

        let first = kernel.compute(point).unwrap();
        for _ in 0..10 {
            assert_eq!(kernel.compute(point).unwrap(), first);
        }
    }

    #[test]
    fn counts_stay_within_limit_for_every_family() {
        let families = [
            FractalFamily::Mandelbrot,
            FractalFamily::Julia {
                c: DEFAULT_JULIA_CONSTANT,
            },
            FractalFamily::Fatou { exponent: 3 },
        ];

        for family in families {
            let kernel = EscapeTimeKernel::new(&FractalParameters::new(family, 50).unwrap());
            for i in -20..=20 {
                for j in -20..=20 {
                    let point = Complex::new(f64::from(i) * 0.15, f64::from(j) * 0.15);
                    assert!(kernel.compute(point).unwrap() <= 50);
                }
            }
        }
    }
}
