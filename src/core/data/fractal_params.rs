use serde::{Deserialize, Serialize};

use crate::core::data::complex::Complex;
use crate::core::errors::InvalidParameterError;

pub const DEFAULT_JULIA_CONSTANT: Complex = Complex {
    real: -0.7,
    imag: 0.27015,
};

pub const DEFAULT_FATOU_EXPONENT: u32 = 3;

/// Family tag without its constants, used for lookup by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FractalKind {
    Mandelbrot,
    Julia,
    Fatou,
}

impl FractalKind {
    pub const ALL: &'static [Self] = &[Self::Mandelbrot, Self::Julia, Self::Fatou];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Mandelbrot => "Mandelbrot",
            Self::Julia => "Julia",
            Self::Fatou => "Fatou",
        }
    }

    pub fn from_name(name: &str) -> Result<Self, InvalidParameterError> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.display_name() == name)
            .ok_or_else(|| InvalidParameterError::UnknownFamily(name.to_string()))
    }
}

impl Default for FractalKind {
    fn default() -> Self {
        Self::Mandelbrot
    }
}

impl std::fmt::Display for FractalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FractalFamily {
    Mandelbrot,
    Julia { c: Complex },
    /// Newton iteration for `z^exponent - 1`.
    Fatou { exponent: u32 },
}

impl FractalFamily {
    #[must_use]
    pub fn kind(&self) -> FractalKind {
        match self {
            Self::Mandelbrot => FractalKind::Mandelbrot,
            Self::Julia { .. } => FractalKind::Julia,
            Self::Fatou { .. } => FractalKind::Fatou,
        }
    }
}

/// Immutable inputs of a single render: which recurrence and how long to run it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawFractalParameters", into = "RawFractalParameters")]
pub struct FractalParameters {
    family: FractalFamily,
    max_iterations: u32,
}

impl FractalParameters {
    pub fn new(family: FractalFamily, max_iterations: u32) -> Result<Self, InvalidParameterError> {
        if max_iterations == 0 {
            return Err(InvalidParameterError::ZeroMaxIterations);
        }

        match family {
            FractalFamily::Fatou { exponent } if exponent < 2 => {
                return Err(InvalidParameterError::InvalidFatouExponent { exponent });
            }
            FractalFamily::Julia { c } if !c.is_finite() => {
                return Err(InvalidParameterError::NonFiniteJuliaConstant {
                    real: c.real,
                    imag: c.imag,
                });
            }
            _ => {}
        }

        Ok(Self {
            family,
            max_iterations,
        })
    }

    #[must_use]
    pub fn family(&self) -> FractalFamily {
        self.family
    }

    #[must_use]
    pub fn max_iterations(&self) -> u32 {
        self.max_iterations
    }

    pub fn with_max_iterations(&self, max_iterations: u32) -> Result<Self, InvalidParameterError> {
        Self::new(self.family, max_iterations)
    }

    pub fn with_family(&self, family: FractalFamily) -> Result<Self, InvalidParameterError> {
        Self::new(family, self.max_iterations)
    }
}

#[derive(Serialize, Deserialize)]
struct RawFractalParameters {
    family: FractalFamily,
    max_iterations: u32,
}

impl TryFrom<RawFractalParameters> for FractalParameters {
    type Error = InvalidParameterError;

    fn try_from(raw: RawFractalParameters) -> Result<Self, Self::Error> {
        Self::new(raw.family, raw.max_iterations)
    }
}

impl From<FractalParameters> for RawFractalParameters {
    fn from(params: FractalParameters) -> Self {
        Self {
            family: params.family,
            max_iterations: params.max_iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_max_iterations_is_rejected() {
        assert_eq!(
            FractalParameters::new(FractalFamily::Mandelbrot, 0),
            Err(InvalidParameterError::ZeroMaxIterations)
        );
    }

    #[test]
    fn test_fatou_exponent_must_be_at_least_two() {
        assert_eq!(
            FractalParameters::new(FractalFamily::Fatou { exponent: 1 }, 10),
            Err(InvalidParameterError::InvalidFatouExponent { exponent: 1 })
        );
        assert!(FractalParameters::new(FractalFamily::Fatou { exponent: 2 }, 10).is_ok());
    }

    #[test]
    fn test_julia_constant_must_be_finite() {
        let c = Complex::new(f64::NAN, 0.0);
        assert!(FractalParameters::new(FractalFamily::Julia { c }, 10).is_err());
    }

    #[test]
    fn test_kind_lookup_by_name() {
        for &kind in FractalKind::ALL {
            assert_eq!(FractalKind::from_name(kind.display_name()), Ok(kind));
        }

        assert_eq!(
            FractalKind::from_name("Burning Ship"),
            Err(InvalidParameterError::UnknownFamily("Burning Ship".to_string()))
        );
    }

    #[test]
    fn test_family_reports_kind() {
        assert_eq!(FractalFamily::Mandelbrot.kind(), FractalKind::Mandelbrot);
        assert_eq!(
            FractalFamily::Julia {
                c: DEFAULT_JULIA_CONSTANT
            }
            .kind(),
            FractalKind::Julia
        );
        assert_eq!(FractalFamily::Fatou { exponent: 3 }.kind(), FractalKind::Fatou);
    }

    #[test]
    fn test_parameters_serde_is_validated() {
        let json = r#"{"family":{"type":"Mandelbrot"},"max_iterations":0}"#;
        assert!(serde_json::from_str::<FractalParameters>(json).is_err());

        let json = r#"{"family":{"type":"Julia","c":{"real":-0.7,"imag":0.27015}},"max_iterations":64}"#;
        let params: FractalParameters = serde_json::from_str(json).unwrap();
        assert_eq!(params.family(), FractalFamily::Julia { c: DEFAULT_JULIA_CONSTANT });
        assert_eq!(params.max_iterations(), 64);
    }
}
