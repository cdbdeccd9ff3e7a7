use std::error::Error;
use std::fmt;

use crate::core::data::point::Point;

/// A user action or configuration value that cannot be applied.
///
/// Returned before any work is dispatched, so the caller's state is never
/// half-updated when one of these surfaces.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidParameterError {
    InvalidRegion {
        real_min: f64,
        real_max: f64,
        imag_min: f64,
        imag_max: f64,
    },
    InvalidViewport {
        width: u32,
        height: u32,
    },
    ZeroMaxIterations,
    InvalidFatouExponent {
        exponent: u32,
    },
    NonFiniteJuliaConstant {
        real: f64,
        imag: f64,
    },
    InvalidZoomFactor {
        factor: f64,
    },
    RegionOutOfBounds {
        width: f64,
        height: f64,
        center_real: f64,
        center_imag: f64,
    },
    PointOutsideViewport {
        point: Point,
        width: u32,
        height: u32,
    },
    UnknownTheme(String),
    UnknownFamily(String),
    InvalidWorkerCount,
}

impl fmt::Display for InvalidParameterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRegion {
                real_min,
                real_max,
                imag_min,
                imag_max,
            } => write!(
                f,
                "plane region must be finite with positive extent: real [{}, {}], imag [{}, {}]",
                real_min, real_max, imag_min, imag_max
            ),
            Self::InvalidViewport { width, height } => {
                write!(f, "viewport must be at least 1x1 pixels: {}x{}", width, height)
            }
            Self::ZeroMaxIterations => write!(f, "max_iterations must be greater than zero"),
            Self::InvalidFatouExponent { exponent } => {
                write!(f, "fatou exponent must be at least 2: {}", exponent)
            }
            Self::NonFiniteJuliaConstant { real, imag } => {
                write!(f, "julia constant must be finite: {} + {}i", real, imag)
            }
            Self::InvalidZoomFactor { factor } => {
                write!(f, "zoom factor must be finite and positive: {}", factor)
            }
            Self::RegionOutOfBounds {
                width,
                height,
                center_real,
                center_imag,
            } => write!(
                f,
                "region {}x{} centred at ({}, {}) is outside navigable limits",
                width, height, center_real, center_imag
            ),
            Self::PointOutsideViewport {
                point,
                width,
                height,
            } => write!(
                f,
                "point x:{}, y:{} outside of {}x{} viewport",
                point.x, point.y, width, height
            ),
            Self::UnknownTheme(name) => write!(f, "unknown colour theme: {}", name),
            Self::UnknownFamily(name) => write!(f, "unknown fractal family: {}", name),
            Self::InvalidWorkerCount => write!(f, "worker count must be at least 1"),
        }
    }
}

impl Error for InvalidParameterError {}
