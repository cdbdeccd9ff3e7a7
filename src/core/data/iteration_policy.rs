use serde::{Deserialize, Serialize};

const AUTO_BASE_ITERATIONS: f64 = 100.0;
const AUTO_ZOOM_EXPONENT: f64 = 0.11;

/// How the iteration limit follows the zoom level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode")]
pub enum IterationPolicy {
    /// Use the configured `max_iterations` as is.
    Fixed,
    /// `floor(100 * zoom^0.11) + offset`, never below 1.
    Auto { offset: i32 },
}

impl IterationPolicy {
    #[must_use]
    pub fn max_iterations(&self, fixed: u32, zoom_level: f64) -> u32 {
        match *self {
            Self::Fixed => fixed,
            Self::Auto { offset } => auto_max_iterations(zoom_level, offset),
        }
    }

    #[must_use]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto { .. })
    }
}

impl Default for IterationPolicy {
    fn default() -> Self {
        Self::Fixed
    }
}

#[must_use]
pub fn auto_max_iterations(zoom_level: f64, offset: i32) -> u32 {
    let zoom = if zoom_level.is_finite() && zoom_level > 0.0 {
        zoom_level
    } else {
        1.0
    };

    let base = (AUTO_BASE_ITERATIONS * zoom.powf(AUTO_ZOOM_EXPONENT)).floor() as i64;
    (base + i64::from(offset)).clamp(1, i64::from(u32::MAX)) as u32
}
