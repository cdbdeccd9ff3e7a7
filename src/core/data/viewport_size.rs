use serde::{Deserialize, Serialize};

use crate::core::data::point::Point;
use crate::core::errors::InvalidParameterError;

/// Pixel dimensions of the drawing surface.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawViewportSize", into = "RawViewportSize")]
pub struct ViewportSize {
    width: u32,
    height: u32,
}

impl ViewportSize {
    pub fn new(width: u32, height: u32) -> Result<Self, InvalidParameterError> {
        if width == 0 || height == 0 {
            return Err(InvalidParameterError::InvalidViewport { width, height });
        }

        Ok(Self { width, height })
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[must_use]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point {
            x: (self.width / 2) as i32,
            y: (self.height / 2) as i32,
        }
    }

    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        point.x >= 0
            && point.y >= 0
            && (point.x as u32) < self.width
            && (point.y as u32) < self.height
    }
}

#[derive(Serialize, Deserialize)]
struct RawViewportSize {
    width: u32,
    height: u32,
}

impl TryFrom<RawViewportSize> for ViewportSize {
    type Error = InvalidParameterError;

    fn try_from(raw: RawViewportSize) -> Result<Self, Self::Error> {
        Self::new(raw.width, raw.height)
    }
}

impl From<ViewportSize> for RawViewportSize {
    fn from(size: ViewportSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}
