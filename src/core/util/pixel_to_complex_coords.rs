use crate::core::data::complex::Complex;
use crate::core::data::plane_region::PlaneRegion;
use crate::core::data::point::Point;
use crate::core::data::section::BandBounds;
use crate::core::data::viewport_size::ViewportSize;
use crate::core::errors::InvalidParameterError;

/// Affine map from viewport pixels to plane coordinates.
///
/// Pixel `(x, y)` lands on `real_min + x * width / W`, `imag_min + y * height / H`,
/// so row 0 is `imag_min` and the far edges are never sampled.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlaneMapping {
    region: PlaneRegion,
    size: ViewportSize,
    real_step: f64,
    imag_step: f64,
}

impl PlaneMapping {
    #[must_use]
    pub fn new(region: PlaneRegion, size: ViewportSize) -> Self {
        Self {
            region,
            size,
            real_step: region.width() / f64::from(size.width()),
            imag_step: region.height() / f64::from(size.height()),
        }
    }

    #[must_use]
    pub fn region(&self) -> PlaneRegion {
        self.region
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    #[must_use]
    pub fn real_step(&self) -> f64 {
        self.real_step
    }

    #[must_use]
    pub fn imag_step(&self) -> f64 {
        self.imag_step
    }

    /// Unchecked mapping for in-bounds pixels on the hot path.
    #[inline]
    #[must_use]
    pub fn point_at(&self, x: u32, y: u32) -> Complex {
        Complex {
            real: self.region.real_min() + f64::from(x) * self.real_step,
            imag: self.region.imag_min() + f64::from(y) * self.imag_step,
        }
    }

    /// Plane extent covered by pixel deltas at the current scale.
    #[must_use]
    pub fn pixel_delta(&self, dx: i32, dy: i32) -> Complex {
        Complex {
            real: f64::from(dx) * self.real_step,
            imag: f64::from(dy) * self.imag_step,
        }
    }

    /// Plane bounds spanned by `rows`, from the first row's edge to the next band's edge.
    #[must_use]
    pub fn rows_region(&self, rows: std::ops::Range<u32>) -> BandBounds {
        BandBounds {
            real_min: self.region.real_min(),
            real_max: self.region.real_max(),
            imag_min: self.region.imag_min() + f64::from(rows.start) * self.imag_step,
            imag_max: self.region.imag_min() + f64::from(rows.end) * self.imag_step,
        }
    }
}

pub fn pixel_to_complex_coords(
    pixel_position: Point,
    mapping: &PlaneMapping,
) -> Result<Complex, InvalidParameterError> {
    let size = mapping.size();

    if !size.contains_point(pixel_position) {
        return Err(InvalidParameterError::PointOutsideViewport {
            point: pixel_position,
            width: size.width(),
            height: size.height(),
        });
    }

    Ok(mapping.point_at(pixel_position.x as u32, pixel_position.y as u32))
}
