use serde::{Deserialize, Serialize};

use crate::core::data::complex::Complex;
use crate::core::data::viewport_size::ViewportSize;
use crate::core::errors::InvalidParameterError;

/// An axis-aligned rectangle of the complex plane.
///
/// Always finite with strictly positive extent on both axes.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPlaneRegion", into = "RawPlaneRegion")]
pub struct PlaneRegion {
    real_min: f64,
    real_max: f64,
    imag_min: f64,
    imag_max: f64,
}

impl PlaneRegion {
    pub fn new(
        real_min: f64,
        real_max: f64,
        imag_min: f64,
        imag_max: f64,
    ) -> Result<Self, InvalidParameterError> {
        let all_finite = [real_min, real_max, imag_min, imag_max]
            .iter()
            .all(|v| v.is_finite());

        if !all_finite || real_max <= real_min || imag_max <= imag_min {
            return Err(InvalidParameterError::InvalidRegion {
                real_min,
                real_max,
                imag_min,
                imag_max,
            });
        }

        Ok(Self {
            real_min,
            real_max,
            imag_min,
            imag_max,
        })
    }

    pub fn from_center(center: Complex, width: f64, height: f64) -> Result<Self, InvalidParameterError> {
        let half_w = width / 2.0;
        let half_h = height / 2.0;

        Self::new(
            center.real - half_w,
            center.real + half_w,
            center.imag - half_h,
            center.imag + half_h,
        )
    }

    #[must_use]
    pub fn real_min(&self) -> f64 {
        self.real_min
    }

    #[must_use]
    pub fn real_max(&self) -> f64 {
        self.real_max
    }

    #[must_use]
    pub fn imag_min(&self) -> f64 {
        self.imag_min
    }

    #[must_use]
    pub fn imag_max(&self) -> f64 {
        self.imag_max
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.real_max - self.real_min
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.imag_max - self.imag_min
    }

    #[must_use]
    pub fn center(&self) -> Complex {
        Complex {
            real: self.real_min + self.width() / 2.0,
            imag: self.imag_min + self.height() / 2.0,
        }
    }

    /// Scales both extents by `factor` around `anchor`, which becomes the new centre.
    ///
    /// `factor < 1` zooms in. The aspect ratio is preserved.
    pub fn zoom_about(&self, anchor: Complex, factor: f64) -> Result<Self, InvalidParameterError> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(InvalidParameterError::InvalidZoomFactor { factor });
        }

        Self::from_center(anchor, self.width() * factor, self.height() * factor)
    }

    pub fn translate(&self, delta: Complex) -> Result<Self, InvalidParameterError> {
        Self::new(
            self.real_min + delta.real,
            self.real_max + delta.real,
            self.imag_min + delta.imag,
            self.imag_max + delta.imag,
        )
    }

    /// Expands the short axis about the centre so a pixel covers the same
    /// plane distance horizontally and vertically.
    pub fn fit_aspect(&self, viewport: ViewportSize) -> Result<Self, InvalidParameterError> {
        let pixel_aspect = f64::from(viewport.height()) / f64::from(viewport.width());
        let wanted_height = self.width() * pixel_aspect;

        if wanted_height >= self.height() {
            Self::from_center(self.center(), self.width(), wanted_height)
        } else {
            Self::from_center(self.center(), self.height() / pixel_aspect, self.height())
        }
    }

    /// Keeps the centre and real extent, refitting the imaginary extent.
    pub fn refit_height(&self, viewport: ViewportSize) -> Result<Self, InvalidParameterError> {
        let pixel_aspect = f64::from(viewport.height()) / f64::from(viewport.width());
        Self::from_center(self.center(), self.width(), self.width() * pixel_aspect)
    }
}

#[derive(Serialize, Deserialize)]
struct RawPlaneRegion {
    real_min: f64,
    real_max: f64,
    imag_min: f64,
    imag_max: f64,
}

impl TryFrom<RawPlaneRegion> for PlaneRegion {
    type Error = InvalidParameterError;

    fn try_from(raw: RawPlaneRegion) -> Result<Self, Self::Error> {
        Self::new(raw.real_min, raw.real_max, raw.imag_min, raw.imag_max)
    }
}

impl From<PlaneRegion> for RawPlaneRegion {
    fn from(region: PlaneRegion) -> Self {
        Self {
            real_min: region.real_min,
            real_max: region.real_max,
            imag_min: region.imag_min,
            imag_max: region.imag_max,
        }
    }
}
