//! Application-layer types exchanged between the input surface, the
//! viewport state machine and the interactive controller.

use crate::core::data::bookmark::Bookmark;
use crate::core::data::complex::Complex;
use crate::core::data::iteration_policy::IterationPolicy;
use crate::core::data::point::Point;
use crate::core::data::viewport_size::ViewportSize;
use crate::core::engine::RenderJob;

/// A render job stamped with the generation that issued it.
///
/// Generations increase strictly; a request is stale as soon as a higher
/// generation exists.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderRequest {
    pub generation: u64,
    pub job: RenderJob,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanDirection {
    Left,
    Right,
    /// Towards row 0, i.e. decreasing imaginary part.
    Up,
    Down,
}

/// A user intent the viewport state machine validates and applies.
#[derive(Debug, Clone, PartialEq)]
pub enum ViewAction {
    /// Recentres on `anchor` (viewport centre when `None`) and scales the
    /// extents by `factor`; below 1 zooms in.
    ZoomAt { anchor: Option<Point>, factor: f64 },
    /// Moves the view by a pixel delta at the current scale.
    Pan { dx: i32, dy: i32 },
    /// Moves the view a tenth of its extent.
    Step(PanDirection),
    Resize(ViewportSize),
    SelectTheme(String),
    CycleTheme,
    SelectFamily(String),
    SetJuliaConstant(Complex),
    SetMaxIterations(u32),
    SetIterationPolicy(IterationPolicy),
    LoadBookmark(Bookmark),
    Reset,
    Redraw,
}
