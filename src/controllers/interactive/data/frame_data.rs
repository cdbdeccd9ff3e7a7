use std::time::Duration;

use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::themes::assignment::ThemeAssignment;

#[derive(Debug, Clone, PartialEq)]
pub struct FrameData {
    pub generation: u64,
    pub pixel_buffer: PixelBuffer,
    pub iterations: IterationBuffer,
    pub assignment: ThemeAssignment,
    pub render_duration: Duration,
}
