use crate::core::data::colour::Colour;
use crate::core::data::viewport_size::ViewportSize;
use std::error::Error;
use std::fmt;

fn viewport_to_buffer_size(size: ViewportSize) -> usize {
    size.pixel_count() * 3
}

#[derive(Debug, Clone, PartialEq)]
pub enum PixelBufferError {
    BoundsMismatch {
        viewport_size: usize,
        buffer_size: usize,
    },
}

impl fmt::Display for PixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundsMismatch {
                viewport_size,
                buffer_size,
            } => {
                write!(
                    f,
                    "viewport size {} does not match buffer size {}",
                    viewport_size, buffer_size
                )
            }
        }
    }
}

impl Error for PixelBufferError {}

pub type PixelBufferData = Vec<u8>;

/// Packed RGB bytes, row-major, three bytes per pixel.
#[derive(Debug, Clone, PartialEq)]
pub struct PixelBuffer {
    size: ViewportSize,
    buffer: PixelBufferData,
}

impl PixelBuffer {
    pub fn from_data(size: ViewportSize, buffer: PixelBufferData) -> Result<Self, PixelBufferError> {
        let viewport_size = viewport_to_buffer_size(size);

        if viewport_size != buffer.len() {
            return Err(PixelBufferError::BoundsMismatch {
                viewport_size,
                buffer_size: buffer.len(),
            });
        }

        Ok(Self { size, buffer })
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    #[must_use]
    pub fn buffer(&self) -> &PixelBufferData {
        &self.buffer
    }

    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Colour> {
        if x >= self.size.width() || y >= self.size.height() {
            return None;
        }

        let offset = (y as usize * self.size.width() as usize + x as usize) * 3;
        Some(Colour {
            r: self.buffer[offset],
            g: self.buffer[offset + 1],
            b: self.buffer[offset + 2],
        })
    }
}
