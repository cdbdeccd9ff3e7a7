use crate::core::data::colour::Colour;

/// Maps an iteration count to a colour. Total: counts past the limit clamp.
pub trait ColourMap: Send + Sync {
    fn map(&self, iterations: u32, max_iterations: u32) -> Colour;
}
