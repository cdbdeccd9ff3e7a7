use std::error::Error;
use std::fmt;

/// A render for `generation` failed; `section` names the failing worker task, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderError {
    pub generation: u64,
    pub section: Option<usize>,
    pub message: String,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.section {
            Some(section) => write!(
                f,
                "render {} failed in section {}: {}",
                self.generation, section, self.message
            ),
            None => write!(f, "render {} failed: {}", self.generation, self.message),
        }
    }
}

impl Error for RenderError {}
