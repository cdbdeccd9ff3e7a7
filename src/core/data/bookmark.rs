use serde::{Deserialize, Serialize};

use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::iteration_policy::IterationPolicy;
use crate::core::data::plane_region::PlaneRegion;
use crate::core::themes::theme::Theme;

/// A named, restorable view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub name: String,
    pub region: PlaneRegion,
    pub params: FractalParameters,
    pub theme: Theme,
    #[serde(default)]
    pub iteration_policy: IterationPolicy,
    pub zoom_level: f64,
    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

/// Selects a bookmark in a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookmarkKey {
    Name(String),
    Index(usize),
}

impl std::fmt::Display for BookmarkKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Name(name) => write!(f, "\"{}\"", name),
            Self::Index(index) => write!(f, "#{}", index),
        }
    }
}
