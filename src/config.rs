//! Startup configuration for the explorer.
//!
//! Every field has a default, so an empty JSON object (or no file at all)
//! yields the classic Mandelbrot overview.

use std::error::Error;
use std::fmt;
use std::fs;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::controllers::interactive::state_machine::ViewState;
use crate::core::data::complex::Complex;
use crate::core::data::fractal_params::{
    DEFAULT_FATOU_EXPONENT, DEFAULT_JULIA_CONSTANT, FractalFamily, FractalKind, FractalParameters,
};
use crate::core::data::iteration_policy::IterationPolicy;
use crate::core::data::plane_region::PlaneRegion;
use crate::core::data::viewport_size::ViewportSize;
use crate::core::errors::InvalidParameterError;
use crate::core::themes::theme::Theme;
use crate::core::util::calculate_sections::available_worker_count;

#[derive(Debug)]
pub enum ConfigError {
    Io { path: PathBuf, source: std::io::Error },
    Parse(serde_json::Error),
    Invalid(InvalidParameterError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io { path, source } => {
                write!(f, "cannot read config {}: {}", path.display(), source)
            }
            Self::Parse(err) => write!(f, "config is not valid JSON: {}", err),
            Self::Invalid(err) => write!(f, "invalid config value: {}", err),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            Self::Invalid(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err)
    }
}

impl From<InvalidParameterError> for ConfigError {
    fn from(err: InvalidParameterError) -> Self {
        Self::Invalid(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RegionConfig {
    pub real_min: f64,
    pub real_max: f64,
    pub imag_min: f64,
    pub imag_max: f64,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            real_min: -2.0,
            real_max: 1.0,
            imag_min: -1.5,
            imag_max: 1.5,
        }
    }
}

/// Raw settings as they appear in the JSON file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    pub viewport: ViewportConfig,
    pub region: RegionConfig,
    /// Family display name: "Mandelbrot", "Julia" or "Fatou".
    pub family: String,
    pub max_iterations: u32,
    pub julia_constant: Complex,
    pub fatou_exponent: u32,
    /// Theme display name, e.g. "Rainbow3" or "CPU Cores".
    pub theme: String,
    /// Fixes the colours of the "CPU Cores" theme; random when unset.
    pub theme_seed: Option<u64>,
    /// Worker threads; the number of cores when unset.
    pub worker_count: Option<usize>,
    pub auto_iterations: bool,
    pub iteration_offset: i32,
    pub bookmark_path: PathBuf,
    pub output_path: PathBuf,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            viewport: ViewportConfig::default(),
            region: RegionConfig::default(),
            family: FractalKind::Mandelbrot.display_name().to_string(),
            max_iterations: 100,
            julia_constant: DEFAULT_JULIA_CONSTANT,
            fatou_exponent: DEFAULT_FATOU_EXPONENT,
            theme: Theme::Default.display_name().to_string(),
            theme_seed: None,
            worker_count: None,
            auto_iterations: false,
            iteration_offset: 0,
            bookmark_path: PathBuf::from("bookmarks.json"),
            output_path: PathBuf::from("output/fractal.ppm"),
        }
    }
}

/// Validated settings ready to start the explorer with.
#[derive(Debug, Clone, PartialEq)]
pub struct ExplorerSettings {
    pub home: ViewState,
    pub worker_count: NonZeroUsize,
    pub bookmark_path: PathBuf,
    pub output_path: PathBuf,
}

impl ExplorerConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json_str(&contents)
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn validate(&self) -> Result<ExplorerSettings, ConfigError> {
        let size = ViewportSize::new(self.viewport.width, self.viewport.height)?;
        let region = PlaneRegion::new(
            self.region.real_min,
            self.region.real_max,
            self.region.imag_min,
            self.region.imag_max,
        )?;

        let family = match FractalKind::from_name(&self.family)? {
            FractalKind::Mandelbrot => FractalFamily::Mandelbrot,
            FractalKind::Julia => FractalFamily::Julia {
                c: self.julia_constant,
            },
            FractalKind::Fatou => FractalFamily::Fatou {
                exponent: self.fatou_exponent,
            },
        };
        let params = FractalParameters::new(family, self.max_iterations)?;

        // Unselected families are checked too.
        FractalParameters::new(
            FractalFamily::Julia {
                c: self.julia_constant,
            },
            self.max_iterations,
        )?;
        FractalParameters::new(
            FractalFamily::Fatou {
                exponent: self.fatou_exponent,
            },
            self.max_iterations,
        )?;

        let theme = Theme::from_name(&self.theme)?;

        let worker_count = match self.worker_count {
            Some(count) => NonZeroUsize::new(count).ok_or(InvalidParameterError::InvalidWorkerCount)?,
            None => available_worker_count(),
        };

        let iteration_policy = if self.auto_iterations {
            IterationPolicy::Auto {
                offset: self.iteration_offset,
            }
        } else {
            IterationPolicy::Fixed
        };

        let theme_seed = self
            .theme_seed
            .unwrap_or_else(|| rand::thread_rng().next_u64());

        Ok(ExplorerSettings {
            home: ViewState {
                size,
                region,
                params,
                theme,
                theme_seed,
                iteration_policy,
                julia_constant: self.julia_constant,
                fatou_exponent: self.fatou_exponent,
            },
            worker_count,
            bookmark_path: self.bookmark_path.clone(),
            output_path: self.output_path.clone(),
        })
    }
}
