//! One render, end to end: partition, dispatch, assemble, colour.

use std::error::Error;
use std::fmt;
use std::num::NonZeroUsize;
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::generate_fractal_sections::{
    GenerateFractalError, generate_fractal_sections,
};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_fractal::worker_pool::{WorkerPool, WorkerPoolError};
use crate::core::actions::generate_pixel_buffer::generate_pixel_buffer::{
    GeneratePixelBufferError, generate_pixel_buffer,
};
use crate::core::data::fractal_params::FractalParameters;
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::PixelBuffer;
use crate::core::data::plane_region::PlaneRegion;
use crate::core::data::viewport_size::ViewportSize;
use crate::core::fractals::escape_time::EscapeTimeKernel;
use crate::core::themes::assignment::ThemeAssignment;
use crate::core::themes::theme::Theme;
use crate::core::util::calculate_sections::calculate_sections;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Everything needed to produce one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderJob {
    pub size: ViewportSize,
    pub region: PlaneRegion,
    pub params: FractalParameters,
    pub theme: Theme,
    /// Seeds per-section theme choice for meta themes.
    pub theme_seed: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFrame {
    pub pixel_buffer: PixelBuffer,
    pub iterations: IterationBuffer,
    pub assignment: ThemeAssignment,
    pub render_duration: Duration,
}

#[derive(Debug, Clone, PartialEq)]
pub enum EngineError {
    Cancelled(Cancelled),
    WorkerFailure { section: usize, message: String },
    Internal(String),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::WorkerFailure { section, message } => {
                write!(f, "worker failed on section {}: {}", section, message)
            }
            Self::Internal(message) => write!(f, "render failed: {}", message),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            _ => None,
        }
    }
}

impl From<GenerateFractalError> for EngineError {
    fn from(err: GenerateFractalError) -> Self {
        match err {
            GenerateFractalError::Cancelled(c) => Self::Cancelled(c),
            GenerateFractalError::WorkerFailure { section, message } => {
                Self::WorkerFailure { section, message }
            }
            GenerateFractalError::Assembly(err) => Self::Internal(err.to_string()),
        }
    }
}

impl From<GeneratePixelBufferError> for EngineError {
    fn from(err: GeneratePixelBufferError) -> Self {
        match err {
            GeneratePixelBufferError::Cancelled(c) => Self::Cancelled(c),
            other => Self::Internal(other.to_string()),
        }
    }
}

/// Owns the worker pool; created once at startup.
#[derive(Debug)]
pub struct FractalEngine {
    pool: WorkerPool,
}

impl FractalEngine {
    pub fn new(worker_count: NonZeroUsize) -> Result<Self, WorkerPoolError> {
        Ok(Self {
            pool: WorkerPool::new(worker_count)?,
        })
    }

    #[must_use]
    pub fn worker_count(&self) -> NonZeroUsize {
        self.pool.worker_count()
    }

    pub fn render<C: CancelToken>(
        &self,
        job: &RenderJob,
        cancel: &C,
    ) -> Result<RenderedFrame, EngineError> {
        self.render_with(job, &EscapeTimeKernel::new(&job.params), cancel)
    }

    /// Renders `job` with an explicit algorithm in place of the family kernel.
    pub fn render_with<Alg, C>(
        &self,
        job: &RenderJob,
        algorithm: &Alg,
        cancel: &C,
    ) -> Result<RenderedFrame, EngineError>
    where
        Alg: FractalAlgorithm,
        C: CancelToken,
    {
        let start = Instant::now();
        let mapping = PlaneMapping::new(job.region, job.size);
        let sections = calculate_sections(&mapping, self.worker_count());

        debug!(
            "rendering {}x{} {} in {} sections",
            job.size.width(),
            job.size.height(),
            job.params.family().kind(),
            sections.len()
        );

        let iterations =
            generate_fractal_sections(&self.pool, &mapping, &sections, algorithm, cancel)?;

        if cancel.is_cancelled() {
            return Err(EngineError::Cancelled(Cancelled));
        }

        let assignment = ThemeAssignment::resolve(job.theme, sections.len(), job.theme_seed);
        let section_maps: Vec<_> = (0..sections.len())
            .map(|index| assignment.for_section(index))
            .collect();

        let pixel_buffer = generate_pixel_buffer(
            &self.pool,
            &iterations,
            &sections,
            &section_maps,
            algorithm.max_iterations(),
            cancel,
        )?;

        let render_duration = start.elapsed();
        info!(
            "rendered {}x{} frame in {:?}",
            job.size.width(),
            job.size.height(),
            render_duration
        );

        Ok(RenderedFrame {
            pixel_buffer,
            iterations,
            assignment,
            render_duration,
        })
    }
}
