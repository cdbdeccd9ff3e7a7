use std::any::Any;
use std::error::Error;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};

use log::{debug, warn};
use rayon::prelude::*;

use crate::core::actions::cancellation::{CANCEL_CHECK_INTERVAL_PIXELS, CancelToken, Cancelled};
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::actions::generate_fractal::worker_pool::WorkerPool;
use crate::core::data::iteration_buffer::{IterationBuffer, IterationBufferError, SectionFragment};
use crate::core::data::section::Section;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Why a request produced no iteration buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerateFractalError {
    /// The operation was cancelled before completion.
    Cancelled(Cancelled),
    /// A section task returned an error or panicked; the whole request fails.
    WorkerFailure { section: usize, message: String },
    /// Fragments did not tile the viewport.
    Assembly(IterationBufferError),
}

impl fmt::Display for GenerateFractalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::WorkerFailure { section, message } => {
                write!(f, "worker failed on section {}: {}", section, message)
            }
            Self::Assembly(err) => write!(f, "assembly error: {}", err),
        }
    }
}

impl Error for GenerateFractalError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::WorkerFailure { .. } => None,
            Self::Assembly(err) => Some(err),
        }
    }
}

impl From<IterationBufferError> for GenerateFractalError {
    fn from(err: IterationBufferError) -> Self {
        Self::Assembly(err)
    }
}

/// Computes every section on the pool and assembles them by section identity.
///
/// Each section task is isolated with `catch_unwind`, so a panicking kernel
/// fails only this request and leaves the pool usable. When several sections
/// fail, the lowest section index is reported. Cancellation is polled at the
/// start of each row and every [`CANCEL_CHECK_INTERVAL_PIXELS`] within it.
pub fn generate_fractal_sections<Alg, C>(
    pool: &WorkerPool,
    mapping: &PlaneMapping,
    sections: &[Section],
    algorithm: &Alg,
    cancel: &C,
) -> Result<IterationBuffer, GenerateFractalError>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
{
    let results: Vec<Result<SectionFragment, GenerateFractalError>> = pool.install(|| {
        sections
            .par_iter()
            .map(|section| run_section(section, mapping, algorithm, cancel))
            .collect()
    });

    let mut fragments = Vec::with_capacity(results.len());
    let mut cancelled = false;

    for result in results {
        match result {
            Ok(fragment) => fragments.push(fragment),
            Err(GenerateFractalError::Cancelled(_)) => cancelled = true,
            Err(err) => {
                warn!("{}", err);
                return Err(err);
            }
        }
    }

    if cancelled {
        debug!("section generation cancelled");
        return Err(GenerateFractalError::Cancelled(Cancelled));
    }

    Ok(IterationBuffer::assemble(mapping.size(), fragments)?)
}

fn run_section<Alg, C>(
    section: &Section,
    mapping: &PlaneMapping,
    algorithm: &Alg,
    cancel: &C,
) -> Result<SectionFragment, GenerateFractalError>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
{
    panic::catch_unwind(AssertUnwindSafe(|| {
        compute_section(section, mapping, algorithm, cancel)
    }))
    .unwrap_or_else(|payload| {
        Err(GenerateFractalError::WorkerFailure {
            section: section.index,
            message: panic_message(payload.as_ref()),
        })
    })
}

fn compute_section<Alg, C>(
    section: &Section,
    mapping: &PlaneMapping,
    algorithm: &Alg,
    cancel: &C,
) -> Result<SectionFragment, GenerateFractalError>
where
    Alg: FractalAlgorithm,
    C: CancelToken,
{
    let width = mapping.size().width();
    let mut counts = Vec::with_capacity(section.row_count() as usize * width as usize);

    for y in section.rows.clone() {
        for x in 0..width {
            if (x as usize) % CANCEL_CHECK_INTERVAL_PIXELS == 0 && cancel.is_cancelled() {
                return Err(GenerateFractalError::Cancelled(Cancelled));
            }

            let count = algorithm
                .compute(mapping.point_at(x, y))
                .map_err(|err| GenerateFractalError::WorkerFailure {
                    section: section.index,
                    message: err.to_string(),
                })?;
            counts.push(count);
        }
    }

    Ok(SectionFragment {
        section: section.index,
        rows: section.rows.clone(),
        counts,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}
