use crate::core::actions::generate_fractal::generate_fractal_sections::GenerateFractalError;
use crate::core::actions::generate_fractal::ports::fractal_algorithm::FractalAlgorithm;
use crate::core::data::iteration_buffer::{IterationBuffer, SectionFragment};
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Single-threaded reference: the whole viewport as one section on the calling thread.
pub fn generate_fractal_serial<Alg: FractalAlgorithm>(
    mapping: &PlaneMapping,
    algorithm: &Alg,
) -> Result<IterationBuffer, GenerateFractalError> {
    let size = mapping.size();
    let mut counts = Vec::with_capacity(size.pixel_count());

    for y in 0..size.height() {
        for x in 0..size.width() {
            let count = algorithm
                .compute(mapping.point_at(x, y))
                .map_err(|err| GenerateFractalError::WorkerFailure {
                    section: 0,
                    message: err.to_string(),
                })?;
            counts.push(count);
        }
    }

    let fragment = SectionFragment {
        section: 0,
        rows: 0..size.height(),
        counts,
    };

    Ok(IterationBuffer::assemble(size, vec![fragment])?)
}
