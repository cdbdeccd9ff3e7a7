use crate::core::actions::cancellation::{CancelToken, Cancelled};
use crate::core::actions::generate_fractal::worker_pool::WorkerPool;
use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::iteration_buffer::IterationBuffer;
use crate::core::data::pixel_buffer::{PixelBuffer, PixelBufferData, PixelBufferError};
use crate::core::data::section::Section;
use rayon::prelude::*;
use std::error::Error;
use std::fmt;

/// Error type for pixel buffer generation.
///
/// Distinguishes processing errors from cancellation so callers can drop a
/// cancelled frame silently.
#[derive(Debug, Clone, PartialEq)]
pub enum GeneratePixelBufferError {
    /// The operation was cancelled before completion.
    Cancelled(Cancelled),
    /// A row belongs to a section that has no colour map.
    MissingColourMap { section: usize },
    /// A row is not covered by any section.
    UncoveredRow { row: u32 },
    /// A pixel buffer construction error occurred.
    PixelBuffer(PixelBufferError),
}

impl fmt::Display for GeneratePixelBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Cancelled(c) => write!(f, "{}", c),
            Self::MissingColourMap { section } => {
                write!(f, "no colour map for section {}", section)
            }
            Self::UncoveredRow { row } => write!(f, "row {} is not in any section", row),
            Self::PixelBuffer(err) => write!(f, "pixel buffer error: {}", err),
        }
    }
}

impl Error for GeneratePixelBufferError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Cancelled(c) => Some(c),
            Self::PixelBuffer(err) => Some(err),
            _ => None,
        }
    }
}

impl From<PixelBufferError> for GeneratePixelBufferError {
    fn from(err: PixelBufferError) -> Self {
        Self::PixelBuffer(err)
    }
}

/// Colours an iteration buffer, using `section_maps[i]` for the rows of
/// section `i`. `cancel` is checked before each row.
pub fn generate_pixel_buffer<M, C>(
    pool: &WorkerPool,
    iterations: &IterationBuffer,
    sections: &[Section],
    section_maps: &[M],
    max_iterations: u32,
    cancel: &C,
) -> Result<PixelBuffer, GeneratePixelBufferError>
where
    M: ColourMap,
    C: CancelToken,
{
    let size = iterations.size();
    let row_maps = row_colour_maps(size.height(), sections, section_maps)?;
    let row_bytes = size.width() as usize * 3;
    let mut data: PixelBufferData = vec![0; size.pixel_count() * 3];

    pool.install(|| {
        data.par_chunks_mut(row_bytes)
            .zip(row_maps.par_iter())
            .enumerate()
            .try_for_each(|(y, (row, colour_map))| {
                if cancel.is_cancelled() {
                    return Err(GeneratePixelBufferError::Cancelled(Cancelled));
                }

                for (pixel, &count) in row.chunks_exact_mut(3).zip(iterations.row(y as u32)) {
                    let colour = colour_map.map(count, max_iterations);
                    pixel[0] = colour.r;
                    pixel[1] = colour.g;
                    pixel[2] = colour.b;
                }

                Ok(())
            })
    })?;

    Ok(PixelBuffer::from_data(size, data)?)
}

fn row_colour_maps<'a, M>(
    height: u32,
    sections: &[Section],
    section_maps: &'a [M],
) -> Result<Vec<&'a M>, GeneratePixelBufferError> {
    let mut rows: Vec<Option<&M>> = vec![None; height as usize];

    for section in sections {
        let map = section_maps
            .get(section.index)
            .ok_or(GeneratePixelBufferError::MissingColourMap {
                section: section.index,
            })?;

        for row in section.rows.clone() {
            if let Some(slot) = rows.get_mut(row as usize) {
                *slot = Some(map);
            }
        }
    }

    rows.into_iter()
        .enumerate()
        .map(|(row, map)| map.ok_or(GeneratePixelBufferError::UncoveredRow { row: row as u32 }))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::actions::cancellation::NeverCancel;
    use crate::core::data::colour::Colour;
    use crate::core::data::iteration_buffer::SectionFragment;
    use crate::core::data::section::BandBounds;
    use crate::core::data::viewport_size::ViewportSize;
    use std::num::NonZeroUsize;

    /// Writes the count into every channel, tagged by a fixed blue value.
    struct StubColourMap {
        tag: u8,
    }

    impl ColourMap for StubColourMap {
        fn map(&self, iterations: u32, _max_iterations: u32) -> Colour {
            Colour::new(iterations as u8, iterations as u8, self.tag)
        }
    }

    fn pool() -> WorkerPool {
        WorkerPool::new(NonZeroUsize::new(2).unwrap()).unwrap()
    }

    fn region() -> BandBounds {
        BandBounds {
            real_min: 0.0,
            real_max: 1.0,
            imag_min: 0.0,
            imag_max: 1.0,
        }
    }

    fn two_sections() -> Vec<Section> {
        vec![
            Section {
                index: 0,
                rows: 0..1,
                region: region(),
            },
            Section {
                index: 1,
                rows: 1..2,
                region: region(),
            },
        ]
    }

    fn iterations() -> IterationBuffer {
        IterationBuffer::assemble(
            ViewportSize::new(2, 2).unwrap(),
            vec![SectionFragment {
                section: 0,
                rows: 0..2,
                counts: vec![1, 2, 3, 4],
            }],
        )
        .unwrap()
    }

    #[test]
    fn each_section_uses_its_own_map() {
        let maps = [StubColourMap { tag: 10 }, StubColourMap { tag: 20 }];

        let buffer = generate_pixel_buffer(
            &pool(),
            &iterations(),
            &two_sections(),
            &maps,
            10,
            &NeverCancel,
        )
        .unwrap();

        assert_eq!(buffer.buffer(), &vec![1, 1, 10, 2, 2, 10, 3, 3, 20, 4, 4, 20]);
    }

    #[test]
    fn missing_map_is_an_error() {
        let maps = [StubColourMap { tag: 10 }];

        let result = generate_pixel_buffer(
            &pool(),
            &iterations(),
            &two_sections(),
            &maps,
            10,
            &NeverCancel,
        );

        assert_eq!(
            result.map(|_| ()),
            Err(GeneratePixelBufferError::MissingColourMap { section: 1 })
        );
    }

    #[test]
    fn uncovered_row_is_an_error() {
        let maps = [StubColourMap { tag: 10 }];
        let sections = vec![two_sections().remove(0)];

        let result =
            generate_pixel_buffer(&pool(), &iterations(), &sections, &maps, 10, &NeverCancel);

        assert_eq!(
            result.map(|_| ()),
            Err(GeneratePixelBufferError::UncoveredRow { row: 1 })
        );
    }

    #[test]
    fn cancelled_token_stops_colouring() {
        let maps = [StubColourMap { tag: 1 }, StubColourMap { tag: 2 }];
        let cancel = || true;

        let result = generate_pixel_buffer(
            &pool(),
            &iterations(),
            &two_sections(),
            &maps,
            10,
            &cancel,
        );

        assert_eq!(
            result.map(|_| ()),
            Err(GeneratePixelBufferError::Cancelled(Cancelled))
        );
    }
}
