use std::error::Error;
use std::fmt;
use std::ops::Range;

use crate::core::data::viewport_size::ViewportSize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IterationBufferError {
    FragmentSizeMismatch {
        section: usize,
        expected: usize,
        actual: usize,
    },
    RowsOutOfBounds {
        section: usize,
        rows: Range<u32>,
        height: u32,
    },
    RowWrittenTwice {
        section: usize,
        row: u32,
    },
    RowMissing {
        row: u32,
    },
}

impl fmt::Display for IterationBufferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FragmentSizeMismatch {
                section,
                expected,
                actual,
            } => write!(
                f,
                "section {} produced {} values, expected {}",
                section, actual, expected
            ),
            Self::RowsOutOfBounds {
                section,
                rows,
                height,
            } => write!(
                f,
                "section {} rows {}..{} exceed viewport height {}",
                section, rows.start, rows.end, height
            ),
            Self::RowWrittenTwice { section, row } => {
                write!(f, "section {} overlaps row {}", section, row)
            }
            Self::RowMissing { row } => write!(f, "no section covered row {}", row),
        }
    }
}

impl Error for IterationBufferError {}

/// Iteration counts for one section, tagged with the rows it covers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionFragment {
    pub section: usize,
    pub rows: Range<u32>,
    pub counts: Vec<u32>,
}

/// Row-major iteration counts for a whole viewport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IterationBuffer {
    size: ViewportSize,
    counts: Vec<u32>,
}

impl IterationBuffer {
    /// Places each fragment at its row offset; every row must be written exactly once.
    pub fn assemble(
        size: ViewportSize,
        fragments: Vec<SectionFragment>,
    ) -> Result<Self, IterationBufferError> {
        let width = size.width() as usize;
        let mut counts = vec![0; size.pixel_count()];
        let mut written = vec![false; size.height() as usize];

        for fragment in fragments {
            if fragment.rows.end > size.height() || fragment.rows.start > fragment.rows.end {
                return Err(IterationBufferError::RowsOutOfBounds {
                    section: fragment.section,
                    rows: fragment.rows,
                    height: size.height(),
                });
            }

            let expected = (fragment.rows.end - fragment.rows.start) as usize * width;
            if fragment.counts.len() != expected {
                return Err(IterationBufferError::FragmentSizeMismatch {
                    section: fragment.section,
                    expected,
                    actual: fragment.counts.len(),
                });
            }

            for row in fragment.rows.clone() {
                if written[row as usize] {
                    return Err(IterationBufferError::RowWrittenTwice {
                        section: fragment.section,
                        row,
                    });
                }
                written[row as usize] = true;
            }

            let offset = fragment.rows.start as usize * width;
            counts[offset..offset + expected].copy_from_slice(&fragment.counts);
        }

        if let Some(row) = written.iter().position(|w| !w) {
            return Err(IterationBufferError::RowMissing { row: row as u32 });
        }

        Ok(Self { size, counts })
    }

    #[must_use]
    pub fn size(&self) -> ViewportSize {
        self.size
    }

    #[must_use]
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    #[must_use]
    pub fn get(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.size.width() || y >= self.size.height() {
            return None;
        }

        self.counts
            .get(y as usize * self.size.width() as usize + x as usize)
            .copied()
    }

    #[must_use]
    pub fn row(&self, y: u32) -> &[u32] {
        let width = self.size.width() as usize;
        let start = y as usize * width;
        &self.counts[start..start + width]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fragment(section: usize, rows: Range<u32>, width: u32, value: u32) -> SectionFragment {
        let len = (rows.end - rows.start) as usize * width as usize;
        SectionFragment {
            section,
            rows,
            counts: vec![value; len],
        }
    }

    #[test]
    fn test_assemble_places_fragments_by_rows_not_arrival_order() {
        let size = ViewportSize::new(2, 3).unwrap();
        let buffer = IterationBuffer::assemble(
            size,
            vec![fragment(1, 2..3, 2, 9), fragment(0, 0..2, 2, 4)],
        )
        .unwrap();

        assert_eq!(buffer.counts(), &[4, 4, 4, 4, 9, 9]);
        assert_eq!(buffer.get(1, 2), Some(9));
        assert_eq!(buffer.get(2, 0), None);
        assert_eq!(buffer.row(1), &[4, 4]);
    }

    #[test]
    fn test_assemble_rejects_overlap() {
        let size = ViewportSize::new(2, 2).unwrap();
        let result =
            IterationBuffer::assemble(size, vec![fragment(0, 0..2, 2, 1), fragment(1, 1..2, 2, 1)]);

        assert_eq!(
            result,
            Err(IterationBufferError::RowWrittenTwice { section: 1, row: 1 })
        );
    }

    #[test]
    fn test_assemble_rejects_gap() {
        let size = ViewportSize::new(2, 3).unwrap();
        let result =
            IterationBuffer::assemble(size, vec![fragment(0, 0..1, 2, 1), fragment(1, 2..3, 2, 1)]);

        assert_eq!(result, Err(IterationBufferError::RowMissing { row: 1 }));
    }

    #[test]
    fn test_assemble_rejects_wrong_fragment_length() {
        let size = ViewportSize::new(2, 1).unwrap();
        let result = IterationBuffer::assemble(
            size,
            vec![SectionFragment {
                section: 0,
                rows: 0..1,
                counts: vec![1, 2, 3],
            }],
        );

        assert_eq!(
            result,
            Err(IterationBufferError::FragmentSizeMismatch {
                section: 0,
                expected: 2,
                actual: 3
            })
        );
    }

    #[test]
    fn test_assemble_rejects_rows_past_height() {
        let size = ViewportSize::new(1, 1).unwrap();
        let result = IterationBuffer::assemble(size, vec![fragment(0, 0..2, 1, 0)]);

        assert!(matches!(
            result,
            Err(IterationBufferError::RowsOutOfBounds { section: 0, .. })
        ));
    }
}
