use std::num::NonZeroUsize;

use crate::core::data::section::Section;
use crate::core::util::pixel_to_complex_coords::PlaneMapping;

/// Largest power of two not exceeding `worker_count`.
#[must_use]
pub fn partition_count(worker_count: NonZeroUsize) -> usize {
    1 << worker_count.get().ilog2()
}

/// Worker count reported by the OS, falling back to one.
#[must_use]
pub fn available_worker_count() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// Splits the viewport rows into contiguous bands, one per section.
///
/// The band count is [`partition_count`] of the smaller of `worker_count` and
/// the viewport height, so no band is empty. Band sizes differ by at most one
/// row; earlier bands take the remainder.
#[must_use]
pub fn calculate_sections(mapping: &PlaneMapping, worker_count: NonZeroUsize) -> Vec<Section> {
    let height = mapping.size().height();
    let bounded = NonZeroUsize::new(worker_count.get().min(height as usize))
        .unwrap_or(NonZeroUsize::MIN);
    let count = partition_count(bounded) as u32;

    let base_rows = height / count;
    let remainder = height % count;

    let mut sections = Vec::with_capacity(count as usize);
    let mut start = 0;

    for index in 0..count {
        let rows = base_rows + u32::from(index < remainder);
        let end = start + rows;

        sections.push(Section {
            index: index as usize,
            rows: start..end,
            region: mapping.rows_region(start..end),
        });

        start = end;
    }

    sections
}
