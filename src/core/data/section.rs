use std::ops::Range;

/// Plane bounds of a row band. Not validated: at deep zoom a band can be
/// thinner than one ulp of its edge, so `imag_min == imag_max` is allowed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandBounds {
    pub real_min: f64,
    pub real_max: f64,
    pub imag_min: f64,
    pub imag_max: f64,
}

/// A contiguous band of viewport rows and the plane bounds it covers.
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub index: usize,
    pub rows: Range<u32>,
    pub region: BandBounds,
}

impl Section {
    #[must_use]
    pub fn row_count(&self) -> u32 {
        self.rows.end - self.rows.start
    }
}
