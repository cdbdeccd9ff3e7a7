use std::sync::LazyLock;

use crate::core::actions::generate_pixel_buffer::ports::colour_map::ColourMap;
use crate::core::data::colour::Colour;

/// A theme that maps a count straight to a colour, with no per-section choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcreteTheme {
    Default,
    Grayscale,
    Blue,
    Fire,
    Rainbow,
    Rainbow2,
    Rainbow3,
    Rainbow4,
}

impl ConcreteTheme {
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::Grayscale,
        Self::Blue,
        Self::Fire,
        Self::Rainbow,
        Self::Rainbow2,
        Self::Rainbow3,
        Self::Rainbow4,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Default => "Default",
            Self::Grayscale => "Grayscale",
            Self::Blue => "Blue",
            Self::Fire => "Fire",
            Self::Rainbow => "Rainbow",
            Self::Rainbow2 => "Rainbow2",
            Self::Rainbow3 => "Rainbow3",
            Self::Rainbow4 => "Rainbow4",
        }
    }

    #[must_use]
    pub fn colour(self, iterations: u32, max_iterations: u32) -> Colour {
        if iterations >= max_iterations {
            return Colour::BLACK;
        }

        let norm = normalise(iterations, max_iterations);

        match self {
            Self::Default => Colour::new(norm, 255 - norm, 100),
            Self::Grayscale => Colour::new(norm, norm, norm),
            Self::Blue => Colour::new(255 - norm, 255 - norm, norm),
            Self::Fire => Colour::new(
                norm.saturating_mul(2),
                norm.saturating_add(50),
                norm.saturating_sub(100),
            ),
            Self::Rainbow => lookup(&RAINBOW, iterations),
            Self::Rainbow2 => lookup(&RAINBOW_2, iterations),
            Self::Rainbow3 => lookup(&RAINBOW_3, iterations),
            Self::Rainbow4 => lookup(&RAINBOW_4, iterations),
        }
    }
}

impl ColourMap for ConcreteTheme {
    fn map(&self, iterations: u32, max_iterations: u32) -> Colour {
        self.colour(iterations, max_iterations)
    }
}

impl std::fmt::Display for ConcreteTheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

/// Scales `iterations / max_iterations` into `0..=255`, truncating.
fn normalise(iterations: u32, max_iterations: u32) -> u8 {
    let ratio = f64::from(iterations) / f64::from(max_iterations.max(1));
    (ratio.clamp(0.0, 1.0) * 255.0) as u8
}

fn lookup(palette: &[Colour], iterations: u32) -> Colour {
    palette[iterations as usize % palette.len()]
}

static RAINBOW: LazyLock<Vec<Colour>> = LazyLock::new(|| hsv_palette(256, 255.0));
static RAINBOW_2: LazyLock<Vec<Colour>> = LazyLock::new(|| hsv_palette(256, 1024.0));
static RAINBOW_3: LazyLock<Vec<Colour>> = LazyLock::new(|| hsv_palette(1024, 1024.0));
static RAINBOW_4: LazyLock<Vec<Colour>> = LazyLock::new(|| hsv_palette(8192, 8192.0));

/// Full-saturation hue sweep, each channel scaled then clamped to 255.
fn hsv_palette(entries: usize, scale: f64) -> Vec<Colour> {
    (0..entries)
        .map(|i| {
            let (r, g, b) = hue_to_rgb(i as f64 / entries as f64);
            Colour::new(
                scale_channel(r, scale),
                scale_channel(g, scale),
                scale_channel(b, scale),
            )
        })
        .collect()
}

fn scale_channel(value: f64, scale: f64) -> u8 {
    (value * scale).clamp(0.0, 255.0) as u8
}

/// HSV to RGB with saturation and value fixed at 1.
fn hue_to_rgb(hue: f64) -> (f64, f64, f64) {
    let sector = (hue * 6.0).floor();
    let f = hue * 6.0 - sector;
    let q = 1.0 - f;

    match sector as u32 % 6 {
        0 => (1.0, f, 0.0),
        1 => (q, 1.0, 0.0),
        2 => (0.0, 1.0, f),
        3 => (0.0, q, 1.0),
        4 => (f, 0.0, 1.0),
        _ => (1.0, 0.0, q),
    }
}
