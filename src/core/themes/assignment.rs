use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::themes::palette::ConcreteTheme;
use crate::core::themes::theme::Theme;

/// The concrete theme each section is coloured with for one render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAssignment {
    per_section: Vec<ConcreteTheme>,
}

impl ThemeAssignment {
    /// Resolves `theme` for `section_count` sections.
    ///
    /// Meta themes draw from a generator seeded with `seed`, so the same
    /// seed always yields the same assignment.
    #[must_use]
    pub fn resolve(theme: Theme, section_count: usize, seed: u64) -> Self {
        let per_section = match theme.concrete() {
            Some(concrete) => vec![concrete; section_count],
            None => {
                let mut rng = StdRng::seed_from_u64(seed);
                (0..section_count)
                    .map(|_| ConcreteTheme::ALL[rng.gen_range(0..ConcreteTheme::ALL.len())])
                    .collect()
            }
        };

        Self { per_section }
    }

    #[must_use]
    pub fn for_section(&self, section: usize) -> ConcreteTheme {
        self.per_section
            .get(section)
            .copied()
            .unwrap_or(ConcreteTheme::Default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn concrete_theme_applies_to_every_section() {
        let assignment = ThemeAssignment::resolve(Theme::Fire, 4, 7);

        for section in 0..4 {
            assert_eq!(assignment.for_section(section), ConcreteTheme::Fire);
        }
    }

    #[test]
    fn cpu_cores_is_stable_for_a_seed() {
        let a = ThemeAssignment::resolve(Theme::CpuCores, 16, 42);
        let b = ThemeAssignment::resolve(Theme::CpuCores, 16, 42);

        assert_eq!(a, b);
    }

    #[test]
    fn cpu_cores_varies_with_seed() {
        let assignments: Vec<ThemeAssignment> = (0..8)
            .map(|seed| ThemeAssignment::resolve(Theme::CpuCores, 32, seed))
            .collect();

        assert!(assignments.windows(2).any(|pair| pair[0] != pair[1]));
    }

    #[test]
    fn out_of_range_section_falls_back_to_default() {
        let assignment = ThemeAssignment::resolve(Theme::Blue, 1, 0);
        assert_eq!(assignment.for_section(5), ConcreteTheme::Default);
    }
}
