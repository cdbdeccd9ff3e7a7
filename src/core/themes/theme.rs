use serde::{Deserialize, Serialize};

use crate::core::errors::InvalidParameterError;
use crate::core::themes::palette::ConcreteTheme;

/// Every selectable theme, including the per-section `CpuCores` meta theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Theme {
    Default,
    Grayscale,
    Blue,
    Fire,
    Rainbow,
    Rainbow2,
    Rainbow3,
    Rainbow4,
    CpuCores,
}

impl Theme {
    pub const ALL: &'static [Self] = &[
        Self::Default,
        Self::Grayscale,
        Self::Blue,
        Self::Fire,
        Self::Rainbow,
        Self::Rainbow2,
        Self::Rainbow3,
        Self::Rainbow4,
        Self::CpuCores,
    ];

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CpuCores => "CPU Cores",
            Self::Default => ConcreteTheme::Default.display_name(),
            Self::Grayscale => ConcreteTheme::Grayscale.display_name(),
            Self::Blue => ConcreteTheme::Blue.display_name(),
            Self::Fire => ConcreteTheme::Fire.display_name(),
            Self::Rainbow => ConcreteTheme::Rainbow.display_name(),
            Self::Rainbow2 => ConcreteTheme::Rainbow2.display_name(),
            Self::Rainbow3 => ConcreteTheme::Rainbow3.display_name(),
            Self::Rainbow4 => ConcreteTheme::Rainbow4.display_name(),
        }
    }

    pub fn from_name(name: &str) -> Result<Self, InvalidParameterError> {
        Self::ALL
            .iter()
            .copied()
            .find(|theme| theme.display_name() == name)
            .ok_or_else(|| InvalidParameterError::UnknownTheme(name.to_string()))
    }

    /// `None` for meta themes that pick a concrete theme per section.
    #[must_use]
    pub const fn concrete(self) -> Option<ConcreteTheme> {
        match self {
            Self::Default => Some(ConcreteTheme::Default),
            Self::Grayscale => Some(ConcreteTheme::Grayscale),
            Self::Blue => Some(ConcreteTheme::Blue),
            Self::Fire => Some(ConcreteTheme::Fire),
            Self::Rainbow => Some(ConcreteTheme::Rainbow),
            Self::Rainbow2 => Some(ConcreteTheme::Rainbow2),
            Self::Rainbow3 => Some(ConcreteTheme::Rainbow3),
            Self::Rainbow4 => Some(ConcreteTheme::Rainbow4),
            Self::CpuCores => None,
        }
    }

    /// The following theme in registry order, wrapping around.
    #[must_use]
    pub fn next(self) -> Self {
        let index = Self::ALL
            .iter()
            .position(|&theme| theme == self)
            .unwrap_or(0);

        Self::ALL[(index + 1) % Self::ALL.len()]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::Default
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).display_name())
    }
}

impl TryFrom<String> for Theme {
    type Error = InvalidParameterError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        Self::from_name(&name)
    }
}

impl From<Theme> for String {
    fn from(theme: Theme) -> Self {
        theme.display_name().to_string()
    }
}
