//! Puzzle categories and the theme each one calls for.

use core::fmt;
use core::str::FromStr;

use crate::theme::ThemeId;

/// Category of the puzzle the player is currently working on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PuzzleCategory {
    LogAnalysis,
    MetricsNavigation,
    Algorithm,
    Configuration,
    Debugging,
    Custom,
}

impl PuzzleCategory {
    pub const ALL: [PuzzleCategory; 6] = [
        PuzzleCategory::LogAnalysis,
        PuzzleCategory::MetricsNavigation,
        PuzzleCategory::Algorithm,
        PuzzleCategory::Configuration,
        PuzzleCategory::Debugging,
        PuzzleCategory::Custom,
    ];

    /// Theme played while a puzzle of this category is active.
    pub const fn theme(&self) -> ThemeId {
        match self {
            PuzzleCategory::LogAnalysis => ThemeId::Crisis,
            PuzzleCategory::MetricsNavigation => ThemeId::Focus,
            PuzzleCategory::Algorithm => ThemeId::Complex,
            PuzzleCategory::Configuration => ThemeId::Focus,
            PuzzleCategory::Debugging | PuzzleCategory::Custom => ThemeId::Ambient,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PuzzleCategory::LogAnalysis => "log-analysis",
            PuzzleCategory::MetricsNavigation => "metrics",
            PuzzleCategory::Algorithm => "algorithm",
            PuzzleCategory::Configuration => "configuration",
            PuzzleCategory::Debugging => "debugging",
            PuzzleCategory::Custom => "custom",
        }
    }
}

impl fmt::Display for PuzzleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a puzzle category name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown puzzle category")]
pub struct ParsePuzzleCategoryError;

impl FromStr for PuzzleCategory {
    type Err = ParsePuzzleCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PuzzleCategory::ALL
            .into_iter()
            .find(|c| c.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParsePuzzleCategoryError)
    }
}
