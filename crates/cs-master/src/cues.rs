//! Narrow interface through which game rooms drive the score.

use cs_ir::{PressureLevel, PuzzleCategory, ThemeId};

/// The only calls gameplay code needs to make into the music engine.
///
/// Rooms and plugins hold a `&mut dyn ScoreCues` instead of the engine
/// itself, so the synthesis core never depends on room types.
pub trait ScoreCues {
    fn select_theme(&mut self, theme: ThemeId);

    /// Report the fraction of time remaining (0.0-1.0).
    fn set_tension(&mut self, time_remaining: f32);

    fn select_for_puzzle_category(&mut self, category: PuzzleCategory);

    fn trigger_effect(&mut self, name: &str);
}

/// Forwards time pressure to the score only when the pressure level changes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TensionTracker {
    level: PressureLevel,
}

impl TensionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(&self) -> PressureLevel {
        self.level
    }

    /// Classify `time_remaining`; on a level change, send it to `cues` and return the new level.
    pub fn observe<C: ScoreCues + ?Sized>(
        &mut self,
        time_remaining: f32,
        cues: &mut C,
    ) -> Option<PressureLevel> {
        let level = PressureLevel::from_fraction(time_remaining);
        if level == self.level {
            return None;
        }
        self.level = level;
        cues.set_tension(time_remaining);
        Some(level)
    }

    /// Back to `Low`, e.g. when a new room starts.
    pub fn reset(&mut self) {
        self.level = PressureLevel::Low;
    }
}
