//! Static data model for the chipscore synthesizer.
//!
//! Everything in this crate is immutable, process-lifetime data: the note
//! table, the fixed voice layout, and the per-theme channel configurations
//! the engine derives its snapshots from. Gameplay signals (themes, puzzle
//! categories, pressure levels) are also defined here so that callers can
//! name them without depending on the real-time crates.
//!
//! Designed to be `no_std` compatible.

#![cfg_attr(not(feature = "std"), no_std)]

mod notes;
mod pressure;
mod puzzle;
mod theme;
mod waveform;

pub use notes::{note_frequency, NOTE_COUNT, NOTE_FREQUENCIES};
pub use pressure::PressureLevel;
pub use puzzle::{ParsePuzzleCategoryError, PuzzleCategory};
pub use theme::{
    base_frequency, theme_profile, ChannelConfig, ParseThemeError, ThemeId, ThemeProfile,
};
pub use waveform::{Waveform, BASS, HARMONY, LEAD, NOISE, NUM_CHANNELS};
