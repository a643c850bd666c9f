//! Theme table: the static channel configuration behind each game mood.

use core::fmt;
use core::str::FromStr;

use crate::notes::NOTE_FREQUENCIES;
use crate::waveform::NUM_CHANNELS;

/// Musical theme, selected from the game's current mood.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ThemeId {
    /// Sparse, calm
    #[default]
    Ambient,
    /// Methodical, steady
    Focus,
    /// Layered arpeggio feel
    Complex,
    /// Staccato, urgent
    Crisis,
    /// Bright, ascending
    Victory,
    /// Low and hollow
    Failure,
}

impl ThemeId {
    /// All themes, in table order.
    pub const ALL: [ThemeId; 6] = [
        ThemeId::Ambient,
        ThemeId::Focus,
        ThemeId::Complex,
        ThemeId::Crisis,
        ThemeId::Victory,
        ThemeId::Failure,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ThemeId::Ambient => "ambient",
            ThemeId::Focus => "focus",
            ThemeId::Complex => "complex",
            ThemeId::Crisis => "crisis",
            ThemeId::Victory => "victory",
            ThemeId::Failure => "failure",
        }
    }
}

impl fmt::Display for ThemeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a theme name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown theme (expected one of: ambient, focus, complex, crisis, victory, failure)")]
pub struct ParseThemeError;

impl FromStr for ThemeId {
    type Err = ParseThemeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeId::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(ParseThemeError)
    }
}

/// Target configuration of one channel within a theme.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelConfig {
    /// Base frequency in Hz, before tension scaling
    pub frequency: f32,
    /// Pulse width (0-1); ignored by triangle and noise voices
    pub duty_cycle: f32,
    pub enabled: bool,
}

impl ChannelConfig {
    const fn on(note: usize, duty_cycle: f32) -> Self {
        Self {
            frequency: NOTE_FREQUENCIES[note],
            duty_cycle,
            enabled: true,
        }
    }

    const fn off(note: usize, duty_cycle: f32) -> Self {
        Self {
            frequency: NOTE_FREQUENCIES[note],
            duty_cycle,
            enabled: false,
        }
    }
}

/// An immutable, named configuration for all four channels.
///
/// Channel roles are fixed: 0 = lead, 1 = harmony, 2 = bass (triangle),
/// 3 = percussive noise accent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThemeProfile {
    pub id: ThemeId,
    pub channels: [ChannelConfig; NUM_CHANNELS],
}

// Note indices: 0 = C4, 2 = D4, 3 = D#4, 7 = G4, 11 = B4, 12 = C5, 14 = D5, 16 = E5, 17 = F5.
static THEMES: [ThemeProfile; 6] = [
    ThemeProfile {
        id: ThemeId::Ambient,
        channels: [
            ChannelConfig::on(0, 0.5),
            ChannelConfig::off(7, 0.5),
            ChannelConfig::on(0, 0.5),
            ChannelConfig::off(0, 0.5),
        ],
    },
    ThemeProfile {
        id: ThemeId::Focus,
        channels: [
            ChannelConfig::on(12, 0.5),
            ChannelConfig::on(7, 0.5),
            ChannelConfig::on(0, 0.5),
            ChannelConfig::off(0, 0.5),
        ],
    },
    ThemeProfile {
        id: ThemeId::Complex,
        channels: [
            ChannelConfig::on(12, 0.5),
            ChannelConfig::on(16, 0.25),
            ChannelConfig::on(0, 0.5),
            ChannelConfig::on(0, 0.5),
        ],
    },
    ThemeProfile {
        id: ThemeId::Crisis,
        channels: [
            ChannelConfig::on(11, 0.125),
            ChannelConfig::on(7, 0.25),
            ChannelConfig::on(2, 0.5),
            ChannelConfig::on(0, 0.5),
        ],
    },
    ThemeProfile {
        id: ThemeId::Victory,
        channels: [
            ChannelConfig::on(17, 0.5),
            ChannelConfig::on(14, 0.5),
            ChannelConfig::on(0, 0.5),
            ChannelConfig::on(0, 0.5),
        ],
    },
    ThemeProfile {
        id: ThemeId::Failure,
        channels: [
            ChannelConfig::on(3, 0.25),
            ChannelConfig::on(1, 0.125),
            ChannelConfig::on(0, 0.5),
            ChannelConfig::off(0, 0.5),
        ],
    },
];

/// Look up the static profile for a theme.
pub fn theme_profile(id: ThemeId) -> &'static ThemeProfile {
    &THEMES[id as usize]
}

/// Base (unscaled) frequency of `channel` in `theme`. Out-of-range channels read the last voice.
pub fn base_frequency(theme: ThemeId, channel: usize) -> f32 {
    let channels = &theme_profile(theme).channels;
    channels[channel.min(NUM_CHANNELS - 1)].frequency
}
