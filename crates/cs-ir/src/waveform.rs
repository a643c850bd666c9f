//! Fixed voice layout: four channels, each with a fixed waveform.

use core::fmt;

/// Number of synthesizer voices.
pub const NUM_CHANNELS: usize = 4;

/// Lead melody voice (pulse).
pub const LEAD: usize = 0;
/// Harmony voice (pulse).
pub const HARMONY: usize = 1;
/// Bass voice (triangle).
pub const BASS: usize = 2;
/// Percussive accent voice (noise).
pub const NOISE: usize = 3;

/// Waveform generated by a channel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Waveform {
    /// First pulse voice
    #[default]
    Pulse,
    /// Second pulse voice
    Pulse2,
    Triangle,
    /// 16-bit LFSR noise
    Noise,
}

impl Waveform {
    /// The waveform wired to a channel index. Indices past the last voice map to noise.
    pub const fn for_channel(index: usize) -> Self {
        match index {
            LEAD => Waveform::Pulse,
            HARMONY => Waveform::Pulse2,
            BASS => Waveform::Triangle,
            _ => Waveform::Noise,
        }
    }

    /// Whether the duty cycle affects this waveform.
    pub const fn uses_duty(&self) -> bool {
        matches!(self, Waveform::Pulse | Waveform::Pulse2)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Pulse => "pulse",
            Waveform::Pulse2 => "pulse2",
            Waveform::Triangle => "triangle",
            Waveform::Noise => "noise",
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
