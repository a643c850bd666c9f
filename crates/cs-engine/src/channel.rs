//! Per-voice parameters and running state.

use cs_ir::{ChannelConfig, Waveform};

use crate::oscillator::{phase_fraction, pulse, triangle, Lfsr, PHASE_MODULUS};

/// Lowest usable pulse width.
pub const DUTY_MIN: f32 = 0.01;
/// Highest usable pulse width.
pub const DUTY_MAX: f32 = 0.99;
/// Volume of each voice unless overridden.
pub const DEFAULT_CHANNEL_VOLUME: f32 = 0.25;

/// Clamp to [0, 1], mapping NaN to 0.
#[inline]
pub fn clamp_unit(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Clamp a pulse width into [`DUTY_MIN`, `DUTY_MAX`], mapping NaN to a square wave.
#[inline]
pub fn clamp_duty(value: f32) -> f32 {
    if value.is_nan() {
        0.5
    } else {
        value.clamp(DUTY_MIN, DUTY_MAX)
    }
}

/// Published parameters for one voice. Part of every snapshot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChannelParams {
    /// Fixed by channel index
    pub shape: Waveform,
    /// Effective frequency in Hz (theme base scaled by tension)
    pub frequency: f32,
    pub duty_cycle: f32,
    /// Voice gain (0-1)
    pub volume: f32,
    pub enabled: bool,
}

impl ChannelParams {
    /// Silent parameters for the voice at `index`.
    pub fn new(index: usize) -> Self {
        Self {
            shape: Waveform::for_channel(index),
            frequency: 0.0,
            duty_cycle: 0.5,
            volume: DEFAULT_CHANNEL_VOLUME,
            enabled: false,
        }
    }

    /// Parameters for the voice at `index` from a theme entry, scaling the base
    /// frequency by `multiplier`. Volume is carried over from `self`.
    pub fn configured(&self, config: &ChannelConfig, multiplier: f32, playing: bool) -> Self {
        Self {
            shape: self.shape,
            frequency: config.frequency * multiplier,
            duty_cycle: clamp_duty(config.duty_cycle),
            volume: self.volume,
            enabled: playing && config.enabled,
        }
    }
}

/// Running state of one voice on the audio thread.
///
/// Phase advances every frame whether or not the voice is enabled, so a
/// voice that is switched back on resumes mid-cycle instead of clicking.
#[derive(Clone, Debug)]
pub struct ChannelState {
    /// Position within one cycle (0..PHASE_MODULUS)
    pub phase: u16,
    noise: Lfsr,
}

impl ChannelState {
    pub fn new(noise_seed: u16) -> Self {
        Self {
            phase: 0,
            noise: Lfsr::new(noise_seed),
        }
    }

    /// Generate the raw (unscaled) sample for the current phase.
    #[inline]
    pub fn sample(&mut self, params: &ChannelParams) -> f32 {
        match params.shape {
            Waveform::Pulse | Waveform::Pulse2 => {
                pulse(phase_fraction(self.phase), params.duty_cycle)
            }
            Waveform::Triangle => triangle(phase_fraction(self.phase)),
            Waveform::Noise => self.noise.next_sample(),
        }
    }

    /// Step the phase by one frame.
    #[inline]
    pub fn advance(&mut self) {
        self.phase = (self.phase + 1) % PHASE_MODULUS;
    }

    /// Step the phase by `frames` frames at once.
    pub fn advance_by(&mut self, frames: u64) {
        let step = (frames % PHASE_MODULUS as u64) as u16;
        self.phase = (self.phase + step) % PHASE_MODULUS;
    }

    /// Current LFSR state of this voice's noise source.
    pub fn noise_state(&self) -> u16 {
        self.noise.state()
    }
}
