//! Closed-form waveform generators.
//!
//! Every generator maps a phase position to a sample in [-1, 1] in O(1)
//! without allocating or calling into trigonometry.

/// Number of phase steps in one waveform cycle.
pub const PHASE_MODULUS: u16 = 8192;

/// Default LFSR seed for the noise voice.
pub const DEFAULT_NOISE_SEED: u16 = 0xACE1;

/// Feedback taps for the 16-bit Galois LFSR (x^16 + x^14 + x^13 + x^11 + 1).
const LFSR_TAPS: u16 = 0xB400;

/// Convert a phase counter to a cycle fraction in [0, 1).
#[inline]
pub fn phase_fraction(phase: u16) -> f32 {
    (phase % PHASE_MODULUS) as f32 / PHASE_MODULUS as f32
}

/// Pulse wave: high while the cycle fraction is below the duty cycle.
#[inline]
pub fn pulse(fraction: f32, duty_cycle: f32) -> f32 {
    if fraction < duty_cycle {
        1.0
    } else {
        -1.0
    }
}

/// Triangle wave: +1 at the cycle edges, -1 at the midpoint.
#[inline]
pub fn triangle(fraction: f32) -> f32 {
    4.0 * libm::fabsf(fraction - 0.5) - 1.0
}

/// 16-bit Galois linear-feedback shift register.
///
/// Each voice owns its own register, so two engines seeded alike produce
/// identical noise regardless of what other engines are doing.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lfsr {
    state: u16,
}

impl Lfsr {
    /// Create a register. A zero seed would lock the register at zero, so it
    /// is replaced by [`DEFAULT_NOISE_SEED`].
    pub const fn new(seed: u16) -> Self {
        Self {
            state: if seed == 0 { DEFAULT_NOISE_SEED } else { seed },
        }
    }

    /// Current register contents.
    pub const fn state(&self) -> u16 {
        self.state
    }

    /// Advance one step and return the new low bit.
    #[inline]
    pub fn step(&mut self) -> bool {
        let lsb = self.state & 1;
        self.state = (self.state >> 1) ^ (lsb.wrapping_neg() & LFSR_TAPS);
        self.state & 1 == 1
    }

    /// Advance one step and map the low bit to a sample (1 -> +1, 0 -> -1).
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        if self.step() {
            1.0
        } else {
            -1.0
        }
    }
}

impl Default for Lfsr {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}
