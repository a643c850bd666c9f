//! Real-time synthesis core for the chipscore synthesizer.
//!
//! Four fixed voices (two pulses, a triangle, and LFSR noise) are mixed
//! sample-by-sample from an immutable parameter snapshot. The control
//! thread publishes new snapshots through [`snapshot_channel`]; the audio
//! thread renders with [`Synth`], which never blocks or allocates.

#![cfg_attr(not(feature = "std"), no_std)]

mod channel;
#[cfg(feature = "std")]
mod handoff;
mod mixer;
mod oscillator;
mod params;
#[cfg(feature = "std")]
mod synth;

pub use channel::{
    clamp_duty, clamp_unit, ChannelParams, ChannelState, DEFAULT_CHANNEL_VOLUME, DUTY_MAX,
    DUTY_MIN,
};
#[cfg(feature = "std")]
pub use handoff::{snapshot_channel, SnapshotPublisher, SnapshotReader};
pub use mixer::Mixer;
pub use oscillator::{phase_fraction, pulse, triangle, Lfsr, DEFAULT_NOISE_SEED, PHASE_MODULUS};
pub use params::{
    tension_multiplier, SynthesisParameters, DEFAULT_MASTER_VOLUME, EFFECT_VOLUME,
    TENSION_PITCH_SPAN,
};
#[cfg(feature = "std")]
pub use synth::Synth;
