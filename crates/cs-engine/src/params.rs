//! Immutable synthesis parameter snapshots.
//!
//! The control thread never edits a snapshot the audio thread might be
//! reading. Every change produces a new value through one of the `with_*`
//! builders below, which is then published as a whole.

use cs_ir::{theme_profile, ThemeId, NOISE, NUM_CHANNELS};

use crate::channel::{clamp_unit, ChannelParams};

/// Master volume of a freshly created engine.
pub const DEFAULT_MASTER_VOLUME: f32 = 0.3;

/// Maximum pitch lift at full tension (+50%).
pub const TENSION_PITCH_SPAN: f32 = 0.5;

/// Noise voice volume while a one-shot effect sounds.
pub const EFFECT_VOLUME: f32 = 0.4;

/// Frequency multiplier for a tension factor in [0, 1].
#[inline]
pub fn tension_multiplier(tension: f32) -> f32 {
    1.0 + tension * TENSION_PITCH_SPAN
}

/// A complete, internally consistent set of synthesis parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisParameters {
    /// Monotonic publish counter
    pub version: u64,
    pub active_theme: ThemeId,
    /// Urgency in [0, 1]
    pub tension: f32,
    /// Output gain in [0, 1]
    pub master_volume: f32,
    /// False after `stopped()` until the next theme is played
    pub playing: bool,
    /// Bumped for every one-shot effect request
    pub effect_serial: u32,
    pub channels: [ChannelParams; NUM_CHANNELS],
}

impl SynthesisParameters {
    /// The engine's starting snapshot: Ambient theme, zero tension, nothing sounding.
    pub fn initial() -> Self {
        let base = Self {
            version: 0,
            active_theme: ThemeId::Ambient,
            tension: 0.0,
            master_volume: DEFAULT_MASTER_VOLUME,
            playing: false,
            effect_serial: 0,
            channels: core::array::from_fn(ChannelParams::new),
        };
        base.derived()
    }

    /// Recompute every channel from the active theme's base values and the current tension.
    fn derived(mut self) -> Self {
        let profile = theme_profile(self.active_theme);
        let multiplier = tension_multiplier(self.tension);
        for (channel, config) in self.channels.iter_mut().zip(profile.channels.iter()) {
            *channel = channel.configured(config, multiplier, self.playing);
        }
        self
    }

    fn next(mut self) -> Self {
        self.version = self.version.wrapping_add(1);
        self
    }

    /// Switch to `theme` and start playing. Phase state lives in the mixer and is untouched.
    pub fn with_theme(self, theme: ThemeId) -> Self {
        Self {
            active_theme: theme,
            playing: true,
            ..self
        }
        .derived()
        .next()
    }

    /// Silence all voices, keeping theme and tension.
    pub fn stopped(self) -> Self {
        Self {
            playing: false,
            ..self
        }
        .derived()
        .next()
    }

    /// Set the tension factor (clamped) and recompute effective frequencies.
    pub fn with_tension(self, tension: f32) -> Self {
        Self {
            tension: clamp_unit(tension),
            ..self
        }
        .derived()
        .next()
    }

    /// Set the master volume (clamped). Channels are unchanged.
    pub fn with_master_volume(self, volume: f32) -> Self {
        Self {
            master_volume: clamp_unit(volume),
            ..self
        }
        .next()
    }

    /// Set one voice's gain (clamped). Out-of-range indices are ignored.
    pub fn with_channel_volume(mut self, index: usize, volume: f32) -> Self {
        if let Some(channel) = self.channels.get_mut(index) {
            channel.volume = clamp_unit(volume);
        }
        self.next()
    }

    /// Request a one-shot effect on the noise voice.
    pub fn with_one_shot(mut self) -> Self {
        self.effect_serial = self.effect_serial.wrapping_add(1);
        self.next()
    }

    /// Voices as the mixer should play them when a one-shot is sounding.
    pub fn with_effect_voice(&self) -> [ChannelParams; NUM_CHANNELS] {
        let mut channels = self.channels;
        channels[NOISE].enabled = true;
        channels[NOISE].volume = EFFECT_VOLUME;
        channels
    }
}

impl Default for SynthesisParameters {
    fn default() -> Self {
        Self::initial()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cs_ir::base_frequency;

    #[test]
    fn initial_is_ambient_and_silent() {
        let p = SynthesisParameters::initial();
        assert_eq!(p.active_theme, ThemeId::Ambient);
        assert_eq!(p.tension, 0.0);
        assert_eq!(p.master_volume, DEFAULT_MASTER_VOLUME);
        assert!(p.channels.iter().all(|c| !c.enabled));
        assert_eq!(p.channels[0].frequency, base_frequency(ThemeId::Ambient, 0));
    }

    #[test]
    fn theme_enables_theme_voices() {
        let p = SynthesisParameters::initial().with_theme(ThemeId::Focus);
        let enabled: Vec<bool> = p.channels.iter().map(|c| c.enabled).collect();
        assert_eq!(enabled, vec![true, true, true, false]);
    }

    #[test]
    fn theme_is_idempotent() {
        let once = SynthesisParameters::initial().with_tension(0.3).with_theme(ThemeId::Crisis);
        let twice = once.with_theme(ThemeId::Crisis);
        assert_eq!(once.channels, twice.channels);
        assert_eq!(once.tension, twice.tension);
    }

    #[test]
    fn theme_keeps_tension() {
        let p = SynthesisParameters::initial()
            .with_tension(0.5)
            .with_theme(ThemeId::Victory);
        assert_eq!(p.tension, 0.5);
        assert_eq!(p.channels[0].frequency, base_frequency(ThemeId::Victory, 0) * 1.25);
    }

    #[test]
    fn tension_does_not_compound() {
        let p = SynthesisParameters::initial().with_theme(ThemeId::Crisis);
        let a = p.with_tension(0.5);
        let b = a.with_tension(0.5);
        let c = b.with_tension(0.5);
        assert_eq!(a.channels, c.channels);
        assert_eq!(a.channels[0].frequency, base_frequency(ThemeId::Crisis, 0) * 1.25);
    }

    #[test]
    fn tension_recomputes_from_base() {
        let p = SynthesisParameters::initial().with_theme(ThemeId::Crisis);
        let high = p.with_tension(1.0);
        let low = high.with_tension(0.0);
        assert_eq!(low.channels, p.channels);
    }

    #[test]
    fn tension_is_clamped() {
        let p = SynthesisParameters::initial();
        assert_eq!(p.with_tension(-1.0).tension, 0.0);
        assert_eq!(p.with_tension(3.0).tension, 1.0);
        assert_eq!(p.with_tension(f32::NAN).tension, 0.0);
    }

    #[test]
    fn stop_survives_tension_update() {
        let p = SynthesisParameters::initial()
            .with_theme(ThemeId::Crisis)
            .stopped()
            .with_tension(0.8);
        assert!(p.channels.iter().all(|c| !c.enabled));
        assert_eq!(p.channels[0].frequency, base_frequency(ThemeId::Crisis, 0) * 1.4);
    }

    #[test]
    fn master_volume_is_clamped() {
        let p = SynthesisParameters::initial();
        assert_eq!(p.with_master_volume(-0.5).master_volume, 0.0);
        assert_eq!(p.with_master_volume(2.0).master_volume, 1.0);
        assert_eq!(p.with_master_volume(0.7).master_volume, 0.7);
    }

    #[test]
    fn master_volume_leaves_channels() {
        let p = SynthesisParameters::initial().with_theme(ThemeId::Complex);
        assert_eq!(p.with_master_volume(0.9).channels, p.channels);
    }

    #[test]
    fn channel_volume_survives_theme_change() {
        let p = SynthesisParameters::initial()
            .with_channel_volume(1, 0.8)
            .with_theme(ThemeId::Focus);
        assert_eq!(p.channels[1].volume, 0.8);
        // ignored
        let q = p.with_channel_volume(9, 0.1);
        assert_eq!(q.channels, p.channels);
    }

    #[test]
    fn every_builder_bumps_version() {
        let p = SynthesisParameters::initial();
        assert_eq!(p.version, 0);
        let p = p.with_theme(ThemeId::Focus);
        assert_eq!(p.version, 1);
        let p = p.with_tension(0.2).with_master_volume(0.5).stopped().with_one_shot();
        assert_eq!(p.version, 5);
    }

    #[test]
    fn one_shot_bumps_serial_only() {
        let p = SynthesisParameters::initial().with_theme(ThemeId::Focus);
        let q = p.with_one_shot();
        assert_eq!(q.effect_serial, p.effect_serial + 1);
        assert_eq!(q.channels, p.channels);
    }

    #[test]
    fn effect_voice_forces_noise_on() {
        let p = SynthesisParameters::initial().with_theme(ThemeId::Focus);
        assert!(!p.channels[NOISE].enabled);
        let voices = p.with_effect_voice();
        assert!(voices[NOISE].enabled);
        assert_eq!(voices[NOISE].volume, EFFECT_VOLUME);
        assert_eq!(voices[0], p.channels[0]);
    }
}
