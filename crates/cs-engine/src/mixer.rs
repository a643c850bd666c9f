//! Frame mixer: the body of the audio callback.

use cs_ir::NUM_CHANNELS;

use crate::channel::{ChannelParams, ChannelState};
use crate::oscillator::DEFAULT_NOISE_SEED;
use crate::params::SynthesisParameters;

/// Sums the four voices into mono frames.
///
/// Owns only the running voice state (phase counters and noise registers);
/// all parameters come from the snapshot passed to each render call. Never
/// allocates, blocks, or logs.
#[derive(Clone, Debug)]
pub struct Mixer {
    channels: [ChannelState; NUM_CHANNELS],
    /// Effect serial of the last one-shot played
    effect_serial: u32,
    /// Total frames rendered
    frames: u64,
}

impl Mixer {
    /// Create a mixer whose noise voice is seeded with `noise_seed`.
    pub fn new(noise_seed: u16) -> Self {
        Self {
            channels: core::array::from_fn(|_| ChannelState::new(noise_seed)),
            effect_serial: 0,
            frames: 0,
        }
    }

    /// Treat every effect already requested in `params` as played.
    pub fn sync_effects(&mut self, params: &SynthesisParameters) {
        self.effect_serial = params.effect_serial;
    }

    /// Whether `params` carries a one-shot this mixer has not played yet.
    pub fn one_shot_pending(&self, params: &SynthesisParameters) -> bool {
        params.effect_serial != self.effect_serial
    }

    /// Render one callback's worth of mono frames.
    pub fn render(&mut self, params: &SynthesisParameters, out: &mut [f32]) {
        self.render_interleaved(params, out, 1, |s| s);
    }

    /// Render into an interleaved device buffer, writing the mono mix to every
    /// channel of each frame after converting it with `convert`.
    pub fn render_interleaved<T, F>(
        &mut self,
        params: &SynthesisParameters,
        data: &mut [T],
        channels: usize,
        convert: F,
    ) where
        T: Copy,
        F: Fn(f32) -> T,
    {
        let voices = if self.one_shot_pending(params) {
            self.effect_serial = params.effect_serial;
            params.with_effect_voice()
        } else {
            params.channels
        };
        let master = params.master_volume;

        for frame in data.chunks_mut(channels.max(1)) {
            let value = convert(self.next_sample(&voices, master));
            frame.fill(value);
        }
    }

    /// Mix one frame and advance every voice.
    #[inline]
    fn next_sample(&mut self, voices: &[ChannelParams; NUM_CHANNELS], master: f32) -> f32 {
        let mut sum = 0.0;
        for (state, voice) in self.channels.iter_mut().zip(voices.iter()) {
            if voice.enabled {
                sum += state.sample(voice) * voice.volume;
            }
            state.advance();
        }
        self.frames += 1;
        (sum * master).clamp(-1.0, 1.0)
    }

    /// Current phase of every voice.
    pub fn phases(&self) -> [u16; NUM_CHANNELS] {
        core::array::from_fn(|i| self.channels[i].phase)
    }

    /// Running state of one voice.
    pub fn channel(&self, index: usize) -> Option<&ChannelState> {
        self.channels.get(index)
    }

    /// Total frames rendered since creation.
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }
}

impl Default for Mixer {
    fn default() -> Self {
        Self::new(DEFAULT_NOISE_SEED)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oscillator::PHASE_MODULUS;
    use cs_ir::{ThemeId, NOISE};

    fn loud_params() -> SynthesisParameters {
        let mut p = SynthesisParameters::initial()
            .with_theme(ThemeId::Crisis)
            .with_master_volume(1.0);
        for i in 0..NUM_CHANNELS {
            p = p.with_channel_volume(i, 1.0);
        }
        p
    }

    #[test]
    fn output_is_clamped_with_all_voices_loud() {
        let params = loud_params();
        assert!(params.channels.iter().all(|c| c.enabled && c.volume == 1.0));
        let mut mixer = Mixer::default();
        let mut out = vec![0.0f32; 20_000];
        mixer.render(&params, &mut out);
        assert!(out.iter().all(|s| (-1.0..=1.0).contains(s)));
        // Four in-phase voices at full volume must actually hit the rails.
        assert!(out.iter().any(|s| *s == 1.0 || *s == -1.0));
    }

    #[test]
    fn silent_when_stopped_but_phases_advance() {
        let params = SynthesisParameters::initial()
            .with_theme(ThemeId::Complex)
            .stopped();
        let mut mixer = Mixer::default();
        let mut warmup = vec![0.0f32; 100];
        mixer.render(&params, &mut warmup);
        let before = mixer.phases();

        let mut out = vec![1.0f32; 2048];
        mixer.render(&params, &mut out);
        assert!(out.iter().all(|s| *s == 0.0));
        for (b, a) in before.iter().zip(mixer.phases()) {
            assert_eq!(a, (b + 2048) % PHASE_MODULUS);
        }
    }

    #[test]
    fn phases_continue_across_theme_change() {
        let mut mixer = Mixer::default();
        let mut out = vec![0.0f32; 1000];
        mixer.render(&SynthesisParameters::initial().with_theme(ThemeId::Focus), &mut out);
        mixer.render(&SynthesisParameters::initial().with_theme(ThemeId::Victory), &mut out);
        assert_eq!(mixer.phases(), [2000; NUM_CHANNELS]);
        assert_eq!(mixer.frames_rendered(), 2000);
    }

    #[test]
    fn master_volume_zero_is_silent() {
        let params = loud_params().with_master_volume(0.0);
        let mut mixer = Mixer::default();
        let mut out = vec![1.0f32; 512];
        mixer.render(&params, &mut out);
        assert!(out.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn single_pulse_voice_scaled_by_volumes() {
        // Ambient: lead pulse at 50% duty + triangle bass; silence the bass.
        let params = SynthesisParameters::initial()
            .with_theme(ThemeId::Ambient)
            .with_channel_volume(2, 0.0)
            .with_master_volume(0.5);
        let mut mixer = Mixer::default();
        let mut out = vec![0.0f32; PHASE_MODULUS as usize];
        mixer.render(&params, &mut out);
        assert!((out[0] - 0.125).abs() < 1e-6);
        assert!((out[4095] - 0.125).abs() < 1e-6);
        assert!((out[4096] + 0.125).abs() < 1e-6);
    }

    #[test]
    fn noise_is_reproducible_across_instances() {
        let params = SynthesisParameters::initial().with_theme(ThemeId::Crisis);
        let mut a = Mixer::new(DEFAULT_NOISE_SEED);
        let mut b = Mixer::new(DEFAULT_NOISE_SEED);
        let mut out_a = vec![0.0f32; 4096];
        let mut out_b = vec![0.0f32; 4096];
        a.render(&params, &mut out_a);
        b.render(&params, &mut out_b);
        assert_eq!(out_a, out_b);
        assert_eq!(
            a.channel(NOISE).map(|c| c.noise_state()),
            b.channel(NOISE).map(|c| c.noise_state())
        );
    }

    #[test]
    fn noise_seed_changes_output() {
        let params = SynthesisParameters::initial().with_theme(ThemeId::Crisis);
        let mut a = Mixer::new(DEFAULT_NOISE_SEED);
        let mut b = Mixer::new(0x1234);
        let mut out_a = vec![0.0f32; 4096];
        let mut out_b = vec![0.0f32; 4096];
        a.render(&params, &mut out_a);
        b.render(&params, &mut out_b);
        assert_ne!(out_a, out_b);
    }

    #[test]
    fn one_shot_sounds_for_one_render() {
        let params = SynthesisParameters::initial()
            .with_theme(ThemeId::Focus)
            .with_channel_volume(0, 0.0)
            .with_channel_volume(1, 0.0)
            .with_channel_volume(2, 0.0)
            .with_master_volume(1.0)
            .with_one_shot();
        let mut mixer = Mixer::default();
        assert!(mixer.one_shot_pending(&params));

        let mut first = vec![0.0f32; 256];
        mixer.render(&params, &mut first);
        assert!(first.iter().all(|s| (s.abs() - 0.4).abs() < 1e-6));
        assert!(!mixer.one_shot_pending(&params));

        let mut second = vec![1.0f32; 256];
        mixer.render(&params, &mut second);
        assert!(second.iter().all(|s| *s == 0.0));
    }

    #[test]
    fn synced_mixer_skips_old_effects() {
        let params = SynthesisParameters::initial().with_one_shot();
        let mut mixer = Mixer::default();
        mixer.sync_effects(&params);
        assert!(!mixer.one_shot_pending(&params));
    }

    #[test]
    fn interleaved_duplicates_mono_mix() {
        let params = SynthesisParameters::initial().with_theme(ThemeId::Focus);
        let mut mono = Mixer::default();
        let mut stereo = Mixer::default();
        let mut out_mono = vec![0.0f32; 300];
        let mut out_stereo = vec![0.0f32; 600];
        mono.render(&params, &mut out_mono);
        stereo.render_interleaved(&params, &mut out_stereo, 2, |s| s);
        for (i, frame) in out_stereo.chunks(2).enumerate() {
            assert_eq!(frame[0], out_mono[i]);
            assert_eq!(frame[1], out_mono[i]);
        }
        assert_eq!(mono.phases(), stereo.phases());
    }

    #[test]
    fn interleaved_converts_samples() {
        let params = loud_params();
        let mut mixer = Mixer::default();
        let mut out = vec![0i16; 64];
        mixer.render_interleaved(&params, &mut out, 2, |s| (s * 32767.0) as i16);
        assert!(out.iter().any(|s| *s != 0));
    }
}
