//! Headless controller for the chipscore synthesizer.
//!
//! [`Controller`] is the control surface gameplay code talks to. It owns
//! the current parameter snapshot, publishes a fresh one on every change,
//! and manages the output device lifecycle. If no device can be opened the
//! controller keeps working silently.

mod config;
mod cues;
mod wav;

use cs_audio::{AudioOutput, CpalOutput};
use cs_engine::{snapshot_channel, Mixer, SnapshotPublisher, Synth, SynthesisParameters};
use tracing::{debug, info, warn};

// Re-export common types so callers don't need cs-ir/cs-engine directly.
pub use config::{ConfigError, EngineConfig};
pub use cs_engine::{ChannelParams, PHASE_MODULUS};
pub use cs_ir::{PressureLevel, PuzzleCategory, ThemeId};
pub use cues::{ScoreCues, TensionTracker};
pub use wav::{samples_to_wav, to_pcm16, write_wav};

/// Frames rendered per block during offline rendering.
const RENDER_BLOCK: usize = 2048;

/// Music engine control surface.
pub struct Controller {
    config: EngineConfig,
    params: SynthesisParameters,
    playback: Option<PlaybackHandle>,
}

struct PlaybackHandle {
    publisher: SnapshotPublisher,
    output: CpalOutput,
}

impl Controller {
    pub fn new(config: EngineConfig) -> Self {
        let params = SynthesisParameters::initial().with_master_volume(config.master_volume);
        Self {
            config,
            params,
            playback: None,
        }
    }

    // --- Lifecycle ---

    /// Open the output device and start the audio callback.
    ///
    /// Returns false if no device is available; the controller then stays
    /// silent but every control call remains valid. Calling this while
    /// already initialized is a no-op returning true.
    pub fn initialize(&mut self) -> bool {
        if self.playback.is_some() {
            return true;
        }

        let (publisher, reader) = snapshot_channel(self.config.handoff_capacity, self.params);
        let mut mixer = Mixer::new(self.config.noise_seed);
        mixer.sync_effects(&self.params);
        let synth = Synth::new(reader, mixer);

        match CpalOutput::open(self.config.output(), synth) {
            Ok(output) => {
                info!(
                    sample_rate = output.sample_rate(),
                    channels = output.channels(),
                    "audio initialized"
                );
                self.playback = Some(PlaybackHandle { publisher, output });
                true
            }
            Err(e) => {
                warn!("audio unavailable, continuing silently: {e}");
                false
            }
        }
    }

    /// Close the output device. Safe to call repeatedly or without `initialize`.
    pub fn cleanup(&mut self) {
        if let Some(mut pb) = self.playback.take() {
            if let Err(e) = pb.output.stop() {
                debug!("pausing audio stream failed: {e}");
            }
            // Dropping the stream joins the callback; nothing fires afterwards.
            drop(pb);
            info!("audio closed");
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.playback.is_some()
    }

    // --- Control surface ---

    /// Load a theme, scaled by the current tension, and start playing it.
    pub fn play_theme(&mut self, theme: ThemeId) {
        debug!(%theme, "play theme");
        self.publish(self.params.with_theme(theme));
    }

    /// Silence every voice. Phases keep running.
    pub fn stop_music(&mut self) {
        self.publish(self.params.stopped());
    }

    /// Set the master volume, clamped to 0-1.
    pub fn set_master_volume(&mut self, volume: f32) {
        self.publish(self.params.with_master_volume(volume));
    }

    /// Set tension from the fraction of time remaining (1.0 = calm, 0.0 = out of time).
    pub fn update_tension_level(&mut self, time_remaining: f32) {
        self.publish(self.params.with_tension(1.0 - time_remaining));
    }

    /// Play the theme associated with a puzzle category.
    pub fn update_for_puzzle_type(&mut self, category: PuzzleCategory) {
        self.play_theme(category.theme());
    }

    /// Sound the one-shot blip on the noise voice for one callback.
    ///
    /// Every effect name currently maps to the same blip.
    pub fn play_sound_effect(&mut self, name: &str) {
        debug!(effect = name, "one-shot effect");
        self.publish(self.params.with_one_shot());
    }

    fn publish(&mut self, next: SynthesisParameters) {
        self.params = next;
        if let Some(pb) = self.playback.as_mut() {
            if !pb.publisher.publish(next) {
                debug!(version = next.version, "hand-off ring full, using overflow slot");
            }
        }
    }

    // --- State ---

    /// The most recently published snapshot; the audio thread renders it from its next callback.
    pub fn snapshot(&self) -> &SynthesisParameters {
        &self.params
    }

    pub fn theme(&self) -> ThemeId {
        self.params.active_theme
    }

    pub fn tension(&self) -> f32 {
        self.params.tension
    }

    pub fn master_volume(&self) -> f32 {
        self.params.master_volume
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    // --- Offline rendering ---

    /// Render `frames` mono samples of the current snapshot without a device.
    pub fn render_frames(&self, frames: usize) -> Vec<f32> {
        let mut mixer = Mixer::new(self.config.noise_seed);
        mixer.sync_effects(&self.params);

        let mut out = vec![0.0; frames];
        for block in out.chunks_mut(RENDER_BLOCK) {
            mixer.render(&self.params, block);
        }
        out
    }

    /// Render `seconds` of the current snapshot as a mono 16-bit WAV file.
    pub fn render_to_wav(&self, seconds: f32) -> Vec<u8> {
        let sample_rate = self.config.render_sample_rate;
        let frames = (sample_rate as f32 * seconds.max(0.0)) as usize;
        wav::samples_to_wav(&self.render_frames(frames), sample_rate)
    }
}

impl Default for Controller {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl Drop for Controller {
    fn drop(&mut self) {
        self.cleanup();
    }
}

impl ScoreCues for Controller {
    fn select_theme(&mut self, theme: ThemeId) {
        self.play_theme(theme);
    }

    fn set_tension(&mut self, time_remaining: f32) {
        self.update_tension_level(time_remaining);
    }

    fn select_for_puzzle_category(&mut self, category: PuzzleCategory) {
        self.update_for_puzzle_type(category);
    }

    fn trigger_effect(&mut self, name: &str) {
        self.play_sound_effect(name);
    }
}
