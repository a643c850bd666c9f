//! Audio output trait and error types.

/// Error type for audio operations.
#[derive(Debug, thiserror::Error)]
pub enum AudioError {
    /// Failed to initialize audio device
    #[error("device init error: {0}")]
    DeviceInit(String),
    /// Failed to create audio stream
    #[error("stream create error: {0}")]
    StreamCreate(String),
    /// Playback error
    #[error("playback error: {0}")]
    Playback(String),
    /// Device only offers sample formats the synth cannot write
    #[error("unsupported sample format: {0}")]
    UnsupportedFormat(String),
    /// No audio device available
    #[error("no audio device available")]
    NoDevice,
}

/// A running output device pulling frames from the synth.
pub trait AudioOutput {
    /// Get the sample rate.
    fn sample_rate(&self) -> u32;

    /// Interleaved channel count of the device stream.
    fn channels(&self) -> u16;

    /// Pause the device. The callback writes silence from then on.
    fn stop(&mut self) -> Result<(), AudioError>;
}
