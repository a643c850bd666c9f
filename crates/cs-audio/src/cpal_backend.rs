//! CPAL-based audio output backend.

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, Device, FromSample, Sample, SampleFormat, SizedSample, Stream, StreamConfig};
use cs_engine::Synth;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{debug, error};

use crate::traits::{AudioError, AudioOutput};

/// Device settings requested when opening the output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputConfig {
    /// Fixed callback size in frames, or `None` for the device default
    pub buffer_frames: Option<u32>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            buffer_frames: Some(2048),
        }
    }
}

/// CPAL-based audio output.
///
/// The device callback owns the [`Synth`]; dropping this value closes the
/// stream, after which no further callback runs.
pub struct CpalOutput {
    config: StreamConfig,
    stream: Stream,
    running: Arc<AtomicBool>,
}

impl CpalOutput {
    /// Open the default output device and start rendering `synth` into it.
    pub fn open(settings: OutputConfig, synth: Synth) -> Result<Self, AudioError> {
        let host = cpal::default_host();
        let device = host.default_output_device().ok_or(AudioError::NoDevice)?;

        let supported = device
            .default_output_config()
            .map_err(|e| AudioError::DeviceInit(e.to_string()))?;
        let sample_format = supported.sample_format();

        let mut config: StreamConfig = supported.into();
        if let Some(frames) = settings.buffer_frames {
            config.buffer_size = BufferSize::Fixed(frames);
        }

        let running = Arc::new(AtomicBool::new(true));
        let stream = match sample_format {
            SampleFormat::F32 => build_stream::<f32>(&device, &config, synth, running.clone()),
            SampleFormat::I16 => build_stream::<i16>(&device, &config, synth, running.clone()),
            SampleFormat::U16 => build_stream::<u16>(&device, &config, synth, running.clone()),
            other => Err(AudioError::UnsupportedFormat(format!("{other:?}"))),
        }?;

        stream.play().map_err(|e| AudioError::Playback(e.to_string()))?;
        debug!(
            sample_rate = config.sample_rate.0,
            channels = config.channels,
            ?sample_format,
            "audio stream started"
        );

        Ok(Self {
            config,
            stream,
            running,
        })
    }
}

fn build_stream<T>(
    device: &Device,
    config: &StreamConfig,
    mut synth: Synth,
    running: Arc<AtomicBool>,
) -> Result<Stream, AudioError>
where
    T: SizedSample + FromSample<f32>,
{
    let channels = config.channels as usize;

    device
        .build_output_stream(
            config,
            move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
                if !running.load(Ordering::Relaxed) {
                    data.fill(T::EQUILIBRIUM);
                    return;
                }
                synth.process_interleaved(data, channels, |s: f32| T::from_sample(s));
            },
            |err| error!("audio stream error: {err}"),
            None,
        )
        .map_err(|e| AudioError::StreamCreate(e.to_string()))
}

impl AudioOutput for CpalOutput {
    fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    fn channels(&self) -> u16 {
        self.config.channels
    }

    fn stop(&mut self) -> Result<(), AudioError> {
        self.running.store(false, Ordering::Relaxed);
        self.stream
            .pause()
            .map_err(|e| AudioError::Playback(e.to_string()))
    }
}
