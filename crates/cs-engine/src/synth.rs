//! The audio callback body: snapshot reader plus mixer.

use crate::handoff::SnapshotReader;
use crate::mixer::Mixer;

/// Everything the audio thread owns.
///
/// Each call reads the newest published snapshot exactly once and renders
/// the whole buffer from it.
pub struct Synth {
    reader: SnapshotReader,
    mixer: Mixer,
}

impl Synth {
    pub fn new(reader: SnapshotReader, mixer: Mixer) -> Self {
        Self { reader, mixer }
    }

    /// Fill a mono f32 buffer.
    pub fn process(&mut self, out: &mut [f32]) {
        self.process_interleaved(out, 1, |s| s);
    }

    /// Fill an interleaved device buffer with `channels` samples per frame.
    pub fn process_interleaved<T, F>(&mut self, data: &mut [T], channels: usize, convert: F)
    where
        T: Copy,
        F: Fn(f32) -> T,
    {
        #[cfg(feature = "alloc_check")]
        {
            assert_no_alloc::assert_no_alloc(|| self.render(data, channels, convert));
        }
        #[cfg(not(feature = "alloc_check"))]
        self.render(data, channels, convert);
    }

    fn render<T, F>(&mut self, data: &mut [T], channels: usize, convert: F)
    where
        T: Copy,
        F: Fn(f32) -> T,
    {
        let params = self.reader.latest();
        self.mixer.render_interleaved(params, data, channels, convert);
    }

    pub fn mixer(&self) -> &Mixer {
        &self.mixer
    }

    pub fn reader(&self) -> &SnapshotReader {
        &self.reader
    }
}
