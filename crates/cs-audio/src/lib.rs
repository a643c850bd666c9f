//! Audio output backends for the chipscore synthesizer.

mod cpal_backend;
mod traits;

pub use cpal_backend::{CpalOutput, OutputConfig};
pub use traits::{AudioError, AudioOutput};
