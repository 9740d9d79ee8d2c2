use std::path::Path;

use super::waveform_error::WaveformError;
use crate::audio::domain::audio_buffer::AudioBuffer;

/// Domain interface for decoding an audio container into memory.
pub trait WaveformReader: Send {
    /// Decode the file at `path`. Existence is checked here, not when parsing flags.
    fn read(&self, path: &Path) -> Result<AudioBuffer, WaveformError>;
}
