use super::audio_buffer::AudioBuffer;
use super::stem::Stem;

/// An isolated stem produced by a separator, waiting to be written.
#[derive(Clone, Debug, PartialEq)]
pub struct StemResult {
    pub stem: Stem,
    pub audio: AudioBuffer,
}

impl StemResult {
    pub fn new(stem: Stem, audio: AudioBuffer) -> Self {
        Self { stem, audio }
    }
}
