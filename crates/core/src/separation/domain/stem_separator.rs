use std::collections::BTreeSet;

use super::separation_error::SeparationError;
use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::stem::Stem;
use crate::audio::domain::stem_result::StemResult;

/// Domain interface for source separation engines.
///
/// Implementations take ownership of the mixed audio and return one isolated
/// buffer per requested stem, at the input's sample rate and channel count.
/// Whether stems are produced in one joint pass or one call each is up to the
/// engine; callers treat the whole call as a single blocking step.
pub trait StemSeparator: Send {
    fn separate(
        &self,
        audio: AudioBuffer,
        stems: &BTreeSet<Stem>,
    ) -> Result<Vec<StemResult>, SeparationError>;
}
