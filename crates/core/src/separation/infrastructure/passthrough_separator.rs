use std::collections::BTreeSet;

use crate::audio::domain::audio_buffer::AudioBuffer;
use crate::audio::domain::stem::Stem;
use crate::audio::domain::stem_result::StemResult;
use crate::separation::domain::separation_error::SeparationError;
use crate::separation::domain::stem_separator::StemSeparator;

/// Placeholder engine that hands back the unmodified mix for every stem.
///
/// Lets the read/write pipeline run end to end until a real model is wired in.
pub struct PassthroughSeparator;

impl PassthroughSeparator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassthroughSeparator {
    fn default() -> Self {
        Self::new()
    }
}

impl StemSeparator for PassthroughSeparator {
    fn separate(
        &self,
        audio: AudioBuffer,
        stems: &BTreeSet<Stem>,
    ) -> Result<Vec<StemResult>, SeparationError> {
        let stems: Vec<Stem> = stems.iter().copied().collect();
        let Some((last, rest)) = stems.split_last() else {
            return Ok(Vec::new());
        };

        let mut results = Vec::with_capacity(stems.len());
        for &stem in rest {
            log::debug!("Isolating {stem}");
            results.push(StemResult::new(stem, audio.clone()));
        }
        log::debug!("Isolating {last}");
        results.push(StemResult::new(*last, audio));
        Ok(results)
    }
}
