use thiserror::Error;

use crate::audio::domain::stem::Stem;

#[derive(Error, Debug)]
pub enum SeparationError {
    /// Opaque failure reported by the engine, surfaced unchanged.
    #[error("{0}")]
    EngineFailure(Box<dyn std::error::Error + Send + Sync>),
    #[error("engine returned no audio for stem '{0}'")]
    MissingStem(Stem),
    #[error(
        "engine returned {actual_rate} Hz / {actual_channels} ch audio for stem '{stem}', \
         expected {expected_rate} Hz / {expected_channels} ch"
    )]
    FormatMismatch {
        stem: Stem,
        expected_rate: u32,
        expected_channels: u16,
        actual_rate: u32,
        actual_channels: u16,
    },
}

impl SeparationError {
    pub fn engine(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        SeparationError::EngineFailure(err.into())
    }
}
