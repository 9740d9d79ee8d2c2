use thiserror::Error;

use super::run_stage::RunStage;
use crate::config::flag_parser::FlagError;
use crate::separation::domain::separation_error::SeparationError;
use crate::waveform::domain::waveform_error::WaveformError;

/// A failed run, tagged with the step that failed.
#[derive(Error, Debug)]
pub enum RunError {
    #[error("parsing flags: {0}")]
    Configuring(#[from] FlagError),
    #[error("reading input: {0}")]
    Reading(WaveformError),
    #[error("separating stems: {0}")]
    Separating(#[from] SeparationError),
    #[error("writing stems: {0}")]
    Writing(WaveformError),
}

impl RunError {
    /// The lifecycle stage the run was in when it failed.
    pub fn stage(&self) -> RunStage {
        match self {
            RunError::Configuring(_) => RunStage::Configuring,
            RunError::Reading(_) | RunError::Separating(_) | RunError::Writing(_) => {
                RunStage::Processing
            }
        }
    }
}
