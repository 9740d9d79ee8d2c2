use std::path::{Path, PathBuf};

use super::waveform_error::WaveformError;
use crate::audio::domain::stem_result::StemResult;

/// Domain interface for persisting isolated stems.
pub trait WaveformWriter: Send {
    /// Write one file per stem into `output_dir`, creating it if needed.
    ///
    /// Either every file is written or none are. Returns the written paths
    /// in the order the stems were given.
    fn write_stems(
        &self,
        output_dir: &Path,
        stems: Vec<StemResult>,
    ) -> Result<Vec<PathBuf>, WaveformError>;
}
