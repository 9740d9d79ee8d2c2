use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use super::flag_parser::FlagError;
use crate::audio::domain::stem::Stem;
use crate::shared::constants::SOURCE_FLAG;

/// Validated settings for a single invocation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    input_path: PathBuf,
    output_dir: PathBuf,
    requested_stems: BTreeSet<Stem>,
}

impl RunConfig {
    /// Fails with `MissingArgument` if no stems are requested.
    pub fn new(
        input_path: PathBuf,
        output_dir: PathBuf,
        requested_stems: BTreeSet<Stem>,
    ) -> Result<Self, FlagError> {
        if requested_stems.is_empty() {
            return Err(FlagError::MissingArgument(SOURCE_FLAG));
        }
        Ok(Self {
            input_path,
            output_dir,
            requested_stems,
        })
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn requested_stems(&self) -> &BTreeSet<Stem> {
        &self.requested_stems
    }
}
