use std::collections::{BTreeMap, BTreeSet};
use std::ffi::OsString;
use std::path::PathBuf;
use std::time::Instant;

use crate::audio::domain::stem::Stem;
use crate::audio::domain::stem_result::StemResult;
use crate::config::flag_parser::parse_flags;
use crate::config::run_config::RunConfig;
use crate::separation::domain::separation_error::SeparationError;
use crate::separation::domain::stem_separator::StemSeparator;
use crate::waveform::domain::waveform_reader::WaveformReader;
use crate::waveform::domain::waveform_writer::WaveformWriter;

use super::pipeline_logger::PipelineLogger;
use super::run_error::RunError;
use super::run_stage::RunStage;

/// Orchestrates one run: parse flags → read → separate → write.
///
/// Any failure aborts the run; nothing is retried. The stage ends at
/// `Done` whether the run succeeded or not.
pub struct SeparateStemsUseCase {
    reader: Box<dyn WaveformReader>,
    writer: Box<dyn WaveformWriter>,
    separator: Box<dyn StemSeparator>,
    logger: Box<dyn PipelineLogger>,
    stage: RunStage,
}

impl SeparateStemsUseCase {
    pub fn new(
        reader: Box<dyn WaveformReader>,
        writer: Box<dyn WaveformWriter>,
        separator: Box<dyn StemSeparator>,
        logger: Box<dyn PipelineLogger>,
    ) -> Self {
        Self {
            reader,
            writer,
            separator,
            logger,
            stage: RunStage::Configuring,
        }
    }

    pub fn stage(&self) -> RunStage {
        self.stage
    }

    /// Parses `args` (without the program name) and processes the result.
    ///
    /// Returns the paths of the stem files written.
    pub fn run<I, S>(&mut self, args: I) -> Result<Vec<PathBuf>, RunError>
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.stage = RunStage::Configuring;
        let result = match parse_flags(args) {
            Ok(config) => self.execute(&config),
            Err(e) => Err(e.into()),
        };
        self.stage = RunStage::Done;
        result
    }

    /// Processes an already validated configuration.
    pub fn execute(&mut self, config: &RunConfig) -> Result<Vec<PathBuf>, RunError> {
        self.stage = RunStage::Processing;
        let result = self.process(config);
        self.stage = RunStage::Done;
        if let Err(ref e) = result {
            log::debug!("Run failed during {:?}: {e}", e.stage());
        }
        result
    }

    fn process(&mut self, config: &RunConfig) -> Result<Vec<PathBuf>, RunError> {
        let requested = config.requested_stems();
        self.logger
            .info(&format!("Input file:        {}", config.input_path().display()));
        self.logger
            .info(&format!("Output directory:  {}", config.output_dir().display()));
        self.logger
            .info(&format!("Sampled sources:   {}", join_names(requested)));

        let started = Instant::now();
        let audio = self
            .reader
            .read(config.input_path())
            .map_err(RunError::Reading)?;
        self.logger.timing("read", elapsed_ms(started));
        self.logger.metric("frames", audio.frames() as f64);

        let sample_rate = audio.sample_rate();
        let channels = audio.channels();

        let started = Instant::now();
        let results = self.separator.separate(audio, requested)?;
        let results = select_requested(results, requested, sample_rate, channels)?;
        self.logger.timing("separate", elapsed_ms(started));

        let started = Instant::now();
        let written = self
            .writer
            .write_stems(config.output_dir(), results)
            .map_err(RunError::Writing)?;
        self.logger.timing("write", elapsed_ms(started));
        self.logger.metric("stems_written", written.len() as f64);

        self.logger.summary();
        Ok(written)
    }
}

/// Keeps exactly one result per requested stem, in stem order, and checks
/// each matches the input's sample rate and channel count.
fn select_requested(
    results: Vec<StemResult>,
    requested: &BTreeSet<Stem>,
    sample_rate: u32,
    channels: u16,
) -> Result<Vec<StemResult>, SeparationError> {
    let mut by_stem = BTreeMap::new();
    for result in results {
        if !requested.contains(&result.stem) {
            log::warn!("Dropping unrequested stem '{}' from separator", result.stem);
            continue;
        }
        if result.audio.sample_rate() != sample_rate || result.audio.channels() != channels {
            return Err(SeparationError::FormatMismatch {
                stem: result.stem,
                expected_rate: sample_rate,
                expected_channels: channels,
                actual_rate: result.audio.sample_rate(),
                actual_channels: result.audio.channels(),
            });
        }
        if by_stem.insert(result.stem, result).is_some() {
            log::warn!("Separator returned a stem more than once; keeping the last");
        }
    }

    if let Some(missing) = requested.iter().find(|stem| !by_stem.contains_key(*stem)) {
        return Err(SeparationError::MissingStem(*missing));
    }
    Ok(by_stem.into_values().collect())
}

fn join_names(stems: &BTreeSet<Stem>) -> String {
    stems
        .iter()
        .map(|s| s.name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn elapsed_ms(started: Instant) -> f64 {
    started.elapsed().as_secs_f64() * 1000.0
}
