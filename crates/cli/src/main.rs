use std::env;
use std::process;

use siren_core::config::flag_parser::FlagError;
use siren_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use siren_core::pipeline::run_error::RunError;
use siren_core::pipeline::separate_stems_use_case::SeparateStemsUseCase;
use siren_core::separation::infrastructure::passthrough_separator::PassthroughSeparator;
use siren_core::shared::constants::DEFAULT_LOG_FILTER;
use siren_core::waveform::infrastructure::wav_file_reader::WavFileReader;
use siren_core::waveform::infrastructure::wav_file_writer::WavFileWriter;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    match run() {
        Ok(()) => {}
        Err(RunError::Configuring(FlagError::Help(text))) => {
            println!("{text}");
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

fn run() -> Result<(), RunError> {
    let mut use_case = SeparateStemsUseCase::new(
        Box::new(WavFileReader::new()),
        Box::new(WavFileWriter::new()),
        Box::new(PassthroughSeparator::new()),
        Box::new(StdoutPipelineLogger::new()),
    );

    let written = use_case.run(env::args_os().skip(1))?;
    log::info!("Wrote {} stem file(s)", written.len());
    Ok(())
}
