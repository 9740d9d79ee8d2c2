use std::collections::BTreeSet;
use std::ffi::OsString;
use std::path::PathBuf;

use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use thiserror::Error;

use super::run_config::RunConfig;
use crate::audio::domain::stem::Stem;
use crate::shared::constants::{INPUT_FLAG, OUTPUT_FLAG, SOURCE_FLAG};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlagError {
    #[error("invalid argument '{argument}': {reason}")]
    InvalidArgument { argument: String, reason: String },
    #[error("missing required argument {0}")]
    MissingArgument(&'static str),
    #[error("unknown stem '{name}' (expected one of: {})", Stem::valid_names())]
    UnknownStem { name: String },
    /// Help or version text was requested; not a failure.
    #[error("{0}")]
    Help(String),
}

/// Isolate instrument and vocal stems from a mixed WAV recording.
#[derive(Parser, Debug)]
#[command(name = "siren", version, no_binary_name = true)]
struct FlagArgs {
    /// Mixed PCM WAV recording to separate.
    #[arg(long, value_name = "PATH")]
    input: Option<PathBuf>,

    /// Directory for the stem files (created if missing).
    #[arg(long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Stems to isolate: vocals, bass, drums, brass, synth, guitar.
    #[arg(long, value_name = "NAME", num_args = 1..)]
    source: Vec<String>,
}

/// Parse the argument list (without the program name) into a `RunConfig`.
///
/// Flags take the single-dash form `-input`, `-output` and `-source`; the
/// double-dash spelling is accepted too. Paths are not checked here.
/// Duplicate stems collapse into one request.
pub fn parse_flags<I, S>(args: I) -> Result<RunConfig, FlagError>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let args: Vec<OsString> = args.into_iter().map(|a| normalize_flag(a.into())).collect();
    let parsed = FlagArgs::try_parse_from(args).map_err(map_clap_error)?;

    let mut stems = BTreeSet::new();
    for name in &parsed.source {
        let stem: Stem = name.parse().map_err(|_| FlagError::UnknownStem {
            name: name.clone(),
        })?;
        if !stems.insert(stem) {
            log::warn!("Ignoring duplicate stem '{name}'");
        }
    }

    let input = parsed.input.ok_or(FlagError::MissingArgument(INPUT_FLAG))?;
    let output = parsed.output.ok_or(FlagError::MissingArgument(OUTPUT_FLAG))?;
    RunConfig::new(input, output, stems)
}

/// Rewrites `-name` to `--name` so clap treats it as a long flag.
fn normalize_flag(arg: OsString) -> OsString {
    let rewritten = arg.to_str().and_then(|s| {
        let rest = s.strip_prefix('-')?;
        let long = rest.len() > 1
            && rest.starts_with(|c: char| c.is_ascii_alphabetic())
            && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');
        long.then(|| format!("--{rest}"))
    });
    rewritten.map(OsString::from).unwrap_or(arg)
}

/// Shows a flag the way users type it: `--input` becomes `-input`.
fn display_flag(flag: &str) -> String {
    match flag.strip_prefix("--") {
        Some(rest) => format!("-{rest}"),
        None => flag.to_string(),
    }
}

fn map_clap_error(err: clap::Error) -> FlagError {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            FlagError::Help(err.render().to_string())
        }
        kind => {
            let argument = match err.get(ContextKind::InvalidArg) {
                Some(ContextValue::String(arg)) => arg.clone(),
                _ => String::new(),
            };
            // Context values carry the value name, e.g. `--input <PATH>`.
            let argument = argument
                .split_whitespace()
                .next()
                .map(display_flag)
                .unwrap_or_default();
            let reason = if kind == ErrorKind::UnknownArgument {
                if argument.starts_with('-') {
                    "unknown flag".to_string()
                } else {
                    "unexpected value".to_string()
                }
            } else {
                first_line(&err.render().to_string())
            };
            FlagError::InvalidArgument { argument, reason }
        }
    }
}

/// First line of a clap message, with flags spelled the way users type them.
fn first_line(message: &str) -> String {
    message
        .lines()
        .next()
        .unwrap_or_default()
        .trim_start_matches("error: ")
        .split(' ')
        .map(|word| match word.strip_prefix("'--") {
            Some(rest) => format!("'-{rest}"),
            None => word.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}
