pub const WAV_EXTENSION: &str = "wav";

/// Suffix for stem files that are still being written.
pub const PARTIAL_SUFFIX: &str = "part";

/// `env_logger` filter used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

pub const INPUT_FLAG: &str = "-input";
pub const OUTPUT_FLAG: &str = "-output";
pub const SOURCE_FLAG: &str = "-source";
