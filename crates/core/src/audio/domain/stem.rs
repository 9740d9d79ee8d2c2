use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::shared::constants::WAV_EXTENSION;

/// An isolatable instrumental or vocal component of a mixed recording.
///
/// Ordering follows declaration order, which is also the order stems are
/// written in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stem {
    Vocals,
    Bass,
    Drums,
    Brass,
    Synth,
    Guitar,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown stem '{0}'")]
pub struct ParseStemError(pub String);

impl Stem {
    pub const ALL: [Stem; 6] = [
        Stem::Vocals,
        Stem::Bass,
        Stem::Drums,
        Stem::Brass,
        Stem::Synth,
        Stem::Guitar,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Stem::Vocals => "vocals",
            Stem::Bass => "bass",
            Stem::Drums => "drums",
            Stem::Brass => "brass",
            Stem::Synth => "synth",
            Stem::Guitar => "guitar",
        }
    }

    /// Output file name for this stem, e.g. `drums.wav`.
    ///
    /// Depends only on the stem so repeated runs overwrite earlier output.
    pub fn file_name(self) -> String {
        format!("{}.{}", self.name(), WAV_EXTENSION)
    }

    /// Comma-separated list of every valid stem name, for error messages.
    pub fn valid_names() -> String {
        Self::ALL.map(Stem::name).join(", ")
    }
}

impl fmt::Display for Stem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Stem {
    type Err = ParseStemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|stem| stem.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ParseStemError(s.to_string()))
    }
}
