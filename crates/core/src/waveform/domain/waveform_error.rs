use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum WaveformError {
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },
    #[error("unsupported format in {path}: {reason}")]
    UnsupportedFormat { path: PathBuf, reason: String },
    #[error("permission denied: {path}")]
    PermissionDenied {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WaveformError {
    /// Classifies an I/O failure on `path`.
    pub fn from_io(path: &Path, source: io::Error) -> Self {
        let path = path.to_path_buf();
        match source.kind() {
            io::ErrorKind::NotFound => WaveformError::FileNotFound { path },
            io::ErrorKind::PermissionDenied => WaveformError::PermissionDenied { path, source },
            _ => WaveformError::Io { path, source },
        }
    }

    pub fn unsupported(path: &Path, reason: impl Into<String>) -> Self {
        WaveformError::UnsupportedFormat {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }

    /// Re-targets the error at `path`, keeping its kind and cause.
    pub fn with_path(self, path: &Path) -> Self {
        let path = path.to_path_buf();
        match self {
            WaveformError::FileNotFound { .. } => WaveformError::FileNotFound { path },
            WaveformError::UnsupportedFormat { reason, .. } => {
                WaveformError::UnsupportedFormat { path, reason }
            }
            WaveformError::PermissionDenied { source, .. } => {
                WaveformError::PermissionDenied { path, source }
            }
            WaveformError::Io { source, .. } => WaveformError::Io { path, source },
        }
    }

    /// The file or directory the failure refers to.
    pub fn path(&self) -> &Path {
        match self {
            WaveformError::FileNotFound { path }
            | WaveformError::UnsupportedFormat { path, .. }
            | WaveformError::PermissionDenied { path, .. }
            | WaveformError::Io { path, .. } => path,
        }
    }
}
