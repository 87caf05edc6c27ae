//! Error types for the conversion pipeline.
//!
//! `Config` errors are fatal and stop a run before any file is touched.
//! `Io`, `Transcode` and `Prompt` errors are scoped to a single job: the
//! batch driver reports them and moves on to the next file.

use std::path::{Path, PathBuf};
use std::process::ExitStatus;

/// Errors raised while converting an audio tree.
#[derive(Debug, thiserror::Error)]
pub enum ConvertError {
    /// Bad arguments or an inconsistent pair of roots.
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A filesystem operation failed on `path`.
    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The transcoder ran but did not exit successfully.
    #[error("Transcoder '{program}' failed: {status}")]
    Transcode { program: String, status: ExitStatus },

    /// The confirmation channel could not be read.
    #[error("Prompt error: {message}")]
    Prompt { message: String },
}

impl ConvertError {
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn prompt<S: Into<String>>(msg: S) -> Self {
        Self::Prompt {
            message: msg.into(),
        }
    }

    /// Returns true for errors that must abort the whole run.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Config { .. })
    }
}

pub type Result<T, E = ConvertError> = std::result::Result<T, E>;
