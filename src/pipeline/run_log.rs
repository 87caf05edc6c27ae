//! Per-run command log
//!
//! One plain-text file per run, living directly under the output root. Every
//! write opens the file in append mode and closes it again, so nothing is
//! lost if a later transcoder takes the whole process down.
//!
//! Block layout for a command:
//!
//! ```text
//! <YYYY-MM-DD HH:MM:SS>
//! Running command: <program> <args...>
//! <captured stdout/stderr of the child>
//!
//!
//! ```

use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use log::debug;

use crate::error::{ConvertError, Result};

/// Timestamp format used in the file name (one-second resolution).
pub const FILE_STAMP_FORMAT: &str = "%Y-%m-%d_%Hh%Mm%S";

/// Timestamp format written at the top of every block.
pub const RECORD_STAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Upper bound on same-second suffixes before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

/// Handle on the log file of one run.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    /// Claim a fresh `log_<stamp>` file in `dir`.
    ///
    /// The name is derived from `started` once; if another run already owns
    /// it, `_2`, `_3`, ... are appended until an unused name is found.
    pub fn create(dir: &Path, started: DateTime<Local>) -> Result<Self> {
        let base = format!("log_{}", started.format(FILE_STAMP_FORMAT));

        for attempt in 1..=MAX_NAME_ATTEMPTS {
            let name = if attempt == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, attempt)
            };
            let path = dir.join(name);

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(_) => {
                    debug!("run log: {}", path.display());
                    return Ok(Self { path });
                }
                Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
                Err(e) => return Err(ConvertError::io(&path, e)),
            }
        }

        Err(ConvertError::io(
            dir.join(&base),
            io::Error::new(
                io::ErrorKind::AlreadyExists,
                "no free run log name for this second",
            ),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one command block.
    ///
    /// The header is flushed before `run` is called with the open file, which
    /// the caller hands to the child as stdout and stderr. The separator is
    /// written after `run` returns, whatever it returned.
    pub fn record_command<T>(
        &self,
        command_line: &str,
        run: impl FnOnce(&File) -> Result<T>,
    ) -> Result<T> {
        let mut file = self.open()?;

        write!(
            file,
            "{}\nRunning command: {}\n",
            Local::now().format(RECORD_STAMP_FORMAT),
            command_line
        )
        .and_then(|_| file.flush())
        .map_err(|e| ConvertError::io(&self.path, e))?;

        let outcome = run(&file);

        file.write_all(b"\n\n")
            .map_err(|e| ConvertError::io(&self.path, e))?;

        outcome
    }

    /// Append an error block for a job that never produced command output.
    pub fn record_error(&self, message: &str) -> Result<()> {
        let mut file = self.open()?;

        write!(
            file,
            "{}\nError: {}\n\n",
            Local::now().format(RECORD_STAMP_FORMAT),
            message
        )
        .map_err(|e| ConvertError::io(&self.path, e))
    }

    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| ConvertError::io(&self.path, e))
    }
}
