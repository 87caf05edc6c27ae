//! External transcoder invocation

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use log::debug;

use super::run_log::RunLog;
use crate::error::{ConvertError, Result};

/// One file to convert. Built by the batch driver, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionJob {
    input_path: PathBuf,
    output_path: PathBuf,
}

impl ConversionJob {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
}

/// How the transcoder is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscodeSettings {
    /// Program to execute, looked up on `PATH` when not a path.
    pub program: OsString,
    /// Arguments placed between the program and `-i`.
    pub extra_args: Vec<OsString>,
    pub codec: String,
    pub channels: u16,
    pub sample_rate: u32,
    /// Container forced with `-f`; `None` lets the transcoder infer it from
    /// the output extension.
    pub container: Option<String>,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            program: OsString::from("ffmpeg"),
            extra_args: Vec::new(),
            codec: "pcm_s16le".to_string(),
            channels: 1,
            sample_rate: 16_000,
            container: Some("wav".to_string()),
        }
    }
}

impl TranscodeSettings {
    /// Full argument vector, program first.
    pub fn argv(&self, job: &ConversionJob) -> Vec<OsString> {
        let mut argv = Vec::with_capacity(self.extra_args.len() + 12);
        argv.push(self.program.clone());
        argv.extend(self.extra_args.iter().cloned());
        argv.push("-i".into());
        argv.push(job.input_path.clone().into_os_string());
        argv.push("-acodec".into());
        argv.push(self.codec.clone().into());
        argv.push("-ac".into());
        argv.push(self.channels.to_string().into());
        argv.push("-ar".into());
        argv.push(self.sample_rate.to_string().into());

        if let Some(container) = &self.container {
            argv.push("-f".into());
            argv.push(container.clone().into());
        }

        argv.push(job.output_path.clone().into_os_string());
        argv
    }

    /// The command as written to the run log: arguments joined by single spaces.
    pub fn command_line(&self, job: &ConversionJob) -> String {
        self.argv(job)
            .iter()
            .map(|arg| arg.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// Result of a transcoder run that could be started.
#[derive(Debug, Clone, Copy)]
pub struct TranscodeOutcome {
    pub status: ExitStatus,
}

impl TranscodeOutcome {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    /// Turn a non-zero exit into a [`ConvertError::Transcode`].
    pub fn into_result(self, settings: &TranscodeSettings) -> Result<()> {
        if self.success() {
            return Ok(());
        }

        Err(ConvertError::Transcode {
            program: settings.program.to_string_lossy().into_owned(),
            status: self.status,
        })
    }
}

/// Run the transcoder for `job`, waiting for it to finish.
///
/// The command line and everything the child prints on stdout and stderr
/// end up in `log`. The child's stdin is closed so it can never swallow an
/// answer meant for an overwrite prompt.
///
/// Returns `Err` only if the child could not be started; a child that runs
/// and fails is reported through [`TranscodeOutcome`].
pub fn transcode(
    job: &ConversionJob,
    settings: &TranscodeSettings,
    log: &RunLog,
) -> Result<TranscodeOutcome> {
    let command_line = settings.command_line(job);
    debug!("{}", command_line);

    log.record_command(&command_line, |sink| {
        let stdout = sink.try_clone().map_err(|e| ConvertError::io(log.path(), e))?;
        let stderr = sink.try_clone().map_err(|e| ConvertError::io(log.path(), e))?;

        let status = Command::new(&settings.program)
            .args(&settings.argv(job)[1..])
            .stdin(Stdio::null())
            .stdout(Stdio::from(stdout))
            .stderr(Stdio::from(stderr))
            .status()
            .map_err(|e| ConvertError::io(Path::new(&settings.program), e))?;

        Ok(TranscodeOutcome { status })
    })
}
