//! Batch driver: walk → filter → map → resolve → transcode → log
//!
//! Fully sequential. Each eligible file is taken through every stage, and the
//! transcoder has exited, before the next entry is looked at.

use std::path::{Path, PathBuf};

use chrono::Local;
use indicatif::ProgressBar;
use log::{debug, warn};
use walkdir::WalkDir;

use super::filter::is_audio_file;
use super::mapper::{ensure_distinct_roots, is_within, mirrored_path};
use super::resolver::{resolve_conflict, Confirmer, OverwriteDecision};
use super::run_log::RunLog;
use super::transcode::{transcode, ConversionJob, TranscodeOutcome, TranscodeSettings};
use crate::error::{ConvertError, Result};
use crate::report::BatchSummary;
use crate::utils::{
    create_spinner, finish_with_success, finish_with_warning, print_info, print_job,
    print_skip, print_warning,
};

/// Everything a run needs to know up front.
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_root: PathBuf,
    pub output_root: PathBuf,
    /// Overwrite existing outputs without asking.
    pub force: bool,
    pub settings: TranscodeSettings,
}

impl BatchOptions {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            force: false,
            settings: TranscodeSettings::default(),
        }
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn settings(mut self, settings: TranscodeSettings) -> Self {
        self.settings = settings;
        self
    }
}

/// What happened to a single eligible file.
#[derive(Debug)]
enum JobOutcome {
    Converted,
    TranscodeFailed,
    Skipped,
    Aborted,
}

/// Validate the roots and prepare the output root and run log.
///
/// Nothing is created on disk when validation fails.
pub fn prepare_run(options: &BatchOptions) -> Result<RunLog> {
    ensure_distinct_roots(&options.input_root, &options.output_root)?;

    if !options.input_root.is_dir() {
        return Err(ConvertError::config(format!(
            "input path {} is not a directory",
            options.input_root.display()
        )));
    }

    match std::fs::metadata(&options.output_root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => {
            return Err(ConvertError::config(format!(
                "output path {} exists and is not a directory",
                options.output_root.display()
            )));
        }
        Err(_) => {
            debug!("creating {}", options.output_root.display());
            std::fs::create_dir(&options.output_root)
                .map_err(|e| ConvertError::io(&options.output_root, e))?;
        }
    }

    RunLog::create(&options.output_root, Local::now())
}

/// Convert every eligible file under the input root.
///
/// Only validation and set-up failures are returned as `Err`; per-file
/// problems are reported, written to the run log, counted in the summary,
/// and the batch carries on.
pub fn run_batch(options: &BatchOptions, confirmer: &mut dyn Confirmer) -> Result<BatchSummary> {
    let log = prepare_run(options)?;
    let mut summary = BatchSummary::new(log.path().to_path_buf());

    // An output root nested in the input tree must not be walked into.
    let skip_dir = is_within(&options.input_root, &options.output_root)
        .then(|| options.output_root.canonicalize().ok())
        .flatten();

    let walker = WalkDir::new(&options.input_root)
        .min_depth(1)
        .follow_links(false)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| match &skip_dir {
            Some(skip) => !entry.file_type().is_dir() || !same_dir(entry.path(), skip),
            None => true,
        });

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let message = format!("cannot read directory entry: {}", e);
                warn!("{}", message);
                print_warning(&message);
                note_error(&log, &message);
                summary.add_error();
                continue;
            }
        };

        if entry.file_type().is_dir() {
            continue;
        }

        summary.add_seen();

        if !is_audio_file(entry.path()) {
            debug!("ignoring {}", entry.path().display());
            summary.add_ignored();
            continue;
        }

        match run_job(options, entry.path(), &log, confirmer) {
            Ok(JobOutcome::Converted) => summary.add_converted(),
            Ok(JobOutcome::TranscodeFailed) => summary.add_transcode_failure(),
            Ok(JobOutcome::Skipped) => summary.add_skipped(),
            Ok(JobOutcome::Aborted) => {
                print_info("Run aborted by operator");
                summary.set_aborted();
                break;
            }
            Err(e) if e.is_fatal() => return Err(e),
            Err(e) => {
                let message = format!("{}: {}", entry.path().display(), e);
                warn!("{}", message);
                print_warning(&message);
                note_error(&log, &message);
                summary.add_error();
            }
        }
    }

    Ok(summary)
}

fn run_job(
    options: &BatchOptions,
    input: &Path,
    log: &RunLog,
    confirmer: &mut dyn Confirmer,
) -> Result<JobOutcome> {
    let output = mirrored_path(&options.input_root, &options.output_root, input)?;
    print_job(input);

    match resolve_conflict(&output, options.force, confirmer)? {
        OverwriteDecision::Overwrite => {}
        OverwriteDecision::Skip => {
            print_skip(&output);
            return Ok(JobOutcome::Skipped);
        }
        OverwriteDecision::Abort => return Ok(JobOutcome::Aborted),
    }

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }

    let job = ConversionJob::new(input, output);
    let spinner = create_spinner(&format!("Converting {}", job.input_path().display()));
    let outcome = transcode_in_spinner(&job, &options.settings, log, &spinner)?;

    match outcome.into_result(&options.settings) {
        Ok(()) => {
            finish_with_success(&spinner, &format!("Wrote {}", job.output_path().display()));
            Ok(JobOutcome::Converted)
        }
        Err(e) => {
            warn!("{}: {}", job.input_path().display(), e);
            finish_with_warning(&spinner, &e.to_string());
            Ok(JobOutcome::TranscodeFailed)
        }
    }
}

/// Run the transcoder, clearing `spinner` with a warning if it cannot start.
fn transcode_in_spinner(
    job: &ConversionJob,
    settings: &TranscodeSettings,
    log: &RunLog,
    spinner: &ProgressBar,
) -> Result<TranscodeOutcome> {
    transcode(job, settings, log).inspect_err(|e| finish_with_warning(spinner, &e.to_string()))
}

fn same_dir(path: &Path, canonical: &Path) -> bool {
    path.canonicalize().map(|p| p == canonical).unwrap_or(false)
}

/// Errors about the log itself can only go to the diagnostics.
fn note_error(log: &RunLog, message: &str) {
    if let Err(e) = log.record_error(message) {
        warn!("{}", e);
    }
}
