//! Overwrite conflict resolution
//!
//! An existing output file is only replaced when the run is forced or the
//! operator agrees. The question itself is asked through a [`Confirmer`] so
//! non-interactive runs and tests can answer without a terminal.

use std::path::Path;

use log::debug;

use crate::error::{ConvertError, Result};

/// Outcome for one conflicting output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteDecision {
    /// Remove the existing file and convert.
    Overwrite,
    /// Leave the existing file alone and move on to the next job.
    Skip,
    /// Stop the batch without visiting any further files.
    Abort,
}

/// Something that can answer "may this file be overwritten?".
pub trait Confirmer {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<OverwriteDecision>;
}

impl<C: Confirmer + ?Sized> Confirmer for &mut C {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<OverwriteDecision> {
        (**self).confirm_overwrite(path)
    }
}

/// Decide whether `output` may be written.
///
/// A missing file is trivially `Overwrite` and nobody is asked. An existing
/// file is `Overwrite` without asking when `force` is set; otherwise the
/// confirmer decides. On `Overwrite` the previous file has been deleted by
/// the time this returns, on `Skip`/`Abort` it is untouched.
pub fn resolve_conflict(
    output: &Path,
    force: bool,
    confirmer: &mut dyn Confirmer,
) -> Result<OverwriteDecision> {
    if std::fs::symlink_metadata(output).is_err() {
        return Ok(OverwriteDecision::Overwrite);
    }

    let decision = if force {
        OverwriteDecision::Overwrite
    } else {
        confirmer.confirm_overwrite(output)?
    };

    debug!("{}: {:?}", output.display(), decision);

    if decision == OverwriteDecision::Overwrite {
        remove_existing(output)?;
    }

    Ok(decision)
}

fn remove_existing(path: &Path) -> Result<()> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| ConvertError::io(path, e))?;

    if metadata.is_dir() {
        return Err(ConvertError::io(
            path,
            std::io::Error::new(
                std::io::ErrorKind::Other,
                "a directory occupies the output location",
            ),
        ));
    }

    std::fs::remove_file(path).map_err(|e| ConvertError::io(path, e))
}
