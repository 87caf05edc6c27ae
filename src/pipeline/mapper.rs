//! Mirrored output paths
//!
//! An input file `<input_root>/<rel>` is written to `<output_root>/<rel>`:
//! same subdirectories, same base name, same extension.

use std::path::{Component, Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Compute the mirrored output location for `file`.
///
/// `file` must lie under `input_root`; anything else is a configuration error
/// since the batch driver only hands over entries it found below the root.
pub fn mirrored_path(input_root: &Path, output_root: &Path, file: &Path) -> Result<PathBuf> {
    let relative = file.strip_prefix(input_root).map_err(|_| {
        ConvertError::config(format!(
            "{} is not located under input root {}",
            file.display(),
            input_root.display()
        ))
    })?;

    if relative.as_os_str().is_empty() {
        return Err(ConvertError::config(format!(
            "{} is the input root itself, not a file below it",
            file.display()
        )));
    }

    Ok(output_root.join(relative))
}

/// Fail when both roots name the same directory.
///
/// Paths are compared after lexical normalisation (`in`, `./in/` and
/// `in/sub/..` are equal) and, when both exist, after canonicalisation so
/// symlinked aliases are caught as well.
pub fn ensure_distinct_roots(input_root: &Path, output_root: &Path) -> Result<()> {
    let same_lexically = normalize(input_root) == normalize(output_root);

    let same_on_disk = match (input_root.canonicalize(), output_root.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    };

    if same_lexically || same_on_disk {
        return Err(ConvertError::config(
            "output path must be different from input path",
        ));
    }

    Ok(())
}

/// Returns true when `path` lies inside `root` (or is `root`).
pub fn is_within(root: &Path, path: &Path) -> bool {
    let root = root.canonicalize().unwrap_or_else(|_| normalize(root));
    let path = path.canonicalize().unwrap_or_else(|_| normalize(path));
    path.starts_with(root)
}

/// Lexically resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }

    if out.as_os_str().is_empty() {
        out.push(".");
    }

    out
}
