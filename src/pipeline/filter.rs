//! Audio file eligibility

use std::path::Path;

/// Extensions (without the leading dot) recognised as convertible audio.
pub const AUDIO_EXTENSIONS: [&str; 7] = ["wav", "mp3", "ogg", "flac", "m4a", "wma", "aiff"];

/// Returns true when the file name carries one of [`AUDIO_EXTENSIONS`],
/// compared case-insensitively.
///
/// Dot-files such as `.mp3` have no extension and are never eligible.
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            AUDIO_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}
