//! Shared test utilities and fixture generators

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use convert2wav::pipeline::TranscodeSettings;
use tempfile::TempDir;

/// Stand-in transcoder: copies the `-i` file to the last argument and prints
/// one line on each stream so captured output can be checked.
pub const FAKE_TRANSCODER: &str = r#"#!/bin/sh
in=""
out=""
while [ "$#" -gt 0 ]; do
  case "$1" in
    -i) in="$2"; shift 2 ;;
    *) out="$1"; shift ;;
  esac
done
echo "fake transcoder: $in -> $out"
echo "fake transcoder stderr" >&2
cat "$in" > "$out"
"#;

/// Stand-in transcoder that always fails without writing anything.
pub const FAILING_TRANSCODER: &str = r#"#!/bin/sh
echo "Invalid data found when processing input" >&2
exit 1
"#;

/// Create files (with parent directories) below `root`
pub fn create_tree(root: &Path, files: &[(&str, &[u8])]) {
    for (relative, contents) in files {
        let path = root.join(relative);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(&path, contents).unwrap();
    }
}

/// Create the standard input tree: two audio files, one nested, and a text file
///
/// Returns (temp dir, input root, output root). The output root does not exist yet.
pub fn create_sample_tree() -> (TempDir, PathBuf, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    let output = temp_dir.path().join("out");

    create_tree(
        &input,
        &[
            ("a.mp3", b"mp3 bytes"),
            ("sub/b.flac", b"flac bytes"),
            ("notes.txt", b"not audio"),
        ],
    );

    (temp_dir, input, output)
}

/// Write a script into `dir` and return its path
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, body).unwrap();
    path
}

/// Transcoder settings that run `script` through `sh`
pub fn settings_for(script: &Path) -> TranscodeSettings {
    TranscodeSettings {
        program: "sh".into(),
        extra_args: vec![script.as_os_str().to_owned()],
        ..Default::default()
    }
}

/// All run logs directly under `dir`
pub fn log_files(dir: &Path) -> Vec<PathBuf> {
    let mut logs: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with("log_"))
        })
        .collect();
    logs.sort();
    logs
}

/// Read the single run log under `dir`
pub fn read_single_log(dir: &Path) -> String {
    let logs = log_files(dir);
    assert_eq!(logs.len(), 1, "Expected exactly one run log, found {:?}", logs);
    std::fs::read_to_string(&logs[0]).unwrap()
}

/// Number of command blocks in a run log
pub fn command_blocks(log: &str) -> usize {
    log.matches("Running command: ").count()
}
