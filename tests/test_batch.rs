//! End-to-end tests for the batch driver using a shell stand-in transcoder

#![cfg(unix)]

use std::io::Cursor;
use std::path::Path;

use convert2wav::cli::LineConfirmer;
use convert2wav::pipeline::{run_batch, BatchOptions, Confirmer, OverwriteDecision};
use convert2wav::ConvertError;

mod common;

use common::*;

/// Fails the test if anybody is asked anything
struct NeverAsk;

impl Confirmer for NeverAsk {
    fn confirm_overwrite(&mut self, path: &Path) -> convert2wav::Result<OverwriteDecision> {
        panic!("unexpected overwrite prompt for {}", path.display());
    }
}

#[test]
fn test_forced_run_converts_audio_and_mirrors_tree() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);
    let options = BatchOptions::new(&input, &output)
        .force(true)
        .settings(settings_for(&script));

    let summary = run_batch(&options, &mut NeverAsk).unwrap();

    assert_eq!(summary.seen, 3);
    assert_eq!(summary.converted, 2);
    assert_eq!(summary.ignored, 1);
    assert_eq!(summary.transcode_failures, 0);
    assert_eq!(summary.errors, 0);

    // Same base name and extension, mirrored below the output root
    assert_eq!(std::fs::read(output.join("a.mp3")).unwrap(), b"mp3 bytes");
    assert_eq!(std::fs::read(output.join("sub/b.flac")).unwrap(), b"flac bytes");
    assert!(!output.join("notes.txt").exists());

    let log = read_single_log(&output);
    assert_eq!(command_blocks(&log), 2);
    assert!(log.contains(&format!("-i {}", input.join("a.mp3").display())));
    assert!(log.contains("-acodec pcm_s16le -ac 1 -ar 16000"));
    assert!(log.contains("fake transcoder: "));
    assert!(log.contains("fake transcoder stderr"));
    assert!(!log.contains("notes.txt"));
    assert_eq!(summary.log_path(), log_files(&output)[0]);
}

#[test]
fn test_declined_overwrite_leaves_file_untouched() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);
    create_tree(&output, &[("a.mp3", b"previous result")]);

    let options = BatchOptions::new(&input, &output).settings(settings_for(&script));
    let mut prompts = Vec::new();
    let mut confirmer = LineConfirmer::new(Cursor::new("n\n"), &mut prompts);

    let summary = run_batch(&options, &mut confirmer).unwrap();

    assert_eq!(summary.skipped, 1);
    assert_eq!(summary.converted, 1);
    assert_eq!(
        std::fs::read(output.join("a.mp3")).unwrap(),
        b"previous result"
    );

    // Skipped jobs leave no trace in the run log
    let log = read_single_log(&output);
    assert_eq!(command_blocks(&log), 1);
    assert!(!log.contains("a.mp3"));

    let prompts = String::from_utf8(prompts).unwrap();
    assert!(prompts.contains("a.mp3 exists. Overwrite? (y/n) [y]: "));
}

#[test]
fn test_empty_answer_overwrites() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);
    create_tree(&output, &[("a.mp3", b"stale"), ("sub/b.flac", b"stale")]);

    let options = BatchOptions::new(&input, &output).settings(settings_for(&script));
    let mut confirmer = LineConfirmer::new(Cursor::new("\ny\n"), std::io::sink());

    let summary = run_batch(&options, &mut confirmer).unwrap();

    assert_eq!(summary.converted, 2);
    assert_eq!(summary.skipped, 0);
    assert_eq!(std::fs::read(output.join("a.mp3")).unwrap(), b"mp3 bytes");
    assert_eq!(std::fs::read(output.join("sub/b.flac")).unwrap(), b"flac bytes");
}

#[test]
fn test_force_never_prompts_for_existing_files() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);
    create_tree(&output, &[("a.mp3", b"stale"), ("sub/b.flac", b"stale")]);

    let options = BatchOptions::new(&input, &output)
        .force(true)
        .settings(settings_for(&script));

    let summary = run_batch(&options, &mut NeverAsk).unwrap();

    assert_eq!(summary.converted, 2);
    assert_eq!(std::fs::read(output.join("a.mp3")).unwrap(), b"mp3 bytes");
}

#[test]
fn test_closed_answer_channel_aborts_run() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);
    create_tree(&output, &[("a.mp3", b"keep me")]);

    let options = BatchOptions::new(&input, &output).settings(settings_for(&script));
    let mut confirmer = LineConfirmer::new(Cursor::new(""), std::io::sink());

    let summary = run_batch(&options, &mut confirmer).unwrap();

    assert!(summary.aborted);
    assert_eq!(summary.converted, 0);
    assert_eq!(std::fs::read(output.join("a.mp3")).unwrap(), b"keep me");
    assert!(!output.join("sub").exists());
}

#[test]
fn test_transcoder_failures_are_not_fatal() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fail.sh", FAILING_TRANSCODER);
    let options = BatchOptions::new(&input, &output)
        .force(true)
        .settings(settings_for(&script));

    let summary = run_batch(&options, &mut NeverAsk).unwrap();

    assert_eq!(summary.transcode_failures, 2);
    assert_eq!(summary.converted, 0);

    let log = read_single_log(&output);
    assert_eq!(command_blocks(&log), 2);
    assert_eq!(
        log.matches("Invalid data found when processing input").count(),
        2
    );
}

#[test]
fn test_missing_transcoder_is_a_job_error() {
    let (_temp_dir, input, output) = create_sample_tree();
    let settings = convert2wav::pipeline::TranscodeSettings {
        program: "convert2wav-test-no-such-transcoder".into(),
        ..Default::default()
    };
    let options = BatchOptions::new(&input, &output)
        .force(true)
        .settings(settings);

    let summary = run_batch(&options, &mut NeverAsk).unwrap();

    assert_eq!(summary.errors, 2);
    assert_eq!(summary.converted, 0);

    let log = read_single_log(&output);
    assert_eq!(log.matches("Error: ").count(), 2);
}

#[test]
fn test_output_inside_input_is_not_walked() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let input = temp_dir.path().join("in");
    let output = input.join("converted");
    create_tree(&input, &[("a.wav", b"wav bytes")]);
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);

    let options = BatchOptions::new(&input, &output)
        .force(true)
        .settings(settings_for(&script));

    let summary = run_batch(&options, &mut NeverAsk).unwrap();

    assert_eq!(summary.seen, 1);
    assert_eq!(summary.converted, 1);
    assert!(output.join("a.wav").exists());
    assert!(!output.join("converted").exists());
}

#[test]
fn test_identical_roots_rejected_before_touching_disk() {
    let temp_dir = tempfile::TempDir::new().unwrap();
    let root = temp_dir.path().join("same");

    let err = run_batch(&BatchOptions::new(&root, &root), &mut NeverAsk).unwrap_err();

    assert!(matches!(err, ConvertError::Config { .. }));
    assert!(!root.exists());
}

#[test]
fn test_two_runs_keep_separate_logs() {
    let (temp_dir, input, output) = create_sample_tree();
    let script = write_script(temp_dir.path(), "fake.sh", FAKE_TRANSCODER);
    let options = BatchOptions::new(&input, &output)
        .force(true)
        .settings(settings_for(&script));

    let first = run_batch(&options, &mut NeverAsk).unwrap();
    let second = run_batch(&options, &mut NeverAsk).unwrap();

    assert_ne!(first.log_path(), second.log_path());
    for log in log_files(&output) {
        let text = std::fs::read_to_string(log).unwrap();
        assert_eq!(command_blocks(&text), 2);
    }
}
