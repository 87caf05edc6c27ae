//! Command-line argument definitions using clap

use std::ffi::OsString;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::pipeline::{BatchOptions, TranscodeSettings};
use crate::table::{QuotePolicy, UnknownColumns};

/// Usage line printed when the positional arguments are wrong.
pub const USAGE: &str = "Usage: convert2wav <input_path> <output_path>";

/// Usage line of the column pruner.
pub const PRUNE_USAGE: &str = "Usage: prune-csv <in_path> <keep_path> <out_path>";

/// convert2wav - Batch convert a folder of audio files into mono 16 kHz WAV files
#[derive(Parser, Debug)]
#[command(name = "convert2wav")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Directory tree to convert. Only wav, mp3, ogg, flac, m4a, wma and aiff
    /// files are picked up.
    pub input: PathBuf,

    /// Directory receiving the mirrored tree and the run log.
    /// Created if missing (parent must exist). Must differ from the input.
    pub output: PathBuf,

    /// Overwrite existing output files without asking
    #[arg(short, long, default_value = "false")]
    pub force: bool,

    /// Transcoder program to run
    #[arg(long, default_value = "ffmpeg")]
    pub transcoder: OsString,

    /// Extra argument passed to the transcoder before `-i` (repeatable)
    #[arg(long = "transcoder-arg", allow_hyphen_values = true)]
    pub transcoder_args: Vec<OsString>,

    /// Output sample rate in Hz
    #[arg(long, default_value = "16000", value_parser = validate_sample_rate)]
    pub sample_rate: u32,

    /// Number of output channels
    #[arg(long, default_value = "1", value_parser = validate_channels)]
    pub channels: u16,

    /// Show debug diagnostics on stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Transcoder settings derived from the flags; everything else keeps its default.
    pub fn transcode_settings(&self) -> TranscodeSettings {
        TranscodeSettings {
            program: self.transcoder.clone(),
            extra_args: self.transcoder_args.clone(),
            channels: self.channels,
            sample_rate: self.sample_rate,
            ..Default::default()
        }
    }

    pub fn batch_options(&self) -> BatchOptions {
        BatchOptions::new(&self.input, &self.output)
            .force(self.force)
            .settings(self.transcode_settings())
    }
}

/// How to quote fields in the pruned output.
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuoteArg {
    #[default]
    Minimal,
    All,
    NonNumeric,
    Never,
}

impl From<QuoteArg> for QuotePolicy {
    fn from(arg: QuoteArg) -> Self {
        match arg {
            QuoteArg::Minimal => QuotePolicy::Minimal,
            QuoteArg::All => QuotePolicy::All,
            QuoteArg::NonNumeric => QuotePolicy::NonNumeric,
            QuoteArg::Never => QuotePolicy::Never,
        }
    }
}

/// prune-csv - Keep only the allow-listed columns of a CSV file
#[derive(Parser, Debug)]
#[command(name = "prune-csv")]
#[command(author, version, about, long_about = None)]
pub struct PruneCli {
    /// Input CSV file with a header row
    pub input: PathBuf,

    /// Allow-list: one column name per line, `#` starts a comment line
    pub keep: PathBuf,

    /// Output CSV file (overwritten)
    pub output: PathBuf,

    /// Field delimiter for both input and output
    #[arg(long, default_value = ",", value_parser = validate_delimiter)]
    pub delimiter: u8,

    /// Quoting of output fields
    #[arg(long, value_enum, default_value_t = QuoteArg::Minimal)]
    pub quote_style: QuoteArg,

    /// Warn about allow-listed columns missing from the input instead of failing
    #[arg(long, default_value = "false")]
    pub ignore_unknown: bool,
}

impl PruneCli {
    pub fn unknown_columns(&self) -> UnknownColumns {
        if self.ignore_unknown {
            UnknownColumns::Ignore
        } else {
            UnknownColumns::Fail
        }
    }
}

/// Validator for sample_rate parameter
fn validate_sample_rate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid sample rate", s))?;

    if !(1..=384_000).contains(&value) {
        Err(format!(
            "sample_rate must be between 1 and 384000, got {}",
            value
        ))
    } else {
        Ok(value)
    }
}

/// Validator for channels parameter
fn validate_channels(s: &str) -> Result<u16, String> {
    let value: u16 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid channel count", s))?;

    if !(1..=8).contains(&value) {
        Err(format!("channels must be between 1 and 8, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for delimiter parameter: a single ASCII character, `\t` allowed
fn validate_delimiter(s: &str) -> Result<u8, String> {
    if s == "\\t" {
        return Ok(b'\t');
    }

    match s.as_bytes() {
        [b] if b.is_ascii() => Ok(*b),
        _ => Err(format!(
            "delimiter must be a single ASCII character, got '{}'",
            s
        )),
    }
}
