//! convert2wav: Batch Audio Normalisation Library
//!
//! Walks a directory tree, converts every recognised audio file into a
//! single-channel 16 kHz PCM WAV file with an external transcoder, and
//! mirrors the input layout under an output root. Each run keeps one plain
//! text log of the commands it ran and what they printed.
//!
//! The `table` module carries the small CSV tooling shipped alongside it:
//! delimited-text I/O and an allow-list column pruner.

pub mod cli;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod table;
pub mod utils;

pub use error::{ConvertError, Result};
