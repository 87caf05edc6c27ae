//! End-of-run summary

use std::path::{Path, PathBuf};

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;

/// Counters collected while a batch runs. Informational only: none of them
/// affects the exit status.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BatchSummary {
    pub log_path: PathBuf,
    /// Files found under the input root, eligible or not.
    pub seen: usize,
    pub converted: usize,
    /// Transcoder ran and exited unsuccessfully.
    pub transcode_failures: usize,
    /// Existing outputs the operator chose to keep.
    pub skipped: usize,
    /// Jobs that failed on I/O before or while starting the transcoder.
    pub errors: usize,
    /// Files without a recognised audio extension.
    pub ignored: usize,
    pub aborted: bool,
}

impl BatchSummary {
    pub fn new(log_path: PathBuf) -> Self {
        Self {
            log_path,
            ..Default::default()
        }
    }

    pub fn add_seen(&mut self) {
        self.seen += 1;
    }

    pub fn add_converted(&mut self) {
        self.converted += 1;
    }

    pub fn add_transcode_failure(&mut self) {
        self.transcode_failures += 1;
    }

    pub fn add_skipped(&mut self) {
        self.skipped += 1;
    }

    pub fn add_error(&mut self) {
        self.errors += 1;
    }

    pub fn add_ignored(&mut self) {
        self.ignored += 1;
    }

    pub fn set_aborted(&mut self) {
        self.aborted = true;
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    /// Number of transcoder invocations recorded in the run log.
    pub fn attempted(&self) -> usize {
        self.converted + self.transcode_failures
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("CONVERSION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Files Found"), Cell::new(self.seen)]);

        table.add_row(vec![
            Cell::new("✅ Converted"),
            Cell::new(self.converted)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("❌ Transcoder Failures"),
            Cell::new(self.transcode_failures).fg(highlight(self.transcode_failures)),
        ]);

        table.add_row(vec![
            Cell::new("⚠️  Job Errors"),
            Cell::new(self.errors).fg(highlight(self.errors)),
        ]);

        table.add_row(vec![
            Cell::new("↷ Kept Existing"),
            Cell::new(self.skipped),
        ]);

        table.add_row(vec![
            Cell::new("🙈 Ignored (not audio)"),
            Cell::new(self.ignored).fg(Color::DarkGrey),
        ]);

        table.add_row(vec![
            Cell::new("📝 Log"),
            Cell::new(self.log_path.display()),
        ]);

        // Indent the table
        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if self.aborted {
            println!();
            println!(
                "    {}",
                style("Run aborted before all files were visited").yellow()
            );
        }
    }
}

fn highlight(count: usize) -> Color {
    if count == 0 {
        Color::White
    } else {
        Color::Red
    }
}
