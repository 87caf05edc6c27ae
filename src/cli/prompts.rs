//! Interactive prompts using dialoguer

use std::io::{BufRead, Write};
use std::path::Path;

use console::Term;
use dialoguer::Confirm;

use crate::error::{ConvertError, Result};
use crate::pipeline::{Confirmer, OverwriteDecision};

/// Build the overwrite question for `path`.
pub fn overwrite_prompt(path: &Path) -> String {
    format!("Output file {} exists. Overwrite?", path.display())
}

/// Interpret a typed answer: empty or yes means overwrite, anything else skip.
pub fn parse_answer(answer: &str) -> OverwriteDecision {
    let answer = answer.trim();

    if answer.is_empty() || answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
    {
        OverwriteDecision::Overwrite
    } else {
        OverwriteDecision::Skip
    }
}

/// Where overwrite questions are asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChannel {
    /// Terminal prompt drawn on stderr.
    TerminalStderr,
    /// Terminal prompt drawn on stdout, used when only stderr is redirected.
    TerminalStdout,
    /// Answers read line by line from stdin, question written to stderr.
    Lines,
}

/// Pick the prompt channel from which standard streams are terminals.
///
/// A terminal prompt needs stdin plus a visible stream to draw on; anything
/// else falls back to reading lines.
pub fn choose_prompt_channel(stdin_tty: bool, stdout_tty: bool, stderr_tty: bool) -> PromptChannel {
    match (stdin_tty, stderr_tty, stdout_tty) {
        (true, true, _) => PromptChannel::TerminalStderr,
        (true, false, true) => PromptChannel::TerminalStdout,
        _ => PromptChannel::Lines,
    }
}

/// Confirms on the controlling terminal, defaulting to yes.
///
/// Only `y`, `n` and Enter are accepted as answers; any other key is ignored
/// until one of them is pressed, so a free-form answer never reaches the
/// "anything else skips" rule of [`LineConfirmer`]. Esc or `q` abandons the
/// whole run.
#[derive(Debug)]
pub struct TerminalConfirmer {
    term: Term,
}

impl TerminalConfirmer {
    pub fn new(term: Term) -> Self {
        Self { term }
    }
}

impl Default for TerminalConfirmer {
    fn default() -> Self {
        Self::new(Term::stderr())
    }
}

impl Confirmer for TerminalConfirmer {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<OverwriteDecision> {
        let answer = Confirm::new()
            .with_prompt(overwrite_prompt(path))
            .default(true)
            .interact_on_opt(&self.term)
            .map_err(|e| ConvertError::prompt(e.to_string()))?;

        Ok(match answer {
            Some(true) => OverwriteDecision::Overwrite,
            Some(false) => OverwriteDecision::Skip,
            None => OverwriteDecision::Abort,
        })
    }
}

/// Line-oriented confirmer for piped input, answer files and tests.
///
/// Writes the question to `output`, reads one line from `input`. End of input
/// aborts the run since nobody is left to answer the next question either.
pub struct LineConfirmer<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LineConfirmer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl<R: BufRead, W: Write> Confirmer for LineConfirmer<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> Result<OverwriteDecision> {
        write!(self.output, "{} (y/n) [y]: ", overwrite_prompt(path))
            .and_then(|_| self.output.flush())
            .map_err(|e| ConvertError::prompt(e.to_string()))?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .map_err(|e| ConvertError::prompt(e.to_string()))?;

        if read == 0 {
            return Ok(OverwriteDecision::Abort);
        }

        Ok(parse_answer(&line))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_parse_answer_defaults_to_yes() {
        assert_eq!(parse_answer(""), OverwriteDecision::Overwrite);
        assert_eq!(parse_answer("\n"), OverwriteDecision::Overwrite);
        assert_eq!(parse_answer("  \r\n"), OverwriteDecision::Overwrite);
    }

    #[test]
    fn test_parse_answer_affirmative() {
        assert_eq!(parse_answer("y"), OverwriteDecision::Overwrite);
        assert_eq!(parse_answer("Y\n"), OverwriteDecision::Overwrite);
        assert_eq!(parse_answer("yes"), OverwriteDecision::Overwrite);
    }

    #[test]
    fn test_parse_answer_anything_else_skips() {
        assert_eq!(parse_answer("n"), OverwriteDecision::Skip);
        assert_eq!(parse_answer("no"), OverwriteDecision::Skip);
        assert_eq!(parse_answer("sure"), OverwriteDecision::Skip);
    }

    #[test]
    fn test_prompt_channel_follows_terminals() {
        assert_eq!(
            choose_prompt_channel(true, true, true),
            PromptChannel::TerminalStderr
        );
        // stderr redirected to a file: the question must stay visible
        assert_eq!(
            choose_prompt_channel(true, true, false),
            PromptChannel::TerminalStdout
        );
        assert_eq!(choose_prompt_channel(true, false, false), PromptChannel::Lines);
        assert_eq!(choose_prompt_channel(false, true, true), PromptChannel::Lines);
    }

    #[test]
    fn test_line_confirmer_writes_prompt() {
        let mut shown = Vec::new();
        let mut confirmer = LineConfirmer::new(Cursor::new("n\n"), &mut shown);

        let decision = confirmer.confirm_overwrite(Path::new("out/a.mp3")).unwrap();

        assert_eq!(decision, OverwriteDecision::Skip);
        let shown = String::from_utf8(shown).unwrap();
        assert_eq!(shown, "Output file out/a.mp3 exists. Overwrite? (y/n) [y]: ");
    }

    #[test]
    fn test_line_confirmer_answers_in_order() {
        let mut confirmer = LineConfirmer::new(Cursor::new("\nn\ny\n"), std::io::sink());
        let path = Path::new("x.wav");

        assert_eq!(
            confirmer.confirm_overwrite(path).unwrap(),
            OverwriteDecision::Overwrite
        );
        assert_eq!(
            confirmer.confirm_overwrite(path).unwrap(),
            OverwriteDecision::Skip
        );
        assert_eq!(
            confirmer.confirm_overwrite(path).unwrap(),
            OverwriteDecision::Overwrite
        );
        assert_eq!(
            confirmer.confirm_overwrite(path).unwrap(),
            OverwriteDecision::Abort
        );
    }
}
