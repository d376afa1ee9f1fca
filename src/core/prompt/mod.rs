mod types;

pub use types::*;

use std::io::{BufRead, Write};

use crate::error::{Error, Result};

/// Line-oriented question/answer channel used by the setup wizard.
pub trait Prompter {
    /// Ask a question; returns the trimmed answer or the prompt's default.
    fn ask(&mut self, prompt: &TextPrompt) -> Result<String>;
    /// Show a line of text.
    fn say(&mut self, message: &str) -> Result<()>;
}

/// Prompter over any reader/writer pair (stdin + stderr in the CLI).
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

fn write_error(e: std::io::Error) -> Error {
    Error::internal_io(e.to_string(), Some("write prompt".to_string()))
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &TextPrompt) -> Result<String> {
        let shown = match &prompt.default {
            Some(default) => write!(self.output, "{} [{}]: ", prompt.question, default),
            None => write!(self.output, "{}: ", prompt.question),
        };
        shown.map_err(write_error)?;
        self.output.flush().map_err(write_error)?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line).map_err(|e| {
            Error::internal_io(e.to_string(), Some("read answer".to_string()))
        })?;

        // End of input cannot be answered again; treat it as walking away.
        if read == 0 {
            return Err(Error::setup_cancelled().with_hint("Input ended before setup was confirmed"));
        }

        let answer = line.trim();
        if answer.is_empty() {
            Ok(prompt.default.clone().unwrap_or_default())
        } else {
            Ok(answer.to_string())
        }
    }

    fn say(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "{}", message).map_err(write_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompter(input: &str) -> LinePrompter<Cursor<Vec<u8>>, Vec<u8>> {
        LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn empty_answer_falls_back_to_default() {
        let mut p = prompter("\n");
        let answer = p
            .ask(&TextPrompt::new("Package suffix").with_default("core"))
            .unwrap();
        assert_eq!(answer, "core");

        let shown = String::from_utf8(p.into_output()).unwrap();
        assert_eq!(shown, "Package suffix [core]: ");
    }

    #[test]
    fn answer_is_trimmed() {
        let mut p = prompter("  editor.tools  \n");
        let answer = p.ask(&TextPrompt::new("Package suffix")).unwrap();
        assert_eq!(answer, "editor.tools");
    }

    #[test]
    fn empty_default_is_not_shown() {
        let mut p = prompter("3\n");
        p.ask(&TextPrompt::new("Select 1-9").with_default("")).unwrap();
        assert_eq!(String::from_utf8(p.into_output()).unwrap(), "Select 1-9: ");
    }

    #[test]
    fn end_of_input_cancels() {
        let mut p = prompter("");
        let err = p.ask(&TextPrompt::new("Proceed?")).unwrap_err();
        assert_eq!(err.code.as_str(), "setup.cancelled");
    }
}
