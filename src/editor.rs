//! Where input lines come from: an interactive rustyline editor, or any
//! buffered reader (pipes, script files, tests).

use anyhow::{Context, Result};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::BufRead;

/// Result of reading a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadResult {
    /// A line, without its line terminator.
    Line(String),
    /// User pressed Ctrl+C.
    Interrupted,
    /// End of input (Ctrl+D, closed pipe, end of file).
    Eof,
}

/// Abstraction over the line reading step of the REPL.
pub trait LineSource {
    /// Read one line. `prompt` is only used by sources that draw it themselves.
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult>;

    /// True when [`LineSource::read_line`] renders the prompt, so the REPL
    /// must not print it again.
    fn draws_prompt(&self) -> bool {
        false
    }
}

/// Interactive terminal input with history.
pub struct RustylineSource {
    editor: DefaultEditor,
}

impl RustylineSource {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().context("failed to initialise line editor")?;
        Ok(Self { editor })
    }
}

impl LineSource for RustylineSource {
    fn read_line(&mut self, prompt: &str) -> Result<ReadResult> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor.add_history_entry(line.as_str())?;
                }
                Ok(ReadResult::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadResult::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadResult::Eof),
            Err(err) => Err(err).context("failed to read line"),
        }
    }

    fn draws_prompt(&self) -> bool {
        true
    }
}

/// Line-by-line input from any [`BufRead`].
pub struct PlainSource<R> {
    reader: R,
}

impl<R: BufRead> PlainSource<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> LineSource for PlainSource<R> {
    fn read_line(&mut self, _prompt: &str) -> Result<ReadResult> {
        let mut line = String::new();
        let n = self
            .reader
            .read_line(&mut line)
            .context("failed to read input line")?;
        if n == 0 {
            return Ok(ReadResult::Eof);
        }
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(ReadResult::Line(line))
    }
}
