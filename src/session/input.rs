//! Line sources for the questionnaire
//!
//! `ReadlineInput` drives an interactive terminal with line editing;
//! `ReaderInput` reads from any buffered reader (piped stdin, answer files,
//! tests) and echoes prompts to a writer.

use crate::errors::Result;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::io::{BufRead, Write};

/// Something that can show a prompt and return the next line
pub trait AnswerSource {
    /// `Ok(None)` when the input has ended
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show a message that is not a prompt (e.g. a retry hint)
    fn notify(&mut self, message: &str);
}

/// Interactive terminal input
pub struct ReadlineInput {
    editor: DefaultEditor,
}

impl ReadlineInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))?;
        Ok(Self { editor })
    }
}

impl AnswerSource for ReadlineInput {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line.trim().to_string())),
            // Ctrl-C and Ctrl-D both end the session
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e.into()),
            Err(err) => Err(std::io::Error::new(std::io::ErrorKind::Other, err.to_string()).into()),
        }
    }

    fn notify(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Line-oriented input from any reader
pub struct ReaderInput<R, W> {
    reader: R,
    writer: W,
}

impl<R: BufRead, W: Write> ReaderInput<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }

    pub fn into_writer(self) -> W {
        self.writer
    }
}

impl<R: BufRead, W: Write> AnswerSource for ReaderInput<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.writer, "{}", prompt)?;
        self.writer.flush()?;

        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn notify(&mut self, message: &str) {
        let _ = writeln!(self.writer, "{}", message);
    }
}
