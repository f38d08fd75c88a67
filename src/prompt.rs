//! Line-oriented prompting
//!
//! The interactive flows ask for one line at a time through a [`Prompter`].
//! [`TerminalPrompter`] talks to the real terminal; [`ScriptedPrompter`]
//! replays canned answers and records what was shown, for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

use crossterm::{
    cursor::MoveTo,
    execute,
    style::Stylize,
    terminal::{Clear, ClearType},
};

use crate::error::{ErpError, ErpResult};

/// Source of user answers and sink for messages
pub trait Prompter {
    /// Show `prompt` and read one line without its line terminator
    ///
    /// Returns `Ok(None)` when the input is exhausted.
    fn read_line(&mut self, prompt: &str) -> ErpResult<Option<String>>;

    /// Show an informational message
    fn message(&mut self, text: &str) -> ErpResult<()>;

    /// Show an error message
    fn error(&mut self, text: &str) -> ErpResult<()>;

    /// Clear the screen
    fn clear(&mut self) -> ErpResult<()> {
        Ok(())
    }
}

/// Read a line, treating exhausted input as [`ErpError::Interrupted`]
pub fn ask<P: Prompter + ?Sized>(prompter: &mut P, prompt: &str) -> ErpResult<String> {
    prompter.read_line(prompt)?.ok_or(ErpError::Interrupted)
}

/// Prompter backed by stdin/stdout
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl TerminalPrompter {
    pub fn new() -> Self {
        Self
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> ErpResult<Option<String>> {
        let mut stdout = io::stdout();
        write!(stdout, "{}", prompt)?;
        stdout.flush()?;

        let mut input = String::new();
        let read = io::stdin().lock().read_line(&mut input)?;
        if read == 0 {
            return Ok(None);
        }

        Ok(Some(input.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn message(&mut self, text: &str) -> ErpResult<()> {
        println!("{}", text);
        Ok(())
    }

    fn error(&mut self, text: &str) -> ErpResult<()> {
        eprintln!("{}", text.red());
        Ok(())
    }

    fn clear(&mut self) -> ErpResult<()> {
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;
        Ok(())
    }
}

/// Prompter that replays a fixed list of answers
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

impl ScriptedPrompter {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            transcript: Vec::new(),
        }
    }

    /// Everything shown so far: prompts, messages and errors, in order
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Number of answers not yet consumed
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }
}

impl Prompter for ScriptedPrompter {
    fn read_line(&mut self, prompt: &str) -> ErpResult<Option<String>> {
        self.transcript.push(prompt.to_string());
        Ok(self.answers.pop_front())
    }

    fn message(&mut self, text: &str) -> ErpResult<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }

    fn error(&mut self, text: &str) -> ErpResult<()> {
        self.transcript.push(text.to_string());
        Ok(())
    }
}
