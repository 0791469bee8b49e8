//! Interactive text interface
//!
//! The engine talks to the user only through [`Console`]. The binary plugs
//! in a terminal implementation. With the `testing` feature,
//! `ScriptedConsole` replays a fixed list of answers and records
//! everything shown.

#[cfg(any(test, feature = "testing"))]
use std::collections::VecDeque;

use crate::error::{AnimeDlError, Result};

pub trait Console {
    /// Show `prompt` and read one line of input.
    ///
    /// Returns `AnimeDlError::Interrupted` when the user interrupts or input ends.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Show a message.
    fn say(&mut self, message: &str);

    /// Numbered menu; returns the zero-based index of the chosen option.
    fn choose(&mut self, prompt: &str, options: &[String]) -> Result<usize> {
        if options.is_empty() {
            return Err(AnimeDlError::InvalidSelection("nessuna opzione".to_string()));
        }

        loop {
            self.say(&format!("{}:", prompt));
            for (idx, option) in options.iter().enumerate() {
                self.say(&format!("  {}. {}", idx + 1, option));
            }

            let answer = self.read_line("Numero: ")?;
            match answer.trim().parse::<usize>() {
                Ok(n) if (1..=options.len()).contains(&n) => return Ok(n - 1),
                _ => self.say(&format!(
                    "Inserisci un numero tra 1 e {}.",
                    options.len()
                )),
            }
        }
    }
}

/// Console fed from a fixed list of answers
///
/// Running out of answers behaves like the user closing the input.
#[cfg(any(test, feature = "testing"))]
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    answers: VecDeque<String>,
    transcript: Vec<String>,
}

#[cfg(any(test, feature = "testing"))]
impl ScriptedConsole {
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

    /// Prompts and messages in the order they were shown.
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Whether any shown line contains `needle`.
    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }

    pub fn remaining_answers(&self) -> usize {
        self.answers.len()
    }
}

#[cfg(any(test, feature = "testing"))]
impl Console for ScriptedConsole {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.transcript.push(prompt.to_string());
        self.answers.pop_front().ok_or(AnimeDlError::Interrupted)
    }

    fn say(&mut self, message: &str) {
        self.transcript.push(message.to_string());
    }
}
