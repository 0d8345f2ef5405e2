//! Collision resolution.
//!
//! Policy:
//! - AskEachTime: every collision goes through the prompt.
//! - OverwriteAll: collisions overwrite without asking. Reached by answering
//!   "all" once; there is no way back within a run.
//!
//! The prompt is a trait so the relocator can be driven without a terminal.

use anyhow::{Result, bail};
use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::path::Path;
use tracing::debug;

use crate::shutdown;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverwritePolicy {
    #[default]
    AskEachTime,
    OverwriteAll,
}

/// Operator decision for one collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    /// Overwrite this file only.
    Yes,
    /// Overwrite this file and every later collision.
    All,
    /// Leave both files where they are.
    No,
}

impl Answer {
    /// `y`/`ye`/`yes` and `a`/`al`/`all`, case-insensitive. Anything else is No.
    pub fn parse(response: &str) -> Self {
        match response.trim().to_ascii_lowercase().as_str() {
            "y" | "ye" | "yes" => Answer::Yes,
            "a" | "al" | "all" => Answer::All,
            _ => Answer::No,
        }
    }

    pub fn overwrites(self) -> bool {
        !matches!(self, Answer::No)
    }
}

impl OverwritePolicy {
    /// Apply an answer. The only transition is AskEachTime -> OverwriteAll.
    pub fn record(&mut self, answer: Answer) {
        if answer == Answer::All && *self == OverwritePolicy::AskEachTime {
            debug!("overwrite policy switched to OverwriteAll");
            *self = OverwritePolicy::OverwriteAll;
        }
    }
}

/// What the prompt gets to show the operator.
#[derive(Debug, Clone, Copy)]
pub struct Collision<'a> {
    pub source: &'a Path,
    pub destination: &'a Path,
    pub source_len: u64,
    pub existing_len: u64,
}

/// Capability that turns a collision into a raw operator response.
pub trait OverwritePrompt {
    fn ask(&mut self, collision: &Collision<'_>) -> Result<String>;
}

/// Asks on the terminal. Blocks until the operator answers.
#[derive(Debug, Default)]
pub struct ConsolePrompt;

impl OverwritePrompt for ConsolePrompt {
    fn ask(&mut self, collision: &Collision<'_>) -> Result<String> {
        let name = collision
            .destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| collision.destination.display().to_string());
        if !atty::is(atty::Stream::Stdin) {
            eprint!("Overwrite {name}? [y]es / [n]o / [a]ll: ");
            return read_answer(&mut io::stdin().lock());
        }
        let res = inquire::Text::new(&format!("Overwrite {name}?"))
            .with_help_message("[y]es / [n]o / [a]ll")
            .prompt();
        match res {
            Ok(text) => Ok(text),
            Err(inquire::InquireError::OperationInterrupted) => {
                shutdown::request();
                Err(anyhow::anyhow!("prompt interrupted"))
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// One answer line from a non-interactive stdin. EOF is an error, which the
/// relocator treats as a decline.
fn read_answer(input: &mut impl BufRead) -> Result<String> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        bail!("no answer on stdin");
    }
    Ok(line)
}

/// Answers from a fixed list, then declines once the list is exhausted.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: VecDeque<String>,
    asked: usize,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: 0,
        }
    }

    /// How many times the prompt was consulted.
    pub fn asked(&self) -> usize {
        self.asked
    }
}

impl OverwritePrompt for ScriptedPrompt {
    fn ask(&mut self, _collision: &Collision<'_>) -> Result<String> {
        self.asked += 1;
        Ok(self.answers.pop_front().unwrap_or_default())
    }
}
