//! Operator confirmation before a pending change is committed.

use std::io::{self, BufRead, Write};

/// Asks the operator a yes/no question. Blocks until answered.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<C: Confirm + ?Sized> Confirm for Box<C> {
    fn confirm(&mut self, prompt: &str) -> bool {
        (**self).confirm(prompt)
    }
}

/// Commit without asking (`--immediate`).
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Confirm for Immediate {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Prompt on a writer and read the answer from a line reader.
///
/// Only `y`/`yes` (any case) confirms; anything else, including end of
/// input, declines.
pub struct PromptConfirm<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptConfirm<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

/// Prompt on stderr and read the answer from stdin.
///
/// Stdin is locked only for the duration of one question so an interactive
/// session can keep reading commands from the same handle.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&mut self, prompt: &str) -> bool {
        PromptConfirm::new(io::stdin().lock(), io::stderr()).confirm(prompt)
    }
}

impl<R: BufRead, W: Write> Confirm for PromptConfirm<R, W> {
    fn confirm(&mut self, prompt: &str) -> bool {
        if write!(self.output, "{prompt} (N/y): ")
            .and_then(|()| self.output.flush())
            .is_err()
        {
            return false;
        }
        let mut answer = String::new();
        match self.input.read_line(&mut answer) {
            Ok(0) | Err(_) => false,
            Ok(_) => is_yes(&answer),
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
