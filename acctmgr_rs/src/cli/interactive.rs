//! Interactive mode: one session, many command lines.
//!
//! The mirror lives as long as the session, so clusters added on one line
//! are visible to the next.

use std::io::{self, Write};

use tracing::debug;

use super::dispatch::{DispatchResult, dispatch_command};
use super::parser::{parse_command, split_line};
use crate::colors::Painter;
use crate::confirm::Confirm;
use crate::session::Session;
use crate::store::ClusterStore;

/// Prompt shown before each line when input is a terminal.
pub const PROMPT: &str = "acctmgr: ";

/// Read and run command lines until end of input or `quit`.
///
/// `read_line` follows [`io::BufRead::read_line`]: it appends one line to
/// the buffer and returns 0 at end of input. `errors` receives error lines
/// and the prompt. Returns true if every command succeeded.
pub fn run_interactive<S, C, W, E>(
    session: &mut Session<S, C, W>,
    mut read_line: impl FnMut(&mut String) -> io::Result<usize>,
    errors: &mut E,
    painter: Painter,
    show_prompt: bool,
) -> bool
where
    S: ClusterStore,
    C: Confirm,
    W: Write,
    E: Write + ?Sized,
{
    let mut all_ok = true;
    let mut line = String::new();
    loop {
        if show_prompt {
            let _ = write!(errors, "{PROMPT}");
            let _ = errors.flush();
        }
        line.clear();
        match read_line(&mut line) {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                let _ = writeln!(errors, "{}", painter.status_error(&e.to_string()));
                all_ok = false;
                break;
            }
        }

        let tokens = split_line(&line);
        if tokens.is_empty() {
            continue;
        }
        debug!(?tokens, "interactive line");

        let cmd = match parse_command(&tokens) {
            Ok(cmd) => cmd,
            Err(msg) => {
                let _ = writeln!(errors, "{}", painter.status_error(&msg));
                all_ok = false;
                continue;
            }
        };
        match dispatch_command(session, &cmd) {
            Ok(DispatchResult::Quit) => break,
            Ok(_) => {}
            Err(e) => {
                let _ = writeln!(errors, "{}", painter.status_error(&e.to_string()));
                all_ok = false;
            }
        }
    }
    all_ok
}
