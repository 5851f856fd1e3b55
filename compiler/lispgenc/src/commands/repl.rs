//! The `repl` command: a line-oriented read-eval-print loop.
//!
//! Each non-empty line is parsed as a program and evaluated in one session,
//! so bindings carry over between lines. Lines starting with `^` are
//! commands to the REPL itself.

use std::io::{self, BufRead, Write};

use crate::Session;

use super::{report_error, stderr_is_terminal, EvalOptions};

const PROMPT: &str = "> ";

/// A `^`-prefixed REPL command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReplCommand {
    Exit,
    Unknown(String),
}

impl ReplCommand {
    /// Recognize a command line. `None` means the line is source code.
    pub fn parse(line: &str) -> Option<Self> {
        let name = line.strip_prefix('^')?;
        Some(match name.trim() {
            "exit" => ReplCommand::Exit,
            other => ReplCommand::Unknown(other.to_string()),
        })
    }
}

/// Run the REPL on the process's standard streams.
pub fn run_repl(options: &EvalOptions) {
    let mut session = options.session();
    let stdin = io::stdin().lock();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let color = stderr_is_terminal();

    if let Err(e) = repl_loop(&mut session, stdin, &mut stdout, &mut stderr, color) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

/// Drive `session` from `input` until end of input or `^exit`.
///
/// Values go to `out`; errors and unknown commands go to `err`.
pub fn repl_loop(
    session: &mut Session,
    input: impl BufRead,
    out: &mut impl Write,
    err: &mut impl Write,
    color: bool,
) -> io::Result<()> {
    let mut lines = input.lines();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next().transpose()? else {
            writeln!(out)?;
            return Ok(());
        };
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match ReplCommand::parse(line) {
            Some(ReplCommand::Exit) => return Ok(()),
            Some(ReplCommand::Unknown(name)) => {
                writeln!(err, "unknown command: ^{name}")?;
                continue;
            }
            None => {}
        }

        match session.eval_source(line) {
            Ok(value) => writeln!(out, "{value}")?,
            Err(e) => report_error(line, &e, color, err)?,
        }
    }
}
