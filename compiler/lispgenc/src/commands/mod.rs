//! Command handlers for the `lispgen` CLI.
//!
//! Each submodule implements one command. Shared pieces (option parsing,
//! file reading, error reporting) live here in the module root.

mod debug;
mod repl;
mod run;

use std::io::{self, Write};

use ariadne::{Config, Label, Report, ReportKind, Source};
use lispgen_eval::{Executor, ExecutorBuilder};
use lispgen_parse::ParseError;

use crate::{RunError, Session};

pub use debug::parse_file;
pub use repl::{repl_loop, run_repl, ReplCommand};
pub use run::run_file;

/// Options shared by the commands that evaluate code.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EvalOptions {
    /// Overrides the executor's nesting limit.
    pub max_depth: Option<usize>,
}

impl EvalOptions {
    /// Parse `--max-depth=N` out of `args`.
    ///
    /// Returns the options and the arguments that were not options.
    pub fn parse(args: &[String]) -> Result<(Self, Vec<String>), String> {
        let mut options = EvalOptions::default();
        let mut rest = Vec::new();
        for arg in args {
            if let Some(value) = arg.strip_prefix("--max-depth=") {
                let depth = value
                    .parse::<usize>()
                    .map_err(|_| format!("invalid value for --max-depth: '{value}'"))?;
                options.max_depth = Some(depth);
            } else if arg.starts_with("--") {
                return Err(format!("unknown option '{arg}'"));
            } else {
                rest.push(arg.clone());
            }
        }
        Ok((options, rest))
    }

    pub fn executor(&self) -> Executor {
        let builder = ExecutorBuilder::new();
        match self.max_depth {
            Some(depth) => builder.max_depth(depth).build(),
            None => builder.build(),
        }
    }

    pub fn session(&self) -> Session {
        Session::with_executor(self.executor())
    }
}

/// Read a source file, exiting with a readable message if that fails.
pub(crate) fn read_file(path: &str) -> String {
    match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            let msg = match e.kind() {
                io::ErrorKind::NotFound => format!("cannot find file '{path}'"),
                io::ErrorKind::PermissionDenied => format!("permission denied reading '{path}'"),
                io::ErrorKind::InvalidData => format!("'{path}' contains invalid UTF-8 data"),
                _ => format!("error reading '{path}': {e}"),
            };
            eprintln!("{msg}");
            std::process::exit(1);
        }
    }
}

/// Render a parse error as a labelled source snippet.
pub fn render_parse_error(
    source: &str,
    error: &ParseError,
    color: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    let range = error.span.to_range();
    Report::build(ReportKind::Error, (), range.start)
        .with_config(Config::default().with_color(color))
        .with_message(format!("parse error: {}", error.kind))
        .with_label(Label::new(range).with_message(error.kind.to_string()))
        .finish()
        .write(Source::from(source), out)
}

/// Report a failed evaluation of `source` to `out`.
pub fn report_error(
    source: &str,
    error: &RunError,
    color: bool,
    out: &mut impl Write,
) -> io::Result<()> {
    match error {
        RunError::Parse(parse) => render_parse_error(source, parse, color, out),
        RunError::Eval(eval) => writeln!(out, "error: {eval}"),
    }
}

fn stderr_is_terminal() -> bool {
    io::IsTerminal::is_terminal(&io::stderr())
}

#[cfg(test)]
mod tests;
