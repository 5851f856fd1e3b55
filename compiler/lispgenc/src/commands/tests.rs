#![allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]

use std::io::Cursor;

use pretty_assertions::assert_eq;

use super::*;

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn repl(input: &str) -> (String, String) {
    let mut session = Session::new();
    let mut out = Vec::new();
    let mut err = Vec::new();
    repl_loop(&mut session, Cursor::new(input), &mut out, &mut err, false).unwrap();
    (String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn test_options_max_depth() {
    let (options, rest) = EvalOptions::parse(&args(&["prog.lisp", "--max-depth=5"])).unwrap();
    assert_eq!(options.max_depth, Some(5));
    assert_eq!(rest, args(&["prog.lisp"]));
    assert_eq!(options.executor().max_depth(), 5);
}

#[test]
fn test_options_defaults() {
    let (options, rest) = EvalOptions::parse(&[]).unwrap();
    assert_eq!(options, EvalOptions::default());
    assert!(rest.is_empty());
    assert_eq!(
        options.executor().max_depth(),
        lispgen_eval::DEFAULT_MAX_DEPTH
    );
}

#[test]
fn test_options_rejects_bad_values() {
    assert!(EvalOptions::parse(&args(&["--max-depth=lots"])).is_err());
    assert!(EvalOptions::parse(&args(&["--verbose"])).is_err());
}

#[test]
fn test_repl_command_recognition() {
    assert_eq!(ReplCommand::parse("^exit"), Some(ReplCommand::Exit));
    assert_eq!(
        ReplCommand::parse("^help"),
        Some(ReplCommand::Unknown("help".to_string()))
    );
    assert_eq!(ReplCommand::parse("(+ 1 2)"), None);
}

#[test]
fn test_repl_threads_bindings_and_exits() {
    let (out, err) = repl("(let ((x 2)))\n\n(+ x 40)\n^nope\n^exit\n(+ 1 1)\n");
    assert_eq!(out, "> NIL\n> > 42\n> > ");
    assert_eq!(err, "unknown command: ^nope\n");
}

#[test]
fn test_repl_reports_errors_and_continues() {
    let (out, err) = repl("(+ \"a\" 1)\nT\n");
    assert_eq!(out, "> > T\n> \n");
    assert_eq!(err, "error: `+` expected number, got string\n");
}

#[test]
fn test_repl_renders_parse_errors() {
    let (_, err) = repl("(+ 1\n");
    assert!(err.contains("parse error: list is missing its closing `)`"));
}

#[test]
fn test_render_parse_error() {
    let source = "(foo \"bar\\n\")";
    let error = lispgen_parse::parse(source).unwrap_err();
    let mut out = Vec::new();
    render_parse_error(source, &error, false, &mut out).unwrap();
    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("parse error: unknown escape sequence `\\n` in string"));
    assert!(rendered.contains("(foo"));
}
