//! Core parser tests.

#![allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]

use crate::{parse, parse_program, ParseErrorKind, MAX_NESTING};
use lispgen_ir::{Expr, Span};
use pretty_assertions::assert_eq;

fn atom(name: &str) -> Expr {
    Expr::atom(name)
}

fn num(value: f32) -> Expr {
    Expr::num(value)
}

fn list(items: Vec<Expr>) -> Expr {
    Expr::list(items)
}

fn kind_of(source: &str) -> ParseErrorKind {
    parse(source).unwrap_err().kind
}

#[test]
fn test_nested_lists() {
    let parsed = parse("(foo (bar 1 (baz 2.3)))").unwrap();
    assert_eq!(
        parsed,
        list(vec![
            atom("foo"),
            list(vec![atom("bar"), num(1.0), list(vec![atom("baz"), num(2.3)])]),
        ])
    );
}

#[test]
fn test_operator_atoms() {
    let parsed = parse("(<= 1+ 1- -1 a.b)").unwrap();
    assert_eq!(
        parsed,
        list(vec![atom("<="), atom("1+"), atom("1-"), atom("-1"), atom("a.b")])
    );
}

#[test]
fn test_numbers() {
    assert_eq!(parse("42").unwrap(), num(42.0));
    assert_eq!(parse("0.5").unwrap(), num(0.5));
    assert_eq!(parse(".5").unwrap(), num(0.5));
    assert_eq!(parse("7.").unwrap(), num(7.0));
}

#[test]
fn test_invalid_numbers() {
    assert_eq!(
        kind_of("1.2.3"),
        ParseErrorKind::InvalidNumber("1.2.3".to_string())
    );
    assert_eq!(kind_of("."), ParseErrorKind::InvalidNumber(".".to_string()));
}

#[test]
fn test_strings() {
    assert_eq!(parse(r#""hello world""#).unwrap(), Expr::str("hello world"));
    assert_eq!(parse(r#""say \"hi\"""#).unwrap(), Expr::str("say \"hi\""));
    assert_eq!(parse(r#""""#).unwrap(), Expr::str(""));
}

#[test]
fn test_unterminated_string_keeps_accumulated_text() {
    assert_eq!(parse(r#""abc"#).unwrap(), Expr::str("abc"));
}

#[test]
fn test_unknown_escape() {
    let err = parse(r#""a\nb""#).unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnknownEscape('n'));
    assert_eq!(err.span, Span::new(2, 4));
}

#[test]
fn test_quote() {
    assert_eq!(parse("'x").unwrap(), Expr::quoted(atom("x")));
    assert_eq!(
        parse("'(1 2)").unwrap(),
        Expr::quoted(list(vec![num(1.0), num(2.0)]))
    );
    assert_eq!(parse("''x").unwrap(), Expr::quoted(Expr::quoted(atom("x"))));
}

#[test]
fn test_quote_terminates_atom() {
    assert_eq!(
        parse("(a'b)").unwrap(),
        list(vec![atom("a"), Expr::quoted(atom("b"))])
    );
}

#[test]
fn test_dangling_quote() {
    assert_eq!(kind_of("'"), ParseErrorKind::UnexpectedEof);
    assert_eq!(kind_of("(a ')"), ParseErrorKind::UnexpectedChar(')'));
}

#[test]
fn test_comments_and_whitespace() {
    let source = "; leading comment\n(+ 1 ; inline\n\t2)\n; trailing";
    assert_eq!(
        parse(source).unwrap(),
        list(vec![atom("+"), num(1.0), num(2.0)])
    );
}

#[test]
fn test_empty_list() {
    assert_eq!(parse("()").unwrap(), list(vec![]));
}

#[test]
fn test_unclosed_list() {
    let err = parse("(a (b c)").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::UnclosedList);
    assert_eq!(err.span, Span::new(0, 8));
}

#[test]
fn test_stray_close_paren() {
    assert_eq!(kind_of(")"), ParseErrorKind::UnexpectedChar(')'));
}

#[test]
fn test_hash_is_rejected() {
    assert_eq!(kind_of("#t"), ParseErrorKind::UnexpectedChar('#'));
}

#[test]
fn test_empty_input() {
    assert_eq!(kind_of(""), ParseErrorKind::UnexpectedEof);
    assert_eq!(kind_of("  ; only a comment"), ParseErrorKind::UnexpectedEof);
}

#[test]
fn test_trailing_content() {
    let err = parse("(a) b").unwrap_err();
    assert_eq!(err.kind, ParseErrorKind::TrailingContent);
    assert_eq!(err.span, Span::new(4, 5));
}

#[test]
fn test_program_keeps_order() {
    let exprs = parse_program("(let ((x 1)))\nx\n'y ; done").unwrap();
    assert_eq!(
        exprs,
        vec![
            list(vec![
                atom("let"),
                list(vec![list(vec![atom("x"), num(1.0)])]),
            ]),
            atom("x"),
            Expr::quoted(atom("y")),
        ]
    );
}

#[test]
fn test_program_of_only_trivia_is_empty() {
    assert_eq!(parse_program(" \n ; nothing\n").unwrap(), vec![]);
}

/// Run `f` on a thread with a small fixed stack, independent of the test
/// harness's thread size.
fn on_small_stack<T: Send + 'static>(f: impl FnOnce() -> T + Send + 'static) -> T {
    std::thread::Builder::new()
        .stack_size(1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap()
}

fn nested_lists(depth: usize) -> String {
    format!("{}{}", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn test_nesting_at_limit_is_accepted() {
    let printed = on_small_stack(|| {
        let expr = parse(&nested_lists(MAX_NESTING)).unwrap();
        expr.to_string()
    });
    assert_eq!(printed, nested_lists(MAX_NESTING));
}

#[test]
fn test_quotes_at_limit_are_accepted() {
    let source = format!("{}x", "'".repeat(MAX_NESTING));
    let printed = on_small_stack(move || parse(&source).unwrap().to_string());
    assert_eq!(printed, format!("{}x", "'".repeat(MAX_NESTING)));
}

#[test]
fn test_lists_past_limit_are_rejected() {
    let err = on_small_stack(|| parse(&nested_lists(MAX_NESTING + 1)).unwrap_err());
    assert_eq!(err.kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
    let offset = u32::try_from(MAX_NESTING).unwrap();
    assert_eq!(err.span, Span::new(offset, offset + 1));
}

#[test]
fn test_very_deep_lists_fail_without_overflow() {
    let kind = on_small_stack(|| parse(&nested_lists(300_000)).unwrap_err().kind);
    assert_eq!(kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
}

#[test]
fn test_very_long_quote_chain_fails_without_overflow() {
    let kind = on_small_stack(|| {
        let source = format!("{}x", "'".repeat(200_000));
        parse(&source).unwrap_err().kind
    });
    assert_eq!(kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
}

#[test]
fn test_quotes_and_lists_share_the_limit() {
    let half = MAX_NESTING / 2;
    let source = format!("{}{}x{}", "'(".repeat(half), "(", ")".repeat(half + 1));
    let kind = on_small_stack(move || parse(&source).unwrap_err().kind);
    assert_eq!(kind, ParseErrorKind::NestingTooDeep(MAX_NESTING));
}

#[test]
fn test_depth_is_per_expression() {
    // Siblings at the limit do not add up.
    let one = nested_lists(MAX_NESTING);
    let source = format!("{one} {one}");
    let count = on_small_stack(move || parse_program(&source).unwrap().len());
    assert_eq!(count, 2);
}
