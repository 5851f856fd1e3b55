#![allow(
    clippy::unwrap_used,
    reason = "test assertions use unwrap for clarity"
)]

use pretty_assertions::assert_eq;

use super::*;
use crate::{root_environment, Executor};

fn render(template: &str, args: &[Expr]) -> EvalResult<String> {
    let ctx = Context::new(root_environment());
    interpolate(&Executor::new(), &ctx, template, args)
}

#[test]
fn test_plain_text() {
    assert_eq!(render("no directives", &[]).unwrap(), "no directives");
}

#[test]
fn test_number_directive() {
    assert_eq!(render("got %d", &[Expr::num(42.0)]).unwrap(), "got 42");
    assert_eq!(
        render("%d and %d", &[Expr::num(1.0), Expr::num(2.5)]).unwrap(),
        "1 and 2.5"
    );
}

#[test]
fn test_arguments_are_evaluated() {
    let sum = lispgen_parse::parse("(+ 1 2)").unwrap();
    assert_eq!(render("sum=%d", &[sum]).unwrap(), "sum=3");
}

#[test]
fn test_trailing_percent_is_literal() {
    assert_eq!(render("100%", &[Expr::num(1.0)]).unwrap(), "100%");
}

#[test]
fn test_exhausted_arguments_copy_directives() {
    assert_eq!(render("%d %d", &[Expr::num(1.0)]).unwrap(), "1 %d");
    assert_eq!(render("%s", &[]).unwrap(), "%s");
}

#[test]
fn test_unknown_directive() {
    assert_eq!(
        render("%s", &[Expr::num(1.0)]).unwrap_err(),
        EvalError::UnknownDirective { directive: 's' }
    );
}

#[test]
fn test_directive_requires_number() {
    assert_eq!(
        render("%d", &[Expr::str("x")]).unwrap_err(),
        EvalError::FormatTypeMismatch {
            directive: 'd',
            got: "string"
        }
    );
}
