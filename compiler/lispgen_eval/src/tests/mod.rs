//! Evaluation tests driven by parsed source.


use lispgen_ir::{Context, EvalResult, ExpandAtoms, Expr};

use crate::{root_environment, Executor};

/// Parse `source` as one expression and evaluate it against a fresh root.
pub(crate) fn run(source: &str) -> EvalResult<Expr> {
    run_with(&Executor::new(), source)
}

#[expect(clippy::expect_used, reason = "test sources are well-formed")]
pub(crate) fn run_with(executor: &Executor, source: &str) -> EvalResult<Expr> {
    let expr = lispgen_parse::parse(source).expect("test source parses");
    let ctx = Context::new(root_environment());
    executor
        .execute(&ctx, &expr, ExpandAtoms::No)
        .map(|invoked| invoked.result)
}

pub(crate) fn num(value: f32) -> Expr {
    Expr::num(value)
}
