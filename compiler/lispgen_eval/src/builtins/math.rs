//! Numeric primitives: arithmetic folds, comparison chains, `1+`/`1-`.

use lispgen_ir::{
    Context, EvalError, EvalResult, ExpandAtoms, Execute, Expr, InvokeResult, Name,
};

pub(super) fn add(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    fold(exec, ctx, args, "+", |acc, n| acc + n)
}

pub(super) fn sub(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    fold(exec, ctx, args, "-", |acc, n| acc - n)
}

pub(super) fn mul(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    fold(exec, ctx, args, "*", |acc, n| acc * n)
}

pub(super) fn div(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    fold(exec, ctx, args, "/", |acc, n| acc / n)
}

pub(super) fn eq(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    chain(exec, ctx, args, "=", |prev, next| prev == next)
}

pub(super) fn lt(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    chain(exec, ctx, args, "<", |prev, next| prev < next)
}

pub(super) fn le(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    chain(exec, ctx, args, "<=", |prev, next| prev <= next)
}

pub(super) fn gt(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    chain(exec, ctx, args, ">", |prev, next| prev > next)
}

pub(super) fn ge(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    chain(exec, ctx, args, ">=", |prev, next| prev >= next)
}

pub(super) fn inc(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    step(exec, ctx, args, "1+", 1.0)
}

pub(super) fn dec(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    step(exec, ctx, args, "1-", -1.0)
}

/// Left fold over the numeric arguments, seeded with the first number.
///
/// `Null` arguments are skipped; at least one number is required.
fn fold(
    exec: &dyn Execute,
    ctx: &Context,
    args: &[Expr],
    operator: &str,
    op: fn(f32, f32) -> f32,
) -> EvalResult {
    let mut acc: Option<f32> = None;
    for arg in args {
        let value = exec.value_of(ctx, arg, ExpandAtoms::Yes)?;
        let n = match value {
            Expr::Null => continue,
            Expr::Num(n) => n,
            other => return Err(EvalError::type_mismatch(&Name::new(operator), "number", &other)),
        };
        acc = Some(acc.map_or(n, |acc| op(acc, n)));
    }

    match acc {
        Some(total) => Ok(InvokeResult::unchanged(Expr::num(total), ctx)),
        None => Err(EvalError::TypeMismatch {
            operator: Name::new(operator),
            expected: "at least one number",
            got: "no numeric arguments",
        }),
    }
}

/// Pairwise comparison against the running previous value.
///
/// Stops at the first pair that fails `holds`; later arguments are never
/// evaluated.
fn chain(
    exec: &dyn Execute,
    ctx: &Context,
    args: &[Expr],
    operator: &str,
    holds: fn(f32, f32) -> bool,
) -> EvalResult {
    let mut prev: Option<f32> = None;
    for arg in args {
        let next = number(exec, ctx, arg, operator, ExpandAtoms::Yes)?;
        if let Some(prev) = prev {
            if !holds(prev, next) {
                return Ok(InvokeResult::unchanged(Expr::Null, ctx));
            }
        }
        prev = Some(next);
    }
    Ok(InvokeResult::unchanged(Expr::t(), ctx))
}

fn step(exec: &dyn Execute, ctx: &Context, args: &[Expr], operator: &str, delta: f32) -> EvalResult {
    let [arg] = args else {
        return Err(EvalError::ArityMismatch {
            name: Name::new(operator),
            expected: 1,
            got: args.len(),
        });
    };
    let n = number(exec, ctx, arg, operator, ExpandAtoms::No)?;
    Ok(InvokeResult::unchanged(Expr::num(n + delta), ctx))
}

fn number(
    exec: &dyn Execute,
    ctx: &Context,
    arg: &Expr,
    operator: &str,
    expand: ExpandAtoms,
) -> EvalResult<f32> {
    let value = exec.value_of(ctx, arg, expand)?;
    value
        .as_num()
        .ok_or_else(|| EvalError::type_mismatch(&Name::new(operator), "number", &value))
}
