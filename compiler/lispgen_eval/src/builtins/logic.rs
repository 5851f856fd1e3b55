//! Boolean primitives over `T`-like atoms and `NIL`.

use lispgen_ir::{
    Context, EvalError, EvalResult, ExpandAtoms, Execute, Expr, InvokeResult, Name,
};

/// `(and x...)`: `NIL` with no arguments, `NIL` at the first falsy value,
/// `T` otherwise.
pub(super) fn and(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    if args.is_empty() {
        return Ok(InvokeResult::unchanged(Expr::Null, ctx));
    }
    for arg in args {
        if !truth(exec, ctx, arg, "and")? {
            return Ok(InvokeResult::unchanged(Expr::Null, ctx));
        }
    }
    Ok(InvokeResult::unchanged(Expr::t(), ctx))
}

/// `(or x...)`: `T` at the first truthy value, `NIL` otherwise.
pub(super) fn or(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    for arg in args {
        if truth(exec, ctx, arg, "or")? {
            return Ok(InvokeResult::unchanged(Expr::t(), ctx));
        }
    }
    Ok(InvokeResult::unchanged(Expr::Null, ctx))
}

pub(super) fn not(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    let [arg] = args else {
        return Err(EvalError::ArityMismatch {
            name: Name::new("not"),
            expected: 1,
            got: args.len(),
        });
    };
    let value = truth(exec, ctx, arg, "not")?;
    Ok(InvokeResult::unchanged(Expr::from_bool(!value), ctx))
}

fn truth(exec: &dyn Execute, ctx: &Context, arg: &Expr, operator: &str) -> EvalResult<bool> {
    match exec.value_of(ctx, arg, ExpandAtoms::No)? {
        Expr::Null => Ok(false),
        Expr::Atom(_) => Ok(true),
        other => Err(EvalError::type_mismatch(&Name::new(operator), "boolean", &other)),
    }
}
