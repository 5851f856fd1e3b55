//! Special forms: `do`, `defn`, `let`, `assert`.

use std::rc::Rc;

use lispgen_ir::{
    Context, DefinedFn, EvalError, EvalResult, ExpandAtoms, Execute, Expr, FnBody, FnValue,
    InvokeResult, Name,
};
use tracing::debug;

use crate::interpolate::interpolate;

/// `(do expr...)`
///
/// Evaluates in order, each expression in the context the previous one
/// returned. Yields the last result and the final context.
pub(super) fn builtin_do(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    let mut current = InvokeResult::unchanged(Expr::Null, ctx);
    for arg in args {
        current = exec.execute(&current.new_context, arg, ExpandAtoms::No)?;
    }
    Ok(current)
}

/// `(defn name (param...) (body...))`
///
/// The name is bound in a new child of the current scope, while the function
/// captures the current scope itself: later expressions see the function,
/// the function does not see its own name.
pub(super) fn builtin_defn(_exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    let [name, params, body] = args else {
        return Err(malformed_defn(
            "expected a name, a parameter list and a body list",
        ));
    };
    let Expr::Atom(name) = name else {
        return Err(malformed_defn("function name must be an atom"));
    };
    let Expr::List(params) = params else {
        return Err(malformed_defn("parameters must be a list"));
    };
    let params = params
        .iter()
        .map(|param| {
            param
                .as_atom()
                .cloned()
                .ok_or_else(|| malformed_defn("parameters must be atoms"))
        })
        .collect::<Result<Vec<Name>, _>>()?;
    let Expr::List(body) = body else {
        return Err(malformed_defn("body must be a list"));
    };

    let func = Expr::Fn(FnValue::new(
        ctx.scope().clone(),
        FnBody::Defined(Rc::new(DefinedFn::new(params, Rc::clone(body)))),
    ));
    let scope = ctx.scope().create_child();
    scope.bind(name.clone(), func.clone())?;

    debug!(function = %name, "defined function");
    Ok(InvokeResult::new(func, ctx.with_scope(scope)))
}

/// `(let ((name expr)...))`
///
/// Every value is evaluated in the context before the `let`; all names land
/// in one new child scope.
pub(super) fn builtin_let(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    let [bindings] = args else {
        return Err(malformed_let("expected exactly one binding list"));
    };
    let Expr::List(bindings) = bindings else {
        return Err(malformed_let("bindings must be a list"));
    };

    let scope = ctx.scope().create_child();
    for binding in bindings.iter() {
        let Some([name, value]) = binding.as_list() else {
            return Err(malformed_let("each binding must be a (name value) pair"));
        };
        let Expr::Atom(name) = name else {
            return Err(malformed_let("binding name must be an atom"));
        };
        let value = exec.value_of(ctx, value, ExpandAtoms::No)?;
        scope.bind(name.clone(), value)?;
    }

    debug!(bindings = bindings.len(), "let introduced scope");
    Ok(InvokeResult::new(Expr::Null, ctx.with_scope(scope)))
}

/// `(assert test [use-message "message" interp-arg...])`
pub(super) fn builtin_assert(exec: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
    let Some((test, rest)) = args.split_first() else {
        return Err(EvalError::MalformedAssert {
            reason: "expected a test expression",
        });
    };
    if exec.value_of(ctx, test, ExpandAtoms::No)?.is_truthy() {
        return Ok(InvokeResult::unchanged(Expr::t(), ctx));
    }

    let Some((use_message, rest)) = rest.split_first() else {
        return Err(EvalError::AssertionFailed { message: None });
    };
    if !exec.value_of(ctx, use_message, ExpandAtoms::No)?.is_truthy() {
        return Err(EvalError::AssertionFailed { message: None });
    }

    let Some((Expr::Str(template), interp_args)) = rest.split_first() else {
        return Err(EvalError::MalformedAssert {
            reason: "message must be a string literal",
        });
    };
    let message = interpolate(exec, ctx, template, interp_args)?;
    Err(EvalError::AssertionFailed {
        message: Some(message),
    })
}

fn malformed_defn(reason: &'static str) -> EvalError {
    EvalError::MalformedDefn { reason }
}

fn malformed_let(reason: &'static str) -> EvalError {
    EvalError::MalformedLet { reason }
}
