//! The executor: evaluates expressions against a context.
//!
//! # Evaluation Rules
//!
//! - `Quoted(inner)` yields `inner` as-is; a quoted list stays data.
//! - `List(items)` invokes `items[0]` with the raw `items[1..]`.
//! - `Atom(name)` resolves through the scope chain; unbound atoms yield `Null`.
//! - everything else evaluates to itself.
//!
//! A list produced by invoking or by resolving an atom is evaluated again
//! against the returned context. This is what makes an atom bound to an
//! invocation execute when referenced. The re-evaluation runs as a loop in
//! [`Executor::execute`], so a chain of such indirections costs no stack.
//!
//! # Depth Limit
//!
//! Each nested `execute` holds a [`DepthGuard`]. Going past `max_depth`
//! fails with `StackExhausted`; the native stack is grown on demand below
//! that limit, so runaway recursion surfaces as an error, never a crash.

use std::cell::Cell;

use lispgen_ir::{
    Context, DefinedFn, Environment, EvalError, EvalResult, ExpandAtoms, Execute, Expr, FnBody,
    InvokeResult, Name,
};
use lispgen_stack::ensure_sufficient_stack;

/// Default limit on nested evaluations.
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

/// Tree-walking evaluator.
///
/// Holds no scope of its own: every call receives the context to evaluate
/// in and returns the context to continue with.
pub struct Executor {
    max_depth: usize,
    depth: Cell<usize>,
}

impl Executor {
    /// Create an executor with the default configuration.
    pub fn new() -> Self {
        ExecutorBuilder::new().build()
    }

    pub fn builder() -> ExecutorBuilder {
        ExecutorBuilder::new()
    }

    #[inline]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Current nesting of in-flight evaluations.
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth.get()
    }

    /// Evaluate `expr` against `ctx`.
    ///
    /// Returns the value and the context that subsequent expressions in the
    /// same sequence should be evaluated in.
    #[tracing::instrument(level = "trace", skip(self, ctx, expr), fields(expr = %expr))]
    pub fn execute(&self, ctx: &Context, expr: &Expr, expand: ExpandAtoms) -> EvalResult {
        let _guard = self.enter()?;
        ensure_sufficient_stack(|| self.execute_unguarded(ctx, expr, expand))
    }

    fn execute_unguarded(&self, ctx: &Context, expr: &Expr, expand: ExpandAtoms) -> EvalResult {
        let mut ctx = ctx.clone();
        let mut current = expr.clone();
        loop {
            let step = match &current {
                Expr::Quoted(inner) => return Ok(InvokeResult::new((**inner).clone(), ctx)),
                Expr::List(items) => self.execute_list(&ctx, items)?,
                Expr::Atom(name) => {
                    let value = ctx.scope().lookup(name.as_str(), expand);
                    InvokeResult::new(value.unwrap_or(Expr::Null), ctx)
                }
                Expr::Str(_) | Expr::Num(_) | Expr::Fn(_) | Expr::Null => {
                    return Ok(InvokeResult::new(current.clone(), ctx));
                }
            };

            // Lists produced by a step are forced against the returned context.
            if let Expr::List(_) = step.result {
                ctx = step.new_context;
                current = step.result;
            } else {
                return Ok(step);
            }
        }
    }

    fn execute_list(&self, ctx: &Context, items: &[Expr]) -> EvalResult {
        let Some((operator, args)) = items.split_first() else {
            return Err(EvalError::EmptyInvocation);
        };
        self.invoke(ctx, operator, args)
    }

    /// Call the function bound to `operator` with unevaluated `args`.
    fn invoke(&self, ctx: &Context, operator: &Expr, args: &[Expr]) -> EvalResult {
        let Expr::Atom(name) = operator else {
            return Err(EvalError::NotAnOperator {
                found: operator.to_string(),
            });
        };
        let Some(bound) = ctx.scope().lookup(name.as_str(), ExpandAtoms::No) else {
            return Err(EvalError::UnboundOperator { name: name.clone() });
        };
        let Expr::Fn(func) = bound else {
            return Err(EvalError::NotCallable {
                name: name.clone(),
                found: bound.to_string(),
            });
        };

        match func.body() {
            FnBody::Native(native) => native.call(self, ctx, args),
            FnBody::Defined(defined) => {
                self.call_defined(ctx, name, func.declaration_scope(), defined, args)
            }
        }
    }

    /// Call a `defn` function.
    ///
    /// Arguments are evaluated in the caller's context; parameters are bound
    /// in a fresh child of the declaration scope. The caller's context is
    /// returned unchanged.
    #[tracing::instrument(level = "debug", skip_all, fields(function = %name))]
    fn call_defined(
        &self,
        ctx: &Context,
        name: &Name,
        declaration_scope: &Environment,
        defined: &DefinedFn,
        args: &[Expr],
    ) -> EvalResult {
        let params = defined.params();
        if args.len() < params.len() {
            return Err(EvalError::ArityMismatch {
                name: name.clone(),
                expected: params.len(),
                got: args.len(),
            });
        }

        let scope = declaration_scope.create_child();
        for (param, arg) in params.iter().zip(args) {
            let value = self.execute(ctx, arg, ExpandAtoms::No)?.result;
            scope.bind(param.clone(), value)?;
        }

        let body = self.execute(&ctx.with_scope(scope), &defined.body(), ExpandAtoms::No)?;
        Ok(InvokeResult::unchanged(body.result, ctx))
    }

    fn enter(&self) -> Result<DepthGuard<'_>, EvalError> {
        let depth = self.depth.get();
        if depth >= self.max_depth {
            return Err(EvalError::StackExhausted {
                depth: self.max_depth,
            });
        }
        self.depth.set(depth + 1);
        Ok(DepthGuard { depth: &self.depth })
    }
}

impl Default for Executor {
    fn default() -> Self {
        Self::new()
    }
}

impl Execute for Executor {
    fn execute(&self, ctx: &Context, expr: &Expr, expand: ExpandAtoms) -> EvalResult {
        Executor::execute(self, ctx, expr, expand)
    }
}

/// Decrements the evaluation depth when dropped, including on early return.
struct DepthGuard<'a> {
    depth: &'a Cell<usize>,
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.depth.set(self.depth.get().saturating_sub(1));
    }
}

/// Builder for [`Executor`].
#[derive(Clone, Debug)]
pub struct ExecutorBuilder {
    max_depth: usize,
}

impl ExecutorBuilder {
    pub fn new() -> Self {
        ExecutorBuilder {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Limit on nested evaluations before `StackExhausted` is reported.
    #[must_use]
    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn build(self) -> Executor {
        Executor {
            max_depth: self.max_depth,
            depth: Cell::new(0),
        }
    }
}

impl Default for ExecutorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
