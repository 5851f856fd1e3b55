//! LispGen IR - the data model shared by the parser and the executor.
//!
//! This crate contains:
//! - `Expr`: the closed set of syntax/value variants
//! - `Name`: shared, cheaply-clonable symbol names
//! - `Span`: byte ranges into source text
//! - `Environment`: the lexical scope chain
//! - `Context` / `InvokeResult`: the evaluation thread and its result
//! - `EvalError`: the evaluation failure taxonomy
//! - `Execute`: the seam through which native function bodies call back
//!   into the executor
//!
//! # Context Threading
//!
//! Evaluation never mutates a shared "current environment". Every step
//! returns an [`InvokeResult`] pairing the value with the context the caller
//! should continue with. Forms that introduce bindings return a context on a
//! fresh child scope; everything else echoes the context it was given.

/// Compile-time assertion that a type has a specific size.
///
/// Used to prevent accidental size regressions in frequently-cloned types.
#[macro_export]
macro_rules! static_assert_size {
    ($ty:ty, $size:expr) => {
        const _: [(); $size] = [(); ::std::mem::size_of::<$ty>()];
    };
}

mod environment;
mod errors;
mod expr;
mod name;
mod span;

pub use environment::Environment;
pub use errors::{EvalError, EvalResult};
pub use expr::{DefinedFn, Expr, FnBody, FnValue, NativeFn, NativeFnInner};
pub use name::Name;
pub use span::Span;

/// Whether atom lookup should look through bindings whose value is itself an atom.
///
/// With `Yes`, a scope that binds the name to an `Atom` is skipped and the
/// search continues outward, so the first non-atom binding along the chain wins.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum ExpandAtoms {
    /// Return the first binding found.
    #[default]
    No,
    /// Skip bindings to atoms.
    Yes,
}

impl ExpandAtoms {
    /// Returns `true` if this is `Yes`.
    #[inline]
    pub fn is_yes(self) -> bool {
        matches!(self, ExpandAtoms::Yes)
    }
}

/// The current lexical scope, threaded through a sequence of evaluations.
///
/// Distinct from the declaration scope captured inside a [`FnValue`]: the
/// context is where a call happens, the declaration scope is where the
/// function was defined.
#[derive(Clone, Debug)]
pub struct Context {
    scope: Environment,
}

impl Context {
    pub fn new(scope: Environment) -> Self {
        Context { scope }
    }

    #[inline]
    pub fn scope(&self) -> &Environment {
        &self.scope
    }

    /// Same context, pointed at a different scope.
    #[must_use]
    pub fn with_scope(&self, scope: Environment) -> Self {
        Context { scope }
    }
}

/// Outcome of one evaluation step.
#[derive(Clone, Debug)]
pub struct InvokeResult {
    /// The value the expression evaluated to.
    pub result: Expr,
    /// The context subsequent expressions in the same sequence should use.
    pub new_context: Context,
}

impl InvokeResult {
    pub fn new(result: Expr, new_context: Context) -> Self {
        InvokeResult {
            result,
            new_context,
        }
    }

    /// A result that leaves the caller's context as it was.
    pub fn unchanged(result: Expr, ctx: &Context) -> Self {
        InvokeResult::new(result, ctx.clone())
    }
}

/// Interface native function bodies use to evaluate their raw arguments.
///
/// Implemented by the executor in `lispgen_eval`. Native bodies receive their
/// arguments unevaluated and decide for themselves which to evaluate, in what
/// context, and with which atom-expansion mode.
pub trait Execute {
    /// Evaluate `expr` against `ctx`.
    fn execute(&self, ctx: &Context, expr: &Expr, expand: ExpandAtoms) -> EvalResult;

    /// Evaluate `expr` and keep only the value, discarding the returned context.
    fn value_of(&self, ctx: &Context, expr: &Expr, expand: ExpandAtoms) -> EvalResult<Expr> {
        self.execute(ctx, expr, expand).map(|invoked| invoked.result)
    }
}
