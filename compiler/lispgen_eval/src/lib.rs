//! LispGen Eval - the executor and the builtin library.
//!
//! # Architecture
//!
//! - `Executor`: walks an [`Expr`] against a [`Context`] and returns an
//!   [`InvokeResult`]. Special forms and primitives are ordinary native
//!   functions bound in the root scope; the executor itself only knows how to
//!   resolve atoms, invoke lists and re-evaluate lists produced along the way.
//! - `builtins`: populates a root [`Environment`] with `T`, `NIL`, the special
//!   forms (`do`, `defn`, `let`, `assert`) and the primitive operators.
//! - `interpolate`: the `%d` string formatter used by `assert` messages.
//!
//! # Usage
//!
//! ```text
//! let executor = Executor::new();
//! let mut ctx = Context::new(root_environment());
//! for expr in exprs {
//!     let invoked = executor.execute(&ctx, &expr, ExpandAtoms::No)?;
//!     ctx = invoked.new_context;
//! }
//! ```

mod builtins;
mod executor;
mod interpolate;

pub use builtins::{register_native, root_environment, BUILTIN_NAMES};
pub use executor::{Executor, ExecutorBuilder, DEFAULT_MAX_DEPTH};
pub use interpolate::interpolate;

pub use lispgen_ir::{
    Context, Environment, EvalError, EvalResult, ExpandAtoms, Execute, Expr, InvokeResult, Name,
};

#[cfg(test)]
mod tests;
