//! Top-level evaluation state.

use lispgen_eval::{root_environment, Executor};
use lispgen_ir::{Context, EvalError, ExpandAtoms, Expr};
use lispgen_parse::ParseError;
use tracing::debug;

/// Why a piece of source failed to produce a value.
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum RunError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Eval(#[from] EvalError),
}

/// A root scope and the context reached by everything evaluated so far.
///
/// Bindings made by one top-level expression (`let`, `defn`) are visible to
/// the next, whether they arrive in the same source or in later calls.
pub struct Session {
    executor: Executor,
    ctx: Context,
}

impl Session {
    pub fn new() -> Self {
        Self::with_executor(Executor::new())
    }

    pub fn with_executor(executor: Executor) -> Self {
        Session {
            executor,
            ctx: Context::new(root_environment()),
        }
    }

    #[inline]
    pub fn context(&self) -> &Context {
        &self.ctx
    }

    /// Evaluate one expression and continue from the context it returns.
    ///
    /// On error the session keeps the context it had before the call.
    pub fn eval(&mut self, expr: &Expr) -> Result<Expr, EvalError> {
        let invoked = self.executor.execute(&self.ctx, expr, ExpandAtoms::No)?;
        self.ctx = invoked.new_context;
        Ok(invoked.result)
    }

    /// Parse `source` as a program and evaluate its expressions in order.
    ///
    /// Returns the value of the last expression, or `NIL` for an empty
    /// program. Nothing is evaluated if the source fails to parse.
    pub fn eval_source(&mut self, source: &str) -> Result<Expr, RunError> {
        let exprs = lispgen_parse::parse_program(source)?;
        debug!(count = exprs.len(), "evaluating program");

        let mut last = Expr::Null;
        for expr in &exprs {
            last = self.eval(expr)?;
        }
        Ok(last)
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
