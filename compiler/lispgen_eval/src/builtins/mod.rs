//! The builtin library: the root scope every program starts from.
//!
//! Every builtin is a native function that receives its arguments
//! unevaluated. Special forms (`do`, `defn`, `let`, `assert`) use that to
//! control evaluation and binding; primitives evaluate all their arguments.

mod forms;
mod logic;
mod math;

use std::rc::Rc;

use lispgen_ir::{Context, Environment, EvalError, EvalResult, Execute, Expr, FnBody, FnValue, NativeFn};

/// Every name bound by [`root_environment`].
pub const BUILTIN_NAMES: &[&str] = &[
    "T", "NIL", "do", "defn", "let", "assert", "+", "-", "*", "/", "=", "<", "<=", ">", ">=",
    "1+", "1-", "and", "or", "not",
];

/// Signature shared by every builtin body.
type Builtin = fn(&dyn Execute, &Context, &[Expr]) -> EvalResult;

/// Create a root scope holding `T`, `NIL`, the special forms and the
/// primitive operators.
pub fn root_environment() -> Environment {
    let root = Environment::root();

    install(&root, "T", Expr::t());
    install(&root, "NIL", Expr::Null);

    let natives: [(&str, Builtin); 18] = [
        ("do", forms::builtin_do),
        ("defn", forms::builtin_defn),
        ("let", forms::builtin_let),
        ("assert", forms::builtin_assert),
        ("+", math::add),
        ("-", math::sub),
        ("*", math::mul),
        ("/", math::div),
        ("=", math::eq),
        ("<", math::lt),
        ("<=", math::le),
        (">", math::gt),
        (">=", math::ge),
        ("1+", math::inc),
        ("1-", math::dec),
        ("and", logic::and),
        ("or", logic::or),
        ("not", logic::not),
    ];
    for (name, body) in natives {
        install(&root, name, native_fn(&root, name, body));
    }

    root
}

/// Bind a native function in `scope`.
///
/// The function's declaration scope is `scope` itself. Fails with `Rebind`
/// if the scope already binds `name`.
pub fn register_native(
    scope: &Environment,
    name: &str,
    func: impl Fn(&dyn Execute, &Context, &[Expr]) -> EvalResult + 'static,
) -> Result<(), EvalError> {
    scope.bind(name.into(), native_fn(scope, name, func))
}

fn native_fn(
    scope: &Environment,
    name: &str,
    func: impl Fn(&dyn Execute, &Context, &[Expr]) -> EvalResult + 'static,
) -> Expr {
    Expr::Fn(FnValue::new(
        scope.clone(),
        FnBody::Native(Rc::new(NativeFn::new(name, func))),
    ))
}

#[expect(
    clippy::expect_used,
    reason = "Invariant: builtin names are distinct and the root scope starts empty"
)]
fn install(root: &Environment, name: &str, value: Expr) {
    root.bind(name.into(), value)
        .expect("builtin names are bound exactly once");
}
