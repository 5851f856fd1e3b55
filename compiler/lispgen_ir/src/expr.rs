//! The expression model.
//!
//! `Expr` is both syntax and value: the parser produces it, the executor
//! consumes and returns it. All variants are immutable; composite variants
//! share their payload through `Rc`, so cloning an expression never copies a
//! tree.

use std::fmt;
use std::rc::Rc;

use lispgen_stack::ensure_sufficient_stack;

use crate::{Context, Environment, EvalResult, Execute, Name};

/// An expression (or value) of the language.
#[derive(Clone, Debug)]
pub enum Expr {
    /// A symbol, resolved through the scope chain when evaluated.
    Atom(Name),
    /// A text literal.
    Str(Rc<str>),
    /// The only numeric kind.
    Num(f32),
    /// Evaluates to its inner expression, unevaluated.
    Quoted(Rc<Expr>),
    /// An invocation, or data when quoted.
    List(Rc<[Expr]>),
    /// A callable value.
    Fn(FnValue),
    /// The absent/false value.
    Null,
}

/// Name of the atom denoting boolean true.
pub(crate) const TRUE_ATOM: &str = "T";

impl Expr {
    pub fn atom(name: impl Into<Name>) -> Self {
        Expr::Atom(name.into())
    }

    pub fn str(text: &str) -> Self {
        Expr::Str(Rc::from(text))
    }

    pub fn num(value: f32) -> Self {
        Expr::Num(value)
    }

    pub fn quoted(inner: Expr) -> Self {
        Expr::Quoted(Rc::new(inner))
    }

    pub fn list(items: impl Into<Rc<[Expr]>>) -> Self {
        Expr::List(items.into())
    }

    /// The true atom `T`.
    pub fn t() -> Self {
        Expr::atom(TRUE_ATOM)
    }

    /// `T` for `true`, `Null` for `false`.
    pub fn from_bool(value: bool) -> Self {
        if value {
            Expr::t()
        } else {
            Expr::Null
        }
    }

    /// Every expression other than `Null` is truthy.
    #[inline]
    pub fn is_truthy(&self) -> bool {
        !matches!(self, Expr::Null)
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Null)
    }

    pub fn as_atom(&self) -> Option<&Name> {
        match self {
            Expr::Atom(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Expr]> {
        match self {
            Expr::List(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_num(&self) -> Option<f32> {
        match self {
            Expr::Num(value) => Some(*value),
            _ => None,
        }
    }

    /// Short variant name used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Atom(_) => "atom",
            Expr::Str(_) => "string",
            Expr::Num(_) => "number",
            Expr::Quoted(_) => "quoted expression",
            Expr::List(_) => "list",
            Expr::Fn(_) => "function",
            Expr::Null => "NIL",
        }
    }
}

/// Structural equality.
///
/// Lists compare element-wise in order, quoted expressions by their inner
/// expression. Functions compare by identity: two `Fn` values are equal only
/// when they are clones of the same function object.
impl PartialEq for Expr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Expr::Atom(a), Expr::Atom(b)) => a == b,
            (Expr::Str(a), Expr::Str(b)) => a == b,
            (Expr::Num(a), Expr::Num(b)) => a == b,
            (Expr::Quoted(a), Expr::Quoted(b)) => a == b,
            (Expr::List(a), Expr::List(b)) => {
                a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y)
            }
            (Expr::Fn(a), Expr::Fn(b)) => a == b,
            (Expr::Null, Expr::Null) => true,
            _ => false,
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Recurses once per nesting level of lists and quotes.
        ensure_sufficient_stack(|| match self {
            Expr::Atom(name) => write!(f, "{name}"),
            Expr::Str(text) => {
                f.write_str("\"")?;
                for ch in text.chars() {
                    if ch == '"' {
                        f.write_str("\\\"")?;
                    } else {
                        write!(f, "{ch}")?;
                    }
                }
                f.write_str("\"")
            }
            Expr::Num(value) => write!(f, "{value}"),
            Expr::Quoted(inner) => write!(f, "'{inner}"),
            Expr::List(items) => {
                f.write_str("(")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Expr::Fn(func) => write!(f, "{func}"),
            Expr::Null => f.write_str("NIL"),
        })
    }
}

/// A callable value: a body plus the scope it was declared in.
#[derive(Clone)]
pub struct FnValue {
    declaration_scope: Environment,
    body: FnBody,
}

impl FnValue {
    pub fn new(declaration_scope: Environment, body: FnBody) -> Self {
        FnValue {
            declaration_scope,
            body,
        }
    }

    /// Scope the function was created in; a defined function's parameters
    /// are bound in a fresh child of this scope on every call.
    #[inline]
    pub fn declaration_scope(&self) -> &Environment {
        &self.declaration_scope
    }

    #[inline]
    pub fn body(&self) -> &FnBody {
        &self.body
    }
}

impl PartialEq for FnValue {
    fn eq(&self, other: &Self) -> bool {
        self.declaration_scope.ptr_eq(&other.declaration_scope) && self.body == other.body
    }
}

impl fmt::Debug for FnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FnValue({self})")
    }
}

impl fmt::Display for FnValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            FnBody::Native(native) => write!(f, "#<native {}>", native.name()),
            FnBody::Defined(defined) => {
                f.write_str("#<fn (")?;
                for (i, param) in defined.params().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{param}")?;
                }
                f.write_str(")>")
            }
        }
    }
}

/// The two kinds of function body.
#[derive(Clone)]
pub enum FnBody {
    /// Implemented by the host; receives raw, unevaluated arguments.
    Native(Rc<NativeFn>),
    /// Produced by `defn`: parameter names and a body list.
    Defined(Rc<DefinedFn>),
}

impl PartialEq for FnBody {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (FnBody::Native(a), FnBody::Native(b)) => Rc::ptr_eq(a, b),
            (FnBody::Defined(a), FnBody::Defined(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

/// Signature of a native function body.
///
/// Arguments arrive exactly as written; the body evaluates what it needs
/// through the [`Execute`] handle.
pub type NativeFnInner = dyn Fn(&dyn Execute, &Context, &[Expr]) -> EvalResult;

/// A host-implemented function.
pub struct NativeFn {
    name: Name,
    func: Box<NativeFnInner>,
}

impl NativeFn {
    pub fn new(
        name: impl Into<Name>,
        func: impl Fn(&dyn Execute, &Context, &[Expr]) -> EvalResult + 'static,
    ) -> Self {
        NativeFn {
            name: name.into(),
            func: Box::new(func),
        }
    }

    #[inline]
    pub fn name(&self) -> &Name {
        &self.name
    }

    /// Run the body against the caller's context and raw arguments.
    #[inline]
    pub fn call(&self, executor: &dyn Execute, ctx: &Context, args: &[Expr]) -> EvalResult {
        (self.func)(executor, ctx, args)
    }
}

impl fmt::Debug for NativeFn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<native-fn {}>", self.name)
    }
}

/// A function defined with `defn`.
#[derive(Debug)]
pub struct DefinedFn {
    params: Vec<Name>,
    body: Rc<[Expr]>,
}

impl DefinedFn {
    pub fn new(params: Vec<Name>, body: Rc<[Expr]>) -> Self {
        DefinedFn { params, body }
    }

    #[inline]
    pub fn params(&self) -> &[Name] {
        &self.params
    }

    /// The body as the list expression it was written as.
    pub fn body(&self) -> Expr {
        Expr::List(Rc::clone(&self.body))
    }
}
