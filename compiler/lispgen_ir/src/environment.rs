//! Lexical scope chain.
//!
//! An `Environment` is a shared handle to one scope. Scopes link to their
//! parent, never to their children, so the chain is a tree rooted at the
//! builtin scope and can never form a cycle. Bindings are append-only: a name
//! is added once per scope and is never reassigned or removed.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::collections::hash_map::Entry;
use std::fmt;
use std::rc::Rc;

use crate::{EvalError, ExpandAtoms, Expr, Name};

/// Handle to a scope in the chain. Cloning shares the scope.
#[derive(Clone)]
pub struct Environment(Rc<Scope>);

struct Scope {
    parent: Option<Environment>,
    bindings: RefCell<FxHashMap<Name, Expr>>,
}

impl Environment {
    /// Create an empty scope with no parent.
    pub fn root() -> Self {
        Environment(Rc::new(Scope {
            parent: None,
            bindings: RefCell::default(),
        }))
    }

    /// Create an empty scope whose parent is `self`.
    #[must_use]
    pub fn create_child(&self) -> Self {
        Environment(Rc::new(Scope {
            parent: Some(self.clone()),
            bindings: RefCell::default(),
        }))
    }

    /// The enclosing scope, if any.
    pub fn parent(&self) -> Option<&Environment> {
        self.0.parent.as_ref()
    }

    /// Look up `name`, walking outward through the parents.
    ///
    /// With [`ExpandAtoms::Yes`], bindings whose value is an `Atom` are
    /// passed over as if the scope did not bind the name. `None` means no
    /// qualifying binding exists, which is distinct from a binding to `Null`.
    pub fn lookup(&self, name: &str, expand: ExpandAtoms) -> Option<Expr> {
        let mut scope = Some(self);
        while let Some(env) = scope {
            if let Some(value) = env.0.bindings.borrow().get(name) {
                if !(expand.is_yes() && matches!(value, Expr::Atom(_))) {
                    return Some(value.clone());
                }
            }
            scope = env.parent();
        }
        None
    }

    /// Add a binding to this scope.
    ///
    /// Fails with [`EvalError::Rebind`] if this scope already binds `name`;
    /// shadowing is only possible from a child scope.
    pub fn bind(&self, name: Name, value: Expr) -> Result<(), EvalError> {
        match self.0.bindings.borrow_mut().entry(name) {
            Entry::Occupied(existing) => Err(EvalError::Rebind {
                name: existing.key().clone(),
            }),
            Entry::Vacant(slot) => {
                slot.insert(value);
                Ok(())
            }
        }
    }

    /// Whether this scope itself (not a parent) binds `name`.
    pub fn contains_local(&self, name: &str) -> bool {
        self.0.bindings.borrow().contains_key(name)
    }

    /// Number of scopes from here to the root, counting both ends.
    pub fn depth(&self) -> usize {
        let mut depth = 1;
        let mut scope = self.parent();
        while let Some(env) = scope {
            depth += 1;
            scope = env.parent();
        }
        depth
    }

    /// Whether two handles refer to the same scope.
    #[inline]
    pub fn ptr_eq(&self, other: &Environment) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("depth", &self.depth())
            .field("bindings", &self.0.bindings.borrow().len())
            .finish()
    }
}
