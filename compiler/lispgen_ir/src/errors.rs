//! Evaluation errors.
//!
//! Every failure aborts the current top-level evaluation and propagates to
//! the caller unchanged. Variants carry the failing operator and the expected
//! vs. actual shape so the message alone is enough to locate the problem.

use crate::{InvokeResult, Name};

/// Result of an evaluation step.
pub type EvalResult<T = InvokeResult> = Result<T, EvalError>;

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalError {
    #[error("cannot invoke an empty list")]
    EmptyInvocation,

    #[error("head of an invocation must be an atom, found {found}")]
    NotAnOperator { found: String },

    #[error("lookup for operator `{name}` failed")]
    UnboundOperator { name: Name },

    #[error("`{name}` is not a function (bound to {found})")]
    NotCallable { name: Name, found: String },

    #[error("`{name}` expects {expected} {}, got {got}", arguments(.expected))]
    ArityMismatch {
        name: Name,
        expected: usize,
        got: usize,
    },

    #[error("malformed defn: {reason}")]
    MalformedDefn { reason: &'static str },

    #[error("malformed let: {reason}")]
    MalformedLet { reason: &'static str },

    #[error("malformed assert: {reason}")]
    MalformedAssert { reason: &'static str },

    #[error("`{operator}` expected {expected}, got {got}")]
    TypeMismatch {
        operator: Name,
        expected: &'static str,
        got: &'static str,
    },

    #[error("format directive `%{directive}` expected a number, got {got}")]
    FormatTypeMismatch { directive: char, got: &'static str },

    #[error("unknown format directive `%{directive}`")]
    UnknownDirective { directive: char },

    #[error("assertion failed{}", message_suffix(.message))]
    AssertionFailed { message: Option<String> },

    #[error("`{name}` is already bound in this scope")]
    Rebind { name: Name },

    #[error("maximum evaluation depth exceeded (limit: {depth})")]
    StackExhausted { depth: usize },
}

impl EvalError {
    /// Shorthand for a `TypeMismatch` reporting the actual variant of `got`.
    pub fn type_mismatch(
        operator: &Name,
        expected: &'static str,
        got: &crate::Expr,
    ) -> Self {
        EvalError::TypeMismatch {
            operator: operator.clone(),
            expected,
            got: got.kind_name(),
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, reason = "thiserror passes fields by reference")]
fn arguments(count: &usize) -> &'static str {
    if *count == 1 {
        "argument"
    } else {
        "arguments"
    }
}

fn message_suffix(message: &Option<String>) -> String {
    match message {
        Some(text) => format!(": {text}"),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_message_pluralizes() {
        let one = EvalError::ArityMismatch {
            name: Name::new("not"),
            expected: 1,
            got: 2,
        };
        assert_eq!(one.to_string(), "`not` expects 1 argument, got 2");

        let two = EvalError::ArityMismatch {
            name: Name::new("f"),
            expected: 2,
            got: 0,
        };
        assert_eq!(two.to_string(), "`f` expects 2 arguments, got 0");
    }

    #[test]
    fn test_assertion_message() {
        let bare = EvalError::AssertionFailed { message: None };
        assert_eq!(bare.to_string(), "assertion failed");

        let with_text = EvalError::AssertionFailed {
            message: Some("1 should equal 2".to_string()),
        };
        assert_eq!(with_text.to_string(), "assertion failed: 1 should equal 2");
    }

    #[test]
    fn test_type_mismatch_names_operator_and_kinds() {
        let err = EvalError::type_mismatch(&Name::new("+"), "number", &crate::Expr::str("x"));
        assert_eq!(err.to_string(), "`+` expected number, got string");
    }
}
