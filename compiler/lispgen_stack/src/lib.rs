//! Stack safety utilities for deep recursion.
//!
//! Both the parser and the executor recurse once per level of list nesting.
//! Wrapping each recursive step in [`ensure_sufficient_stack`] grows the
//! native stack on demand, so pathological input is stopped by the
//! executor's own depth limit instead of a process-level stack overflow.
//!
//! # Platform Support
//!
//! - **Native targets**: Uses the `stacker` crate to grow the stack on demand.
//! - **WASM targets**: No-op passthrough (WASM has its own stack management).
//!
//! # Configuration
//!
//! - **Red zone**: 64KB - If less than this remains, we grow the stack
//! - **Growth size**: 1MB - Each growth allocates this much additional space

/// Minimum stack space to keep available (64KB red zone).
const RED_ZONE: usize = 64 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Ensure sufficient stack space is available before executing `f`.
///
/// If the remaining stack is below the red zone threshold, a new stack
/// segment is allocated before calling `f`.
///
/// ```text
/// fn parse_list(&mut self) -> Result<Expr, ParseError> {
///     ensure_sufficient_stack(|| {
///         // ... parse each element, recursing into nested lists ...
///     })
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM version - just call directly (WASM has its own stack management).
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
