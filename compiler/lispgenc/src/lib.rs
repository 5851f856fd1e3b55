//! LispGen driver library.
//!
//! Everything the `lispgen` binary does lives here so integration tests can
//! drive it without spawning a process:
//!
//! - [`Session`]: a root scope plus an executor, threading the context across
//!   top-level expressions
//! - [`commands`]: the `run`, `repl` and `parse` commands
//! - [`init_tracing`]: opt-in `RUST_LOG` logging

pub mod commands;
mod session;

use std::sync::Once;

pub use session::{RunError, Session};

static TRACING_INIT: Once = Once::new();

/// Install the tracing subscriber.
///
/// Does nothing unless `RUST_LOG` is set. Safe to call more than once; only
/// the first call has an effect.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            tracing_subscriber::registry()
                .with(EnvFilter::from_default_env())
                .with(
                    tracing_tree::HierarchicalLayer::new(2)
                        .with_targets(true)
                        .with_indent_lines(true),
                )
                .init();
        }
    });
}
