//! Diagnostic observers for factory events.
//!
//! Observers hook the lifecycle of assisted factories: build completion,
//! successful instance creation, and invocation failures. Calls are made
//! synchronously during dispatch, so implementations should stay
//! lightweight.

use crate::error::FactoryError;

/// Observer of factory build and invocation events.
///
/// All methods default to no-ops; implement only the events of interest.
///
/// # Examples
///
/// ```rust
/// use assisted_di::FactoryObserver;
/// use std::sync::atomic::{AtomicU32, Ordering};
///
/// #[derive(Default)]
/// struct Counter {
///     created: AtomicU32,
/// }
///
/// impl FactoryObserver for Counter {
///     fn instance_created(&self, _target: &'static str) {
///         self.created.fetch_add(1, Ordering::Relaxed);
///     }
/// }
/// ```
pub trait FactoryObserver: Send + Sync {
    /// A factory finished building: `contract` now creates `target`.
    fn factory_built(&self, contract: &'static str, target: &'static str) {
        let _ = (contract, target);
    }

    /// An invocation produced an instance of `target`.
    fn instance_created(&self, target: &'static str) {
        let _ = target;
    }

    /// An invocation failed before an instance could be produced.
    fn invocation_failed(&self, target: &'static str, error: &FactoryError) {
        let _ = (target, error);
    }
}

/// Observer that writes events to stderr.
///
/// Handy while wiring factories during startup or debugging argument
/// mismatches.
pub struct LoggingObserver {
    prefix: String,
}

impl LoggingObserver {
    /// Creates an observer with the default `assisted-di` prefix.
    pub fn new() -> Self {
        Self::with_prefix("assisted-di")
    }

    /// Creates an observer with a custom line prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Default for LoggingObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl FactoryObserver for LoggingObserver {
    fn factory_built(&self, contract: &'static str, target: &'static str) {
        eprintln!("[{}] built factory {} creating {}", self.prefix, contract, target);
    }

    fn instance_created(&self, target: &'static str) {
        eprintln!("[{}] created instance of {}", self.prefix, target);
    }

    fn invocation_failed(&self, target: &'static str, error: &FactoryError) {
        eprintln!("[{}] failed to create {}: {}", self.prefix, target, error);
    }
}
