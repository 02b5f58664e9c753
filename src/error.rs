//! Error types for assisted factory construction and invocation.

use std::fmt;

/// Assisted injection errors
///
/// Represents the error conditions that can occur while building a factory
/// or while dispatching one of its invocations.
///
/// Configuration problems surface while the factory is being built and are
/// intended to be caught during startup wiring. Resolution and arity problems
/// surface on individual invocations and propagate to the caller of the
/// factory method; nothing is retried or swallowed internally.
///
/// # Examples
///
/// ```rust
/// use assisted_di::FactoryError;
///
/// let missing = FactoryError::Resolution {
///     missing: "app::CreditService",
///     target: "app::RealPayment",
/// };
/// let arity = FactoryError::Arity("not enough arguments of type u64".to_string());
///
/// // All errors implement Display
/// println!("Error: {}", missing);
/// println!("Error: {}", arity);
/// ```
#[derive(Debug, Clone)]
pub enum FactoryError {
    /// Invalid factory definition: wrong number of injectable constructors,
    /// a malformed contract, or the builder used out of order
    Configuration(String),
    /// A resolved constructor parameter's type is absent from the injection context
    Resolution {
        /// Type the context could not produce
        missing: &'static str,
        /// Type being constructed when the lookup failed
        target: &'static str,
    },
    /// Caller-supplied arguments do not line up with the assisted parameter set
    Arity(String),
    /// An argument failed to downcast to the type its descriptor declared
    TypeMismatch(&'static str),
}

impl fmt::Display for FactoryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FactoryError::Configuration(msg) => {
                write!(f, "Invalid factory configuration: {}", msg)
            }
            FactoryError::Resolution { missing, target } => {
                write!(
                    f,
                    "Could not resolve an instance of {} required for construction of {}. \
                     Did you mean to mark this parameter as assisted?",
                    missing, target
                )
            }
            FactoryError::Arity(msg) => write!(f, "Argument mismatch: {}", msg),
            FactoryError::TypeMismatch(name) => write!(f, "Type mismatch for: {}", name),
        }
    }
}

impl std::error::Error for FactoryError {}

/// Result type for factory operations
///
/// A convenience type alias for `Result<T, FactoryError>` used throughout
/// assisted-di, following the common Rust pattern of a crate-specific Result
/// type to reduce boilerplate in signatures.
pub type FactoryResult<T> = Result<T, FactoryError>;
