//! Injection context contract and a simple type-keyed implementation.
//!
//! The factory machinery needs exactly one capability from a dependency
//! injection container: produce a shared instance for a requested type, or
//! signal that none is known. [`InjectionContext`] captures that capability;
//! anything resembling a container can implement it.

use std::any::Any;
use std::collections::HashMap;
use std::sync::Arc;

use crate::key::TypeKey;

/// Type-erased shared instance handed out by an injection context.
pub type AnyArc = Arc<dyn Any + Send + Sync>;

/// The single capability a container exposes to assisted factories.
///
/// Implementations must be safe for concurrent read access; the dispatcher
/// performs lookups on every invocation without serializing them.
///
/// # Examples
///
/// ```rust
/// use assisted_di::{AnyArc, InjectionContext, TypeKey};
///
/// /// A context that only knows a single greeting string.
/// struct OneString(AnyArc);
///
/// impl InjectionContext for OneString {
///     fn resolve_any(&self, key: &TypeKey) -> Option<AnyArc> {
///         (*key == TypeKey::of::<String>()).then(|| self.0.clone())
///     }
/// }
/// ```
pub trait InjectionContext: Send + Sync {
    /// Resolves a shared instance for the keyed type, or `None` if the
    /// context has no registration for it.
    fn resolve_any(&self, key: &TypeKey) -> Option<AnyArc>;
}

/// Generic convenience over [`InjectionContext::resolve_any`].
///
/// Blanket-implemented for every context, including trait objects.
pub trait ContextExt: InjectionContext {
    /// Resolves a typed shared instance.
    ///
    /// Returns `None` both when the type is unregistered and when the stored
    /// instance is not actually a `T` (a misbehaving context).
    fn resolve<T: Send + Sync + 'static>(&self) -> Option<Arc<T>> {
        self.resolve_any(&TypeKey::of::<T>())
            .and_then(|any| any.downcast::<T>().ok())
    }
}

impl<C: InjectionContext + ?Sized> ContextExt for C {}

/// Minimal map-backed injection context.
///
/// Holds one shared instance per type. Useful for tests and small wiring
/// setups; real containers implement [`InjectionContext`] directly over
/// their own storage.
///
/// # Examples
///
/// ```rust
/// use assisted_di::{ContextExt, ServiceMap};
///
/// struct Clock {
///     timezone: String,
/// }
///
/// let mut services = ServiceMap::new();
/// services.insert(Clock { timezone: "UTC".to_string() });
/// services.insert(8080u16);
///
/// let clock = services.resolve::<Clock>().unwrap();
/// assert_eq!(clock.timezone, "UTC");
/// assert!(services.resolve::<String>().is_none());
/// ```
#[derive(Default)]
pub struct ServiceMap {
    entries: HashMap<TypeKey, AnyArc>,
}

impl ServiceMap {
    /// Creates an empty map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an instance, replacing any previous registration of the
    /// same type.
    pub fn insert<T: Send + Sync + 'static>(&mut self, value: T) -> &mut Self {
        self.entries.insert(TypeKey::of::<T>(), Arc::new(value));
        self
    }

    /// Registers an already-shared instance.
    pub fn insert_arc<T: Send + Sync + 'static>(&mut self, value: Arc<T>) -> &mut Self {
        self.entries.insert(TypeKey::of::<T>(), value);
        self
    }

    /// Number of registered types.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no types are registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl InjectionContext for ServiceMap {
    fn resolve_any(&self, key: &TypeKey) -> Option<AnyArc> {
        self.entries.get(key).cloned()
    }
}
