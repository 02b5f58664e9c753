//! Invocation dispatch: matching caller arguments and context-resolved
//! instances to constructor parameters.
//!
//! The dispatcher implements the factory's single method. Per invocation it
//! pools the caller-supplied values under their declared types, walks the
//! designated constructor's parameters in order — fetching resolved ones
//! from the injection context and popping assisted ones from the pool in
//! FIFO order per type — verifies the pool is fully drained, and invokes
//! the produce closure. Failure is terminal per invocation: either a fully
//! constructed instance comes back or one of the factory errors does.

use std::any::Any;
use std::fmt;
use std::sync::Arc;

use crate::builder::TargetSpec;
use crate::context::InjectionContext;
use crate::contract::MethodSig;
use crate::error::{FactoryError, FactoryResult};
use crate::key::TypeKey;
use crate::observer::FactoryObserver;
use crate::target::{ConstructorArgs, CtorArg, ParamRole, UpcastFn};

#[cfg(feature = "smallvec")]
type ValueQueue = smallvec::SmallVec<[Box<dyn Any + Send>; 2]>;
#[cfg(not(feature = "smallvec"))]
type ValueQueue = Vec<Box<dyn Any + Send>>;

#[cfg(feature = "ahash")]
type PoolMap = ahash::AHashMap<TypeKey, ValueQueue>;
#[cfg(not(feature = "ahash"))]
type PoolMap = std::collections::HashMap<TypeKey, ValueQueue>;

/// Ordered caller-supplied arguments for one factory invocation.
///
/// Each value is recorded together with its static type at the call site,
/// mirroring the declared parameter types of a factory method. The
/// [`args!`](crate::args) macro builds one from a value list.
///
/// # Examples
///
/// ```rust
/// use assisted_di::Arguments;
///
/// let args = Arguments::new().arg(42u32).arg("subject".to_string());
/// assert_eq!(args.len(), 2);
/// ```
pub struct Arguments {
    values: Vec<(TypeKey, Box<dyn Any + Send>)>,
}

impl Arguments {
    /// Creates an empty argument list.
    pub fn new() -> Self {
        Self { values: Vec::new() }
    }

    /// Appends a value, recording its static type.
    pub fn arg<P: Send + 'static>(mut self, value: P) -> Self {
        self.values.push((TypeKey::of::<P>(), Box::new(value)));
        self
    }

    /// Number of supplied values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no values were supplied.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub(crate) fn into_parts(self) -> Vec<(TypeKey, Box<dyn Any + Send>)> {
        self.values
    }
}

impl Default for Arguments {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Arguments {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.values.iter().map(|(key, _)| key.name()))
            .finish()
    }
}

/// Builds an [`Arguments`] list from a sequence of values.
///
/// # Examples
///
/// ```rust
/// use assisted_di::args;
///
/// let args = args![7u32, "weekly".to_string()];
/// assert_eq!(args.len(), 2);
/// ```
#[macro_export]
macro_rules! args {
    () => { $crate::Arguments::new() };
    ($($value:expr),+ $(,)?) => {{
        let mut arguments = $crate::Arguments::new();
        $(arguments = arguments.arg($value);)+
        arguments
    }};
}

/// Per-invocation pool of caller-supplied values, keyed by declared type.
///
/// Values sharing a type queue up in declaration order; matching always
/// pops the front of the queue for the requested type.
struct ArgumentPool {
    by_type: PoolMap,
    remaining: usize,
}

impl ArgumentPool {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            by_type: PoolMap::with_capacity(capacity),
            remaining: 0,
        }
    }

    fn insert(&mut self, key: TypeKey, value: Box<dyn Any + Send>) {
        self.by_type.entry(key).or_default().push(value);
        self.remaining += 1;
    }

    /// Consumes the oldest unconsumed value of the keyed type.
    fn take(&mut self, key: &TypeKey) -> Option<Box<dyn Any + Send>> {
        let queue = self.by_type.get_mut(key)?;
        if queue.is_empty() {
            return None;
        }
        self.remaining -= 1;
        Some(queue.remove(0))
    }

    fn remaining(&self) -> usize {
        self.remaining
    }

    /// Names of unconsumed value types, one entry per value, sorted for
    /// deterministic messages.
    fn leftover(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = Vec::new();
        for (key, queue) in &self.by_type {
            for _ in 0..queue.len() {
                names.push(key.name());
            }
        }
        names.sort_unstable();
        names
    }
}

/// Immutable per-factory configuration plus the stateless dispatch routine.
///
/// Shared behind an `Arc` by the factory handle and all its clones. Every
/// invocation allocates its own pool and slot array; nothing mutable is
/// shared between concurrent calls.
pub(crate) struct Dispatcher {
    pub(crate) context: Arc<dyn InjectionContext>,
    pub(crate) spec: TargetSpec,
    pub(crate) contract: &'static str,
    pub(crate) method: MethodSig,
    pub(crate) upcast: Option<UpcastFn>,
    pub(crate) observers: Vec<Arc<dyn FactoryObserver>>,
}

impl Dispatcher {
    pub(crate) fn dispatch(&self, args: Arguments) -> FactoryResult<Box<dyn Any + Send>> {
        let result = self.dispatch_inner(args);
        match &result {
            Ok(_) => {
                for observer in &self.observers {
                    observer.instance_created(self.spec.target.name());
                }
            }
            Err(error) => {
                for observer in &self.observers {
                    observer.invocation_failed(self.spec.target.name(), error);
                }
            }
        }
        result
    }

    fn dispatch_inner(&self, args: Arguments) -> FactoryResult<Box<dyn Any + Send>> {
        let declared = self.method.params();
        let supplied = args.into_parts();
        if supplied.len() != declared.len() {
            return Err(FactoryError::Arity(format!(
                "{}(...) on factory {} takes {} argument(s) but {} were supplied",
                self.method.name(),
                self.contract,
                declared.len(),
                supplied.len()
            )));
        }

        // Pool the values under the method's declared parameter types, in
        // declaration order.
        let mut pool = ArgumentPool::with_capacity(declared.len());
        for (position, ((supplied_key, value), declared_key)) in
            supplied.into_iter().zip(declared.iter()).enumerate()
        {
            if supplied_key != *declared_key {
                return Err(FactoryError::Arity(format!(
                    "argument {} of {}(...) on factory {} is declared as {} but {} was supplied",
                    position + 1,
                    self.method.name(),
                    self.contract,
                    declared_key,
                    supplied_key
                )));
            }
            pool.insert(*declared_key, value);
        }

        // Walk the designated constructor's parameters in order, filling one
        // slot per parameter.
        let mut slots: Vec<CtorArg> = Vec::with_capacity(self.spec.params.len());
        for param in &self.spec.params {
            match param.role {
                ParamRole::Resolved => {
                    let instance = self.context.resolve_any(&param.key).ok_or(
                        FactoryError::Resolution {
                            missing: param.key.name(),
                            target: self.spec.target.name(),
                        },
                    )?;
                    slots.push(CtorArg::Shared(instance));
                }
                ParamRole::Assisted => {
                    let value = pool.take(&param.key).ok_or_else(|| {
                        FactoryError::Arity(format!(
                            "not enough arguments of type {} on {}(...) of factory {}; \
                             there must be one for each assisted constructor parameter of {}",
                            param.key,
                            self.method.name(),
                            self.contract,
                            self.spec.target
                        ))
                    })?;
                    slots.push(CtorArg::Owned(value));
                }
            }
        }

        if pool.remaining() > 0 {
            return Err(FactoryError::Arity(format!(
                "{} argument(s) on {}(...) of factory {} were not matched to any assisted \
                 constructor parameter of {}: {}",
                pool.remaining(),
                self.method.name(),
                self.contract,
                self.spec.target,
                pool.leftover().join(", ")
            )));
        }

        let mut ctor_args = ConstructorArgs::new(slots);
        let instance = (self.spec.produce)(&mut ctor_args)?;
        match &self.upcast {
            Some(upcast) => upcast(instance),
            None => Ok(instance),
        }
    }
}
