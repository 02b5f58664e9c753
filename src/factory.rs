//! The live factory handle returned by the builder.

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::dispatcher::{Arguments, Dispatcher};
use crate::error::{FactoryError, FactoryResult};

/// A built assisted factory.
///
/// Implements the single method of the contract it was built against: each
/// call to [`create`](Self::create) classifies the constructor's parameters,
/// fetches resolved ones from the injection context, matches assisted ones
/// against the supplied arguments by declared type in FIFO order, and
/// returns a freshly constructed `R`.
///
/// The handle is immutable configuration plus a stateless dispatch routine:
/// it is `Send + Sync`, cheap to clone, and safe for unbounded concurrent
/// invocation — every call allocates its own working state.
pub struct AssistedFactory<R> {
    dispatcher: Arc<Dispatcher>,
    _returns: PhantomData<fn() -> R>,
}

impl<R: Send + 'static> AssistedFactory<R> {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            _returns: PhantomData,
        }
    }

    /// Invokes the factory's single method with the supplied arguments.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Resolution`] when a resolved parameter's type is
    /// missing from the injection context, [`FactoryError::Arity`] when the
    /// supplied arguments do not exactly cover the assisted parameter set.
    pub fn create(&self, args: Arguments) -> FactoryResult<R> {
        let instance = self.dispatcher.dispatch(args)?;
        instance
            .downcast::<R>()
            .map(|boxed| *boxed)
            .map_err(|_| FactoryError::TypeMismatch(std::any::type_name::<R>()))
    }

    /// Name of the concrete type this factory constructs.
    pub fn target_type(&self) -> &'static str {
        self.dispatcher.spec.target.name()
    }

    /// Name of the contract this factory was built against.
    pub fn contract_name(&self) -> &'static str {
        self.dispatcher.contract
    }
}

impl<R> Clone for AssistedFactory<R> {
    fn clone(&self) -> Self {
        Self {
            dispatcher: Arc::clone(&self.dispatcher),
            _returns: PhantomData,
        }
    }
}

impl<R> fmt::Debug for AssistedFactory<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssistedFactory")
            .field("contract", &self.dispatcher.contract)
            .field("target", &self.dispatcher.spec.target.name())
            .finish()
    }
}
