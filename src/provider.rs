//! Convenience entry point that chains builder validation and dispatch.

use std::sync::Arc;

use crate::builder::AssistedFactoryBuilder;
use crate::context::InjectionContext;
use crate::contract::FactoryContract;
use crate::error::FactoryResult;
use crate::factory::AssistedFactory;
use crate::observer::FactoryObserver;
use crate::target::AssistedTarget;

/// One-stop creator of assisted factories.
///
/// Wraps an injection context once and hands out factories for any
/// (target, contract) pair. Pure composition over
/// [`AssistedFactoryBuilder`]; typically constructed during startup wiring
/// and kept for the life of the process.
///
/// # Examples
///
/// ```rust
/// use assisted_di::{
///     args, AssistedFactoryProvider, AssistedTarget, ConstructorSpec, FactoryContract,
///     MethodSig, ServiceMap,
/// };
/// use std::sync::Arc;
///
/// struct Signer {
///     key_id: String,
/// }
///
/// struct Receipt {
///     signer: Arc<Signer>,
///     total: u64,
/// }
///
/// impl AssistedTarget for Receipt {
///     fn constructors() -> Vec<ConstructorSpec<Self>> {
///         vec![ConstructorSpec::inject()
///             .resolved::<Signer>()
///             .assisted::<u64>()
///             .produce(|args| {
///                 Ok(Receipt {
///                     signer: args.resolved()?,
///                     total: args.assisted()?,
///                 })
///             })]
///     }
/// }
///
/// let mut services = ServiceMap::new();
/// services.insert(Signer { key_id: "k1".to_string() });
///
/// let provider = AssistedFactoryProvider::new(Arc::new(services));
/// let contract = FactoryContract::new("ReceiptFactory")
///     .method(MethodSig::new("create").param::<u64>().returns::<Receipt>());
///
/// let factory = provider.provide::<Receipt, Receipt>(contract).unwrap();
/// let receipt = factory.create(args![250u64]).unwrap();
/// assert_eq!(receipt.total, 250);
/// assert_eq!(receipt.signer.key_id, "k1");
/// ```
pub struct AssistedFactoryProvider {
    context: Arc<dyn InjectionContext>,
    observers: Vec<Arc<dyn FactoryObserver>>,
}

impl AssistedFactoryProvider {
    /// Creates a provider bound to the given injection context.
    pub fn new(context: Arc<dyn InjectionContext>) -> Self {
        Self {
            context,
            observers: Vec::new(),
        }
    }

    /// Attaches an observer to every factory this provider builds.
    pub fn observe(mut self, observer: Arc<dyn FactoryObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Builds a factory creating `T` behind `contract`, returned as `R`.
    ///
    /// Equivalent to chaining [`AssistedFactoryBuilder::creates`] and
    /// [`AssistedFactoryBuilder::build`].
    pub fn provide<T, R>(&self, contract: FactoryContract) -> FactoryResult<AssistedFactory<R>>
    where
        T: AssistedTarget,
        R: Send + 'static,
    {
        let mut builder = AssistedFactoryBuilder::new(self.context.clone());
        for observer in &self.observers {
            builder = builder.observe(observer.clone());
        }
        builder.creates::<T>()?.build::<R>(contract)
    }
}
