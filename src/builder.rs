//! Fluent builder that validates a target type and a factory contract.
//!
//! [`AssistedFactoryBuilder`] is the configuration surface of the crate:
//! [`creates`](AssistedFactoryBuilder::creates) designates the target's
//! injectable constructor and [`build`](AssistedFactoryBuilder::build)
//! validates the contract and produces the live factory. Both steps only
//! inspect metadata; no target instance is created until the factory's
//! method is invoked.

use std::any::Any;
use std::sync::Arc;

use crate::context::InjectionContext;
use crate::contract::FactoryContract;
use crate::dispatcher::Dispatcher;
use crate::error::{FactoryError, FactoryResult};
use crate::factory::AssistedFactory;
use crate::key::TypeKey;
use crate::observer::FactoryObserver;
use crate::target::{AssistedTarget, ConstructorArgs, ConstructorSpec, ParamSpec, UpcastFn};

pub(crate) type ErasedProduceFn =
    Arc<dyn Fn(&mut ConstructorArgs) -> FactoryResult<Box<dyn Any + Send>> + Send + Sync>;

/// Type-erased designated constructor plus the target's return surfaces.
///
/// Captured once when the target is designated; immutable for the lifetime
/// of every factory built from it.
pub(crate) struct TargetSpec {
    pub(crate) target: TypeKey,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) produce: ErasedProduceFn,
    pub(crate) assignments: Vec<(TypeKey, UpcastFn)>,
}

/// Fluent builder for assisted factories.
///
/// # Examples
///
/// ```rust
/// use assisted_di::{
///     Arguments, AssistedFactoryBuilder, AssistedTarget, ConstructorSpec, FactoryContract,
///     MethodSig, ServiceMap,
/// };
/// use std::sync::Arc;
///
/// struct Limiter {
///     per_second: u32,
/// }
///
/// struct Download {
///     limiter: Arc<Limiter>,
///     url: String,
/// }
///
/// impl AssistedTarget for Download {
///     fn constructors() -> Vec<ConstructorSpec<Self>> {
///         vec![ConstructorSpec::inject()
///             .resolved::<Limiter>()
///             .assisted::<String>()
///             .produce(|args| {
///                 Ok(Download {
///                     limiter: args.resolved()?,
///                     url: args.assisted()?,
///                 })
///             })]
///     }
/// }
///
/// let mut services = ServiceMap::new();
/// services.insert(Limiter { per_second: 5 });
///
/// let contract = FactoryContract::new("DownloadFactory")
///     .method(MethodSig::new("create").param::<String>().returns::<Download>());
///
/// let factory = AssistedFactoryBuilder::new(Arc::new(services))
///     .creates::<Download>()
///     .unwrap()
///     .build::<Download>(contract)
///     .unwrap();
///
/// let download = factory
///     .create(Arguments::new().arg("https://example.com/a".to_string()))
///     .unwrap();
/// assert_eq!(download.limiter.per_second, 5);
/// assert_eq!(download.url, "https://example.com/a");
/// ```
pub struct AssistedFactoryBuilder {
    context: Arc<dyn InjectionContext>,
    target: Option<TargetSpec>,
    observers: Vec<Arc<dyn FactoryObserver>>,
}

impl std::fmt::Debug for AssistedFactoryBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssistedFactoryBuilder")
            .field("has_target", &self.target.is_some())
            .field("observers", &self.observers.len())
            .finish()
    }
}

impl AssistedFactoryBuilder {
    /// Creates a builder bound to the given injection context.
    pub fn new(context: Arc<dyn InjectionContext>) -> Self {
        Self {
            context,
            target: None,
            observers: Vec::new(),
        }
    }

    /// Attaches an observer to the factory being built.
    pub fn observe(mut self, observer: Arc<dyn FactoryObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    /// Records the concrete type the factory will create.
    ///
    /// Scans the type's declared constructors for the inject marker; exactly
    /// one must carry it.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Configuration`] if zero or more than one constructor
    /// is marked for injection.
    pub fn creates<T: AssistedTarget>(mut self) -> FactoryResult<Self> {
        let mut designated: Option<ConstructorSpec<T>> = None;
        for constructor in T::constructors() {
            if constructor.inject {
                if designated.is_some() {
                    return Err(FactoryError::Configuration(format!(
                        "found more than one public constructor marked for injection on {}",
                        std::any::type_name::<T>()
                    )));
                }
                designated = Some(constructor);
            }
        }
        let constructor = designated.ok_or_else(|| {
            FactoryError::Configuration(format!(
                "could not find a public constructor marked for injection on {}",
                std::any::type_name::<T>()
            ))
        })?;

        let produce = constructor.produce.clone();
        let produce: ErasedProduceFn = Arc::new(move |args: &mut ConstructorArgs| {
            produce(args).map(|instance| Box::new(instance) as Box<dyn Any + Send>)
        });
        let assignments = T::assignments()
            .into_iter()
            .map(|assignment| (assignment.key, assignment.upcast))
            .collect();

        self.target = Some(TargetSpec {
            target: TypeKey::of::<T>(),
            params: constructor.params,
            produce,
            assignments,
        });
        Ok(self)
    }

    /// Validates the contract and produces the live factory implementing it.
    ///
    /// `R` is the type the factory hands back per invocation and must match
    /// the contract method's declared return type, which in turn must be the
    /// designated target or one of its declared broader surfaces.
    ///
    /// # Errors
    ///
    /// [`FactoryError::Configuration`] if [`creates`](Self::creates) has not
    /// been called, the contract does not declare exactly one method, the
    /// method has no return type, the return type is not assignable from the
    /// target, or `R` differs from the declared return type.
    pub fn build<R: Send + 'static>(
        self,
        contract: FactoryContract,
    ) -> FactoryResult<AssistedFactory<R>> {
        let spec = self.target.ok_or_else(|| {
            FactoryError::Configuration("creates must be called before build".to_string())
        })?;

        if contract.methods().len() != 1 {
            return Err(FactoryError::Configuration(format!(
                "factory contract {} must declare exactly one method, found {}",
                contract.name(),
                contract.methods().len()
            )));
        }
        let method = contract.methods()[0].clone();
        let declared_return = method.return_type().ok_or_else(|| {
            FactoryError::Configuration(format!(
                "method {}(...) on factory contract {} declares no return type",
                method.name(),
                contract.name()
            ))
        })?;

        // The declared return type must be the concrete target or one of its
        // declared broader surfaces.
        let upcast = if declared_return == spec.target {
            None
        } else {
            match spec
                .assignments
                .iter()
                .find(|(key, _)| *key == declared_return)
            {
                Some((_, upcast)) => Some(upcast.clone()),
                None => {
                    return Err(FactoryError::Configuration(format!(
                        "return type on method {}(...) of factory contract {} is invalid: \
                         {} cannot be returned as {}",
                        method.name(),
                        contract.name(),
                        spec.target,
                        declared_return
                    )))
                }
            }
        };

        // The handle's type parameter is the caller-visible return type and
        // must agree with what the contract declares.
        if TypeKey::of::<R>() != declared_return {
            return Err(FactoryError::Configuration(format!(
                "factory handle type {} does not match the return type {} declared by contract {}",
                std::any::type_name::<R>(),
                declared_return,
                contract.name()
            )));
        }

        let dispatcher = Arc::new(Dispatcher {
            context: self.context,
            spec,
            contract: contract.name(),
            method,
            upcast,
            observers: self.observers,
        });
        for observer in &dispatcher.observers {
            observer.factory_built(dispatcher.contract, dispatcher.spec.target.name());
        }
        Ok(AssistedFactory::new(dispatcher))
    }
}
