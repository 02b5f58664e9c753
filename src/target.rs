//! Target-type metadata: constructors, parameter roles, and return surfaces.
//!
//! Where a reflective runtime would discover constructors and parameter
//! annotations on the fly, assisted-di asks the target type to describe
//! itself once, through [`AssistedTarget`]. The description is an ordered
//! list of parameter descriptors plus a produce closure that performs the
//! actual construction; the builder validates it and the dispatcher reuses
//! it across unboundedly many invocations.

use std::any::Any;
use std::marker::PhantomData;
use std::sync::Arc;

use crate::context::AnyArc;
use crate::error::{FactoryError, FactoryResult};
use crate::key::TypeKey;

/// How a constructor parameter gets its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamRole {
    /// Supplied by the caller on each factory invocation.
    Assisted,
    /// Fetched from the injection context.
    Resolved,
}

/// One constructor parameter: declared type plus its role.
///
/// The role is the Rust rendition of the assisted marker annotation; it
/// carries no data beyond the classification itself.
#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub(crate) role: ParamRole,
    pub(crate) key: TypeKey,
}

impl ParamSpec {
    /// The parameter's classification.
    pub fn role(&self) -> ParamRole {
        self.role
    }

    /// The parameter's declared type.
    pub fn type_key(&self) -> TypeKey {
        self.key
    }
}

/// A value slot assembled for one constructor parameter.
pub(crate) enum CtorArg {
    /// Container-resolved shared instance.
    Shared(AnyArc),
    /// Caller-supplied owned value.
    Owned(Box<dyn Any + Send>),
}

/// Positionally-ordered constructor arguments, consumed by a produce closure.
///
/// The dispatcher assembles one of these per invocation, with slots in the
/// same order as the constructor's declared parameters. The produce closure
/// takes each slot in turn, calling [`resolved`](Self::resolved) for
/// container-resolved parameters and [`assisted`](Self::assisted) for
/// caller-supplied ones.
pub struct ConstructorArgs {
    slots: std::vec::IntoIter<CtorArg>,
}

impl ConstructorArgs {
    pub(crate) fn new(slots: Vec<CtorArg>) -> Self {
        Self {
            slots: slots.into_iter(),
        }
    }

    /// Takes the next argument as a shared, container-resolved instance.
    pub fn resolved<P: Send + Sync + 'static>(&mut self) -> FactoryResult<Arc<P>> {
        match self.slots.next() {
            Some(CtorArg::Shared(instance)) => instance
                .downcast::<P>()
                .map_err(|_| FactoryError::TypeMismatch(std::any::type_name::<P>())),
            _ => Err(FactoryError::TypeMismatch(std::any::type_name::<P>())),
        }
    }

    /// Takes the next argument as an owned, caller-supplied value.
    pub fn assisted<P: 'static>(&mut self) -> FactoryResult<P> {
        match self.slots.next() {
            Some(CtorArg::Owned(value)) => value
                .downcast::<P>()
                .map(|boxed| *boxed)
                .map_err(|_| FactoryError::TypeMismatch(std::any::type_name::<P>())),
            _ => Err(FactoryError::TypeMismatch(std::any::type_name::<P>())),
        }
    }
}

pub(crate) type ProduceFn<T> =
    Arc<dyn Fn(&mut ConstructorArgs) -> FactoryResult<T> + Send + Sync>;

/// Descriptor of one public constructor of a target type.
///
/// Built fluently: declare each parameter in order, then hand over the
/// produce closure that consumes them.
///
/// # Examples
///
/// ```rust
/// use assisted_di::{AssistedTarget, ConstructorSpec};
/// use std::sync::Arc;
///
/// struct Mailer {
///     smtp_host: String,
/// }
///
/// struct Newsletter {
///     mailer: Arc<Mailer>,
///     subject: String,
/// }
///
/// impl AssistedTarget for Newsletter {
///     fn constructors() -> Vec<ConstructorSpec<Self>> {
///         vec![ConstructorSpec::inject()
///             .resolved::<Mailer>()
///             .assisted::<String>()
///             .produce(|args| {
///                 Ok(Newsletter {
///                     mailer: args.resolved()?,
///                     subject: args.assisted()?,
///                 })
///             })]
///     }
/// }
/// ```
pub struct ConstructorSpec<T> {
    pub(crate) inject: bool,
    pub(crate) params: Vec<ParamSpec>,
    pub(crate) produce: ProduceFn<T>,
}

impl<T: Send + 'static> ConstructorSpec<T> {
    /// Starts describing the constructor that carries the inject marker.
    pub fn inject() -> ConstructorSpecBuilder<T> {
        ConstructorSpecBuilder::new(true)
    }

    /// Starts describing an ordinary public constructor.
    pub fn plain() -> ConstructorSpecBuilder<T> {
        ConstructorSpecBuilder::new(false)
    }

    /// Whether this constructor carries the inject marker.
    pub fn is_inject(&self) -> bool {
        self.inject
    }

    /// The declared parameters, in order.
    pub fn params(&self) -> &[ParamSpec] {
        &self.params
    }
}

/// Fluent builder for a [`ConstructorSpec`].
pub struct ConstructorSpecBuilder<T> {
    inject: bool,
    params: Vec<ParamSpec>,
    _target: PhantomData<fn() -> T>,
}

impl<T: Send + 'static> ConstructorSpecBuilder<T> {
    fn new(inject: bool) -> Self {
        Self {
            inject,
            params: Vec::new(),
            _target: PhantomData,
        }
    }

    /// Declares the next parameter as container-resolved.
    pub fn resolved<P: Send + Sync + 'static>(mut self) -> Self {
        self.params.push(ParamSpec {
            role: ParamRole::Resolved,
            key: TypeKey::of::<P>(),
        });
        self
    }

    /// Declares the next parameter as caller-supplied.
    pub fn assisted<P: Send + 'static>(mut self) -> Self {
        self.params.push(ParamSpec {
            role: ParamRole::Assisted,
            key: TypeKey::of::<P>(),
        });
        self
    }

    /// Finishes the descriptor with the closure that performs construction.
    ///
    /// The closure must consume the arguments in the declared order, using
    /// [`ConstructorArgs::resolved`] and [`ConstructorArgs::assisted`] to
    /// match each parameter's role.
    pub fn produce<F>(self, produce: F) -> ConstructorSpec<T>
    where
        F: Fn(&mut ConstructorArgs) -> FactoryResult<T> + Send + Sync + 'static,
    {
        ConstructorSpec {
            inject: self.inject,
            params: self.params,
            produce: Arc::new(produce),
        }
    }
}

pub(crate) type UpcastFn =
    Arc<dyn Fn(Box<dyn Any + Send>) -> FactoryResult<Box<dyn Any + Send>> + Send + Sync>;

/// Declares that a target type may be returned as a broader type.
///
/// Rust has no class subtyping; "the contract returns a supertype" concretely
/// means the factory hands back a wrapper such as `Box<dyn Trait>`. Each
/// assignment pairs the broader type with the upcast that produces it. The
/// concrete type itself is always accepted without an assignment.
///
/// # Examples
///
/// ```rust
/// use assisted_di::Assignment;
///
/// trait Report: Send {
///     fn title(&self) -> &str;
/// }
///
/// struct SalesReport {
///     title: String,
/// }
///
/// impl Report for SalesReport {
///     fn title(&self) -> &str {
///         &self.title
///     }
/// }
///
/// let assignment: Assignment<SalesReport> =
///     Assignment::to(|report| Box::new(report) as Box<dyn Report>);
/// ```
pub struct Assignment<T> {
    pub(crate) key: TypeKey,
    pub(crate) upcast: UpcastFn,
    _target: PhantomData<fn(T)>,
}

impl<T: Send + 'static> Assignment<T> {
    /// Declares `R` as a permitted return type, reachable through `upcast`.
    pub fn to<R, F>(upcast: F) -> Self
    where
        R: Send + 'static,
        F: Fn(T) -> R + Send + Sync + 'static,
    {
        Assignment {
            key: TypeKey::of::<R>(),
            upcast: Arc::new(move |instance| match instance.downcast::<T>() {
                Ok(concrete) => Ok(Box::new(upcast(*concrete)) as Box<dyn Any + Send>),
                Err(_) => Err(FactoryError::TypeMismatch(std::any::type_name::<T>())),
            }),
            _target: PhantomData,
        }
    }

    /// The broader type this assignment permits.
    pub fn type_key(&self) -> TypeKey {
        self.key
    }
}

/// Implemented by concrete types that can be built through an assisted factory.
///
/// The implementation mirrors what reflection would discover on a class: the
/// public constructors with their parameter roles, and the broader types
/// instances may be returned as. Exactly one constructor must carry the
/// inject marker for the type to be usable as a factory target; the builder
/// enforces this when the type is designated.
pub trait AssistedTarget: Sized + Send + 'static {
    /// Metadata for every public constructor of the type.
    fn constructors() -> Vec<ConstructorSpec<Self>>;

    /// Broader return types a factory contract may declare for this target.
    ///
    /// Defaults to none: only the concrete type itself is assignable.
    fn assignments() -> Vec<Assignment<Self>> {
        Vec::new()
    }
}
