//! # assisted-di
//!
//! Assisted injection for Rust, inspired by Guice's AssistedInject: build
//! objects whose constructors mix dependencies resolved from a DI container
//! with arguments supplied by the caller at call time, unified behind a
//! single factory call.
//!
//! ## How it works
//!
//! - A target type describes its constructors once through
//!   [`AssistedTarget`]: each parameter is classified as *resolved* (the
//!   injection context supplies it) or *assisted* (the caller supplies it).
//! - A [`FactoryContract`] describes the factory interface: one method, its
//!   parameter types in declaration order, and its return type.
//! - [`AssistedFactoryBuilder`] validates both — exactly one constructor
//!   marked for injection, exactly one contract method, return type
//!   assignable from the target — and produces a live [`AssistedFactory`].
//! - Each invocation matches caller arguments to assisted parameters by
//!   declared type, first-in-first-out per type, fetches resolved parameters
//!   from the context, and constructs the instance. Leftover or missing
//!   arguments fail the call; nothing is partially constructed.
//!
//! ## Quick Start
//!
//! ```rust
//! use assisted_di::{
//!     args, AssistedFactoryProvider, AssistedTarget, ConstructorSpec, FactoryContract,
//!     MethodSig, ServiceMap,
//! };
//! use std::sync::Arc;
//!
//! // A service the container owns.
//! struct CreditService {
//!     endpoint: String,
//! }
//!
//! // The type the factory creates: one resolved and two assisted parameters.
//! struct Payment {
//!     credit: Arc<CreditService>,
//!     account: String,
//!     amount: u64,
//! }
//!
//! impl AssistedTarget for Payment {
//!     fn constructors() -> Vec<ConstructorSpec<Self>> {
//!         vec![ConstructorSpec::inject()
//!             .resolved::<CreditService>()
//!             .assisted::<String>()
//!             .assisted::<u64>()
//!             .produce(|args| {
//!                 Ok(Payment {
//!                     credit: args.resolved()?,
//!                     account: args.assisted()?,
//!                     amount: args.assisted()?,
//!                 })
//!             })]
//!     }
//! }
//!
//! // Wire the context and build the factory.
//! let mut services = ServiceMap::new();
//! services.insert(CreditService {
//!     endpoint: "https://credit.internal".to_string(),
//! });
//!
//! let provider = AssistedFactoryProvider::new(Arc::new(services));
//! let contract = FactoryContract::new("PaymentFactory").method(
//!     MethodSig::new("create")
//!         .param::<String>()
//!         .param::<u64>()
//!         .returns::<Payment>(),
//! );
//!
//! let factory = provider.provide::<Payment, Payment>(contract).unwrap();
//!
//! // Invoke: the credit service comes from the container, the rest from here.
//! let payment = factory.create(args!["ACC-1".to_string(), 250u64]).unwrap();
//! assert_eq!(payment.credit.endpoint, "https://credit.internal");
//! assert_eq!(payment.account, "ACC-1");
//! assert_eq!(payment.amount, 250);
//! ```
//!
//! ## Covariant return types
//!
//! A contract may declare a broader return type than the concrete target —
//! in Rust, a wrapper such as `Box<dyn Trait>`. The target lists each
//! permitted surface as an [`Assignment`]:
//!
//! ```rust
//! use assisted_di::{
//!     args, Assignment, AssistedFactoryProvider, AssistedTarget, ConstructorSpec,
//!     FactoryContract, MethodSig, ServiceMap,
//! };
//! use std::sync::Arc;
//!
//! trait Greeter: Send {
//!     fn greet(&self) -> String;
//! }
//!
//! struct LoudGreeter {
//!     name: String,
//! }
//!
//! impl Greeter for LoudGreeter {
//!     fn greet(&self) -> String {
//!         format!("HELLO {}", self.name)
//!     }
//! }
//!
//! impl AssistedTarget for LoudGreeter {
//!     fn constructors() -> Vec<ConstructorSpec<Self>> {
//!         vec![ConstructorSpec::inject()
//!             .assisted::<String>()
//!             .produce(|args| Ok(LoudGreeter { name: args.assisted()? }))]
//!     }
//!
//!     fn assignments() -> Vec<Assignment<Self>> {
//!         vec![Assignment::to(|greeter| Box::new(greeter) as Box<dyn Greeter>)]
//!     }
//! }
//!
//! let provider = AssistedFactoryProvider::new(Arc::new(ServiceMap::new()));
//! let contract = FactoryContract::new("GreeterFactory").method(
//!     MethodSig::new("create")
//!         .param::<String>()
//!         .returns::<Box<dyn Greeter>>(),
//! );
//!
//! let factory = provider
//!     .provide::<LoudGreeter, Box<dyn Greeter>>(contract)
//!     .unwrap();
//! let greeter = factory.create(args!["world".to_string()]).unwrap();
//! assert_eq!(greeter.greet(), "HELLO world");
//! ```
//!
//! ## Matching semantics
//!
//! Arguments match assisted parameters by declared type in declaration
//! order per type. Two assisted parameters of the same type therefore bind
//! in positional order; the marker carries no per-parameter identifier, so
//! an intended pairing that differs from declaration order cannot be
//! expressed. This is a documented limitation of type-keyed matching.

// Module declarations
pub mod builder;
pub mod context;
pub mod contract;
pub mod dispatcher;
pub mod error;
pub mod factory;
pub mod key;
pub mod observer;
pub mod provider;
pub mod target;

// Re-export core types
pub use builder::AssistedFactoryBuilder;
pub use context::{AnyArc, ContextExt, InjectionContext, ServiceMap};
pub use contract::{FactoryContract, MethodSig};
pub use dispatcher::Arguments;
pub use error::{FactoryError, FactoryResult};
pub use factory::AssistedFactory;
pub use key::TypeKey;
pub use observer::{FactoryObserver, LoggingObserver};
pub use provider::AssistedFactoryProvider;
pub use target::{
    Assignment, AssistedTarget, ConstructorArgs, ConstructorSpec, ConstructorSpecBuilder,
    ParamRole, ParamSpec,
};

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Debug)]
    struct Clock {
        now: u64,
    }

    #[derive(Debug)]
    struct Session {
        clock: Arc<Clock>,
        user: String,
    }

    impl AssistedTarget for Session {
        fn constructors() -> Vec<ConstructorSpec<Self>> {
            vec![ConstructorSpec::inject()
                .resolved::<Clock>()
                .assisted::<String>()
                .produce(|args| {
                    Ok(Session {
                        clock: args.resolved()?,
                        user: args.assisted()?,
                    })
                })]
        }
    }

    fn session_contract() -> FactoryContract {
        FactoryContract::new("SessionFactory")
            .method(MethodSig::new("create").param::<String>().returns::<Session>())
    }

    #[test]
    fn test_basic_creation() {
        let mut services = ServiceMap::new();
        services.insert(Clock { now: 1_000 });

        let provider = AssistedFactoryProvider::new(Arc::new(services));
        let factory = provider
            .provide::<Session, Session>(session_contract())
            .unwrap();

        let session = factory.create(args!["alice".to_string()]).unwrap();
        assert_eq!(session.clock.now, 1_000);
        assert_eq!(session.user, "alice");
    }

    #[test]
    fn test_missing_service_is_resolution_error() {
        let provider = AssistedFactoryProvider::new(Arc::new(ServiceMap::new()));
        let factory = provider
            .provide::<Session, Session>(session_contract())
            .unwrap();

        let err = factory.create(args!["alice".to_string()]).unwrap_err();
        assert!(matches!(err, FactoryError::Resolution { .. }));
    }

    #[test]
    fn test_invocations_are_independent() {
        let mut services = ServiceMap::new();
        services.insert(Clock { now: 7 });

        let provider = AssistedFactoryProvider::new(Arc::new(services));
        let factory = provider
            .provide::<Session, Session>(session_contract())
            .unwrap();

        let a = factory.create(args!["a".to_string()]).unwrap();
        let b = factory.create(args!["a".to_string()]).unwrap();
        assert_eq!(a.user, b.user);
        // Shared service, distinct instances
        assert!(Arc::ptr_eq(&a.clock, &b.clock));
    }

    #[test]
    fn test_factory_diagnostics() {
        let mut services = ServiceMap::new();
        services.insert(Clock { now: 7 });

        let provider = AssistedFactoryProvider::new(Arc::new(services));
        let factory = provider
            .provide::<Session, Session>(session_contract())
            .unwrap();

        assert_eq!(factory.contract_name(), "SessionFactory");
        assert!(factory.target_type().contains("Session"));
    }
}
