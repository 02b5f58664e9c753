//! Factory contract descriptors.
//!
//! A contract describes a user-defined factory interface: a name plus the
//! shape of each method. The builder only accepts contracts with exactly
//! one method; the dispatcher has no way to tell which method an invocation
//! belongs to, so any other arity is rejected up front.

use crate::key::TypeKey;

/// Shape of one factory method: name, parameter types in declaration order,
/// and declared return type.
///
/// # Examples
///
/// ```rust
/// use assisted_di::MethodSig;
///
/// struct Order {
///     quantity: u32,
///     note: String,
/// }
///
/// let sig = MethodSig::new("create")
///     .param::<u32>()
///     .param::<String>()
///     .returns::<Order>();
/// assert_eq!(sig.name(), "create");
/// assert_eq!(sig.params().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MethodSig {
    name: &'static str,
    params: Vec<TypeKey>,
    ret: Option<TypeKey>,
}

impl MethodSig {
    /// Starts a signature for the named method.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            params: Vec::new(),
            ret: None,
        }
    }

    /// Appends a parameter of type `P` to the declaration.
    pub fn param<P: Send + 'static>(mut self) -> Self {
        self.params.push(TypeKey::of::<P>());
        self
    }

    /// Declares the method's return type.
    pub fn returns<R: Send + 'static>(mut self) -> Self {
        self.ret = Some(TypeKey::of::<R>());
        self
    }

    /// The method name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Declared parameter types, in order.
    pub fn params(&self) -> &[TypeKey] {
        &self.params
    }

    /// Declared return type, if one was set.
    pub fn return_type(&self) -> Option<TypeKey> {
        self.ret
    }
}

/// Describes a user-defined factory interface: its name and methods.
///
/// The name is retained only for diagnostics; validation happens against
/// the method list when the factory is built.
///
/// # Examples
///
/// ```rust
/// use assisted_di::{FactoryContract, MethodSig};
///
/// struct Order {
///     quantity: u32,
/// }
///
/// let contract = FactoryContract::new("OrderFactory")
///     .method(MethodSig::new("create").param::<u32>().returns::<Order>());
/// assert_eq!(contract.name(), "OrderFactory");
/// assert_eq!(contract.methods().len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct FactoryContract {
    name: &'static str,
    methods: Vec<MethodSig>,
}

impl FactoryContract {
    /// Starts a contract with the given interface name.
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            methods: Vec::new(),
        }
    }

    /// Appends a method to the contract.
    pub fn method(mut self, sig: MethodSig) -> Self {
        self.methods.push(sig);
        self
    }

    /// The interface name, used in diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The declared methods.
    pub fn methods(&self) -> &[MethodSig] {
        &self.methods
    }
}
