/// Build-time validation tests: every misconfiguration must surface as a
/// Configuration error before any instance is created.
use assisted_di::{
    AssistedFactoryBuilder, AssistedFactoryProvider, AssistedTarget, ConstructorSpec,
    FactoryContract, FactoryError, MethodSig, ServiceMap,
};
use std::sync::Arc;

struct Widget {
    label: String,
}

impl AssistedTarget for Widget {
    fn constructors() -> Vec<ConstructorSpec<Self>> {
        vec![ConstructorSpec::inject()
            .assisted::<String>()
            .produce(|args| {
                Ok(Widget {
                    label: args.assisted()?,
                })
            })]
    }
}

struct Unmarked;

impl AssistedTarget for Unmarked {
    fn constructors() -> Vec<ConstructorSpec<Self>> {
        vec![ConstructorSpec::plain().produce(|_| Ok(Unmarked))]
    }
}

struct DoublyMarked;

impl AssistedTarget for DoublyMarked {
    fn constructors() -> Vec<ConstructorSpec<Self>> {
        vec![
            ConstructorSpec::inject().produce(|_| Ok(DoublyMarked)),
            ConstructorSpec::inject()
                .assisted::<u32>()
                .produce(|args| {
                    let _width: u32 = args.assisted()?;
                    Ok(DoublyMarked)
                }),
        ]
    }
}

fn context() -> Arc<ServiceMap> {
    Arc::new(ServiceMap::new())
}

fn widget_contract() -> FactoryContract {
    FactoryContract::new("WidgetFactory")
        .method(MethodSig::new("create").param::<String>().returns::<Widget>())
}

// ===== Constructor designation =====

#[test]
fn test_no_marked_constructor_is_rejected() {
    let err = AssistedFactoryBuilder::new(context())
        .creates::<Unmarked>()
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("could not find a public constructor"));
    assert!(err.to_string().contains("Unmarked"));
}

#[test]
fn test_multiple_marked_constructors_are_rejected() {
    let err = AssistedFactoryBuilder::new(context())
        .creates::<DoublyMarked>()
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("more than one public constructor"));
    assert!(err.to_string().contains("DoublyMarked"));
}

#[test]
fn test_build_before_creates_is_rejected() {
    let err = AssistedFactoryBuilder::new(context())
        .build::<Widget>(widget_contract())
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("creates must be called before build"));
}

// ===== Contract shape =====

#[test]
fn test_contract_without_methods_is_rejected() {
    let contract = FactoryContract::new("EmptyFactory");
    let err = AssistedFactoryProvider::new(context())
        .provide::<Widget, Widget>(contract)
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("exactly one method"));
    assert!(err.to_string().contains("found 0"));
}

#[test]
fn test_contract_with_two_methods_is_rejected() {
    let contract = FactoryContract::new("WideFactory")
        .method(MethodSig::new("create").param::<String>().returns::<Widget>())
        .method(MethodSig::new("create_default").returns::<Widget>());
    let err = AssistedFactoryProvider::new(context())
        .provide::<Widget, Widget>(contract)
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("exactly one method"));
    assert!(err.to_string().contains("found 2"));
}

#[test]
fn test_method_without_return_type_is_rejected() {
    let contract = FactoryContract::new("WidgetFactory")
        .method(MethodSig::new("create").param::<String>());
    let err = AssistedFactoryProvider::new(context())
        .provide::<Widget, Widget>(contract)
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("declares no return type"));
}

// ===== Return type assignability =====

#[test]
fn test_unrelated_return_type_is_rejected() {
    let contract = FactoryContract::new("WidgetFactory")
        .method(MethodSig::new("create").param::<String>().returns::<u64>());
    let err = AssistedFactoryProvider::new(context())
        .provide::<Widget, u64>(contract)
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("cannot be returned as"));
}

#[test]
fn test_handle_type_must_match_declared_return_type() {
    // The contract is fine; the requested handle type is not what it declares.
    let err = AssistedFactoryProvider::new(context())
        .provide::<Widget, u64>(widget_contract())
        .unwrap_err();
    assert!(matches!(err, FactoryError::Configuration(_)));
    assert!(err.to_string().contains("does not match the return type"));
}

#[test]
fn test_no_instances_created_during_build() {
    // Building validates metadata only; the widget contract resolves nothing
    // and constructs nothing until the factory method is invoked.
    let factory = AssistedFactoryProvider::new(context())
        .provide::<Widget, Widget>(widget_contract())
        .unwrap();
    assert_eq!(factory.contract_name(), "WidgetFactory");
    drop(factory);
}

#[test]
fn test_widget_still_buildable_after_failed_attempts() {
    let provider = AssistedFactoryProvider::new(context());
    let _ = provider.provide::<Widget, u64>(widget_contract());

    let factory = provider
        .provide::<Widget, Widget>(widget_contract())
        .unwrap();
    let widget = factory
        .create(assisted_di::args!["retry".to_string()])
        .unwrap();
    assert_eq!(widget.label, "retry");
}
