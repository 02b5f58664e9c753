/// Unit tests for FactoryError and FactoryResult types
use assisted_di::{FactoryError, FactoryResult};
use std::error::Error;

#[test]
fn test_error_display_configuration() {
    let error = FactoryError::Configuration("no marked constructor".to_string());
    let display_str = format!("{}", error);
    assert_eq!(
        display_str,
        "Invalid factory configuration: no marked constructor"
    );
    assert!(display_str.contains("configuration"));
}

#[test]
fn test_error_display_resolution() {
    let error = FactoryError::Resolution {
        missing: "app::CreditService",
        target: "app::RealPayment",
    };
    let display_str = format!("{}", error);
    assert_eq!(
        display_str,
        "Could not resolve an instance of app::CreditService required for construction of \
         app::RealPayment. Did you mean to mark this parameter as assisted?"
    );
    assert!(display_str.contains("app::CreditService"));
    assert!(display_str.contains("app::RealPayment"));
}

#[test]
fn test_error_display_arity() {
    let error = FactoryError::Arity("not enough arguments of type u64".to_string());
    let display_str = format!("{}", error);
    assert_eq!(
        display_str,
        "Argument mismatch: not enough arguments of type u64"
    );
    assert!(display_str.contains("u64"));
}

#[test]
fn test_error_display_type_mismatch() {
    let error = FactoryError::TypeMismatch("alloc::string::String");
    let display_str = format!("{}", error);
    assert_eq!(display_str, "Type mismatch for: alloc::string::String");
}

#[test]
fn test_error_is_std_error() {
    let error = FactoryError::Arity("boom".to_string());
    let boxed: Box<dyn Error> = Box::new(error);
    assert!(boxed.to_string().contains("boom"));
    assert!(boxed.source().is_none());
}

#[test]
fn test_errors_are_cloneable() {
    let error = FactoryError::Resolution {
        missing: "A",
        target: "B",
    };
    let clone = error.clone();
    assert_eq!(format!("{}", error), format!("{}", clone));
}

#[test]
fn test_result_alias() {
    fn fails() -> FactoryResult<u32> {
        Err(FactoryError::Configuration("bad".to_string()))
    }

    fn succeeds() -> FactoryResult<u32> {
        Ok(7)
    }

    assert!(fails().is_err());
    assert_eq!(succeeds().unwrap(), 7);
}
