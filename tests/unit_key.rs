/// Unit tests for TypeKey equality, hashing, and display
use assisted_di::TypeKey;
use std::collections::HashMap;

#[test]
fn test_same_type_keys_are_equal() {
    assert_eq!(TypeKey::of::<String>(), TypeKey::of::<String>());
    assert_eq!(TypeKey::of::<Vec<u8>>(), TypeKey::of::<Vec<u8>>());
}

#[test]
fn test_different_type_keys_are_unequal() {
    assert_ne!(TypeKey::of::<u32>(), TypeKey::of::<u64>());
    assert_ne!(TypeKey::of::<Vec<u8>>(), TypeKey::of::<Vec<u16>>());
}

#[test]
fn test_key_name_and_display() {
    let key = TypeKey::of::<String>();
    assert_eq!(key.name(), "alloc::string::String");
    assert_eq!(format!("{}", key), key.name());
}

#[test]
fn test_keys_work_as_map_keys() {
    let mut map = HashMap::new();
    map.insert(TypeKey::of::<u32>(), "u32");
    map.insert(TypeKey::of::<String>(), "string");

    assert_eq!(map.get(&TypeKey::of::<u32>()), Some(&"u32"));
    assert_eq!(map.get(&TypeKey::of::<String>()), Some(&"string"));
    assert_eq!(map.get(&TypeKey::of::<u64>()), None);
}

#[test]
fn test_keys_are_copyable() {
    let key = TypeKey::of::<u32>();
    let copy = key;
    assert_eq!(key, copy);
    assert_eq!(key.id(), copy.id());
}
