use super::*;
use crate::{HeaderId, NodeId};
use pretty_assertions::assert_eq;

fn target() -> TypeRef {
    TypeRef::new(HeaderId(0), NodeId(1))
}

#[test]
fn test_int_kind_names() {
    assert_eq!(IntKind::from_name("uint8"), Some(IntKind::UInt8));
    assert_eq!(IntKind::from_name("int"), Some(IntKind::Int32));
    assert_eq!(IntKind::from_name("float"), None);
    assert_eq!(IntKind::Int64.cpp_name(), "int64");
}

#[test]
fn test_cpp_type_spelling() {
    let map = PropertyType::Map(
        Box::new(PropertyType::Name),
        Box::new(PropertyType::Object {
            kind: ObjectKind::ObjectPtr,
            class_name: "UTexture".to_owned(),
            target: target(),
        }),
    );
    assert_eq!(map.cpp_type(), "TMap<FName, TObjectPtr<UTexture>>");

    let raw = PropertyType::Object {
        kind: ObjectKind::Raw,
        class_name: "UWidget".to_owned(),
        target: target(),
    };
    assert_eq!(raw.cpp_type(), "UWidget*");
}

#[test]
fn test_classification() {
    assert!(PropertyType::Array(Box::new(PropertyType::Float)).is_container());
    assert!(!PropertyType::Float.is_container());
    assert!(PropertyType::Bool { native: false }.is_bool());
    assert!(PropertyType::Delegate {
        name: "FOnHit".to_owned(),
        target: target(),
        multicast: true,
    }
    .is_multicast_delegate());
}
