use super::*;
use pretty_assertions::assert_eq;
use uht_types::{HeaderId, IntKind, NodeId, ObjectKind, TypeRef};

fn target() -> TypeRef {
    TypeRef::new(HeaderId(0), NodeId(1))
}

fn structure(name: &str) -> PropertyType {
    PropertyType::Struct {
        name: name.to_owned(),
        target: target(),
    }
}

fn sanitized(ty: &PropertyType, text: &str) -> Option<String> {
    let tokens = uht_lexer::lex_fragment(text, 1).unwrap();
    sanitize_default(ty, &tokens)
}

#[test]
fn test_scalars() {
    let int = PropertyType::Int(IntKind::Int32);
    assert_eq!(sanitized(&int, "-42").as_deref(), Some("-42"));
    assert_eq!(sanitized(&int, "0x10").as_deref(), Some("16"));
    assert_eq!(sanitized(&int, "4 + 2"), None);

    let boolean = PropertyType::Bool { native: true };
    assert_eq!(sanitized(&boolean, "true").as_deref(), Some("true"));
    assert_eq!(sanitized(&boolean, "1"), None);

    assert_eq!(
        sanitized(&PropertyType::Float, "1.5f").as_deref(),
        Some("1.500000")
    );
    assert_eq!(
        sanitized(&PropertyType::Double, "-2").as_deref(),
        Some("-2.000000")
    );
}

#[test]
fn test_strings_and_names() {
    assert_eq!(
        sanitized(&PropertyType::Str, "TEXT(\"Hello\")").as_deref(),
        Some("Hello")
    );
    assert_eq!(
        sanitized(&PropertyType::Str, "FString()").as_deref(),
        Some("")
    );
    assert_eq!(
        sanitized(&PropertyType::Str, "FString(TEXT(\"a\\\"b\"))").as_deref(),
        Some("a\"b")
    );
    assert_eq!(
        sanitized(&PropertyType::Name, "NAME_None").as_deref(),
        Some("None")
    );
    assert_eq!(
        sanitized(&PropertyType::Name, "FName(TEXT(\"Socket\"))").as_deref(),
        Some("Socket")
    );
}

#[test]
fn test_text() {
    assert_eq!(
        sanitized(&PropertyType::Text, "FText::GetEmpty()").as_deref(),
        Some("")
    );
    assert_eq!(
        sanitized(&PropertyType::Text, "INVTEXT(\"Hi\")").as_deref(),
        Some("INVTEXT(\"Hi\")")
    );
    assert_eq!(
        sanitized(&PropertyType::Text, "NSLOCTEXT(\"Ns\", \"Key\", \"Hi\")").as_deref(),
        Some("NSLOCTEXT(\"Ns\", \"Key\", \"Hi\")")
    );
    assert_eq!(sanitized(&PropertyType::Text, "MakeText()"), None);
}

#[test]
fn test_enums_and_objects() {
    let color = PropertyType::Enum {
        name: "EColor".to_owned(),
        target: target(),
        underlying: None,
    };
    assert_eq!(sanitized(&color, "EColor::Red").as_deref(), Some("Red"));
    assert_eq!(sanitized(&color, "EColor::Type::Red").as_deref(), Some("Red"));
    assert_eq!(sanitized(&color, "Green").as_deref(), Some("Green"));

    let object = PropertyType::Object {
        kind: ObjectKind::Raw,
        class_name: "UWidget".to_owned(),
        target: target(),
    };
    assert_eq!(sanitized(&object, "nullptr").as_deref(), Some("None"));
    assert_eq!(sanitized(&object, "GetDefault()"), None);
}

#[test]
fn test_vectors() {
    let vector = structure("FVector");
    assert_eq!(
        sanitized(&vector, "FVector(1, 2.5f, -3)").as_deref(),
        Some("1.000000,2.500000,-3.000000")
    );
    assert_eq!(
        sanitized(&vector, "FVector::UpVector").as_deref(),
        Some("0.000000,0.000000,1.000000")
    );
    assert_eq!(
        sanitized(&vector, "FVector(ForceInit)").as_deref(),
        Some("0.000000,0.000000,0.000000")
    );
    assert_eq!(sanitized(&vector, "FVector(1, 2)"), None);

    assert_eq!(
        sanitized(&structure("FVector2D"), "FVector2D(1, 2)").as_deref(),
        Some("(X=1.000000,Y=2.000000)")
    );
    assert_eq!(
        sanitized(&structure("FRotator"), "FRotator::ZeroRotator").as_deref(),
        Some("0.000000,0.000000,0.000000")
    );
}

#[test]
fn test_colors() {
    assert_eq!(
        sanitized(&structure("FLinearColor"), "FLinearColor(1, 0.5, 0)").as_deref(),
        Some("(R=1.000000,G=0.500000,B=0.000000,A=1.000000)")
    );
    assert_eq!(
        sanitized(&structure("FColor"), "FColor(10, 20, 30)").as_deref(),
        Some("(R=10,G=20,B=30,A=255)")
    );
    assert_eq!(sanitized(&structure("FColor"), "FColor(300, 0, 0)"), None);
}

#[test]
fn test_other_structs() {
    assert_eq!(
        sanitized(&structure("FPoint"), "FPoint()").as_deref(),
        Some("")
    );
    assert_eq!(sanitized(&structure("FPoint"), "FPoint(1, 2)"), None);
    assert_eq!(
        sanitized(&PropertyType::Array(Box::new(PropertyType::Float)), "{}"),
        None
    );
}
