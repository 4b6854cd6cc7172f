use super::*;
use crate::TokenReplay;
use pretty_assertions::assert_eq;
use uht_types::{
    HeaderId, NodeId, ObjectKind, PropertyExportFlags, TypeEntry, TypeKind, TypeRef, TypeTable,
};

fn tokens(source: &str) -> Vec<Token> {
    uht_lexer::lex_fragment(source, 1).unwrap()
}

fn member(source: &str) -> (ParsedProperty, Vec<Diagnostic>) {
    let captured = tokens(source);
    let mut replay = TokenReplay::new(&captured);
    let mut diagnostics = Vec::new();
    let parsed = parse_property(
        &mut replay,
        PropertyCategory::Member,
        PropertyShape::Member,
        CompilerDirective::empty(),
        &mut diagnostics,
    )
    .unwrap();
    assert!(replay.check_symbol(";").unwrap(), "stopped before ';'");
    (parsed, diagnostics)
}

fn parameter(source: &str) -> ParsedProperty {
    let captured = tokens(source);
    let mut replay = TokenReplay::new(&captured);
    let mut diagnostics = Vec::new();
    let parsed = parse_property(
        &mut replay,
        PropertyCategory::RegularParameter,
        PropertyShape::Parameter,
        CompilerDirective::empty(),
        &mut diagnostics,
    )
    .unwrap();
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    parsed
}

fn table() -> TypeTable {
    let types = TypeTable::new();
    let mut next = 0;
    let mut add = |name: &str, kind: TypeKind| {
        next += 1;
        let id = TypeRef::new(HeaderId(0), NodeId(next));
        types.register(name, TypeEntry { id, kind }).unwrap();
    };
    add(
        "UObject",
        TypeKind::Class {
            interface: false,
            native_interface: false,
        },
    );
    add(
        "UWidget",
        TypeKind::Class {
            interface: false,
            native_interface: false,
        },
    );
    add(
        "UClickable",
        TypeKind::Class {
            interface: true,
            native_interface: false,
        },
    );
    add(
        "IClickable",
        TypeKind::Class {
            interface: true,
            native_interface: true,
        },
    );
    add("FLayout", TypeKind::Struct);
    add("EColor", TypeKind::Enum);
    add("FOnClicked", TypeKind::Delegate { multicast: true });
    types
}

fn resolve(source: &str) -> Result<PropertyType, TypeError> {
    resolve_type(&tokens(source), &table())
}

#[test]
fn test_builtin_member_resolves_at_parse() {
    let (parsed, diagnostics) = member("int32 Count;");
    assert!(diagnostics.is_empty());
    assert_eq!(parsed.name, "Count");
    assert_eq!(parsed.decl.ty, PropertyType::Int(IntKind::Int32));
}

#[test]
fn test_declared_type_is_left_unresolved() {
    let (parsed, _) = member("TArray<TObjectPtr<UWidget>> Children;");
    assert_eq!(parsed.name, "Children");
    let PropertyType::Unresolved(captured) = &parsed.decl.ty else {
        panic!("expected unresolved, got {:?}", parsed.decl.ty);
    };
    assert_eq!(join_tokens(captured), "TArray<TObjectPtr<UWidget>>");
}

#[test]
fn test_static_array_and_initializer() {
    let (parsed, _) = member("float Weights[(int32)EColor::Max] = { 1.0f };");
    assert_eq!(
        parsed.decl.array_dimensions.as_deref(),
        Some("(int32)EColor::Max")
    );
    assert!(parsed.decl.default_value_tokens.is_empty());
}

#[test]
fn test_bitfield() {
    let (parsed, diagnostics) = member("uint8 bVisible : 1;");
    assert!(diagnostics.is_empty());
    assert!(parsed.decl.is_bitfield);
    assert_eq!(parsed.decl.ty, PropertyType::Bool { native: false });

    let (_, diagnostics) = member("uint8 bWide : 2;");
    assert_eq!(diagnostics[0].code, ErrorCode::E3004);

    let (_, diagnostics) = member("float bOdd : 1;");
    assert_eq!(diagnostics[0].code, ErrorCode::E3004);
}

#[test]
fn test_unmatched_angle_bracket_is_fatal() {
    let captured = tokens("int32> Broken;");
    let mut replay = TokenReplay::new(&captured);
    let err = parse_property(
        &mut replay,
        PropertyCategory::Member,
        PropertyShape::Member,
        CompilerDirective::empty(),
        &mut Vec::new(),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::E0012);
}

#[test]
fn test_missing_name_is_fatal() {
    let captured = tokens("int32;");
    let mut replay = TokenReplay::new(&captured);
    let err = parse_property(
        &mut replay,
        PropertyCategory::Member,
        PropertyShape::Member,
        CompilerDirective::empty(),
        &mut Vec::new(),
    )
    .unwrap_err();
    assert_eq!(err.code, ErrorCode::E3005);
}

#[test]
fn test_layout_macros() {
    let (parsed, _) = member("LAYOUT_FIELD((TMap<FName, int32>), Lookup);");
    assert_eq!(parsed.name, "Lookup");
    assert_eq!(parsed.decl.allocator, PropertyAllocator::MemoryImage);
    assert!(parsed.decl.ty.is_unresolved());

    let (parsed, _) = member("LAYOUT_ARRAY_EDITORONLY(int32, Slots, 4);");
    assert_eq!(parsed.decl.array_dimensions.as_deref(), Some("4"));
    assert!(parsed.decl.flags.contains(PropertyFlags::EDITOR_ONLY));

    let (parsed, _) = member("LAYOUT_BITFIELD(uint8, bFlag, 1);");
    assert!(parsed.decl.is_bitfield);
}

#[test]
fn test_editor_only_from_directive() {
    let captured = tokens("FString Note;");
    let mut replay = TokenReplay::new(&captured);
    let parsed = parse_property(
        &mut replay,
        PropertyCategory::Member,
        PropertyShape::Member,
        CompilerDirective::WITH_EDITOR_ONLY_DATA,
        &mut Vec::new(),
    )
    .unwrap();
    assert!(parsed.decl.flags.contains(PropertyFlags::EDITOR_ONLY));
}

#[test]
fn test_parameter_reference_flags() {
    let parsed = parameter("const FString& Label)");
    assert_eq!(parsed.decl.ref_qualifier, RefQualifier::ConstRef);
    assert!(parsed.decl.flags.contains(PropertyFlags::PARM | PropertyFlags::CONST_PARM));
    assert!(!parsed.decl.flags.contains(PropertyFlags::OUT_PARM));
    assert_eq!(parsed.decl.ty, PropertyType::Str);

    let parsed = parameter("int32& OutCount)");
    assert_eq!(parsed.decl.ref_qualifier, RefQualifier::NonConstRef);
    assert!(parsed.decl.flags.contains(PropertyFlags::OUT_PARM));
}

#[test]
fn test_parameter_default_keeps_nested_commas() {
    let parsed = parameter("FVector Offset = FVector(1, 2, 3), int32 Next)");
    assert_eq!(
        join_tokens(&parsed.decl.default_value_tokens),
        "FVector(1,2,3)"
    );
}

#[test]
fn test_uparam_specifiers() {
    let parsed = parameter("UPARAM(ref, DisplayName=\"Items\") TArray<int32>& Values)");
    assert!(parsed
        .decl
        .flags
        .contains(PropertyFlags::REFERENCE_PARM | PropertyFlags::OUT_PARM));
    assert_eq!(parsed.meta.get("DisplayName"), Some("Items"));
}

#[test]
fn test_delegate_parameter_shape() {
    let captured = tokens("const FString&, Message)");
    let mut replay = TokenReplay::new(&captured);
    let parsed = parse_property(
        &mut replay,
        PropertyCategory::RegularParameter,
        PropertyShape::DelegateParameter,
        CompilerDirective::empty(),
        &mut Vec::new(),
    )
    .unwrap();
    assert_eq!(parsed.name, "Message");
    assert_eq!(parsed.decl.ref_qualifier, RefQualifier::ConstRef);
}

#[test]
fn test_deprecated_suffix() {
    let (parsed, _) = member("int32 OldValue_DEPRECATED;");
    assert!(parsed.decl.flags.contains(PropertyFlags::DEPRECATED));
}

#[test]
fn test_member_reference_not_allowed() {
    let (_, diagnostics) = member("int32& Alias;");
    assert_eq!(diagnostics[0].code, ErrorCode::E3007);
}

#[test]
fn test_return_property() {
    let parsed = property_from_type(
        PropertyCategory::Return,
        tokens("const FText&"),
        "ReturnValue",
        CompilerDirective::empty(),
        &mut Vec::new(),
    );
    assert_eq!(parsed.name, "ReturnValue");
    assert_eq!(parsed.decl.ty, PropertyType::Text);
    assert!(parsed.decl.flags.contains(PropertyFlags::RETURN_PARM));
    assert_eq!(parsed.decl.export_flags, PropertyExportFlags::empty());
}

#[test]
fn test_resolve_containers_and_wrappers() {
    let ty = resolve("TMap<FName, TObjectPtr<UWidget>>").unwrap();
    let PropertyType::Map(key, value) = ty else {
        panic!("expected map");
    };
    assert_eq!(*key, PropertyType::Name);
    assert!(matches!(
        *value,
        PropertyType::Object {
            kind: ObjectKind::ObjectPtr,
            ..
        }
    ));

    assert!(matches!(
        resolve("TSubclassOf<UWidget>").unwrap(),
        PropertyType::Object {
            kind: ObjectKind::Class,
            ..
        }
    ));
    assert!(matches!(
        resolve("TScriptInterface<IClickable>").unwrap(),
        PropertyType::Interface { .. }
    ));
    assert!(matches!(
        resolve("TEnumAsByte<EColor::Type>").unwrap(),
        PropertyType::Enum {
            underlying: Some(IntKind::UInt8),
            ..
        }
    ));
    assert!(matches!(
        resolve("UClass*").unwrap(),
        PropertyType::Object {
            kind: ObjectKind::Class,
            ..
        }
    ));
}

#[test]
fn test_resolve_declared_types() {
    assert!(matches!(
        resolve("UWidget*").unwrap(),
        PropertyType::Object {
            kind: ObjectKind::Raw,
            ..
        }
    ));
    assert!(matches!(
        resolve("FLayout").unwrap(),
        PropertyType::Struct { .. }
    ));
    assert!(resolve("FOnClicked").unwrap().is_multicast_delegate());
}

#[test]
fn test_resolve_errors() {
    assert_eq!(resolve("UMissing*").unwrap_err().code, ErrorCode::E3001);
    assert_eq!(resolve("UWidget").unwrap_err().code, ErrorCode::E3008);
    assert_eq!(resolve("IClickable*").unwrap_err().code, ErrorCode::E3008);
    assert_eq!(resolve("FLayout*").unwrap_err().code, ErrorCode::E3002);
    assert_eq!(resolve("TArray<TArray<int32>>").unwrap_err().code, ErrorCode::E3006);
    assert_eq!(resolve("int32 int32").unwrap_err().code, ErrorCode::E3003);
}

#[test]
fn test_leading_qualifiers_before_builtin_type() {
    let (parsed, diagnostics) = member("mutable int32 Count;");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(parsed.decl.ty, PropertyType::Int(IntKind::Int32));
    let (parsed, diagnostics) = member("unsigned int Mask;");
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    assert_eq!(parsed.name, "Mask");
    assert_eq!(parsed.decl.ty, PropertyType::Int(IntKind::UInt32));
    assert!(matches!(
        resolve("mutable FLayout").unwrap(),
        PropertyType::Struct { .. }
    ));
}

#[test]
fn test_resolve_at_parse_only_for_builtins() {
    assert_eq!(
        resolve_at_parse(&tokens("const FName")),
        Some(Ok(PropertyType::Name))
    );
    assert_eq!(resolve_at_parse(&tokens("TArray<int32>")), None);
    assert_eq!(resolve_at_parse(&tokens("UWidget*")), None);
}
