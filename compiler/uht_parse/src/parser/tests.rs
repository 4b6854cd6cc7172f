use super::*;
use crate::ModuleKind;
use pretty_assertions::assert_eq;
use uht_types::{
    AccessSpecifier, ClassFlags, EnumCppForm, FunctionExportFlags, HeaderId, IntKind, PropertyFlags,
    PropertyType,
};

fn parse_with(config: &ParseConfig, types: &TypeTable, source: &str) -> HeaderFile {
    parse_header(config, types, HeaderFile::new(HeaderId(0), "Widget.h", source))
}

fn parse(source: &str) -> HeaderFile {
    parse_with(&ParseConfig::default(), &TypeTable::new(), source)
}

fn codes(header: &HeaderFile) -> Vec<ErrorCode> {
    header.diagnostics.iter().map(|d| d.code).collect()
}

fn named(header: &HeaderFile, name: &str) -> NodeId {
    header
        .node_ids()
        .find(|&id| header.node(id).source_name == name)
        .unwrap()
}

const INCLUDE: &str = "#include \"Widget.generated.h\"\n";

#[test]
fn test_class_scenario() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class FOO_API UWidget : public UObject {{ GENERATED_BODY() public: UPROPERTY() int32 Count; }};"
    ));
    assert_eq!(codes(&header), []);
    let class_id = named(&header, "UWidget");
    let class = header.node(class_id);
    assert_eq!(class.engine_name, "Widget");
    let decl = class.as_class().unwrap();
    assert!(decl.flags.contains(ClassFlags::REQUIRED_API | ClassFlags::NATIVE));
    assert_eq!(decl.api.as_deref(), Some("FOO_API"));
    assert_eq!(decl.super_name.as_deref(), Some("UObject"));
    assert_eq!(decl.generated_body_access, Some(AccessSpecifier::Private));

    assert_eq!(class.children.len(), 1);
    let count = header.node(class.children[0]);
    assert_eq!(count.source_name, "Count");
    let property = count.as_property().unwrap();
    assert_eq!(property.ty, PropertyType::Int(IntKind::Int32));
    assert!(property.default_value_tokens.is_empty());
    assert!(property
        .flags
        .contains(PropertyFlags::NATIVE_ACCESS_SPECIFIER_PUBLIC));
}

#[test]
fn test_class_tooltip_and_specifiers() {
    let header = parse(&format!(
        "{INCLUDE}/** A widget. */\nUCLASS(Abstract, Config=Game)\nclass UWidget : public UObject, public IClickable\n{{\n\tGENERATED_BODY()\n}};\n"
    ));
    let node = header.node(named(&header, "UWidget"));
    assert_eq!(node.meta.get("ToolTip"), Some("A widget."));
    let decl = node.as_class().unwrap();
    assert!(decl.flags.contains(ClassFlags::ABSTRACT));
    assert_eq!(decl.config_name.as_deref(), Some("Game"));
    assert_eq!(decl.base_names.as_slice(), ["IClickable".to_owned()]);
}

#[test]
fn test_missing_generated_body() {
    let header = parse(&format!("{INCLUDE}UCLASS() class UWidget : public UObject {{\n}};\n"));
    assert_eq!(codes(&header), [ErrorCode::E1003]);
    assert_eq!(header.diagnostics[0].line, 3);
}

#[test]
fn test_missing_generated_include() {
    let header = parse("USTRUCT() struct FPoint { GENERATED_BODY() };");
    assert_eq!(codes(&header), [ErrorCode::E1012]);
}

#[test]
fn test_include_after_generated() {
    let header = parse(&format!("{INCLUDE}#include \"Other.h\"\n"));
    assert_eq!(codes(&header), [ErrorCode::E5006]);
    assert_eq!(header.includes, ["Widget.generated.h", "Other.h"]);
    assert_eq!(header.generated_include_line, Some(1));
}

#[test]
fn test_enum_scenario() {
    let types = TypeTable::new();
    let header = parse_with(
        &ParseConfig::default(),
        &types,
        &format!("{INCLUDE}UENUM(BlueprintType) enum class EColor : uint8 {{ Red, Green = 5, Blue }};"),
    );
    assert_eq!(codes(&header), []);
    let node = header.node(named(&header, "EColor"));
    let decl = node.as_enum().unwrap();
    assert_eq!(decl.cpp_form, EnumCppForm::EnumClass);
    assert_eq!(decl.underlying_type.as_deref(), Some("uint8"));
    let values: Vec<(&str, i64)> = decl.values.iter().map(|v| (v.name.as_str(), v.value)).collect();
    assert_eq!(values, [("Red", 0), ("Green", 5), ("Blue", 6)]);
    assert_eq!(decl.values[2].full_name, "EColor::Blue");
    assert_eq!(types.enum_value("EColor::Blue").map(|(_, v)| v), Some(6));
    assert!(types.enum_value("Blue").is_none());
}

#[test]
fn test_enum_value_metadata() {
    let header = parse(&format!(
        "{INCLUDE}UENUM()\nenum EMode\n{{\n\t/** First. */\n\tMode_A UMETA(DisplayName=\"A\"),\n\tMode_B = Mode_A,\n\tMode_C = SOME_MACRO + 1,\n\tMode_A,\n}};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::W1005, ErrorCode::E1010]);
    let node = header.node(named(&header, "EMode"));
    assert_eq!(node.meta.get_indexed("DisplayName", 0), Some("A"));
    assert_eq!(node.meta.get_indexed("ToolTip", 0), Some("First."));
    let decl = node.as_enum().unwrap();
    assert_eq!(decl.cpp_form, EnumCppForm::Regular);
    let values: Vec<i64> = decl.values.iter().map(|v| v.value).collect();
    assert_eq!(values, [0, 0, 1]);
    assert_eq!(decl.values[0].full_name, "Mode_A");
}

#[test]
fn test_namespaced_enum() {
    let header = parse(&format!(
        "{INCLUDE}UENUM() namespace ESide {{ enum Type {{ Left = -1, Right = 0x10 }}; }}\n"
    ));
    assert_eq!(codes(&header), []);
    let decl = header.node(named(&header, "ESide")).as_enum().unwrap();
    assert_eq!(decl.cpp_form, EnumCppForm::Namespaced);
    assert_eq!(decl.values[0].value, -1);
    assert_eq!(decl.values[1].value, 16);
    assert_eq!(decl.values[1].full_name, "ESide::Right");
}

#[test]
fn test_blueprint_enum_needs_uint8() {
    let header = parse(&format!(
        "{INCLUDE}UENUM(BlueprintType) enum class EBig : int32 {{ A }};"
    ));
    assert_eq!(codes(&header), [ErrorCode::E1009]);
}

#[test]
fn test_native_interface_pairing() {
    let header = parse(&format!(
        "{INCLUDE}UINTERFACE() class UClickable : public UInterface {{ GENERATED_BODY() }};\n\
         class IClickable {{ GENERATED_BODY() public: UFUNCTION() virtual void Click(); }};\n\
         class FHelper;\n"
    ));
    assert_eq!(codes(&header), []);
    let interface = named(&header, "UClickable");
    let native = named(&header, "IClickable");
    let interface_decl = header.node(interface).as_class().unwrap();
    assert!(interface_decl.flags.contains(ClassFlags::INTERFACE));
    assert_eq!(interface_decl.alternate_object, Some(header.type_ref(native)));
    let native_node = header.node(native);
    assert_eq!(native_node.engine_name, "Clickable");
    assert_eq!(
        native_node.as_class().unwrap().alternate_object,
        Some(header.type_ref(interface))
    );
    let click = header.node(native_node.children[0]).as_function().unwrap();
    assert!(click.export_flags.contains(FunctionExportFlags::VIRTUAL));
}

#[test]
fn test_interface_without_native_class() {
    let header = parse(&format!(
        "{INCLUDE}UINTERFACE() class UClickable : public UInterface {{ GENERATED_BODY() }};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E1013]);
}

#[test]
fn test_function_parameters() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{\n\
         GENERATED_BODY()\n\
         public:\n\
         UFUNCTION(BlueprintCallable)\n\
         static bool Move(const FVector& Target, int32& Steps, float Speed = 1.5f) const;\n\
         UFUNCTION()\n\
         void Reset(int32 Count = 3) {{ }}\n\
         }};\n"
    ));
    assert_eq!(codes(&header), []);
    let widget = header.node(named(&header, "UWidget"));
    let [move_id, reset_id] = widget.children[..] else {
        panic!("expected two functions");
    };
    let move_node = header.node(move_id);
    let decl = move_node.as_function().unwrap();
    assert!(decl.flags.contains(
        FunctionFlags::STATIC
            | FunctionFlags::CONST
            | FunctionFlags::PUBLIC
            | FunctionFlags::HAS_OUT_PARMS
            | FunctionFlags::HAS_DEFAULTS
    ));
    let names: Vec<&str> = move_node
        .children
        .iter()
        .map(|&id| header.node(id).source_name.as_str())
        .collect();
    assert_eq!(names, ["Target", "Steps", "Speed", "ReturnValue"]);
    let ret = header.node(decl.return_property.unwrap()).as_property().unwrap();
    assert!(ret.flags.contains(PropertyFlags::RETURN_PARM));
    assert_eq!(ret.ty, PropertyType::Bool { native: true });
    let steps = header.node(move_node.children[1]).as_property().unwrap();
    assert!(steps.flags.contains(PropertyFlags::OUT_PARM));

    let reset = header.node(reset_id);
    assert!(!reset
        .as_function()
        .unwrap()
        .flags
        .contains(FunctionFlags::HAS_DEFAULTS));
    let count = header.node(reset.children[0]).as_property().unwrap();
    assert!(count.default_value_tokens.is_empty());
}

#[test]
fn test_net_function_names() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{ GENERATED_BODY()\n\
         UFUNCTION(Server, Reliable, WithValidation) void Fire();\n}};"
    ));
    let decl = header.node(named(&header, "Fire")).as_function().unwrap();
    assert_eq!(decl.cpp_impl_name.as_deref(), Some("Fire_Implementation"));
    assert_eq!(decl.cpp_validate_name.as_deref(), Some("Fire_Validate"));
    assert!(decl.flags.contains(FunctionFlags::PRIVATE));
}

#[test]
fn test_delegate_macros() {
    let types = TypeTable::new();
    let header = parse_with(
        &ParseConfig::default(),
        &types,
        &format!(
            "{INCLUDE}DECLARE_DYNAMIC_MULTICAST_DELEGATE_OneParam(FOnClicked, int32, Button);\n\
             DECLARE_DYNAMIC_DELEGATE_RetVal_TwoParams(bool, FFilter, const FString&, Name, int32, Index);\n"
        ),
    );
    assert_eq!(codes(&header), []);
    let clicked = header.node(named(&header, "FOnClicked"));
    assert_eq!(clicked.engine_name, "OnClicked__DelegateSignature");
    assert!(clicked
        .as_function()
        .unwrap()
        .flags
        .contains(FunctionFlags::DELEGATE | FunctionFlags::MULTICAST_DELEGATE));
    assert_eq!(
        types.lookup("FOnClicked").map(|entry| entry.kind),
        Some(TypeKind::Delegate { multicast: true })
    );

    let filter = header.node(named(&header, "FFilter"));
    let names: Vec<&str> = filter
        .children
        .iter()
        .map(|&id| header.node(id).source_name.as_str())
        .collect();
    assert_eq!(names, ["Name", "Index", "ReturnValue"]);
}

#[test]
fn test_delegate_macro_mismatch() {
    let header = parse(&format!(
        "{INCLUDE}DECLARE_DYNAMIC_DELEGATE_TwoParams(FOnDone, int32, Code);\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E1004]);
}

#[test]
fn test_recorded_declarations() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{\n\
         GENERATED_BODY()\n\
         public:\n\
         UWidget(const FObjectInitializer& ObjectInitializer);\n\
         virtual void Serialize(FArchive& Ar) override;\n\
         int32 NotReflected = 0;\n\
         }};\n"
    ));
    assert_eq!(codes(&header), []);
    let decl = header.node(named(&header, "UWidget")).as_class().unwrap();
    let lines: Vec<u32> = decl.declarations.iter().map(|d| d.line).collect();
    assert_eq!(lines, [5, 6, 7]);
    assert_eq!(decl.declarations[0].tokens[0].text, "UWidget");
    assert_eq!(decl.declarations[0].tokens.last().unwrap().text, ";");
}

#[test]
fn test_unknown_macros_are_skipped() {
    let header = parse(&format!(
        "{INCLUDE}PRAGMA_DISABLE_DEPRECATION_WARNINGS\n\
         DECLARE_LOG_CATEGORY_EXTERN(LogWidget, Log, All)\n\
         USTRUCT() struct FPoint {{ GENERATED_BODY() }};\n"
    ));
    assert_eq!(codes(&header), []);
    assert!(header.find_child(header.root(), "FPoint").is_some());
}

#[test]
fn test_unclaimed_macro_falls_through_catch_alls() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{\n\
         GENERATED_BODY()\n\
         WIDGET_EXTRA_MEMBERS\n\
         UPROPERTY() int32 Count;\n\
         DECLARE_DYNAMIC_DELEGATE(FOnPoke);\n\
         }};\n"
    ));
    assert_eq!(codes(&header), []);
    let class_id = named(&header, "UWidget");
    assert!(header.node(class_id).as_class().unwrap().declarations.is_empty());
    assert!(header.find_child(class_id, "Count").is_some());
    assert!(header.find_child(class_id, "FOnPoke").is_some());
}

#[test]
fn test_enum_diagnostics_carry_enum_context() {
    let header = parse(&format!(
        "{INCLUDE}UENUM() enum class EColor : uint8 {{ Red, Red }};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E1010]);
    assert_eq!(header.diagnostics[0].context.as_deref(), Some("enum 'EColor'"));
}

#[test]
fn test_parameter_diagnostics_carry_function_context() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{\n\
         GENERATED_BODY()\n\
         UFUNCTION() void Poke(int32* Amount);\n\
         }};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E3002]);
    assert_eq!(header.diagnostics[0].context.as_deref(), Some("function 'Poke'"));
    assert_eq!(header.diagnostics[0].line, 4);
}

#[test]
fn test_editor_guarded_property() {
    let source = format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{ GENERATED_BODY()\n\
         #if WITH_EDITOR\n\
         UPROPERTY() int32 EditorCount;\n\
         #endif\n\
         }};\n"
    );
    let editor = parse_with(&ParseConfig::default(), &TypeTable::new(), &source);
    assert_eq!(codes(&editor), [ErrorCode::W1002]);
    assert_eq!(editor.diagnostics[0].context.as_deref(), Some("class 'UWidget'"));
    let property = editor.node(named(&editor, "EditorCount")).as_property().unwrap();
    assert!(property.flags.contains(PropertyFlags::EDITOR_ONLY));

    let config = ParseConfig {
        editor: false,
        module_kind: ModuleKind::Runtime,
    };
    let game = parse_with(&config, &TypeTable::new(), &source);
    assert_eq!(codes(&game), [ErrorCode::W1002]);
    assert_eq!(game.diagnostics[0].context.as_deref(), Some("class 'UWidget'"));
    assert!(game
        .node_ids()
        .all(|id| game.node(id).source_name != "EditorCount"));
}

#[test]
fn test_property_in_unrecognized_block() {
    let header = parse(&format!(
        "{INCLUDE}USTRUCT() struct FPoint {{ GENERATED_BODY()\n\
         #if SOME_FEATURE\n\
         UPROPERTY() int32 X;\n\
         #endif\n\
         }};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E5007]);
}

#[test]
fn test_misplaced_macro() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{ GENERATED_BODY()\n\
         UENUM() enum class EInner : uint8 {{ A }};\n\
         }};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E1005]);
    assert_eq!(
        header.diagnostics[0].context.as_deref(),
        Some("class 'UWidget'")
    );
}

#[test]
fn test_duplicate_type() {
    let header = parse(&format!(
        "{INCLUDE}USTRUCT() struct FPoint {{ GENERATED_BODY() }};\nUSTRUCT() struct FPoint {{ GENERATED_BODY() }};\n"
    ));
    assert_eq!(codes(&header), [ErrorCode::E1007]);
}

#[test]
fn test_fatal_error_carries_context() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{ GENERATED_BODY()\n UPROPERTY() int32 Count;\n"
    ));
    let last = header.diagnostics.last().unwrap();
    assert_eq!(last.code, ErrorCode::E0010);
    assert_eq!(last.context.as_deref(), Some("class 'UWidget'"));
}

#[test]
fn test_namespace_and_deprecation() {
    let header = parse(&format!(
        "{INCLUDE}namespace Widgets {{\n\
         UE_DEPRECATED(5.0, \"Use FPoint2\")\n\
         USTRUCT() struct FPoint {{ GENERATED_BODY() UPROPERTY() float X; }};\n\
         }}\n"
    ));
    assert_eq!(codes(&header), []);
    let point = header.find_child(header.root(), "FPoint").unwrap();
    assert_eq!(header.node(point).children.len(), 1);
}

#[test]
fn test_access_specifiers() {
    let header = parse(&format!(
        "{INCLUDE}UCLASS() class UWidget : public UObject {{ GENERATED_BODY()\n\
         UPROPERTY() int32 A;\n\
         protected:\n\
         UPROPERTY() int32 B;\n\
         }};\n"
    ));
    let a = header.node(named(&header, "A")).as_property().unwrap();
    let b = header.node(named(&header, "B")).as_property().unwrap();
    assert!(a.flags.contains(PropertyFlags::NATIVE_ACCESS_SPECIFIER_PRIVATE));
    assert!(b.flags.contains(PropertyFlags::NATIVE_ACCESS_SPECIFIER_PROTECTED));
}
