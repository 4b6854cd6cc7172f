use super::*;
use crate::{parse_header, ParseConfig};
use pretty_assertions::assert_eq;
use uht_diagnostic::ErrorCode;
use uht_types::{
    ClassExportFlags, ClassFlags, ConstructorFlags, HeaderId, NodeId, PropertyType,
    SerializerArchive, TypeTable,
};

const INTRINSICS: &str = "#include \"NoExportTypes.generated.h\"\n\
    UCLASS() class UObject { GENERATED_BODY() };\n\
    UCLASS() class AActor : public UObject { GENERATED_BODY() };\n\
    UINTERFACE() class UInterface : public UObject { GENERATED_BODY() };\n\
    class IInterface { GENERATED_BODY() };\n\
    USTRUCT() struct FVector { GENERATED_BODY() };\n";

/// Parse `body` as `Widget.h` next to the intrinsic header and run every
/// phase up to validation.
fn session(body: &str) -> (Vec<HeaderFile>, TypeTable) {
    let types = TypeTable::new();
    let config = ParseConfig::default();
    let intrinsics = HeaderFile::new(HeaderId(0), "NoExportTypes.h", INTRINSICS);
    let source = format!("#include \"Widget.generated.h\"\n{body}");
    let widget = HeaderFile::new(HeaderId(1), "Widget.h", source);
    let mut headers = vec![
        parse_header(&config, &types, intrinsics),
        parse_header(&config, &types, widget),
    ];
    bind_bases(&mut headers, &types);
    for header in &mut headers {
        resolve_properties(header, &types);
        resolve_final(header, &types);
    }
    (headers, types)
}

fn codes(headers: &[HeaderFile]) -> Vec<ErrorCode> {
    headers
        .iter()
        .flat_map(|header| header.diagnostics.iter().map(|d| d.code))
        .collect()
}

fn validation_codes(headers: &[HeaderFile]) -> Vec<ErrorCode> {
    headers
        .iter()
        .flat_map(|header| validate(header, headers))
        .map(|d| d.code)
        .collect()
}

fn node<'a>(headers: &'a [HeaderFile], types: &TypeTable, name: &str) -> &'a Node {
    node_at(headers, types.lookup(name).unwrap().id).unwrap()
}

fn member(header: &HeaderFile, name: &str) -> NodeId {
    header
        .node_ids()
        .find(|&id| header.node(id).source_name == name)
        .unwrap()
}

#[test]
fn test_flags_categories_and_config_inherit() {
    let (headers, types) = session(
        "UCLASS(Transient, Config=Game, HideCategories=(Rendering, Physics), AutoExpandCategories=(Movement))\n\
         class UBase : public UObject { GENERATED_BODY() };\n\
         UCLASS(ShowCategories=(Rendering)) class UDerived : public UBase { GENERATED_BODY() };\n\
         UCLASS(NonTransient, Config=Inherit) class UOther : public UBase { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), []);

    let base = types.lookup("UBase").unwrap().id;
    let derived = node(&headers, &types, "UDerived").as_class().unwrap();
    assert_eq!(derived.super_type, Some(base));
    assert!(derived.flags.contains(ClassFlags::TRANSIENT | ClassFlags::CONFIG));
    assert_eq!(derived.config_name.as_deref(), Some("Game"));
    assert_eq!(derived.categories.hide, ["Physics"]);
    assert_eq!(derived.categories.auto_expand, ["Movement"]);
    assert_eq!(derived.within_type, types.lookup("UObject").map(|e| e.id));

    let other = node(&headers, &types, "UOther").as_class().unwrap();
    assert!(!other.flags.contains(ClassFlags::TRANSIENT));
    assert_eq!(other.config_name.as_deref(), Some("Game"));
}

#[test]
fn test_interface_bases() {
    let (headers, types) = session(
        "UINTERFACE() class UClickable : public UInterface { GENERATED_BODY() };\n\
         class IClickable { GENERATED_BODY() };\n\
         UCLASS() class UButton : public UObject, public IClickable, public FTickable { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), []);
    let button = node(&headers, &types, "UButton").as_class().unwrap();
    assert_eq!(button.bases, [types.lookup("IClickable").unwrap().id]);
}

#[test]
fn test_inheritance_cycle() {
    let (headers, types) = session(
        "UCLASS() class UFirst : public USecond { GENERATED_BODY() };\n\
         UCLASS() class USecond : public UFirst { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::E4005]);
    assert_eq!(
        headers[1].diagnostics[0].context.as_deref(),
        Some("class 'USecond'")
    );
    let second = node(&headers, &types, "USecond").as_class().unwrap();
    assert_eq!(second.super_type, None);
    let first = node(&headers, &types, "UFirst").as_class().unwrap();
    assert_eq!(first.super_type, types.lookup("USecond").map(|e| e.id));
}

#[test]
fn test_super_errors() {
    let (headers, _) = session(
        "UCLASS() class UFirst : public UMissing { GENERATED_BODY() };\n\
         UCLASS() class USecond : public UObject, public AActor { GENERATED_BODY() };\n\
         UCLASS() class UThird { GENERATED_BODY() };\n\
         USTRUCT() struct FPoint : public FMissing { GENERATED_BODY() };\n",
    );
    assert_eq!(
        codes(&headers),
        [
            ErrorCode::E4001,
            ErrorCode::E4002,
            ErrorCode::E4007,
            ErrorCode::E4001
        ]
    );
}

#[test]
fn test_placeable_needs_not_placeable_super() {
    let (headers, types) = session(
        "UCLASS(NotPlaceable) class UHidden : public UObject { GENERATED_BODY() };\n\
         UCLASS(Placeable) class UShown : public UHidden { GENERATED_BODY() };\n\
         UCLASS(Placeable) class UAlready : public UObject { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::E4008]);
    assert_eq!(headers[1].diagnostics[0].line, 4);
    let hidden = node(&headers, &types, "UHidden").as_class().unwrap();
    assert!(hidden.flags.contains(ClassFlags::NOT_PLACEABLE));
    let shown = node(&headers, &types, "UShown").as_class().unwrap();
    assert!(!shown.flags.contains(ClassFlags::NOT_PLACEABLE));
}

#[test]
fn test_within() {
    let (headers, types) = session(
        "UCLASS(Within=AActor) class UComponent : public UObject { GENERATED_BODY() };\n\
         UCLASS(Within=UObject) class UBadComponent : public UComponent { GENERATED_BODY() };\n\
         UCLASS() class UChildComponent : public UComponent { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::E4003]);
    let actor = types.lookup("AActor").map(|e| e.id);
    let child = node(&headers, &types, "UChildComponent").as_class().unwrap();
    assert_eq!(child.within_type, actor);
    let bad = node(&headers, &types, "UBadComponent").as_class().unwrap();
    assert_eq!(bad.within_type, actor);
}

#[test]
fn test_config_errors_fall_back_to_engine() {
    let (headers, types) = session(
        "UCLASS() class UPlain : public UObject { GENERATED_BODY()\n\
         UPROPERTY(Config) int32 Value;\n\
         };\n\
         UCLASS(Config=Inherit) class UOrphan : public UObject { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::E4004, ErrorCode::E4006]);
    for name in ["UPlain", "UOrphan"] {
        let class = node(&headers, &types, name).as_class().unwrap();
        assert_eq!(class.config_name.as_deref(), Some("Engine"));
    }
}

#[test]
fn test_name_prefixes() {
    let (headers, _) = session(
        "UCLASS() class AGoodActor : public AActor { GENERATED_BODY() };\n\
         UCLASS() class UBadActor : public AGoodActor { GENERATED_BODY() };\n\
         UCLASS() class ANotActor : public UObject { GENERATED_BODY() };\n\
         USTRUCT() struct Point { GENERATED_BODY() };\n",
    );
    assert_eq!(
        codes(&headers),
        [ErrorCode::E1006, ErrorCode::E1006, ErrorCode::E1006]
    );
}

#[test]
fn test_struct_super() {
    let (headers, types) = session(
        "USTRUCT(Atomic) struct FBase { GENERATED_BODY() };\n\
         USTRUCT() struct FDerived : public FBase { GENERATED_BODY() };\n",
    );
    assert_eq!(codes(&headers), []);
    let derived = node(&headers, &types, "FDerived").as_struct().unwrap();
    assert_eq!(derived.super_type, types.lookup("FBase").map(|e| e.id));
}

#[test]
fn test_property_types_resolve_across_headers() {
    let (headers, _) = session(
        "UCLASS() class UWidget : public UObject { GENERATED_BODY()\n\
         UPROPERTY() FVector Location;\n\
         UPROPERTY() AActor* Owner;\n\
         UPROPERTY() FMissingType Broken;\n\
         UPROPERTY() FVector Flag : 1;\n\
         };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::E3001, ErrorCode::E3004]);
    let header = &headers[1];
    let location = header.node(member(header, "Location")).as_property().unwrap();
    assert!(matches!(location.ty, PropertyType::Struct { ref name, .. } if name == "FVector"));
    let owner = header.node(member(header, "Owner")).as_property().unwrap();
    assert!(owner.ty.is_object_reference());
    let broken = header.node(member(header, "Broken")).as_property().unwrap();
    assert_eq!(broken.ty, PropertyType::Unknown("FMissingType".to_owned()));
    assert_eq!(
        header.diagnostics[0].context.as_deref(),
        Some("class 'UWidget'")
    );
}

#[test]
fn test_recorded_declarations_are_matched() {
    let (headers, types) = session(
        "UCLASS() class UWidget : public UObject { GENERATED_BODY()\n\
         public:\n\
         UWidget(const FObjectInitializer& ObjectInitializer);\n\
         virtual void Serialize(FArchive& Ar) override;\n\
         virtual void GetLifetimeReplicatedProps(TArray<FLifetimeProperty>& OutLifetimeProps) const override;\n\
         UPROPERTY(Replicated) int32 Health;\n\
         };\n",
    );
    assert_eq!(codes(&headers), []);
    let widget = node(&headers, &types, "UWidget").as_class().unwrap();
    assert_eq!(widget.constructors, ConstructorFlags::OBJECT_INITIALIZER);
    assert_eq!(widget.serializer, SerializerArchive::ARCHIVE);
    assert!(widget.export_flags.contains(
        ClassExportFlags::HAS_GET_LIFETIME_REPLICATED_PROPS
            | ClassExportFlags::HAS_REPLICATED_PROPERTIES
    ));
}

#[test]
fn test_serializer_in_editor_block() {
    let (headers, types) = session(
        "UCLASS() class UWidget : public UObject { GENERATED_BODY()\n\
         public:\n\
         #if WITH_EDITOR\n\
         virtual void Serialize(FArchive& Ar) override;\n\
         #endif\n\
         #if WITH_EDITORONLY_DATA\n\
         virtual void Serialize(FStructuredArchive::FRecord Record) override;\n\
         #endif\n\
         };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::E5009]);
    assert_eq!(headers[1].diagnostics[0].line, 5);
    let widget = node(&headers, &types, "UWidget").as_class().unwrap();
    assert_eq!(widget.serializer, SerializerArchive::STRUCTURED_ARCHIVE_RECORD);
}

#[test]
fn test_array_size_enum() {
    let (headers, _) = session(
        "UENUM() enum class ESlot : uint8 { Head, Body, Max };\n\
         UCLASS() class UWidget : public UObject { GENERATED_BODY()\n\
         UPROPERTY() int32 Slots[(int32)ESlot::Max];\n\
         UPROPERTY() int32 Plain[4];\n\
         };\n",
    );
    assert_eq!(codes(&headers), []);
    let header = &headers[1];
    let slots = header.node(member(header, "Slots"));
    assert_eq!(slots.meta.get("ArraySizeEnum"), Some("ESlot"));
    let plain = header.node(member(header, "Plain"));
    assert!(!plain.meta.contains("ArraySizeEnum"));
}

#[test]
fn test_strip_dimension() {
    assert_eq!(finalize::strip_dimension("((int32)EFoo::Max)"), "EFoo::Max");
    assert_eq!(
        finalize::strip_dimension("static_cast<int32>(EFoo::Max)"),
        "EFoo::Max"
    );
    assert_eq!(finalize::strip_dimension(" 8 "), "8");
}

#[test]
fn test_script_default_values() {
    let (headers, _) = session(
        "UCLASS() class UWidget : public UObject { GENERATED_BODY()\n\
         UFUNCTION(BlueprintCallable) void Fire(float Speed = 1.5f, FName Tag = NAME_None, FVector Aim = FVector(1, 2));\n\
         UFUNCTION() void Quiet(int32 Count = 3);\n\
         };\n",
    );
    assert_eq!(codes(&headers), [ErrorCode::W1001]);
    let header = &headers[1];
    let fire = header.node(member(header, "Fire"));
    assert_eq!(fire.meta.get("CPP_Default_Speed"), Some("1.500000"));
    assert_eq!(fire.meta.get("CPP_Default_Tag"), Some("None"));
    assert!(!fire.meta.contains("CPP_Default_Aim"));
    let quiet = header.node(member(header, "Quiet"));
    assert!(!quiet.meta.contains("CPP_Default_Count"));
}

#[test]
fn test_property_validation() {
    let (headers, _) = session(
        "UCLASS() class UBase : public UObject { GENERATED_BODY()\n\
         UPROPERTY() int32 Shared;\n\
         };\n\
         UCLASS(Config=Game) class UWidget : public UBase { GENERATED_BODY()\n\
         UPROPERTY() int32 Shared;\n\
         UPROPERTY() bool Toggles[4];\n\
         UPROPERTY() TArray<int32> Lists[2];\n\
         UPROPERTY(Config) UObject* Target;\n\
         UPROPERTY(BlueprintAssignable) int32 NotADelegate;\n\
         UPROPERTY(EditAnywhere) int32 Old_DEPRECATED;\n\
         UPROPERTY(ExposeOnSpawn) int32 Spawned;\n\
         };\n",
    );
    assert_eq!(codes(&headers), []);
    assert_eq!(
        validation_codes(&headers),
        [
            ErrorCode::E6005,
            ErrorCode::E6003,
            ErrorCode::E6011,
            ErrorCode::E6004,
            ErrorCode::E6012,
            ErrorCode::W1003,
            ErrorCode::W1004,
        ]
    );
    let diagnostics = validate(&headers[1], &headers);
    assert_eq!(diagnostics[0].file.as_deref(), Some("Widget.h"));
    assert_eq!(diagnostics[0].line, 6);
    assert_eq!(diagnostics[0].context.as_deref(), Some("class 'UWidget'"));
}

#[test]
fn test_function_validation() {
    let (headers, _) = session(
        "UCLASS() class UWidget : public UObject { GENERATED_BODY()\n\
         UFUNCTION(Server) void ServerMove();\n\
         UFUNCTION(Client, Reliable) void ClientHit();\n\
         UFUNCTION(NetMulticast, Unreliable) void Burst();\n\
         UFUNCTION(BlueprintPure) void Nothing();\n\
         UFUNCTION(BlueprintPure) int32 Something();\n\
         UFUNCTION(BlueprintImplementableEvent) static void Happened();\n\
         UFUNCTION(BlueprintCallable) void Named(int32 self);\n\
         };\n",
    );
    assert_eq!(codes(&headers), []);
    assert_eq!(
        validation_codes(&headers),
        [
            ErrorCode::E6006,
            ErrorCode::E6007,
            ErrorCode::E6008,
            ErrorCode::E6009
        ]
    );
}
