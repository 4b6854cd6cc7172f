use super::*;
use crate::TokenReplay;
use pretty_assertions::assert_eq;
use uht_types::{
    ClassDecl, ClassFlags, ClassType, FunctionDecl, FunctionFlags, FunctionType, PropertyCategory,
    PropertyDecl, PropertyFlags, PropertyType,
};

fn tokens(source: &str) -> Vec<Token> {
    uht_lexer::lex_fragment(source, 1).unwrap()
}

fn parse_class(source: &str) -> (ClassDecl, MetaData, Vec<Diagnostic>) {
    let captured = tokens(source);
    let mut replay = TokenReplay::new(&captured);
    let mut parser = SpecifierParser::new(&CLASS_SPECIFIERS);
    parser.parse_specifiers(&mut replay).unwrap();
    let mut class = ClassDecl::new(ClassType::Class);
    let mut meta = MetaData::new();
    parser.apply(&mut class, &mut meta);
    (class, meta, parser.take_diagnostics())
}

fn parse_property(source: &str) -> (PropertyDecl, MetaData, Vec<Diagnostic>) {
    let captured = tokens(source);
    let mut replay = TokenReplay::new(&captured);
    let mut parser = SpecifierParser::new(&PROPERTY_SPECIFIERS);
    parser.parse_specifiers(&mut replay).unwrap();
    let mut property = PropertyDecl::new(PropertyCategory::Member, PropertyType::Float);
    let mut meta = MetaData::new();
    parser.apply(&mut property, &mut meta);
    (property, meta, parser.take_diagnostics())
}

#[test]
fn test_class_flags_and_lists() {
    let (class, meta, diagnostics) = parse_class(
        "(Abstract, Config=Game, HideCategories=(Rendering, \"Physics\"), Blueprintable)",
    );
    assert!(diagnostics.is_empty());
    assert!(class.flags.contains(ClassFlags::ABSTRACT));
    assert_eq!(class.config_name.as_deref(), Some("Game"));
    assert_eq!(class.categories.hide, ["Rendering", "Physics"]);
    assert_eq!(meta.get("IsBlueprintBase"), Some("true"));
    assert_eq!(meta.get("BlueprintType"), Some("true"));
}

#[test]
fn test_names_are_case_insensitive() {
    let (class, _, diagnostics) = parse_class("(abstract, notplaceable)");
    assert!(diagnostics.is_empty());
    assert!(class.flags.contains(ClassFlags::ABSTRACT | ClassFlags::NOT_PLACEABLE));
}

#[test]
fn test_unknown_specifier_is_reported_and_skipped() {
    let (class, _, diagnostics) = parse_class("(Bogus=(A, B), Abstract)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E2001);
    assert_eq!(diagnostics[0].message, "Unknown class specifier 'Bogus'");
    assert_eq!(diagnostics[0].context.as_deref(), Some("Class specifiers"));
    assert!(class.flags.contains(ClassFlags::ABSTRACT));
}

#[test]
fn test_meta_pairs() {
    let (_, meta, _) = parse_class("(meta=(DisplayName=\"My Widget\", IsHidden))");
    assert_eq!(meta.get("DisplayName"), Some("My Widget"));
    assert_eq!(meta.get("IsHidden"), Some("true"));
}

#[test]
fn test_value_shape_errors_are_fatal() {
    let captured = tokens("(Abstract=1)");
    let mut replay = TokenReplay::new(&captured);
    let mut parser = SpecifierParser::new(&CLASS_SPECIFIERS);
    let err = parser.parse_specifiers(&mut replay).unwrap_err();
    assert_eq!(err.code, ErrorCode::E2002);

    let captured = tokens("(Config=(A, B))");
    let mut replay = TokenReplay::new(&captured);
    let mut parser = SpecifierParser::new(&CLASS_SPECIFIERS);
    let err = parser.parse_specifiers(&mut replay).unwrap_err();
    assert_eq!(err.message, "Specifier 'Config' must be given exactly one value");
}

#[test]
fn test_deferred_runs_after_immediate() {
    // BlueprintPure=false must see BlueprintCallable already applied.
    let captured = tokens("(BlueprintPure=false, BlueprintCallable)");
    let mut replay = TokenReplay::new(&captured);
    let mut parser = SpecifierParser::new(&FUNCTION_SPECIFIERS);
    parser.parse_specifiers(&mut replay).unwrap();
    let mut function = FunctionDecl::new(FunctionType::Function);
    let mut meta = MetaData::new();
    parser.dispatch(&mut function, &mut meta);
    assert!(!function.flags.contains(FunctionFlags::BLUEPRINT_PURE));
    parser.parse_deferred(&mut function, &mut meta);
    assert!(function.flags.contains(FunctionFlags::BLUEPRINT_CALLABLE));
    assert!(!function.flags.contains(FunctionFlags::BLUEPRINT_PURE));
}

#[test]
fn test_within_rejected_on_interface() {
    let captured = tokens("(Within=Outer)");
    let mut replay = TokenReplay::new(&captured);
    let mut parser = SpecifierParser::new(&CLASS_SPECIFIERS);
    parser.parse_specifiers(&mut replay).unwrap();
    let mut interface = ClassDecl::new(ClassType::Interface);
    let mut meta = MetaData::new();
    parser.apply(&mut interface, &mut meta);
    let diagnostics = parser.take_diagnostics();
    assert_eq!(diagnostics[0].code, ErrorCode::E2005);
    assert_eq!(interface.within_name, None);
}

#[test]
fn test_multiple_edit_specifiers() {
    let (property, _, diagnostics) = parse_property("(EditAnywhere, VisibleAnywhere)");
    assert_eq!(diagnostics.len(), 1);
    assert_eq!(diagnostics[0].code, ErrorCode::E6010);
    assert!(property.flags.contains(PropertyFlags::EDIT));
    assert!(!property.flags.contains(PropertyFlags::EDIT_CONST));
}

#[test]
fn test_read_only_read_write_conflict() {
    let (_, _, diagnostics) = parse_property("(BlueprintReadOnly, BlueprintReadWrite)");
    assert_eq!(diagnostics[0].code, ErrorCode::E6013);
    let (_, _, diagnostics) = parse_property("(BlueprintReadWrite, BlueprintReadOnly)");
    assert_eq!(diagnostics[0].code, ErrorCode::E6013);
}

#[test]
fn test_replicated_using() {
    let (property, _, _) = parse_property("(ReplicatedUsing=OnRep_Health, Category=\"Stats\")");
    assert!(property.flags.contains(PropertyFlags::NET | PropertyFlags::REP_NOTIFY));
    assert_eq!(property.rep_notify.as_deref(), Some("OnRep_Health"));
}

#[test]
fn test_field_metadata_indexed_and_verbatim() {
    let captured = tokens("UMETA(DisplayName=\"Say \\\"Hi\\\"\", Hidden),");
    let mut replay = TokenReplay::new(&captured);
    let mut meta = MetaData::new();
    assert!(parse_field_metadata(&mut replay, &mut meta, Some(2)).unwrap());
    assert_eq!(meta.get_indexed("DisplayName", 2), Some("Say \\\"Hi\\\""));
    assert_eq!(meta.get_indexed("Hidden", 2), Some("true"));
    assert!(replay.check_symbol(",").unwrap());
}

#[test]
fn test_empty_field_metadata_is_fatal() {
    let captured = tokens("UMETA()");
    let mut replay = TokenReplay::new(&captured);
    let mut meta = MetaData::new();
    let err = parse_field_metadata(&mut replay, &mut meta, None).unwrap_err();
    assert_eq!(err.code, ErrorCode::E2004);

    let captured = tokens("Red = 1");
    let mut replay = TokenReplay::new(&captured);
    assert!(!parse_field_metadata(&mut replay, &mut meta, None).unwrap());
}
