//! Specifier tables for each declaration kind.

use uht_diagnostic::ErrorCode;
use uht_types::{
    ClassDecl, ClassFlags, EnumDecl, EnumFlags, FunctionDecl, FunctionExportFlags,
    FunctionFlags, MetaData, PropertyDecl, PropertyExportFlags, PropertyFlags, StructDecl,
    StructFlags,
};

use super::{
    add_meta_pairs, Specifier, SpecifierError, SpecifierOutcome, SpecifierTable, SpecifierValue,
    ValueShape,
};

type HandlerResult = Result<SpecifierOutcome, SpecifierError>;

const fn spec<D>(
    name: &'static str,
    shape: ValueShape,
    handler: super::SpecifierHandler<D>,
) -> Specifier<D> {
    Specifier {
        name,
        shape,
        deferred: false,
        handler,
    }
}

const fn deferred<D>(
    name: &'static str,
    shape: ValueShape,
    handler: super::SpecifierHandler<D>,
) -> Specifier<D> {
    Specifier {
        name,
        shape,
        deferred: true,
        handler,
    }
}

/// Define a handler body; the outcome is `Handled` unless the body returns.
macro_rules! handler {
    ($name:ident: $decl:ty, |$d:ident, $m:ident, $v:ident| $body:block) => {
        #[allow(unused_variables)]
        fn $name($d: &mut $decl, $m: &mut MetaData, $v: &SpecifierValue) -> HandlerResult {
            $body
            Ok(SpecifierOutcome::Handled)
        }
    };
}

fn required_str(value: &SpecifierValue) -> Result<&str, SpecifierError> {
    value
        .as_str()
        .ok_or_else(|| SpecifierError::invalid("Expected a single value"))
}

// Class

handler!(class_meta: ClassDecl, |c, m, v| { add_meta_pairs(m, v); });
handler!(class_no_export: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::NO_EXPORT); });
handler!(class_intrinsic: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::INTRINSIC); });
handler!(class_abstract: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::ABSTRACT); });
handler!(class_const: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::CONST); });
handler!(class_optional: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::OPTIONAL); });
handler!(class_transient: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::TRANSIENT); });
handler!(class_non_transient: ClassDecl, |c, m, v| { c.remove_flags(ClassFlags::TRANSIENT); });
handler!(class_hidden: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::HIDDEN); });
handler!(class_hide_dropdown: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::HIDE_DROP_DOWN); });
handler!(class_minimal_api: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::MINIMAL_API); });
handler!(class_custom_constructor: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::CUSTOM_CONSTRUCTOR);
});
handler!(class_edit_inline_new: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::EDIT_INLINE_NEW);
});
handler!(class_not_edit_inline_new: ClassDecl, |c, m, v| {
    c.remove_flags(ClassFlags::EDIT_INLINE_NEW);
});
handler!(class_placeable: ClassDecl, |c, m, v| { c.remove_flags(ClassFlags::NOT_PLACEABLE); });
handler!(class_not_placeable: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::NOT_PLACEABLE); });
handler!(class_default_to_instanced: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::DEFAULT_TO_INSTANCED);
});
handler!(class_deprecated: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::DEPRECATED | ClassFlags::NOT_PLACEABLE);
});
handler!(class_collapse_categories: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::COLLAPSE_CATEGORIES);
});
handler!(class_dont_collapse_categories: ClassDecl, |c, m, v| {
    c.remove_flags(ClassFlags::COLLAPSE_CATEGORIES);
});
handler!(class_per_object_config: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::PER_OBJECT_CONFIG);
});
handler!(class_config_do_not_check_defaults: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::CONFIG_DO_NOT_CHECK_DEFAULTS);
});
handler!(class_default_config: ClassDecl, |c, m, v| { c.add_flags(ClassFlags::DEFAULT_CONFIG); });
handler!(class_global_user_config: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::GLOBAL_USER_CONFIG);
});
handler!(class_project_user_config: ClassDecl, |c, m, v| {
    c.add_flags(ClassFlags::PROJECT_USER_CONFIG);
});
handler!(class_config: ClassDecl, |c, m, v| {
    c.config_name = Some(required_str(v)?.to_owned());
});
handler!(class_within: ClassDecl, |c, m, v| {
    if c.is_interface() {
        return Err(SpecifierError::invalid("Interfaces cannot use 'Within'"));
    }
    c.within_name = Some(required_str(v)?.to_owned());
});
handler!(class_depends_on: ClassDecl, |c, m, v| {});
handler!(class_show_categories: ClassDecl, |c, m, v| {
    c.categories.show.extend(v.to_list());
});
handler!(class_hide_categories: ClassDecl, |c, m, v| {
    c.categories.hide.extend(v.to_list());
});
handler!(class_show_functions: ClassDecl, |c, m, v| {
    c.categories.show_functions.extend(v.to_list());
});
handler!(class_hide_functions: ClassDecl, |c, m, v| {
    c.categories.hide_functions.extend(v.to_list());
});
handler!(class_auto_expand: ClassDecl, |c, m, v| {
    c.categories.auto_expand.extend(v.to_list());
});
handler!(class_auto_collapse: ClassDecl, |c, m, v| {
    c.categories.auto_collapse.extend(v.to_list());
});
handler!(class_dont_auto_collapse: ClassDecl, |c, m, v| {
    c.categories.dont_auto_collapse.extend(v.to_list());
});
handler!(class_group: ClassDecl, |c, m, v| { c.categories.class_group.extend(v.to_list()); });
handler!(class_prioritize: ClassDecl, |c, m, v| {
    c.categories.prioritize.extend(v.to_list());
});
handler!(class_sparse_data: ClassDecl, |c, m, v| { c.sparse_data_types.extend(v.to_list()); });
handler!(class_advanced_display: ClassDecl, |c, m, v| { m.add("AdvancedClassDisplay", "true"); });
handler!(class_conversion_root: ClassDecl, |c, m, v| { m.add("IsConversionRoot", "true"); });
handler!(class_component_wrapper: ClassDecl, |c, m, v| {
    m.add("IgnoreCategoryKeywordsInSubclasses", "true");
});
handler!(class_experimental: ClassDecl, |c, m, v| { m.add("DevelopmentStatus", "Experimental"); });
handler!(class_early_access: ClassDecl, |c, m, v| { m.add("DevelopmentStatus", "EarlyAccess"); });
handler!(class_blueprintable: ClassDecl, |c, m, v| {
    m.add("IsBlueprintBase", "true");
    m.add("BlueprintType", "true");
});
handler!(class_not_blueprintable: ClassDecl, |c, m, v| {
    m.add("IsBlueprintBase", "false");
    m.remove("BlueprintType");
});
handler!(class_blueprint_type: ClassDecl, |c, m, v| { m.add("BlueprintType", "true"); });
handler!(class_not_blueprint_type: ClassDecl, |c, m, v| {
    m.add("NotBlueprintType", "true");
    m.remove("BlueprintType");
});

pub static CLASS_SPECIFIERS: SpecifierTable<ClassDecl> = SpecifierTable {
    label: "Class",
    entries: &[
        spec("meta", ValueShape::KeyValueList, class_meta),
        spec("NoExport", ValueShape::None, class_no_export),
        spec("Intrinsic", ValueShape::None, class_intrinsic),
        spec("ComponentWrapperClass", ValueShape::None, class_component_wrapper),
        deferred("Within", ValueShape::SingleString, class_within),
        spec("EditInlineNew", ValueShape::None, class_edit_inline_new),
        spec("NotEditInlineNew", ValueShape::None, class_not_edit_inline_new),
        spec("Placeable", ValueShape::None, class_placeable),
        spec("NotPlaceable", ValueShape::None, class_not_placeable),
        spec("DefaultToInstanced", ValueShape::None, class_default_to_instanced),
        spec("HideDropdown", ValueShape::None, class_hide_dropdown),
        spec("Hidden", ValueShape::None, class_hidden),
        spec("DependsOn", ValueShape::StringList, class_depends_on),
        spec("MinimalAPI", ValueShape::None, class_minimal_api),
        spec("Const", ValueShape::None, class_const),
        spec("PerObjectConfig", ValueShape::None, class_per_object_config),
        spec("ConfigDoNotCheckDefaults", ValueShape::None, class_config_do_not_check_defaults),
        spec("Abstract", ValueShape::None, class_abstract),
        spec("Deprecated", ValueShape::None, class_deprecated),
        spec("Transient", ValueShape::None, class_transient),
        spec("NonTransient", ValueShape::None, class_non_transient),
        spec("Optional", ValueShape::None, class_optional),
        spec("CustomConstructor", ValueShape::None, class_custom_constructor),
        spec("Config", ValueShape::SingleString, class_config),
        spec("DefaultConfig", ValueShape::None, class_default_config),
        spec("GlobalUserConfig", ValueShape::None, class_global_user_config),
        spec("ProjectUserConfig", ValueShape::None, class_project_user_config),
        spec("ShowCategories", ValueShape::StringList, class_show_categories),
        spec("HideCategories", ValueShape::StringList, class_hide_categories),
        spec("ShowFunctions", ValueShape::StringList, class_show_functions),
        spec("HideFunctions", ValueShape::StringList, class_hide_functions),
        spec("AutoExpandCategories", ValueShape::StringList, class_auto_expand),
        spec("AutoCollapseCategories", ValueShape::StringList, class_auto_collapse),
        spec("DontAutoCollapseCategories", ValueShape::StringList, class_dont_auto_collapse),
        spec("CollapseCategories", ValueShape::None, class_collapse_categories),
        spec("DontCollapseCategories", ValueShape::None, class_dont_collapse_categories),
        spec("ClassGroup", ValueShape::StringList, class_group),
        spec("PrioritizeCategories", ValueShape::StringList, class_prioritize),
        spec("SparseClassDataTypes", ValueShape::StringList, class_sparse_data),
        spec("AdvancedClassDisplay", ValueShape::None, class_advanced_display),
        spec("ConversionRoot", ValueShape::None, class_conversion_root),
        spec("Experimental", ValueShape::None, class_experimental),
        spec("EarlyAccessPreview", ValueShape::None, class_early_access),
        spec("Blueprintable", ValueShape::None, class_blueprintable),
        spec("NotBlueprintable", ValueShape::None, class_not_blueprintable),
        spec("BlueprintType", ValueShape::None, class_blueprint_type),
        spec("NotBlueprintType", ValueShape::None, class_not_blueprint_type),
    ],
};

// Struct

handler!(struct_meta: StructDecl, |s, m, v| { add_meta_pairs(m, v); });
handler!(struct_no_export: StructDecl, |s, m, v| { s.flags |= StructFlags::NO_EXPORT; });
handler!(struct_atomic: StructDecl, |s, m, v| { s.flags |= StructFlags::ATOMIC; });
handler!(struct_immutable: StructDecl, |s, m, v| {
    s.flags |= StructFlags::ATOMIC | StructFlags::IMMUTABLE;
});
handler!(struct_blueprint_type: StructDecl, |s, m, v| { m.add("BlueprintType", "true"); });
handler!(struct_internal_use_only: StructDecl, |s, m, v| {
    m.add("BlueprintInternalUseOnly", "true");
    m.add("BlueprintType", "true");
});

pub static STRUCT_SPECIFIERS: SpecifierTable<StructDecl> = SpecifierTable {
    label: "Struct",
    entries: &[
        spec("meta", ValueShape::KeyValueList, struct_meta),
        spec("NoExport", ValueShape::None, struct_no_export),
        spec("Atomic", ValueShape::None, struct_atomic),
        spec("Immutable", ValueShape::None, struct_immutable),
        spec("BlueprintType", ValueShape::None, struct_blueprint_type),
        spec("BlueprintInternalUseOnly", ValueShape::None, struct_internal_use_only),
    ],
};

// Enum

handler!(enum_meta: EnumDecl, |e, m, v| { add_meta_pairs(m, v); });
handler!(enum_flags: EnumDecl, |e, m, v| { e.flags |= EnumFlags::FLAGS; });
handler!(enum_blueprint_type: EnumDecl, |e, m, v| { m.add("BlueprintType", "true"); });

pub static ENUM_SPECIFIERS: SpecifierTable<EnumDecl> = SpecifierTable {
    label: "Enum",
    entries: &[
        spec("meta", ValueShape::KeyValueList, enum_meta),
        spec("Flags", ValueShape::None, enum_flags),
        spec("BlueprintType", ValueShape::None, enum_blueprint_type),
    ],
};

// Function

handler!(function_meta: FunctionDecl, |f, m, v| { add_meta_pairs(m, v); });
handler!(function_blueprint_callable: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::BLUEPRINT_CALLABLE;
});
handler!(function_blueprint_pure: FunctionDecl, |f, m, v| {
    if v.as_str().is_some_and(|s| s.eq_ignore_ascii_case("false")) {
        f.flags |= FunctionFlags::BLUEPRINT_CALLABLE;
        f.flags &= !FunctionFlags::BLUEPRINT_PURE;
        m.add("BlueprintPure", "false");
    } else {
        f.flags |= FunctionFlags::BLUEPRINT_CALLABLE | FunctionFlags::BLUEPRINT_PURE;
    }
});
handler!(function_implementable_event: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::EVENT | FunctionFlags::BLUEPRINT_EVENT;
});
handler!(function_native_event: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::EVENT | FunctionFlags::BLUEPRINT_EVENT;
    f.export_flags |= FunctionExportFlags::NATIVE_EVENT;
});
handler!(function_sealed_event: FunctionDecl, |f, m, v| {
    f.export_flags |= FunctionExportFlags::SEALED_EVENT;
});
handler!(function_exec: FunctionDecl, |f, m, v| { f.flags |= FunctionFlags::EXEC; });
handler!(function_server: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::NET | FunctionFlags::NET_SERVER;
    if let Some(name) = v.as_str() {
        f.cpp_impl_name = Some(name.to_owned());
    }
});
handler!(function_client: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::NET | FunctionFlags::NET_CLIENT;
    if let Some(name) = v.as_str() {
        f.cpp_impl_name = Some(name.to_owned());
    }
});
handler!(function_net_multicast: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::NET | FunctionFlags::NET_MULTICAST;
});
handler!(function_reliable: FunctionDecl, |f, m, v| { f.flags |= FunctionFlags::NET_RELIABLE; });
handler!(function_unreliable: FunctionDecl, |f, m, v| {
    f.export_flags |= FunctionExportFlags::UNRELIABLE;
});
handler!(function_with_validation: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::NET_VALIDATE;
    if let Some(name) = v.as_str() {
        f.cpp_validate_name = Some(name.to_owned());
    }
});
handler!(function_authority_only: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::BLUEPRINT_AUTHORITY_ONLY;
});
handler!(function_cosmetic: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::BLUEPRINT_COSMETIC;
});
handler!(function_custom_thunk: FunctionDecl, |f, m, v| {
    f.export_flags |= FunctionExportFlags::CUSTOM_THUNK;
});
handler!(function_category: FunctionDecl, |f, m, v| { m.add("Category", required_str(v)?); });
handler!(function_call_in_editor: FunctionDecl, |f, m, v| { m.add("CallInEditor", "true"); });
handler!(function_blueprint_getter: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::BLUEPRINT_CALLABLE | FunctionFlags::BLUEPRINT_PURE;
    m.add("BlueprintGetter", "");
});
handler!(function_blueprint_setter: FunctionDecl, |f, m, v| {
    f.flags |= FunctionFlags::BLUEPRINT_CALLABLE;
    m.add("BlueprintSetter", "");
});
handler!(function_internal_use_only: FunctionDecl, |f, m, v| {
    m.add("BlueprintInternalUseOnly", "true");
});

pub static FUNCTION_SPECIFIERS: SpecifierTable<FunctionDecl> = SpecifierTable {
    label: "Function",
    entries: &[
        spec("meta", ValueShape::KeyValueList, function_meta),
        spec("BlueprintCallable", ValueShape::None, function_blueprint_callable),
        deferred("BlueprintPure", ValueShape::OptionalString, function_blueprint_pure),
        spec("BlueprintImplementableEvent", ValueShape::None, function_implementable_event),
        spec("BlueprintNativeEvent", ValueShape::None, function_native_event),
        spec("SealedEvent", ValueShape::None, function_sealed_event),
        spec("Exec", ValueShape::None, function_exec),
        spec("Server", ValueShape::OptionalString, function_server),
        spec("Client", ValueShape::OptionalString, function_client),
        spec("NetMulticast", ValueShape::None, function_net_multicast),
        spec("Reliable", ValueShape::None, function_reliable),
        spec("Unreliable", ValueShape::None, function_unreliable),
        spec("WithValidation", ValueShape::OptionalString, function_with_validation),
        spec("BlueprintAuthorityOnly", ValueShape::None, function_authority_only),
        spec("BlueprintCosmetic", ValueShape::None, function_cosmetic),
        spec("CustomThunk", ValueShape::None, function_custom_thunk),
        spec("Category", ValueShape::String, function_category),
        spec("CallInEditor", ValueShape::None, function_call_in_editor),
        spec("BlueprintGetter", ValueShape::None, function_blueprint_getter),
        spec("BlueprintSetter", ValueShape::None, function_blueprint_setter),
        spec("BlueprintInternalUseOnly", ValueShape::None, function_internal_use_only),
    ],
};

// Property

fn set_edit(p: &mut PropertyDecl, flags: PropertyFlags) -> HandlerResult {
    if p.flags.contains(PropertyFlags::EDIT) {
        return Err(SpecifierError::conflict(
            ErrorCode::E6010,
            "Found more than one edit/visibility specifier and only one is allowed",
        ));
    }
    p.flags |= flags;
    Ok(SpecifierOutcome::Handled)
}

fn property_edit_anywhere(p: &mut PropertyDecl, _: &mut MetaData, _: &SpecifierValue) -> HandlerResult {
    set_edit(p, PropertyFlags::EDIT)
}

fn property_edit_instance_only(
    p: &mut PropertyDecl,
    _: &mut MetaData,
    _: &SpecifierValue,
) -> HandlerResult {
    set_edit(p, PropertyFlags::EDIT | PropertyFlags::DISABLE_EDIT_ON_TEMPLATE)
}

fn property_edit_defaults_only(
    p: &mut PropertyDecl,
    _: &mut MetaData,
    _: &SpecifierValue,
) -> HandlerResult {
    set_edit(p, PropertyFlags::EDIT | PropertyFlags::DISABLE_EDIT_ON_INSTANCE)
}

fn property_visible_anywhere(
    p: &mut PropertyDecl,
    _: &mut MetaData,
    _: &SpecifierValue,
) -> HandlerResult {
    set_edit(p, PropertyFlags::EDIT | PropertyFlags::EDIT_CONST)
}

fn property_visible_instance_only(
    p: &mut PropertyDecl,
    _: &mut MetaData,
    _: &SpecifierValue,
) -> HandlerResult {
    set_edit(
        p,
        PropertyFlags::EDIT | PropertyFlags::EDIT_CONST | PropertyFlags::DISABLE_EDIT_ON_TEMPLATE,
    )
}

fn property_visible_defaults_only(
    p: &mut PropertyDecl,
    _: &mut MetaData,
    _: &SpecifierValue,
) -> HandlerResult {
    set_edit(
        p,
        PropertyFlags::EDIT | PropertyFlags::EDIT_CONST | PropertyFlags::DISABLE_EDIT_ON_INSTANCE,
    )
}

const READ_WRITE_CONFLICT: &str =
    "Cannot specify a property as being both BlueprintReadOnly and BlueprintReadWrite";

handler!(property_read_write: PropertyDecl, |p, m, v| {
    if p.flags.contains(PropertyFlags::BLUEPRINT_READ_ONLY) {
        return Err(SpecifierError::conflict(ErrorCode::E6013, READ_WRITE_CONFLICT));
    }
    p.flags |= PropertyFlags::BLUEPRINT_VISIBLE;
});
handler!(property_read_only: PropertyDecl, |p, m, v| {
    if p.flags.contains(PropertyFlags::BLUEPRINT_VISIBLE)
        && !p.flags.contains(PropertyFlags::BLUEPRINT_READ_ONLY)
    {
        return Err(SpecifierError::conflict(ErrorCode::E6013, READ_WRITE_CONFLICT));
    }
    p.flags |= PropertyFlags::BLUEPRINT_VISIBLE | PropertyFlags::BLUEPRINT_READ_ONLY;
});
handler!(property_blueprint_getter: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::BLUEPRINT_VISIBLE;
    m.add("BlueprintGetter", required_str(v)?);
});
handler!(property_blueprint_setter: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::BLUEPRINT_VISIBLE;
    m.add("BlueprintSetter", required_str(v)?);
});
handler!(property_meta: PropertyDecl, |p, m, v| { add_meta_pairs(m, v); });
handler!(property_category: PropertyDecl, |p, m, v| { m.add("Category", required_str(v)?); });
handler!(property_config: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::CONFIG; });
handler!(property_global_config: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::GLOBAL_CONFIG | PropertyFlags::CONFIG;
});
handler!(property_transient: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::TRANSIENT; });
handler!(property_duplicate_transient: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::DUPLICATE_TRANSIENT;
});
handler!(property_text_export_transient: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::TEXT_EXPORT_TRANSIENT;
});
handler!(property_non_pie_duplicate_transient: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::NON_PIE_DUPLICATE_TRANSIENT;
});
handler!(property_export: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::EXPORT_OBJECT; });
handler!(property_no_clear: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::NO_CLEAR; });
handler!(property_edit_fixed_size: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::EDIT_FIXED_SIZE;
});
handler!(property_replicated: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::NET; });
handler!(property_replicated_using: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::NET | PropertyFlags::REP_NOTIFY;
    p.rep_notify = Some(required_str(v)?.to_owned());
});
handler!(property_not_replicated: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::REP_SKIP; });
handler!(property_interp: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::EDIT | PropertyFlags::BLUEPRINT_VISIBLE | PropertyFlags::INTERP;
});
handler!(property_non_transactional: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::NON_TRANSACTIONAL;
});
handler!(property_instanced: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::PERSISTENT_INSTANCE
        | PropertyFlags::EXPORT_OBJECT
        | PropertyFlags::INSTANCED_REFERENCE;
    m.add("EditInline", "true");
});
handler!(property_blueprint_assignable: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::BLUEPRINT_ASSIGNABLE;
});
handler!(property_blueprint_callable: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::BLUEPRINT_CALLABLE;
});
handler!(property_authority_only: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::BLUEPRINT_AUTHORITY_ONLY;
});
handler!(property_asset_registry_searchable: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::ASSET_REGISTRY_SEARCHABLE;
});
handler!(property_simple_display: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::SIMPLE_DISPLAY;
});
handler!(property_advanced_display: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::ADVANCED_DISPLAY;
});
handler!(property_save_game: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::SAVE_GAME; });
handler!(property_skip_serialization: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::SKIP_SERIALIZATION;
});
handler!(property_expose_on_spawn: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::EXPOSE_ON_SPAWN;
    m.add("ExposeOnSpawn", "true");
});
handler!(property_getter: PropertyDecl, |p, m, v| {
    match v.as_str() {
        Some(name) if name.eq_ignore_ascii_case("None") => {
            p.export_flags |= PropertyExportFlags::GETTER_NONE;
        }
        name => {
            p.export_flags |= PropertyExportFlags::GETTER_SPECIFIED;
            p.getter = name.map(str::to_owned);
        }
    }
});
handler!(property_setter: PropertyDecl, |p, m, v| {
    match v.as_str() {
        Some(name) if name.eq_ignore_ascii_case("None") => {
            p.export_flags |= PropertyExportFlags::SETTER_NONE;
        }
        name => {
            p.export_flags |= PropertyExportFlags::SETTER_SPECIFIED;
            p.setter = name.map(str::to_owned);
        }
    }
});

pub static PROPERTY_SPECIFIERS: SpecifierTable<PropertyDecl> = SpecifierTable {
    label: "Variable",
    entries: &[
        spec("meta", ValueShape::KeyValueList, property_meta),
        spec("EditAnywhere", ValueShape::None, property_edit_anywhere),
        spec("EditInstanceOnly", ValueShape::None, property_edit_instance_only),
        spec("EditDefaultsOnly", ValueShape::None, property_edit_defaults_only),
        spec("VisibleAnywhere", ValueShape::None, property_visible_anywhere),
        spec("VisibleInstanceOnly", ValueShape::None, property_visible_instance_only),
        spec("VisibleDefaultsOnly", ValueShape::None, property_visible_defaults_only),
        spec("BlueprintReadWrite", ValueShape::None, property_read_write),
        spec("BlueprintReadOnly", ValueShape::None, property_read_only),
        spec("BlueprintGetter", ValueShape::String, property_blueprint_getter),
        spec("BlueprintSetter", ValueShape::String, property_blueprint_setter),
        spec("Category", ValueShape::String, property_category),
        spec("Config", ValueShape::None, property_config),
        spec("GlobalConfig", ValueShape::None, property_global_config),
        spec("Transient", ValueShape::None, property_transient),
        spec("DuplicateTransient", ValueShape::None, property_duplicate_transient),
        spec("TextExportTransient", ValueShape::None, property_text_export_transient),
        spec("NonPIEDuplicateTransient", ValueShape::None, property_non_pie_duplicate_transient),
        spec("Export", ValueShape::None, property_export),
        spec("NoClear", ValueShape::None, property_no_clear),
        spec("EditFixedSize", ValueShape::None, property_edit_fixed_size),
        spec("Replicated", ValueShape::None, property_replicated),
        spec("ReplicatedUsing", ValueShape::String, property_replicated_using),
        spec("NotReplicated", ValueShape::None, property_not_replicated),
        spec("Interp", ValueShape::None, property_interp),
        spec("NonTransactional", ValueShape::None, property_non_transactional),
        spec("Instanced", ValueShape::None, property_instanced),
        spec("BlueprintAssignable", ValueShape::None, property_blueprint_assignable),
        spec("BlueprintCallable", ValueShape::None, property_blueprint_callable),
        spec("BlueprintAuthorityOnly", ValueShape::None, property_authority_only),
        spec("AssetRegistrySearchable", ValueShape::None, property_asset_registry_searchable),
        spec("SimpleDisplay", ValueShape::None, property_simple_display),
        spec("AdvancedDisplay", ValueShape::None, property_advanced_display),
        spec("SaveGame", ValueShape::None, property_save_game),
        spec("SkipSerialization", ValueShape::None, property_skip_serialization),
        spec("ExposeOnSpawn", ValueShape::None, property_expose_on_spawn),
        spec("Getter", ValueShape::OptionalString, property_getter),
        spec("Setter", ValueShape::OptionalString, property_setter),
    ],
};

// Parameter

handler!(param_ref: PropertyDecl, |p, m, v| {
    p.flags |= PropertyFlags::REFERENCE_PARM | PropertyFlags::OUT_PARM;
});
handler!(param_const: PropertyDecl, |p, m, v| { p.flags |= PropertyFlags::CONST_PARM; });
handler!(param_display_name: PropertyDecl, |p, m, v| {
    m.add("DisplayName", required_str(v)?);
});

pub static PARAM_SPECIFIERS: SpecifierTable<PropertyDecl> = SpecifierTable {
    label: "Parameter",
    entries: &[
        spec("meta", ValueShape::KeyValueList, property_meta),
        spec("ref", ValueShape::None, param_ref),
        spec("Const", ValueShape::None, param_const),
        spec("NotReplicated", ValueShape::None, property_not_replicated),
        spec("DisplayName", ValueShape::String, param_display_name),
    ],
};
