//! Resolve-final phase: recorded declarations, replication export flags,
//! static-array dimensions and script default values.

use tracing::{debug, trace};
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_types::{
    ClassExportFlags, CompilerDirective, ConstructorFlags, FunctionFlags, HeaderFile, NodeId,
    PropertyFlags, PropertyType, SerializerArchive, TypeTable,
};

use crate::{match_declaration, sanitize_default, RecordedMatch};

/// Casts tolerated around a static-array dimension.
const DIMENSION_CASTS: &[&str] = &["(int32)", "(uint32)", "(int)", "(uint8)"];

/// Finish every class, property and function in `header`.
#[tracing::instrument(level = "debug", skip_all, fields(header = %header.path))]
pub fn resolve_final(header: &mut HeaderFile, types: &TypeTable) {
    let ids: Vec<NodeId> = header.node_ids().collect();
    for &id in &ids {
        let node = header.node(id);
        if node.as_class().is_some() {
            finish_class(header, id);
        } else if node.as_property().is_some() {
            finish_array_dimension(header, id, types);
        } else if node
            .as_function()
            .is_some_and(|function| function.flags.intersects(FunctionFlags::SCRIPT_CALLABLE))
        {
            finish_default_values(header, id);
        }
    }
}

fn finish_class(header: &mut HeaderFile, id: NodeId) {
    let node = header.node(id);
    let Some(class) = node.as_class() else {
        return;
    };
    let context = node.context();
    let replicated = node.children.iter().any(|&child| {
        header
            .node(child)
            .as_property()
            .is_some_and(|property| property.flags.contains(PropertyFlags::NET))
    });

    let mut constructors = ConstructorFlags::empty();
    let mut serializer = SerializerArchive::empty();
    let mut serializer_directive = CompilerDirective::empty();
    let mut lifetime_props = false;
    let mut diagnostics = Vec::new();
    for declaration in &class.declarations {
        match match_declaration(&declaration.tokens, &node.source_name) {
            Some(RecordedMatch::Constructor(kind)) => constructors |= kind,
            Some(RecordedMatch::Serializer(archive)) => {
                let outside = declaration
                    .directive
                    .difference(CompilerDirective::ALLOWED_FOR_SERIALIZERS);
                if outside.is_empty() {
                    serializer |= archive;
                    serializer_directive |= declaration.directive;
                } else {
                    diagnostics.push(
                        Diagnostic::error(ErrorCode::E5009)
                            .with_message(
                                "Serialize may only be declared inside WITH_EDITORONLY_DATA blocks",
                            )
                            .with_line(declaration.line)
                            .with_context(context.clone()),
                    );
                }
            }
            Some(RecordedMatch::LifetimeReplicatedProps) => lifetime_props = true,
            None => {}
        }
    }
    trace!(class = %node.source_name, ?constructors, ?serializer, "recorded declarations matched");

    if let Some(class) = header.node_mut(id).as_class_mut() {
        class.constructors = constructors;
        class.serializer = serializer;
        class.serializer_directive = serializer_directive;
        if lifetime_props {
            class.export_flags |= ClassExportFlags::HAS_GET_LIFETIME_REPLICATED_PROPS;
        }
        if replicated {
            class.export_flags |= ClassExportFlags::HAS_REPLICATED_PROPERTIES;
        }
    }
    for diagnostic in diagnostics {
        header.push_diagnostic(diagnostic);
    }
}

/// Record `ArraySizeEnum` when the dimension names an enumerator.
fn finish_array_dimension(header: &mut HeaderFile, id: NodeId, types: &TypeTable) {
    let Some(dimension) = header
        .node(id)
        .as_property()
        .and_then(|property| property.array_dimensions.as_deref())
    else {
        return;
    };
    let dimension = strip_dimension(dimension);
    let Some((owner, _)) = types.enum_value(dimension) else {
        return;
    };
    let enum_name = match dimension.split_once("::") {
        Some((prefix, _)) => Some(prefix.to_owned()),
        None => types.name_of(owner),
    };
    if let Some(enum_name) = enum_name {
        trace!(%dimension, %enum_name, "array sized by enum");
        header.node_mut(id).meta.add("ArraySizeEnum", enum_name);
    }
}

/// Dimension text without enclosing parentheses or integer casts.
pub(super) fn strip_dimension(mut text: &str) -> &str {
    loop {
        let trimmed = text.trim();
        if let Some(inner) = trimmed
            .strip_prefix("static_cast<")
            .and_then(|rest| rest.split_once(">("))
            .and_then(|(_, rest)| rest.strip_suffix(')'))
        {
            text = inner;
        } else if let Some(rest) = DIMENSION_CASTS
            .iter()
            .find_map(|cast| trimmed.strip_prefix(cast))
        {
            text = rest;
        } else if let Some(inner) = trimmed
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
        {
            text = inner;
        } else {
            return trimmed;
        }
    }
}

/// Sanitize parameter defaults into `CPP_Default_<Param>` metadata.
fn finish_default_values(header: &mut HeaderFile, id: NodeId) {
    let node = header.node(id);
    let context = node.context();
    let mut defaults = Vec::new();
    let mut diagnostics = Vec::new();
    for &child in &node.children {
        let param = header.node(child);
        let Some(property) = param.as_property() else {
            continue;
        };
        if !property.category.is_parameter() || property.default_value_tokens.is_empty() {
            continue;
        }
        if matches!(
            property.ty,
            PropertyType::Unknown(_) | PropertyType::Unresolved(_)
        ) {
            continue;
        }
        match sanitize_default(&property.ty, &property.default_value_tokens) {
            Some(value) => defaults.push((format!("CPP_Default_{}", param.source_name), value)),
            None => diagnostics.push(
                Diagnostic::warning(ErrorCode::W1001)
                    .with_message(format!(
                        "Default value of parameter '{}' could not be converted for type '{}'",
                        param.source_name,
                        property.ty.cpp_type()
                    ))
                    .with_line(param.line)
                    .with_context(context.clone()),
            ),
        }
    }
    if !defaults.is_empty() {
        debug!(function = %node.source_name, count = defaults.len(), "parameter defaults");
    }

    let node = header.node_mut(id);
    for (key, value) in defaults {
        node.meta.add(key, value);
    }
    for diagnostic in diagnostics {
        header.push_diagnostic(diagnostic);
    }
}
