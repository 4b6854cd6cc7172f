//! Resolve-properties phase: every deferred property type is looked up in
//! the finished type table.

use tracing::trace;
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::join_tokens;
use uht_types::{HeaderFile, NodeId, PropertyType, TypeTable};

use crate::property::{bitfield_type, resolve_type};

/// Resolve every [`PropertyType::Unresolved`] in `header`.
///
/// Failures are reported on the header and leave a
/// [`PropertyType::Unknown`] holding the written type.
#[tracing::instrument(level = "debug", skip_all, fields(header = %header.path))]
pub fn resolve_properties(header: &mut HeaderFile, types: &TypeTable) {
    let pending: Vec<NodeId> = header
        .node_ids()
        .filter(|&id| {
            header
                .node(id)
                .as_property()
                .is_some_and(|property| property.ty.is_unresolved())
        })
        .collect();
    trace!(count = pending.len(), "resolving property types");

    for id in pending {
        let context = header
            .node(id)
            .outer
            .map(|outer| header.node(outer).context());
        let node = header.node_mut(id);
        let name = node.source_name.clone();
        let line = node.line;
        let Some(property) = node.as_property_mut() else {
            continue;
        };
        let PropertyType::Unresolved(tokens) = &property.ty else {
            continue;
        };

        let mut diagnostics = Vec::new();
        let resolved = match resolve_type(tokens, types) {
            Ok(ty) => ty,
            Err(err) => {
                diagnostics.push(err.to_diagnostic());
                PropertyType::Unknown(join_tokens(tokens))
            }
        };
        property.ty = if property.is_bitfield {
            bitfield_type(resolved).unwrap_or_else(|ty| {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E3004)
                        .with_message(format!(
                            "Bit-field '{name}' must be bool or an unsigned integer, not '{}'",
                            ty.cpp_type()
                        ))
                        .with_line(line),
                );
                ty
            })
        } else {
            resolved
        };

        for diagnostic in diagnostics {
            let diagnostic = match &context {
                Some(context) => diagnostic.with_context(context.clone()),
                None => diagnostic,
            };
            header.push_diagnostic(diagnostic);
        }
    }
}
