//! Validate phase: property and function rules that need resolved types
//! and bound super classes.

use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_types::{
    FunctionExportFlags, FunctionFlags, HeaderFile, Node, NodeId, PropertyCategory,
    PropertyDecl, PropertyFlags, TypeRef,
};

use super::node_at;

/// Check every property and function in `header`.
///
/// `headers` is the whole session, indexed by header id, so that super
/// classes in other headers can be searched for shadowed properties.
#[tracing::instrument(level = "debug", skip_all, fields(header = %header.path))]
pub fn validate(header: &HeaderFile, headers: &[HeaderFile]) -> Vec<Diagnostic> {
    let mut validator = Validator {
        header,
        headers,
        diagnostics: Vec::new(),
    };
    for id in header.node_ids() {
        let node = header.node(id);
        if let Some(property) = node.as_property() {
            validator.property(id, node, property);
        } else if node.as_function().is_some() {
            validator.function(node);
        }
    }
    validator
        .diagnostics
        .into_iter()
        .map(|diagnostic| {
            if diagnostic.file.is_none() {
                diagnostic.with_file(header.path.clone())
            } else {
                diagnostic
            }
        })
        .collect()
}

struct Validator<'a> {
    header: &'a HeaderFile,
    headers: &'a [HeaderFile],
    diagnostics: Vec<Diagnostic>,
}

impl Validator<'_> {
    fn report(&mut self, diagnostic: Diagnostic, node: &Node, owner: Option<&Node>) {
        let diagnostic = diagnostic.with_line(node.line);
        let diagnostic = match owner {
            Some(owner) => diagnostic.with_context(owner.context()),
            None => diagnostic,
        };
        self.diagnostics.push(diagnostic);
    }

    fn property(&mut self, id: NodeId, node: &Node, property: &PropertyDecl) {
        let header = self.header;
        let owner = node.outer.map(|outer| header.node(outer));
        let name = &node.source_name;

        if property.array_dimensions.is_some() {
            match property.category {
                PropertyCategory::Return => self.report(
                    Diagnostic::error(ErrorCode::E6001)
                        .with_message("Static arrays cannot be used as return values"),
                    node,
                    owner,
                ),
                category if category.is_parameter() => self.report(
                    Diagnostic::error(ErrorCode::E6002).with_message(format!(
                        "Static array parameter '{name}' is not allowed"
                    )),
                    node,
                    owner,
                ),
                _ => {}
            }
            if property.ty.is_bool() {
                self.report(
                    Diagnostic::error(ErrorCode::E6003)
                        .with_message(format!("Bool static array '{name}' is not allowed")),
                    node,
                    owner,
                );
            }
            if property.ty.is_container() {
                self.report(
                    Diagnostic::error(ErrorCode::E6011).with_message(format!(
                        "Static array of containers '{name}' is not allowed"
                    )),
                    node,
                    owner,
                );
            }
        }

        if property
            .flags
            .intersects(PropertyFlags::CONFIG | PropertyFlags::GLOBAL_CONFIG)
            && property.ty.is_object_reference()
        {
            self.report(
                Diagnostic::error(ErrorCode::E6004).with_message(format!(
                    "'Config' is not allowed on object reference '{name}'"
                )),
                node,
                owner,
            );
        }

        if property.flags.intersects(PropertyFlags::DELEGATE_ONLY)
            && !property.ty.is_multicast_delegate()
        {
            self.report(
                Diagnostic::error(ErrorCode::E6012).with_message(format!(
                    "'{name}' is not a multicast delegate; BlueprintAssignable, \
                     BlueprintCallable and BlueprintAuthorityOnly only apply to delegates"
                )),
                node,
                owner,
            );
        }

        let deprecated = property.flags.contains(PropertyFlags::DEPRECATED);
        if deprecated
            && property
                .flags
                .intersects(PropertyFlags::EDIT | PropertyFlags::BLUEPRINT_VISIBLE)
        {
            self.report(
                Diagnostic::warning(ErrorCode::W1003).with_message(format!(
                    "Deprecated property '{name}' should not be editable or blueprint visible"
                )),
                node,
                owner,
            );
        }

        if property.flags.contains(PropertyFlags::EXPOSE_ON_SPAWN)
            && !property.flags.contains(PropertyFlags::BLUEPRINT_VISIBLE)
        {
            self.report(
                Diagnostic::warning(ErrorCode::W1004).with_message(format!(
                    "ExposeOnSpawn on '{name}' requires it to be blueprint visible"
                )),
                node,
                owner,
            );
        }

        match property.category {
            PropertyCategory::Member if !deprecated => {
                if let Some(scope) = self.shadowed_in(id, name) {
                    self.report(
                        Diagnostic::error(ErrorCode::E6005).with_message(format!(
                            "Property '{name}' shadows a property of the same name in '{scope}'"
                        )),
                        node,
                        owner,
                    );
                }
            }
            category if category.is_parameter() && name.eq_ignore_ascii_case("self") => {
                self.report(
                    Diagnostic::error(ErrorCode::E6009)
                        .with_message("'self' is a reserved name and cannot be used for a parameter"),
                    node,
                    owner,
                );
            }
            _ => {}
        }
    }

    /// Name of the first super class declaring a live property `name`.
    fn shadowed_in(&self, id: NodeId, name: &str) -> Option<String> {
        let owner = self.header.owning_type(id)?;
        let mut next = self.header.node(owner).as_class()?.super_type;
        while let Some(super_ref) = next {
            let super_node = node_at(self.headers, super_ref)?;
            let shadowed = super_node.children.iter().any(|&child| {
                node_at(self.headers, TypeRef::new(super_ref.header, child))
                    .filter(|child| child.source_name == name)
                    .and_then(Node::as_property)
                    .is_some_and(|property| !property.flags.contains(PropertyFlags::DEPRECATED))
            });
            if shadowed {
                return Some(super_node.source_name.clone());
            }
            next = super_node.as_class()?.super_type;
        }
        None
    }

    fn function(&mut self, node: &Node) {
        let Some(function) = node.as_function() else {
            return;
        };
        let header = self.header;
        let owner = node.outer.map(|outer| header.node(outer));
        let name = &node.source_name;

        if function.flags.intersects(FunctionFlags::NET_TARGETS)
            && !function.flags.contains(FunctionFlags::NET_RELIABLE)
            && !function.export_flags.contains(FunctionExportFlags::UNRELIABLE)
        {
            self.report(
                Diagnostic::error(ErrorCode::E6006).with_message(format!(
                    "Replicated function '{name}' must be declared 'Reliable' or 'Unreliable'"
                )),
                node,
                owner,
            );
        }

        if function.flags.contains(FunctionFlags::BLUEPRINT_PURE) {
            let has_output = function.return_property.is_some()
                || node.children.iter().any(|&child| {
                    header
                        .node(child)
                        .as_property()
                        .is_some_and(|param| param.flags.contains(PropertyFlags::OUT_PARM))
                });
            if !has_output {
                self.report(
                    Diagnostic::error(ErrorCode::E6007).with_message(format!(
                        "BlueprintPure function '{name}' must have a return value or an output parameter"
                    )),
                    node,
                    owner,
                );
            }
        }

        if function.flags.contains(FunctionFlags::STATIC)
            && function
                .flags
                .intersects(FunctionFlags::EVENT | FunctionFlags::BLUEPRINT_EVENT)
        {
            self.report(
                Diagnostic::error(ErrorCode::E6008)
                    .with_message(format!("Static function '{name}' cannot be an event")),
                node,
                owner,
            );
        }
    }
}
