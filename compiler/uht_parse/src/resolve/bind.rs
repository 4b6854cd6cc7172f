//! Bind-bases phase.
//!
//! Runs once over every header, visiting classes and structs so that a
//! super type, additional base or within class is always bound before the
//! types that name it. Binding a class resolves its links, inherits flags,
//! merges categories, validates its within class, propagates its config
//! name and checks its name prefix.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace};
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_types::{
    merge_auto_categories, merge_hide_functions, merge_show_categories, ClassCategories,
    ClassDecl, ClassFlags, ClassType, HeaderFile, Node, NodeKind, PropertyFlags, StructFlags,
    TypeEntry, TypeKind, TypeRef, TypeTable,
};

use super::{header_index, node_at};

/// Config name substituted when a configurable class has none.
const FALLBACK_CONFIG: &str = "Engine";

/// Bind every class and struct in super-before-derived order.
#[tracing::instrument(level = "debug", skip_all, fields(headers = headers.len()))]
pub fn bind_bases(headers: &mut [HeaderFile], types: &TypeTable) {
    let (order, cycles) = bind_order(headers, types);
    debug!(types = order.len(), cycles = cycles.len(), "bind order computed");
    let mut binder = Binder {
        headers,
        types,
        cycles,
        object: types.lookup("UObject").map(|entry| entry.id),
        actor: types.lookup("AActor").map(|entry| entry.id),
    };
    for id in order {
        let is_class = node_at(binder.headers, id).is_some_and(|node| node.as_class().is_some());
        if is_class {
            binder.bind_class(id);
        } else {
            binder.bind_struct(id);
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq)]
enum Visit {
    Active,
    Done,
}

/// Post-order over the dependency edges, plus the edges that close a cycle.
fn bind_order(
    headers: &[HeaderFile],
    types: &TypeTable,
) -> (Vec<TypeRef>, FxHashSet<(TypeRef, TypeRef)>) {
    let mut ordering = Ordering {
        headers,
        types,
        state: FxHashMap::default(),
        order: Vec::new(),
        cycles: FxHashSet::default(),
    };
    for header in headers {
        for node in header.node_ids() {
            if matches!(
                header.node(node).kind,
                NodeKind::Class(_) | NodeKind::Struct(_)
            ) {
                ordering.visit(header.type_ref(node));
            }
        }
    }
    (ordering.order, ordering.cycles)
}

struct Ordering<'a> {
    headers: &'a [HeaderFile],
    types: &'a TypeTable,
    state: FxHashMap<TypeRef, Visit>,
    order: Vec<TypeRef>,
    cycles: FxHashSet<(TypeRef, TypeRef)>,
}

impl Ordering<'_> {
    fn visit(&mut self, id: TypeRef) {
        if self.state.contains_key(&id) {
            return;
        }
        self.state.insert(id, Visit::Active);
        for dependency in self.dependencies(id) {
            match self.state.get(&dependency) {
                Some(Visit::Active) => {
                    trace!(?id, ?dependency, "dependency cycle");
                    self.cycles.insert((id, dependency));
                }
                Some(Visit::Done) => {}
                None => self.visit(dependency),
            }
        }
        self.state.insert(id, Visit::Done);
        self.order.push(id);
    }

    /// Types that must be bound before `id`.
    fn dependencies(&self, id: TypeRef) -> Vec<TypeRef> {
        let Some(node) = node_at(self.headers, id) else {
            return Vec::new();
        };
        let names: Vec<&str> = match &node.kind {
            NodeKind::Class(class) => class
                .super_name
                .iter()
                .chain(class.base_names.iter())
                .chain(class.within_name.iter())
                .map(String::as_str)
                .collect(),
            NodeKind::Struct(decl) => decl.super_name.iter().map(String::as_str).collect(),
            _ => Vec::new(),
        };
        names
            .into_iter()
            .filter_map(|name| self.types.lookup(name))
            .filter(|entry| matches!(entry.kind, TypeKind::Class { .. } | TypeKind::Struct))
            .map(|entry| entry.id)
            .filter(|&dependency| node_at(self.headers, dependency).is_some())
            .collect()
    }
}

struct Binder<'a> {
    headers: &'a mut [HeaderFile],
    types: &'a TypeTable,
    cycles: FxHashSet<(TypeRef, TypeRef)>,
    object: Option<TypeRef>,
    actor: Option<TypeRef>,
}

/// Everything computed for one class before it is written back.
struct ClassBinding {
    super_type: Option<TypeRef>,
    bases: Vec<TypeRef>,
    inherited: ClassFlags,
    categories: ClassCategories,
    within_type: Option<TypeRef>,
    config_name: Option<String>,
    diagnostics: Vec<Diagnostic>,
}

impl Binder<'_> {
    fn class(&self, id: TypeRef) -> Option<&ClassDecl> {
        node_at(self.headers, id).and_then(Node::as_class)
    }

    fn name(&self, id: TypeRef) -> &str {
        node_at(self.headers, id).map_or("<unknown>", |node| node.source_name.as_str())
    }

    /// `class` is `ancestor` or derives from it.
    fn is_child_of(&self, mut class: TypeRef, ancestor: TypeRef) -> bool {
        loop {
            if class == ancestor {
                return true;
            }
            match self.class(class).and_then(|decl| decl.super_type) {
                Some(next) => class = next,
                None => return false,
            }
        }
    }

    fn bind_class(&mut self, id: TypeRef) {
        let Some(binding) = self.class_binding(id) else {
            return;
        };
        let Some(header) = self.headers.get_mut(header_index(id)) else {
            return;
        };
        let node = header.node_mut(id.node);
        let context = node.context();
        if let Some(class) = node.as_class_mut() {
            class.super_type = binding.super_type;
            class.bases = binding.bases;
            class.inherit_flags(binding.inherited);
            class.categories = binding.categories;
            class.within_type = binding.within_type;
            class.config_name = binding.config_name;
            if class.config_name.is_some() {
                class.add_flags(ClassFlags::CONFIG);
            }
        }
        for diagnostic in binding.diagnostics {
            header.push_diagnostic(diagnostic.with_context(context.clone()));
        }
    }

    fn class_binding(&self, id: TypeRef) -> Option<ClassBinding> {
        let node = node_at(self.headers, id)?;
        let class = node.as_class()?;
        let mut diagnostics = Vec::new();

        let super_type = match &class.super_name {
            Some(name) => self.class_super(id, node, name, &mut diagnostics),
            None => {
                if node.source_name != "UObject" && class.class_type != ClassType::NativeInterface
                {
                    diagnostics.push(
                        Diagnostic::error(ErrorCode::E4007)
                            .with_message(format!(
                                "Class '{}' must derive from UObject or one of its subclasses",
                                node.source_name
                            ))
                            .with_line(node.line),
                    );
                }
                None
            }
        };
        let super_class = super_type.and_then(|super_id| self.class(super_id));

        let mut bases = Vec::new();
        for base in &class.base_names {
            // Bases that are not reflected types are plain C++ mixins.
            let Some(entry) = self.types.lookup(base) else {
                continue;
            };
            if self.cycles.contains(&(id, entry.id)) {
                diagnostics.push(cycle_error(node, base));
                continue;
            }
            match entry.kind {
                TypeKind::Class {
                    interface: true, ..
                } => bases.push(entry.id),
                _ => diagnostics.push(
                    Diagnostic::error(ErrorCode::E4002)
                        .with_message(format!(
                            "Class '{}' cannot inherit from '{base}'; additional bases must be interfaces",
                            node.source_name
                        ))
                        .with_line(node.line),
                ),
            }
        }

        let mut inherited = super_class.map_or(ClassFlags::empty(), |decl| decl.flags);
        for &base in &bases {
            if let Some(decl) = self.class(base) {
                inherited |= decl.flags;
            }
        }
        if class.removed_flags().contains(ClassFlags::NOT_PLACEABLE)
            && !inherited.contains(ClassFlags::NOT_PLACEABLE)
        {
            diagnostics.push(
                Diagnostic::error(ErrorCode::E4008)
                    .with_message(format!(
                        "'{}' is placeable already; the 'Placeable' specifier is only allowed when the super class is 'NotPlaceable'",
                        node.source_name
                    ))
                    .with_line(node.line),
            );
        }

        let empty = ClassCategories::default();
        let parent = super_class.map_or(&empty, |decl| &decl.categories);
        let own = &class.categories;
        let (show, hide) = merge_show_categories(&parent.show, &parent.hide, &own.show, &own.hide);
        let hide_functions =
            merge_hide_functions(&parent.hide_functions, &own.hide_functions, &own.show_functions);
        let (auto_expand, auto_collapse) = merge_auto_categories(
            &own.auto_expand,
            &own.auto_collapse,
            &own.dont_auto_collapse,
            &parent.auto_expand,
            &parent.auto_collapse,
        );
        let categories = ClassCategories {
            show,
            hide,
            hide_functions,
            auto_expand,
            auto_collapse,
            ..own.clone()
        };

        let within_type = self.within(id, node, class, super_class, &mut diagnostics);
        let config_name = self.config(id, node, class, super_class, &mut diagnostics);
        self.check_class_prefix(id, node, class, super_type, &mut diagnostics);

        Some(ClassBinding {
            super_type,
            bases,
            inherited,
            categories,
            within_type,
            config_name,
            diagnostics,
        })
    }

    fn class_super(
        &self,
        id: TypeRef,
        node: &Node,
        name: &str,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeRef> {
        let Some(entry) = self.types.lookup(name) else {
            diagnostics.push(
                Diagnostic::error(ErrorCode::E4001)
                    .with_message(format!(
                        "Unknown super class '{name}' for '{}'",
                        node.source_name
                    ))
                    .with_line(node.line),
            );
            return None;
        };
        if self.cycles.contains(&(id, entry.id)) {
            diagnostics.push(cycle_error(node, name));
            return None;
        }
        if !matches!(entry.kind, TypeKind::Class { .. }) {
            diagnostics.push(
                Diagnostic::error(ErrorCode::E4001)
                    .with_message(format!(
                        "Super type '{name}' of '{}' is not a class",
                        node.source_name
                    ))
                    .with_line(node.line),
            );
            return None;
        }
        Some(entry.id)
    }

    /// The within class must be a non-interface subclass of the super's.
    fn within(
        &self,
        id: TypeRef,
        node: &Node,
        class: &ClassDecl,
        super_class: Option<&ClassDecl>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<TypeRef> {
        let expected = super_class.and_then(|decl| decl.within_type).or(self.object);
        let Some(within_name) = &class.within_name else {
            return expected;
        };
        let within = match self.types.lookup(within_name) {
            Some(TypeEntry {
                id: within_id,
                kind: TypeKind::Class {
                    interface: false, ..
                },
            }) => within_id,
            Some(_) => {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E4003)
                        .with_message(format!(
                            "Within class '{within_name}' of '{}' must be a class, not an interface",
                            node.source_name
                        ))
                        .with_line(node.line),
                );
                return expected;
            }
            None => {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E4003)
                        .with_message(format!(
                            "Unknown within class '{within_name}' for '{}'",
                            node.source_name
                        ))
                        .with_line(node.line),
                );
                return expected;
            }
        };
        if let Some(expected) = expected {
            if !self.cycles.contains(&(id, within)) && !self.is_child_of(within, expected) {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E4003)
                        .with_message(format!(
                            "Within class '{within_name}' of '{}' must be a subclass of '{}'",
                            node.source_name,
                            self.name(expected)
                        ))
                        .with_line(node.line),
                );
                return Some(expected);
            }
        }
        Some(within)
    }

    fn config(
        &self,
        id: TypeRef,
        node: &Node,
        class: &ClassDecl,
        super_class: Option<&ClassDecl>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Option<String> {
        let inherited = super_class.and_then(|decl| decl.config_name.clone());
        let mut config = match &class.config_name {
            Some(name) if name.eq_ignore_ascii_case("inherit") => {
                if inherited.is_none() {
                    diagnostics.push(
                        Diagnostic::error(ErrorCode::E4006)
                            .with_message(format!(
                                "Class '{}' inherits its config but its super class has none",
                                node.source_name
                            ))
                            .with_line(node.line),
                    );
                    Some(FALLBACK_CONFIG.to_owned())
                } else {
                    inherited
                }
            }
            Some(name) => Some(name.clone()),
            None => inherited,
        };
        if config.is_none() && self.has_config_property(id, node) {
            diagnostics.push(
                Diagnostic::error(ErrorCode::E4004)
                    .with_message(format!(
                        "Class '{}' has config properties but no config name; using '{FALLBACK_CONFIG}'",
                        node.source_name
                    ))
                    .with_line(node.line),
            );
            config = Some(FALLBACK_CONFIG.to_owned());
        }
        config
    }

    fn has_config_property(&self, id: TypeRef, node: &Node) -> bool {
        node.children.iter().any(|&child| {
            node_at(self.headers, TypeRef::new(id.header, child))
                .and_then(Node::as_property)
                .is_some_and(|property| {
                    property
                        .flags
                        .intersects(PropertyFlags::CONFIG | PropertyFlags::GLOBAL_CONFIG)
                })
        })
    }

    /// `A` for actors, `U` for other classes and interfaces, `I` for native
    /// interfaces.
    fn check_class_prefix(
        &self,
        id: TypeRef,
        node: &Node,
        class: &ClassDecl,
        super_type: Option<TypeRef>,
        diagnostics: &mut Vec<Diagnostic>,
    ) {
        let is_actor = self.actor.is_some_and(|actor| {
            id == actor || super_type.is_some_and(|super_id| self.is_child_of(super_id, actor))
        });
        let expected = match class.class_type {
            ClassType::NativeInterface => 'I',
            ClassType::Class if is_actor => 'A',
            ClassType::Class | ClassType::Interface => 'U',
        };
        if !node.source_name.starts_with(expected) {
            diagnostics.push(prefix_error(node, expected));
        }
    }

    fn bind_struct(&mut self, id: TypeRef) {
        let Some((super_type, inherited, diagnostics)) = self.struct_binding(id) else {
            return;
        };
        let Some(header) = self.headers.get_mut(header_index(id)) else {
            return;
        };
        let node = header.node_mut(id.node);
        let context = node.context();
        if let Some(decl) = node.as_struct_mut() {
            decl.super_type = super_type;
            decl.flags |= inherited;
        }
        for diagnostic in diagnostics {
            header.push_diagnostic(diagnostic.with_context(context.clone()));
        }
    }

    fn struct_binding(
        &self,
        id: TypeRef,
    ) -> Option<(Option<TypeRef>, StructFlags, Vec<Diagnostic>)> {
        let node = node_at(self.headers, id)?;
        let decl = node.as_struct()?;
        let mut diagnostics = Vec::new();
        if !node.source_name.starts_with('F') {
            diagnostics.push(prefix_error(node, 'F'));
        }
        let Some(name) = &decl.super_name else {
            return Some((None, StructFlags::empty(), diagnostics));
        };
        match self.types.lookup(name) {
            Some(entry) if self.cycles.contains(&(id, entry.id)) => {
                diagnostics.push(cycle_error(node, name));
            }
            Some(TypeEntry {
                id: super_id,
                kind: TypeKind::Struct,
            }) => {
                let inherited = node_at(self.headers, super_id)
                    .and_then(Node::as_struct)
                    .map_or(StructFlags::empty(), |parent| {
                        parent.flags & StructFlags::INHERIT
                    });
                return Some((Some(super_id), inherited, diagnostics));
            }
            Some(_) => diagnostics.push(
                Diagnostic::error(ErrorCode::E4001)
                    .with_message(format!(
                        "Super type '{name}' of '{}' is not a struct",
                        node.source_name
                    ))
                    .with_line(node.line),
            ),
            None => diagnostics.push(
                Diagnostic::error(ErrorCode::E4001)
                    .with_message(format!(
                        "Unknown super struct '{name}' for '{}'",
                        node.source_name
                    ))
                    .with_line(node.line),
            ),
        }
        Some((None, StructFlags::empty(), diagnostics))
    }
}

fn cycle_error(node: &Node, through: &str) -> Diagnostic {
    Diagnostic::error(ErrorCode::E4005)
        .with_message(format!(
            "'{}' inherits from itself through '{through}'",
            node.source_name
        ))
        .with_line(node.line)
}

fn prefix_error(node: &Node, expected: char) -> Diagnostic {
    Diagnostic::error(ErrorCode::E1006)
        .with_message(format!(
            "{} '{}' must be named with the prefix '{expected}'",
            node.kind_name(),
            node.source_name
        ))
        .with_line(node.line)
}
