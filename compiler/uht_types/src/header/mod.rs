//! Per-header node arena.

use std::fmt;

use uht_diagnostic::Diagnostic;

use crate::{Node, NodeKind};

/// Index of a header within a session.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct HeaderId(pub u32);

/// Index of a node within its header's arena.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord, Debug)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const ROOT: NodeId = NodeId(0);

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node anywhere in the session.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct TypeRef {
    pub header: HeaderId,
    pub node: NodeId,
}

impl TypeRef {
    pub const fn new(header: HeaderId, node: NodeId) -> Self {
        TypeRef { header, node }
    }
}

impl fmt::Debug for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}:{}", self.header.0, self.node.0)
    }
}

/// One parsed header and the declarations it owns.
#[derive(Debug)]
pub struct HeaderFile {
    pub id: HeaderId,
    /// Path as given to the session.
    pub path: String,
    /// File name without directories or extension.
    pub file_name: String,
    pub source: String,
    nodes: Vec<Node>,
    /// `#include` targets in source order.
    pub includes: Vec<String>,
    pub generated_include_line: Option<u32>,
    pub diagnostics: Vec<Diagnostic>,
}

impl HeaderFile {
    pub fn new(id: HeaderId, path: impl Into<String>, source: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = stem(&path).to_owned();
        let root = Node::new(file_name.clone(), file_name.clone(), 1, NodeKind::Header);
        HeaderFile {
            id,
            path,
            file_name,
            source: source.into(),
            nodes: vec![root],
            includes: Vec::new(),
            generated_include_line: None,
            diagnostics: Vec::new(),
        }
    }

    /// `<stem>.generated.h`
    pub fn generated_include_name(&self) -> String {
        format!("{}.generated.h", self.file_name)
    }

    pub fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    pub fn type_ref(&self, node: NodeId) -> TypeRef {
        TypeRef::new(self.id, node)
    }

    /// Add `node` as the last child of `outer`.
    pub fn add_node(&mut self, outer: NodeId, mut node: Node) -> NodeId {
        let id = NodeId(u32::try_from(self.nodes.len()).unwrap_or(u32::MAX));
        node.outer = Some(outer);
        self.nodes.push(node);
        if let Some(parent) = self.nodes.get_mut(outer.index()) {
            parent.children.push(id);
        }
        id
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.index()]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// All node ids in creation order, root first.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(|i| NodeId(u32::try_from(i).unwrap_or(u32::MAX)))
    }

    /// Top-level declarations.
    pub fn top_level(&self) -> &[NodeId] {
        &self.nodes[0].children
    }

    /// First direct child of `outer` named `source_name`.
    pub fn find_child(&self, outer: NodeId, source_name: &str) -> Option<NodeId> {
        self.node(outer)
            .children
            .iter()
            .copied()
            .find(|&child| self.node(child).source_name == source_name)
    }

    /// Node whose `outer` chain first reaches a class or struct.
    pub fn owning_type(&self, mut id: NodeId) -> Option<NodeId> {
        while let Some(outer) = self.node(id).outer {
            if matches!(
                self.node(outer).kind,
                NodeKind::Class(_) | NodeKind::Struct(_)
            ) {
                return Some(outer);
            }
            id = outer;
        }
        None
    }

    /// Record a diagnostic, filling in this header's path when unset.
    pub fn push_diagnostic(&mut self, mut diagnostic: Diagnostic) {
        if diagnostic.file.is_none() {
            diagnostic.file = Some(self.path.clone());
        }
        self.diagnostics.push(diagnostic);
    }
}

fn stem(path: &str) -> &str {
    let name = path.rsplit(['/', '\\']).next().unwrap_or(path);
    name.split_once('.').map_or(name, |(stem, _)| stem)
}

#[cfg(test)]
mod tests;
