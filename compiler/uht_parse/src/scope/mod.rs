//! Parsing scope stack.
//!
//! One scope per open declaration body. Each scope owns its access level
//! and the keyword table consulted for statements directly inside it.

use uht_diagnostic::ErrorCode;
use uht_lexer::Comment;
use uht_types::{AccessSpecifier, HeaderFile, MetaData, NodeId};

use crate::parser::Keyword;
use crate::tooltip::normalize_tooltip;
use crate::{FatalError, ParseResult};

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ScopeKind {
    Global,
    Class,
    Struct,
    Enum,
    Function,
}

#[derive(Debug)]
pub struct Scope {
    pub kind: ScopeKind,
    pub node: NodeId,
    pub access: AccessSpecifier,
    pub keywords: &'static [Keyword],
}

impl Scope {
    pub fn new(kind: ScopeKind, node: NodeId, keywords: &'static [Keyword]) -> Self {
        let access = match kind {
            ScopeKind::Class => AccessSpecifier::Private,
            _ => AccessSpecifier::Public,
        };
        Scope {
            kind,
            node,
            access,
            keywords,
        }
    }
}

/// Proof of a push; only the matching token can pop.
#[must_use = "a pushed scope must be popped with its token"]
#[derive(Debug)]
pub struct ScopeToken {
    depth: usize,
}

#[derive(Default)]
pub struct ScopeStack {
    scopes: Vec<Scope>,
}

impl ScopeStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, scope: Scope) -> ScopeToken {
        self.scopes.push(scope);
        ScopeToken {
            depth: self.scopes.len(),
        }
    }

    /// Pop the top scope. Popping anything but the top is a contract violation.
    pub fn pop(&mut self, token: ScopeToken) -> ParseResult<Scope> {
        if token.depth != self.scopes.len() {
            return Err(FatalError::at_line(
                ErrorCode::E9001,
                format!(
                    "Attempt to pop scope at depth {} while the top is at depth {}",
                    token.depth,
                    self.scopes.len()
                ),
                0,
            ));
        }
        self.scopes.pop().ok_or_else(|| {
            FatalError::at_line(ErrorCode::E9001, "Attempt to pop an empty scope stack", 0)
        })
    }

    pub fn top(&self) -> Option<&Scope> {
        self.scopes.last()
    }

    pub fn top_mut(&mut self) -> Option<&mut Scope> {
        self.scopes.last_mut()
    }

    /// Scopes from innermost to outermost.
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.iter().rev()
    }

    pub fn access(&self) -> AccessSpecifier {
        self.top().map_or(AccessSpecifier::Public, |s| s.access)
    }

    /// Nearest enclosing class body.
    pub fn current_class(&self) -> ParseResult<NodeId> {
        self.iter()
            .find(|s| s.kind == ScopeKind::Class)
            .map(|s| s.node)
            .ok_or_else(|| {
                FatalError::at_line(ErrorCode::E9002, "No class scope is currently open", 0)
            })
    }

    /// Context string for diagnostics, e.g. `class 'UWidget'`.
    pub fn context(&self, header: &HeaderFile) -> String {
        match self.iter().find(|s| s.kind != ScopeKind::Global) {
            Some(scope) => header.node(scope.node).context(),
            None => format!("header '{}'", header.file_name),
        }
    }
}

/// Store comments as `ToolTip` / `Comment` metadata.
///
/// Returns whether the comment buffer should be cleared, which is the case
/// whenever no tooltip existed beforehand.
pub fn capture_tooltip(comments: &[Comment], meta: &mut MetaData) -> bool {
    if meta.contains("ToolTip") {
        return false;
    }
    if comments.is_empty() {
        return true;
    }
    let raw: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
    let tooltip = normalize_tooltip(&raw);
    if !tooltip.is_empty() {
        meta.add("Comment", raw.join("\n"));
        meta.add("ToolTip", tooltip);
    }
    true
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
