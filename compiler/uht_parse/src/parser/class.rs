//! `UCLASS`, `UINTERFACE` and native interface declarations, plus the
//! statements that only make sense inside a class or struct body.

use tracing::debug;
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::Token;
use uht_types::{
    AccessSpecifier, ClassDecl, ClassExportFlags, ClassFlags, ClassType, Node, NodeId, NodeKind,
    TypeKind,
};

use super::keywords::{CLASS_KEYWORDS, GLOBAL_KEYWORDS};
use super::{Dispatch, HeaderParser};
use crate::scope::{Scope, ScopeKind};
use crate::specifier::{SpecifierParser, CLASS_SPECIFIERS};
use crate::stream::TokenStream;
use crate::{FatalError, ParseResult};

impl HeaderParser<'_> {
    /// `UCLASS(...) class [API] UName [final] [: bases] { ... };`
    pub(super) fn parse_class(&mut self, interface: bool) -> ParseResult<()> {
        let keyword = self.reader.advance()?;
        let mut specifiers = SpecifierParser::new(&CLASS_SPECIFIERS);
        specifiers.parse_specifiers(&mut self.reader)?;
        self.skip_annotation()?;
        if !self.reader.eat_ident("class")? {
            let found = self.reader.peek()?;
            return Err(FatalError::new(
                ErrorCode::E1008,
                format!("Expected 'class' after '{}' but found '{found}'", keyword.text),
                found,
            ));
        }
        self.skip_annotation()?;
        let api = self.parse_api()?;
        let name = self.reader.expect_identifier("a class name")?;
        self.reader.eat_ident("final")?;
        let mut bases = self.parse_inheritance()?.into_iter();
        let engine = self.engine_name(&name);

        let class_type = if interface {
            ClassType::Interface
        } else {
            ClassType::Class
        };
        let mut decl = ClassDecl::new(class_type);
        if api.is_some() {
            decl.add_flags(ClassFlags::REQUIRED_API);
        }
        decl.api = api;
        decl.super_name = bases.next();
        decl.base_names = bases.collect();
        if interface {
            decl.add_flags(ClassFlags::INTERFACE | ClassFlags::ABSTRACT);
        }

        let outer = self.outer();
        let id = self.header.add_node(
            outer,
            Node::new(name.text.clone(), engine, name.line, NodeKind::Class(decl)),
        );
        self.register_type(
            &name,
            id,
            TypeKind::Class {
                interface,
                native_interface: false,
            },
        );
        self.capture_tooltip(id);

        let node = self.header.node_mut(id);
        if let NodeKind::Class(decl) = &mut node.kind {
            specifiers.apply(decl, &mut node.meta);
            decl.add_flags(ClassFlags::NATIVE);
        }
        let diagnostics = specifiers.take_diagnostics();
        self.report_all(diagnostics);
        debug!(class = %name.text, line = name.line, "parsed class head");

        let close = self.parse_body(ScopeKind::Class, id, CLASS_KEYWORDS)?;
        self.check_generated_body(id, close);
        Ok(())
    }

    /// `class [API] IName : ... { ... };` paired with a `UINTERFACE` above it.
    ///
    /// Any other `class` statement is declined and skipped.
    pub(super) fn parse_native_interface(&mut self) -> ParseResult<Dispatch> {
        let snapshot = self.reader.snapshot();
        self.reader.advance()?;
        let api = self.parse_api()?;
        let Some(interface) = self.pending_interface()? else {
            self.reader.restore(snapshot);
            return Ok(Dispatch::Declined);
        };
        let name = self.reader.advance()?;
        let mut bases = self.parse_inheritance()?.into_iter();

        let mut decl = ClassDecl::new(ClassType::NativeInterface);
        if api.is_some() {
            decl.add_flags(ClassFlags::REQUIRED_API);
        }
        decl.api = api;
        decl.super_name = bases.next();
        decl.base_names = bases.collect();
        decl.alternate_object = Some(self.header.type_ref(interface));

        let engine = self.header.node(interface).engine_name.clone();
        let outer = self.outer();
        let id = self.header.add_node(
            outer,
            Node::new(name.text.clone(), engine, name.line, NodeKind::Class(decl)),
        );
        let native = self.header.type_ref(id);
        if let Some(class) = self.header.node_mut(interface).as_class_mut() {
            class.alternate_object = Some(native);
        }
        self.register_type(
            &name,
            id,
            TypeKind::Class {
                interface: true,
                native_interface: true,
            },
        );
        self.capture_tooltip(id);

        let close = self.parse_body(ScopeKind::Class, id, CLASS_KEYWORDS)?;
        self.check_generated_body(id, close);
        Ok(Dispatch::Handled)
    }

    /// The `UINTERFACE` the next identifier pairs with, if it is a
    /// definition rather than a forward declaration.
    fn pending_interface(&mut self) -> ParseResult<Option<NodeId>> {
        let name = self.reader.peek()?;
        let interface_name = match name.text.strip_prefix('I') {
            Some(stem) if name.is_identifier() && !stem.is_empty() => format!("U{stem}"),
            _ => return Ok(None),
        };
        let follow = self.reader.peek_nth(1)?;
        if !follow.is_symbol(":") && !follow.is_symbol("{") {
            return Ok(None);
        }
        let root = self.header.root();
        let found = self.header.find_child(root, &interface_name).filter(|&id| {
            self.header.node(id).as_class().is_some_and(|class| {
                class.class_type == ClassType::Interface && class.alternate_object.is_none()
            })
        });
        Ok(found)
    }

    /// `: [public] Super, [public] IBase<...>, ...`
    pub(super) fn parse_inheritance(&mut self) -> ParseResult<Vec<String>> {
        let mut bases = Vec::new();
        if !self.reader.eat_symbol(":")? {
            return Ok(bases);
        }
        loop {
            while is_base_qualifier(self.reader.peek()?) {
                self.reader.advance()?;
            }
            let mut name = self.reader.expect_identifier("a base class name")?.text;
            while self.reader.eat_symbol("::")? {
                name.push_str("::");
                name.push_str(&self.reader.expect_identifier("a base class name")?.text);
            }
            if self.reader.check_symbol("<")? {
                name.push_str(&self.take_template_arguments()?);
            }
            bases.push(name);
            if !self.reader.eat_symbol(",")? {
                return Ok(bases);
            }
        }
    }

    /// `<...>` with nesting, returned as text.
    fn take_template_arguments(&mut self) -> ParseResult<String> {
        let mut depth = 0usize;
        let mut text = String::new();
        loop {
            let token = self.reader.advance()?;
            if token.is_eof() {
                return Err(FatalError::expected("'>'", &token));
            }
            if token.is_symbol("<") {
                depth += 1;
            } else if token.is_symbol(">") {
                depth = depth.saturating_sub(1);
            }
            if token.is_identifier() && text.ends_with(|c: char| c.is_alphanumeric()) {
                text.push(' ');
            }
            text.push_str(&token.text);
            if depth == 0 {
                return Ok(text);
            }
        }
    }

    pub(super) fn check_generated_body(&mut self, id: NodeId, close_line: u32) {
        let node = self.header.node(id);
        let found = match &node.kind {
            NodeKind::Class(class) => class.generated_body_line.is_some(),
            NodeKind::Struct(decl) => decl.generated_body_line.is_some(),
            _ => true,
        };
        if !found {
            let diagnostic = Diagnostic::error(ErrorCode::E1003)
                .with_message(format!(
                    "Expected a GENERATED_BODY() at the start of {} '{}'",
                    node.kind_name(),
                    node.source_name
                ))
                .with_line(close_line)
                .with_context(node.context());
            self.header.push_diagnostic(diagnostic);
        }
    }

    /// `GENERATED_BODY()` and its legacy spellings.
    pub(super) fn parse_generated_body(
        &mut self,
        access_after: AccessSpecifier,
        legacy: bool,
    ) -> ParseResult<()> {
        let keyword = self.reader.advance()?;
        self.reader.take_parenthesized()?;
        self.reader.eat_symbol(";")?;
        let access = self.scopes.access();
        let owner = self.outer();
        match &mut self.header.node_mut(owner).kind {
            NodeKind::Class(class) => {
                class.generated_body_line = Some(keyword.line);
                class.generated_body_access = Some(access);
                if legacy {
                    class.export_flags |= ClassExportFlags::LEGACY_GENERATED_BODY;
                }
            }
            NodeKind::Struct(decl) => decl.generated_body_line = Some(keyword.line),
            _ => {}
        }
        if let Some(scope) = self.scopes.top_mut() {
            scope.access = access_after;
        }
        Ok(())
    }

    /// `public:` and friends.
    pub(super) fn parse_access_specifier(&mut self) -> ParseResult<()> {
        let keyword = self.reader.advance()?;
        self.reader.expect_symbol(":")?;
        if let (Some(access), Some(scope)) = (
            AccessSpecifier::from_keyword(&keyword.text),
            self.scopes.top_mut(),
        ) {
            scope.access = access;
        }
        Ok(())
    }

    /// A reflection macro where its declaration kind is not allowed.
    pub(super) fn reject_misplaced_macro(&mut self) -> ParseResult<()> {
        let keyword = self.reader.advance()?;
        let context = self.scopes.context(&self.header);
        self.report(
            Diagnostic::error(ErrorCode::E1005)
                .with_message(format!("'{}' is not allowed inside {context}", keyword.text))
                .at(&keyword),
        );
        if self.reader.check_symbol("(")? {
            self.reader.take_parenthesized()?;
        }
        self.skip_tokens()
    }

    /// `namespace [Name] { ... }`; the body is parsed as global content.
    pub(super) fn parse_namespace(&mut self) -> ParseResult<()> {
        self.reader.advance()?;
        while self.reader.peek()?.is_identifier() || self.reader.check_symbol("::")? {
            self.reader.advance()?;
        }
        if !self.reader.check_symbol("{")? {
            return self.skip_tokens();
        }
        self.reader.advance()?;
        let outer = self.outer();
        let scope = self
            .scopes
            .push(Scope::new(ScopeKind::Global, outer, GLOBAL_KEYWORDS));
        self.parse_statements(Some("}"))?;
        self.scopes.pop(scope)?;
        self.reader.expect_symbol("}")?;
        self.reader.eat_symbol(";")?;
        Ok(())
    }
}

fn is_base_qualifier(token: &Token) -> bool {
    token.is_identifier()
        && matches!(
            token.text.as_str(),
            "public" | "protected" | "private" | "virtual"
        )
}
