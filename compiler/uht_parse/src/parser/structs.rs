//! `USTRUCT` declarations.

use tracing::debug;
use uht_diagnostic::ErrorCode;
use uht_types::{Node, NodeKind, StructDecl, StructFlags, TypeKind};

use super::keywords::STRUCT_KEYWORDS;
use super::HeaderParser;
use crate::scope::ScopeKind;
use crate::specifier::{SpecifierParser, STRUCT_SPECIFIERS};
use crate::stream::TokenStream;
use crate::{FatalError, ParseResult};

impl HeaderParser<'_> {
    /// `USTRUCT(...) struct [API] FName [: [public] FSuper] { ... };`
    pub(super) fn parse_struct(&mut self) -> ParseResult<()> {
        let keyword = self.reader.advance()?;
        let mut specifiers = SpecifierParser::new(&STRUCT_SPECIFIERS);
        specifiers.parse_specifiers(&mut self.reader)?;
        self.skip_annotation()?;
        if !self.reader.eat_ident("struct")? {
            let found = self.reader.peek()?;
            return Err(FatalError::new(
                ErrorCode::E1008,
                format!("Expected 'struct' after '{}' but found '{found}'", keyword.text),
                found,
            ));
        }
        self.skip_annotation()?;
        let api = self.parse_api()?;
        let name = self.reader.expect_identifier("a struct name")?;
        self.reader.eat_ident("final")?;
        let bases = self.parse_inheritance()?;
        let engine = self.engine_name(&name);

        let mut decl = StructDecl {
            flags: StructFlags::NATIVE,
            super_name: bases.into_iter().next(),
            ..StructDecl::default()
        };
        if api.is_some() {
            decl.flags |= StructFlags::REQUIRED_API;
        }
        decl.api = api;

        let outer = self.outer();
        let id = self.header.add_node(
            outer,
            Node::new(name.text.clone(), engine, name.line, NodeKind::Struct(decl)),
        );
        self.register_type(&name, id, TypeKind::Struct);
        self.capture_tooltip(id);

        let node = self.header.node_mut(id);
        if let NodeKind::Struct(decl) = &mut node.kind {
            specifiers.apply(decl, &mut node.meta);
        }
        let diagnostics = specifiers.take_diagnostics();
        self.report_all(diagnostics);
        debug!(name = %name.text, line = name.line, "parsed struct head");

        let close = self.parse_body(ScopeKind::Struct, id, STRUCT_KEYWORDS)?;
        self.check_generated_body(id, close);
        Ok(())
    }
}
