//! `UPROPERTY` members.

use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_types::{
    AccessSpecifier, CompilerDirective, Node, NodeKind, PropertyCategory, PropertyExportFlags,
    PropertyFlags,
};

use super::HeaderParser;
use crate::property::{parse_property, ParsedProperty, PropertyShape};
use crate::specifier::{SpecifierParser, PROPERTY_SPECIFIERS};
use crate::stream::TokenStream;
use crate::ParseResult;

impl HeaderParser<'_> {
    /// `UPROPERTY(...) Type Name [Dim] [: 1] [= Init];`
    pub(super) fn parse_uproperty(&mut self) -> ParseResult<()> {
        let directive = self.reader.directive()?;
        let keyword = self.reader.advance()?;
        if let Some(blocked) = (directive & CompilerDirective::DISALLOWED_FOR_PROPERTIES)
            .iter()
            .next()
        {
            self.report(
                Diagnostic::error(ErrorCode::E5007)
                    .with_message(format!(
                        "UPROPERTY must not be inside '#if {}' blocks",
                        blocked.condition_text()
                    ))
                    .at(&keyword),
            );
        }

        let mut specifiers = SpecifierParser::new(&PROPERTY_SPECIFIERS);
        specifiers.parse_specifiers(&mut self.reader)?;
        let mut diagnostics = Vec::new();
        let ParsedProperty {
            name,
            line,
            mut decl,
            meta,
        } = parse_property(
            &mut self.reader,
            PropertyCategory::Member,
            PropertyShape::Member,
            directive,
            &mut diagnostics,
        )?;
        self.reader.expect_symbol(";")?;

        let (access, export) = match self.scopes.access() {
            AccessSpecifier::Public => (
                PropertyFlags::NATIVE_ACCESS_SPECIFIER_PUBLIC,
                PropertyExportFlags::PUBLIC,
            ),
            AccessSpecifier::Protected => (
                PropertyFlags::NATIVE_ACCESS_SPECIFIER_PROTECTED,
                PropertyExportFlags::PROTECTED,
            ),
            AccessSpecifier::Private => (
                PropertyFlags::NATIVE_ACCESS_SPECIFIER_PRIVATE,
                PropertyExportFlags::PRIVATE,
            ),
        };
        decl.flags |= access;
        decl.export_flags |= export;

        let mut node = Node::new(name.clone(), name, line, NodeKind::Property(decl));
        node.meta = meta;
        let owner = self.outer();
        let id = self.header.add_node(owner, node);
        self.capture_tooltip(id);

        let node = self.header.node_mut(id);
        if let NodeKind::Property(decl) = &mut node.kind {
            specifiers.apply(decl, &mut node.meta);
        }
        diagnostics.extend(specifiers.take_diagnostics());
        self.report_all(diagnostics);
        Ok(())
    }
}
