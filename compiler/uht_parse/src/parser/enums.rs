//! `UENUM` declarations in all three C++ spellings.

use tracing::debug;
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::{join_tokens, Token};
use uht_types::{EnumCppForm, EnumDecl, EnumFlags, EnumValue, Node, NodeId, NodeKind, TypeKind};

use super::keywords::NO_KEYWORDS;
use super::HeaderParser;
use crate::scope::{Scope, ScopeKind};
use crate::specifier::{parse_field_metadata, SpecifierParser, ENUM_SPECIFIERS};
use crate::stream::TokenStream;
use crate::tooltip::normalize_tooltip;
use crate::{FatalError, ParseResult};

impl HeaderParser<'_> {
    /// ```text
    /// UENUM(...) enum [class] EName [: uint8] { A, B = 2, C UMETA(...) };
    /// UENUM(...) namespace EName { enum Type { ... }; }
    /// ```
    pub(super) fn parse_enum(&mut self) -> ParseResult<()> {
        let keyword = self.reader.advance()?;
        let mut specifiers = SpecifierParser::new(&ENUM_SPECIFIERS);
        specifiers.parse_specifiers(&mut self.reader)?;

        let (cpp_form, name) = if self.reader.eat_ident("namespace")? {
            let name = self.reader.expect_identifier("an enum namespace name")?;
            self.reader.expect_symbol("{")?;
            self.reader.expect_keyword("enum")?;
            self.reader.expect_keyword("Type")?;
            (EnumCppForm::Namespaced, name)
        } else if self.reader.eat_ident("enum")? {
            let scoped = self.reader.eat_ident("class")? || self.reader.eat_ident("struct")?;
            let name = self.reader.expect_identifier("an enum name")?;
            let form = if scoped {
                EnumCppForm::EnumClass
            } else {
                EnumCppForm::Regular
            };
            (form, name)
        } else {
            let found = self.reader.peek()?;
            return Err(FatalError::new(
                ErrorCode::E1008,
                format!("Expected 'enum' after '{}' but found '{found}'", keyword.text),
                found,
            ));
        };
        let underlying_type = if self.reader.eat_symbol(":")? {
            Some(self.reader.expect_identifier("an underlying type")?.text)
        } else {
            None
        };

        let decl = EnumDecl {
            cpp_form,
            underlying_type,
            flags: EnumFlags::empty(),
            values: Vec::new(),
        };
        let outer = self.outer();
        let id = self.header.add_node(
            outer,
            Node::new(name.text.clone(), name.text.clone(), name.line, NodeKind::Enum(decl)),
        );
        self.register_type(&name, id, TypeKind::Enum);
        self.capture_tooltip(id);

        let node = self.header.node_mut(id);
        if let NodeKind::Enum(decl) = &mut node.kind {
            specifiers.apply(decl, &mut node.meta);
        }
        let diagnostics = specifiers.take_diagnostics();
        self.report_all(diagnostics);
        self.check_blueprint_underlying(id, &name);

        self.reader.expect_symbol("{")?;
        let scope = self.scopes.push(Scope::new(ScopeKind::Enum, id, NO_KEYWORDS));
        self.parse_enum_values(id, &name.text)?;
        self.scopes.pop(scope)?;
        self.reader.expect_symbol("}")?;
        self.reader.expect_symbol(";")?;
        if cpp_form == EnumCppForm::Namespaced {
            self.reader.expect_symbol("}")?;
            self.reader.eat_symbol(";")?;
        }
        debug!(name = %name.text, line = name.line, "parsed enum");
        Ok(())
    }

    /// A Blueprint-visible `enum class` must be stored as `uint8`.
    fn check_blueprint_underlying(&mut self, id: NodeId, name: &Token) {
        let node = self.header.node(id);
        let Some(decl) = node.as_enum() else {
            return;
        };
        if decl.cpp_form != EnumCppForm::EnumClass
            || !node.meta.contains("BlueprintType")
            || decl.underlying_type.as_deref() == Some("uint8")
        {
            return;
        }
        let underlying = decl.underlying_type.as_deref().unwrap_or("int");
        let diagnostic = Diagnostic::error(ErrorCode::E1009)
            .with_message(format!(
                "Invalid BlueprintType enum base '{underlying}' for '{}'; only uint8 is supported",
                name.text
            ))
            .at(name)
            .with_context(node.context());
        self.report(diagnostic);
    }

    /// Enumerators up to the closing `}` (left unconsumed).
    fn parse_enum_values(&mut self, id: NodeId, enum_name: &str) -> ParseResult<()> {
        let mut values: Vec<EnumValue> = Vec::new();
        let mut next_value = 0i64;
        loop {
            self.reader.clear_comments();
            if self.reader.check_symbol("}")? {
                break;
            }
            let name = self.reader.expect_identifier("an enumerator name")?;
            let index = u32::try_from(values.len()).unwrap_or(u32::MAX);
            self.capture_value_tooltip(id, index);

            let value = if self.reader.eat_symbol("=")? {
                let tokens = self.take_enum_initializer()?;
                match evaluate_initializer(&tokens, &values, enum_name) {
                    Some(value) => value,
                    None => {
                        self.report(
                            Diagnostic::warning(ErrorCode::W1005)
                                .with_message(format!(
                                    "Initializer '{}' for '{}' is not evaluated; assuming {next_value}",
                                    join_tokens(&tokens),
                                    name.text
                                ))
                                .at(&name),
                        );
                        next_value
                    }
                }
            } else {
                next_value
            };

            let meta = &mut self.header.node_mut(id).meta;
            parse_field_metadata(&mut self.reader, meta, Some(index))?;

            if values.iter().any(|v| v.name == name.text) {
                self.report(
                    Diagnostic::error(ErrorCode::E1010)
                        .with_message(format!(
                            "Enumerator '{}' is declared more than once in '{enum_name}'",
                            name.text
                        ))
                        .at(&name),
                );
            } else {
                values.push(self.enum_value(id, enum_name, &name.text, value));
            }
            next_value = value.wrapping_add(1);

            if !self.reader.eat_symbol(",")? {
                break;
            }
        }
        if let Some(decl) = self.header.node_mut(id).as_enum_mut() {
            decl.values = values;
        }
        Ok(())
    }

    /// Build an enumerator and publish it for array-dimension lookup.
    fn enum_value(&mut self, id: NodeId, enum_name: &str, name: &str, value: i64) -> EnumValue {
        let form = self
            .header
            .node(id)
            .as_enum()
            .map_or(EnumCppForm::EnumClass, |decl| decl.cpp_form);
        let qualified = format!("{enum_name}::{name}");
        let owner = self.header.type_ref(id);
        self.types.register_enum_value(qualified.clone(), owner, value);
        let full_name = if form == EnumCppForm::Regular {
            self.types.register_enum_value(name, owner, value);
            name.to_owned()
        } else {
            qualified
        };
        EnumValue {
            name: name.to_owned(),
            full_name,
            value,
        }
    }

    /// Tokens after `=` up to `,`, `}` or `UMETA`.
    fn take_enum_initializer(&mut self) -> ParseResult<Vec<Token>> {
        let mut tokens = Vec::new();
        let mut depth = 0usize;
        loop {
            let next = self.reader.peek()?;
            if next.is_eof() {
                return Err(FatalError::expected("'}'", next));
            }
            if depth == 0
                && (next.is_symbol(",") || next.is_symbol("}") || next.is_identifier_named("UMETA"))
            {
                return Ok(tokens);
            }
            let token = self.reader.advance()?;
            if token.is_symbol("(") {
                depth += 1;
            } else if token.is_symbol(")") {
                depth = depth.saturating_sub(1);
            }
            tokens.push(token);
        }
    }

    fn capture_value_tooltip(&mut self, id: NodeId, index: u32) {
        let comments = self.reader.comments();
        if comments.is_empty() {
            return;
        }
        let raw: Vec<&str> = comments.iter().map(|c| c.text.as_str()).collect();
        let tooltip = normalize_tooltip(&raw);
        if !tooltip.is_empty() {
            let meta = &mut self.header.node_mut(id).meta;
            meta.add_indexed("Comment", index, raw.join("\n"));
            meta.add_indexed("ToolTip", index, tooltip);
        }
        self.reader.clear_comments();
    }
}

/// Integer literal, negated literal, or an earlier enumerator.
fn evaluate_initializer(tokens: &[Token], values: &[EnumValue], enum_name: &str) -> Option<i64> {
    let earlier = |name: &str| values.iter().find(|v| v.name == name).map(|v| v.value);
    match tokens {
        [single] => single.int_value().or_else(|| earlier(&single.text)),
        [minus, literal] if minus.is_symbol("-") => literal.int_value().and_then(i64::checked_neg),
        [scope, sep, name] if sep.is_symbol("::") && scope.text == enum_name => earlier(&name.text),
        [open, inner @ .., close] if open.is_symbol("(") && close.is_symbol(")") => {
            evaluate_initializer(inner, values, enum_name)
        }
        _ => None,
    }
}
