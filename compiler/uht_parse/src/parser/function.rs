//! `UFUNCTION` declarations and dynamic delegate macros.

use tracing::debug;
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::Token;
use uht_types::{
    AccessSpecifier, CompilerDirective, FunctionDecl, FunctionExportFlags, FunctionFlags,
    FunctionType, Node, NodeId, NodeKind, PropertyCategory, PropertyFlags, TypeKind,
};

use super::keywords::NO_KEYWORDS;
use super::HeaderParser;
use crate::property::{
    collect_type_tokens, parse_property, property_from_type, ParsedProperty, PropertyShape,
};
use crate::scope::{Scope, ScopeKind};
use crate::specifier::{SpecifierParser, FUNCTION_SPECIFIERS};
use crate::stream::TokenStream;
use crate::{FatalError, ParseResult};

/// Parameter-count suffixes of the delegate macros, indexed by count.
const PARAM_COUNT_SUFFIXES: &[&str] = &[
    "",
    "_OneParam",
    "_TwoParams",
    "_ThreeParams",
    "_FourParams",
    "_FiveParams",
    "_SixParams",
    "_SevenParams",
    "_EightParams",
    "_NineParams",
];

impl HeaderParser<'_> {
    /// `UFUNCTION(...) [virtual|static] RetType Name(Params) [const] [override] ...;`
    pub(super) fn parse_function(&mut self) -> ParseResult<()> {
        let directive = self.reader.directive()?;
        let keyword = self.reader.advance()?;
        if let Some(blocked) = (directive & CompilerDirective::DISALLOWED_FOR_FUNCTIONS)
            .iter()
            .next()
        {
            self.report(
                Diagnostic::error(ErrorCode::E5008)
                    .with_message(format!(
                        "UFUNCTION must not be inside '#if {}' blocks",
                        blocked.condition_text()
                    ))
                    .at(&keyword),
            );
        }
        let mut specifiers = SpecifierParser::new(&FUNCTION_SPECIFIERS);
        specifiers.parse_specifiers(&mut self.reader)?;
        self.skip_annotation()?;

        let mut decl = FunctionDecl::new(FunctionType::Function);
        decl.directive = directive;
        decl.flags |= FunctionFlags::NATIVE;
        if directive.contains(CompilerDirective::WITH_EDITOR) {
            decl.flags |= FunctionFlags::EDITOR_ONLY;
        }
        decl.flags |= match self.scopes.access() {
            AccessSpecifier::Public => FunctionFlags::PUBLIC,
            AccessSpecifier::Protected => FunctionFlags::PROTECTED,
            AccessSpecifier::Private => FunctionFlags::PRIVATE,
        };

        let mut head = self.parse_function_head(&mut decl)?;
        let name = match head.pop() {
            Some(name) if name.is_identifier() && !head.is_empty() => name,
            _ => {
                return Err(FatalError::new(
                    ErrorCode::E1001,
                    "Expected a return type and function name before '('",
                    &keyword,
                ))
            }
        };
        let returns = !matches!(head.as_slice(), [only] if only.is_identifier_named("void"));

        let class = self.scopes.current_class()?;
        let id = self.header.add_node(
            class,
            Node::new(
                name.text.clone(),
                name.text.clone(),
                name.line,
                NodeKind::Function(decl),
            ),
        );
        self.capture_tooltip(id);
        let scope = self.scopes.push(Scope::new(ScopeKind::Function, id, NO_KEYWORDS));
        let node = self.header.node_mut(id);
        if let NodeKind::Function(decl) = &mut node.kind {
            specifiers.apply(decl, &mut node.meta);
            implementation_names(decl, &name.text);
        }
        let diagnostics = specifiers.take_diagnostics();
        self.report_all(diagnostics);

        let flags = self
            .header
            .node(id)
            .as_function()
            .map_or(FunctionFlags::empty(), |f| f.flags);
        let category = if flags.contains(FunctionFlags::NET) {
            PropertyCategory::ReplicatedParameter
        } else {
            PropertyCategory::RegularParameter
        };
        self.reader.expect_symbol("(")?;
        self.parse_parameters(id, category, directive, flags)?;
        if returns {
            let mut diagnostics = Vec::new();
            let property =
                property_from_type(PropertyCategory::Return, head, "ReturnValue", directive, &mut diagnostics);
            self.add_parameter(id, property, true);
            self.report_all(diagnostics);
        }
        self.parse_function_tail(id)?;
        self.scopes.pop(scope)?;
        debug!(function = %name.text, line = name.line, "parsed function");
        Ok(())
    }

    /// Tokens before `(`, with storage and inline qualifiers folded into flags.
    fn parse_function_head(&mut self, decl: &mut FunctionDecl) -> ParseResult<Vec<Token>> {
        let mut head = Vec::new();
        loop {
            let next = self.reader.peek()?;
            if next.is_symbol("(") {
                return Ok(head);
            }
            if next.is_eof() || next.is_symbol(";") || next.is_symbol("{") {
                return Err(FatalError::expected("'('", next));
            }
            let token = self.reader.advance()?;
            if !token.is_identifier() {
                head.push(token);
                continue;
            }
            match token.text.as_str() {
                "virtual" => decl.export_flags |= FunctionExportFlags::VIRTUAL,
                "static" => decl.flags |= FunctionFlags::STATIC,
                "inline" | "FORCEINLINE" | "FORCENOINLINE" => {
                    decl.export_flags |= FunctionExportFlags::INLINE;
                }
                "explicit" => {}
                text if text.ends_with("_API") => decl.flags |= FunctionFlags::REQUIRED_API,
                _ => head.push(token),
            }
        }
    }

    /// Comma-separated parameters up to and including `)`.
    fn parse_parameters(
        &mut self,
        function: NodeId,
        category: PropertyCategory,
        directive: CompilerDirective,
        flags: FunctionFlags,
    ) -> ParseResult<()> {
        if self.reader.eat_symbol(")")? {
            return Ok(());
        }
        if self.reader.check_ident("void")? && self.reader.peek_nth(1)?.is_symbol(")") {
            self.reader.advance()?;
            self.reader.advance()?;
            return Ok(());
        }
        let keep_defaults = flags.intersects(FunctionFlags::SCRIPT_CALLABLE);
        loop {
            let mut diagnostics = Vec::new();
            let mut property = parse_property(
                &mut self.reader,
                category,
                PropertyShape::Parameter,
                directive,
                &mut diagnostics,
            )?;
            if !keep_defaults {
                property.decl.default_value_tokens.clear();
            }
            self.add_parameter(function, property, false);
            self.report_all(diagnostics);
            if self.reader.eat_symbol(")")? {
                return Ok(());
            }
            self.reader.expect_symbol(",")?;
        }
    }

    /// Attach a parameter or return value and fold its flags into the function.
    fn add_parameter(&mut self, function: NodeId, property: ParsedProperty, is_return: bool) {
        let ParsedProperty {
            name,
            line,
            decl,
            meta,
        } = property;
        let out = decl.flags.contains(PropertyFlags::OUT_PARM);
        let defaults = !decl.default_value_tokens.is_empty();
        let mut node = Node::new(name.clone(), name, line, NodeKind::Property(decl));
        node.meta = meta;
        let id = self.header.add_node(function, node);
        if let Some(decl) = self.header.node_mut(function).as_function_mut() {
            if out {
                decl.flags |= FunctionFlags::HAS_OUT_PARMS;
            }
            if defaults {
                decl.flags |= FunctionFlags::HAS_DEFAULTS;
            }
            if is_return {
                decl.return_property = Some(id);
            }
        }
    }

    /// Qualifiers after the parameter list, then `;` or an inline body.
    fn parse_function_tail(&mut self, function: NodeId) -> ParseResult<()> {
        loop {
            let next = self.reader.peek()?.clone();
            if next.is_symbol(";") {
                self.reader.advance()?;
                return Ok(());
            }
            if next.is_symbol("{") {
                return self.skip_tokens();
            }
            if next.is_symbol("=") {
                self.reader.advance()?;
                self.reader.advance()?;
                continue;
            }
            if !next.is_identifier() {
                return Err(FatalError::expected("';'", &next));
            }
            self.reader.advance()?;
            let Some(decl) = self.header.node_mut(function).as_function_mut() else {
                continue;
            };
            match next.text.as_str() {
                "const" => decl.flags |= FunctionFlags::CONST,
                "final" => {
                    decl.flags |= FunctionFlags::FINAL;
                    decl.export_flags |= FunctionExportFlags::FINAL;
                }
                "PURE_VIRTUAL" => {
                    self.reader.take_parenthesized()?;
                }
                _ => {}
            }
        }
    }

    /// `UDELEGATE(...)` in front of a delegate macro.
    pub(super) fn parse_udelegate(&mut self) -> ParseResult<()> {
        self.reader.advance()?;
        let mut specifiers = SpecifierParser::new(&FUNCTION_SPECIFIERS);
        specifiers.parse_specifiers(&mut self.reader)?;
        let next = self.reader.peek()?;
        if !next.is_identifier() || !next.text.starts_with("DECLARE_DYNAMIC_") {
            return Err(FatalError::new(
                ErrorCode::E1014,
                format!("Expected a DECLARE_DYNAMIC_ delegate macro after UDELEGATE but found '{next}'"),
                next,
            ));
        }
        self.parse_delegate_macro(Some(specifiers))
    }

    /// `DECLARE_DYNAMIC_[MULTICAST_][SPARSE_]DELEGATE[_RetVal][_NParams][_Const](...)`
    pub(super) fn parse_delegate_macro(
        &mut self,
        specifiers: Option<SpecifierParser<FunctionDecl>>,
    ) -> ParseResult<()> {
        let directive = self.reader.directive()?;
        let macro_token = self.reader.advance()?;
        let macro_name = macro_token.text.clone();
        let multicast = macro_name.contains("_MULTICAST_");
        let sparse = macro_name.contains("_SPARSE_");
        let has_return = macro_name.contains("_RetVal");
        let is_const = macro_name.ends_with("_Const");

        self.reader.expect_symbol("(")?;
        let return_tokens = if has_return {
            let tokens = collect_type_tokens(&mut self.reader)?;
            self.reader.expect_symbol(",")?;
            Some(tokens)
        } else {
            None
        };
        let name = self.reader.expect_identifier("a delegate name")?;
        let sparse_names = if sparse {
            self.reader.expect_symbol(",")?;
            let owner = self.reader.expect_identifier("a sparse delegate owner")?;
            self.reader.expect_symbol(",")?;
            let property = self.reader.expect_identifier("a sparse delegate property")?;
            Some((owner.text, property.text))
        } else {
            None
        };
        let mut diagnostics = Vec::new();
        let mut params = Vec::new();
        while self.reader.eat_symbol(",")? {
            params.push(parse_property(
                &mut self.reader,
                PropertyCategory::RegularParameter,
                PropertyShape::DelegateParameter,
                directive,
                &mut diagnostics,
            )?);
        }
        self.reader.expect_symbol(")")?;
        self.reader.eat_symbol(";")?;

        self.check_delegate_macro(&macro_token, multicast, sparse, has_return, is_const, params.len());

        let mut decl = FunctionDecl::new(if sparse {
            FunctionType::SparseDelegate
        } else {
            FunctionType::Delegate
        });
        decl.flags |= FunctionFlags::DELEGATE | FunctionFlags::PUBLIC;
        if multicast {
            decl.flags |= FunctionFlags::MULTICAST_DELEGATE;
        }
        if is_const {
            decl.flags |= FunctionFlags::CONST;
        }
        decl.export_flags |= FunctionExportFlags::DELEGATE_MACRO;
        decl.macro_name = Some(macro_name);
        decl.directive = directive;
        if let Some((owner, property)) = sparse_names {
            decl.sparse_owner = Some(owner);
            decl.sparse_property = Some(property);
        }

        let engine = format!("{}__DelegateSignature", self.engine_name(&name));
        let outer = self.outer();
        let id = self.header.add_node(
            outer,
            Node::new(name.text.clone(), engine, name.line, NodeKind::Function(decl)),
        );
        self.register_type(&name, id, TypeKind::Delegate { multicast });
        self.capture_tooltip(id);
        let scope = self.scopes.push(Scope::new(ScopeKind::Function, id, NO_KEYWORDS));
        if let Some(mut specifiers) = specifiers {
            let node = self.header.node_mut(id);
            if let NodeKind::Function(decl) = &mut node.kind {
                specifiers.apply(decl, &mut node.meta);
            }
            diagnostics.extend(specifiers.take_diagnostics());
        }

        for param in params {
            self.add_parameter(id, param, false);
        }
        if let Some(tokens) = return_tokens {
            let property = property_from_type(
                PropertyCategory::Return,
                tokens,
                "ReturnValue",
                directive,
                &mut diagnostics,
            );
            self.add_parameter(id, property, true);
        }
        self.report_all(diagnostics);
        self.scopes.pop(scope)?;
        debug!(delegate = %name.text, line = name.line, "parsed delegate");
        Ok(())
    }

    /// The macro name must spell out exactly what its arguments declare.
    fn check_delegate_macro(
        &mut self,
        macro_token: &Token,
        multicast: bool,
        sparse: bool,
        has_return: bool,
        is_const: bool,
        param_count: usize,
    ) {
        if multicast && has_return {
            self.report(
                Diagnostic::error(ErrorCode::E1014)
                    .with_message("Multi-cast delegates cannot have a return value")
                    .at(macro_token),
            );
            return;
        }
        let Some(count) = PARAM_COUNT_SUFFIXES.get(param_count) else {
            self.report(
                Diagnostic::error(ErrorCode::E1014)
                    .with_message(format!(
                        "Delegates support at most {} parameters but '{}' has {param_count}",
                        PARAM_COUNT_SUFFIXES.len() - 1,
                        macro_token.text
                    ))
                    .at(macro_token),
            );
            return;
        };
        let expected = format!(
            "DECLARE_DYNAMIC_{}{}DELEGATE{}{count}{}",
            if multicast { "MULTICAST_" } else { "" },
            if sparse { "SPARSE_" } else { "" },
            if has_return { "_RetVal" } else { "" },
            if is_const { "_Const" } else { "" },
        );
        if expected != macro_token.text {
            self.report(
                Diagnostic::error(ErrorCode::E1004)
                    .with_message(format!(
                        "Unable to parse delegate declaration; expected '{expected}' but found '{}'",
                        macro_token.text
                    ))
                    .at(macro_token),
            );
        }
    }
}

/// Default `_Implementation` / `_Validate` names for net and native events.
fn implementation_names(decl: &mut FunctionDecl, name: &str) {
    let needs_impl = decl.flags.intersects(FunctionFlags::NET_TARGETS)
        || decl.export_flags.contains(FunctionExportFlags::NATIVE_EVENT);
    if needs_impl && decl.cpp_impl_name.is_none() {
        decl.cpp_impl_name = Some(format!("{name}_Implementation"));
    }
    if decl.flags.contains(FunctionFlags::NET_VALIDATE) && decl.cpp_validate_name.is_none() {
        decl.cpp_validate_name = Some(format!("{name}_Validate"));
    }
}
