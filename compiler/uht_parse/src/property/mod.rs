//! Property declarations.
//!
//! One member, parameter or delegate argument is read as
//! `[UPARAM(...)] [const] Type Name [Dim] [: 1] [= Default]`, or through a
//! layout macro such as `LAYOUT_ARRAY(Type, Name, Count)`. The type tokens
//! are resolved straight away when they start with a built-in type;
//! anything naming a declared type is kept as [`PropertyType::Unresolved`]
//! until every header has been parsed.

mod types;

use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::{join_tokens, Token};
use uht_types::{
    CompilerDirective, IntKind, MetaData, PropertyAllocator, PropertyCategory, PropertyDecl,
    PropertyFlags, PropertyType, RefQualifier,
};

use crate::specifier::{SpecifierParser, PARAM_SPECIFIERS};
use crate::stream::TokenStream;
use crate::{FatalError, ParseResult};

pub use types::{resolve_at_parse, resolve_type, TypeError};

/// Tokens that end a type at template depth zero.
const TYPE_TERMINATORS: &[&str] = &[",", "(", ")", ";", "[", ":", "=", "{"];

const LAYOUT_MACROS: &[&str] = &[
    "LAYOUT_FIELD",
    "LAYOUT_MUTABLE_FIELD",
    "LAYOUT_ARRAY",
    "LAYOUT_BITFIELD",
    "LAYOUT_MUTABLE_BITFIELD",
    "LAYOUT_FIELD_INITIALIZED",
    "LAYOUT_MUTABLE_FIELD_INITIALIZED",
    "LAYOUT_FIELD_EDITORONLY",
    "LAYOUT_ARRAY_EDITORONLY",
    "LAYOUT_BITFIELD_EDITORONLY",
];

/// What follows the type.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum PropertyShape {
    /// Class or struct member, read up to (not including) its `;`.
    Member,
    /// Function parameter, read up to the next `,` or `)`.
    Parameter,
    /// Delegate macro arguments `Type, Name`.
    DelegateParameter,
}

/// A property read from source, not yet attached to the type graph.
#[derive(Debug)]
pub struct ParsedProperty {
    pub name: String,
    pub line: u32,
    pub decl: PropertyDecl,
    pub meta: MetaData,
}

/// Declaration text before flags are derived.
struct Syntax {
    leading_const: bool,
    type_tokens: Vec<Token>,
    name: Token,
    array_dimensions: Option<String>,
    is_bitfield: bool,
    default_tokens: Vec<Token>,
    layout_editor_only: bool,
    allocator: PropertyAllocator,
}

impl Syntax {
    fn new(leading_const: bool, type_tokens: Vec<Token>, name: Token) -> Self {
        Syntax {
            leading_const,
            type_tokens,
            name,
            array_dimensions: None,
            is_bitfield: false,
            default_tokens: Vec::new(),
            layout_editor_only: false,
            allocator: PropertyAllocator::Default,
        }
    }
}

/// Read one property declaration.
///
/// `directive` is the compiler-directive composite at the declaration.
pub fn parse_property(
    stream: &mut impl TokenStream,
    category: PropertyCategory,
    shape: PropertyShape,
    directive: CompilerDirective,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParseResult<ParsedProperty> {
    let mut param_specifiers = None;
    if category.is_parameter() && stream.check_ident("UPARAM")? {
        stream.advance()?;
        let mut specifiers = SpecifierParser::new(&PARAM_SPECIFIERS);
        specifiers.parse_specifiers(stream)?;
        param_specifiers = Some(specifiers);
    }
    let leading_const = stream.eat_ident("const")?;

    let is_layout = shape == PropertyShape::Member && {
        let next = stream.peek()?;
        next.is_identifier() && LAYOUT_MACROS.contains(&next.text.as_str())
    };
    let syntax = if is_layout {
        parse_layout(stream, leading_const, diagnostics)?
    } else {
        parse_plain(stream, leading_const, shape, diagnostics)?
    };

    let mut parsed = build_property(category, syntax, directive, diagnostics);
    if let Some(mut specifiers) = param_specifiers {
        specifiers.apply(&mut parsed.decl, &mut parsed.meta);
        diagnostics.extend(specifiers.take_diagnostics());
    }
    Ok(parsed)
}

/// Build a property straight from captured type tokens.
///
/// Used for function return values and delegate return types, where the
/// type was already split off the surrounding declaration.
pub fn property_from_type(
    category: PropertyCategory,
    type_tokens: Vec<Token>,
    name: &str,
    directive: CompilerDirective,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParsedProperty {
    let leading_const = type_tokens
        .first()
        .is_some_and(|t| t.is_identifier_named("const"));
    let line = type_tokens.first().map_or(0, |t| t.line);
    let name = Token::new(
        uht_ir::TokenKind::Identifier,
        name,
        type_tokens.last().map(|t| t.span).unwrap_or_default(),
        line,
    );
    let type_tokens = if leading_const {
        type_tokens[1..].to_vec()
    } else {
        type_tokens
    };
    build_property(
        category,
        Syntax::new(leading_const, type_tokens, name),
        directive,
        diagnostics,
    )
}

fn parse_plain(
    stream: &mut impl TokenStream,
    leading_const: bool,
    shape: PropertyShape,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParseResult<Syntax> {
    let mut tokens = collect_type_tokens(stream)?;
    let mut syntax = if shape == PropertyShape::DelegateParameter {
        stream.expect_symbol(",")?;
        let name = stream.expect_identifier("a parameter name")?;
        Syntax::new(leading_const, tokens, name)
    } else {
        match tokens.pop() {
            Some(name) if name.is_identifier() && !tokens.is_empty() => {
                Syntax::new(leading_const, tokens, name)
            }
            last => {
                let found = last.map_or_else(|| join_tokens(&tokens), |t| t.text);
                let next = stream.peek()?;
                return Err(FatalError::new(
                    ErrorCode::E3005,
                    format!("Missing name for property of type '{found}'"),
                    next,
                ));
            }
        }
    };

    if stream.eat_symbol("[")? {
        let mut dimension = Vec::new();
        let mut depth = 0usize;
        loop {
            let token = stream.advance()?;
            if token.is_eof() {
                return Err(FatalError::expected("']'", &token));
            }
            if token.is_symbol("[") {
                depth += 1;
            } else if token.is_symbol("]") {
                if depth == 0 {
                    break;
                }
                depth -= 1;
            }
            dimension.push(token);
        }
        syntax.array_dimensions = Some(join_tokens(&dimension));
    }

    if stream.eat_symbol(":")? {
        let width = stream.advance()?;
        check_bit_width(&width, &syntax.name, diagnostics);
        syntax.is_bitfield = true;
    }

    match shape {
        PropertyShape::Parameter => {
            if stream.eat_symbol("=")? {
                syntax.default_tokens = collect_argument(stream)?;
            }
        }
        PropertyShape::Member => {
            if stream.eat_symbol("=")? || stream.check_symbol("{")? {
                skip_initializer(stream)?;
            }
        }
        PropertyShape::DelegateParameter => {}
    }
    Ok(syntax)
}

/// `LAYOUT_*(Type, Name[, Extra])`, with the type optionally parenthesized.
fn parse_layout(
    stream: &mut impl TokenStream,
    leading_const: bool,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParseResult<Syntax> {
    let keyword = stream.advance()?;
    stream.expect_symbol("(")?;
    let type_tokens = if stream.check_symbol("(")? {
        stream.take_parenthesized()?
    } else {
        collect_type_tokens(stream)?
    };
    stream.expect_symbol(",")?;
    let name = stream.expect_identifier("a property name")?;
    let mut syntax = Syntax::new(leading_const, type_tokens, name);
    syntax.allocator = PropertyAllocator::MemoryImage;
    let base = match keyword.text.strip_suffix("_EDITORONLY") {
        Some(base) => {
            syntax.layout_editor_only = true;
            base
        }
        None => keyword.text.as_str(),
    };
    match base {
        "LAYOUT_ARRAY" => {
            stream.expect_symbol(",")?;
            syntax.array_dimensions = Some(join_tokens(&collect_argument(stream)?));
        }
        "LAYOUT_BITFIELD" | "LAYOUT_MUTABLE_BITFIELD" => {
            stream.expect_symbol(",")?;
            let width = stream.advance()?;
            check_bit_width(&width, &syntax.name, diagnostics);
            syntax.is_bitfield = true;
        }
        "LAYOUT_FIELD_INITIALIZED" | "LAYOUT_MUTABLE_FIELD_INITIALIZED" => {
            stream.expect_symbol(",")?;
            collect_argument(stream)?;
        }
        _ => {}
    }
    stream.expect_symbol(")")?;
    Ok(syntax)
}

fn check_bit_width(width: &Token, name: &Token, diagnostics: &mut Vec<Diagnostic>) {
    if width.text != "1" {
        diagnostics.push(
            Diagnostic::error(ErrorCode::E3004)
                .with_message(format!(
                    "Bit-field '{}' must have a width of 1 but has '{width}'",
                    name.text
                ))
                .at(width),
        );
    }
}

fn build_property(
    category: PropertyCategory,
    syntax: Syntax,
    directive: CompilerDirective,
    diagnostics: &mut Vec<Diagnostic>,
) -> ParsedProperty {
    let ty = match resolve_at_parse(&syntax.type_tokens) {
        Some(Ok(ty)) => ty,
        Some(Err(err)) => {
            diagnostics.push(err.to_diagnostic());
            PropertyType::Unknown(join_tokens(&syntax.type_tokens))
        }
        None => PropertyType::Unresolved(syntax.type_tokens.clone()),
    };
    let ty = if syntax.is_bitfield {
        match bitfield_type(ty) {
            Ok(ty) => ty,
            Err(ty) => {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E3004)
                        .with_message(format!(
                            "Bit-field '{}' must be bool or an unsigned integer, not '{}'",
                            syntax.name.text,
                            ty.cpp_type()
                        ))
                        .at(&syntax.name),
                );
                ty
            }
        }
    } else {
        ty
    };

    let mut decl = PropertyDecl::new(category, ty);
    decl.array_dimensions = syntax.array_dimensions;
    decl.is_bitfield = syntax.is_bitfield;
    decl.default_value_tokens = syntax.default_tokens;
    decl.allocator = syntax.allocator;
    decl.directive = directive;

    if syntax.layout_editor_only
        || directive.intersects(
            CompilerDirective::WITH_EDITOR | CompilerDirective::WITH_EDITOR_ONLY_DATA,
        )
    {
        decl.flags |= PropertyFlags::EDITOR_ONLY;
    }

    let has_reference = syntax.type_tokens.iter().any(|t| t.is_symbol("&"));
    let has_const = syntax.leading_const
        || syntax
            .type_tokens
            .iter()
            .any(|t| t.is_identifier_named("const"));
    decl.ref_qualifier = match (has_reference, has_const) {
        (false, _) => RefQualifier::None,
        (true, true) => RefQualifier::ConstRef,
        (true, false) => RefQualifier::NonConstRef,
    };

    match category {
        PropertyCategory::Member => {
            if has_reference {
                diagnostics.push(
                    Diagnostic::error(ErrorCode::E3007)
                        .with_message(format!(
                            "Property '{}' cannot be a reference",
                            syntax.name.text
                        ))
                        .at(&syntax.name),
                );
            }
        }
        PropertyCategory::RegularParameter | PropertyCategory::ReplicatedParameter => {
            decl.flags |= PropertyFlags::PARM;
            if decl.ref_qualifier == RefQualifier::NonConstRef {
                decl.flags |= PropertyFlags::OUT_PARM;
            }
            if syntax.leading_const {
                decl.flags |= PropertyFlags::CONST_PARM;
            }
        }
        PropertyCategory::Return => {
            decl.flags |= PropertyFlags::PARM | PropertyFlags::OUT_PARM | PropertyFlags::RETURN_PARM;
        }
    }

    if syntax.name.text.ends_with("_DEPRECATED") {
        decl.flags |= PropertyFlags::DEPRECATED;
    }

    ParsedProperty {
        name: syntax.name.text,
        line: syntax.name.line,
        decl,
        meta: MetaData::new(),
    }
}

/// Storage type of a `Type Name : 1` declaration.
///
/// Unresolved types pass through and are checked again after resolution.
/// On failure the type is handed back unchanged.
pub fn bitfield_type(ty: PropertyType) -> Result<PropertyType, PropertyType> {
    match ty {
        PropertyType::Bool { .. } => Ok(PropertyType::Bool { native: true }),
        PropertyType::Int(IntKind::UInt8 | IntKind::UInt16 | IntKind::UInt32) => {
            Ok(PropertyType::Bool { native: false })
        }
        PropertyType::Unresolved(_) | PropertyType::Unknown(_) => Ok(ty),
        other => Err(other),
    }
}

/// Type tokens up to a terminator at template depth zero.
pub(crate) fn collect_type_tokens(stream: &mut impl TokenStream) -> ParseResult<Vec<Token>> {
    let mut depth = 0usize;
    let mut tokens = Vec::new();
    loop {
        let next = stream.peek()?;
        if next.is_eof() {
            return Err(FatalError::expected("a property declaration", next));
        }
        if depth == 0 && TYPE_TERMINATORS.iter().any(|s| next.is_symbol(s)) {
            return Ok(tokens);
        }
        if next.is_symbol("<") {
            depth += 1;
        } else if next.is_symbol(">") {
            if depth == 0 {
                return Err(FatalError::new(
                    ErrorCode::E0012,
                    "Unexpected '>' without a matching '<'",
                    next,
                ));
            }
            depth -= 1;
        }
        tokens.push(stream.advance()?);
    }
}

/// Tokens up to the next `,` or `)` outside any bracket pair.
pub(crate) fn collect_argument(stream: &mut impl TokenStream) -> ParseResult<Vec<Token>> {
    let mut depth = 0usize;
    let mut tokens = Vec::new();
    loop {
        let next = stream.peek()?;
        if next.is_eof() {
            return Err(FatalError::expected("')'", next));
        }
        if depth == 0 && (next.is_symbol(",") || next.is_symbol(")")) {
            return Ok(tokens);
        }
        if next.is_symbol("(") || next.is_symbol("{") {
            depth += 1;
        } else if next.is_symbol(")") || next.is_symbol("}") {
            depth = depth.saturating_sub(1);
        }
        tokens.push(stream.advance()?);
    }
}

/// Skip a member initializer (`= value` or `{ ... }`) up to its `;`.
fn skip_initializer(stream: &mut impl TokenStream) -> ParseResult<()> {
    let mut depth = 0usize;
    loop {
        let next = stream.peek()?;
        if next.is_eof() {
            return Err(FatalError::expected("';'", next));
        }
        if depth == 0 && next.is_symbol(";") {
            return Ok(());
        }
        if next.is_symbol("(") || next.is_symbol("{") {
            depth += 1;
        } else if next.is_symbol(")") || next.is_symbol("}") {
            depth = depth.saturating_sub(1);
        }
        stream.advance()?;
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
