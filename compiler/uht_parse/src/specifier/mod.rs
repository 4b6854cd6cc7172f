//! Specifier and metadata lists.
//!
//! `UCLASS(Blueprintable, Config=Game, meta=(DisplayName="Widget"))` is a
//! comma-separated list of specifiers. Each name is looked up in a
//! per-declaration-kind [`SpecifierTable`], its value is read according to
//! the entry's [`ValueShape`], and the handler runs either as soon as the
//! declaration node exists or, for deferred entries, after every
//! immediate one has run.

mod tables;

use tracing::trace;
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::{join_tokens, Token};
use uht_types::MetaData;

use crate::stream::TokenStream;
use crate::{FatalError, ParseResult};

pub use tables::{
    CLASS_SPECIFIERS, ENUM_SPECIFIERS, FUNCTION_SPECIFIERS, PARAM_SPECIFIERS,
    PROPERTY_SPECIFIERS, STRUCT_SPECIFIERS,
};

/// How a specifier's value is written.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum ValueShape {
    /// `Name`
    None,
    /// `Name=Value`
    String,
    /// `Name` or `Name=Value`
    OptionalString,
    /// `Name=Value` or `Name=(Value)`, exactly one value.
    SingleString,
    /// `Name=Value` or `Name=(A, B)`, at least one value.
    StringList,
    /// `Name`, `Name=Value` or `Name=(A, B)`, possibly empty.
    OptionalStringList,
    /// `Name=(Key=Value, Key)`
    KeyValueList,
    /// `Name(Key=Value)` or `Name=(Key=Value)`
    OptionalEqualsKeyValueList,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SpecifierValue {
    None,
    String(String),
    StringList(Vec<String>),
    KeyValues(Vec<(String, Option<String>)>),
}

impl SpecifierValue {
    /// Single string value, if there is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SpecifierValue::String(value) => Some(value),
            SpecifierValue::StringList(values) if values.len() == 1 => Some(&values[0]),
            _ => None,
        }
    }

    pub fn to_list(&self) -> Vec<String> {
        match self {
            SpecifierValue::None | SpecifierValue::KeyValues(_) => Vec::new(),
            SpecifierValue::String(value) => vec![value.clone()],
            SpecifierValue::StringList(values) => values.clone(),
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum SpecifierOutcome {
    Handled,
    /// The handler did not recognize the specifier after all.
    Unknown,
}

/// Rejection from a specifier handler.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SpecifierError {
    pub code: ErrorCode,
    pub message: String,
}

impl SpecifierError {
    pub fn invalid(message: impl Into<String>) -> Self {
        SpecifierError {
            code: ErrorCode::E2005,
            message: message.into(),
        }
    }

    pub fn conflict(code: ErrorCode, message: impl Into<String>) -> Self {
        SpecifierError {
            code,
            message: message.into(),
        }
    }
}

pub type SpecifierHandler<D> =
    fn(&mut D, &mut MetaData, &SpecifierValue) -> Result<SpecifierOutcome, SpecifierError>;

pub struct Specifier<D: 'static> {
    pub name: &'static str,
    pub shape: ValueShape,
    pub deferred: bool,
    pub handler: SpecifierHandler<D>,
}

/// Specifiers accepted by one declaration kind.
pub struct SpecifierTable<D: 'static> {
    /// Context label, e.g. `Class` (used as `Class specifiers`).
    pub label: &'static str,
    pub entries: &'static [Specifier<D>],
}

impl<D> SpecifierTable<D> {
    /// Case-insensitive lookup.
    pub fn find(&self, name: &str) -> Option<&'static Specifier<D>> {
        self.entries
            .iter()
            .find(|entry| entry.name.eq_ignore_ascii_case(name))
    }

    pub fn context(&self) -> String {
        format!("{} specifiers", self.label)
    }
}

struct Parsed<D: 'static> {
    specifier: &'static Specifier<D>,
    value: SpecifierValue,
    token: Token,
}

/// Specifiers read for one declaration, waiting for its node.
pub struct SpecifierParser<D: 'static> {
    table: &'static SpecifierTable<D>,
    parsed: Vec<Parsed<D>>,
    deferred: Vec<Parsed<D>>,
    diagnostics: Vec<Diagnostic>,
}

impl<D> SpecifierParser<D> {
    pub fn new(table: &'static SpecifierTable<D>) -> Self {
        SpecifierParser {
            table,
            parsed: Vec::new(),
            deferred: Vec::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Read a required `( ... )` specifier list.
    pub fn parse_specifiers(&mut self, stream: &mut impl TokenStream) -> ParseResult<()> {
        stream.expect_symbol("(")?;
        self.parse_list(stream)
    }

    fn parse_list(&mut self, stream: &mut impl TokenStream) -> ParseResult<()> {
        if stream.eat_symbol(")")? {
            return Ok(());
        }
        loop {
            let name = stream.expect_identifier("a specifier name")?;
            match self.table.find(&name.text) {
                Some(specifier) => {
                    let value = parse_value(stream, specifier, &name)?;
                    self.parsed.push(Parsed {
                        specifier,
                        value,
                        token: name,
                    });
                }
                None => {
                    self.diagnostics.push(
                        Diagnostic::error(ErrorCode::E2001)
                            .with_message(format!(
                                "Unknown {} specifier '{}'",
                                self.table.label.to_ascii_lowercase(),
                                name.text
                            ))
                            .with_context(self.table.context())
                            .at(&name),
                    );
                    skip_value(stream)?;
                }
            }
            if stream.eat_symbol(")")? {
                return Ok(());
            }
            stream.expect_symbol(",")?;
        }
    }

    /// Run every immediate handler; queue the deferred ones.
    pub fn dispatch(&mut self, decl: &mut D, meta: &mut MetaData) {
        for parsed in std::mem::take(&mut self.parsed) {
            if parsed.specifier.deferred {
                self.deferred.push(parsed);
            } else {
                self.run(&parsed, decl, meta);
            }
        }
    }

    /// Run deferred handlers in encounter order.
    pub fn parse_deferred(&mut self, decl: &mut D, meta: &mut MetaData) {
        for parsed in std::mem::take(&mut self.deferred) {
            self.run(&parsed, decl, meta);
        }
    }

    /// Dispatch then run deferred handlers.
    pub fn apply(&mut self, decl: &mut D, meta: &mut MetaData) {
        self.dispatch(decl, meta);
        self.parse_deferred(decl, meta);
    }

    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn run(&mut self, parsed: &Parsed<D>, decl: &mut D, meta: &mut MetaData) {
        trace!(specifier = parsed.specifier.name, "applying specifier");
        match (parsed.specifier.handler)(decl, meta, &parsed.value) {
            Ok(SpecifierOutcome::Handled) => {}
            Ok(SpecifierOutcome::Unknown) => self.diagnostics.push(
                Diagnostic::error(ErrorCode::E2003)
                    .with_message(format!(
                        "Specifier '{}' was registered but not handled",
                        parsed.specifier.name
                    ))
                    .with_context(self.table.context())
                    .at(&parsed.token),
            ),
            Err(err) => self.diagnostics.push(
                Diagnostic::error(err.code)
                    .with_message(err.message)
                    .with_context(self.table.context())
                    .at(&parsed.token),
            ),
        }
    }
}

fn value_error(name: &Token, shape: &str) -> FatalError {
    FatalError::new(
        ErrorCode::E2002,
        format!("Specifier '{}' must be given {shape}", name.text),
        name,
    )
}

fn parse_value<D>(
    stream: &mut impl TokenStream,
    specifier: &Specifier<D>,
    name: &Token,
) -> ParseResult<SpecifierValue> {
    let has_equals = stream.check_symbol("=")?;
    match specifier.shape {
        ValueShape::None => {
            if has_equals {
                return Err(value_error(name, "no value"));
            }
            Ok(SpecifierValue::None)
        }
        ValueShape::String => {
            if !stream.eat_symbol("=")? {
                return Err(value_error(name, "a value"));
            }
            Ok(SpecifierValue::String(read_string(stream)?))
        }
        ValueShape::OptionalString => {
            if !stream.eat_symbol("=")? {
                return Ok(SpecifierValue::None);
            }
            Ok(SpecifierValue::String(read_string(stream)?))
        }
        ValueShape::SingleString => {
            if !stream.eat_symbol("=")? {
                return Err(value_error(name, "a value"));
            }
            let values = read_string_list(stream)?;
            match <[String; 1]>::try_from(values) {
                Ok([value]) => Ok(SpecifierValue::String(value)),
                Err(_) => Err(value_error(name, "exactly one value")),
            }
        }
        ValueShape::StringList => {
            if !stream.eat_symbol("=")? {
                return Err(value_error(name, "a value"));
            }
            let values = read_string_list(stream)?;
            if values.is_empty() {
                return Err(value_error(name, "at least one value"));
            }
            Ok(SpecifierValue::StringList(values))
        }
        ValueShape::OptionalStringList => {
            if !stream.eat_symbol("=")? {
                return Ok(SpecifierValue::StringList(Vec::new()));
            }
            Ok(SpecifierValue::StringList(read_string_list(stream)?))
        }
        ValueShape::KeyValueList => {
            if !stream.eat_symbol("=")? {
                return Err(value_error(name, "a key-value list"));
            }
            Ok(SpecifierValue::KeyValues(read_key_values(stream, true)?))
        }
        ValueShape::OptionalEqualsKeyValueList => {
            stream.eat_symbol("=")?;
            Ok(SpecifierValue::KeyValues(read_key_values(stream, true)?))
        }
    }
}

/// Value tokens up to the next top-level `,` or `)`.
fn read_value_tokens(stream: &mut impl TokenStream) -> ParseResult<Vec<Token>> {
    let mut depth = 0usize;
    let mut tokens = Vec::new();
    loop {
        let next = stream.peek()?;
        if next.is_eof() {
            return Err(FatalError::expected("')'", next));
        }
        if depth == 0 && (next.is_symbol(",") || next.is_symbol(")")) {
            break;
        }
        if next.is_symbol("(") {
            depth += 1;
        } else if next.is_symbol(")") {
            depth -= 1;
        }
        tokens.push(stream.advance()?);
    }
    Ok(tokens)
}

/// A specifier string value. A lone string literal is unescaped.
fn read_string(stream: &mut impl TokenStream) -> ParseResult<String> {
    let tokens = read_value_tokens(stream)?;
    Ok(tokens_to_string(&tokens, true))
}

fn tokens_to_string(tokens: &[Token], unescape: bool) -> String {
    match tokens {
        [single] => {
            let unquoted = if unescape {
                single.string_value()
            } else {
                single.raw_string_value().map(str::to_owned)
            };
            unquoted.unwrap_or_else(|| single.text.clone())
        }
        _ => join_tokens(tokens),
    }
}

/// `Value` or `(A, B, C)`.
fn read_string_list(stream: &mut impl TokenStream) -> ParseResult<Vec<String>> {
    if !stream.eat_symbol("(")? {
        return Ok(vec![read_string(stream)?]);
    }
    let mut values = Vec::new();
    if stream.eat_symbol(")")? {
        return Ok(values);
    }
    loop {
        values.push(read_string(stream)?);
        if stream.eat_symbol(")")? {
            return Ok(values);
        }
        stream.expect_symbol(",")?;
    }
}

/// `(Key=Value, Key)`.
fn read_key_values(
    stream: &mut impl TokenStream,
    unescape: bool,
) -> ParseResult<Vec<(String, Option<String>)>> {
    stream.expect_symbol("(")?;
    let mut pairs = Vec::new();
    if stream.eat_symbol(")")? {
        return Ok(pairs);
    }
    loop {
        let key = stream.expect_identifier("a metadata key")?;
        let value = if stream.eat_symbol("=")? {
            let tokens = read_value_tokens(stream)?;
            Some(tokens_to_string(&tokens, unescape))
        } else {
            None
        };
        pairs.push((key.text, value));
        if stream.eat_symbol(")")? {
            return Ok(pairs);
        }
        stream.expect_symbol(",")?;
    }
}

fn skip_value(stream: &mut impl TokenStream) -> ParseResult<()> {
    if !stream.eat_symbol("=")? {
        return Ok(());
    }
    if stream.check_symbol("(")? {
        stream.take_parenthesized()?;
        return Ok(());
    }
    read_value_tokens(stream)?;
    Ok(())
}

/// Copy `meta=(...)` pairs into `meta`; a key without value becomes `true`.
pub fn add_meta_pairs(meta: &mut MetaData, value: &SpecifierValue) {
    if let SpecifierValue::KeyValues(pairs) = value {
        for (key, value) in pairs {
            meta.add(key.clone(), value.clone().unwrap_or_else(|| "true".to_owned()));
        }
    }
}

/// Parse an optional `UMETA(Key=Value, ...)` block into `meta` at `index`.
///
/// Values are kept verbatim: embedded `\"` stays escaped. Returns whether
/// the keyword was present.
pub fn parse_field_metadata(
    stream: &mut impl TokenStream,
    meta: &mut MetaData,
    index: Option<u32>,
) -> ParseResult<bool> {
    if !stream.check_ident("UMETA")? {
        return Ok(false);
    }
    let keyword = stream.advance()?;
    let pairs = read_key_values(stream, false)?;
    if pairs.is_empty() {
        return Err(FatalError::new(
            ErrorCode::E2004,
            "UMETA must contain at least one entry",
            &keyword,
        ));
    }
    for (key, value) in pairs {
        let value = value.unwrap_or_else(|| "true".to_owned());
        match index {
            Some(index) => meta.add_indexed(key, index, value),
            None => meta.add(key, value),
        }
    }
    Ok(true)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
