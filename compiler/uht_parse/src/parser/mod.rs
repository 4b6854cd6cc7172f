//! Statement dispatcher and declaration parsers.
//!
//! [`HeaderParser`] walks one header statement by statement. The next
//! identifier is looked up in the keyword tables of the open scopes: the
//! innermost scope's table is searched in full, outer tables only for
//! entries flagged `all_scopes`. A statement no keyword claims is skipped
//! as one declaration; inside a class body the skipped tokens are kept as
//! a [`RecordedDeclaration`] for constructor and serializer matching.
//!
//! Declaration parsers live in sibling files, each adding an
//! `impl HeaderParser` block:
//! - `class`: `UCLASS`, `UINTERFACE`, native interfaces, class bodies
//! - `structs`: `USTRUCT`
//! - `enums`: `UENUM`
//! - `function`: `UFUNCTION` and dynamic delegate macros
//! - `members`: `UPROPERTY`
//! - `keywords`: the per-scope keyword tables

mod class;
mod enums;
mod function;
mod keywords;
mod members;
mod structs;

use tracing::{debug, trace};
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::Token;
use uht_types::{
    ClassType, FunctionFlags, HeaderFile, NodeId, NodeKind, RecordedDeclaration, TypeEntry,
    TypeKind, TypeTable,
};

use crate::reader::TokenReader;
use crate::scope::{capture_tooltip, Scope, ScopeKind, ScopeStack};
use crate::stream::TokenStream;
use crate::{FatalError, ParseConfig, ParseResult};

use keywords::{CATCH_ALLS, GLOBAL_KEYWORDS};

/// Whether a keyword handler took the statement.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Dispatch {
    Handled,
    /// Not this handler's statement; the stream is where it was.
    Declined,
}

/// Handler for a statement starting with a keyword. The keyword itself is
/// still the next token.
pub type KeywordHandler = fn(&mut HeaderParser<'_>) -> ParseResult<Dispatch>;

/// Handler tried, in table order, on a statement no keyword claimed.
pub type CatchAll = fn(&mut HeaderParser<'_>) -> ParseResult<Dispatch>;

#[derive(Debug)]
pub struct Keyword {
    pub name: &'static str,
    /// Also matches when an inner scope is open.
    pub all_scopes: bool,
    pub handler: KeywordHandler,
}

/// Parse one header into its type graph.
///
/// Fatal errors end the parse early; they and every non-fatal problem end
/// up in `header.diagnostics`.
#[tracing::instrument(level = "debug", skip_all, fields(header = %header.file_name))]
pub fn parse_header(config: &ParseConfig, types: &TypeTable, mut header: HeaderFile) -> HeaderFile {
    let reader = match TokenReader::new(&header.source, config) {
        Ok(reader) => reader,
        Err(err) => {
            header.push_diagnostic(err.to_diagnostic());
            return header;
        }
    };
    let mut parser = HeaderParser {
        header,
        reader,
        scopes: ScopeStack::new(),
        types,
    };
    let parsed = parser.parse_global();
    parser.flush_reader_diagnostics();
    if let Err(err) = parsed {
        debug!(code = %err.code, line = err.line, "header parse aborted");
        let context = parser.scopes.context(&parser.header);
        parser
            .header
            .push_diagnostic(err.with_context(context).to_diagnostic());
    }
    parser.header
}

pub struct HeaderParser<'a> {
    header: HeaderFile,
    reader: TokenReader,
    scopes: ScopeStack,
    types: &'a TypeTable,
}

impl HeaderParser<'_> {
    fn parse_global(&mut self) -> ParseResult<()> {
        let root = self.header.root();
        let scope = self
            .scopes
            .push(Scope::new(ScopeKind::Global, root, GLOBAL_KEYWORDS));
        self.parse_statements(None)?;
        self.scopes.pop(scope)?;
        self.finish_header();
        Ok(())
    }

    /// Parse statements until `terminator` (left unconsumed) or end of file.
    fn parse_statements(&mut self, terminator: Option<&str>) -> ParseResult<()> {
        loop {
            self.reader.clear_comments();
            self.reader.peek()?;
            self.flush_reader_diagnostics();
            let next = self.reader.peek()?;
            if next.is_eof() {
                return match terminator {
                    Some(symbol) => Err(FatalError::expected(&format!("'{symbol}'"), next)),
                    None => Ok(()),
                };
            }
            if terminator.is_some_and(|symbol| next.is_symbol(symbol)) {
                return Ok(());
            }
            self.parse_statement()?;
        }
    }

    fn parse_statement(&mut self) -> ParseResult<()> {
        let next = self.reader.peek()?.clone();
        if next.is_symbol(";") {
            self.reader.advance()?;
            return Ok(());
        }
        if next.is_identifier() {
            if let Some(keyword) = self.find_keyword(&next.text) {
                trace!(keyword = keyword.name, line = next.line, "dispatching");
                if (keyword.handler)(self)? == Dispatch::Handled {
                    return Ok(());
                }
                return self.skip_declaration();
            }
            for catch_all in CATCH_ALLS {
                if catch_all(self)? == Dispatch::Handled {
                    return Ok(());
                }
            }
            if is_object_like_macro(&next.text) && !self.reader.peek_nth(1)?.is_symbol("(") {
                self.reader.advance()?;
                return Ok(());
            }
        }
        self.skip_declaration()
    }

    fn find_keyword(&self, name: &str) -> Option<&'static Keyword> {
        self.scopes.iter().enumerate().find_map(|(depth, scope)| {
            let keywords: &'static [Keyword] = scope.keywords;
            keywords
                .iter()
                .find(|keyword| keyword.name == name && (depth == 0 || keyword.all_scopes))
        })
    }

    /// Skip one declaration, recording it when directly inside a class body.
    fn skip_declaration(&mut self) -> ParseResult<()> {
        let class = match self.scopes.top() {
            Some(scope) if scope.kind == ScopeKind::Class => Some(scope.node),
            _ => None,
        };
        let Some(class) = class else {
            return self.skip_tokens();
        };
        let directive = self.reader.directive()?;
        let line = self.reader.peek()?.line;
        self.reader.begin_recording();
        let skipped = self.skip_tokens();
        let tokens = self.reader.end_recording();
        skipped?;
        if !tokens.is_empty() {
            if let Some(decl) = self.header.node_mut(class).as_class_mut() {
                decl.declarations.push(RecordedDeclaration {
                    tokens,
                    directive,
                    line,
                });
            }
        }
        Ok(())
    }

    /// Consume up to a `;` at depth zero or a `}` that returns to depth zero.
    ///
    /// A call of an upper-case macro with no `;` after it ends at the line
    /// break following its closing parenthesis. A `}` closing the enclosing
    /// scope is left for the caller.
    fn skip_tokens(&mut self) -> ParseResult<()> {
        let first = self.reader.advance()?;
        if first.is_eof() || first.is_symbol(";") || first.is_symbol("}") {
            return Ok(());
        }
        let macro_call = first.is_identifier()
            && is_macro_name(&first.text)
            && self.reader.peek()?.is_symbol("(");
        let mut depth = usize::from(bracket_delta(&first) > 0);
        let mut last_line = first.line;
        loop {
            let next = self.reader.peek()?;
            if next.is_eof() {
                return Ok(());
            }
            if depth == 0 {
                if next.is_symbol("}") {
                    return Ok(());
                }
                if macro_call && next.line > last_line && !next.is_symbol(";") {
                    return Ok(());
                }
            }
            let token = self.reader.advance()?;
            last_line = token.line;
            match bracket_delta(&token) {
                1 => depth += 1,
                -1 => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 && token.is_symbol("}") {
                        self.reader.eat_symbol(";")?;
                        return Ok(());
                    }
                }
                _ => {
                    if depth == 0 && token.is_symbol(";") {
                        return Ok(());
                    }
                }
            }
        }
    }

    /// Header-level checks once every statement has been read.
    fn finish_header(&mut self) {
        let generated = self.header.generated_include_name();
        let includes = self.reader.includes().to_vec();
        let mut generated_line = None;
        for include in &includes {
            if let Some(line) = generated_line {
                self.report(
                    Diagnostic::error(ErrorCode::E5006)
                        .with_message(format!(
                            "#include \"{}\" found after '{generated}' on line {line}; the generated header must be the last include",
                            include.path
                        ))
                        .with_line(include.line),
                );
            } else if file_name(&include.path) == generated {
                generated_line = Some(include.line);
            }
        }
        self.header.includes = includes.into_iter().map(|include| include.path).collect();
        self.header.generated_include_line = generated_line;

        let ids: Vec<NodeId> = self.header.node_ids().collect();
        let reflected = ids.iter().any(|&id| {
            matches!(
                self.header.node(id).kind,
                NodeKind::Class(_) | NodeKind::Struct(_) | NodeKind::Enum(_)
            ) || self
                .header
                .node(id)
                .as_function()
                .is_some_and(|f| f.flags.contains(FunctionFlags::DELEGATE))
        });
        if reflected && generated_line.is_none() {
            self.report(
                Diagnostic::error(ErrorCode::E1012)
                    .with_message(format!(
                        "Header declares reflected types but does not include '{generated}'"
                    ))
                    .with_line(1),
            );
        }

        for id in ids {
            let node = self.header.node(id);
            let Some(class) = node.as_class() else {
                continue;
            };
            if class.class_type == ClassType::Interface
                && class.alternate_object.is_none()
            {
                let diagnostic = Diagnostic::error(ErrorCode::E1013)
                    .with_message(format!(
                        "UINTERFACE '{}' has no matching native interface 'I{}'",
                        node.source_name, node.engine_name
                    ))
                    .with_line(node.line)
                    .with_context(node.context());
                self.header.push_diagnostic(diagnostic);
            }
        }
    }

    // Shared helpers for the declaration parsers

    /// Record a non-fatal diagnostic with the current scope as context.
    fn report(&mut self, diagnostic: Diagnostic) {
        let diagnostic = if diagnostic.context.is_none() {
            diagnostic.with_context(self.scopes.context(&self.header))
        } else {
            diagnostic
        };
        self.header.push_diagnostic(diagnostic);
    }

    fn report_all(&mut self, diagnostics: Vec<Diagnostic>) {
        for diagnostic in diagnostics {
            self.report(diagnostic);
        }
    }

    /// Move warnings the reader raised while scanning under the current scope.
    fn flush_reader_diagnostics(&mut self) {
        let diagnostics = self.reader.take_diagnostics();
        self.report_all(diagnostics);
    }

    /// Node of the innermost open scope.
    fn outer(&self) -> NodeId {
        self.scopes.top().map_or(self.header.root(), |scope| scope.node)
    }

    /// Publish a type in the shared table; a second declaration is an error.
    fn register_type(&mut self, name: &Token, id: NodeId, kind: TypeKind) {
        let entry = TypeEntry {
            id: self.header.type_ref(id),
            kind,
        };
        if self.types.register(&name.text, entry).is_err() {
            self.report(
                Diagnostic::error(ErrorCode::E1007)
                    .with_message(format!("Type '{}' is declared more than once", name.text))
                    .at(name),
            );
        }
    }

    /// Move buffered doc comments onto `id` as tooltip metadata.
    fn capture_tooltip(&mut self, id: NodeId) {
        let node = self.header.node_mut(id);
        if capture_tooltip(self.reader.comments(), &mut node.meta) {
            self.reader.clear_comments();
        }
    }

    /// `FOO_API` export macro, if present.
    fn parse_api(&mut self) -> ParseResult<Option<String>> {
        let next = self.reader.peek()?;
        if next.is_identifier() && next.text.ends_with("_API") {
            return Ok(Some(self.reader.advance()?.text));
        }
        Ok(None)
    }

    /// Skip a `UE_DEPRECATED(...)`-style annotation if one is next.
    fn skip_annotation(&mut self) -> ParseResult<()> {
        while self.reader.check_ident("UE_DEPRECATED")? {
            self.reader.advance()?;
            self.reader.take_parenthesized()?;
        }
        Ok(())
    }

    /// Split a declared name into its one-letter prefix and engine name.
    fn engine_name(&mut self, name: &Token) -> String {
        let engine = name.text.get(1..).unwrap_or_default();
        if engine.is_empty() {
            self.report(
                Diagnostic::error(ErrorCode::E1002)
                    .with_message(format!(
                        "Name '{}' is empty once its prefix is removed",
                        name.text
                    ))
                    .at(name),
            );
            return name.text.clone();
        }
        engine.to_owned()
    }

    /// Open `{`, parse the body in a new scope, consume `}` and `;`.
    ///
    /// Returns the line of the closing brace.
    fn parse_body(
        &mut self,
        kind: ScopeKind,
        node: NodeId,
        keywords: &'static [Keyword],
    ) -> ParseResult<u32> {
        self.reader.expect_symbol("{")?;
        let scope = self.scopes.push(Scope::new(kind, node, keywords));
        self.parse_statements(Some("}"))?;
        self.scopes.pop(scope)?;
        let close = self.reader.expect_symbol("}")?;
        self.reader.expect_symbol(";")?;
        Ok(close.line)
    }
}

/// Upper-case identifier with an underscore that is not an export macro.
fn is_object_like_macro(text: &str) -> bool {
    is_macro_name(text) && text.contains('_') && !text.ends_with("_API")
}

fn is_macro_name(text: &str) -> bool {
    text.bytes().any(|b| b.is_ascii_uppercase())
        && text
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit() || b == b'_')
}

fn bracket_delta(token: &Token) -> i8 {
    if ["(", "[", "{"].iter().any(|s| token.is_symbol(s)) {
        1
    } else if [")", "]", "}"].iter().any(|s| token.is_symbol(s)) {
        -1
    } else {
        0
    }
}

fn file_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
