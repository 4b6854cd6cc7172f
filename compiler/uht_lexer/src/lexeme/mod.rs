//! Lexer output types.

use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::{Span, Token};

/// A comment with its delimiters intact.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Comment {
    pub text: String,
    /// Line the comment starts on.
    pub line: u32,
    /// Line the comment ends on (differs for block comments).
    pub end_line: u32,
    pub span: Span,
}

/// A preprocessor line, without the leading `#`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Directive {
    /// Directive text with continuation lines joined by a single space.
    pub text: String,
    pub line: u32,
    pub span: Span,
}

/// One item of the lexed header.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Lexeme {
    Token(Token),
    Comment(Comment),
    Directive(Directive),
}

impl Lexeme {
    pub fn line(&self) -> u32 {
        match self {
            Lexeme::Token(token) => token.line,
            Lexeme::Comment(comment) => comment.line,
            Lexeme::Directive(directive) => directive.line,
        }
    }
}

/// A lexical error. Always fatal for the header being lexed.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct LexError {
    pub code: ErrorCode,
    pub message: String,
    pub line: u32,
    pub span: Span,
}

impl LexError {
    pub(crate) fn new(code: ErrorCode, message: impl Into<String>, line: u32, span: Span) -> Self {
        LexError {
            code,
            message: message.into(),
            line,
            span,
        }
    }

    /// Convert to a diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_line(self.line)
            .with_span(self.span)
    }
}
