//! Fatal parse errors.
//!
//! A [`FatalError`] aborts the current header's parse. Everything else is a
//! [`Diagnostic`] pushed onto the header and parsing carries on.

use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::{Span, Token};
use uht_lexer::LexError;

/// Error that stops parsing the current header.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct FatalError {
    pub code: ErrorCode,
    pub message: String,
    pub line: u32,
    pub span: Span,
    /// Scope context, filled in by the statement dispatcher on unwind.
    pub context: Option<String>,
}

/// Result type for anything that can hit a fatal error.
pub type ParseResult<T> = Result<T, FatalError>;

impl FatalError {
    #[cold]
    pub fn new(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        FatalError {
            code,
            message: message.into(),
            line: token.line,
            span: token.span,
            context: None,
        }
    }

    #[cold]
    pub fn at_line(code: ErrorCode, message: impl Into<String>, line: u32) -> Self {
        FatalError {
            code,
            message: message.into(),
            line,
            span: Span::DUMMY,
            context: None,
        }
    }

    /// "Expected X but found Y".
    #[cold]
    pub fn expected(what: &str, found: &Token) -> Self {
        let code = if found.is_eof() {
            ErrorCode::E0010
        } else {
            ErrorCode::E0011
        };
        FatalError::new(code, format!("Expected {what} but found '{found}'"), found)
    }

    /// Attach a context unless an inner frame already did.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if self.context.is_none() {
            self.context = Some(context.into());
        }
        self
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let diagnostic = Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_line(self.line)
            .with_span(self.span);
        match &self.context {
            Some(context) => diagnostic.with_context(context.clone()),
            None => diagnostic,
        }
    }
}

impl From<LexError> for FatalError {
    fn from(err: LexError) -> Self {
        FatalError {
            code: err.code,
            message: err.message,
            line: err.line,
            span: err.span,
            context: None,
        }
    }
}
