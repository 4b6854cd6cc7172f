//! Token stream abstraction shared by the live reader and replay buffers.
//!
//! Type resolution, default-value sanitizing and recorded-declaration
//! matching all run against either the header being read or a captured
//! token run, so they are written against [`TokenStream`].

use uht_diagnostic::ErrorCode;
use uht_ir::Token;

use crate::{FatalError, ParseResult};

pub trait TokenStream {
    /// Next token without consuming it. End of input yields an EOF token.
    fn peek(&mut self) -> ParseResult<&Token>;

    /// Consume and return the next token.
    fn advance(&mut self) -> ParseResult<Token>;

    /// Line of the most recently consumed token.
    fn line(&self) -> u32;

    fn at_eof(&mut self) -> ParseResult<bool> {
        Ok(self.peek()?.is_eof())
    }

    fn check_symbol(&mut self, symbol: &str) -> ParseResult<bool> {
        Ok(self.peek()?.is_symbol(symbol))
    }

    fn check_ident(&mut self, name: &str) -> ParseResult<bool> {
        Ok(self.peek()?.is_identifier_named(name))
    }

    /// Consume the next token if it is `symbol`.
    fn eat_symbol(&mut self, symbol: &str) -> ParseResult<bool> {
        if self.check_symbol(symbol)? {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    /// Consume the next token if it is the identifier `name`.
    fn eat_ident(&mut self, name: &str) -> ParseResult<bool> {
        if self.check_ident(name)? {
            self.advance()?;
            return Ok(true);
        }
        Ok(false)
    }

    fn expect_symbol(&mut self, symbol: &str) -> ParseResult<Token> {
        if self.check_symbol(symbol)? {
            return self.advance();
        }
        Err(FatalError::expected(&format!("'{symbol}'"), self.peek()?))
    }

    fn expect_keyword(&mut self, name: &str) -> ParseResult<Token> {
        if self.check_ident(name)? {
            return self.advance();
        }
        Err(FatalError::expected(&format!("'{name}'"), self.peek()?))
    }

    /// Consume an identifier; `what` names it in the error message.
    fn expect_identifier(&mut self, what: &str) -> ParseResult<Token> {
        if self.peek()?.is_identifier() {
            return self.advance();
        }
        let found = self.peek()?;
        let mut err = FatalError::expected(what, found);
        if !found.is_eof() {
            err.code = ErrorCode::E0013;
        }
        Err(err)
    }

    /// Consume a balanced `(...)` group, returning the inner tokens.
    ///
    /// The opening parenthesis must be next.
    fn take_parenthesized(&mut self) -> ParseResult<Vec<Token>> {
        self.expect_symbol("(")?;
        let mut depth = 1usize;
        let mut out = Vec::new();
        loop {
            let token = self.advance()?;
            if token.is_eof() {
                return Err(FatalError::expected("')'", &token));
            }
            if token.is_symbol("(") {
                depth += 1;
            } else if token.is_symbol(")") {
                depth -= 1;
                if depth == 0 {
                    return Ok(out);
                }
            }
            out.push(token);
        }
    }
}
