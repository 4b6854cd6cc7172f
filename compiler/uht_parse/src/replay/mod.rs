//! Replay buffer over captured tokens.
//!
//! Wraps a slice of tokens taken from a header earlier (property types,
//! default values, recorded class-body declarations) so they can be parsed
//! again without re-lexing. Past the end it yields an EOF token placed just
//! after the last captured token.

use uht_ir::Token;

use crate::{stream::TokenStream, ParseResult};

pub struct TokenReplay<'a> {
    tokens: &'a [Token],
    pos: usize,
    eof: Token,
    line: u32,
}

impl<'a> TokenReplay<'a> {
    pub fn new(tokens: &'a [Token]) -> Self {
        let (offset, line) = tokens
            .last()
            .map_or((0, 0), |last| (last.span.end, last.line));
        TokenReplay {
            tokens,
            pos: 0,
            eof: Token::eof(offset, line),
            line: tokens.first().map_or(0, |t| t.line),
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn set_position(&mut self, pos: usize) {
        debug_assert!(pos <= self.tokens.len(), "replay position out of range");
        self.pos = pos.min(self.tokens.len());
    }

    /// Tokens not yet consumed.
    pub fn remaining(&self) -> &'a [Token] {
        &self.tokens[self.pos..]
    }

    /// Token `n` places ahead of the cursor.
    pub fn peek_nth(&self, n: usize) -> &Token {
        self.tokens.get(self.pos + n).unwrap_or(&self.eof)
    }
}

impl TokenStream for TokenReplay<'_> {
    fn peek(&mut self) -> ParseResult<&Token> {
        Ok(self.tokens.get(self.pos).unwrap_or(&self.eof))
    }

    fn advance(&mut self) -> ParseResult<Token> {
        match self.tokens.get(self.pos) {
            Some(token) => {
                self.pos += 1;
                self.line = token.line;
                Ok(token.clone())
            }
            None => Ok(self.eof.clone()),
        }
    }

    fn line(&self) -> u32 {
        self.line
    }
}
