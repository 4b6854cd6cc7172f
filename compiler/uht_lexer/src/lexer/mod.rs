//! Byte-level header scanner.
//!
//! Works on the raw bytes of the source. Every slice boundary lands on an
//! ASCII byte, so slicing back into the `&str` is always on a char boundary.

use tracing::trace;
use uht_diagnostic::ErrorCode;
use uht_ir::{Span, Token, TokenKind};

use crate::{Comment, Directive, LexError, Lexeme};

/// Three-character operators.
const SYMBOLS_3: &[&str] = &["..."];

/// Two-character operators. `<<` and `>>` are deliberately absent: template
/// depth is counted one angle bracket at a time.
const SYMBOLS_2: &[&str] = &[
    "::", "->", "==", "!=", "<=", ">=", "&&", "||", "++", "--", "+=", "-=", "*=", "/=", "%=",
    "&=", "|=", "^=", "##",
];

/// Single-character punctuation.
const SYMBOLS_1: &[u8] = b"{}()[]<>;:,.=+-*/%&|^!~?#\\";

/// Lex a whole header.
pub fn lex(source: &str) -> Result<Vec<Lexeme>, LexError> {
    let mut lexer = Lexer::new(source, 1, true);
    let mut out = Vec::new();
    while let Some(lexeme) = lexer.next_lexeme()? {
        out.push(lexeme);
    }
    trace!(count = out.len(), "lexed header");
    Ok(out)
}

/// Lex a fragment (directive body, captured text) into tokens only.
///
/// Comments are dropped and `#` is an ordinary symbol. `line` is the line
/// the fragment starts on.
pub fn lex_fragment(text: &str, line: u32) -> Result<Vec<Token>, LexError> {
    let mut lexer = Lexer::new(text, line, false);
    let mut out = Vec::new();
    while let Some(lexeme) = lexer.next_lexeme()? {
        if let Lexeme::Token(token) = lexeme {
            out.push(token);
        }
    }
    Ok(out)
}

struct Lexer<'a> {
    src: &'a str,
    bytes: &'a [u8],
    pos: usize,
    line: u32,
    /// Only whitespace seen since the last newline.
    at_line_start: bool,
    /// Whether `#` at line start starts a directive.
    directives: bool,
}

impl<'a> Lexer<'a> {
    fn new(src: &'a str, line: u32, directives: bool) -> Self {
        Lexer {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line,
            at_line_start: directives,
            directives,
        }
    }

    #[inline]
    fn peek_byte(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_range(start..self.pos)
    }

    fn next_lexeme(&mut self) -> Result<Option<Lexeme>, LexError> {
        self.skip_whitespace();
        let Some(byte) = self.peek_byte(0) else {
            return Ok(None);
        };

        if byte == b'#' && self.at_line_start && self.directives {
            return Ok(Some(Lexeme::Directive(self.directive())));
        }
        self.at_line_start = false;

        match byte {
            b'/' if self.peek_byte(1) == Some(b'/') => Ok(Some(Lexeme::Comment(self.line_comment()))),
            b'/' if self.peek_byte(1) == Some(b'*') => {
                Ok(Some(Lexeme::Comment(self.block_comment()?)))
            }
            b'"' => Ok(Some(Lexeme::Token(self.quoted(b'"')?))),
            b'\'' => Ok(Some(Lexeme::Token(self.quoted(b'\'')?))),
            b'0'..=b'9' => Ok(Some(Lexeme::Token(self.number()))),
            b'.' if self.peek_byte(1).is_some_and(|b| b.is_ascii_digit()) => {
                Ok(Some(Lexeme::Token(self.number())))
            }
            b if b == b'_' || b.is_ascii_alphabetic() => Ok(Some(Lexeme::Token(self.identifier()))),
            _ => self.symbol().map(|t| Some(Lexeme::Token(t))),
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(byte) = self.peek_byte(0) {
            match byte {
                b'\n' => {
                    self.line += 1;
                    self.at_line_start = true;
                }
                b' ' | b'\t' | b'\r' | 0x0c => {}
                // Line splice outside a directive.
                b'\\' if matches!(self.peek_byte(1), Some(b'\n' | b'\r')) => {}
                _ => return,
            }
            self.pos += 1;
        }
    }

    /// Consume a directive line plus its `\` continuations.
    fn directive(&mut self) -> Directive {
        let start = self.pos;
        let line = self.line;
        // Skip '#'.
        self.pos += 1;
        let mut text = String::new();
        loop {
            let rest = &self.bytes[self.pos..];
            let end = memchr::memchr(b'\n', rest).map_or(self.bytes.len(), |i| self.pos + i);
            let segment = self.src[self.pos..end].trim_end_matches('\r');
            let continued = segment.trim_end().ends_with('\\');
            let segment = if continued {
                segment.trim_end().trim_end_matches('\\')
            } else {
                segment
            };
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(segment.trim());
            self.pos = end;
            if end < self.bytes.len() {
                // Consume the newline.
                self.pos += 1;
                self.line += 1;
            }
            if !continued || self.pos >= self.bytes.len() {
                break;
            }
        }
        self.at_line_start = true;
        Directive {
            text,
            line,
            span: self.span_from(start),
        }
    }

    fn line_comment(&mut self) -> Comment {
        let start = self.pos;
        let rest = &self.bytes[self.pos..];
        let end = memchr::memchr(b'\n', rest).map_or(self.bytes.len(), |i| self.pos + i);
        self.pos = end;
        Comment {
            text: self.src[start..end].trim_end_matches('\r').to_owned(),
            line: self.line,
            end_line: self.line,
            span: self.span_from(start),
        }
    }

    fn block_comment(&mut self) -> Result<Comment, LexError> {
        let start = self.pos;
        let line = self.line;
        let body = &self.bytes[self.pos + 2..];
        let Some(close) = memchr::memmem::find(body, b"*/") else {
            return Err(LexError::new(
                ErrorCode::E0002,
                "Unterminated block comment",
                line,
                Span::from_range(start..self.bytes.len()),
            ));
        };
        let end = self.pos + 2 + close + 2;
        let newlines = memchr::memchr_iter(b'\n', &self.bytes[start..end]).count();
        self.line += u32::try_from(newlines).unwrap_or(u32::MAX);
        self.pos = end;
        Ok(Comment {
            text: self.src[start..end].to_owned(),
            line,
            end_line: self.line,
            span: self.span_from(start),
        })
    }

    fn quoted(&mut self, quote: u8) -> Result<Token, LexError> {
        let start = self.pos;
        self.pos += 1;
        loop {
            let rest = &self.bytes[self.pos..];
            match memchr::memchr3(quote, b'\\', b'\n', rest) {
                Some(i) if rest[i] == b'\\' => self.pos += i + 2,
                Some(i) if rest[i] == quote => {
                    self.pos += i + 1;
                    break;
                }
                _ => {
                    let (code, what) = if quote == b'"' {
                        (ErrorCode::E0001, "string")
                    } else {
                        (ErrorCode::E0004, "character")
                    };
                    return Err(LexError::new(
                        code,
                        format!("Unterminated {what} literal"),
                        self.line,
                        Span::from_range(start..self.pos.min(self.bytes.len())),
                    ));
                }
            }
            if self.pos >= self.bytes.len() {
                let code = if quote == b'"' {
                    ErrorCode::E0001
                } else {
                    ErrorCode::E0004
                };
                return Err(LexError::new(
                    code,
                    "Unterminated literal at end of file",
                    self.line,
                    Span::from_range(start..self.bytes.len()),
                ));
            }
        }
        let kind = if quote == b'"' {
            TokenKind::StringConst
        } else {
            TokenKind::CharConst
        };
        Ok(Token::new(
            kind,
            &self.src[start..self.pos],
            self.span_from(start),
            self.line,
        ))
    }

    fn number(&mut self) -> Token {
        let start = self.pos;
        let mut kind = TokenKind::DecimalConst;
        if self.peek_byte(0) == Some(b'0') && matches!(self.peek_byte(1), Some(b'x' | b'X')) {
            kind = TokenKind::HexConst;
            self.pos += 2;
            while self.peek_byte(0).is_some_and(|b| b.is_ascii_hexdigit()) {
                self.pos += 1;
            }
        } else {
            self.eat_digits();
            if self.peek_byte(0) == Some(b'.') {
                kind = TokenKind::FloatConst;
                self.pos += 1;
                self.eat_digits();
            }
            if matches!(self.peek_byte(0), Some(b'e' | b'E')) {
                let sign = usize::from(matches!(self.peek_byte(1), Some(b'+' | b'-')));
                if self.peek_byte(1 + sign).is_some_and(|b| b.is_ascii_digit()) {
                    kind = TokenKind::FloatConst;
                    self.pos += 1 + sign;
                    self.eat_digits();
                }
            }
        }
        while let Some(b) = self.peek_byte(0) {
            match b {
                b'f' | b'F' if kind != TokenKind::HexConst => kind = TokenKind::FloatConst,
                b'u' | b'U' | b'l' | b'L' => {}
                _ => break,
            }
            self.pos += 1;
        }
        Token::new(kind, &self.src[start..self.pos], self.span_from(start), self.line)
    }

    fn eat_digits(&mut self) {
        while self
            .peek_byte(0)
            .is_some_and(|b| b.is_ascii_digit() || b == b'\'')
        {
            self.pos += 1;
        }
    }

    fn identifier(&mut self) -> Token {
        let start = self.pos;
        while self
            .peek_byte(0)
            .is_some_and(|b| b == b'_' || b.is_ascii_alphanumeric())
        {
            self.pos += 1;
        }
        Token::new(
            TokenKind::Identifier,
            &self.src[start..self.pos],
            self.span_from(start),
            self.line,
        )
    }

    fn symbol(&mut self) -> Result<Token, LexError> {
        let start = self.pos;
        let rest = &self.src[self.pos..];
        let len = if SYMBOLS_3.iter().any(|s| rest.starts_with(s)) {
            3
        } else if SYMBOLS_2.iter().any(|s| rest.starts_with(s)) {
            2
        } else if self.peek_byte(0).is_some_and(|b| SYMBOLS_1.contains(&b)) {
            1
        } else {
            let ch = rest.chars().next().unwrap_or('\0');
            return Err(LexError::new(
                ErrorCode::E0003,
                format!("Unexpected character '{ch}'"),
                self.line,
                Span::from_range(start..start + ch.len_utf8()),
            ));
        };
        self.pos += len;
        Ok(Token::new(
            TokenKind::Symbol,
            &self.src[start..self.pos],
            self.span_from(start),
            self.line,
        ))
    }
}
