//! Typed tokens produced by the header lexer.

use std::fmt;

use crate::Span;

/// Token classification.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum TokenKind {
    Identifier,
    /// Punctuation, including the multi-character operators.
    Symbol,
    DecimalConst,
    HexConst,
    FloatConst,
    StringConst,
    CharConst,
    EndOfFile,
}

/// A lexical token with its raw text and source position.
///
/// Tokens are immutable once lexed. Captured runs of tokens are cloned
/// into declaration nodes so later phases can replay them.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Token {
    pub kind: TokenKind,
    /// Raw source text, quotes included for string and char constants.
    pub text: String,
    pub span: Span,
    /// 1-based source line.
    pub line: u32,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, span: Span, line: u32) -> Self {
        Token {
            kind,
            text: text.into(),
            span,
            line,
        }
    }

    /// End-of-file marker positioned at `offset`.
    pub fn eof(offset: u32, line: u32) -> Self {
        Token::new(TokenKind::EndOfFile, "", Span::new(offset, offset), line)
    }

    #[inline]
    pub fn is_eof(&self) -> bool {
        self.kind == TokenKind::EndOfFile
    }

    #[inline]
    pub fn is_identifier(&self) -> bool {
        self.kind == TokenKind::Identifier
    }

    /// Identifier with exactly this text.
    #[inline]
    pub fn is_identifier_named(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text == name
    }

    /// Identifier matching `name` ignoring ASCII case.
    #[inline]
    pub fn is_identifier_ci(&self, name: &str) -> bool {
        self.kind == TokenKind::Identifier && self.text.eq_ignore_ascii_case(name)
    }

    #[inline]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }

    /// Numeric, string or char constant.
    pub fn is_constant(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::DecimalConst
                | TokenKind::HexConst
                | TokenKind::FloatConst
                | TokenKind::StringConst
                | TokenKind::CharConst
        )
    }

    /// Integer value of a decimal or hex constant, ignoring `u`/`l` suffixes.
    pub fn int_value(&self) -> Option<i64> {
        let trimmed = self.text.trim_end_matches(['u', 'U', 'l', 'L']);
        match self.kind {
            TokenKind::DecimalConst => trimmed.parse().ok(),
            TokenKind::HexConst => {
                let digits = trimmed
                    .strip_prefix("0x")
                    .or_else(|| trimmed.strip_prefix("0X"))?;
                i64::from_str_radix(digits, 16).ok()
            }
            _ => None,
        }
    }

    /// String constant contents without quotes and without unescaping.
    pub fn raw_string_value(&self) -> Option<&str> {
        if self.kind != TokenKind::StringConst {
            return None;
        }
        self.text
            .strip_prefix('"')
            .and_then(|s| s.strip_suffix('"'))
    }

    /// String constant contents with escape sequences resolved.
    pub fn string_value(&self) -> Option<String> {
        let raw = self.raw_string_value()?;
        let mut out = String::with_capacity(raw.len());
        let mut chars = raw.chars();
        while let Some(c) = chars.next() {
            if c != '\\' {
                out.push(c);
                continue;
            }
            match chars.next() {
                Some('n') => out.push('\n'),
                Some('t') => out.push('\t'),
                Some('r') => out.push('\r'),
                Some(other) => out.push(other),
                None => out.push('\\'),
            }
        }
        Some(out)
    }

    /// Identifier-like tokens need a space between them when re-joined.
    pub fn is_word_like(&self) -> bool {
        matches!(
            self.kind,
            TokenKind::Identifier
                | TokenKind::DecimalConst
                | TokenKind::HexConst
                | TokenKind::FloatConst
        )
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_eof() {
            f.write_str("end of file")
        } else {
            f.write_str(&self.text)
        }
    }
}

/// Re-join a token run into source-like text.
///
/// A single space separates adjacent word-like tokens; everything else is
/// concatenated, so `( uint32 ) EFoo :: Max` becomes `(uint32)EFoo::Max`.
pub fn join_tokens(tokens: &[Token]) -> String {
    let mut out = String::new();
    let mut prev_word = false;
    for token in tokens {
        let word = token.is_word_like();
        if prev_word && word {
            out.push(' ');
        }
        out.push_str(&token.text);
        prev_word = word;
    }
    out
}
