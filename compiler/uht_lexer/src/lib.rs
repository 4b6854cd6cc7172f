//! Lexer for reflection-annotated C++ headers.
//!
//! Produces a flat [`Lexeme`] stream:
//! - typed [`Token`](uht_ir::Token)s for ordinary source text,
//! - comment lexemes carrying their raw text (doc comments become tooltips),
//! - raw directive lines (`#if ...`) with `\` continuations joined.
//!
//! The parser re-tokenizes directive text itself with [`lex_fragment`], so
//! this crate never interprets conditional compilation.

mod lexeme;
mod lexer;

pub use lexeme::{Comment, Directive, LexError, Lexeme};
pub use lexer::{lex, lex_fragment};
