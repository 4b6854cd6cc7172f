//! Core source types for the reflection header front-end.
//!
//! This crate holds the lexical value types every other phase shares:
//! byte spans and the typed tokens handed out by the lexer.

mod span;
mod token;

pub use span::Span;
pub use token::{join_tokens, Token, TokenKind};
