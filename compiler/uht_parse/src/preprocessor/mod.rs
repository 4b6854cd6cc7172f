//! Compiler-directive state machine.
//!
//! Tracks the stack of open `#if` frames. Each frame holds its own
//! classification; the composite at any point is the union of all frames.
//! Whether tokens are live, and whether pending doc comments survive a
//! directive line, both follow from the classifications involved.

use tracing::trace;
use uht_diagnostic::ErrorCode;
use uht_ir::{join_tokens, Token};
use uht_lexer::{lex_fragment, Directive};
use uht_types::CompilerDirective;

use crate::{FatalError, ParseResult};

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct Frame {
    own: CompilerDirective,
    line: u32,
}

/// What a processed directive line did.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DirectiveEffect {
    /// Opened, switched or closed a conditional block.
    Conditional { keeps_comments: bool },
    /// `#include` in a live block.
    Include { path: String, line: u32 },
    /// `#define`, `#pragma` and friends, or anything inside a dead block.
    Ignored,
}

#[derive(Clone, Debug, Default)]
pub struct DirectiveStack {
    frames: Vec<Frame>,
}

impl DirectiveStack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Union of every open frame.
    pub fn composite(&self) -> CompilerDirective {
        self.frames
            .iter()
            .fold(CompilerDirective::empty(), |acc, frame| acc | frame.own)
    }

    pub fn is_live(&self, editor: bool) -> bool {
        self.composite().is_live(editor)
    }

    /// Line of the innermost open `#if`.
    pub fn innermost_line(&self) -> Option<u32> {
        self.frames.last().map(|frame| frame.line)
    }

    /// Process one directive line.
    pub fn apply(&mut self, directive: &Directive, editor: bool) -> ParseResult<DirectiveEffect> {
        let tokens = lex_fragment(&directive.text, directive.line)?;
        let Some(keyword) = tokens.first() else {
            // A lone `#` is a null directive.
            return Ok(DirectiveEffect::Ignored);
        };
        let live = self.is_live(editor);
        let rest = &tokens[1..];

        match keyword.text.as_str() {
            "if" => {
                let own = classify(rest);
                self.push(own, directive.line);
                Ok(conditional(own))
            }
            "ifdef" | "ifndef" => {
                self.push(CompilerDirective::UNRECOGNIZED, directive.line);
                Ok(conditional(CompilerDirective::UNRECOGNIZED))
            }
            "elif" => {
                let top = self.top_mut(keyword)?;
                let own = classify(rest);
                if !top.own.supports_elif() || !own.supports_elif() {
                    return Err(FatalError::new(
                        ErrorCode::E5003,
                        format!(
                            "Mixing '{}' with '{}' in an #elif chain is not supported",
                            top.own.condition_text(),
                            own.condition_text()
                        ),
                        keyword,
                    ));
                }
                top.own = own;
                Ok(conditional(own))
            }
            "else" => {
                let top = self.top_mut(keyword)?;
                let Some(flipped) = top.own.flip_for_else() else {
                    return Err(FatalError::new(
                        ErrorCode::E5002,
                        format!(
                            "'#else' is not supported for '#if {}'",
                            top.own.condition_text()
                        ),
                        keyword,
                    ));
                };
                top.own = flipped;
                Ok(conditional(flipped))
            }
            "endif" => {
                let Some(frame) = self.frames.pop() else {
                    return Err(FatalError::new(
                        ErrorCode::E5004,
                        "'#endif' without a matching '#if'",
                        keyword,
                    ));
                };
                trace!(line = directive.line, own = ?frame.own, "closed directive frame");
                Ok(conditional(frame.own))
            }
            _ if !live => Ok(DirectiveEffect::Ignored),
            "include" => Ok(DirectiveEffect::Include {
                path: include_path(rest),
                line: directive.line,
            }),
            "define" | "undef" | "pragma" => Ok(DirectiveEffect::Ignored),
            other => Err(FatalError::new(
                ErrorCode::E5001,
                format!("Unrecognized preprocessor directive '#{other}'"),
                keyword,
            )),
        }
    }

    fn push(&mut self, own: CompilerDirective, line: u32) {
        trace!(line, ?own, depth = self.frames.len() + 1, "opened directive frame");
        self.frames.push(Frame { own, line });
    }

    fn top_mut(&mut self, keyword: &Token) -> ParseResult<&mut Frame> {
        match self.frames.last_mut() {
            Some(frame) => Ok(frame),
            None => Err(FatalError::new(
                ErrorCode::E5004,
                format!("'#{}' without a matching '#if'", keyword.text),
                keyword,
            )),
        }
    }
}

fn classify(condition: &[Token]) -> CompilerDirective {
    let texts: Vec<&str> = condition.iter().map(|t| t.text.as_str()).collect();
    CompilerDirective::classify(&texts)
}

fn conditional(own: CompilerDirective) -> DirectiveEffect {
    DirectiveEffect::Conditional {
        keeps_comments: own.keeps_comments(),
    }
}

/// `"Foo.h"` or `<Foo/Bar.h>`.
fn include_path(tokens: &[Token]) -> String {
    match tokens {
        [single] if single.raw_string_value().is_some() => {
            single.raw_string_value().unwrap_or_default().to_owned()
        }
        [open, inner @ .., close] if open.is_symbol("<") && close.is_symbol(">") => {
            join_tokens(inner)
        }
        _ => join_tokens(tokens),
    }
}
