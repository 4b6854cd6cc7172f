//! Live token reader for one header.
//!
//! Pulls lexemes lazily, runs directive lines through the
//! [`DirectiveStack`], drops tokens in dead blocks, and buffers comments so
//! the scope stack can turn them into tooltips. Comments that precede a
//! token travel with it and only reach the comment buffer once that token
//! is consumed, so peeking past a statement never leaks the next
//! declaration's doc comment into the current one.

use std::collections::VecDeque;

use tracing::trace;
use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::Token;
use uht_lexer::{Comment, Lexeme};
use uht_types::CompilerDirective;

use crate::preprocessor::{DirectiveEffect, DirectiveStack};
use crate::stream::TokenStream;
use crate::{FatalError, ParseConfig, ParseResult};

#[derive(Clone, Debug)]
struct Lookahead {
    token: Token,
    directive: CompilerDirective,
    comments: Vec<Comment>,
}

/// An `#include` seen in a live block.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Include {
    pub path: String,
    pub line: u32,
}

/// Saved reader state for speculative parsing.
#[derive(Clone, Debug)]
pub struct ReaderSnapshot {
    pos: usize,
    lookahead: VecDeque<Lookahead>,
    directives: DirectiveStack,
    comments: Vec<Comment>,
    pending_comments: Vec<Comment>,
    last_scanned_line: Option<u32>,
    line: u32,
    recorded: Option<usize>,
    includes: usize,
    diagnostics: usize,
}

pub struct TokenReader {
    lexemes: Vec<Lexeme>,
    pos: usize,
    lookahead: VecDeque<Lookahead>,
    directives: DirectiveStack,
    editor: bool,
    editor_module: bool,
    /// Comments attached to consumed tokens since the last clear.
    comments: Vec<Comment>,
    /// Comments scanned but not yet attached to a token.
    pending_comments: Vec<Comment>,
    last_scanned_line: Option<u32>,
    line: u32,
    recording: Option<Vec<Token>>,
    includes: Vec<Include>,
    diagnostics: Vec<Diagnostic>,
    eof: Token,
}

impl TokenReader {
    /// Lex `source` and wrap it.
    pub fn new(source: &str, config: &ParseConfig) -> ParseResult<Self> {
        let lexemes = uht_lexer::lex(source)?;
        let end = u32::try_from(source.len()).unwrap_or(u32::MAX);
        let last_line = lexemes.last().map_or(1, Lexeme::line);
        Ok(Self::from_lexemes(lexemes, config, Token::eof(end, last_line)))
    }

    pub fn from_lexemes(lexemes: Vec<Lexeme>, config: &ParseConfig, eof: Token) -> Self {
        TokenReader {
            lexemes,
            pos: 0,
            lookahead: VecDeque::new(),
            directives: DirectiveStack::new(),
            editor: config.editor,
            editor_module: config.module_kind.is_editor(),
            comments: Vec::new(),
            pending_comments: Vec::new(),
            last_scanned_line: None,
            line: 1,
            recording: None,
            includes: Vec::new(),
            diagnostics: Vec::new(),
            eof,
        }
    }

    /// Token `n` places ahead (0 is the next token).
    pub fn peek_nth(&mut self, n: usize) -> ParseResult<&Token> {
        self.fill(n + 1)?;
        Ok(&self.lookahead[n].token)
    }

    /// Directive composite in effect at the next token.
    pub fn directive(&mut self) -> ParseResult<CompilerDirective> {
        self.fill(1)?;
        Ok(self.lookahead[0].directive)
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn clear_comments(&mut self) {
        self.comments.clear();
    }

    pub fn begin_recording(&mut self) {
        self.recording = Some(Vec::new());
    }

    /// Stop recording and hand back what was consumed meanwhile.
    pub fn end_recording(&mut self) -> Vec<Token> {
        self.recording.take().unwrap_or_default()
    }

    pub fn includes(&self) -> &[Include] {
        &self.includes
    }

    /// Non-fatal diagnostics raised while scanning.
    pub fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    pub fn snapshot(&self) -> ReaderSnapshot {
        ReaderSnapshot {
            pos: self.pos,
            lookahead: self.lookahead.clone(),
            directives: self.directives.clone(),
            comments: self.comments.clone(),
            pending_comments: self.pending_comments.clone(),
            last_scanned_line: self.last_scanned_line,
            line: self.line,
            recorded: self.recording.as_ref().map(Vec::len),
            includes: self.includes.len(),
            diagnostics: self.diagnostics.len(),
        }
    }

    pub fn restore(&mut self, snapshot: ReaderSnapshot) {
        self.pos = snapshot.pos;
        self.lookahead = snapshot.lookahead;
        self.directives = snapshot.directives;
        self.comments = snapshot.comments;
        self.pending_comments = snapshot.pending_comments;
        self.last_scanned_line = snapshot.last_scanned_line;
        self.line = snapshot.line;
        if let (Some(recording), Some(len)) = (self.recording.as_mut(), snapshot.recorded) {
            recording.truncate(len);
        }
        self.includes.truncate(snapshot.includes);
        self.diagnostics.truncate(snapshot.diagnostics);
    }

    fn fill(&mut self, wanted: usize) -> ParseResult<()> {
        while self.lookahead.len() < wanted {
            if self.lookahead.back().is_some_and(|la| la.token.is_eof()) {
                let eof = self.lookahead.back().cloned();
                self.lookahead.extend(eof);
                continue;
            }
            let next = self.scan()?;
            self.lookahead.push_back(next);
        }
        Ok(())
    }

    /// Scan forward to the next live token.
    fn scan(&mut self) -> ParseResult<Lookahead> {
        loop {
            let Some(lexeme) = self.lexemes.get(self.pos).cloned() else {
                return self.end_of_file();
            };
            self.pos += 1;
            match lexeme {
                Lexeme::Directive(directive) => {
                    match self.directives.apply(&directive, self.editor)? {
                        DirectiveEffect::Conditional { keeps_comments } => {
                            if !keeps_comments {
                                self.pending_comments.clear();
                            }
                        }
                        DirectiveEffect::Include { path, line } => {
                            self.pending_comments.clear();
                            self.includes.push(Include { path, line });
                        }
                        DirectiveEffect::Ignored => {}
                    }
                }
                Lexeme::Comment(comment) => {
                    if !self.directives.is_live(self.editor) {
                        continue;
                    }
                    // Trailing comment on the previous token's line.
                    if self.last_scanned_line == Some(comment.line) {
                        continue;
                    }
                    self.pending_comments.push(comment);
                }
                Lexeme::Token(token) => {
                    let composite = self.directives.composite();
                    self.check_editor_guard(&token, composite);
                    if !composite.is_live(self.editor) {
                        continue;
                    }
                    self.last_scanned_line = Some(token.line);
                    return Ok(Lookahead {
                        token,
                        directive: composite,
                        comments: std::mem::take(&mut self.pending_comments),
                    });
                }
            }
        }
    }

    fn end_of_file(&mut self) -> ParseResult<Lookahead> {
        if let Some(line) = self.directives.innermost_line() {
            return Err(FatalError::new(
                ErrorCode::E5005,
                format!("Missing '#endif' for the '#if' on line {line}"),
                &self.eof,
            ));
        }
        Ok(Lookahead {
            token: self.eof.clone(),
            directive: CompilerDirective::empty(),
            comments: std::mem::take(&mut self.pending_comments),
        })
    }

    /// Reflected properties belong under `WITH_EDITORONLY_DATA`; a plain
    /// `WITH_EDITOR` guard in a non-editor module draws a warning whether
    /// or not the block is live in this run.
    fn check_editor_guard(&mut self, token: &Token, composite: CompilerDirective) {
        if self.editor_module
            || !composite.contains(CompilerDirective::WITH_EDITOR)
            || !token.is_identifier_named("UPROPERTY")
        {
            return;
        }
        trace!(line = token.line, "UPROPERTY under WITH_EDITOR");
        self.diagnostics.push(
            Diagnostic::warning(ErrorCode::W1002)
                .with_message(
                    "UPROPERTY inside '#if WITH_EDITOR'; use '#if WITH_EDITORONLY_DATA' instead",
                )
                .at(token),
        );
    }
}

impl TokenStream for TokenReader {
    fn peek(&mut self) -> ParseResult<&Token> {
        self.peek_nth(0)
    }

    fn advance(&mut self) -> ParseResult<Token> {
        self.fill(1)?;
        let Some(next) = self.lookahead.pop_front() else {
            return Ok(self.eof.clone());
        };
        if next.token.is_eof() {
            let token = next.token.clone();
            self.lookahead.push_front(Lookahead {
                comments: Vec::new(),
                ..next
            });
            return Ok(token);
        }
        self.comments.extend(next.comments);
        self.line = next.token.line;
        if let Some(recording) = self.recording.as_mut() {
            recording.push(next.token.clone());
        }
        Ok(next.token)
    }

    fn line(&self) -> u32 {
        self.line
    }
}
