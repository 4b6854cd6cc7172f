//! Constructor and serializer matching on recorded class-body declarations.
//!
//! Statements in a class body that no keyword claims are kept as token
//! runs. Once parsing is done they are matched here against the handful of
//! shapes the generated code cares about.

use uht_ir::Token;
use uht_types::{ConstructorFlags, SerializerArchive};

use crate::property::collect_argument;
use crate::stream::TokenStream;
use crate::{ParseResult, TokenReplay};

/// What a recorded declaration turned out to be.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum RecordedMatch {
    Constructor(ConstructorFlags),
    Serializer(SerializerArchive),
    /// `void GetLifetimeReplicatedProps(...)`
    LifetimeReplicatedProps,
}

/// Classify one recorded declaration of the class `class_name`.
pub fn match_declaration(tokens: &[Token], class_name: &str) -> Option<RecordedMatch> {
    let mut replay = TokenReplay::new(tokens);
    match_tokens(&mut replay, class_name).ok().flatten()
}

fn match_tokens(
    replay: &mut TokenReplay<'_>,
    class_name: &str,
) -> ParseResult<Option<RecordedMatch>> {
    while is_qualifier(replay.peek()?) {
        replay.advance()?;
    }
    if replay.check_ident(class_name)? && replay.peek_nth(1).is_symbol("(") {
        replay.advance()?;
        replay.advance()?;
        let params = parameters(replay)?;
        return Ok(constructor_kind(&params, class_name).map(RecordedMatch::Constructor));
    }
    if !replay.eat_ident("void")? {
        return Ok(None);
    }
    if replay.check_ident("Serialize")? && replay.peek_nth(1).is_symbol("(") {
        replay.advance()?;
        replay.advance()?;
        let params = parameters(replay)?;
        return Ok(serializer_kind(&params).map(RecordedMatch::Serializer));
    }
    if replay.check_ident("GetLifetimeReplicatedProps")? && replay.peek_nth(1).is_symbol("(") {
        return Ok(Some(RecordedMatch::LifetimeReplicatedProps));
    }
    Ok(None)
}

fn is_qualifier(token: &Token) -> bool {
    token.is_identifier()
        && (matches!(
            token.text.as_str(),
            "explicit" | "virtual" | "inline" | "FORCEINLINE"
        ) || token.text.ends_with("_API"))
}

/// Parameter token runs after an opening `(`, consuming the `)`.
fn parameters(replay: &mut TokenReplay<'_>) -> ParseResult<Vec<Vec<Token>>> {
    let mut params = Vec::new();
    if replay.eat_symbol(")")? {
        return Ok(params);
    }
    loop {
        params.push(collect_argument(replay)?);
        if replay.eat_symbol(")")? {
            return Ok(params);
        }
        replay.expect_symbol(",")?;
    }
}

fn constructor_kind(params: &[Vec<Token>], class_name: &str) -> Option<ConstructorFlags> {
    let mut flags = match params {
        [] => ConstructorFlags::DEFAULT,
        [only] if matches!(only.as_slice(), [void] if void.is_identifier_named("void")) => {
            ConstructorFlags::DEFAULT
        }
        [first, ..] => match strip_const(first) {
            [name, amp, ..] if name.is_identifier_named("FObjectInitializer") && amp.is_symbol("&") => {
                ConstructorFlags::OBJECT_INITIALIZER
            }
            [name, amp, ..] if name.is_identifier_named("FVTableHelper") && amp.is_symbol("&") => {
                ConstructorFlags::VTABLE_HELPER
            }
            [name, amp, ..]
                if name.is_identifier_named(class_name)
                    && (amp.is_symbol("&") || amp.is_symbol("&&")) =>
            {
                ConstructorFlags::COPY
            }
            _ => ConstructorFlags::empty(),
        },
    };
    if !params.is_empty() && params.iter().all(|param| has_default(param)) {
        flags |= ConstructorFlags::DEFAULT;
    }
    (!flags.is_empty()).then_some(flags)
}

fn serializer_kind(params: &[Vec<Token>]) -> Option<SerializerArchive> {
    let [param] = params else {
        return None;
    };
    match param.as_slice() {
        [name, amp, ..] if name.is_identifier_named("FArchive") && amp.is_symbol("&") => {
            Some(SerializerArchive::ARCHIVE)
        }
        [name, ..] if name.is_identifier_named("FStructuredArchiveRecord") => {
            Some(SerializerArchive::STRUCTURED_ARCHIVE_RECORD)
        }
        [outer, sep, record, ..]
            if outer.is_identifier_named("FStructuredArchive")
                && sep.is_symbol("::")
                && record.is_identifier_named("FRecord") =>
        {
            Some(SerializerArchive::STRUCTURED_ARCHIVE_RECORD)
        }
        _ => None,
    }
}

fn strip_const(tokens: &[Token]) -> &[Token] {
    match tokens {
        [first, rest @ ..] if first.is_identifier_named("const") => rest,
        _ => tokens,
    }
}

fn has_default(param: &[Token]) -> bool {
    param.iter().any(|token| token.is_symbol("="))
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "Tests use unwrap for brevity")]
mod tests;
