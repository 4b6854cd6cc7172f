//! Keyword tables per scope kind.

use uht_types::AccessSpecifier;

use super::{CatchAll, Dispatch, HeaderParser, Keyword};
use crate::stream::TokenStream;
use crate::ParseResult;

const fn keyword(
    name: &'static str,
    handler: fn(&mut HeaderParser<'_>) -> ParseResult<Dispatch>,
) -> Keyword {
    Keyword {
        name,
        all_scopes: false,
        handler,
    }
}

const fn everywhere(
    name: &'static str,
    handler: fn(&mut HeaderParser<'_>) -> ParseResult<Dispatch>,
) -> Keyword {
    Keyword {
        name,
        all_scopes: true,
        handler,
    }
}

/// Enum bodies and parameter lists dispatch no statements.
pub static NO_KEYWORDS: &[Keyword] = &[];

pub static GLOBAL_KEYWORDS: &[Keyword] = &[
    keyword("UCLASS", uclass),
    keyword("UINTERFACE", uinterface),
    keyword("USTRUCT", ustruct),
    keyword("UENUM", uenum),
    keyword("UDELEGATE", udelegate),
    keyword("class", native_interface),
    keyword("namespace", namespace),
    everywhere("UE_DEPRECATED", deprecated),
];

pub static CLASS_KEYWORDS: &[Keyword] = &[
    keyword("UPROPERTY", uproperty),
    keyword("UFUNCTION", ufunction),
    keyword("GENERATED_BODY", generated_body),
    keyword("GENERATED_UCLASS_BODY", generated_legacy_body),
    keyword("GENERATED_UINTERFACE_BODY", generated_legacy_body),
    keyword("GENERATED_IINTERFACE_BODY", generated_legacy_body),
    keyword("public", access_specifier),
    keyword("protected", access_specifier),
    keyword("private", access_specifier),
    keyword("UCLASS", misplaced),
    keyword("UINTERFACE", misplaced),
    keyword("USTRUCT", misplaced),
    keyword("UENUM", misplaced),
    keyword("UDELEGATE", misplaced),
];

pub static STRUCT_KEYWORDS: &[Keyword] = &[
    keyword("UPROPERTY", uproperty),
    keyword("GENERATED_BODY", generated_body),
    keyword("GENERATED_USTRUCT_BODY", generated_legacy_body),
    keyword("public", access_specifier),
    keyword("protected", access_specifier),
    keyword("private", access_specifier),
    keyword("UFUNCTION", misplaced),
    keyword("UCLASS", misplaced),
    keyword("UINTERFACE", misplaced),
    keyword("USTRUCT", misplaced),
    keyword("UENUM", misplaced),
    keyword("UDELEGATE", misplaced),
];

/// Macro families recognized by name prefix rather than exact keyword.
pub static CATCH_ALLS: &[CatchAll] = &[dynamic_delegate];

fn uclass(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_class(false).map(|()| Dispatch::Handled)
}

fn uinterface(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_class(true).map(|()| Dispatch::Handled)
}

fn native_interface(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_native_interface()
}

fn ustruct(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_struct().map(|()| Dispatch::Handled)
}

fn uenum(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_enum().map(|()| Dispatch::Handled)
}

fn udelegate(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_udelegate().map(|()| Dispatch::Handled)
}

fn namespace(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_namespace().map(|()| Dispatch::Handled)
}

fn deprecated(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.skip_annotation().map(|()| Dispatch::Handled)
}

fn uproperty(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_uproperty().map(|()| Dispatch::Handled)
}

fn ufunction(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_function().map(|()| Dispatch::Handled)
}

fn generated_body(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser
        .parse_generated_body(AccessSpecifier::Private, false)
        .map(|()| Dispatch::Handled)
}

fn generated_legacy_body(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser
        .parse_generated_body(AccessSpecifier::Public, true)
        .map(|()| Dispatch::Handled)
}

fn access_specifier(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.parse_access_specifier().map(|()| Dispatch::Handled)
}

fn misplaced(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    parser.reject_misplaced_macro().map(|()| Dispatch::Handled)
}

fn dynamic_delegate(parser: &mut HeaderParser<'_>) -> ParseResult<Dispatch> {
    if !parser.reader.peek()?.text.starts_with("DECLARE_DYNAMIC_") {
        return Ok(Dispatch::Declined);
    }
    parser.parse_delegate_macro(None).map(|()| Dispatch::Handled)
}
