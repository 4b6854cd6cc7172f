//! Statement dispatcher, declaration parsers and resolution phases for
//! reflected headers.
//!
//! A header goes through [`parse_header`] on its own, producing a
//! [`HeaderFile`](uht_types::HeaderFile) whose property types may still be
//! unresolved. The functions in [`resolve`] then run once every header has
//! been parsed, each as a global phase.
//!
//! # Modules
//! - `reader` / `replay` / `stream`: live and replayed token streams
//! - `preprocessor`: the compiler-directive state machine
//! - `scope`, `tooltip`: scope stack and doc-comment normalization
//! - `specifier`: specifier and metadata lists with per-kind tables
//! - `property`: property declarations and the property-type table
//! - `parser`: keyword dispatch and the declaration parsers
//! - `recorded`: constructor and serializer matching on recorded declarations
//! - `default_value`: default-value sanitizing
//! - `resolve`: the cross-header resolution phases

mod config;
mod default_value;
mod error;
mod parser;
mod preprocessor;
mod property;
mod reader;
mod recorded;
mod replay;
pub mod resolve;
mod scope;
mod specifier;
mod stream;
mod tooltip;

pub use config::{ModuleKind, ParseConfig};
pub use default_value::sanitize_default;
pub use error::{FatalError, ParseResult};
pub use parser::{parse_header, CatchAll, Dispatch, HeaderParser, Keyword, KeywordHandler};
pub use preprocessor::{DirectiveEffect, DirectiveStack};
pub use property::{
    bitfield_type, parse_property, property_from_type, resolve_at_parse, resolve_type,
    ParsedProperty, PropertyShape, TypeError,
};
pub use reader::{Include, ReaderSnapshot, TokenReader};
pub use recorded::{match_declaration, RecordedMatch};
pub use replay::TokenReplay;
pub use scope::{capture_tooltip, Scope, ScopeKind, ScopeStack, ScopeToken};
pub use specifier::{
    add_meta_pairs, parse_field_metadata, Specifier, SpecifierError, SpecifierHandler,
    SpecifierOutcome, SpecifierParser, SpecifierTable, SpecifierValue, ValueShape,
    CLASS_SPECIFIERS, ENUM_SPECIFIERS, FUNCTION_SPECIFIERS, PARAM_SPECIFIERS,
    PROPERTY_SPECIFIERS, STRUCT_SPECIFIERS,
};
pub use stream::TokenStream;
pub use tooltip::normalize_tooltip;
