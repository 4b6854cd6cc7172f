//! Property-type table and type resolution.
//!
//! A type expression is resolved by reading its leading identifier and
//! dispatching through [`PROPERTY_TYPES`]. Names not in the table are
//! looked up in the shared [`TypeTable`]; that fallback only exists once
//! every header has been parsed.

use uht_diagnostic::{Diagnostic, ErrorCode};
use uht_ir::{Span, Token};
use uht_types::{IntKind, ObjectKind, PropertyType, TypeEntry, TypeKind, TypeRef, TypeTable};

use crate::stream::TokenStream;
use crate::{FatalError, TokenReplay};

/// Why a type expression could not be resolved.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TypeError {
    pub code: ErrorCode,
    pub message: String,
    pub line: u32,
    pub span: Span,
}

impl TypeError {
    #[cold]
    fn new(code: ErrorCode, message: impl Into<String>, token: &Token) -> Self {
        TypeError {
            code,
            message: message.into(),
            line: token.line,
            span: token.span,
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        Diagnostic::error(self.code)
            .with_message(self.message.clone())
            .with_line(self.line)
            .with_span(self.span)
    }
}

impl From<FatalError> for TypeError {
    fn from(err: FatalError) -> Self {
        TypeError {
            code: err.code,
            message: err.message,
            line: err.line,
            span: err.span,
        }
    }
}

type TypeHandler = fn(&mut TypeResolver<'_>, &Token) -> Result<PropertyType, TypeError>;

struct PropertyTypeEntry {
    name: &'static str,
    /// Resolvable without the type table.
    immediate: bool,
    handler: TypeHandler,
}

const fn entry(name: &'static str, immediate: bool, handler: TypeHandler) -> PropertyTypeEntry {
    PropertyTypeEntry {
        name,
        immediate,
        handler,
    }
}

static PROPERTY_TYPES: &[PropertyTypeEntry] = &[
    entry("bool", true, resolve_bool),
    entry("int8", true, resolve_int),
    entry("int16", true, resolve_int),
    entry("int32", true, resolve_int),
    entry("int", true, resolve_int),
    entry("int64", true, resolve_int),
    entry("uint8", true, resolve_int),
    entry("uint16", true, resolve_int),
    entry("uint32", true, resolve_int),
    entry("unsigned", true, resolve_int),
    entry("uint64", true, resolve_int),
    entry("float", true, resolve_float),
    entry("double", true, resolve_double),
    entry("FString", true, resolve_string),
    entry("FName", true, resolve_name),
    entry("FText", true, resolve_text),
    entry("TArray", false, resolve_array),
    entry("TSet", false, resolve_set),
    entry("TMap", false, resolve_map),
    entry("TObjectPtr", false, resolve_object_wrapper),
    entry("TWeakObjectPtr", false, resolve_object_wrapper),
    entry("TLazyObjectPtr", false, resolve_object_wrapper),
    entry("TSoftObjectPtr", false, resolve_object_wrapper),
    entry("TSubclassOf", false, resolve_object_wrapper),
    entry("TSoftClassPtr", false, resolve_object_wrapper),
    entry("TScriptInterface", false, resolve_script_interface),
    entry("TEnumAsByte", false, resolve_enum_as_byte),
    entry("UClass", false, resolve_uclass),
];

fn find_entry(name: &str) -> Option<&'static PropertyTypeEntry> {
    PROPERTY_TYPES.iter().find(|entry| entry.name == name)
}

/// Resolve `tokens` while the header is still being parsed.
///
/// Returns `None` when the first recognized type name needs the type table,
/// or when no token names a table type at all; the caller then keeps the
/// tokens as [`PropertyType::Unresolved`].
pub fn resolve_at_parse(tokens: &[Token]) -> Option<Result<PropertyType, TypeError>> {
    let (start, first) = matched_entry(tokens)?;
    if !first.immediate {
        return None;
    }
    Some(TypeResolver::new(&tokens[start..], None).resolve())
}

/// Resolve captured type tokens against the complete type table.
pub fn resolve_type(tokens: &[Token], types: &TypeTable) -> Result<PropertyType, TypeError> {
    let start = matched_entry(tokens).map_or(0, |(start, _)| start);
    TypeResolver::new(&tokens[start..], Some(types)).resolve()
}

/// First token naming a table type, reached through leading qualifiers only.
fn matched_entry(tokens: &[Token]) -> Option<(usize, &'static PropertyTypeEntry)> {
    tokens
        .iter()
        .take_while(|token| token.is_identifier())
        .enumerate()
        .find_map(|(index, token)| find_entry(&token.text).map(|entry| (index, entry)))
}

struct TypeResolver<'a> {
    replay: TokenReplay<'a>,
    types: Option<&'a TypeTable>,
}

impl<'a> TypeResolver<'a> {
    fn new(tokens: &'a [Token], types: Option<&'a TypeTable>) -> Self {
        TypeResolver {
            replay: TokenReplay::new(tokens),
            types,
        }
    }

    fn resolve(&mut self) -> Result<PropertyType, TypeError> {
        let ty = self.element()?;
        if self.replay.check_symbol("*")? {
            let star = self.replay.advance()?;
            return Err(TypeError::new(
                ErrorCode::E3002,
                format!("Unexpected '*' after type '{}'", ty.cpp_type()),
                &star,
            ));
        }
        self.replay.eat_ident("const")?;
        self.replay.eat_symbol("&")?;
        let next = self.replay.peek()?;
        if !next.is_eof() {
            return Err(TypeError::new(
                ErrorCode::E3003,
                format!("Unexpected '{next}' after type '{}'", ty.cpp_type()),
                next,
            ));
        }
        Ok(ty)
    }

    /// One type name with its template arguments and pointer suffix.
    fn element(&mut self) -> Result<PropertyType, TypeError> {
        while ["const", "mutable", "class", "struct", "enum", "typename"]
            .iter()
            .any(|keyword| self.replay.peek_nth(0).is_identifier_named(keyword))
        {
            self.replay.advance()?;
        }
        let token = self.replay.advance()?;
        if !token.is_identifier() {
            return Err(TypeError::new(
                ErrorCode::E3001,
                format!("Expected a type but found '{token}'"),
                &token,
            ));
        }
        match find_entry(&token.text) {
            Some(entry) => (entry.handler)(self, &token),
            None => self.declared(&token),
        }
    }

    fn table(&self, token: &Token) -> Result<&'a TypeTable, TypeError> {
        self.types.ok_or_else(|| unknown_type(token))
    }

    /// A name declared by some header.
    fn declared(&mut self, token: &Token) -> Result<PropertyType, TypeError> {
        let entry = self
            .table(token)?
            .lookup(&token.text)
            .ok_or_else(|| unknown_type(token))?;
        match entry.kind {
            TypeKind::Class {
                native_interface: true,
                ..
            } => Err(TypeError::new(
                ErrorCode::E3008,
                format!(
                    "Native interface '{}' must be referenced through TScriptInterface",
                    token.text
                ),
                token,
            )),
            TypeKind::Class { .. } => {
                if !self.replay.eat_symbol("*")? {
                    return Err(TypeError::new(
                        ErrorCode::E3008,
                        format!("Object reference '{}' must be a pointer", token.text),
                        token,
                    ));
                }
                Ok(PropertyType::Object {
                    kind: ObjectKind::Raw,
                    class_name: token.text.clone(),
                    target: entry.id,
                })
            }
            TypeKind::Struct => Ok(PropertyType::Struct {
                name: token.text.clone(),
                target: entry.id,
            }),
            TypeKind::Enum => {
                self.skip_enum_type_suffix()?;
                Ok(PropertyType::Enum {
                    name: token.text.clone(),
                    target: entry.id,
                    underlying: None,
                })
            }
            TypeKind::Delegate { multicast } => Ok(PropertyType::Delegate {
                name: token.text.clone(),
                target: entry.id,
                multicast,
            }),
        }
    }

    /// `EFoo::Type` names the namespaced enum `EFoo`.
    fn skip_enum_type_suffix(&mut self) -> Result<(), TypeError> {
        if self.replay.peek_nth(0).is_symbol("::")
            && self.replay.peek_nth(1).is_identifier_named("Type")
        {
            self.replay.advance()?;
            self.replay.advance()?;
        }
        Ok(())
    }

    fn open(&mut self, wrapper: &Token) -> Result<(), TypeError> {
        if self.replay.eat_symbol("<")? {
            return Ok(());
        }
        Err(TypeError::new(
            ErrorCode::E3006,
            format!("Expected '<' after '{}'", wrapper.text),
            wrapper,
        ))
    }

    fn close(&mut self, wrapper: &Token) -> Result<(), TypeError> {
        self.replay.eat_ident("const")?;
        if self.replay.eat_symbol(">")? {
            return Ok(());
        }
        let next = self.replay.peek()?;
        Err(TypeError::new(
            ErrorCode::E3006,
            format!("Expected '>' to close '{}' but found '{next}'", wrapper.text),
            next,
        ))
    }

    /// Element type of a container; containers do not nest.
    fn container_element(&mut self, wrapper: &Token) -> Result<PropertyType, TypeError> {
        let element = self.element()?;
        if element.is_container() {
            return Err(TypeError::new(
                ErrorCode::E3006,
                format!("Nested containers are not supported in '{}'", wrapper.text),
                wrapper,
            ));
        }
        Ok(element)
    }

    /// `<UFoo>` naming an object class.
    fn class_argument(&mut self, wrapper: &Token) -> Result<(String, TypeRef), TypeError> {
        self.open(wrapper)?;
        while self.replay.eat_ident("const")? || self.replay.eat_ident("class")? {}
        let name = self.replay.advance()?;
        let table = self.table(&name)?;
        let target = match table.lookup(&name.text) {
            Some(entry)
                if matches!(
                    entry.kind,
                    TypeKind::Class {
                        native_interface: false,
                        ..
                    }
                ) =>
            {
                entry.id
            }
            _ => return Err(unknown_type(&name)),
        };
        self.close(wrapper)?;
        Ok((name.text, target))
    }
}

#[cold]
fn unknown_type(token: &Token) -> TypeError {
    TypeError::new(
        ErrorCode::E3001,
        format!("Unrecognized type '{}'", token.text),
        token,
    )
}

fn resolve_bool(_: &mut TypeResolver<'_>, _: &Token) -> Result<PropertyType, TypeError> {
    Ok(PropertyType::Bool { native: true })
}

fn resolve_int(r: &mut TypeResolver<'_>, token: &Token) -> Result<PropertyType, TypeError> {
    if token.text == "unsigned" {
        r.replay.eat_ident("int")?;
    }
    IntKind::from_name(&token.text)
        .map(PropertyType::Int)
        .ok_or_else(|| unknown_type(token))
}

fn resolve_float(_: &mut TypeResolver<'_>, _: &Token) -> Result<PropertyType, TypeError> {
    Ok(PropertyType::Float)
}

fn resolve_double(_: &mut TypeResolver<'_>, _: &Token) -> Result<PropertyType, TypeError> {
    Ok(PropertyType::Double)
}

fn resolve_string(_: &mut TypeResolver<'_>, _: &Token) -> Result<PropertyType, TypeError> {
    Ok(PropertyType::Str)
}

fn resolve_name(_: &mut TypeResolver<'_>, _: &Token) -> Result<PropertyType, TypeError> {
    Ok(PropertyType::Name)
}

fn resolve_text(_: &mut TypeResolver<'_>, _: &Token) -> Result<PropertyType, TypeError> {
    Ok(PropertyType::Text)
}

fn resolve_array(r: &mut TypeResolver<'_>, token: &Token) -> Result<PropertyType, TypeError> {
    r.open(token)?;
    let element = r.container_element(token)?;
    r.close(token)?;
    Ok(PropertyType::Array(Box::new(element)))
}

fn resolve_set(r: &mut TypeResolver<'_>, token: &Token) -> Result<PropertyType, TypeError> {
    r.open(token)?;
    let element = r.container_element(token)?;
    r.close(token)?;
    Ok(PropertyType::Set(Box::new(element)))
}

fn resolve_map(r: &mut TypeResolver<'_>, token: &Token) -> Result<PropertyType, TypeError> {
    r.open(token)?;
    let key = r.container_element(token)?;
    r.replay.eat_ident("const")?;
    if !r.replay.eat_symbol(",")? {
        let next = r.replay.peek()?;
        return Err(TypeError::new(
            ErrorCode::E3006,
            format!("Expected ',' between TMap key and value but found '{next}'"),
            next,
        ));
    }
    let value = r.container_element(token)?;
    r.close(token)?;
    Ok(PropertyType::Map(Box::new(key), Box::new(value)))
}

fn resolve_object_wrapper(
    r: &mut TypeResolver<'_>,
    token: &Token,
) -> Result<PropertyType, TypeError> {
    let kind = match token.text.as_str() {
        "TObjectPtr" => ObjectKind::ObjectPtr,
        "TWeakObjectPtr" => ObjectKind::Weak,
        "TLazyObjectPtr" => ObjectKind::Lazy,
        "TSoftObjectPtr" => ObjectKind::Soft,
        "TSubclassOf" => ObjectKind::Class,
        _ => ObjectKind::SoftClass,
    };
    let (class_name, target) = r.class_argument(token)?;
    Ok(PropertyType::Object {
        kind,
        class_name,
        target,
    })
}

fn resolve_script_interface(
    r: &mut TypeResolver<'_>,
    token: &Token,
) -> Result<PropertyType, TypeError> {
    r.open(token)?;
    let name = r.replay.advance()?;
    let target = match r.table(&name)?.lookup(&name.text) {
        Some(TypeEntry {
            id,
            kind: TypeKind::Class { interface, .. },
        }) if interface => id,
        Some(_) => {
            return Err(TypeError::new(
                ErrorCode::E3001,
                format!("'{}' is not an interface", name.text),
                &name,
            ))
        }
        None => return Err(unknown_type(&name)),
    };
    r.close(token)?;
    Ok(PropertyType::Interface {
        name: name.text,
        target,
    })
}

fn resolve_enum_as_byte(
    r: &mut TypeResolver<'_>,
    token: &Token,
) -> Result<PropertyType, TypeError> {
    r.open(token)?;
    r.replay.eat_ident("enum")?;
    let name = r.replay.advance()?;
    r.skip_enum_type_suffix()?;
    let target = match r.table(&name)?.lookup(&name.text) {
        Some(TypeEntry {
            id,
            kind: TypeKind::Enum,
        }) => id,
        _ => return Err(unknown_type(&name)),
    };
    r.close(token)?;
    Ok(PropertyType::Enum {
        name: name.text,
        target,
        underlying: Some(IntKind::UInt8),
    })
}

/// `UClass*` is a class reference to any object.
fn resolve_uclass(r: &mut TypeResolver<'_>, token: &Token) -> Result<PropertyType, TypeError> {
    if !r.replay.eat_symbol("*")? {
        return Err(TypeError::new(
            ErrorCode::E3008,
            "Object reference 'UClass' must be a pointer",
            token,
        ));
    }
    let target = r
        .table(token)?
        .lookup("UObject")
        .map(|entry| entry.id)
        .ok_or_else(|| unknown_type(token))?;
    Ok(PropertyType::Object {
        kind: ObjectKind::Class,
        class_name: "UObject".to_owned(),
        target,
    })
}
