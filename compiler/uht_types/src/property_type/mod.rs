//! Property types.
//!
//! A property's type is either still the raw token run captured at parse
//! time ([`PropertyType::Unresolved`]) or a resolved kind. Resolution
//! replays the captured tokens once every header has been parsed, so a
//! reference to a type declared later resolves exactly like one declared
//! earlier.

use uht_ir::{join_tokens, Token};

use crate::TypeRef;

/// Fixed-width integer kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum IntKind {
    Int8,
    Int16,
    Int32,
    Int64,
    UInt8,
    UInt16,
    UInt32,
    UInt64,
}

impl IntKind {
    pub fn from_name(name: &str) -> Option<IntKind> {
        let kind = match name {
            "int8" => IntKind::Int8,
            "int16" => IntKind::Int16,
            "int32" | "int" => IntKind::Int32,
            "int64" => IntKind::Int64,
            "uint8" => IntKind::UInt8,
            "uint16" => IntKind::UInt16,
            "uint32" | "unsigned" => IntKind::UInt32,
            "uint64" => IntKind::UInt64,
            _ => return None,
        };
        Some(kind)
    }

    pub fn cpp_name(self) -> &'static str {
        match self {
            IntKind::Int8 => "int8",
            IntKind::Int16 => "int16",
            IntKind::Int32 => "int32",
            IntKind::Int64 => "int64",
            IntKind::UInt8 => "uint8",
            IntKind::UInt16 => "uint16",
            IntKind::UInt32 => "uint32",
            IntKind::UInt64 => "uint64",
        }
    }
}

/// How an object reference is held.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ObjectKind {
    /// `UFoo*`
    Raw,
    /// `TObjectPtr<UFoo>`
    ObjectPtr,
    /// `TWeakObjectPtr<UFoo>`
    Weak,
    /// `TLazyObjectPtr<UFoo>`
    Lazy,
    /// `TSoftObjectPtr<UFoo>`
    Soft,
    /// `TSubclassOf<UFoo>` or `UClass*`
    Class,
    /// `TSoftClassPtr<UFoo>`
    SoftClass,
}

impl ObjectKind {
    fn wrapper(self) -> Option<&'static str> {
        match self {
            ObjectKind::Raw => None,
            ObjectKind::ObjectPtr => Some("TObjectPtr"),
            ObjectKind::Weak => Some("TWeakObjectPtr"),
            ObjectKind::Lazy => Some("TLazyObjectPtr"),
            ObjectKind::Soft => Some("TSoftObjectPtr"),
            ObjectKind::Class => Some("TSubclassOf"),
            ObjectKind::SoftClass => Some("TSoftClassPtr"),
        }
    }
}

/// Type of a property node.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum PropertyType {
    /// Captured type tokens awaiting the resolution pass.
    Unresolved(Vec<Token>),
    /// Resolution failed and was reported; holds the type text.
    Unknown(String),
    /// `bool`, or a `uint8 bFoo : 1` bitfield when `native` is false.
    Bool { native: bool },
    Int(IntKind),
    Float,
    Double,
    Str,
    Name,
    Text,
    Object {
        kind: ObjectKind,
        class_name: String,
        target: TypeRef,
    },
    /// `TScriptInterface<IFoo>`
    Interface { name: String, target: TypeRef },
    Struct { name: String, target: TypeRef },
    Enum {
        name: String,
        target: TypeRef,
        /// Storage when wrapped in `TEnumAsByte` or given an underlying type.
        underlying: Option<IntKind>,
    },
    Delegate {
        name: String,
        target: TypeRef,
        multicast: bool,
    },
    Array(Box<PropertyType>),
    Set(Box<PropertyType>),
    Map(Box<PropertyType>, Box<PropertyType>),
}

impl PropertyType {
    pub fn is_unresolved(&self) -> bool {
        matches!(self, PropertyType::Unresolved(_))
    }

    pub fn is_container(&self) -> bool {
        matches!(
            self,
            PropertyType::Array(_) | PropertyType::Set(_) | PropertyType::Map(..)
        )
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, PropertyType::Bool { .. })
    }

    /// Holds a reference to an object or class.
    pub fn is_object_reference(&self) -> bool {
        matches!(
            self,
            PropertyType::Object { .. } | PropertyType::Interface { .. }
        )
    }

    pub fn is_multicast_delegate(&self) -> bool {
        matches!(self, PropertyType::Delegate { multicast: true, .. })
    }

    /// C++ spelling, used in diagnostics.
    pub fn cpp_type(&self) -> String {
        match self {
            PropertyType::Unresolved(tokens) => join_tokens(tokens),
            PropertyType::Unknown(text) => text.clone(),
            PropertyType::Bool { native: true } => "bool".to_owned(),
            PropertyType::Bool { native: false } => "uint8".to_owned(),
            PropertyType::Int(kind) => kind.cpp_name().to_owned(),
            PropertyType::Float => "float".to_owned(),
            PropertyType::Double => "double".to_owned(),
            PropertyType::Str => "FString".to_owned(),
            PropertyType::Name => "FName".to_owned(),
            PropertyType::Text => "FText".to_owned(),
            PropertyType::Object {
                kind, class_name, ..
            } => match kind.wrapper() {
                Some(wrapper) => format!("{wrapper}<{class_name}>"),
                None => format!("{class_name}*"),
            },
            PropertyType::Interface { name, .. } => format!("TScriptInterface<{name}>"),
            PropertyType::Struct { name, .. } | PropertyType::Delegate { name, .. } => {
                name.clone()
            }
            PropertyType::Enum {
                name, underlying, ..
            } => match underlying {
                Some(IntKind::UInt8) => format!("TEnumAsByte<{name}>"),
                _ => name.clone(),
            },
            PropertyType::Array(inner) => format!("TArray<{}>", inner.cpp_type()),
            PropertyType::Set(inner) => format!("TSet<{}>", inner.cpp_type()),
            PropertyType::Map(key, value) => {
                format!("TMap<{}, {}>", key.cpp_type(), value.cpp_type())
            }
        }
    }
}

#[cfg(test)]
mod tests;
