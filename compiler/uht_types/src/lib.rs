//! Type graph for reflected header declarations.
//!
//! Every header owns an arena of [`Node`]s linked by an `outer` / `children`
//! tree. Cross-links that are not ownership edges (super type, within type,
//! alternate object) are [`TypeRef`]s, which may point into another header.
//!
//! # Modules
//! - `flags`: typed flag sets per declaration kind
//! - `directive`: compiler-directive classification
//! - `meta`: string metadata maps with per-index keys
//! - `category`: category / flag inheritance rules
//! - `node`: declaration nodes
//! - `property_type`: resolved and unresolved property types
//! - `header`: per-header arena
//! - `table`: the concurrent cross-header type table

mod category;
mod directive;
mod flags;
mod header;
mod meta;
mod node;
mod property_type;
mod table;

pub use category::{
    merge_auto_categories, merge_hide_functions, merge_show_categories, ClassCategories,
};
pub use directive::CompilerDirective;
pub use flags::{
    ClassExportFlags, ClassFlags, ConstructorFlags, EnumFlags, FunctionExportFlags,
    FunctionFlags, PropertyExportFlags, PropertyFlags, SerializerArchive, StructFlags,
};
pub use header::{HeaderFile, HeaderId, NodeId, TypeRef};
pub use meta::{MetaData, MetaKey};
pub use node::{
    AccessSpecifier, ClassDecl, ClassType, EnumCppForm, EnumDecl, EnumValue, FunctionDecl,
    FunctionType, Node, NodeKind, PropertyAllocator, PropertyCategory, PropertyDecl,
    RecordedDeclaration, RefQualifier, StructDecl,
};
pub use property_type::{IntKind, ObjectKind, PropertyType};
pub use table::{TypeEntry, TypeKind, TypeTable};
