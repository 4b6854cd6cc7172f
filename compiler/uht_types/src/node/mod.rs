//! Declaration nodes.
//!
//! Each declaration kind is a variant record with typed flag fields. Nodes
//! are created the moment their introducing keyword is recognized and are
//! mutated in place across the resolution phases.

use smallvec::SmallVec;
use uht_ir::Token;

use crate::{
    ClassCategories, ClassExportFlags, ClassFlags, CompilerDirective, ConstructorFlags,
    EnumFlags, FunctionExportFlags, FunctionFlags, MetaData, NodeId, PropertyExportFlags,
    PropertyFlags, PropertyType, SerializerArchive, StructFlags, TypeRef,
};

/// C++ access level of the enclosing scope.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum AccessSpecifier {
    #[default]
    Public,
    Protected,
    Private,
}

impl AccessSpecifier {
    pub fn from_keyword(text: &str) -> Option<AccessSpecifier> {
        match text {
            "public" => Some(AccessSpecifier::Public),
            "protected" => Some(AccessSpecifier::Protected),
            "private" => Some(AccessSpecifier::Private),
            _ => None,
        }
    }
}

/// A run of class-body tokens no keyword handler claimed.
///
/// Replayed after parsing to find constructors and serializers.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct RecordedDeclaration {
    pub tokens: Vec<Token>,
    /// Directive composite in effect when the declaration started.
    pub directive: CompilerDirective,
    pub line: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ClassType {
    /// `UCLASS`
    Class,
    /// `UINTERFACE`
    Interface,
    /// The `I`-prefixed native half of an interface.
    NativeInterface,
}

#[derive(Clone, Debug)]
pub struct ClassDecl {
    pub class_type: ClassType,
    pub flags: ClassFlags,
    removed_flags: ClassFlags,
    pub export_flags: ClassExportFlags,
    /// `FOO_API` export macro.
    pub api: Option<String>,
    pub super_name: Option<String>,
    pub base_names: SmallVec<[String; 2]>,
    pub super_type: Option<TypeRef>,
    pub bases: Vec<TypeRef>,
    pub within_name: Option<String>,
    pub within_type: Option<TypeRef>,
    /// Interface class <-> native interface pairing.
    pub alternate_object: Option<TypeRef>,
    pub config_name: Option<String>,
    pub categories: ClassCategories,
    pub sparse_data_types: Vec<String>,
    pub generated_body_line: Option<u32>,
    pub generated_body_access: Option<AccessSpecifier>,
    pub declarations: Vec<RecordedDeclaration>,
    pub constructors: ConstructorFlags,
    pub serializer: SerializerArchive,
    pub serializer_directive: CompilerDirective,
}

impl ClassDecl {
    pub fn new(class_type: ClassType) -> Self {
        ClassDecl {
            class_type,
            flags: ClassFlags::empty(),
            removed_flags: ClassFlags::empty(),
            export_flags: ClassExportFlags::empty(),
            api: None,
            super_name: None,
            base_names: SmallVec::new(),
            super_type: None,
            bases: Vec::new(),
            within_name: None,
            within_type: None,
            alternate_object: None,
            config_name: None,
            categories: ClassCategories::default(),
            sparse_data_types: Vec::new(),
            generated_body_line: None,
            generated_body_access: None,
            declarations: Vec::new(),
            constructors: ConstructorFlags::empty(),
            serializer: SerializerArchive::empty(),
            serializer_directive: CompilerDirective::empty(),
        }
    }

    /// Set flags, cancelling any earlier explicit removal.
    pub fn add_flags(&mut self, flags: ClassFlags) {
        self.flags |= flags;
        self.removed_flags &= !flags;
    }

    /// Clear flags and remember the opt-out so inheritance cannot restore them.
    pub fn remove_flags(&mut self, flags: ClassFlags) {
        self.flags &= !flags;
        self.removed_flags |= flags;
    }

    pub fn removed_flags(&self) -> ClassFlags {
        self.removed_flags
    }

    /// OR in the inheritable part of a super / interface flag set.
    pub fn inherit_flags(&mut self, from: ClassFlags) {
        self.flags |= from & ClassFlags::SCRIPT_INHERIT;
        self.flags &= !self.removed_flags;
    }

    pub fn is_interface(&self) -> bool {
        matches!(
            self.class_type,
            ClassType::Interface | ClassType::NativeInterface
        )
    }
}

#[derive(Clone, Debug, Default)]
pub struct StructDecl {
    pub flags: StructFlags,
    pub api: Option<String>,
    pub super_name: Option<String>,
    pub super_type: Option<TypeRef>,
    pub generated_body_line: Option<u32>,
}

/// How the enum was written in C++.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum EnumCppForm {
    /// `enum EFoo { ... }`
    Regular,
    /// `namespace EFoo { enum Type { ... }; }`
    Namespaced,
    /// `enum class EFoo : uint8 { ... }`
    EnumClass,
}

#[derive(Clone, Eq, PartialEq, Debug)]
pub struct EnumValue {
    /// Name as written.
    pub name: String,
    /// `EFoo::Name` for scoped forms, `Name` for regular enums.
    pub full_name: String,
    pub value: i64,
}

#[derive(Clone, Debug)]
pub struct EnumDecl {
    pub cpp_form: EnumCppForm,
    pub underlying_type: Option<String>,
    pub flags: EnumFlags,
    pub values: Vec<EnumValue>,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FunctionType {
    Function,
    Delegate,
    SparseDelegate,
}

#[derive(Clone, Debug)]
pub struct FunctionDecl {
    pub function_type: FunctionType,
    pub flags: FunctionFlags,
    pub export_flags: FunctionExportFlags,
    pub return_property: Option<NodeId>,
    /// Delegate macro as written, e.g. `DECLARE_DYNAMIC_MULTICAST_DELEGATE_OneParam`.
    pub macro_name: Option<String>,
    /// Owning class and property of a sparse delegate.
    pub sparse_owner: Option<String>,
    pub sparse_property: Option<String>,
    /// Native implementation name for net and native-event functions.
    pub cpp_impl_name: Option<String>,
    pub cpp_validate_name: Option<String>,
    pub directive: CompilerDirective,
}

impl FunctionDecl {
    pub fn new(function_type: FunctionType) -> Self {
        FunctionDecl {
            function_type,
            flags: FunctionFlags::empty(),
            export_flags: FunctionExportFlags::empty(),
            return_property: None,
            macro_name: None,
            sparse_owner: None,
            sparse_property: None,
            cpp_impl_name: None,
            cpp_validate_name: None,
            directive: CompilerDirective::empty(),
        }
    }
}

/// Where a property appears.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PropertyCategory {
    Member,
    RegularParameter,
    ReplicatedParameter,
    Return,
}

impl PropertyCategory {
    pub fn is_parameter(self) -> bool {
        matches!(
            self,
            PropertyCategory::RegularParameter | PropertyCategory::ReplicatedParameter
        )
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum RefQualifier {
    #[default]
    None,
    ConstRef,
    NonConstRef,
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum PropertyAllocator {
    #[default]
    Default,
    /// Declared through a layout macro.
    MemoryImage,
}

#[derive(Clone, Debug)]
pub struct PropertyDecl {
    pub category: PropertyCategory,
    pub flags: PropertyFlags,
    pub export_flags: PropertyExportFlags,
    pub ref_qualifier: RefQualifier,
    pub ty: PropertyType,
    /// Static array dimension as written, unevaluated.
    pub array_dimensions: Option<String>,
    pub is_bitfield: bool,
    /// Raw default value tokens for script-callable function parameters.
    pub default_value_tokens: Vec<Token>,
    pub rep_notify: Option<String>,
    pub setter: Option<String>,
    pub getter: Option<String>,
    pub allocator: PropertyAllocator,
    pub directive: CompilerDirective,
}

impl PropertyDecl {
    pub fn new(category: PropertyCategory, ty: PropertyType) -> Self {
        PropertyDecl {
            category,
            flags: PropertyFlags::empty(),
            export_flags: PropertyExportFlags::empty(),
            ref_qualifier: RefQualifier::None,
            ty,
            array_dimensions: None,
            is_bitfield: false,
            default_value_tokens: Vec::new(),
            rep_notify: None,
            setter: None,
            getter: None,
            allocator: PropertyAllocator::Default,
            directive: CompilerDirective::empty(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum NodeKind {
    Header,
    Class(ClassDecl),
    Struct(StructDecl),
    Enum(EnumDecl),
    Function(FunctionDecl),
    Property(PropertyDecl),
}

/// A declaration in the type graph.
#[derive(Clone, Debug)]
pub struct Node {
    /// Name as written in C++.
    pub source_name: String,
    /// Name with the conventional prefix removed.
    pub engine_name: String,
    pub outer: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub line: u32,
    pub meta: MetaData,
    pub kind: NodeKind,
}

impl Node {
    pub fn new(source_name: impl Into<String>, engine_name: impl Into<String>, line: u32, kind: NodeKind) -> Self {
        Node {
            source_name: source_name.into(),
            engine_name: engine_name.into(),
            outer: None,
            children: Vec::new(),
            line,
            meta: MetaData::new(),
            kind,
        }
    }

    /// Short kind word used in diagnostic contexts.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Header => "header",
            NodeKind::Class(class) => match class.class_type {
                ClassType::Class => "class",
                ClassType::Interface | ClassType::NativeInterface => "interface",
            },
            NodeKind::Struct(_) => "struct",
            NodeKind::Enum(_) => "enum",
            NodeKind::Function(function) => match function.function_type {
                FunctionType::Function => "function",
                FunctionType::Delegate | FunctionType::SparseDelegate => "delegate",
            },
            NodeKind::Property(_) => "property",
        }
    }

    /// Diagnostic context, e.g. `class 'UWidget'`.
    pub fn context(&self) -> String {
        format!("{} '{}'", self.kind_name(), self.source_name)
    }

    pub fn as_class(&self) -> Option<&ClassDecl> {
        match &self.kind {
            NodeKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_class_mut(&mut self) -> Option<&mut ClassDecl> {
        match &mut self.kind {
            NodeKind::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn as_struct(&self) -> Option<&StructDecl> {
        match &self.kind {
            NodeKind::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_struct_mut(&mut self) -> Option<&mut StructDecl> {
        match &mut self.kind {
            NodeKind::Struct(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_enum(&self) -> Option<&EnumDecl> {
        match &self.kind {
            NodeKind::Enum(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_enum_mut(&mut self) -> Option<&mut EnumDecl> {
        match &mut self.kind {
            NodeKind::Enum(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionDecl> {
        match &self.kind {
            NodeKind::Function(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_function_mut(&mut self) -> Option<&mut FunctionDecl> {
        match &mut self.kind {
            NodeKind::Function(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_property(&self) -> Option<&PropertyDecl> {
        match &self.kind {
            NodeKind::Property(decl) => Some(decl),
            _ => None,
        }
    }

    pub fn as_property_mut(&mut self) -> Option<&mut PropertyDecl> {
        match &mut self.kind {
            NodeKind::Property(decl) => Some(decl),
            _ => None,
        }
    }
}
