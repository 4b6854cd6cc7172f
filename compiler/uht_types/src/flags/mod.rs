//! Typed flag sets for each declaration kind.
//!
//! Bit values match the runtime reflection flags the generated code is
//! compiled against, so a flag set can be emitted as a literal.
//!
//! Flags accumulate by bitwise OR from the declaration site plus whatever
//! the super type contributes through the `*_INHERIT` masks.

use bitflags::bitflags;

bitflags! {
    /// Class flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassFlags: u32 {
        const ABSTRACT = 0x0000_0001;
        const DEFAULT_CONFIG = 0x0000_0002;
        const CONFIG = 0x0000_0004;
        const TRANSIENT = 0x0000_0008;
        const OPTIONAL = 0x0000_0010;
        const MATCHED_SERIALIZERS = 0x0000_0020;
        const PROJECT_USER_CONFIG = 0x0000_0040;
        const NATIVE = 0x0000_0080;
        const NO_EXPORT = 0x0000_0100;
        const NOT_PLACEABLE = 0x0000_0200;
        const PER_OBJECT_CONFIG = 0x0000_0400;
        const EDIT_INLINE_NEW = 0x0000_1000;
        const COLLAPSE_CATEGORIES = 0x0000_2000;
        const INTERFACE = 0x0000_4000;
        const CUSTOM_CONSTRUCTOR = 0x0000_8000;
        const CONST = 0x0001_0000;
        const NEEDS_DEFERRED_DEPENDENCY_LOADING = 0x0002_0000;
        const MINIMAL_API = 0x0008_0000;
        const REQUIRED_API = 0x0010_0000;
        const DEFAULT_TO_INSTANCED = 0x0020_0000;
        const HAS_INSTANCED_REFERENCE = 0x0080_0000;
        const HIDDEN = 0x0100_0000;
        const DEPRECATED = 0x0200_0000;
        const HIDE_DROP_DOWN = 0x0400_0000;
        const GLOBAL_USER_CONFIG = 0x0800_0000;
        const INTRINSIC = 0x1000_0000;
        const CONFIG_DO_NOT_CHECK_DEFAULTS = 0x4000_0000;

        /// Flags a subclass always takes from its super class.
        const INHERIT = Self::TRANSIENT.bits()
            | Self::OPTIONAL.bits()
            | Self::DEFAULT_CONFIG.bits()
            | Self::CONFIG.bits()
            | Self::PER_OBJECT_CONFIG.bits()
            | Self::CONFIG_DO_NOT_CHECK_DEFAULTS.bits()
            | Self::NOT_PLACEABLE.bits()
            | Self::CONST.bits()
            | Self::HAS_INSTANCED_REFERENCE.bits()
            | Self::DEPRECATED.bits()
            | Self::DEFAULT_TO_INSTANCED.bits()
            | Self::GLOBAL_USER_CONFIG.bits()
            | Self::PROJECT_USER_CONFIG.bits()
            | Self::NEEDS_DEFERRED_DEPENDENCY_LOADING.bits();

        /// Flags inherited across public derivation from super and interfaces.
        const SCRIPT_INHERIT = Self::INHERIT.bits()
            | Self::EDIT_INLINE_NEW.bits()
            | Self::COLLAPSE_CATEGORIES.bits();
    }
}

bitflags! {
    /// Class information that never reaches the runtime flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ClassExportFlags: u32 {
        /// Body declared with the legacy `GENERATED_UCLASS_BODY` form.
        const LEGACY_GENERATED_BODY = 1 << 0;
        /// At least one member property is replicated.
        const HAS_REPLICATED_PROPERTIES = 1 << 1;
        /// The class declares `GetLifetimeReplicatedProps` itself.
        const HAS_GET_LIFETIME_REPLICATED_PROPS = 1 << 2;
        /// `SparseClassDataType` was given.
        const HAS_SPARSE_DATA = 1 << 3;
    }
}

bitflags! {
    /// Constructors the class declares itself, found by replaying recorded
    /// declarations.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct ConstructorFlags: u8 {
        const DEFAULT = 1 << 0;
        const OBJECT_INITIALIZER = 1 << 1;
        const COPY = 1 << 2;
        /// `FVTableHelper&` hot-reload helper constructor.
        const VTABLE_HELPER = 1 << 3;
    }
}

bitflags! {
    /// Serializer overloads the class declares.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct SerializerArchive: u8 {
        const ARCHIVE = 1 << 0;
        const STRUCTURED_ARCHIVE_RECORD = 1 << 1;
    }
}

bitflags! {
    /// Struct flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct StructFlags: u32 {
        const NATIVE = 0x0000_0001;
        const IDENTICAL_NATIVE = 0x0000_0002;
        const HAS_INSTANCED_REFERENCE = 0x0000_0008;
        const NO_EXPORT = 0x0000_0010;
        const ATOMIC = 0x0000_0020;
        const IMMUTABLE = 0x0000_0040;
        const ADD_STRUCT_REFERENCED_OBJECTS = 0x0000_0080;
        const REQUIRED_API = 0x0000_0200;
        const NET_SERIALIZE_NATIVE = 0x0000_0400;
        const SERIALIZE_NATIVE = 0x0000_0800;
        const COPY_NATIVE = 0x0000_1000;
        const IS_PLAIN_OLD_DATA = 0x0000_2000;
        const NO_DESTRUCTOR = 0x0000_4000;
        const ZERO_CONSTRUCTOR = 0x0000_8000;

        /// Flags a derived struct takes from its super struct.
        const INHERIT = Self::HAS_INSTANCED_REFERENCE.bits() | Self::ATOMIC.bits();
    }
}

bitflags! {
    /// Enum flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct EnumFlags: u8 {
        /// Values are bit flags.
        const FLAGS = 1 << 0;
    }
}

bitflags! {
    /// Function flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionFlags: u32 {
        const FINAL = 0x0000_0001;
        const REQUIRED_API = 0x0000_0002;
        const BLUEPRINT_AUTHORITY_ONLY = 0x0000_0004;
        const BLUEPRINT_COSMETIC = 0x0000_0008;
        const NET = 0x0000_0040;
        const NET_RELIABLE = 0x0000_0080;
        const NET_REQUEST = 0x0000_0100;
        const EXEC = 0x0000_0200;
        const NATIVE = 0x0000_0400;
        const EVENT = 0x0000_0800;
        const NET_RESPONSE = 0x0000_1000;
        const STATIC = 0x0000_2000;
        const NET_MULTICAST = 0x0000_4000;
        const MULTICAST_DELEGATE = 0x0001_0000;
        const PUBLIC = 0x0002_0000;
        const PRIVATE = 0x0004_0000;
        const PROTECTED = 0x0008_0000;
        const DELEGATE = 0x0010_0000;
        const NET_SERVER = 0x0020_0000;
        const HAS_OUT_PARMS = 0x0040_0000;
        const HAS_DEFAULTS = 0x0080_0000;
        const NET_CLIENT = 0x0100_0000;
        const BLUEPRINT_CALLABLE = 0x0400_0000;
        const BLUEPRINT_EVENT = 0x0800_0000;
        const BLUEPRINT_PURE = 0x1000_0000;
        const EDITOR_ONLY = 0x2000_0000;
        const CONST = 0x4000_0000;
        const NET_VALIDATE = 0x8000_0000;

        /// Callable from script; default values are kept only for these.
        const SCRIPT_CALLABLE = Self::BLUEPRINT_CALLABLE.bits()
            | Self::BLUEPRINT_PURE.bits()
            | Self::BLUEPRINT_EVENT.bits();
        const ACCESS = Self::PUBLIC.bits() | Self::PRIVATE.bits() | Self::PROTECTED.bits();
        const NET_TARGETS = Self::NET_SERVER.bits() | Self::NET_CLIENT.bits() | Self::NET_MULTICAST.bits();
    }
}

bitflags! {
    /// Function information that never reaches the runtime flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct FunctionExportFlags: u16 {
        const VIRTUAL = 1 << 0;
        const FINAL = 1 << 1;
        const INLINE = 1 << 2;
        const CUSTOM_THUNK = 1 << 3;
        const SEALED_EVENT = 1 << 4;
        const UNRELIABLE = 1 << 5;
        /// `BlueprintNativeEvent`: a `_Implementation` body is expected.
        const NATIVE_EVENT = 1 << 6;
        /// Declared through a `DECLARE_DYNAMIC_*` macro.
        const DELEGATE_MACRO = 1 << 7;
    }
}

bitflags! {
    /// Property flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PropertyFlags: u64 {
        const EDIT = 0x0000_0000_0000_0001;
        const CONST_PARM = 0x0000_0000_0000_0002;
        const BLUEPRINT_VISIBLE = 0x0000_0000_0000_0004;
        const EXPORT_OBJECT = 0x0000_0000_0000_0008;
        const BLUEPRINT_READ_ONLY = 0x0000_0000_0000_0010;
        const NET = 0x0000_0000_0000_0020;
        const EDIT_FIXED_SIZE = 0x0000_0000_0000_0040;
        const PARM = 0x0000_0000_0000_0080;
        const OUT_PARM = 0x0000_0000_0000_0100;
        const ZERO_CONSTRUCTOR = 0x0000_0000_0000_0200;
        const RETURN_PARM = 0x0000_0000_0000_0400;
        const DISABLE_EDIT_ON_TEMPLATE = 0x0000_0000_0000_0800;
        const TRANSIENT = 0x0000_0000_0000_2000;
        const CONFIG = 0x0000_0000_0000_4000;
        const DISABLE_EDIT_ON_INSTANCE = 0x0000_0000_0001_0000;
        const EDIT_CONST = 0x0000_0000_0002_0000;
        const GLOBAL_CONFIG = 0x0000_0000_0004_0000;
        const INSTANCED_REFERENCE = 0x0000_0000_0008_0000;
        const DUPLICATE_TRANSIENT = 0x0000_0000_0020_0000;
        const SAVE_GAME = 0x0000_0000_0100_0000;
        const NO_CLEAR = 0x0000_0000_0200_0000;
        const REFERENCE_PARM = 0x0000_0000_0800_0000;
        const BLUEPRINT_ASSIGNABLE = 0x0000_0000_1000_0000;
        const DEPRECATED = 0x0000_0000_2000_0000;
        const IS_PLAIN_OLD_DATA = 0x0000_0000_4000_0000;
        const REP_SKIP = 0x0000_0000_8000_0000;
        const REP_NOTIFY = 0x0000_0001_0000_0000;
        const INTERP = 0x0000_0002_0000_0000;
        const NON_TRANSACTIONAL = 0x0000_0004_0000_0000;
        const EDITOR_ONLY = 0x0000_0008_0000_0000;
        const NO_DESTRUCTOR = 0x0000_0010_0000_0000;
        const AUTO_WEAK = 0x0000_0040_0000_0000;
        const CONTAINS_INSTANCED_REFERENCE = 0x0000_0080_0000_0000;
        const ASSET_REGISTRY_SEARCHABLE = 0x0000_0100_0000_0000;
        const SIMPLE_DISPLAY = 0x0000_0200_0000_0000;
        const ADVANCED_DISPLAY = 0x0000_0400_0000_0000;
        const PROTECTED = 0x0000_0800_0000_0000;
        const BLUEPRINT_CALLABLE = 0x0000_1000_0000_0000;
        const BLUEPRINT_AUTHORITY_ONLY = 0x0000_2000_0000_0000;
        const TEXT_EXPORT_TRANSIENT = 0x0000_4000_0000_0000;
        const NON_PIE_DUPLICATE_TRANSIENT = 0x0000_8000_0000_0000;
        const EXPOSE_ON_SPAWN = 0x0001_0000_0000_0000;
        const PERSISTENT_INSTANCE = 0x0002_0000_0000_0000;
        const UOBJECT_WRAPPER = 0x0004_0000_0000_0000;
        const NATIVE_ACCESS_SPECIFIER_PUBLIC = 0x0010_0000_0000_0000;
        const NATIVE_ACCESS_SPECIFIER_PROTECTED = 0x0020_0000_0000_0000;
        const NATIVE_ACCESS_SPECIFIER_PRIVATE = 0x0040_0000_0000_0000;
        const SKIP_SERIALIZATION = 0x0080_0000_0000_0000;

        /// Any edit or visibility specifier.
        const EDIT_ANY = Self::EDIT.bits() | Self::EDIT_CONST.bits();
        /// Only meaningful on multicast delegate properties.
        const DELEGATE_ONLY = Self::BLUEPRINT_ASSIGNABLE.bits()
            | Self::BLUEPRINT_CALLABLE.bits()
            | Self::BLUEPRINT_AUTHORITY_ONLY.bits();
        const NATIVE_ACCESS = Self::NATIVE_ACCESS_SPECIFIER_PUBLIC.bits()
            | Self::NATIVE_ACCESS_SPECIFIER_PROTECTED.bits()
            | Self::NATIVE_ACCESS_SPECIFIER_PRIVATE.bits();
    }
}

bitflags! {
    /// Property information that never reaches the runtime flags.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct PropertyExportFlags: u8 {
        const PUBLIC = 1 << 0;
        const PRIVATE = 1 << 1;
        const PROTECTED = 1 << 2;
        const GETTER_SPECIFIED = 1 << 3;
        const SETTER_SPECIFIED = 1 << 4;
        const GETTER_NONE = 1 << 5;
        const SETTER_NONE = 1 << 6;
    }
}
