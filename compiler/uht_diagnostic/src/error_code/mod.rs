use std::fmt;

/// Error codes for all front-end diagnostics.
///
/// Format: E#### where the first digit indicates the phase:
/// - E0xxx: Lexical / structural (fatal for the current header)
/// - E1xxx: Declaration parsing
/// - E2xxx: Specifiers and metadata
/// - E3xxx: Property and type parsing / resolution
/// - E4xxx: Inheritance, categories, config
/// - E5xxx: Compiler directives
/// - E6xxx: Validation
/// - E9xxx: Internal contract violations
/// - W1xxx: Advisory warnings
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Lexical / structural errors (E0xxx), always fatal for the current header
    /// Unterminated string literal
    E0001,
    /// Unterminated block comment
    E0002,
    /// Unexpected character in source
    E0003,
    /// Unterminated character literal
    E0004,
    /// Unexpected end of file
    E0010,
    /// Missing required token
    E0011,
    /// Unmatched closing `>` in a type
    E0012,
    /// Expected an identifier
    E0013,
    /// Unexpected token
    E0014,

    // Declaration errors (E1xxx)
    /// Unexpected token in declaration
    E1001,
    /// Name is empty once its prefix is removed
    E1002,
    /// Missing generated body marker
    E1003,
    /// Delegate macro name does not match its arguments
    E1004,
    /// Reflection macro not allowed in this scope
    E1005,
    /// Invalid type name prefix
    E1006,
    /// Duplicate type name
    E1007,
    /// Expected a declaration after a reflection macro
    E1008,
    /// Blueprint-exposed enum class must use `uint8`
    E1009,
    /// Duplicate enumerator
    E1010,
    /// Unsupported declaration form
    E1011,
    /// Missing generated include
    E1012,
    /// Interface without matching native interface class
    E1013,
    /// Malformed delegate declaration
    E1014,

    // Specifier and metadata errors (E2xxx)
    /// Unknown specifier
    E2001,
    /// Missing or malformed specifier value
    E2002,
    /// Specifier handler rejected a registered specifier
    E2003,
    /// Empty metadata list
    E2004,
    /// Invalid specifier value
    E2005,
    /// Conflicting specifiers
    E2006,

    // Property and type errors (E3xxx)
    /// Unknown type
    E3001,
    /// Unexpected `*` after type
    E3002,
    /// Unexpected token after type
    E3003,
    /// Invalid bitfield width
    E3004,
    /// Missing property name
    E3005,
    /// Malformed container type
    E3006,
    /// Reference not allowed here
    E3007,
    /// Object reference must be a pointer
    E3008,

    // Inheritance, category and config errors (E4xxx)
    /// Unknown super type
    E4001,
    /// Additional base is not an interface
    E4002,
    /// Invalid within type
    E4003,
    /// Missing config name
    E4004,
    /// Inheritance cycle
    E4005,
    /// Inherited config requires a configured super class
    E4006,
    /// Missing super class
    E4007,
    /// `Placeable` under a placeable super class
    E4008,

    // Compiler directive errors (E5xxx)
    /// Unknown compiler directive
    E5001,
    /// `#else` not allowed for this condition
    E5002,
    /// `#elif` mixes incompatible conditions
    E5003,
    /// `#endif` without matching `#if`
    E5004,
    /// Unterminated conditional block
    E5005,
    /// Include after the generated include
    E5006,
    /// Property inside an unsupported conditional block
    E5007,
    /// Function inside an unsupported conditional block
    E5008,
    /// Serializer inside an unsupported conditional block
    E5009,

    // Validation errors (E6xxx)
    /// Array used as return value
    E6001,
    /// Array used as function parameter
    E6002,
    /// Bool static array
    E6003,
    /// Config on object reference
    E6004,
    /// Property shadows a super class property
    E6005,
    /// Replicated function without reliability
    E6006,
    /// Pure function without outputs
    E6007,
    /// Static function declared as event
    E6008,
    /// Reserved parameter name
    E6009,
    /// More than one edit or visibility specifier
    E6010,
    /// Static array of containers
    E6011,
    /// Delegate-only specifier on non-delegate property
    E6012,
    /// Read-only and read-write both specified
    E6013,

    // Internal errors (E9xxx)
    /// Scope stack contract violation
    E9001,
    /// Class scope required
    E9002,

    // Warnings (W1xxx)
    /// Default value could not be parsed
    W1001,
    /// Editor guard around property
    W1002,
    /// Deprecated property is editable or visible
    W1003,
    /// `ExposeOnSpawn` without blueprint visibility
    W1004,
    /// Enum value initializer not evaluated
    W1005,
}

impl ErrorCode {
    /// Get the code as a string (e.g., "E1001").
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "E0001",
            ErrorCode::E0002 => "E0002",
            ErrorCode::E0003 => "E0003",
            ErrorCode::E0004 => "E0004",
            ErrorCode::E0010 => "E0010",
            ErrorCode::E0011 => "E0011",
            ErrorCode::E0012 => "E0012",
            ErrorCode::E0013 => "E0013",
            ErrorCode::E0014 => "E0014",
            ErrorCode::E1001 => "E1001",
            ErrorCode::E1002 => "E1002",
            ErrorCode::E1003 => "E1003",
            ErrorCode::E1004 => "E1004",
            ErrorCode::E1005 => "E1005",
            ErrorCode::E1006 => "E1006",
            ErrorCode::E1007 => "E1007",
            ErrorCode::E1008 => "E1008",
            ErrorCode::E1009 => "E1009",
            ErrorCode::E1010 => "E1010",
            ErrorCode::E1011 => "E1011",
            ErrorCode::E1012 => "E1012",
            ErrorCode::E1013 => "E1013",
            ErrorCode::E1014 => "E1014",
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E3001 => "E3001",
            ErrorCode::E3002 => "E3002",
            ErrorCode::E3003 => "E3003",
            ErrorCode::E3004 => "E3004",
            ErrorCode::E3005 => "E3005",
            ErrorCode::E3006 => "E3006",
            ErrorCode::E3007 => "E3007",
            ErrorCode::E3008 => "E3008",
            ErrorCode::E4001 => "E4001",
            ErrorCode::E4002 => "E4002",
            ErrorCode::E4003 => "E4003",
            ErrorCode::E4004 => "E4004",
            ErrorCode::E4005 => "E4005",
            ErrorCode::E4006 => "E4006",
            ErrorCode::E4007 => "E4007",
            ErrorCode::E4008 => "E4008",
            ErrorCode::E5001 => "E5001",
            ErrorCode::E5002 => "E5002",
            ErrorCode::E5003 => "E5003",
            ErrorCode::E5004 => "E5004",
            ErrorCode::E5005 => "E5005",
            ErrorCode::E5006 => "E5006",
            ErrorCode::E5007 => "E5007",
            ErrorCode::E5008 => "E5008",
            ErrorCode::E5009 => "E5009",
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E6007 => "E6007",
            ErrorCode::E6008 => "E6008",
            ErrorCode::E6009 => "E6009",
            ErrorCode::E6010 => "E6010",
            ErrorCode::E6011 => "E6011",
            ErrorCode::E6012 => "E6012",
            ErrorCode::E6013 => "E6013",
            ErrorCode::E9001 => "E9001",
            ErrorCode::E9002 => "E9002",
            ErrorCode::W1001 => "W1001",
            ErrorCode::W1002 => "W1002",
            ErrorCode::W1003 => "W1003",
            ErrorCode::W1004 => "W1004",
            ErrorCode::W1005 => "W1005",
        }
    }

    /// Short human description of the code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::E0001 => "Unterminated string literal",
            ErrorCode::E0002 => "Unterminated block comment",
            ErrorCode::E0003 => "Unexpected character in source",
            ErrorCode::E0004 => "Unterminated character literal",
            ErrorCode::E0010 => "Unexpected end of file",
            ErrorCode::E0011 => "Missing required token",
            ErrorCode::E0012 => "Unmatched closing > in a type",
            ErrorCode::E0013 => "Expected an identifier",
            ErrorCode::E0014 => "Unexpected token",
            ErrorCode::E1001 => "Unexpected token in declaration",
            ErrorCode::E1002 => "Name is empty once its prefix is removed",
            ErrorCode::E1003 => "Missing generated body marker",
            ErrorCode::E1004 => "Delegate macro name does not match its arguments",
            ErrorCode::E1005 => "Reflection macro not allowed in this scope",
            ErrorCode::E1006 => "Invalid type name prefix",
            ErrorCode::E1007 => "Duplicate type name",
            ErrorCode::E1008 => "Expected a declaration after a reflection macro",
            ErrorCode::E1009 => "Blueprint-exposed enum class must use uint8",
            ErrorCode::E1010 => "Duplicate enumerator",
            ErrorCode::E1011 => "Unsupported declaration form",
            ErrorCode::E1012 => "Missing generated include",
            ErrorCode::E1013 => "Interface without matching native interface class",
            ErrorCode::E1014 => "Malformed delegate declaration",
            ErrorCode::E2001 => "Unknown specifier",
            ErrorCode::E2002 => "Missing or malformed specifier value",
            ErrorCode::E2003 => "Specifier handler rejected a registered specifier",
            ErrorCode::E2004 => "Empty metadata list",
            ErrorCode::E2005 => "Invalid specifier value",
            ErrorCode::E2006 => "Conflicting specifiers",
            ErrorCode::E3001 => "Unknown type",
            ErrorCode::E3002 => "Unexpected * after type",
            ErrorCode::E3003 => "Unexpected token after type",
            ErrorCode::E3004 => "Invalid bitfield width",
            ErrorCode::E3005 => "Missing property name",
            ErrorCode::E3006 => "Malformed container type",
            ErrorCode::E3007 => "Reference not allowed here",
            ErrorCode::E3008 => "Object reference must be a pointer",
            ErrorCode::E4001 => "Unknown super type",
            ErrorCode::E4002 => "Additional base is not an interface",
            ErrorCode::E4003 => "Invalid within type",
            ErrorCode::E4004 => "Missing config name",
            ErrorCode::E4005 => "Inheritance cycle",
            ErrorCode::E4006 => "Inherited config requires a configured super class",
            ErrorCode::E4007 => "Missing super class",
            ErrorCode::E4008 => "Placeable requires a not-placeable super class",
            ErrorCode::E5001 => "Unknown compiler directive",
            ErrorCode::E5002 => "#else not allowed for this condition",
            ErrorCode::E5003 => "#elif mixes incompatible conditions",
            ErrorCode::E5004 => "#endif without matching #if",
            ErrorCode::E5005 => "Unterminated conditional block",
            ErrorCode::E5006 => "Include after the generated include",
            ErrorCode::E5007 => "Property inside an unsupported conditional block",
            ErrorCode::E5008 => "Function inside an unsupported conditional block",
            ErrorCode::E5009 => "Serializer inside an unsupported conditional block",
            ErrorCode::E6001 => "Array used as return value",
            ErrorCode::E6002 => "Array used as function parameter",
            ErrorCode::E6003 => "Bool static array",
            ErrorCode::E6004 => "Config on object reference",
            ErrorCode::E6005 => "Property shadows a super class property",
            ErrorCode::E6006 => "Replicated function without reliability",
            ErrorCode::E6007 => "Pure function without outputs",
            ErrorCode::E6008 => "Static function declared as event",
            ErrorCode::E6009 => "Reserved parameter name",
            ErrorCode::E6010 => "More than one edit or visibility specifier",
            ErrorCode::E6011 => "Static array of containers",
            ErrorCode::E6012 => "Delegate-only specifier on non-delegate property",
            ErrorCode::E6013 => "Read-only and read-write both specified",
            ErrorCode::E9001 => "Scope stack contract violation",
            ErrorCode::E9002 => "Class scope required",
            ErrorCode::W1001 => "Default value could not be parsed",
            ErrorCode::W1002 => "Editor guard around property",
            ErrorCode::W1003 => "Deprecated property is editable or visible",
            ErrorCode::W1004 => "ExposeOnSpawn without blueprint visibility",
            ErrorCode::W1005 => "Enum value initializer not evaluated",
        }
    }

    /// Lexical / structural errors abort the current header's parse.
    pub fn is_structural(&self) -> bool {
        self.as_str().starts_with("E0")
    }

    /// Check if this is a warning code (Wxxx range).
    pub fn is_warning(&self) -> bool {
        self.as_str().starts_with('W')
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests;
