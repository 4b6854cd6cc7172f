//! Compiler-directive classification.
//!
//! Each `#if` condition is classified into one member of a small closed set.
//! A directive frame stores its own classification and the composite of
//! every enclosing frame is the union of those bits.

use bitflags::bitflags;

bitflags! {
    /// Classification of a conditional-compilation block.
    ///
    /// A single frame holds exactly one bit. A composite (the state at a
    /// given token) is the union of all open frames; empty means the token
    /// is not inside any conditional block.
    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
    pub struct CompilerDirective: u16 {
        /// `#if 0`
        const ZERO = 1 << 0;
        /// `#if 1`
        const ONE = 1 << 1;
        /// `#if CPP`
        const CPP = 1 << 2;
        /// `#if !CPP`
        const NOT_CPP = 1 << 3;
        /// `#if WITH_EDITOR`
        const WITH_EDITOR = 1 << 4;
        /// `#if !WITH_EDITOR`
        const NOT_WITH_EDITOR = 1 << 5;
        /// `#if WITH_EDITORONLY_DATA`
        const WITH_EDITOR_ONLY_DATA = 1 << 6;
        /// `#if WITH_HOT_RELOAD`
        const WITH_HOT_RELOAD = 1 << 7;
        /// `#if WITH_ENGINE`
        const WITH_ENGINE = 1 << 8;
        /// `#if WITH_COREUOBJECT`
        const WITH_CORE_UOBJECT = 1 << 9;
        /// Any condition not in the recognized set.
        const UNRECOGNIZED = 1 << 10;

        /// Classifications that may be followed by `#elif`.
        const ELIF_FAMILY = Self::ZERO.bits() | Self::ONE.bits() | Self::UNRECOGNIZED.bits();
        /// Blocks whose leading doc comments still belong to the next
        /// declaration.
        const KEEPS_COMMENTS = Self::WITH_EDITOR.bits() | Self::WITH_EDITOR_ONLY_DATA.bits();
        /// Blocks a reflected property may not be declared in.
        const DISALLOWED_FOR_PROPERTIES = Self::UNRECOGNIZED.bits() | Self::WITH_HOT_RELOAD.bits();
        /// Blocks a reflected function may not be declared in.
        const DISALLOWED_FOR_FUNCTIONS =
            Self::UNRECOGNIZED.bits() | Self::WITH_EDITOR_ONLY_DATA.bits();
        /// Blocks a serializer may be declared in.
        const ALLOWED_FOR_SERIALIZERS = Self::WITH_EDITOR_ONLY_DATA.bits();
    }
}

impl CompilerDirective {
    /// Classify the tokens of an `#if` / `#elif` condition.
    pub fn classify(condition: &[&str]) -> CompilerDirective {
        match condition {
            ["0"] => CompilerDirective::ZERO,
            ["1"] => CompilerDirective::ONE,
            ["CPP"] => CompilerDirective::CPP,
            ["!", "CPP"] => CompilerDirective::NOT_CPP,
            ["WITH_EDITOR"] => CompilerDirective::WITH_EDITOR,
            ["!", "WITH_EDITOR"] => CompilerDirective::NOT_WITH_EDITOR,
            ["WITH_EDITORONLY_DATA"] => CompilerDirective::WITH_EDITOR_ONLY_DATA,
            ["WITH_HOT_RELOAD"] => CompilerDirective::WITH_HOT_RELOAD,
            ["WITH_ENGINE"] => CompilerDirective::WITH_ENGINE,
            ["WITH_COREUOBJECT"] => CompilerDirective::WITH_CORE_UOBJECT,
            _ => CompilerDirective::UNRECOGNIZED,
        }
    }

    /// Whether tokens under this composite reach the parser.
    pub fn is_live(self, editor: bool) -> bool {
        if self.intersects(CompilerDirective::ZERO | CompilerDirective::NOT_CPP) {
            return false;
        }
        if self.contains(CompilerDirective::WITH_EDITOR) && !editor {
            return false;
        }
        !(self.contains(CompilerDirective::NOT_WITH_EDITOR) && editor)
    }

    /// Classification of the `#else` branch, or `None` when the condition is
    /// one-sided and has no meaningful opposite.
    pub fn flip_for_else(self) -> Option<CompilerDirective> {
        let flipped = match self {
            CompilerDirective::ZERO => CompilerDirective::ONE,
            CompilerDirective::ONE => CompilerDirective::ZERO,
            CompilerDirective::CPP => CompilerDirective::NOT_CPP,
            CompilerDirective::NOT_CPP => CompilerDirective::CPP,
            CompilerDirective::WITH_EDITOR => CompilerDirective::NOT_WITH_EDITOR,
            CompilerDirective::NOT_WITH_EDITOR => CompilerDirective::WITH_EDITOR,
            CompilerDirective::UNRECOGNIZED => CompilerDirective::UNRECOGNIZED,
            _ => return None,
        };
        Some(flipped)
    }

    /// Whether this single classification may be followed by `#elif`.
    pub fn supports_elif(self) -> bool {
        !self.is_empty() && CompilerDirective::ELIF_FAMILY.contains(self)
    }

    /// Whether entering or leaving this block keeps pending doc comments.
    pub fn keeps_comments(self) -> bool {
        !self.is_empty() && CompilerDirective::KEEPS_COMMENTS.contains(self)
    }

    /// Source spelling of a single classification.
    pub fn condition_text(self) -> &'static str {
        match self {
            CompilerDirective::ZERO => "0",
            CompilerDirective::ONE => "1",
            CompilerDirective::CPP => "CPP",
            CompilerDirective::NOT_CPP => "!CPP",
            CompilerDirective::WITH_EDITOR => "WITH_EDITOR",
            CompilerDirective::NOT_WITH_EDITOR => "!WITH_EDITOR",
            CompilerDirective::WITH_EDITOR_ONLY_DATA => "WITH_EDITORONLY_DATA",
            CompilerDirective::WITH_HOT_RELOAD => "WITH_HOT_RELOAD",
            CompilerDirective::WITH_ENGINE => "WITH_ENGINE",
            CompilerDirective::WITH_CORE_UOBJECT => "WITH_COREUOBJECT",
            _ => "<unrecognized>",
        }
    }
}

#[cfg(test)]
mod tests;
