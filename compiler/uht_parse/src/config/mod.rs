//! Per-header parse configuration.

/// Kind of module a header belongs to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
pub enum ModuleKind {
    #[default]
    Runtime,
    Editor,
    Developer,
    Program,
}

impl ModuleKind {
    /// Modules only ever built with the editor.
    pub fn is_editor(self) -> bool {
        matches!(self, ModuleKind::Editor)
    }

    pub fn from_name(name: &str) -> Option<ModuleKind> {
        let kind = match name.to_ascii_lowercase().as_str() {
            "runtime" => ModuleKind::Runtime,
            "editor" => ModuleKind::Editor,
            "developer" => ModuleKind::Developer,
            "program" => ModuleKind::Program,
            _ => return None,
        };
        Some(kind)
    }
}

/// Settings shared by every header in a run.
#[derive(Clone, Debug)]
pub struct ParseConfig {
    /// `WITH_EDITOR` is enabled.
    pub editor: bool,
    pub module_kind: ModuleKind,
}

impl Default for ParseConfig {
    fn default() -> Self {
        ParseConfig {
            editor: true,
            module_kind: ModuleKind::Runtime,
        }
    }
}
