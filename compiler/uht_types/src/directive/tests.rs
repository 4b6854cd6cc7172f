use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_classify_recognized_symbols() {
    assert_eq!(CompilerDirective::classify(&["0"]), CompilerDirective::ZERO);
    assert_eq!(
        CompilerDirective::classify(&["!", "WITH_EDITOR"]),
        CompilerDirective::NOT_WITH_EDITOR
    );
    assert_eq!(
        CompilerDirective::classify(&["WITH_EDITORONLY_DATA"]),
        CompilerDirective::WITH_EDITOR_ONLY_DATA
    );
}

#[test]
fn test_compound_conditions_are_unrecognized() {
    assert_eq!(
        CompilerDirective::classify(&["WITH_EDITOR", "&&", "FOO"]),
        CompilerDirective::UNRECOGNIZED
    );
    assert_eq!(
        CompilerDirective::classify(&["defined", "(", "CPP", ")"]),
        CompilerDirective::UNRECOGNIZED
    );
}

#[test]
fn test_liveness_depends_on_editor_mode() {
    let editor = CompilerDirective::WITH_EDITOR;
    assert!(editor.is_live(true));
    assert!(!editor.is_live(false));
    assert!(!CompilerDirective::NOT_WITH_EDITOR.is_live(true));
    assert!(CompilerDirective::WITH_EDITOR_ONLY_DATA.is_live(false));
    assert!(!(CompilerDirective::ONE | CompilerDirective::ZERO).is_live(true));
    assert!(CompilerDirective::empty().is_live(false));
}

#[test]
fn test_else_flips_paired_conditions() {
    assert_eq!(
        CompilerDirective::ZERO.flip_for_else(),
        Some(CompilerDirective::ONE)
    );
    assert_eq!(
        CompilerDirective::WITH_EDITOR.flip_for_else(),
        Some(CompilerDirective::NOT_WITH_EDITOR)
    );
    assert_eq!(
        CompilerDirective::UNRECOGNIZED.flip_for_else(),
        Some(CompilerDirective::UNRECOGNIZED)
    );
    assert_eq!(CompilerDirective::WITH_EDITOR_ONLY_DATA.flip_for_else(), None);
    assert_eq!(CompilerDirective::WITH_ENGINE.flip_for_else(), None);
}

#[test]
fn test_elif_family() {
    assert!(CompilerDirective::ZERO.supports_elif());
    assert!(CompilerDirective::UNRECOGNIZED.supports_elif());
    assert!(!CompilerDirective::WITH_EDITOR.supports_elif());
    assert!(!CompilerDirective::empty().supports_elif());
}

#[test]
fn test_comment_retention() {
    assert!(CompilerDirective::WITH_EDITOR_ONLY_DATA.keeps_comments());
    assert!(CompilerDirective::WITH_EDITOR.keeps_comments());
    assert!(!CompilerDirective::ZERO.keeps_comments());
}
