use super::*;
use pretty_assertions::assert_eq;
use uht_ir::TokenKind;

#[test]
fn test_builder_sets_fields() {
    let diag = Diagnostic::error(ErrorCode::E2001)
        .with_message("Unknown variable specifier 'EditAnywher'")
        .with_line(12)
        .with_context("Variable specifiers");
    assert!(diag.is_error());
    assert_eq!(diag.line, 12);
    assert_eq!(diag.context.as_deref(), Some("Variable specifiers"));
}

#[test]
fn test_at_token_copies_position() {
    let token = Token::new(TokenKind::Identifier, "Foo", Span::new(30, 33), 4);
    let diag = Diagnostic::warning(ErrorCode::W1001).at(&token);
    assert!(diag.is_warning());
    assert_eq!(diag.line, 4);
    assert_eq!(diag.span, Span::new(30, 33));
}

#[test]
fn test_display_format() {
    let diag = Diagnostic::error(ErrorCode::E1003)
        .with_message("Expected a GENERATED_BODY() at the start of the class")
        .with_file("Widget.h")
        .with_line(7)
        .with_context("class 'UWidget'")
        .with_note("add GENERATED_BODY() as the first statement");
    assert_eq!(
        diag.to_string(),
        "Widget.h(7): error[E1003]: Expected a GENERATED_BODY() at the start of the class \
         (while parsing class 'UWidget')\n  = note: add GENERATED_BODY() as the first statement"
    );
}

#[test]
fn test_severity_order() {
    assert!(Severity::Error > Severity::Warning);
}
