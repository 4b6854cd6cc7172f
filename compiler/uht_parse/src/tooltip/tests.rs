use super::*;
use pretty_assertions::assert_eq;
use proptest::prelude::*;

#[test]
fn test_single_line_comment() {
    assert_eq!(normalize_tooltip(&["// Number of widgets."]), "Number of widgets.");
    assert_eq!(normalize_tooltip(&["/** Inline doc */"]), "Inline doc");
}

#[test]
fn test_doc_block_strips_stars() {
    let comment = "/**\n * The widget.\n *\n * Second paragraph.\n */";
    assert_eq!(normalize_tooltip(&[comment]), "The widget.\n\nSecond paragraph.");
}

#[test]
fn test_multiple_line_comments_join() {
    let tooltip = normalize_tooltip(&["// First line", "//   indented", "// last"]);
    assert_eq!(tooltip, "First line\n  indented\nlast");
}

#[test]
fn test_separator_lines_dropped() {
    let tooltip = normalize_tooltip(&["// ----------", "// Body", "// =========="]);
    assert_eq!(tooltip, "Body");
}

#[test]
fn test_ignored_regions() {
    let comment = "/** Visible @ignore hidden text @endignore tail (cpptext) */";
    assert_eq!(normalize_tooltip(&[comment]), "Visible  tail");
}

#[test]
fn test_tabs_expand_and_carriage_returns_vanish() {
    let comment = "/*\r\n\tKey:\tValue\r\n*/";
    assert_eq!(normalize_tooltip(&[comment]), "Key:    Value");
}

#[test]
fn test_continuation_tab_tolerated() {
    let comment = "/* First\n\tcontinued */";
    assert_eq!(normalize_tooltip(&[comment]), "First\ncontinued");
}

#[test]
fn test_empty_comment() {
    assert_eq!(normalize_tooltip(&["/** */"]), "");
    assert_eq!(normalize_tooltip(&["//"]), "");
}

proptest! {
    #[test]
    fn prop_lines_are_trimmed_and_tab_free(bodies in proptest::collection::vec("[ -~\t]{0,40}", 1..6)) {
        let comments: Vec<String> = bodies.iter().map(|b| format!("//{b}")).collect();
        let refs: Vec<&str> = comments.iter().map(String::as_str).collect();
        let tooltip = normalize_tooltip(&refs);
        prop_assert!(!tooltip.contains('\t'));
        for line in tooltip.lines() {
            prop_assert_eq!(line, line.trim_end());
        }
        prop_assert!(tooltip.is_empty() || !tooltip.lines().next().unwrap_or("").trim().is_empty());
    }
}
