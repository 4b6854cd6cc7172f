use super::*;
use pretty_assertions::assert_eq;

#[test]
fn test_error_code_display() {
    assert_eq!(ErrorCode::E1001.to_string(), "E1001");
    assert_eq!(ErrorCode::E5003.as_str(), "E5003");
}

#[test]
fn test_error_code_ranges() {
    assert!(ErrorCode::E0012.is_structural());
    assert!(!ErrorCode::E1003.is_structural());
    assert!(ErrorCode::W1002.is_warning());
    assert!(!ErrorCode::E6001.is_warning());
}

#[test]
fn test_description_has_no_markup() {
    assert_eq!(ErrorCode::E0012.description(), "Unmatched closing > in a type");
}
