use super::*;
use crate::{ClassDecl, ClassType, PropertyDecl, PropertyCategory, PropertyType};
use pretty_assertions::assert_eq;
use uht_diagnostic::ErrorCode;

fn class_node(name: &str) -> Node {
    Node::new(name, &name[1..], 1, NodeKind::Class(ClassDecl::new(ClassType::Class)))
}

#[test]
fn test_file_name_is_stem() {
    let header = HeaderFile::new(HeaderId(2), "Source/Game/Widget.h", "");
    assert_eq!(header.file_name, "Widget");
    assert_eq!(header.generated_include_name(), "Widget.generated.h");

    let windows = HeaderFile::new(HeaderId(3), r"Source\Game\Door.h", "");
    assert_eq!(windows.file_name, "Door");
}

#[test]
fn test_add_node_links_outer_and_children() {
    let mut header = HeaderFile::new(HeaderId(0), "Widget.h", "");
    assert!(header.is_empty());
    let class = header.add_node(header.root(), class_node("UWidget"));
    let prop = header.add_node(
        class,
        Node::new(
            "Count",
            "Count",
            5,
            NodeKind::Property(PropertyDecl::new(PropertyCategory::Member, PropertyType::Float)),
        ),
    );

    assert_eq!(header.top_level(), &[class]);
    assert_eq!(header.node(prop).outer, Some(class));
    assert_eq!(header.find_child(class, "Count"), Some(prop));
    assert_eq!(header.owning_type(prop), Some(class));
    assert_eq!(header.owning_type(class), None);
    assert_eq!(header.type_ref(class), TypeRef::new(HeaderId(0), NodeId(1)));
    assert_eq!(header.node_ids().count(), 3);
}

#[test]
fn test_push_diagnostic_fills_file() {
    let mut header = HeaderFile::new(HeaderId(0), "Widget.h", "");
    header.push_diagnostic(Diagnostic::error(ErrorCode::E1001).with_line(4));
    header.push_diagnostic(
        Diagnostic::warning(ErrorCode::W1001).with_file("Other.h"),
    );
    assert_eq!(header.diagnostics[0].file.as_deref(), Some("Widget.h"));
    assert_eq!(header.diagnostics[1].file.as_deref(), Some("Other.h"));
}

#[test]
fn test_type_ref_debug() {
    assert_eq!(format!("{:?}", TypeRef::new(HeaderId(1), NodeId(7))), "#1:7");
}
