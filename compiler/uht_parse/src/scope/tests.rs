use super::*;
use pretty_assertions::assert_eq;
use uht_ir::Span;
use uht_types::{ClassDecl, ClassType, HeaderId, Node, NodeKind};

fn comment(text: &str) -> Comment {
    Comment {
        text: text.to_owned(),
        line: 1,
        end_line: 1,
        span: Span::DUMMY,
    }
}

#[test]
fn test_pop_must_be_top() {
    let mut stack = ScopeStack::new();
    let outer = stack.push(Scope::new(ScopeKind::Global, NodeId::ROOT, &[]));
    let inner = stack.push(Scope::new(ScopeKind::Class, NodeId(1), &[]));
    let err = stack.pop(outer).unwrap_err();
    assert_eq!(err.code, ErrorCode::E9001);
    assert_eq!(stack.top().map(|s| s.kind), Some(ScopeKind::Class));
    stack.pop(inner).unwrap();
    assert_eq!(stack.top().map(|s| s.kind), Some(ScopeKind::Global));
}

#[test]
fn test_current_class() {
    let mut stack = ScopeStack::new();
    let _global = stack.push(Scope::new(ScopeKind::Global, NodeId::ROOT, &[]));
    assert_eq!(stack.current_class().unwrap_err().code, ErrorCode::E9002);
    let _class = stack.push(Scope::new(ScopeKind::Class, NodeId(1), &[]));
    let _function = stack.push(Scope::new(ScopeKind::Function, NodeId(2), &[]));
    assert_eq!(stack.current_class().unwrap(), NodeId(1));
}

#[test]
fn test_default_access() {
    assert_eq!(
        Scope::new(ScopeKind::Class, NodeId(1), &[]).access,
        AccessSpecifier::Private
    );
    assert_eq!(
        Scope::new(ScopeKind::Struct, NodeId(1), &[]).access,
        AccessSpecifier::Public
    );
}

#[test]
fn test_context_uses_innermost_declaration() {
    let mut header = HeaderFile::new(HeaderId(0), "Widget.h", "");
    let class = header.add_node(
        NodeId::ROOT,
        Node::new("UWidget", "Widget", 1, NodeKind::Class(ClassDecl::new(ClassType::Class))),
    );
    let mut stack = ScopeStack::new();
    let _global = stack.push(Scope::new(ScopeKind::Global, NodeId::ROOT, &[]));
    assert_eq!(stack.context(&header), "header 'Widget'");
    let _class = stack.push(Scope::new(ScopeKind::Class, class, &[]));
    assert_eq!(stack.context(&header), "class 'UWidget'");
}

#[test]
fn test_capture_tooltip_once() {
    let mut meta = MetaData::new();
    assert!(capture_tooltip(&[comment("/** First */")], &mut meta));
    assert_eq!(meta.get("ToolTip"), Some("First"));
    assert_eq!(meta.get("Comment"), Some("/** First */"));

    assert!(!capture_tooltip(&[comment("/** Second */")], &mut meta));
    assert_eq!(meta.get("ToolTip"), Some("First"));
}

#[test]
fn test_capture_tooltip_skips_empty_text() {
    let mut meta = MetaData::new();
    assert!(capture_tooltip(&[comment("// ------")], &mut meta));
    assert!(meta.is_empty());
}
