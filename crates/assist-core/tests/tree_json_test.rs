use assist_core::ir::*;
use assist_core::{ProgramTree, TreeBuilder, render_tree};
use assist_error::ErrorKind;
use pretty_assertions::assert_eq;

/// `class Foo { int x }`
fn class_tree() -> ProgramTree {
    let mut b = TreeBuilder::new();
    let int = b.push(
        Span::new(12, 15),
        Node::TypeRef(TypeRefNode {
            name: "int".into(),
            ..Default::default()
        }),
    );
    let field = b.push(
        Span::new(12, 17),
        Node::Field(FieldNode {
            name: "x".into(),
            name_end: 16,
            type_ref: Some(int),
            ..Default::default()
        }),
    );
    let class = b.push(
        Span::new(0, 19),
        Node::Class(ClassNode {
            name: "Foo".into(),
            fields: vec![field],
            ..Default::default()
        }),
    );
    b.link_members(class);
    let module = b.push(
        Span::new(0, 19),
        Node::Module(ModuleNode {
            classes: vec![class],
            ..Default::default()
        }),
    );
    b.finish(module).unwrap()
}

#[test]
fn test_tree_survives_json() {
    let tree = class_tree();
    let json = tree.to_json().unwrap();
    let loaded = ProgramTree::from_json(&json).unwrap();
    assert_eq!(loaded, tree);
    assert_eq!(render_tree(&loaded), render_tree(&tree));
}

#[test]
fn test_json_uses_kind_tags() {
    let json = class_tree().to_json().unwrap();
    assert!(json.contains(r#""kind": "field""#), "{json}");
    assert!(json.contains(r#""kind": "module""#), "{json}");
}

#[test]
fn test_malformed_json_is_rejected() {
    let err = ProgramTree::from_json("{ \"root\": 0 ").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
    assert_eq!(err.operation(), "tree::from_json");
}

#[test]
fn test_escaping_child_is_rejected_on_load() {
    let mut b = TreeBuilder::new();
    let class = b.push(
        Span::new(0, 40),
        Node::Class(ClassNode {
            name: "Big".into(),
            ..Default::default()
        }),
    );
    let module = b.push(
        Span::new(0, 19),
        Node::Module(ModuleNode {
            classes: vec![class],
            ..Default::default()
        }),
    );
    let json = b.finish_unchecked(module).to_json().unwrap();

    let err = ProgramTree::from_json(&json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::RangeViolation);
    assert_eq!(err.operation(), "tree::from_json");
    assert_eq!(err.context_value("called"), Some("tree::validate"));
}

#[test]
fn test_rewrite_cycle_is_rejected_on_load() {
    let mut b = TreeBuilder::new();
    let foo = b.push(
        Span::new(0, 3),
        Node::Variable(VariableExpr {
            name: "foo".into(),
            ..Default::default()
        }),
    );
    b.set_original(foo, foo);
    let module = b.push(Span::new(0, 3), Node::Module(ModuleNode::default()));
    let json = b.finish_unchecked(module).to_json().unwrap();

    let err = ProgramTree::from_json(&json).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::CyclicNodeRef);
    assert_eq!(err.context_value("called"), Some("tree::validate"));
}
