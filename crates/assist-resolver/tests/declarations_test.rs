mod common;

use assist_core::ir::*;
use assist_core::{NodeId, ProgramTree};
use assist_resolver::{CompletionRequest, LocationKind};
use assist_simple::SnippetTree;
use pretty_assertions::assert_eq;

use common::{context, location_at};

fn class_module(t: SnippetTree, class: NodeId) -> ProgramTree {
    t.module(ModuleNode {
        classes: vec![class],
        ..Default::default()
    })
    .unwrap()
}

#[test]
fn test_field_type_and_name() {
    let mut t = SnippetTree::new("class A { String s }");
    let string = t.type_ref(t.span("String"));
    let span = t.span_between("String", "s");
    let field = t.push(
        span,
        Node::Field(FieldNode {
            name: "s".into(),
            name_end: span.end - 1,
            type_ref: Some(string),
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            fields: vec![field],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(13));
    assert_eq!(ctx.location(), LocationKind::ClassBody);
    assert_eq!(ctx.completion_node(), None);
    assert_eq!(ctx.containing_code_block(), Some(class));
    assert_eq!(ctx.containing_declaration(), Some(field));
    assert_eq!(ctx.enclosing_type(), Some(class));

    let ctx = context(&tree, &CompletionRequest::at(18));
    assert_eq!(ctx.location(), LocationKind::ClassBody);
    assert_eq!(ctx.completion_node(), Some(field));
    assert_eq!(ctx.containing_declaration(), Some(class));

    let ctx = context(&tree, &CompletionRequest::at(19));
    assert_eq!(ctx.completion_node(), None);
    assert_eq!(ctx.containing_declaration(), Some(class));
}

struct MethodClass {
    tree: ProgramTree,
    class: NodeId,
    method: NodeId,
    parameter: NodeId,
    body: NodeId,
}

/// `class A { def m(String s) { } }`
fn method_class() -> MethodClass {
    let mut t = SnippetTree::new("class A { def m(String s) { } }");
    let string = t.type_ref(t.span("String"));
    let param_span = t.span_between("String", "s");
    let parameter = t.push(
        param_span,
        Node::Parameter(ParameterNode {
            name: "s".into(),
            name_span: Span::new(param_span.end - 1, param_span.end),
            type_ref: Some(string),
            ..Default::default()
        }),
    );
    let body = t.block(t.span("{ }"), vec![]);
    let object = t.object_type();
    let method = t.push(
        t.span_between("def", "}"),
        Node::Method(MethodNode {
            name: "m".into(),
            name_end: t.span("m(").start,
            rparen: Some(t.span(")").start),
            return_type: Some(object),
            parameters: vec![parameter],
            body: Some(body),
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            methods: vec![method],
            ..Default::default()
        },
    );
    MethodClass {
        tree: class_module(t, class),
        class,
        method,
        parameter,
        body,
    }
}

#[test]
fn test_parameter_type() {
    let m = method_class();
    let ctx = context(&m.tree, &CompletionRequest::at(18));
    assert_eq!(ctx.location(), LocationKind::Parameter);
    assert_eq!(ctx.completion_node(), Some(m.parameter));
    assert_eq!(ctx.containing_code_block(), Some(m.method));
    assert_eq!(ctx.containing_declaration(), Some(m.method));
    assert_eq!(ctx.enclosing_type(), Some(m.class));
}

#[test]
fn test_parameter_name() {
    let m = method_class();
    let ctx = context(&m.tree, &CompletionRequest::at(24));
    assert_eq!(ctx.location(), LocationKind::Parameter);
    assert_eq!(ctx.completion_node(), Some(m.parameter));
}

#[test]
fn test_empty_parameter_slot() {
    let m = method_class();
    let ctx = context(&m.tree, &CompletionRequest::at(16));
    assert_eq!(ctx.location(), LocationKind::Parameter);
    assert_eq!(ctx.completion_node(), None);
    assert_eq!(ctx.containing_code_block(), Some(m.method));
}

#[test]
fn test_method_body() {
    let m = method_class();
    let ctx = context(&m.tree, &CompletionRequest::at(27));
    assert_eq!(ctx.location(), LocationKind::Statement);
    assert_eq!(ctx.completion_node(), Some(m.body));
    assert_eq!(ctx.containing_code_block(), Some(m.body));
    assert_eq!(ctx.containing_declaration(), Some(m.method));
}

/// `try { } catch (<type> e) { }` with the given source and catch type.
fn try_catch(source: &str, exception: Option<&str>) -> (ProgramTree, NodeId, NodeId) {
    let mut t = SnippetTree::new(source);
    let try_body = t.block(t.span("{ }"), vec![]);
    let type_ref = exception.map(|name| t.type_ref(t.span(name)));
    let name_span = {
        let at = t.snippet().find("e)");
        Span::new(at, at + 1)
    };
    let param_span = match exception {
        Some(name) => Span::new(t.span(name).start, name_span.end),
        None => name_span,
    };
    let parameter = t.push(
        param_span,
        Node::Parameter(ParameterNode {
            name: "e".into(),
            name_span,
            type_ref,
            ..Default::default()
        }),
    );
    let catch_body = t.block(t.span_nth("{ }", 1), vec![]);
    let catch = t.push(
        t.span_between("catch", "{ }"),
        Node::Catch(CatchStmt {
            parameter,
            body: catch_body,
        }),
    );
    let try_stmt = t.push(
        t.snippet().full(),
        Node::Try(TryStmt {
            body: try_body,
            catches: vec![catch],
            ..Default::default()
        }),
    );
    let tree = t.script(vec![try_stmt]).unwrap();
    (tree, parameter, catch)
}

#[test]
fn test_untyped_catch_parameter_wants_exception_type() {
    let (tree, parameter, catch) = try_catch("try { } catch (e) { }", None);
    let ctx = context(&tree, &CompletionRequest::at(16));
    assert_eq!(ctx.location(), LocationKind::Exceptions);
    assert_eq!(ctx.completion_node(), Some(parameter));
    assert_eq!(ctx.containing_code_block(), Some(catch));
}

#[test]
fn test_typed_catch_parameter() {
    let source = "try { } catch (IOException e) { }";
    let (tree, parameter, _) = try_catch(source, Some("IOException"));

    let ctx = context(&tree, &CompletionRequest::at(18));
    assert_eq!(ctx.location(), LocationKind::Exceptions);
    assert_eq!(ctx.completion_node(), Some(parameter));

    assert_eq!(location_at(&tree, 28), Some(LocationKind::Parameter));
}

#[test]
fn test_class_type_parameter() {
    let mut t = SnippetTree::new("class A<T> { }");
    let placeholder = t.type_ref(t.span("T"));
    let generics = t.push(
        t.span("T"),
        Node::GenericsType(GenericsTypeNode {
            type_ref: Some(placeholder),
            is_placeholder: true,
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            generics: vec![generics],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(9));
    assert_eq!(ctx.location(), LocationKind::Generics);
    assert_eq!(ctx.completion_node(), Some(generics));
    assert_eq!(ctx.containing_code_block(), Some(class));
}

#[test]
fn test_extends_clause() {
    let mut t = SnippetTree::new("class A extends B { }");
    let super_class = t.type_ref(t.span("B"));
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            super_class: Some(super_class),
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(17));
    assert_eq!(ctx.location(), LocationKind::Extends);
    assert_eq!(ctx.completion_node(), None);
    assert_eq!(ctx.containing_code_block(), Some(class));
}

#[test]
fn test_annotation_name_and_body() {
    let mut t = SnippetTree::new("@Deprecated class A { }");
    let class_ref = t.type_ref(t.span("Deprecated"));
    let annotation = t.push(
        t.span("@Deprecated"),
        Node::Annotation(AnnotationNode {
            class_ref,
            members: vec![],
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            annotations: vec![annotation],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(5));
    assert_eq!(ctx.location(), LocationKind::Annotation);
    assert_eq!(ctx.completion_node(), Some(class_ref));
    assert_eq!(ctx.containing_code_block(), Some(annotation));
    assert_eq!(ctx.containing_declaration(), Some(class));

    let mut t = SnippetTree::new("@Foo() class A { }");
    let class_ref = t.type_ref(t.span("Foo"));
    let annotation = t.push(
        t.span("@Foo()"),
        Node::Annotation(AnnotationNode {
            class_ref,
            members: vec![],
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            annotations: vec![annotation],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(5));
    assert_eq!(ctx.location(), LocationKind::AnnotationBody);
    assert_eq!(ctx.completion_node(), Some(annotation));
}

#[test]
fn test_package() {
    let mut t = SnippetTree::new("package a.b");
    let package = t.push(
        t.snippet().full(),
        Node::Package(PackageNode {
            name: "a.b".into(),
            annotations: vec![],
        }),
    );
    let tree = t
        .module(ModuleNode {
            package: Some(package),
            ..Default::default()
        })
        .unwrap();

    let ctx = context(&tree, &CompletionRequest::at(9));
    assert_eq!(ctx.location(), LocationKind::Package);
    assert_eq!(ctx.containing_declaration(), Some(package));
    assert!(ctx.location().is_type_position());
}

#[test]
fn test_implements_clause() {
    let mut t = SnippetTree::new("class A implements B, C { }");
    let b = t.type_ref(t.span("B"));
    let c = t.type_ref(t.span("C"));
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            interfaces: vec![b, c],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    for offset in [20, 23] {
        let ctx = context(&tree, &CompletionRequest::at(offset));
        assert_eq!(ctx.location(), LocationKind::Implements, "offset {offset}");
        assert_eq!(ctx.completion_node(), None);
        assert_eq!(ctx.containing_code_block(), Some(class));
        assert_eq!(ctx.containing_declaration(), Some(class));
    }
}

#[test]
fn test_method_return_type_and_throws_clause() {
    let mut t = SnippetTree::new("class A { void m() throws IOException { } }");
    let void = t.type_ref(t.span("void"));
    let exception = t.type_ref(t.span("IOException"));
    let body = t.block(t.span("{ }"), vec![]);
    let method = t.push(
        t.span_between("void", "}"),
        Node::Method(MethodNode {
            name: "m".into(),
            name_end: t.span("m(").start,
            rparen: Some(t.span(")").start),
            return_type: Some(void),
            exceptions: vec![exception],
            body: Some(body),
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            methods: vec![method],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(30));
    assert_eq!(ctx.location(), LocationKind::Exceptions);
    assert_eq!(ctx.completion_node(), None);
    assert_eq!(ctx.containing_code_block(), Some(method));
    assert_eq!(ctx.containing_declaration(), Some(method));

    let ctx = context(&tree, &CompletionRequest::at(12));
    assert_eq!(ctx.location(), LocationKind::ClassBody);
    assert_eq!(ctx.containing_code_block(), Some(class));
    assert_eq!(ctx.containing_declaration(), Some(method));
}

#[test]
fn test_enum_constant_initializer() {
    let mut t = SnippetTree::new("enum E { A(1) }");
    let one = t.number(t.span("1"));
    let field = t.push(
        t.span("A(1)"),
        Node::Field(FieldNode {
            name: "A".into(),
            name_end: t.span("A").start,
            flags: FieldFlags {
                is_static: true,
                is_enum_constant: true,
                ..Default::default()
            },
            ..Default::default()
        }),
    );
    // `A = ...` inside the synthesized static initializer
    let target = t.push_synthetic(Node::FieldAccess(FieldAccessExpr {
        name: "A".into(),
        field: Some(field),
    }));
    let assign = t.push_synthetic(Node::Binary(BinaryExpr {
        op: BinaryOp::Assign,
        left: target,
        right: one,
    }));
    let stmt = t.push_synthetic(Node::ExpressionStmt(ExpressionStmt { expression: assign }));
    let init_body = t.push_synthetic(Node::Block(BlockStmt {
        statements: vec![stmt],
    }));
    let static_init = t.push_synthetic(Node::Method(MethodNode {
        name: "<clinit>".into(),
        flags: MethodFlags {
            is_static: true,
            static_init: true,
            ..Default::default()
        },
        body: Some(init_body),
        ..Default::default()
    }));
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "E".into(),
            flags: ClassFlags {
                is_enum: true,
                ..Default::default()
            },
            fields: vec![field],
            static_init: Some(static_init),
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(12));
    assert_eq!(ctx.location(), LocationKind::Statement);
    assert_eq!(ctx.completion_node(), Some(one));
    assert_eq!(ctx.containing_code_block(), Some(field));
    assert_eq!(ctx.containing_declaration(), Some(field));
    assert_eq!(ctx.enclosing_type(), Some(class));
}

#[test]
fn test_lazy_field_accessor_body() {
    let mut t = SnippetTree::new("class A { def x = foo }");
    let foo = t.variable(t.span("foo"));
    let stmt = t.stmt(foo);
    let body = t.push_synthetic(Node::Block(BlockStmt {
        statements: vec![stmt],
    }));
    let accessor = t.push_synthetic(Node::Method(MethodNode {
        name: "getX".into(),
        flags: MethodFlags {
            is_synthetic: true,
            ..Default::default()
        },
        body: Some(body),
        ..Default::default()
    }));
    let object = t.object_type();
    let field = t.push(
        t.span_between("def", "foo"),
        Node::Field(FieldNode {
            name: "x".into(),
            name_end: t.span("x").start,
            type_ref: Some(object),
            lazy_accessor: Some(accessor),
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            fields: vec![field],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(21));
    assert_eq!(ctx.location(), LocationKind::Statement);
    assert_eq!(ctx.completion_node(), Some(foo));
    assert_eq!(ctx.containing_code_block(), Some(body));
    assert_eq!(ctx.containing_declaration(), Some(accessor));
}

#[test]
fn test_trait_method_body() {
    let mut t = SnippetTree::new("class A { def t() { foo } }");
    let foo = t.variable(t.span("foo"));
    let stmt = t.stmt(foo);
    let body = t.block(t.span("{ foo }"), vec![stmt]);
    let method = t.push(
        t.span_between("def", "}"),
        Node::Method(MethodNode {
            name: "t".into(),
            name_end: t.span("t(").start,
            rparen: Some(t.span(")").start),
            body: Some(body),
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "A".into(),
            trait_methods: vec![method],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(23));
    assert_eq!(ctx.location(), LocationKind::Statement);
    assert_eq!(ctx.completion_node(), Some(foo));
    assert_eq!(ctx.containing_code_block(), Some(body));
    assert_eq!(ctx.containing_declaration(), Some(method));
    assert_eq!(ctx.enclosing_type(), Some(class));
}

#[test]
fn test_annotation_default_is_assigned_to_its_member() {
    let mut t = SnippetTree::new("@interface X { long v() default 1 }");
    let long = t.type_ref(t.span("long"));
    let one = t.number(t.span("1"));
    let body = t.stmt(one);
    let method = t.push(
        t.span_between("long", "1"),
        Node::Method(MethodNode {
            name: "v".into(),
            name_end: t.span("v(").start,
            rparen: Some(t.span(")").start),
            flags: MethodFlags {
                is_abstract: true,
                annotation_default: true,
                ..Default::default()
            },
            return_type: Some(long),
            body: Some(body),
            ..Default::default()
        }),
    );
    let class = t.class(
        t.snippet().full(),
        ClassNode {
            name: "X".into(),
            flags: ClassFlags {
                is_interface: true,
                is_annotation_type: true,
                ..Default::default()
            },
            methods: vec![method],
            ..Default::default()
        },
    );
    let tree = class_module(t, class);

    let ctx = context(&tree, &CompletionRequest::at(33));
    assert_eq!(ctx.location(), LocationKind::Statement);
    assert_eq!(ctx.completion_node(), Some(one));
    assert_eq!(ctx.lhs_node(), Some(method));
    assert_eq!(ctx.containing_declaration(), Some(method));
}
