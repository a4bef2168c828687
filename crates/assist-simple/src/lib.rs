//! Tree building helpers for tests.
//!
//! Trees normally come from a parser outside this workspace. Tests instead write
//! the source they have in mind as a [`Snippet`] and assemble the tree by hand
//! with [`SnippetTree`], looking spans up by substring so every offset matches
//! the text exactly.

use assist_core::ir::*;
use assist_core::{ProgramTree, TreeBuilder};
use assist_error::Result;

// ============================================================================
// Snippet
// ============================================================================

/// Source text with substring-to-span lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snippet {
    text: String,
}

impl Snippet {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Strip the common indentation and the leading newline of a raw string.
    pub fn dedent(text: &str) -> Self {
        let text = textwrap::dedent(text);
        Self::new(text.strip_prefix('\n').unwrap_or(&text))
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// `[0, len)`
    pub fn full(&self) -> Span {
        Span::new(0, self.len())
    }

    /// Start of the first occurrence of `needle`.
    ///
    /// # Panics
    /// Panics when `needle` does not occur.
    pub fn find(&self, needle: &str) -> usize {
        self.find_nth(needle, 0)
    }

    /// Start of occurrence number `n` (from zero) of `needle`.
    pub fn find_nth(&self, needle: &str, n: usize) -> usize {
        self.text
            .match_indices(needle)
            .nth(n)
            .map(|(at, _)| at)
            .unwrap_or_else(|| panic!("`{needle}` occurs fewer than {} times in {:?}", n + 1, self.text))
    }

    pub fn span_of(&self, needle: &str) -> Span {
        self.span_of_nth(needle, 0)
    }

    pub fn span_of_nth(&self, needle: &str, n: usize) -> Span {
        let start = self.find_nth(needle, n);
        Span::new(start, start + needle.len())
    }

    /// Offset just past the first occurrence of `needle`.
    pub fn offset_after(&self, needle: &str) -> usize {
        self.span_of(needle).end
    }

    /// Text covered by `span`, empty for synthetic or out-of-range spans.
    pub fn slice(&self, span: Span) -> &str {
        if span.is_synthetic() {
            return "";
        }
        self.text.get(span.start..span.end).unwrap_or_default()
    }
}

// ============================================================================
// SnippetTree
// ============================================================================

/// A [`TreeBuilder`] paired with the snippet its spans point into.
#[derive(Debug)]
pub struct SnippetTree {
    snippet: Snippet,
    builder: TreeBuilder,
}

impl SnippetTree {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            snippet: Snippet::new(text),
            builder: TreeBuilder::new(),
        }
    }

    pub fn dedent(text: &str) -> Self {
        Self {
            snippet: Snippet::dedent(text),
            builder: TreeBuilder::new(),
        }
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    pub fn builder(&mut self) -> &mut TreeBuilder {
        &mut self.builder
    }

    pub fn span(&self, needle: &str) -> Span {
        self.snippet.span_of(needle)
    }

    pub fn span_nth(&self, needle: &str, n: usize) -> Span {
        self.snippet.span_of_nth(needle, n)
    }

    /// Span from the start of `from` to the end of `to`.
    pub fn span_between(&self, from: &str, to: &str) -> Span {
        let start = self.snippet.find(from);
        let end = self.snippet.text()[start..]
            .find(to)
            .map(|at| start + at + to.len())
            .unwrap_or_else(|| panic!("`{to}` does not follow `{from}`"));
        Span::new(start, end)
    }

    pub fn node_span(&self, id: NodeId) -> Span {
        self.builder.span(id).unwrap_or_default()
    }

    pub fn push(&mut self, span: Span, node: Node) -> NodeId {
        self.builder.push(span, node)
    }

    pub fn push_synthetic(&mut self, node: Node) -> NodeId {
        self.builder.push_synthetic(node)
    }

    // ------------------------------------------------------------------------
    // expressions
    // ------------------------------------------------------------------------

    /// Reference to the variable named by the text at `span`.
    pub fn variable(&mut self, span: Span) -> NodeId {
        let name = self.snippet.slice(span).to_string();
        self.push(
            span,
            Node::Variable(VariableExpr {
                name,
                ..Default::default()
            }),
        )
    }

    /// Declaration of the variable named by the text at `span`.
    pub fn declared_variable(&mut self, span: Span, origin_type: Option<NodeId>) -> NodeId {
        let name = self.snippet.slice(span).to_string();
        self.push(
            span,
            Node::Variable(VariableExpr {
                name,
                origin_type,
                is_declaration: true,
                ..Default::default()
            }),
        )
    }

    /// Implicit `this` receiver of an unqualified call.
    pub fn this(&mut self) -> NodeId {
        self.push_synthetic(Node::Variable(VariableExpr {
            name: "this".into(),
            ..Default::default()
        }))
    }

    /// Bare name such as a method or property name.
    pub fn name(&mut self, span: Span) -> NodeId {
        let text = self.snippet.slice(span).to_string();
        self.push(
            span,
            Node::Constant(ConstantExpr {
                text,
                kind: ConstantKind::String,
            }),
        )
    }

    /// Quoted string literal; `span` includes the quotes.
    pub fn string(&mut self, span: Span) -> NodeId {
        let quoted = self.snippet.slice(span);
        let text = quoted
            .get(1..quoted.len().saturating_sub(1))
            .unwrap_or_default()
            .to_string();
        self.push(
            span,
            Node::Constant(ConstantExpr {
                text,
                kind: ConstantKind::String,
            }),
        )
    }

    pub fn number(&mut self, span: Span) -> NodeId {
        let text = self.snippet.slice(span).to_string();
        self.push(
            span,
            Node::Constant(ConstantExpr {
                text,
                kind: ConstantKind::Number,
            }),
        )
    }

    pub fn type_ref(&mut self, span: Span) -> NodeId {
        let name = self.snippet.slice(span).to_string();
        self.push(
            span,
            Node::TypeRef(TypeRefNode {
                name,
                ..Default::default()
            }),
        )
    }

    /// `Object`, as implied by `def`.
    pub fn object_type(&mut self) -> NodeId {
        self.push_synthetic(Node::TypeRef(TypeRefNode {
            name: "java.lang.Object".into(),
            ..Default::default()
        }))
    }

    pub fn arguments(&mut self, span: Span, items: Vec<NodeId>) -> NodeId {
        self.push(span, Node::ArgumentList(ListExpr { items }))
    }

    /// `object.method(arguments)`, or an unqualified call when `object` is `None`.
    pub fn call(&mut self, object: Option<NodeId>, method: NodeId, arguments: NodeId) -> NodeId {
        let (object, implicit_this) = match object {
            Some(object) => (object, false),
            None => (self.this(), true),
        };
        let start = if implicit_this {
            self.node_span(method).start
        } else {
            self.node_span(object).start
        };
        let span = Span::new(start, self.node_span(arguments).end);
        self.push(
            span,
            Node::MethodCall(MethodCallExpr {
                object,
                method,
                arguments,
                implicit_this,
                ..Default::default()
            }),
        )
    }

    pub fn property(&mut self, object: NodeId, property: NodeId) -> NodeId {
        let span = Span::new(self.node_span(object).start, self.node_span(property).end);
        self.push(
            span,
            Node::PropertyExpr(PropertyExpr {
                object,
                property,
                ..Default::default()
            }),
        )
    }

    pub fn binary(&mut self, op: BinaryOp, left: NodeId, right: NodeId) -> NodeId {
        let span = Span::new(self.node_span(left).start, self.node_span(right).end);
        self.push(span, Node::Binary(BinaryExpr { op, left, right }))
    }

    /// `def x = right`; a missing right side becomes an empty expression.
    pub fn declaration(&mut self, span: Span, left: NodeId, right: Option<NodeId>) -> NodeId {
        let right = match right {
            Some(right) => right,
            None => self.push_synthetic(Node::EmptyExpr),
        };
        self.push(
            span,
            Node::Declaration(DeclarationExpr {
                left,
                right,
                ..Default::default()
            }),
        )
    }

    // ------------------------------------------------------------------------
    // statements and declarations
    // ------------------------------------------------------------------------

    /// Statement covering exactly its expression.
    pub fn stmt(&mut self, expression: NodeId) -> NodeId {
        let span = self.node_span(expression);
        self.stmt_spanning(span, expression)
    }

    /// Statement whose range runs past its expression, as after a trailing dot.
    pub fn stmt_spanning(&mut self, span: Span, expression: NodeId) -> NodeId {
        self.push(span, Node::ExpressionStmt(ExpressionStmt { expression }))
    }

    pub fn block(&mut self, span: Span, statements: Vec<NodeId>) -> NodeId {
        self.push(span, Node::Block(BlockStmt { statements }))
    }

    /// Allocate a class and point its members back at it.
    pub fn class(&mut self, span: Span, class: ClassNode) -> NodeId {
        let id = self.push(span, Node::Class(class));
        self.builder.link_members(id);
        id
    }

    // ------------------------------------------------------------------------
    // finishing
    // ------------------------------------------------------------------------

    /// Seal a script: `statements` become the run-body of a script class that
    /// spans the whole snippet.
    pub fn script(self, statements: Vec<NodeId>) -> Result<ProgramTree> {
        self.script_with(statements, ModuleNode::default())
    }

    /// Like [`script`](Self::script), keeping the package, imports and extra
    /// classes already set on `module`.
    pub fn script_with(mut self, statements: Vec<NodeId>, mut module: ModuleNode) -> Result<ProgramTree> {
        let full = self.snippet.full();
        let body = self.block(full, statements);
        let run = self.push(
            full,
            Node::Method(MethodNode {
                name: "run".into(),
                flags: MethodFlags {
                    script_body: true,
                    ..Default::default()
                },
                body: Some(body),
                ..Default::default()
            }),
        );
        let script = self.class(
            full,
            ClassNode {
                name: "Script1".into(),
                flags: ClassFlags {
                    is_script: true,
                    ..Default::default()
                },
                methods: vec![run],
                ..Default::default()
            },
        );
        module.classes.insert(0, script);
        module.run_method = Some(run);
        self.module(module)
    }

    /// Seal `module` as the root, spanning the whole snippet.
    pub fn module(mut self, module: ModuleNode) -> Result<ProgramTree> {
        let full = self.snippet.full();
        let root = self.push(full, Node::Module(module));
        self.builder.finish(root)
    }
}
