use assist_error::{Error, Result};
use serde::{Deserialize, Serialize};

use crate::ir::{ClassNode, MethodNode, ModuleNode, Node, NodeData, NodeId, NodeKind, Span, TypeRefNode};

/// Arena holding one compilation unit.
///
/// Read-only once built: resolution borrows it shared, so any number of
/// requests may run against the same tree at the same time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgramTree {
    root: NodeId,
    nodes: Vec<NodeData>,
}

impl ProgramTree {
    pub(crate) fn from_parts(root: NodeId, nodes: Vec<NodeData>) -> Self {
        Self { root, nodes }
    }

    /// Decode a tree handed over by an external producer and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let tree: ProgramTree = serde_json::from_str(json).map_err(|err| {
            Error::deserialization_failed("program tree is not valid json")
                .with_operation("tree::from_json")
                .set_source(err)
        })?;
        tree.validate()
            .map_err(|err| err.with_operation("tree::from_json"))?;
        Ok(tree)
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| {
            Error::serialization_failed("program tree cannot be encoded")
                .with_operation("tree::to_json")
                .set_source(err)
        })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// The module node at the root, if the root is a module.
    pub fn module(&self) -> Option<&ModuleNode> {
        match self.get(self.root).map(|data| &data.node) {
            Some(Node::Module(module)) => Some(module),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&NodeData> {
        self.nodes.get(id.index())
    }

    /// Panics on an id outside the arena; validated trees never hold one.
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.index()]
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.data(id).node
    }

    pub fn span(&self, id: NodeId) -> Span {
        self.data(id).span
    }

    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.node(id).kind()
    }

    pub fn original(&self, id: NodeId) -> Option<NodeId> {
        self.data(id).original
    }

    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &NodeData)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, data)| (NodeId(index as u32), data))
    }

    pub fn class(&self, id: NodeId) -> Option<&ClassNode> {
        match self.node(id) {
            Node::Class(class) => Some(class),
            _ => None,
        }
    }

    pub fn method(&self, id: NodeId) -> Option<&MethodNode> {
        match self.node(id) {
            Node::Method(method) | Node::Constructor(method) => Some(method),
            _ => None,
        }
    }

    pub fn type_ref(&self, id: NodeId) -> Option<&TypeRefNode> {
        match self.node(id) {
            Node::TypeRef(type_ref) => Some(type_ref),
            _ => None,
        }
    }

    /// Class declaring the member `id`, or the outer class of a nested class.
    pub fn declaring_class(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).declaring_class()
    }

    /// Name a proposal would insert for a type-like node: the simple name of a
    /// class or type reference.
    pub fn simple_type_name(&self, id: NodeId) -> Option<&str> {
        match self.node(id) {
            Node::Class(class) => Some(class.name_without_package()),
            Node::TypeRef(type_ref) => Some(type_ref.name_without_package()),
            _ => None,
        }
    }

    /// Check the structural invariants the resolver relies on.
    ///
    /// Every child id must be allocated, and every child with a real source
    /// range must lie within its parent's real source range. No node may be
    /// reachable from itself.
    pub fn validate(&self) -> Result<()> {
        let Some(root) = self.get(self.root) else {
            return Err(Error::missing_root().with_operation("tree::validate"));
        };
        if root.node.kind() != NodeKind::Module {
            return Err(
                Error::unexpected_node_kind(self.root.to_string(), "module")
                    .with_operation("tree::validate"),
            );
        }

        for (id, data) in self.iter() {
            let dangling = data
                .node
                .children()
                .into_iter()
                .chain(data.original)
                .find(|child| self.get(*child).is_none());
            if let Some(child) = dangling {
                tracing::debug!("node {} refers to unallocated {}", id, child);
                return Err(Error::invalid_node_ref(id.to_string(), child.to_string())
                    .with_operation("tree::validate"));
            }

            if data.span.is_synthetic() {
                continue;
            }
            for child in data.node.children() {
                let span = self.span(child);
                if !span.is_synthetic() && !data.span.encloses(span) {
                    tracing::debug!("{} {} escapes {} {}", child, span, id, data.span);
                    return Err(Error::range_violation(id.to_string(), child.to_string())
                        .with_operation("tree::validate"));
                }
            }
        }
        self.check_acyclic()
    }

    /// Depth-first walk over child and `original` links. A link to a node still
    /// on the walk path closes a cycle. Shared subtrees are fine.
    fn check_acyclic(&self) -> Result<()> {
        #[derive(Clone, Copy, PartialEq)]
        enum Mark {
            Unseen,
            OnPath,
            Done,
        }

        let links = |id: NodeId| {
            let data = self.data(id);
            let mut links = data.node.children();
            links.extend(data.original);
            links
        };

        let mut marks = vec![Mark::Unseen; self.nodes.len()];
        let starts = std::iter::once(self.root).chain(self.iter().map(|(id, _)| id));
        for start in starts {
            if marks[start.index()] != Mark::Unseen {
                continue;
            }
            marks[start.index()] = Mark::OnPath;
            let mut stack = vec![(start, links(start), 0usize)];
            while let Some((id, children, next)) = stack.last_mut() {
                let Some(&child) = children.get(*next) else {
                    marks[id.index()] = Mark::Done;
                    stack.pop();
                    continue;
                };
                *next += 1;
                match marks[child.index()] {
                    Mark::Done => {}
                    Mark::OnPath => {
                        tracing::debug!("node {} links back to {}", id, child);
                        return Err(Error::cyclic_node_ref(id.to_string(), child.to_string())
                            .with_operation("tree::validate"));
                    }
                    Mark::Unseen => {
                        marks[child.index()] = Mark::OnPath;
                        stack.push((child, links(child), 0));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ir::{BlockStmt, ExpressionStmt, ModuleNode, VariableExpr};
    use assist_error::ErrorKind;

    fn data(span: Span, node: Node) -> NodeData {
        NodeData {
            span,
            node,
            original: None,
        }
    }

    fn variable(name: &str) -> Node {
        Node::Variable(VariableExpr {
            name: name.into(),
            ..Default::default()
        })
    }

    #[test]
    fn missing_root_is_reported() {
        let tree = ProgramTree::from_parts(NodeId(3), vec![]);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MissingRoot);
    }

    #[test]
    fn root_must_be_module() {
        let tree = ProgramTree::from_parts(NodeId(0), vec![data(Span::new(0, 1), variable("x"))]);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedNodeKind);
        assert_eq!(err.context_value("expected"), Some("module"));
    }

    #[test]
    fn dangling_child_is_reported() {
        let nodes = vec![
            data(
                Span::new(0, 4),
                Node::Block(BlockStmt {
                    statements: vec![NodeId(9)],
                }),
            ),
            data(
                Span::new(0, 4),
                Node::Module(ModuleNode {
                    classes: vec![],
                    ..Default::default()
                }),
            ),
        ];
        let tree = ProgramTree::from_parts(NodeId(1), nodes);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidNodeRef);
        assert_eq!(err.context_value("parent"), Some("n0"));
        assert_eq!(err.context_value("child"), Some("n9"));
    }

    #[test]
    fn escaping_child_is_reported() {
        let nodes = vec![
            data(Span::new(2, 9), variable("x")),
            data(
                Span::new(2, 6),
                Node::ExpressionStmt(ExpressionStmt {
                    expression: NodeId(0),
                }),
            ),
            data(Span::new(0, 10), Node::Module(ModuleNode::default())),
        ];
        let tree = ProgramTree::from_parts(NodeId(2), nodes);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::RangeViolation);
        assert_eq!(err.context_value("child"), Some("n0"));
    }

    #[test]
    fn synthetic_children_are_exempt() {
        let nodes = vec![
            data(Span::SYNTHETIC, variable("this")),
            data(
                Span::new(4, 6),
                Node::ExpressionStmt(ExpressionStmt {
                    expression: NodeId(0),
                }),
            ),
            data(Span::new(0, 10), Node::Module(ModuleNode::default())),
        ];
        let tree = ProgramTree::from_parts(NodeId(2), nodes);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn self_original_is_a_cycle() {
        let mut foo = data(Span::new(0, 3), variable("foo"));
        foo.original = Some(NodeId(0));
        let nodes = vec![foo, data(Span::new(0, 3), Node::Module(ModuleNode::default()))];
        let tree = ProgramTree::from_parts(NodeId(1), nodes);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicNodeRef);
        assert_eq!(err.context_value("parent"), Some("n0"));
        assert_eq!(err.context_value("child"), Some("n0"));
    }

    #[test]
    fn child_cycle_with_equal_spans_is_reported() {
        let nodes = vec![
            data(
                Span::new(0, 4),
                Node::Block(BlockStmt {
                    statements: vec![NodeId(1)],
                }),
            ),
            data(
                Span::new(0, 4),
                Node::Block(BlockStmt {
                    statements: vec![NodeId(0)],
                }),
            ),
            data(Span::new(0, 4), Node::Module(ModuleNode::default())),
        ];
        let tree = ProgramTree::from_parts(NodeId(2), nodes);
        let err = tree.validate().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CyclicNodeRef);
        assert!(err.kind().is_tree_defect());
    }

    #[test]
    fn shared_subtree_is_not_a_cycle() {
        let mut folded = data(Span::new(0, 3), variable("x"));
        folded.original = Some(NodeId(0));
        let nodes = vec![
            data(Span::new(0, 3), variable("x")),
            folded,
            data(
                Span::new(0, 3),
                Node::Block(BlockStmt {
                    statements: vec![NodeId(0), NodeId(1)],
                }),
            ),
            data(Span::new(0, 3), Node::Module(ModuleNode::default())),
        ];
        let tree = ProgramTree::from_parts(NodeId(3), nodes);
        assert!(tree.validate().is_ok());
    }

    #[test]
    fn json_round_trip_keeps_tree() {
        let nodes = vec![
            data(Span::new(0, 3), variable("foo")),
            data(Span::new(0, 3), Node::Module(ModuleNode::default())),
        ];
        let tree = ProgramTree::from_parts(NodeId(1), nodes);
        let json = tree.to_json().unwrap();
        let back = ProgramTree::from_json(&json).unwrap();
        assert_eq!(back, tree);
        assert_eq!(back.kind(NodeId(0)), NodeKind::Variable);
    }

    #[test]
    fn malformed_json_carries_source() {
        let err = ProgramTree::from_json("{\"root\": 0").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DeserializationFailed);
        assert_eq!(err.operation(), "tree::from_json");
        assert!(err.source_ref().is_some());
    }
}
