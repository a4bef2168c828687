//! Bottom-up construction of a [`ProgramTree`].

use assist_error::Result;

use crate::ir::{Node, NodeData, NodeId, Span};
use crate::tree::ProgramTree;

/// Allocates nodes children-first and seals them into a [`ProgramTree`].
#[derive(Debug, Default)]
pub struct TreeBuilder {
    nodes: Vec<NodeData>,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn push(&mut self, span: Span, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(NodeData {
            span,
            node,
            original: None,
        });
        id
    }

    /// Allocate a node with no source position.
    pub fn push_synthetic(&mut self, node: Node) -> NodeId {
        self.push(Span::SYNTHETIC, node)
    }

    /// Record that `id` was rewritten from `original`.
    pub fn set_original(&mut self, id: NodeId, original: NodeId) {
        if let Some(data) = self.nodes.get_mut(id.index()) {
            data.original = Some(original);
        }
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index()).map(|data| &data.node)
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.index()).map(|data| &mut data.node)
    }

    pub fn span(&self, id: NodeId) -> Option<Span> {
        self.nodes.get(id.index()).map(|data| data.span)
    }

    /// Point every member of class `class_id` back at it.
    ///
    /// Members are allocated before their class, so the back links can only be
    /// filled in once the class exists.
    pub fn link_members(&mut self, class_id: NodeId) {
        let Some(Node::Class(class)) = self.node(class_id) else {
            return;
        };
        let members: Vec<NodeId> = class
            .fields
            .iter()
            .chain(&class.properties)
            .chain(&class.methods)
            .chain(&class.constructors)
            .chain(&class.trait_fields)
            .chain(&class.trait_methods)
            .chain(&class.static_init)
            .chain(&class.inner_classes)
            .copied()
            .collect();

        for member in members {
            match self.node_mut(member) {
                Some(Node::Field(field)) => field.declaring_class = Some(class_id),
                Some(Node::Property(property)) => property.declaring_class = Some(class_id),
                Some(Node::Method(method)) | Some(Node::Constructor(method)) => {
                    method.declaring_class = Some(class_id)
                }
                Some(Node::Class(inner)) => inner.outer_class = Some(class_id),
                _ => {}
            }
        }
    }

    /// Seal the arena with `root` as the module and validate it.
    pub fn finish(self, root: NodeId) -> Result<ProgramTree> {
        let tree = self.finish_unchecked(root);
        tree.validate()?;
        Ok(tree)
    }

    /// Seal the arena without validation, for deliberately malformed trees.
    /// Traversing a tree with a cycle does not terminate.
    pub fn finish_unchecked(self, root: NodeId) -> ProgramTree {
        ProgramTree::from_parts(root, self.nodes)
    }
}
