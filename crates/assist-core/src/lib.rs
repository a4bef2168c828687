//! Program tree model and depth-first traversal shared by the assist crates.
pub mod builder;
pub mod ir;
pub mod printer;
pub mod tree;
pub mod visit;

pub use builder::TreeBuilder;
pub use ir::{Node, NodeData, NodeId, NodeKind, Span};
pub use printer::{render_subtree, render_tree};
pub use tree::ProgramTree;
pub use visit::DepthFirstVisitor;
