//! Indented text dump of a program tree, for debugging and `--print-tree`.
use std::fmt::Write;

use crate::ir::NodeId;
use crate::tree::ProgramTree;

/// Nodes nested deeper than this are elided; a cyclic tree terminates.
const MAX_DEPTH: usize = 256;

/// Render the whole tree from its root.
pub fn render_tree(tree: &ProgramTree) -> String {
    render_subtree(tree, tree.root())
}

/// Render the subtree rooted at `id`, one node per line:
///
/// ```text
/// (module n12 [0..13)
///   (class n11 [0..13) Foo)
/// )
/// ```
pub fn render_subtree(tree: &ProgramTree, id: NodeId) -> String {
    let mut out = String::new();
    render_node(tree, id, 0, &mut out);
    out
}

fn render_node(tree: &ProgramTree, id: NodeId, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);
    let Some(data) = tree.get(id) else {
        let _ = writeln!(out, "{indent}(missing {id})");
        return;
    };

    let mut label = format!("{} {} {}", data.node.kind(), id, data.span);
    if let Some(name) = data.node.name() {
        let _ = write!(label, " {name}");
    }
    if let Some(original) = data.original {
        let _ = write!(label, " <- {original}");
    }

    let children = data.node.children();
    if children.is_empty() {
        let _ = writeln!(out, "{indent}({label})");
        return;
    }
    if depth >= MAX_DEPTH {
        let _ = writeln!(out, "{indent}({label} ...)");
        return;
    }

    let _ = writeln!(out, "{indent}({label}");
    for child in children {
        render_node(tree, child, depth + 1, out);
    }
    let _ = writeln!(out, "{indent})");
}
