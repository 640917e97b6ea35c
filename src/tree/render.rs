//! Text renderings of a tree for display layers.

use crate::record::Record;
use crate::tree::node::Node;

/// Render the tree as a Mermaid flowchart.
///
/// Node names are derived from record ids because keys may repeat.
/// Node declarations come first in pre-order, then one line per edge.
pub fn to_mermaid<R: Record>(root: Option<&Node<R>>) -> String {
    let mut nodes = Vec::new();
    let mut edges = Vec::new();
    let mut stack: Vec<&Node<R>> = root.into_iter().collect();

    while let Some(node) = stack.pop() {
        let id = node.record().id();
        nodes.push(format!("n{}((\"{}\"))", id, node.key()));
        for child in [node.left(), node.right()].into_iter().flatten() {
            edges.push(format!("n{} --> n{}", id, child.record().id()));
        }
        // right first so the left subtree is visited first
        stack.extend(node.right());
        stack.extend(node.left());
    }

    let mut out = String::from("graph TD;\n");
    for line in nodes.iter().chain(edges.iter()) {
        out.push_str(line);
        out.push('\n');
    }
    return out;
}

/// Indented pre-order dump, one node per line.
///
/// ```text
/// 250 [Laptop] h=3 bf=1
///   L: 15 [Mouse] h=2 bf=0
/// ```
pub fn to_text<R: Record>(root: Option<&Node<R>>) -> String {
    let mut out = String::new();
    if let Some(root) = root {
        write_node(&mut out, root, 0, "");
    }
    return out;
}

fn write_node<R: Record>(out: &mut String, node: &Node<R>, depth: usize, tag: &str) {
    out.push_str(&format!(
        "{:indent$}{}{} [{}] h={} bf={}\n",
        "",
        tag,
        node.key(),
        node.record().tie_break(),
        node.height(),
        node.balance_factor(),
        indent = depth * 2,
    ));
    if let Some(left) = node.left() {
        write_node(out, left, depth + 1, "L: ");
    }
    if let Some(right) = node.right() {
        write_node(out, right, depth + 1, "R: ");
    }
}
