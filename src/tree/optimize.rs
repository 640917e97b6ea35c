//! Perfect rebuild.
//!
//! Flattens a tree in key order and rebuilds it by repeated median
//! selection. The result ignores the insertion history entirely: its height
//! is `floor(log2(n)) + 1` and every balance factor is in `{-1, 0, 1}`.
//!
//! The median of a run of `len` items sits at index `len / 2`, so on even
//! lengths the extra item lands in the left half and the right half is the
//! shorter one.

use crate::key::SortKey;
use crate::tree::node;
use crate::tree::node::Link;
use crate::tree::node::Node;

/// Consume `root` and return a perfectly balanced tree over the same records.
pub fn optimize<R>(root: Link<R>) -> Link<R> {
    let mut items = Vec::new();
    flatten(root, &mut items);
    let len = items.len();
    return build(&mut items.into_iter(), len);
}

/// Same as [`optimize`] but leaves the source tree alone.
pub fn optimized<R: Clone>(root: Option<&Node<R>>) -> Link<R> {
    let Some(root) = root else {
        return None;
    };
    let mut items = Vec::new();
    collect(root, &mut items);
    let len = items.len();
    return build(&mut items.into_iter(), len);
}

fn flatten<R>(node: Link<R>, out: &mut Vec<(SortKey, R)>) {
    let Some(node) = node else {
        return;
    };
    let Node { key, record, left, right, .. } = *node;
    flatten(left, out);
    out.push((key, record));
    flatten(right, out);
}

fn collect<R: Clone>(node: &Node<R>, out: &mut Vec<(SortKey, R)>) {
    if let Some(left) = node.left() {
        collect(left, out);
    }
    out.push((node.key, node.record.clone()));
    if let Some(right) = node.right() {
        collect(right, out);
    }
}

/// Build a subtree from the next `len` items.
///
/// Items are pulled strictly in order: left half, median, right half. That
/// lets the records move into their nodes without slicing or cloning.
fn build<R, I>(items: &mut I, len: usize) -> Link<R>
where
    I: Iterator<Item = (SortKey, R)>,
{
    if len == 0 {
        return None;
    }
    let mid = len / 2;
    let left = build(items, mid);
    let (key, record) = items.next()?;
    let right = build(items, len - mid - 1);

    let height = 1 + node::height(left.as_deref()).max(node::height(right.as_deref()));
    return Some(Box::new(Node {
        key,
        record,
        left,
        right,
        height,
    }));
}
