//! AVL nodes and the algorithms that operate on them.
//!
//! Every node owns its children outright. Structural changes happen by
//! moving boxes around, so a rotation is a handful of `take()`s and the
//! caller always receives the new subtree root by value.
//!
//! Ordering rule: keys strictly less than a node go left, everything else
//! goes right. A key equal to the node's key whose tie-break also matches
//! replaces the payload in place instead of adding a node.

use crate::error::IndexError;
use crate::error::Result;
use crate::key::SortKey;
use crate::record::Record;

/// An owned, possibly empty subtree.
pub type Link<R> = Option<Box<Node<R>>>;

/// One indexed record.
#[derive(Debug, Clone)]
pub struct Node<R> {
    pub(crate) key: SortKey,
    pub(crate) record: R,
    pub(crate) left: Link<R>,
    pub(crate) right: Link<R>,
    /// Cached subtree height, 1 for a leaf.
    pub(crate) height: u32,
}

impl<R> Node<R> {
    /// Create a leaf.
    pub fn leaf(key: SortKey, record: R) -> Node<R> {
        return Node {
            key,
            record,
            left: None,
            right: None,
            height: 1,
        };
    }

    pub fn key(&self) -> SortKey {
        return self.key;
    }

    pub fn record(&self) -> &R {
        return &self.record;
    }

    pub fn left(&self) -> Option<&Node<R>> {
        return self.left.as_deref();
    }

    pub fn right(&self) -> Option<&Node<R>> {
        return self.right.as_deref();
    }

    /// Cached height of the subtree rooted here.
    pub fn height(&self) -> u32 {
        return self.height;
    }

    /// `height(left) - height(right)`.
    pub fn balance_factor(&self) -> i32 {
        return height(self.left()) as i32 - height(self.right()) as i32;
    }

    fn update_height(&mut self) {
        self.height = 1 + height(self.left()).max(height(self.right()));
    }

    /// Iterate over the records of this subtree in key order.
    pub fn iter(&self) -> Iter<'_, R> {
        return Iter::new(Some(self));
    }
}

/// Height of a possibly absent node. Reads the cache, never recurses.
pub fn height<R>(node: Option<&Node<R>>) -> u32 {
    return match node {
        Some(node) => node.height,
        None => 0,
    };
}

/// Balance factor of a possibly absent node, 0 when absent.
pub fn balance_factor<R>(node: Option<&Node<R>>) -> i32 {
    return match node {
        Some(node) => node.balance_factor(),
        None => 0,
    };
}

/// Single right rotation around `y`. Returns the new subtree root.
///
/// ```text
///       y            x
///      / \          / \
///     x   C  ==>   A   y
///    / \              / \
///   A   T2           T2  C
/// ```
///
/// A node without a left child is returned untouched.
pub fn rotate_right<R>(mut y: Box<Node<R>>) -> Box<Node<R>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    return x;
}

/// Single left rotation around `x`, the mirror of [`rotate_right`].
///
/// A node without a right child is returned untouched.
pub fn rotate_left<R>(mut x: Box<Node<R>>) -> Box<Node<R>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    return y;
}

/// Insert `record` under `key` into the subtree rooted at `node`.
///
/// Returns the new subtree root, which differs from `node` whenever a
/// rotation fired, together with the payload that was overwritten if the
/// insertion turned out to be an update.
pub fn insert<R: Record>(node: Link<R>, key: SortKey, record: R) -> (Box<Node<R>>, Option<R>) {
    let mut node = match node {
        Some(node) => node,
        None => return (Box::new(Node::leaf(key, record)), None),
    };

    let replaced;
    if key < node.key {
        let (left, old) = insert(node.left.take(), key, record);
        node.left = Some(left);
        replaced = old;
    } else if key > node.key || node.record.tie_break() != record.tie_break() {
        // Equal keys with a different tie-break chain to the right.
        let (right, old) = insert(node.right.take(), key, record);
        node.right = Some(right);
        replaced = old;
    } else {
        let old = std::mem::replace(&mut node.record, record);
        return (node, Some(old));
    }

    node.update_height();
    return (rebalance(node, key), replaced);
}

/// Apply at most one rebalancing step after inserting `key` below `node`.
///
/// The case is picked by comparing the inserted key with the heavy child,
/// using `<` on the left and `>=` on the right so that duplicates, which
/// always descend right, are classified the same way they were routed.
fn rebalance<R>(mut node: Box<Node<R>>, key: SortKey) -> Box<Node<R>> {
    let balance = node.balance_factor();

    if balance > 1 {
        let Some(left_key) = node.left.as_ref().map(|left| left.key) else {
            return node;
        };
        if key < left_key {
            return rotate_right(node);
        }
        node.left = node.left.take().map(rotate_left);
        return rotate_right(node);
    }

    if balance < -1 {
        let Some(right_key) = node.right.as_ref().map(|right| right.key) else {
            return node;
        };
        if key >= right_key {
            return rotate_left(node);
        }
        node.right = node.right.take().map(rotate_right);
        return rotate_left(node);
    }

    return node;
}

/// Plain BST descent: left on `<`, right on `>`, stop at the first equal key.
pub fn search<R>(node: Option<&Node<R>>, key: SortKey) -> Option<&Node<R>> {
    let mut current = node;
    while let Some(node) = current {
        if key < node.key {
            current = node.left();
        } else if key > node.key {
            current = node.right();
        } else {
            return Some(node);
        }
    }
    return None;
}

/// Number of nodes in the subtree, counted recursively.
pub fn count_nodes<R>(node: Option<&Node<R>>) -> usize {
    return match node {
        Some(node) => 1 + count_nodes(node.left()) + count_nodes(node.right()),
        None => 0,
    };
}

/// Push every record of the subtree onto `out`, in key order.
pub fn in_order<'a, R>(node: Option<&'a Node<R>>, out: &mut Vec<&'a R>) {
    out.extend(Iter::new(node));
}

/// Check cached heights, the AVL balance bound and the key order.
///
/// Returns the first violation found.
pub fn check_invariants<R>(node: Option<&Node<R>>) -> Result<()> {
    check_subtree(node)?;

    let mut previous: Option<SortKey> = None;
    let mut stack = Vec::new();
    let mut current = node;
    loop {
        while let Some(node) = current {
            stack.push(node);
            current = node.left();
        }
        let Some(node) = stack.pop() else {
            break;
        };
        if let Some(previous) = previous {
            if node.key < previous {
                return Err(IndexError::Corrupted(format!(
                    "in-order keys decrease: {} after {}",
                    node.key, previous,
                )));
            }
        }
        previous = Some(node.key);
        current = node.right();
    }

    return Ok(());
}

/// Recompute heights bottom-up and compare against the cache.
fn check_subtree<R>(node: Option<&Node<R>>) -> Result<u32> {
    let Some(node) = node else {
        return Ok(0);
    };
    let left = check_subtree(node.left())?;
    let right = check_subtree(node.right())?;
    let actual = 1 + left.max(right);

    if node.height != actual {
        return Err(IndexError::Corrupted(format!(
            "node {} caches height {} but has height {}",
            node.key, node.height, actual,
        )));
    }
    let balance = left as i64 - right as i64;
    if balance.abs() > 1 {
        return Err(IndexError::Corrupted(format!(
            "node {} has balance factor {}",
            node.key, balance,
        )));
    }
    return Ok(actual);
}

/// In-order iterator over the records of a subtree.
pub struct Iter<'a, R> {
    stack: Vec<&'a Node<R>>,
}

impl<'a, R> Iter<'a, R> {
    pub(crate) fn new(root: Option<&'a Node<R>>) -> Iter<'a, R> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(root);
        return iter;
    }

    fn push_left(&mut self, mut node: Option<&'a Node<R>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left();
        }
    }
}

impl<'a, R> Iterator for Iter<'a, R> {
    type Item = &'a R;

    fn next(&mut self) -> Option<&'a R> {
        let node = self.stack.pop()?;
        self.push_left(node.right());
        return Some(&node.record);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Product;

    fn product(id: u64, price: f64, name: &str) -> Product {
        return Product::new(id, name, price, 1, "Test");
    }

    fn key(value: f64) -> SortKey {
        return SortKey::new(value).unwrap();
    }

    fn build(prices: &[f64]) -> Link<Product> {
        let mut root = None;
        for (i, price) in prices.iter().enumerate() {
            let record = product(i as u64, *price, &format!("p{}", i));
            let (node, _) = insert(root, key(*price), record);
            root = Some(node);
        }
        return root;
    }

    fn keys(root: &Link<Product>) -> Vec<f64> {
        return Iter::new(root.as_deref()).map(|p| p.price).collect();
    }

    #[test]
    fn empty_height_and_balance() {
        assert_eq!(height::<Product>(None), 0);
        assert_eq!(balance_factor::<Product>(None), 0);
        assert_eq!(count_nodes::<Product>(None), 0);
    }

    #[test]
    fn leaf_has_height_one() {
        let root = build(&[10.0]);
        let root = root.as_deref().unwrap();
        assert_eq!(root.height(), 1);
        assert_eq!(root.balance_factor(), 0);
    }

    #[test]
    fn ascending_keys_rotate_left() {
        let root = build(&[10.0, 20.0, 30.0]);
        let root = root.as_deref().unwrap();
        assert_eq!(root.key().get(), 20.0);
        assert_eq!(root.left().unwrap().key().get(), 10.0);
        assert_eq!(root.right().unwrap().key().get(), 30.0);
        assert_eq!(root.height(), 2);
    }

    #[test]
    fn descending_keys_rotate_right() {
        let root = build(&[30.0, 20.0, 10.0]);
        let root = root.as_deref().unwrap();
        assert_eq!(root.key().get(), 20.0);
        assert_eq!(root.height(), 2);
    }

    #[test]
    fn left_right_case() {
        let root = build(&[30.0, 10.0, 20.0]);
        let root = root.as_deref().unwrap();
        assert_eq!(root.key().get(), 20.0);
        assert_eq!(root.left().unwrap().key().get(), 10.0);
        assert_eq!(root.right().unwrap().key().get(), 30.0);
    }

    #[test]
    fn right_left_case() {
        let root = build(&[10.0, 30.0, 20.0]);
        let root = root.as_deref().unwrap();
        assert_eq!(root.key().get(), 20.0);
        assert_eq!(root.left().unwrap().key().get(), 10.0);
        assert_eq!(root.right().unwrap().key().get(), 30.0);
    }

    #[test]
    fn rotate_right_recomputes_heights() {
        let mut y = Box::new(Node::leaf(key(3.0), product(0, 3.0, "y")));
        let mut x = Box::new(Node::leaf(key(2.0), product(1, 2.0, "x")));
        x.left = Some(Box::new(Node::leaf(key(1.0), product(2, 1.0, "a"))));
        x.update_height();
        y.left = Some(x);
        y.update_height();
        assert_eq!(y.height(), 3);

        let root = rotate_right(y);
        assert_eq!(root.key().get(), 2.0);
        assert_eq!(root.height(), 2);
        assert_eq!(root.right().unwrap().height(), 1);
        check_invariants(Some(&*root)).unwrap();
    }

    #[test]
    fn rotation_without_child_is_identity() {
        let leaf = Box::new(Node::leaf(key(1.0), product(0, 1.0, "a")));
        let leaf = rotate_left(leaf);
        let leaf = rotate_right(leaf);
        assert_eq!(leaf.key().get(), 1.0);
        assert_eq!(leaf.height(), 1);
    }

    #[test]
    fn same_key_same_name_updates_in_place() {
        let (root, old) = insert(None, key(50.0), product(1, 50.0, "A"));
        assert!(old.is_none());
        let (root, old) = insert(Some(root), key(50.0), product(2, 50.0, "A"));
        assert_eq!(old.unwrap().id.0, 1);
        assert_eq!(count_nodes(Some(&*root)), 1);
        assert_eq!(root.record().id.0, 2);
    }

    #[test]
    fn same_key_other_name_goes_right() {
        let (root, _) = insert(None, key(50.0), product(1, 50.0, "A"));
        let (root, old) = insert(Some(root), key(50.0), product(2, 50.0, "B"));
        assert!(old.is_none());
        assert_eq!(count_nodes(Some(&*root)), 2);
        assert!(root.left().is_none());
        assert_eq!(root.right().unwrap().record().name, "B");
    }

    #[test]
    fn duplicate_chain_stays_balanced() {
        let mut root = None;
        for i in 0..64 {
            let (node, _) = insert(root, key(7.0), product(i, 7.0, &format!("dup{}", i)));
            root = Some(node);
        }
        check_invariants(root.as_deref()).unwrap();
        assert_eq!(count_nodes(root.as_deref()), 64);
        assert!(height(root.as_deref()) <= 8);
    }

    #[test]
    fn end_to_end_prices() {
        let root = build(&[250.0, 120.0, 800.0, 15.0, 5.0]);
        assert_eq!(keys(&root), vec![5.0, 15.0, 120.0, 250.0, 800.0]);
        assert_eq!(height(root.as_deref()), 3);
        check_invariants(root.as_deref()).unwrap();
    }

    #[test]
    fn search_finds_first_equal() {
        let root = build(&[40.0, 20.0, 60.0, 10.0, 30.0]);
        let found = search(root.as_deref(), key(30.0)).unwrap();
        assert_eq!(found.record().price, 30.0);
        assert!(search(root.as_deref(), key(35.0)).is_none());
        assert!(search::<Product>(None, key(1.0)).is_none());
    }

    #[test]
    fn in_order_collects_sorted() {
        let root = build(&[5.0, 3.0, 8.0, 1.0, 4.0, 9.0]);
        let mut out = Vec::new();
        in_order(root.as_deref(), &mut out);
        let prices: Vec<f64> = out.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![1.0, 3.0, 4.0, 5.0, 8.0, 9.0]);
    }

    #[test]
    fn invariant_checker_catches_stale_height() {
        let mut root = build(&[1.0, 2.0, 3.0]).unwrap();
        root.height = 5;
        let err = check_invariants(Some(&*root)).unwrap_err();
        assert!(matches!(err, IndexError::Corrupted(_)));
    }

    #[test]
    fn invariant_checker_catches_bad_order() {
        let mut root = build(&[1.0, 2.0, 3.0]).unwrap();
        std::mem::swap(&mut root.left, &mut root.right);
        let err = check_invariants(Some(&*root)).unwrap_err();
        assert!(err.to_string().contains("decrease"));
    }
}
