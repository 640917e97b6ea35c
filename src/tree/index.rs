//! Owning handle over an AVL root.

use crate::error::Result;
use crate::key::SortKey;
use crate::record::Record;
use crate::tree::node;
use crate::tree::node::Iter;
use crate::tree::node::Link;
use crate::tree::node::Node;
use crate::tree::optimize;
use crate::tree::render;

/// Outcome of [`BalancedIndex::insert`].
#[derive(Debug, Clone, PartialEq)]
pub enum Inserted<R> {
    /// A new node was created.
    New,
    /// A node with the same key and tie-break already existed; this is the
    /// payload it held before being overwritten.
    Updated(R),
}

/// A height-balanced index over records, keyed by their numeric sort key.
///
/// Keys are validated on the way in; once inside, every comparison is
/// total. There is no removal: callers that need to drop a record rebuild
/// the index from their collection.
#[derive(Debug, Clone)]
pub struct BalancedIndex<R> {
    root: Link<R>,
    len: usize,
}

impl<R> BalancedIndex<R> {
    /// Create an empty index.
    pub fn new() -> BalancedIndex<R> {
        return BalancedIndex { root: None, len: 0 };
    }

    /// The root node, for callers that walk the structure themselves.
    pub fn root(&self) -> Option<&Node<R>> {
        return self.root.as_deref();
    }

    /// Height of the tree, 0 when empty.
    pub fn height(&self) -> u32 {
        return node::height(self.root());
    }

    /// Number of nodes.
    pub fn len(&self) -> usize {
        return self.len;
    }

    pub fn is_empty(&self) -> bool {
        return self.len == 0;
    }

    /// Records in key order.
    pub fn iter(&self) -> Iter<'_, R> {
        return Iter::new(self.root());
    }

    /// Look up the first record with exactly this key.
    pub fn search(&self, key: f64) -> Result<Option<&R>> {
        let key = SortKey::new(key)?;
        return Ok(node::search(self.root(), key).map(Node::record));
    }

    /// Check cached heights, balance and key order across the whole tree.
    pub fn validate(&self) -> Result<()> {
        return node::check_invariants(self.root());
    }

    /// Rebuild as a perfectly balanced tree over the same records.
    pub fn optimize(self) -> BalancedIndex<R> {
        let len = self.len;
        let root = optimize::optimize(self.root);
        tracing::debug!(len, height = node::height(root.as_deref()), "optimized index");
        return BalancedIndex { root, len };
    }
}

impl<R: Clone> BalancedIndex<R> {
    /// A perfectly balanced copy, leaving this index as it is.
    pub fn optimized(&self) -> BalancedIndex<R> {
        return BalancedIndex {
            root: optimize::optimized(self.root()),
            len: self.len,
        };
    }

    /// Clone the records out in key order.
    pub fn to_sorted_vec(&self) -> Vec<R> {
        return self.iter().cloned().collect();
    }
}

impl<R: Record> BalancedIndex<R> {
    /// Replay `records` in iteration order into a fresh index.
    ///
    /// Fails on the first record with a non-finite key.
    pub fn from_records<I>(records: I) -> Result<BalancedIndex<R>>
    where
        I: IntoIterator<Item = R>,
    {
        let mut index = BalancedIndex::new();
        for record in records {
            index.insert(record)?;
        }
        return Ok(index);
    }

    /// Insert a record, rebalancing as needed.
    pub fn insert(&mut self, record: R) -> Result<Inserted<R>> {
        let key = SortKey::new(record.sort_key())?;
        return Ok(self.insert_keyed(key, record));
    }

    /// Insert under a key that is already validated.
    ///
    /// `key` must equal `record.sort_key()`.
    pub(crate) fn insert_keyed(&mut self, key: SortKey, record: R) -> Inserted<R> {
        let (root, replaced) = node::insert(self.root.take(), key, record);
        self.root = Some(root);
        return match replaced {
            Some(old) => Inserted::Updated(old),
            None => {
                self.len += 1;
                Inserted::New
            }
        };
    }

    /// Mermaid flowchart of the current shape.
    pub fn to_mermaid(&self) -> String {
        return render::to_mermaid(self.root());
    }

    /// Indented text dump of the current shape.
    pub fn to_text(&self) -> String {
        return render::to_text(self.root());
    }
}

impl<R> Default for BalancedIndex<R> {
    fn default() -> Self {
        return Self::new();
    }
}

impl<'a, R> IntoIterator for &'a BalancedIndex<R> {
    type Item = &'a R;
    type IntoIter = Iter<'a, R>;

    fn into_iter(self) -> Iter<'a, R> {
        return self.iter();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IndexError;
    use crate::record::Product;

    fn product(id: u64, price: f64, name: &str) -> Product {
        return Product::new(id, name, price, 1, "Test");
    }

    #[test]
    fn empty_index() {
        let index: BalancedIndex<Product> = BalancedIndex::new();
        assert!(index.is_empty());
        assert_eq!(index.height(), 0);
        assert!(index.root().is_none());
        assert_eq!(index.search(1.0).unwrap(), None);
        index.validate().unwrap();
    }

    #[test]
    fn insert_reports_new_and_updated() {
        let mut index = BalancedIndex::new();
        assert_eq!(index.insert(product(1, 50.0, "A")).unwrap(), Inserted::New);
        let outcome = index.insert(product(2, 50.0, "A")).unwrap();
        assert_eq!(outcome, Inserted::Updated(product(1, 50.0, "A")));
        assert_eq!(index.len(), 1);
        assert_eq!(index.search(50.0).unwrap().unwrap().id.0, 2);
    }

    #[test]
    fn rejects_nan_without_touching_tree() {
        let mut index = BalancedIndex::new();
        index.insert(product(1, 10.0, "A")).unwrap();
        let err = index.insert(product(2, f64::NAN, "B")).unwrap_err();
        assert!(matches!(err, IndexError::NonFiniteKey { .. }));
        assert_eq!(index.len(), 1);
        assert_eq!(index.height(), 1);
    }

    #[test]
    fn search_rejects_infinite_key() {
        let index: BalancedIndex<Product> = BalancedIndex::new();
        assert!(index.search(f64::INFINITY).is_err());
    }

    #[test]
    fn from_records_stops_at_bad_key() {
        let records = vec![product(1, 1.0, "a"), product(2, f64::NEG_INFINITY, "b")];
        assert!(BalancedIndex::from_records(records).is_err());
    }

    #[test]
    fn len_matches_count_nodes() {
        let records = (0..100).map(|i| product(i, (i % 17) as f64, &format!("p{}", i)));
        let index = BalancedIndex::from_records(records).unwrap();
        assert_eq!(index.len(), 100);
        assert_eq!(node::count_nodes(index.root()), 100);
        index.validate().unwrap();
    }

    #[test]
    fn optimize_keeps_len_and_order() {
        let records = (0..50).map(|i| product(i, (50 - i) as f64, "x"));
        let index = BalancedIndex::from_records(records).unwrap();
        let before = index.to_sorted_vec();
        let copy = index.optimized();
        let moved = index.optimize();
        assert_eq!(moved.len(), 50);
        assert_eq!(moved.to_sorted_vec(), before);
        assert_eq!(copy.to_sorted_vec(), before);
        assert_eq!(moved.height(), 6);
        moved.validate().unwrap();
    }

    #[test]
    fn optimized_index_accepts_inserts() {
        let records = (0..10).map(|i| product(i, i as f64, "x"));
        let index = BalancedIndex::from_records(records).unwrap();
        let mut index = index.optimize();
        index.insert(product(10, 3.5, "y")).unwrap();
        assert_eq!(index.len(), 11);
        index.validate().unwrap();
    }
}
