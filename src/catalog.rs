//! A record collection with a derived AVL view.
//!
//! The list of records is the source of truth. The index is recomputed from
//! it, in list order, every time the list changes. Nothing ever patches the
//! tree incrementally, which is also why there is no node removal: removing
//! a record just means rebuilding without it.
//!
//! [`Catalog::optimize`] swaps in a perfectly balanced view of the same
//! records. That view is for display only. The next change to the list
//! rebuilds from list order and the optimized shape is gone.
//!
//! Record ids are unique within a catalog. They name records for
//! [`Catalog::get`], [`Catalog::remove`] and [`Catalog::update`], and they
//! name nodes in the Mermaid export.

use std::collections::HashSet;

use crate::error::IndexError;
use crate::error::Result;
use crate::key::SortKey;
use crate::record::Product;
use crate::record::Record;
use crate::record::RecordId;
use crate::stats::CatalogStats;
use crate::tree::BalancedIndex;

pub struct Catalog<R> {
    records: Vec<R>,
    index: BalancedIndex<R>,
    optimized: bool,
}

impl<R: Record + Clone> Catalog<R> {
    /// Create an empty catalog.
    pub fn new() -> Catalog<R> {
        return Catalog {
            records: Vec::new(),
            index: BalancedIndex::new(),
            optimized: false,
        };
    }

    /// Build a catalog from an initial collection.
    ///
    /// Fails on a non-finite key or on an id that appears twice.
    pub fn from_records(records: Vec<R>) -> Result<Catalog<R>> {
        check_unique_ids(&HashSet::new(), &records)?;
        let index = BalancedIndex::from_records(records.iter().cloned())?;
        return Ok(Catalog {
            records,
            index,
            optimized: false,
        });
    }

    /// Append one record and rebuild.
    pub fn add(&mut self, record: R) -> Result<()> {
        SortKey::new(record.sort_key())?;
        if self.get(record.id()).is_some() {
            return Err(IndexError::DuplicateId { id: record.id() });
        }
        self.records.push(record);
        return self.rebuild();
    }

    /// Append many records and rebuild once.
    ///
    /// Every key and id is checked before anything is appended, so a bad
    /// record leaves the catalog unchanged. Returns how many were added.
    pub fn add_bulk<I>(&mut self, records: I) -> Result<usize>
    where
        I: IntoIterator<Item = R>,
    {
        let records: Vec<R> = records.into_iter().collect();
        for record in &records {
            SortKey::new(record.sort_key())?;
        }
        let existing: HashSet<RecordId> = self.records.iter().map(Record::id).collect();
        check_unique_ids(&existing, &records)?;
        let added = records.len();
        self.records.extend(records);
        self.rebuild()?;
        return Ok(added);
    }

    /// The record with this id, if any.
    pub fn get(&self, id: RecordId) -> Option<&R> {
        return self.records.iter().find(|r| r.id() == id);
    }

    /// Remove the record with this id and rebuild.
    pub fn remove(&mut self, id: RecordId) -> Result<Option<R>> {
        let Some(pos) = self.records.iter().position(|r| r.id() == id) else {
            return Ok(None);
        };
        let removed = self.records.remove(pos);
        self.rebuild()?;
        return Ok(Some(removed));
    }

    /// Replace the record that has the same id, keeping its list position.
    ///
    /// Returns false, and changes nothing, when no record has that id.
    pub fn update(&mut self, record: R) -> Result<bool> {
        SortKey::new(record.sort_key())?;
        let id = record.id();
        let Some(slot) = self.records.iter_mut().find(|r| r.id() == id) else {
            return Ok(false);
        };
        *slot = record;
        self.rebuild()?;
        return Ok(true);
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.records.clear();
        self.index = BalancedIndex::new();
        self.optimized = false;
    }

    /// Replace the view with a perfect rebuild. The record list is untouched.
    pub fn optimize(&mut self) {
        let index = std::mem::take(&mut self.index);
        self.index = index.optimize();
        self.optimized = true;
    }

    /// Whether the current view came from [`Catalog::optimize`].
    pub fn is_optimized(&self) -> bool {
        return self.optimized;
    }

    /// Records in insertion order.
    pub fn records(&self) -> &[R] {
        return &self.records;
    }

    /// The current view.
    pub fn index(&self) -> &BalancedIndex<R> {
        return &self.index;
    }

    /// Number of records. Can exceed [`Catalog::node_count`] when records
    /// share both key and tie-break and collapse into one node.
    pub fn len(&self) -> usize {
        return self.records.len();
    }

    /// Number of nodes in the current view.
    pub fn node_count(&self) -> usize {
        return self.index.len();
    }

    pub fn is_empty(&self) -> bool {
        return self.records.is_empty();
    }

    pub fn height(&self) -> u32 {
        return self.index.height();
    }

    fn rebuild(&mut self) -> Result<()> {
        self.index = BalancedIndex::from_records(self.records.iter().cloned())?;
        self.optimized = false;
        tracing::debug!(
            records = self.records.len(),
            nodes = self.index.len(),
            height = self.index.height(),
            "rebuilt index"
        );
        return Ok(());
    }
}

/// Fail on the first id in `records` that is in `existing` or repeats
/// within `records`.
fn check_unique_ids<R: Record>(existing: &HashSet<RecordId>, records: &[R]) -> Result<()> {
    let mut seen = HashSet::new();
    for record in records {
        let id = record.id();
        if existing.contains(&id) || !seen.insert(id) {
            return Err(IndexError::DuplicateId { id });
        }
    }
    return Ok(());
}

impl Catalog<Product> {
    /// Summary figures over the record list.
    pub fn stats(&self) -> CatalogStats {
        return CatalogStats::from_records(&self.records);
    }
}

impl<R: Record + Clone> Default for Catalog<R> {
    fn default() -> Self {
        return Self::new();
    }
}
