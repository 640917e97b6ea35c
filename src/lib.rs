//! Balanced Index - an AVL tree over priced records.
//!
//! # Quick Start
//!
//! ```
//! use balanced_index::record::Product;
//! use balanced_index::tree::BalancedIndex;
//!
//! let mut index = BalancedIndex::new();
//! for (id, price) in [250.0, 120.0, 800.0, 15.0, 5.0].into_iter().enumerate() {
//!     index.insert(Product::new(id as u64, format!("item {}", id), price, 1, "")).unwrap();
//! }
//!
//! let prices: Vec<f64> = index.iter().map(|p| p.price).collect();
//! assert_eq!(prices, vec![5.0, 15.0, 120.0, 250.0, 800.0]);
//! assert_eq!(index.height(), 3);
//! ```
//!
//! The index is a derived view. [`catalog::Catalog`] keeps the record list
//! and rebuilds the tree from it on every change; [`bench::BenchmarkHarness`]
//! measures the tree against a flat list on synthetic data.

pub mod bench;
pub mod catalog;
pub mod config;
pub mod error;
pub mod key;
pub mod record;
pub mod stats;
pub mod tree;

pub use error::IndexError;
pub use error::Result;
