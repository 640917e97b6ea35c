//! The AVL index.
//!
//! - [`node`]: nodes, rotations, insertion, search and invariant checks
//! - [`optimize`]: perfect rebuild by median selection
//! - [`render`]: Mermaid and text dumps for display layers
//! - [`index`]: [`BalancedIndex`], an owning handle that validates keys

pub mod index;
pub mod node;
pub mod optimize;
pub mod render;

pub use index::BalancedIndex;
pub use index::Inserted;
pub use node::Node;
