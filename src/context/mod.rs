//! Reference directory context
//!
//! Serves manifests from a `ManifestStore` and assigns inode numbers through
//! an `InodeTable`. Suitable for tests, tooling and single-process mounts;
//! remote fetching, retries and inode eviction are not handled here.

mod cas_tree;
mod file;
mod inode_table;

pub use cas_tree::{CasTree, NodeContext};
pub use file::CasFile;
pub use inode_table::{InodeKey, InodeTable};
