//! Content-addressed tree manifests and their digests

pub mod hasher;
pub mod manifest;

pub use manifest::{DirectoryEntry, FileEntry, NamedEntry, SymlinkEntry, TreeManifest};
