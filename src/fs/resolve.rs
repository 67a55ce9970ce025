//! Multi-component path resolution on top of single-component lookups

use super::attr::FileAttr;
use super::node::{Child, Directory};
use crate::error::{FsError, FsResult};
use crate::path::Component;
use std::sync::Arc;

/// Resolve a `/`-separated path relative to `root`.
///
/// Empty components are skipped, so `""` and `"/"` resolve to `root` itself.
/// Symbolic links are not followed. Traversing through a leaf fails with
/// `NotFound`.
pub fn resolve_path(root: &Arc<dyn Directory>, path: &str) -> FsResult<(Child, FileAttr)> {
    let mut current = Child::Directory(root.clone());
    let mut attr = root.get_attr();
    for name in path.split('/').filter(|name| !name.is_empty()) {
        let component = Component::new(name)?;
        let directory = match &current {
            Child::Directory(directory) => directory.clone(),
            Child::Leaf(_) => return Err(FsError::NotFound),
        };
        let (child, child_attr) = directory.lookup(&component)?;
        current = child;
        attr = child_attr;
    }
    Ok((current, attr))
}
