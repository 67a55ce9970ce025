//! Node capabilities exposed to the filesystem protocol layer

use super::attr::{DirEntry, FileAttr};
use crate::error::{FsError, FsResult};
use crate::path::Component;
use crate::types::AccessMask;
use std::fmt;
use std::sync::Arc;

/// A directory node
pub trait Directory: Send + Sync {
    /// Check whether the requested access is permitted
    fn access(&self, mask: AccessMask) -> FsResult<()>;

    fn get_attr(&self) -> FileAttr;

    /// Resolve a single path component to a child and its attributes
    fn lookup(&self, name: &Component) -> FsResult<(Child, FileAttr)>;

    /// List entries without instantiating children
    fn read_dir(&self) -> FsResult<Vec<DirEntry>>;

    /// List entries together with live children and their attributes
    fn read_dir_plus(&self) -> FsResult<Vec<DirEntryPlus>>;
}

/// A non-directory node: a regular file or a symbolic link
pub trait Leaf: Send + Sync {
    fn get_attr(&self) -> FileAttr;

    /// Listing record for this leaf under the given name
    fn dir_entry(&self, name: &str) -> DirEntry {
        let attr = self.get_attr();
        DirEntry {
            name: name.to_string(),
            ino: attr.ino,
            kind: attr.kind,
        }
    }

    fn readlink(&self) -> FsResult<String> {
        Err(FsError::InvalidArgument)
    }
}

/// Child of a directory
#[derive(Clone)]
pub enum Child {
    Directory(Arc<dyn Directory>),
    Leaf(Arc<dyn Leaf>),
}

impl Child {
    pub fn get_attr(&self) -> FileAttr {
        match self {
            Child::Directory(directory) => directory.get_attr(),
            Child::Leaf(leaf) => leaf.get_attr(),
        }
    }

    pub fn as_directory(&self) -> Option<&Arc<dyn Directory>> {
        match self {
            Child::Directory(directory) => Some(directory),
            Child::Leaf(_) => None,
        }
    }

    pub fn as_leaf(&self) -> Option<&Arc<dyn Leaf>> {
        match self {
            Child::Directory(_) => None,
            Child::Leaf(leaf) => Some(leaf),
        }
    }
}

impl fmt::Debug for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Child::Directory(directory) => f
                .debug_tuple("Directory")
                .field(&directory.get_attr())
                .finish(),
            Child::Leaf(leaf) => f.debug_tuple("Leaf").field(&leaf.get_attr()).finish(),
        }
    }
}

/// Listing record together with the live child it names
#[derive(Debug, Clone)]
pub struct DirEntryPlus {
    pub entry: DirEntry,
    pub child: Child,
    pub attr: FileAttr,
}
