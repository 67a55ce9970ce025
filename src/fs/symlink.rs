//! Symbolic link leaves
//!
//! Targets are stored inline in the manifest, so a symlink needs no backing
//! storage. Its inode number is derived from the target.

use super::attr::{EntryKind, FileAttr};
use super::node::Leaf;
use crate::error::FsResult;
use crate::types::InodeNumber;

/// High bit set on derived inode numbers, keeping them apart from the
/// sequentially allocated ones.
const DERIVED_INODE_FLAG: InodeNumber = 1 << 63;

/// Symbolic link with an inline target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symlink {
    target: String,
}

impl Symlink {
    pub fn new(target: impl Into<String>) -> Self {
        Symlink {
            target: target.into(),
        }
    }

    /// Inode number derived from the BLAKE3 hash of the target
    pub fn inode_number(&self) -> InodeNumber {
        let hash = blake3::hash(self.target.as_bytes());
        let mut bytes = [0u8; 8];
        bytes.copy_from_slice(&hash.as_bytes()[..8]);
        InodeNumber::from_le_bytes(bytes) | DERIVED_INODE_FLAG
    }
}

impl Leaf for Symlink {
    fn get_attr(&self) -> FileAttr {
        FileAttr {
            ino: self.inode_number(),
            kind: EntryKind::Symlink,
            perm: 0o777,
            nlink: 1,
            size: self.target.len() as u64,
        }
    }

    fn readlink(&self) -> FsResult<String> {
        Ok(self.target.clone())
    }
}
