//! Inode table
//!
//! Hands out stable inode numbers for directory and file digests. The same
//! key always maps to the same number for the lifetime of the table.

use crate::digest::Digest;
use crate::error::InodeConflict;
use crate::types::{InodeNumber, ROOT_INODE_NUMBER};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Identity of a node in the inode table
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InodeKey {
    Directory(Digest),
    /// The executable bit is part of a file's identity
    File { digest: Digest, is_executable: bool },
}

/// Digest → inode number index
pub struct InodeTable {
    inodes: RwLock<HashMap<InodeKey, InodeNumber>>,
    next: AtomicU64,
}

impl Default for InodeTable {
    fn default() -> Self {
        Self::new()
    }
}

impl InodeTable {
    /// Create an empty table. Allocation starts after the root inode.
    pub fn new() -> Self {
        InodeTable {
            inodes: RwLock::new(HashMap::new()),
            next: AtomicU64::new(ROOT_INODE_NUMBER + 1),
        }
    }

    /// Bind a key to a fixed inode number, e.g. the mounted root.
    ///
    /// Re-binding the same pair is a no-op. Fails if the number is held by
    /// another key or the key already has a different number.
    pub fn assign(&self, key: InodeKey, inode_number: InodeNumber) -> Result<(), InodeConflict> {
        let mut inodes = self.inodes.write();
        if let Some(&existing) = inodes.get(&key) {
            if existing == inode_number {
                return Ok(());
            }
            return Err(InodeConflict {
                inode_number: existing,
            });
        }
        if inodes.values().any(|&n| n == inode_number) {
            return Err(InodeConflict { inode_number });
        }
        inodes.insert(key, inode_number);
        Ok(())
    }

    pub fn get(&self, key: &InodeKey) -> Option<InodeNumber> {
        self.inodes.read().get(key).copied()
    }

    /// Return the inode number for a key, allocating one on first use
    pub fn get_or_allocate(&self, key: &InodeKey) -> InodeNumber {
        {
            let inodes = self.inodes.read();
            if let Some(inode_number) = inodes.get(key) {
                return *inode_number;
            }
        }

        // Another thread may have allocated between the two locks
        let mut inodes = self.inodes.write();
        *inodes
            .entry(key.clone())
            .or_insert_with(|| self.next.fetch_add(1, Ordering::Relaxed))
    }

    pub fn len(&self) -> usize {
        self.inodes.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inodes.read().is_empty()
    }
}
