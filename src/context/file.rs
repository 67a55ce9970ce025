//! Regular file leaves backed by CAS blobs. Only attributes are served;
//! reading file contents is left to the transport layer.

use crate::digest::Digest;
use crate::fs::{EntryKind, FileAttr, Leaf};
use crate::types::InodeNumber;

/// Immutable file identified by digest and executable bit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasFile {
    digest: Digest,
    is_executable: bool,
    inode_number: InodeNumber,
}

impl CasFile {
    pub fn new(digest: Digest, is_executable: bool, inode_number: InodeNumber) -> Self {
        CasFile {
            digest,
            is_executable,
            inode_number,
        }
    }
}

impl Leaf for CasFile {
    fn get_attr(&self) -> FileAttr {
        FileAttr {
            ino: self.inode_number,
            kind: EntryKind::RegularFile,
            perm: if self.is_executable { 0o555 } else { 0o444 },
            nlink: 1,
            size: self.digest.size_bytes(),
        }
    }
}
