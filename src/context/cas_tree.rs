//! Shared tree state and per-directory contexts

use super::file::CasFile;
use super::inode_table::{InodeKey, InodeTable};
use crate::digest::Digest;
use crate::error::{FsError, FsResult, InodeConflict, ManifestEntryError};
use crate::fs::{CasDirectory, Directory, DirectoryContext, FileAttr, FileFactory, Leaf};
use crate::store::ManifestStore;
use crate::tree::TreeManifest;
use crate::types::{InodeNumber, ROOT_INODE_NUMBER};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::error;

/// State shared by every directory of one mounted tree
pub struct CasTree {
    store: Arc<dyn ManifestStore>,
    inodes: InodeTable,
    reported_errors: AtomicU64,
}

impl CasTree {
    pub fn new(store: Arc<dyn ManifestStore>) -> Arc<Self> {
        Arc::new(CasTree {
            store,
            inodes: InodeTable::new(),
            reported_errors: AtomicU64::new(0),
        })
    }

    /// Create the root directory of a mount. It always receives the root
    /// inode number, so a tree has exactly one root digest: asking for a
    /// different one, or for a digest that already has an inode number, fails.
    pub fn root(self: &Arc<Self>, digest: &Digest) -> Result<Arc<dyn Directory>, InodeConflict> {
        self.inodes
            .assign(InodeKey::Directory(digest.clone()), ROOT_INODE_NUMBER)?;
        Ok(self.directory(digest, ROOT_INODE_NUMBER))
    }

    pub fn inodes(&self) -> &InodeTable {
        &self.inodes
    }

    /// Number of malformed manifest entries reported so far
    pub fn reported_errors(&self) -> u64 {
        self.reported_errors.load(Ordering::Relaxed)
    }

    /// Directories hold only their context and inode number, so they are
    /// created on demand instead of being cached. Identity lives in the
    /// inode table.
    fn directory(self: &Arc<Self>, digest: &Digest, inode_number: InodeNumber) -> Arc<dyn Directory> {
        let context = NodeContext {
            tree: self.clone(),
            digest: digest.clone(),
        };
        Arc::new(CasDirectory::new(
            context,
            digest.instance_name().clone(),
            inode_number,
        ))
    }

    fn fetch(&self, digest: &Digest) -> FsResult<Arc<TreeManifest>> {
        match self.store.get(digest) {
            Ok(Some(manifest)) => Ok(manifest),
            Ok(None) => {
                error!(digest = %digest, "Manifest not present in store");
                Err(FsError::Io)
            }
            Err(e) => {
                error!(digest = %digest, error = %e, "Failed to load manifest");
                Err(FsError::Io)
            }
        }
    }
}

/// `DirectoryContext` bound to the manifest of one directory
#[derive(Clone)]
pub struct NodeContext {
    tree: Arc<CasTree>,
    digest: Digest,
}

impl FileFactory for NodeContext {
    fn file_inode_number(&self, digest: &Digest, is_executable: bool) -> InodeNumber {
        self.tree.inodes.get_or_allocate(&InodeKey::File {
            digest: digest.clone(),
            is_executable,
        })
    }

    fn lookup_file(&self, digest: &Digest, is_executable: bool) -> (Arc<dyn Leaf>, FileAttr) {
        let inode_number = self.file_inode_number(digest, is_executable);
        let file = CasFile::new(digest.clone(), is_executable, inode_number);
        let attr = file.get_attr();
        (Arc::new(file), attr)
    }
}

impl DirectoryContext for NodeContext {
    fn fetch_manifest(&self) -> FsResult<Arc<TreeManifest>> {
        self.tree.fetch(&self.digest)
    }

    fn report_error(&self, err: ManifestEntryError) {
        self.tree.reported_errors.fetch_add(1, Ordering::Relaxed);
        error!(
            directory = %self.digest,
            error = %err,
            cause = %err.source,
            "Malformed directory manifest"
        );
    }

    fn directory_inode_number(&self, digest: &Digest) -> InodeNumber {
        self.tree
            .inodes
            .get_or_allocate(&InodeKey::Directory(digest.clone()))
    }

    fn lookup_directory(&self, digest: &Digest) -> (Arc<dyn Directory>, FileAttr) {
        let inode_number = self.directory_inode_number(digest);
        let directory = self.tree.directory(digest, inode_number);
        let attr = directory.get_attr();
        (directory, attr)
    }
}
