//! Directories backed by manifests in the Content Addressable Storage.
//!
//! A `CasDirectory` holds no contents of its own. Every request loads the
//! manifest through its `DirectoryContext`, searches it, and asks the context
//! to hand out inode numbers and child nodes. Because the directory itself
//! never changes after construction, it can serve requests from any number
//! of threads without locking.

use super::attr::{DirEntry, EntryKind, FileAttr, IMPLICIT_DIRECTORY_LINK_COUNT};
use super::node::{Child, DirEntryPlus, Directory, Leaf};
use super::symlink::Symlink;
use crate::digest::{Digest, InstanceName, WireDigest};
use crate::error::{FsError, FsResult, ManifestEntryError};
use crate::path::Component;
use crate::tree::TreeManifest;
use crate::types::{AccessMask, InodeNumber};
use std::sync::Arc;
use tracing::debug;

/// Creation of file leaves and their inode numbers.
///
/// The executable bit is part of a file's identity: the same digest with a
/// different executable bit is a different node.
pub trait FileFactory: Send + Sync {
    /// Inode number of a file, without instantiating it
    fn file_inode_number(&self, digest: &Digest, is_executable: bool) -> InodeNumber;

    /// Instantiate (or fetch the cached instance of) a file leaf
    fn lookup_file(&self, digest: &Digest, is_executable: bool) -> (Arc<dyn Leaf>, FileAttr);
}

/// Everything a `CasDirectory` needs to load its contents and to create
/// inodes for its children.
pub trait DirectoryContext: FileFactory {
    /// Load the manifest of the directory this context is bound to. Failures
    /// already carry the status to return to the caller.
    fn fetch_manifest(&self) -> FsResult<Arc<TreeManifest>>;

    /// Diagnostic sink for malformed manifest entries
    fn report_error(&self, err: ManifestEntryError);

    /// Inode number of a child directory, without instantiating it. Used by
    /// plain directory listings.
    fn directory_inode_number(&self, digest: &Digest) -> InodeNumber;

    /// Instantiate (or fetch the cached instance of) a child directory. Used
    /// by lookups and listings with attributes.
    fn lookup_directory(&self, digest: &Digest) -> (Arc<dyn Directory>, FileAttr);
}

impl<T: FileFactory + ?Sized> FileFactory for Arc<T> {
    fn file_inode_number(&self, digest: &Digest, is_executable: bool) -> InodeNumber {
        (**self).file_inode_number(digest, is_executable)
    }

    fn lookup_file(&self, digest: &Digest, is_executable: bool) -> (Arc<dyn Leaf>, FileAttr) {
        (**self).lookup_file(digest, is_executable)
    }
}

impl<T: DirectoryContext + ?Sized> DirectoryContext for Arc<T> {
    fn fetch_manifest(&self) -> FsResult<Arc<TreeManifest>> {
        (**self).fetch_manifest()
    }

    fn report_error(&self, err: ManifestEntryError) {
        (**self).report_error(err)
    }

    fn directory_inode_number(&self, digest: &Digest) -> InodeNumber {
        (**self).directory_inode_number(digest)
    }

    fn lookup_directory(&self, digest: &Digest) -> (Arc<dyn Directory>, FileAttr) {
        (**self).lookup_directory(digest)
    }
}

/// Immutable directory backed by a manifest stored in the CAS
pub struct CasDirectory<C> {
    context: C,
    instance_name: InstanceName,
    inode_number: InodeNumber,
}

impl<C: DirectoryContext> CasDirectory<C> {
    pub fn new(context: C, instance_name: InstanceName, inode_number: InodeNumber) -> Self {
        CasDirectory {
            context,
            instance_name,
            inode_number,
        }
    }

    pub fn inode_number(&self) -> InodeNumber {
        self.inode_number
    }

    pub fn instance_name(&self) -> &InstanceName {
        &self.instance_name
    }

    /// Parse the digest of a manifest entry, reporting malformed entries to
    /// the context.
    fn parse_digest(
        &self,
        kind: EntryKind,
        name: &str,
        wire: Option<&WireDigest>,
    ) -> FsResult<Digest> {
        self.instance_name
            .new_digest_from_wire(wire)
            .map_err(|source| {
                debug!(
                    inode = self.inode_number,
                    %kind,
                    name,
                    error = %source,
                    "Malformed manifest entry"
                );
                self.context.report_error(ManifestEntryError {
                    kind,
                    name: name.to_string(),
                    source,
                });
                FsError::Io
            })
    }
}

impl<C: DirectoryContext> Directory for CasDirectory<C> {
    fn access(&self, mask: AccessMask) -> FsResult<()> {
        if mask.is_subset_of(AccessMask::READ | AccessMask::EXECUTE) {
            Ok(())
        } else {
            Err(FsError::PermissionDenied)
        }
    }

    fn get_attr(&self) -> FileAttr {
        FileAttr {
            ino: self.inode_number,
            kind: EntryKind::Directory,
            perm: 0o555,
            nlink: IMPLICIT_DIRECTORY_LINK_COUNT,
            size: 0,
        }
    }

    fn lookup(&self, name: &Component) -> FsResult<(Child, FileAttr)> {
        let manifest = self.context.fetch_manifest()?;
        let name = name.as_str();

        // Directories are searched first, so they win if a malformed
        // manifest lists a name more than once.
        if let Some(entry) = manifest.find_directory(name) {
            let digest = self.parse_digest(EntryKind::Directory, name, entry.digest.as_ref())?;
            let (directory, attr) = self.context.lookup_directory(&digest);
            return Ok((Child::Directory(directory), attr));
        }

        if let Some(entry) = manifest.find_file(name) {
            let digest =
                self.parse_digest(EntryKind::RegularFile, name, entry.digest.as_ref())?;
            let (leaf, attr) = self.context.lookup_file(&digest, entry.is_executable);
            return Ok((Child::Leaf(leaf), attr));
        }

        if let Some(entry) = manifest.find_symlink(name) {
            let symlink = Symlink::new(entry.target.as_str());
            let attr = symlink.get_attr();
            return Ok((Child::Leaf(Arc::new(symlink)), attr));
        }

        debug!(inode = self.inode_number, name, "Lookup miss");
        Err(FsError::NotFound)
    }

    fn read_dir(&self) -> FsResult<Vec<DirEntry>> {
        let manifest = self.context.fetch_manifest()?;
        let mut entries = Vec::with_capacity(manifest.len());

        for entry in &manifest.directories {
            let digest =
                self.parse_digest(EntryKind::Directory, &entry.name, entry.digest.as_ref())?;
            entries.push(DirEntry {
                name: entry.name.clone(),
                ino: self.context.directory_inode_number(&digest),
                kind: EntryKind::Directory,
            });
        }

        for entry in &manifest.files {
            let digest =
                self.parse_digest(EntryKind::RegularFile, &entry.name, entry.digest.as_ref())?;
            entries.push(DirEntry {
                name: entry.name.clone(),
                ino: self
                    .context
                    .file_inode_number(&digest, entry.is_executable),
                kind: EntryKind::RegularFile,
            });
        }

        for entry in &manifest.symlinks {
            entries.push(Symlink::new(entry.target.as_str()).dir_entry(&entry.name));
        }

        debug!(inode = self.inode_number, count = entries.len(), "Read directory");
        Ok(entries)
    }

    fn read_dir_plus(&self) -> FsResult<Vec<DirEntryPlus>> {
        let manifest = self.context.fetch_manifest()?;
        let mut entries = Vec::with_capacity(manifest.len());

        for entry in &manifest.directories {
            let digest =
                self.parse_digest(EntryKind::Directory, &entry.name, entry.digest.as_ref())?;
            let (directory, attr) = self.context.lookup_directory(&digest);
            entries.push(DirEntryPlus {
                entry: DirEntry {
                    name: entry.name.clone(),
                    ino: attr.ino,
                    kind: EntryKind::Directory,
                },
                child: Child::Directory(directory),
                attr,
            });
        }

        for entry in &manifest.files {
            let digest =
                self.parse_digest(EntryKind::RegularFile, &entry.name, entry.digest.as_ref())?;
            let (leaf, attr) = self.context.lookup_file(&digest, entry.is_executable);
            entries.push(DirEntryPlus {
                entry: DirEntry {
                    name: entry.name.clone(),
                    ino: attr.ino,
                    kind: EntryKind::RegularFile,
                },
                child: Child::Leaf(leaf),
                attr,
            });
        }

        for entry in &manifest.symlinks {
            let symlink = Symlink::new(entry.target.as_str());
            let attr = symlink.get_attr();
            entries.push(DirEntryPlus {
                entry: symlink.dir_entry(&entry.name),
                child: Child::Leaf(Arc::new(symlink)),
                attr,
            });
        }

        debug!(inode = self.inode_number, count = entries.len(), "Read directory with attributes");
        Ok(entries)
    }
}
