//! Attributes and listing records

use crate::types::InodeNumber;
use std::fmt;

/// Directory type bits
pub const S_IFDIR: u32 = libc::S_IFDIR as u32;
/// Regular file type bits
pub const S_IFREG: u32 = libc::S_IFREG as u32;
/// Symbolic link type bits
pub const S_IFLNK: u32 = libc::S_IFLNK as u32;

/// Link count reported for directories whose number of subdirectories is
/// not known. The true value, 2 plus the number of subdirectories, would
/// require loading the manifest on every attribute request. A link count of
/// 1 tells tools such as find(1) not to derive subdirectory counts from it.
pub const IMPLICIT_DIRECTORY_LINK_COUNT: u32 = 1;

/// Kind of a directory entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Directory,
    RegularFile,
    Symlink,
}

impl EntryKind {
    /// `S_IF*` type bits for this kind
    pub fn type_bits(self) -> u32 {
        match self {
            EntryKind::Directory => S_IFDIR,
            EntryKind::RegularFile => S_IFREG,
            EntryKind::Symlink => S_IFLNK,
        }
    }
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            EntryKind::Directory => "directory",
            EntryKind::RegularFile => "file",
            EntryKind::Symlink => "symlink",
        })
    }
}

/// Attributes of a node, as returned by getattr and lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FileAttr {
    /// Inode number
    pub ino: InodeNumber,
    /// Node type
    pub kind: EntryKind,
    /// Permission bits
    pub perm: u32,
    /// Number of hard links
    pub nlink: u32,
    /// Size in bytes
    pub size: u64,
}

impl FileAttr {
    /// Full mode: type bits combined with permission bits
    pub fn mode(&self) -> u32 {
        self.kind.type_bits() | self.perm
    }
}

/// Plain directory listing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    pub name: String,
    pub ino: InodeNumber,
    pub kind: EntryKind,
}

impl DirEntry {
    pub fn mode(&self) -> u32 {
        self.kind.type_bits()
    }
}
