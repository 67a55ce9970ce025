//! Read-only filesystem nodes backed by content-addressed manifests

pub mod attr;
pub mod cas_directory;
pub mod node;
pub mod resolve;
pub mod symlink;

pub use attr::{
    DirEntry, EntryKind, FileAttr, IMPLICIT_DIRECTORY_LINK_COUNT, S_IFDIR, S_IFLNK, S_IFREG,
};
pub use cas_directory::{CasDirectory, DirectoryContext, FileFactory};
pub use node::{Child, DirEntryPlus, Directory, Leaf};
pub use resolve::resolve_path;
pub use symlink::Symlink;
