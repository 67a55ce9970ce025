//! Tree manifest types
//!
//! A manifest describes the children of one directory as three lists:
//! subdirectories, regular files and symbolic links. Each list is sorted by
//! name in byte order and contains unique names. Lookups rely on that
//! ordering and perform binary search instead of building an index.

use crate::digest::WireDigest;
use serde::{Deserialize, Serialize};

/// Subdirectory entry, referring to the child's own manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryEntry {
    pub name: String,
    #[serde(default)]
    pub digest: Option<WireDigest>,
}

/// Regular file entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileEntry {
    pub name: String,
    #[serde(default)]
    pub digest: Option<WireDigest>,
    #[serde(default)]
    pub is_executable: bool,
}

/// Symbolic link entry. Targets are stored inline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymlinkEntry {
    pub name: String,
    pub target: String,
}

/// Entries that can be searched by name
pub trait NamedEntry {
    fn name(&self) -> &str;
}

impl NamedEntry for DirectoryEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntry for FileEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

impl NamedEntry for SymlinkEntry {
    fn name(&self) -> &str {
        &self.name
    }
}

/// Parsed directory manifest
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeManifest {
    #[serde(default)]
    pub directories: Vec<DirectoryEntry>,
    #[serde(default)]
    pub files: Vec<FileEntry>,
    #[serde(default)]
    pub symlinks: Vec<SymlinkEntry>,
}

/// Binary search a sorted entry list for an exact name match.
///
/// Finds the first entry whose name is not less than `name` and returns it
/// if it matches. If the list is not sorted the result is unspecified but
/// the search still terminates.
pub fn search<'a, T: NamedEntry>(entries: &'a [T], name: &str) -> Option<&'a T> {
    let i = entries.partition_point(|entry| entry.name() < name);
    entries.get(i).filter(|entry| entry.name() == name)
}

impl TreeManifest {
    pub fn find_directory(&self, name: &str) -> Option<&DirectoryEntry> {
        search(&self.directories, name)
    }

    pub fn find_file(&self, name: &str) -> Option<&FileEntry> {
        search(&self.files, name)
    }

    pub fn find_symlink(&self, name: &str) -> Option<&SymlinkEntry> {
        search(&self.symlinks, name)
    }

    /// Total number of entries across all three lists
    pub fn len(&self) -> usize {
        self.directories.len() + self.files.len() + self.symlinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check that every list is strictly increasing by name.
    ///
    /// Returns the first offending name. Names shared between lists are not
    /// reported; lookups resolve those in list order.
    pub fn check_sorted(&self) -> Result<(), String> {
        fn check<T: NamedEntry>(entries: &[T], list: &str) -> Result<(), String> {
            match entries
                .windows(2)
                .find(|pair| pair[0].name() >= pair[1].name())
            {
                Some(pair) => Err(format!(
                    "{} entry {:?} is not sorted after {:?}",
                    list,
                    pair[1].name(),
                    pair[0].name()
                )),
                None => Ok(()),
            }
        }
        check(&self.directories, "directory")?;
        check(&self.files, "file")?;
        check(&self.symlinks, "symlink")
    }
}
