//! Property tests relating lookup, read_dir and read_dir_plus

use super::support::*;
use casfs::error::FsError;
use casfs::fs::{Directory, EntryKind};
use casfs::store::InMemoryManifestStore;
use casfs::tree::TreeManifest;
use casfs::types::AccessMask;
use proptest::prelude::*;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Sorted, unique names drawn from a small alphabet so that the three lists
/// frequently share names.
fn names() -> impl Strategy<Value = BTreeSet<String>> {
    prop::collection::btree_set("[a-d]{1,2}", 0..6)
}

fn manifests() -> impl Strategy<Value = TreeManifest> {
    (names(), names(), names(), prop::collection::vec(any::<bool>(), 6)).prop_map(
        |(directories, files, symlinks, executable)| {
            let empty = content_digest("");
            TreeManifest {
                directories: directories.iter().map(|n| dir(n, &empty)).collect(),
                files: files
                    .iter()
                    .zip(executable.iter().cycle())
                    .map(|(n, x)| file(n, n, *x))
                    .collect(),
                symlinks: symlinks
                    .iter()
                    .map(|n| symlink(n, &format!("target-{}", n)))
                    .collect(),
            }
        },
    )
}

fn mount(manifest: TreeManifest) -> Arc<dyn Directory> {
    Fixture::mount(Arc::new(InMemoryManifestStore::new()), manifest).root
}

/// Expected kind of a name by scanning directories, files and symlinks in
/// that order.
fn linear_scan(manifest: &TreeManifest, name: &str) -> Option<EntryKind> {
    if manifest.directories.iter().any(|e| e.name == name) {
        Some(EntryKind::Directory)
    } else if manifest.files.iter().any(|e| e.name == name) {
        Some(EntryKind::RegularFile)
    } else if manifest.symlinks.iter().any(|e| e.name == name) {
        Some(EntryKind::Symlink)
    } else {
        None
    }
}

proptest! {
    #[test]
    fn lookup_matches_linear_scan(manifest in manifests(), name in "[a-e]{1,2}") {
        let root = mount(manifest.clone());
        match (linear_scan(&manifest, &name), root.lookup(&component(&name))) {
            (Some(kind), Ok((_, attr))) => prop_assert_eq!(attr.kind, kind),
            (None, Err(err)) => prop_assert_eq!(err, FsError::NotFound),
            (expected, actual) => prop_assert!(
                false,
                "name {:?}: expected {:?}, got {:?}",
                name,
                expected,
                actual.map(|(_, attr)| attr)
            ),
        }
    }

    #[test]
    fn lookup_resolves_to_first_listed_entry(manifest in manifests()) {
        let root = mount(manifest);
        let listing = root.read_dir().unwrap();
        for entry in &listing {
            let first = listing.iter().find(|e| e.name == entry.name).unwrap();
            let (_, attr) = root.lookup(&component(&entry.name)).unwrap();
            prop_assert_eq!(attr.ino, first.ino);
            prop_assert_eq!(attr.kind, first.kind);
        }
    }

    #[test]
    fn read_dir_plus_agrees_with_read_dir(manifest in manifests()) {
        let root = mount(manifest);
        let plain = root.read_dir().unwrap();
        let plus = root.read_dir_plus().unwrap();
        prop_assert_eq!(plain.len(), plus.len());
        for (entry, plus) in plain.iter().zip(&plus) {
            prop_assert_eq!(entry, &plus.entry);
            prop_assert_eq!(entry.ino, plus.attr.ino);
        }
    }

    #[test]
    fn access_allows_exactly_read_and_execute(bits in 0u32..64) {
        let root = mount(TreeManifest::default());
        let allowed = AccessMask::READ | AccessMask::EXECUTE;
        let result = root.access(AccessMask::from_bits(bits));
        if bits & !allowed.bits() == 0 {
            prop_assert!(result.is_ok());
        } else {
            prop_assert_eq!(result, Err(FsError::PermissionDenied));
        }
    }
}
