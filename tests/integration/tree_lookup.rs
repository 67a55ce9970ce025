use super::support::*;
use casfs::context::{CasTree, InodeKey};
use casfs::error::FsError;
use casfs::fs::{resolve_path, Child, EntryKind, S_IFDIR, S_IFREG};
use casfs::store::{InMemoryManifestStore, ManifestStore};
use casfs::tree::TreeManifest;
use casfs::types::{AccessMask, ROOT_INODE_NUMBER};
use std::sync::Arc;
use std::thread;

#[test]
fn root_has_root_inode_and_directory_mode() {
    let (fixture, _) = example_fixture();
    let attr = fixture.root.get_attr();
    assert_eq!(attr.ino, ROOT_INODE_NUMBER);
    assert_eq!(attr.mode(), S_IFDIR | 0o555);
    assert!(fixture.root.access(AccessMask::READ).is_ok());
    assert_eq!(
        fixture.root.access(AccessMask::WRITE),
        Err(FsError::PermissionDenied)
    );
}

#[test]
fn lookup_file_is_backed_by_its_digest() {
    let (fixture, _) = example_fixture();
    let (child, attr) = fixture.root.lookup(&component("b")).unwrap();
    assert!(matches!(child, Child::Leaf(_)));
    assert_eq!(attr.mode(), S_IFREG | 0o444);
    assert_eq!(attr.size, 3);

    let key = InodeKey::File {
        digest: content_digest("bee"),
        is_executable: false,
    };
    assert_eq!(fixture.tree.inodes().get(&key), Some(attr.ino));
}

#[test]
fn lookup_executable_file() {
    let (fixture, _) = example_fixture();
    let (_, attr) = fixture.root.lookup(&component("z")).unwrap();
    assert_eq!(attr.perm, 0o555);
}

#[test]
fn lookup_missing_name_is_not_found() {
    let (fixture, _) = example_fixture();
    assert_eq!(
        fixture.root.lookup(&component("q")).unwrap_err(),
        FsError::NotFound
    );
    assert_eq!(fixture.tree.reported_errors(), 0);
}

#[test]
fn lookup_directory_then_descend() {
    let (fixture, a) = example_fixture();
    let (child, attr) = fixture.root.lookup(&component("a")).unwrap();
    assert_eq!(attr.kind, EntryKind::Directory);
    assert_eq!(
        fixture.tree.inodes().get(&InodeKey::Directory(a)),
        Some(attr.ino)
    );

    let directory = child.as_directory().unwrap();
    assert_eq!(directory.get_attr().ino, attr.ino);
    let names: Vec<String> = directory
        .read_dir()
        .unwrap()
        .into_iter()
        .map(|e| e.name)
        .collect();
    assert_eq!(names, vec!["deep", "inner.txt"]);
}

#[test]
fn resolve_nested_paths() {
    let (fixture, _) = example_fixture();
    let (_, attr) = resolve_path(&fixture.root, "/a/deep").unwrap();
    assert_eq!(attr.kind, EntryKind::Directory);

    let (_, attr) = resolve_path(&fixture.root, "a/inner.txt").unwrap();
    assert_eq!(attr.kind, EntryKind::RegularFile);

    let (_, attr) = resolve_path(&fixture.root, "/").unwrap();
    assert_eq!(attr.ino, ROOT_INODE_NUMBER);

    assert_eq!(
        resolve_path(&fixture.root, "b/anything").unwrap_err(),
        FsError::NotFound
    );
    assert_eq!(
        resolve_path(&fixture.root, "a/../b").unwrap_err(),
        FsError::InvalidArgument
    );
}

#[test]
fn inode_numbers_are_stable_across_requests() {
    let (fixture, _) = example_fixture();
    for name in ["a", "b", "m", "z"] {
        let first = fixture.root.lookup(&component(name)).unwrap().1.ino;
        let second = fixture.root.lookup(&component(name)).unwrap().1.ino;
        assert_eq!(first, second, "inode of {} changed", name);
    }
}

#[test]
fn identical_subtrees_share_an_inode() {
    let store = Arc::new(InMemoryManifestStore::new());
    let shared = store.insert(&instance(), TreeManifest::default()).unwrap();
    let fixture = Fixture::mount(
        store,
        TreeManifest {
            directories: vec![dir("one", &shared), dir("two", &shared)],
            files: vec![file("x", "same", false), file("y", "same", true)],
            symlinks: vec![],
        },
    );
    let one = fixture.root.lookup(&component("one")).unwrap().1;
    let two = fixture.root.lookup(&component("two")).unwrap().1;
    assert_eq!(one.ino, two.ino);

    // Same content with a different executable bit is a different file
    let x = fixture.root.lookup(&component("x")).unwrap().1;
    let y = fixture.root.lookup(&component("y")).unwrap().1;
    assert_ne!(x.ino, y.ino);
}

#[test]
fn missing_manifest_surfaces_as_io_error() {
    let store = Arc::new(InMemoryManifestStore::new());
    let absent = content_digest("no such manifest");
    let fixture = Fixture::mount(
        store,
        TreeManifest {
            directories: vec![dir("gone", &absent)],
            ..Default::default()
        },
    );
    // Lookup of the entry itself succeeds; its contents cannot be loaded
    let (child, _) = fixture.root.lookup(&component("gone")).unwrap();
    let directory = child.as_directory().unwrap();
    assert_eq!(directory.read_dir().unwrap_err(), FsError::Io);
    assert_eq!(
        directory.lookup(&component("x")).unwrap_err(),
        FsError::Io
    );
    // The store returned nothing; no entry was malformed
    assert_eq!(fixture.tree.reported_errors(), 0);
}

#[test]
fn malformed_directory_digest_is_reported_once_per_request() {
    let store = Arc::new(InMemoryManifestStore::new());
    let mut root = TreeManifest {
        directories: vec![dir("a", &content_digest("x"))],
        ..Default::default()
    };
    root.directories[0].digest = malformed_digest();
    let fixture = Fixture::mount(store, root);

    assert_eq!(
        fixture.root.lookup(&component("a")).unwrap_err(),
        FsError::Io
    );
    assert_eq!(fixture.tree.reported_errors(), 1);
    assert_eq!(fixture.root.read_dir_plus().unwrap_err(), FsError::Io);
    assert_eq!(fixture.tree.reported_errors(), 2);
}

#[test]
fn concurrent_requests_agree() {
    let (fixture, _) = example_fixture();
    let root = fixture.root.clone();
    let expected = root.read_dir().unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let root = root.clone();
            thread::spawn(move || {
                let listing = root.read_dir().unwrap();
                let looked_up: Vec<u64> = ["a", "b", "m", "z"]
                    .iter()
                    .map(|name| root.lookup(&component(name)).unwrap().1.ino)
                    .collect();
                (listing, looked_up)
            })
        })
        .collect();

    for handle in handles {
        let (listing, looked_up) = handle.join().unwrap();
        assert_eq!(listing, expected);
        let by_name = |name: &str| expected.iter().find(|e| e.name == name).unwrap().ino;
        assert_eq!(
            looked_up,
            vec![by_name("a"), by_name("b"), by_name("m"), by_name("z")]
        );
    }
}

#[test]
fn trees_are_independent() {
    let (fixture, _) = example_fixture();
    let store: Arc<dyn ManifestStore> = fixture.store.clone();
    let other = CasTree::new(store);
    let other_root = other.root(&fixture.root_digest).unwrap();
    assert_eq!(other_root.read_dir().unwrap().len(), 4);
    assert_eq!(other.inodes().len(), 1 + 3);
}
