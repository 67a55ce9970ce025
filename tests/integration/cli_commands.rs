use super::support::*;
use casfs::error::{ApiError, FsError};
use casfs::store::ManifestBundle;
use casfs::tooling::cli::{Cli, CliContext, Commands};
use casfs::tree::hasher::compute_manifest_digest;
use casfs::tree::TreeManifest;
use clap::Parser;
use std::io::Write;
use tempfile::NamedTempFile;

/// Bundle with `/a/inner.txt`, `/b`, `/m -> /target`
fn write_bundle() -> NamedTempFile {
    let a = TreeManifest {
        files: vec![file("inner.txt", "inner", false)],
        ..Default::default()
    };
    let a_digest = compute_manifest_digest(&instance(), &a).unwrap();
    let root = TreeManifest {
        directories: vec![dir("a", &a_digest)],
        files: vec![file("b", "bee", false)],
        symlinks: vec![symlink("m", "/target")],
    };
    let root_digest = compute_manifest_digest(&instance(), &root).unwrap();

    let mut bundle = ManifestBundle {
        instance_name: instance(),
        root: root_digest.key(),
        ..Default::default()
    };
    bundle.manifests.insert(a_digest.key(), a);
    bundle.manifests.insert(root_digest.key(), root);

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string(&bundle).unwrap().as_bytes())
        .unwrap();
    file
}

fn context(bundle: &NamedTempFile) -> CliContext {
    CliContext::new(bundle.path().to_path_buf(), None).unwrap()
}

#[test]
fn parse_valid_command_matrix() {
    let cases: Vec<Vec<&str>> = vec![
        vec!["casfs", "--bundle", "tree.json", "ls"],
        vec!["casfs", "--bundle", "tree.json", "ls", "/a", "--plus"],
        vec!["casfs", "--bundle", "tree.json", "stat", "/b"],
        vec!["casfs", "--bundle", "tree.json", "readlink", "/m"],
        vec!["casfs", "--bundle", "tree.json", "access", "/", "rx"],
        vec![
            "casfs", "--bundle", "tree.json", "--log-level", "debug", "ls",
        ],
    ];
    for args in cases {
        assert!(
            Cli::try_parse_from(args.clone()).is_ok(),
            "expected valid parse for args: {args:?}"
        );
    }
    assert!(Cli::try_parse_from(["casfs", "ls"]).is_err());
}

#[test]
fn ls_lists_root_in_kind_order() {
    let bundle = write_bundle();
    let output = context(&bundle)
        .execute(&Commands::Ls {
            path: "/".to_string(),
            plus: false,
        })
        .unwrap();
    let rows: Vec<(&str, &str)> = output
        .lines()
        .map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            (fields[0], fields[2])
        })
        .collect();
    assert_eq!(
        rows,
        vec![("directory", "a"), ("file", "b"), ("symlink", "m")]
    );
}

#[test]
fn ls_plus_includes_modes() {
    let bundle = write_bundle();
    let output = context(&bundle)
        .execute(&Commands::Ls {
            path: "a".to_string(),
            plus: true,
        })
        .unwrap();
    assert!(output.contains("0100444"), "unexpected output: {}", output);
    assert!(output.ends_with("inner.txt"));
}

#[test]
fn stat_and_readlink() {
    let bundle = write_bundle();
    let cli = context(&bundle);
    let stat = cli
        .execute(&Commands::Stat {
            path: "/".to_string(),
        })
        .unwrap();
    assert!(stat.contains("inode: 1"));
    assert!(stat.contains("kind: directory"));

    let target = cli
        .execute(&Commands::Readlink {
            path: "/m".to_string(),
        })
        .unwrap();
    assert_eq!(target, "/target");

    let err = cli
        .execute(&Commands::Readlink {
            path: "/b".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Fs {
            source: FsError::InvalidArgument,
            ..
        }
    ));
}

#[test]
fn access_rejects_write() {
    let bundle = write_bundle();
    let cli = context(&bundle);
    assert_eq!(
        cli.execute(&Commands::Access {
            path: "/".to_string(),
            mask: "rx".to_string(),
        })
        .unwrap(),
        "ok"
    );
    let err = cli
        .execute(&Commands::Access {
            path: "/a".to_string(),
            mask: "w".to_string(),
        })
        .unwrap_err();
    assert!(matches!(
        err,
        ApiError::Fs {
            source: FsError::PermissionDenied,
            ..
        }
    ));
}

#[test]
fn missing_path_is_reported() {
    let bundle = write_bundle();
    let err = context(&bundle)
        .execute(&Commands::Stat {
            path: "/nope".to_string(),
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "/nope: no such file or directory");
}
