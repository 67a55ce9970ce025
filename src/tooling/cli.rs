//! CLI Tooling
//!
//! Command-line interface for inspecting a manifest bundle. Every command
//! resolves paths and lists directories through `CasDirectory`, so the output
//! matches what a mount of the same tree would show.

use crate::config::{CasFsConfig, ConfigLoader};
use crate::context::CasTree;
use crate::error::{ApiError, FsError};
use crate::fs::{resolve_path, Child, DirEntry, Directory, FileAttr};
use crate::store::{InMemoryManifestStore, ManifestBundle};
use crate::types::AccessMask;
use clap::{Parser, Subcommand};
use std::fmt::Write;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// casfs CLI - Browse content-addressed directory trees
#[derive(Parser)]
#[command(name = "casfs")]
#[command(about = "Browse content-addressed directory trees as a read-only filesystem")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Manifest bundle (JSON) containing the tree to inspect
    #[arg(long)]
    pub bundle: PathBuf,

    /// Configuration file path
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// List a directory
    Ls {
        /// Path relative to the root of the tree
        #[arg(default_value = "/")]
        path: String,
        /// Include attributes of every entry
        #[arg(long)]
        plus: bool,
    },
    /// Show attributes of a node
    Stat { path: String },
    /// Print the target of a symbolic link
    Readlink { path: String },
    /// Check access to a node with a mask of r, w and x letters
    Access { path: String, mask: String },
}

/// CLI execution context: the loaded tree and its root directory
pub struct CliContext {
    tree: Arc<CasTree>,
    root: Arc<dyn Directory>,
}

impl CliContext {
    /// Load configuration and the manifest bundle
    pub fn new(bundle_path: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = ConfigLoader::load(config_path.as_deref())?;
        Self::with_config(bundle_path, &config)
    }

    pub fn with_config(bundle_path: PathBuf, config: &CasFsConfig) -> Result<Self, ApiError> {
        let mut bundle = ManifestBundle::from_file(&bundle_path)?;
        if !config.instance_name.is_empty() {
            bundle.instance_name = config.instance_name()?;
        }
        let store = Arc::new(InMemoryManifestStore::with_validation(
            config.validate_manifests,
        ));
        let root_digest = bundle.load_into(store.as_ref())?;
        let tree = CasTree::new(store);
        let root = tree.root(&root_digest)?;
        info!(bundle = %bundle_path.display(), root = %root_digest, "Opened tree");
        Ok(CliContext { tree, root })
    }

    pub fn tree(&self) -> &Arc<CasTree> {
        &self.tree
    }

    /// Execute a CLI command
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        match command {
            Commands::Ls { path, plus } => self.list(path, *plus),
            Commands::Stat { path } => {
                let (_, attr) = self.resolve(path)?;
                Ok(format_attr(&attr))
            }
            Commands::Readlink { path } => {
                let (child, _) = self.resolve(path)?;
                match child {
                    Child::Leaf(leaf) => leaf.readlink().map_err(|e| fs_error(path, e)),
                    Child::Directory(_) => Err(fs_error(path, FsError::InvalidArgument)),
                }
            }
            Commands::Access { path, mask } => {
                let mask = AccessMask::from_letters(mask).ok_or_else(|| {
                    ApiError::ConfigError(format!("Invalid access mask {:?}", mask))
                })?;
                let (child, attr) = self.resolve(path)?;
                let result = match child {
                    Child::Directory(directory) => directory.access(mask),
                    Child::Leaf(_) => leaf_access(&attr, mask),
                };
                result.map_err(|e| fs_error(path, e))?;
                Ok("ok".to_string())
            }
        }
    }

    fn resolve(&self, path: &str) -> Result<(Child, FileAttr), ApiError> {
        resolve_path(&self.root, path).map_err(|e| fs_error(path, e))
    }

    fn list(&self, path: &str, plus: bool) -> Result<String, ApiError> {
        let (child, attr) = self.resolve(path)?;
        let directory = match child {
            Child::Directory(directory) => directory,
            Child::Leaf(leaf) => {
                let name = path.rsplit('/').find(|s| !s.is_empty()).unwrap_or(path);
                let entry = leaf.dir_entry(name);
                return Ok(if plus {
                    format_entry_plus(&entry, &attr)
                } else {
                    format_entry(&entry)
                });
            }
        };

        let mut output = String::new();
        if plus {
            let entries = directory.read_dir_plus().map_err(|e| fs_error(path, e))?;
            for entry in &entries {
                let _ = writeln!(output, "{}", format_entry_plus(&entry.entry, &entry.attr));
            }
        } else {
            let entries = directory.read_dir().map_err(|e| fs_error(path, e))?;
            for entry in &entries {
                let _ = writeln!(output, "{}", format_entry(entry));
            }
        }
        Ok(output.trim_end().to_string())
    }
}

fn fs_error(path: &str, source: FsError) -> ApiError {
    ApiError::Fs {
        path: path.to_string(),
        source,
    }
}

/// Leaves are never writable; read and execute follow the permission bits
fn leaf_access(attr: &FileAttr, mask: AccessMask) -> Result<(), FsError> {
    let mut allowed = AccessMask::default();
    if attr.perm & 0o4 != 0 {
        allowed = allowed | AccessMask::READ;
    }
    if attr.perm & 0o1 != 0 {
        allowed = allowed | AccessMask::EXECUTE;
    }
    if mask.is_subset_of(allowed) {
        Ok(())
    } else {
        Err(FsError::PermissionDenied)
    }
}

fn format_entry(entry: &DirEntry) -> String {
    format!("{:<9} {:>20} {}", entry.kind, entry.ino, entry.name)
}

fn format_entry_plus(entry: &DirEntry, attr: &FileAttr) -> String {
    format!(
        "{:<9} {:>20} {:07o} {:>3} {:>10} {}",
        entry.kind,
        entry.ino,
        attr.mode(),
        attr.nlink,
        attr.size,
        entry.name
    )
}

fn format_attr(attr: &FileAttr) -> String {
    format!(
        "inode: {}\nkind: {}\nmode: {:07o}\nlinks: {}\nsize: {}",
        attr.ino,
        attr.kind,
        attr.mode(),
        attr.nlink,
        attr.size
    )
}
