//! Error types for casfs.
//!
//! `FsError` is the status returned to the filesystem protocol layer. The
//! richer error types below it describe why a call failed and are logged or
//! reported before being collapsed into an `FsError`.

use crate::fs::EntryKind;
use crate::types::InodeNumber;
use thiserror::Error;

/// Filesystem-level status returned by directory and leaf operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FsError {
    #[error("no such file or directory")]
    NotFound,

    #[error("input/output error")]
    Io,

    #[error("permission denied")]
    PermissionDenied,

    #[error("invalid argument")]
    InvalidArgument,

    #[error("filesystem error (errno {0})")]
    Errno(i32),
}

impl FsError {
    /// POSIX errno value for this status
    pub fn errno(self) -> i32 {
        match self {
            FsError::NotFound => libc::ENOENT,
            FsError::Io => libc::EIO,
            FsError::PermissionDenied => libc::EACCES,
            FsError::InvalidArgument => libc::EINVAL,
            FsError::Errno(errno) => errno,
        }
    }
}

/// Result type for filesystem operations
pub type FsResult<T> = Result<T, FsError>;

/// Errors produced while parsing digests and instance names
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DigestError {
    #[error("no digest provided")]
    Missing,

    #[error("unknown digest hash length: {0} characters")]
    InvalidHashLength(usize),

    #[error("non-hexadecimal character in digest hash: {0:?}")]
    InvalidHashCharacter(char),

    #[error("invalid digest size: {0} bytes")]
    InvalidSize(i64),

    #[error("invalid digest key {0:?}: expected <hash>-<size>")]
    InvalidKey(String),

    #[error("failed to encode content for hashing: {0}")]
    Encoding(String),

    #[error("invalid instance name {name:?}: {reason}")]
    InvalidInstanceName { name: String, reason: String },
}

/// A manifest entry whose digest could not be parsed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to parse digest for {kind} {name:?}")]
pub struct ManifestEntryError {
    pub kind: EntryKind,
    pub name: String,
    #[source]
    pub source: DigestError,
}

/// An inode number is already bound to a different node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("inode {inode_number} is already bound to another node")]
pub struct InodeConflict {
    pub inode_number: InodeNumber,
}

/// Manifest storage errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("manifest not found: {0}")]
    NotFound(String),

    #[error("invalid manifest {digest}: {reason}")]
    InvalidManifest { digest: String, reason: String },

    #[error("storage backend error: {0}")]
    Backend(String),
}

/// Errors surfaced by configuration, logging and the CLI
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Digest(#[from] DigestError),

    #[error(transparent)]
    Inode(#[from] InodeConflict),

    #[error("{path}: {source}")]
    Fs {
        path: String,
        #[source]
        source: FsError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid bundle: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
