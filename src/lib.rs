//! casfs: Content-Addressed Directory Trees as a Read-Only Filesystem
//!
//! Exposes directory manifests stored in a Content Addressable Storage as
//! inode-numbered directories that answer lookup, readdir and readdirplus
//! requests. Manifests are loaded on demand through a `DirectoryContext`,
//! which also owns inode allocation and child instantiation.

pub mod config;
pub mod context;
pub mod digest;
pub mod error;
pub mod fs;
pub mod logging;
pub mod path;
pub mod store;
pub mod tooling;
pub mod tree;
pub mod types;
