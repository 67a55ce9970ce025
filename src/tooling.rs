//! Tooling & Integration Layer
//!
//! Provides the inspection CLI for browsing manifest bundles through the same
//! directory nodes a filesystem mount would use.

pub mod cli;

pub use cli::{Cli, CliContext, Commands};
