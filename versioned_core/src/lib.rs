//! `versioned_core` is the library behind the `versioned` command line tool.
//! It keeps a semantic version in a plain text file and propagates it, with
//! git branch and commit details, into Go, Python and JavaScript sources.
//! It also maintains license header comments and Markdown tables of contents.
//!
//! ## Modules
//!
//! - [`semver`] holds the `major.minor.patch` value type and its increments.
//! - [`version_file`] reads and writes the one-line version file.
//! - [`metadata`] describes a package and renders its version banner.
//! - [`sync`] rewrites version literals in source files, one [`Dialect`] per
//!   language.
//! - [`vcs`] supplies the branch and commit description recorded by sync.
//! - [`license`] adds and strips license header comments.
//! - [`toc`] regenerates the table of contents of a Markdown file.
//! - [`config`] loads optional defaults from `versioned.toml`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use versioned_core::PackageMetadata;
//! use versioned_core::SourceSync;
//! use versioned_core::SyncConfig;
//! use versioned_core::SyncOptions;
//! use versioned_core::VersionFile;
//!
//! let mut file = VersionFile::load("VERSION").unwrap();
//! file.increment_patch(1);
//! file.write().unwrap();
//!
//! let mut metadata = PackageMetadata::new("demo");
//! metadata.set_version(&file.to_string(), "");
//!
//! let sync = SourceSync::new(&SyncConfig::default());
//! let report = sync
//! 	.sync_file(Path::new("main.go"), &metadata, &SyncOptions::default())
//! 	.unwrap();
//! println!("{}", report.diff());
//! ```

pub use config::*;
pub use error::*;
pub use license::*;
pub use metadata::*;
pub use semver::*;
pub use sync::*;
pub use toc::*;
pub use vcs::*;
pub use version_file::*;

pub mod config;
mod error;
pub(crate) mod files;
pub mod license;
pub mod metadata;
pub mod semver;
pub mod sync;
pub mod toc;
pub mod vcs;
pub mod version_file;

#[cfg(test)]
mod __fixtures;
