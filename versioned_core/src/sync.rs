//! Reconcile version metadata embedded in source files with a
//! [`PackageMetadata`] snapshot.
//!
//! Each supported source convention is a [`Dialect`]. Dialects scan the file
//! line by line, locate the declaration they understand and rewrite only the
//! literals that differ from the snapshot. Every other byte of the file,
//! including its line endings, is copied through unchanged.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;

use similar::TextDiff;

use crate::PackageMetadata;
use crate::VersionedError;
use crate::VersionedResult;
use crate::config::SyncConfig;
use crate::files::read_regular_file;
use crate::files::write_with_permissions;

pub use self::go::GoDialect;
pub use self::javascript::JavaScriptDialect;
pub use self::python::PythonDialect;

mod go;
mod javascript;
mod python;

/// The source conventions understood by [`SourceSync`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DialectKind {
	Go,
	Python,
	JavaScript,
}

impl DialectKind {
	/// Parse an explicit `--format` value.
	pub fn from_format(format: &str) -> Option<Self> {
		match format.trim().to_ascii_lowercase().as_str() {
			"go" | "golang" => Some(Self::Go),
			"py" | "python" => Some(Self::Python),
			"js" | "javascript" | "ts" | "typescript" => Some(Self::JavaScript),
			_ => None,
		}
	}

	/// File extensions (without the dot) handled by this dialect.
	pub fn extensions(self) -> &'static [&'static str] {
		match self {
			Self::Go => &["go"],
			Self::Python => &["py"],
			Self::JavaScript => &["js", "ts", "mjs", "cjs", "jsx", "tsx"],
		}
	}

	pub fn from_path(path: &Path) -> Option<Self> {
		let extension = path.extension()?.to_str()?;
		[Self::Go, Self::Python, Self::JavaScript]
			.into_iter()
			.find(|kind| kind.extensions().contains(&extension))
	}

	pub fn name(self) -> &'static str {
		match self {
			Self::Go => "go",
			Self::Python => "python",
			Self::JavaScript => "javascript",
		}
	}
}

impl fmt::Display for DialectKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// The outcome of rewriting a file's content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
	/// The full replacement text.
	pub content: String,
	/// Whether any byte differs from the input.
	pub changed: bool,
	/// The version literal found in the file.
	pub previous_version: Option<String>,
}

/// A source convention for embedding version metadata.
pub trait Dialect {
	fn kind(&self) -> DialectKind;

	/// Whether this dialect handles `path`, judged by its extension.
	fn applies_to(&self, path: &Path) -> bool {
		DialectKind::from_path(path) == Some(self.kind())
	}

	/// Rewrite `content` so its version declaration matches `metadata`.
	/// `path` is only used to describe errors.
	fn rewrite(
		&self,
		path: &Path,
		content: &str,
		metadata: &PackageMetadata,
	) -> VersionedResult<Rewrite>;
}

/// Options for [`SourceSync::sync_file`].
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
	/// Force a dialect instead of choosing one from the file extension.
	pub format: Option<String>,
	/// Compute the result without writing the file.
	pub dry_run: bool,
}

/// The result of synchronizing one file.
#[derive(Debug, Clone)]
pub struct SyncReport {
	pub path: PathBuf,
	pub dialect: DialectKind,
	pub original: String,
	pub updated: String,
	pub previous_version: Option<String>,
	/// Whether the updated content was written to disk.
	pub written: bool,
}

impl SyncReport {
	pub fn changed(&self) -> bool {
		self.original != self.updated
	}

	/// A unified diff between the original and updated content.
	pub fn diff(&self) -> String {
		let name = self.path.display().to_string();
		TextDiff::from_lines(&self.original, &self.updated)
			.unified_diff()
			.header(&name, &name)
			.to_string()
	}
}

/// A registry of dialects, selected per file by extension or explicit format.
pub struct SourceSync {
	dialects: Vec<Box<dyn Dialect>>,
}

impl Default for SourceSync {
	fn default() -> Self {
		Self::new(&SyncConfig::default())
	}
}

impl SourceSync {
	/// The built-in Go, Python and JavaScript/TypeScript dialects.
	pub fn new(config: &SyncConfig) -> Self {
		Self {
			dialects: vec![
				Box::new(GoDialect::new(&config.go_module, &config.go_constructor)),
				Box::new(PythonDialect),
				Box::new(JavaScriptDialect),
			],
		}
	}

	/// Add a dialect. Later registrations take precedence.
	pub fn register(&mut self, dialect: Box<dyn Dialect>) {
		self.dialects.insert(0, dialect);
	}

	/// Choose the dialect for `path`. An explicit `format` wins over the file
	/// extension.
	pub fn resolve(&self, path: &Path, format: Option<&str>) -> VersionedResult<&dyn Dialect> {
		let unsupported = |extension: String| {
			VersionedError::UnsupportedFormat {
				path: path.display().to_string(),
				extension,
			}
		};

		let found = match format.filter(|f| !f.is_empty()) {
			Some(format) => {
				let kind =
					DialectKind::from_format(format).ok_or_else(|| unsupported(format.to_string()))?;
				self.dialects.iter().find(|d| d.kind() == kind)
			}
			None => self.dialects.iter().find(|d| d.applies_to(path)),
		};

		found.map(|dialect| dialect.as_ref()).ok_or_else(|| {
			unsupported(
				path.extension()
					.map(|e| format!(".{}", e.to_string_lossy()))
					.unwrap_or_default(),
			)
		})
	}

	/// Reconcile `path` with `metadata`, writing the file only when something
	/// changed. Permission bits are preserved.
	pub fn sync_file(
		&self,
		path: &Path,
		metadata: &PackageMetadata,
		options: &SyncOptions,
	) -> VersionedResult<SyncReport> {
		let dialect = self.resolve(path, options.format.as_deref())?;
		let (original, permissions) = read_regular_file(path)?;
		let rewrite = dialect.rewrite(path, &original, metadata)?;
		tracing::debug!(
			path = %path.display(),
			dialect = %dialect.kind(),
			changed = rewrite.changed,
			"scanned source file"
		);

		let written = rewrite.changed && !options.dry_run;
		if written {
			write_with_permissions(path, &rewrite.content, permissions)?;
			tracing::info!(path = %path.display(), version = %metadata.version, "synchronized source file");
		}

		Ok(SyncReport {
			path: path.to_path_buf(),
			dialect: dialect.kind(),
			original,
			updated: rewrite.content,
			previous_version: rewrite.previous_version,
			written,
		})
	}
}

/// Split a line produced by `split_inclusive('\n')` into its body and its
/// original line ending.
pub(crate) fn split_line_ending(line: &str) -> (&str, &str) {
	if let Some(body) = line.strip_suffix("\r\n") {
		(body, "\r\n")
	} else if let Some(body) = line.strip_suffix('\n') {
		(body, "\n")
	} else {
		(line, "")
	}
}
