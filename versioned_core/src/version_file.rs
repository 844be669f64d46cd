use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use derive_more::Deref;
use derive_more::DerefMut;

use crate::SemVer;
use crate::VersionedError;
use crate::VersionedResult;

/// File name used when no version file path is given.
pub const DEFAULT_VERSION_FILE: &str = "VERSION";

/// A [`SemVer`] bound to the file it was loaded from and will be written to.
///
/// Dereferences to the inner [`SemVer`], so increments are applied directly:
///
/// ```rust,no_run
/// use versioned_core::VersionFile;
///
/// let mut file = VersionFile::load("VERSION").unwrap();
/// file.increment_patch(1);
/// file.write().unwrap();
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deref, DerefMut)]
pub struct VersionFile {
	#[deref]
	#[deref_mut]
	version: SemVer,
	path: PathBuf,
}

impl VersionFile {
	/// Bind `version` to the default `VERSION` path.
	pub fn new(version: SemVer) -> Self {
		Self::with_path(version, DEFAULT_VERSION_FILE)
	}

	pub fn with_path(version: SemVer, path: impl Into<PathBuf>) -> Self {
		Self {
			version,
			path: path.into(),
		}
	}

	/// Parse `text` and bind it to the default `VERSION` path.
	pub fn parse(text: &str) -> VersionedResult<Self> {
		SemVer::parse(text).map(Self::new)
	}

	/// Load the version from the first line of `path`. An empty path falls
	/// back to `VERSION`.
	pub fn load(path: impl AsRef<Path>) -> VersionedResult<Self> {
		let path = resolve_path(path.as_ref());
		let text = read_first_line(&path)?;
		let version = SemVer::parse(&text)?;
		tracing::debug!(path = %path.display(), %version, "loaded version file");

		Ok(Self { version, path })
	}

	/// Create a version file containing [`SemVer::INITIAL`] when nothing
	/// exists at `path`. An existing file is loaded instead, and a malformed
	/// one is reported rather than overwritten. Returns the file and whether
	/// it was created.
	pub fn init(path: impl AsRef<Path>) -> VersionedResult<(Self, bool)> {
		let path = resolve_path(path.as_ref());
		match Self::load(&path) {
			Ok(existing) => return Ok((existing, false)),
			Err(VersionedError::FileRead { source, .. })
				if source.kind() == std::io::ErrorKind::NotFound => {}
			Err(error) => return Err(error),
		}

		let file = Self::with_path(SemVer::INITIAL, path);
		file.write()?;
		Ok((file, true))
	}

	pub fn version(&self) -> SemVer {
		self.version
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn set_path(&mut self, path: impl Into<PathBuf>) {
		self.path = path.into();
	}

	/// Replace the bound file's content with the version string.
	pub fn write(&self) -> VersionedResult<()> {
		std::fs::write(&self.path, self.version.to_string())
			.map_err(|e| VersionedError::write(&self.path, e))?;
		tracing::info!(path = %self.path.display(), version = %self.version, "wrote version file");

		Ok(())
	}
}

fn resolve_path(path: &Path) -> PathBuf {
	if path.as_os_str().is_empty() {
		PathBuf::from(DEFAULT_VERSION_FILE)
	} else {
		path.to_path_buf()
	}
}

fn read_first_line(path: &Path) -> VersionedResult<String> {
	let file = File::open(path).map_err(|e| VersionedError::read(path, e))?;
	let mut reader = BufReader::new(file);
	let mut line = String::new();
	reader
		.read_line(&mut line)
		.map_err(|e| VersionedError::read(path, e))?;

	Ok(line.trim().to_string())
}
