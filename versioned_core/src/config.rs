use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::VersionedError;
use crate::VersionedResult;
use crate::version_file::DEFAULT_VERSION_FILE;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"versioned.toml",
	".versioned.toml",
	".config/versioned.toml",
];

/// Go module path whose import marks a file as using the package manager.
pub const DEFAULT_GO_MODULE: &str = "github.com/greenpau/versioned";

/// Constructor call expected inside the Go `init()` function.
pub const DEFAULT_GO_CONSTRUCTOR: &str = "versioned.NewPackageManager";

/// Markdown file whose table of contents is updated by default.
pub const DEFAULT_TOC_FILE: &str = "README.md";

/// Configuration loaded from a `versioned.toml` file.
///
/// ```toml
/// source = "VERSION"
/// factor = 1
///
/// [sync]
/// go_module = "github.com/greenpau/versioned"
/// go_constructor = "versioned.NewPackageManager"
///
/// [license]
/// type = "apache"
/// holder = "Jane Doe"
///
/// [toc]
/// file = "README.md"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VersionedConfig {
	/// Path of the version file, relative to the project root.
	#[serde(default)]
	pub source: Option<PathBuf>,
	/// Default increment step for `bump`.
	#[serde(default)]
	pub factor: Option<u64>,
	#[serde(default)]
	pub sync: SyncConfig,
	#[serde(default)]
	pub license: LicenseConfig,
	#[serde(default)]
	pub toc: TocConfig,
}

/// Markers used when synchronizing Go sources.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SyncConfig {
	#[serde(default = "default_go_module")]
	pub go_module: String,
	#[serde(default = "default_go_constructor")]
	pub go_constructor: String,
}

impl Default for SyncConfig {
	fn default() -> Self {
		Self {
			go_module: default_go_module(),
			go_constructor: default_go_constructor(),
		}
	}
}

fn default_go_module() -> String {
	DEFAULT_GO_MODULE.to_string()
}

fn default_go_constructor() -> String {
	DEFAULT_GO_CONSTRUCTOR.to_string()
}

/// Defaults for `license add` and `license strip`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LicenseConfig {
	#[serde(default, rename = "type")]
	pub license_type: Option<String>,
	#[serde(default)]
	pub holder: Option<String>,
	#[serde(default)]
	pub year: Option<u64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TocConfig {
	#[serde(default)]
	pub file: Option<PathBuf>,
}

impl VersionedConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> VersionedResult<Option<Self>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)
			.map_err(|e| VersionedError::read(&config_path, e))?;
		let config = Self::parse(&content)?;
		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	pub fn parse(content: &str) -> VersionedResult<Self> {
		toml::from_str(content).map_err(|e| VersionedError::ConfigParse(e.to_string()))
	}

	/// The version file path, relative to the project root.
	pub fn source_path(&self) -> PathBuf {
		self.source
			.clone()
			.unwrap_or_else(|| PathBuf::from(DEFAULT_VERSION_FILE))
	}

	pub fn toc_path(&self) -> PathBuf {
		self.toc
			.file
			.clone()
			.unwrap_or_else(|| PathBuf::from(DEFAULT_TOC_FILE))
	}
}
