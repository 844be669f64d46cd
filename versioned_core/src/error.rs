use miette::Diagnostic;
use thiserror::Error;

/// Broad grouping of [`VersionedError`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
	/// The caller supplied malformed input (version text, options, headings).
	InputValidation,
	/// Opening, reading, writing or inspecting a file failed.
	FileAccess,
	/// The file type or requested format is not supported.
	UnsupportedFormat,
	/// A file does not contain the markers an operation relies on.
	StructuralMismatch,
	/// A collaborator outside the engine failed (git, config, templates).
	External,
}

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum VersionedError {
	#[error("empty string")]
	#[diagnostic(code(versioned::empty_input))]
	EmptyInput,

	#[error("version must be in major.minor.patch format: `{0}`")]
	#[diagnostic(
		code(versioned::malformed_version),
		help("a version is three dot-separated integers, e.g. `1.0.0`")
	)]
	MalformedVersion(String),

	#[error("failed to parse major version: `{0}`")]
	#[diagnostic(code(versioned::invalid_major))]
	InvalidMajor(String),

	#[error("failed to parse minor version: `{0}`")]
	#[diagnostic(code(versioned::invalid_minor))]
	InvalidMinor(String),

	#[error("failed to parse patch version: `{0}`")]
	#[diagnostic(code(versioned::invalid_patch))]
	InvalidPatch(String),

	#[error("invalid license option: {0}")]
	#[diagnostic(code(versioned::invalid_license_option))]
	InvalidLicenseOption(String),

	#[error("invalid heading: {0}")]
	#[diagnostic(
		code(versioned::invalid_heading),
		help("headings start with one or more `#` followed by a space and a title")
	)]
	InvalidHeading(String),

	#[error("heading hopped more than one level: {current} (current) vs. {previous} (previous)")]
	#[diagnostic(
		code(versioned::heading_level_skipped),
		help("nest headings one level at a time, e.g. `##` then `###`")
	)]
	HeadingLevelSkipped { previous: usize, current: usize },

	#[error("error reading {path} file: {source}")]
	#[diagnostic(code(versioned::file_read))]
	FileRead {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("error writing {path} file: {source}")]
	#[diagnostic(code(versioned::file_write))]
	FileWrite {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("path {0} is not a file")]
	#[diagnostic(code(versioned::not_a_file))]
	NotAFile(String),

	#[error("file {path} has unsupported file extension `{extension}`")]
	#[diagnostic(
		code(versioned::unsupported_format),
		help("pass `--format` with one of: go, py, python, js, javascript, ts, typescript")
	)]
	UnsupportedFormat { path: String, extension: String },

	#[error("license type `{0}` is unsupported")]
	#[diagnostic(
		code(versioned::unsupported_license),
		help("supported license types: apache, asl, mit, gpl3")
	)]
	UnsupportedLicense(String),

	#[error("package {module} not found in {path}")]
	#[diagnostic(
		code(versioned::package_not_referenced),
		help("import the package in the file, see https://github.com/greenpau/versioned#package-metadata")
	)]
	PackageNotReferenced { path: String, module: String },

	#[error("package {module} is not initialized in {path}")]
	#[diagnostic(
		code(versioned::package_not_initialized),
		help(
			"construct the package manager inside `func init() {{ ... }}`, see \
			 https://github.com/greenpau/versioned#package-metadata"
		)
	)]
	PackageNotInitialized { path: String, module: String },

	#[error("version field `{marker}` not found in {path}")]
	#[diagnostic(
		code(versioned::version_field_not_found),
		help("see https://github.com/greenpau/versioned#package-metadata")
	)]
	VersionFieldNotFound { path: String, marker: String },

	#[error("found license header mismatch in {path}\n>>>got:\n{found}\n>>>expected:\n{expected}")]
	#[diagnostic(
		code(versioned::license_mismatch),
		help("strip the existing header first or pass the matching license type and holder")
	)]
	LicenseMismatch {
		path: String,
		found: String,
		expected: String,
	},

	#[error("toc error: failed to find end marker in {0}")]
	#[diagnostic(
		code(versioned::unterminated_toc),
		help("add `<!-- end-markdown-toc -->` after the table of contents")
	)]
	UnterminatedToc(String),

	#[error("error executing `{command}`: {reason}")]
	#[diagnostic(code(versioned::vcs_command))]
	VcsCommand { command: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(versioned::config_parse),
		help("check that versioned.toml is valid TOML")
	)]
	ConfigParse(String),

	#[error("template rendering failed: {0}")]
	#[diagnostic(code(versioned::template_render))]
	TemplateRender(String),
}

impl VersionedError {
	/// The group this error belongs to.
	pub fn category(&self) -> ErrorCategory {
		match self {
			Self::EmptyInput
			| Self::MalformedVersion(_)
			| Self::InvalidMajor(_)
			| Self::InvalidMinor(_)
			| Self::InvalidPatch(_)
			| Self::InvalidLicenseOption(_)
			| Self::InvalidHeading(_)
			| Self::HeadingLevelSkipped { .. } => ErrorCategory::InputValidation,
			Self::FileRead { .. } | Self::FileWrite { .. } | Self::NotAFile(_) => {
				ErrorCategory::FileAccess
			}
			Self::UnsupportedFormat { .. } | Self::UnsupportedLicense(_) => {
				ErrorCategory::UnsupportedFormat
			}
			Self::PackageNotReferenced { .. }
			| Self::PackageNotInitialized { .. }
			| Self::VersionFieldNotFound { .. }
			| Self::LicenseMismatch { .. }
			| Self::UnterminatedToc(_) => ErrorCategory::StructuralMismatch,
			Self::VcsCommand { .. } | Self::ConfigParse(_) | Self::TemplateRender(_) => {
				ErrorCategory::External
			}
		}
	}

	pub(crate) fn read(path: &std::path::Path, source: std::io::Error) -> Self {
		Self::FileRead {
			path: path.display().to_string(),
			source,
		}
	}

	pub(crate) fn write(path: &std::path::Path, source: std::io::Error) -> Self {
		Self::FileWrite {
			path: path.display().to_string(),
			source,
		}
	}
}

pub type VersionedResult<T> = Result<T, VersionedError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
