use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use super::Dialect;
use super::DialectKind;
use super::Rewrite;
use super::split_line_ending;
use crate::PackageMetadata;
use crate::VersionedError;
use crate::VersionedResult;

const INIT_FUNCTION: &str = "func init() {";

/// Go sources that construct the package manager inside `func init()` and
/// then call `Set<Field>(arg, "literal")` on it:
///
/// ```go
/// import "github.com/greenpau/versioned"
///
/// func init() {
/// 	app = versioned.NewPackageManager("demo")
/// 	app.SetVersion(appVersion, "1.0.0")
/// 	app.SetGitBranch(gitBranch, "main")
/// 	app.SetGitCommit(gitCommit, "v1.0.0-1-g0c85fbc")
/// }
/// ```
#[derive(Debug, Clone)]
pub struct GoDialect {
	module: String,
	constructor: String,
}

impl GoDialect {
	/// `module` is the import path that must appear in the file and
	/// `constructor` the call that must appear inside `init()`.
	pub fn new(module: impl Into<String>, constructor: impl Into<String>) -> Self {
		Self {
			module: module.into(),
			constructor: constructor.into(),
		}
	}
}

/// Position of the scanner relative to the first `init()` function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum InitRegion {
	#[default]
	Before,
	Inside,
	After,
}

#[derive(Debug, Default)]
struct ScanState {
	package_referenced: bool,
	package_initialized: bool,
	version_found: bool,
	init: InitRegion,
	previous_version: Option<String>,
	changed: bool,
}

/// Matches `<receiver>.Set<Field>(<arg>, "<literal>")`.
///
/// - Group 1: field name, e.g. `Version`
/// - Group 2: the literal between the quotes
fn set_call_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| {
		Regex::new(r#"^\s*\S.*\.Set(\S+)\(\S+, "(.*)""#).expect("set call pattern is valid")
	})
}

impl GoDialect {
	/// Rewrite the literal of a recognized `Set` call when it differs from
	/// `metadata`. Returns `None` when the line is left untouched.
	fn rewrite_set_call(
		&self,
		body: &str,
		metadata: &PackageMetadata,
		state: &mut ScanState,
	) -> Option<String> {
		let captures = set_call_pattern().captures(body)?;
		let field = captures.get(1)?.as_str();
		let literal = captures.get(2)?;

		let expected = match field {
			"Version" => {
				state.version_found = true;
				state.previous_version = Some(literal.as_str().to_string());
				&metadata.version
			}
			"GitBranch" => &metadata.git.branch,
			"GitCommit" => &metadata.git.commit,
			_ => return None,
		};

		if literal.as_str() == expected {
			return None;
		}

		tracing::debug!(field, from = literal.as_str(), to = %expected, "updating go literal");
		let mut updated = String::with_capacity(body.len() + expected.len());
		updated.push_str(&body[..literal.start()]);
		updated.push_str(expected);
		updated.push_str(&body[literal.end()..]);
		Some(updated)
	}
}

impl Dialect for GoDialect {
	fn kind(&self) -> DialectKind {
		DialectKind::Go
	}

	fn rewrite(
		&self,
		path: &Path,
		content: &str,
		metadata: &PackageMetadata,
	) -> VersionedResult<Rewrite> {
		let mut state = ScanState::default();
		let mut output = String::with_capacity(content.len());

		for line in content.split_inclusive('\n') {
			let (body, ending) = split_line_ending(line);

			if body.contains(&self.module) {
				state.package_referenced = true;
				if state.init != InitRegion::Inside {
					output.push_str(line);
					continue;
				}
			}

			if body.contains(INIT_FUNCTION) {
				if state.init == InitRegion::Before {
					state.init = InitRegion::Inside;
				}
				output.push_str(line);
				continue;
			}

			if state.init != InitRegion::Inside {
				output.push_str(line);
				continue;
			}

			// Only a closing brace in the first column ends `init()`, so nested
			// blocks stay inside the scanned region.
			if body.starts_with('}') {
				state.init = InitRegion::After;
				output.push_str(line);
				continue;
			}

			if body.contains(&self.constructor) {
				state.package_initialized = true;
				output.push_str(line);
				continue;
			}

			if state.package_initialized {
				if let Some(updated) = self.rewrite_set_call(body, metadata, &mut state) {
					state.changed = true;
					output.push_str(&updated);
					output.push_str(ending);
					continue;
				}
			}

			output.push_str(line);
		}

		let path_display = path.display().to_string();
		if !state.package_referenced {
			return Err(VersionedError::PackageNotReferenced {
				path: path_display,
				module: self.module.clone(),
			});
		}
		if !state.package_initialized {
			return Err(VersionedError::PackageNotInitialized {
				path: path_display,
				module: self.module.clone(),
			});
		}
		if !state.version_found {
			return Err(VersionedError::VersionFieldNotFound {
				path: path_display,
				marker: "SetVersion".to_string(),
			});
		}

		Ok(Rewrite {
			content: output,
			changed: state.changed,
			previous_version: state.previous_version,
		})
	}
}
