use std::path::Path;

use super::Dialect;
use super::DialectKind;
use super::Rewrite;
use super::split_line_ending;
use crate::PackageMetadata;
use crate::VersionedError;
use crate::VersionedResult;

const VERSION_DUNDER: &str = "__version__";

/// Python modules declaring a PEP 8 module level `__version__` dunder.
#[derive(Debug, Clone, Copy, Default)]
pub struct PythonDialect;

/// The value assigned on a `__version__ = ...` line, with quotes removed.
fn assigned_version(body: &str) -> Option<String> {
	let rest = body.strip_prefix(VERSION_DUNDER)?;
	let (_, value) = rest.split_once('=')?;
	Some(value.trim().replace(['\'', '"'], ""))
}

impl Dialect for PythonDialect {
	fn kind(&self) -> DialectKind {
		DialectKind::Python
	}

	fn rewrite(
		&self,
		path: &Path,
		content: &str,
		metadata: &PackageMetadata,
	) -> VersionedResult<Rewrite> {
		let mut output = String::with_capacity(content.len());
		let mut previous_version = None;
		let mut changed = false;

		for line in content.split_inclusive('\n') {
			let (body, ending) = split_line_ending(line);
			let Some(version) = assigned_version(body) else {
				output.push_str(line);
				continue;
			};

			if version == metadata.version {
				output.push_str(line);
			} else {
				tracing::debug!(from = %version, to = %metadata.version, "updating python dunder");
				output.push_str(VERSION_DUNDER);
				output.push_str(" = '");
				output.push_str(&metadata.version);
				output.push('\'');
				output.push_str(ending);
				changed = true;
			}
			previous_version = Some(version);
		}

		if previous_version.is_none() {
			return Err(VersionedError::VersionFieldNotFound {
				path: path.display().to_string(),
				marker: VERSION_DUNDER.to_string(),
			});
		}

		Ok(Rewrite {
			content: output,
			changed,
			previous_version,
		})
	}
}
