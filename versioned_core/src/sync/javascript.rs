use std::ops::Range;
use std::path::Path;

use super::Dialect;
use super::DialectKind;
use super::Rewrite;
use super::split_line_ending;
use crate::PackageMetadata;
use crate::VersionedError;
use crate::VersionedResult;

const VERSION_KEY: &str = "Version:";

/// JavaScript and TypeScript sources carrying a `Version: '...'` property in
/// an object literal.
#[derive(Debug, Clone, Copy, Default)]
pub struct JavaScriptDialect;

/// Byte range of the version value on a line containing `Version:`.
/// Quoted values exclude the quotes; bare values stop at a comma, closing
/// brace or whitespace.
fn version_span(body: &str) -> Option<Range<usize>> {
	let key = body.find(VERSION_KEY)?;
	let after_key = key + VERSION_KEY.len();
	let rest = &body[after_key..];
	let start = after_key + (rest.len() - rest.trim_start().len());
	let value = &body[start..];

	match value.chars().next() {
		Some(quote @ ('\'' | '"' | '`')) => {
			let inner = start + quote.len_utf8();
			let end = body[inner..]
				.find(quote)
				.map_or(body.len(), |offset| inner + offset);
			Some(inner..end)
		}
		_ => {
			let end = value
				.find(|c: char| c == ',' || c == '}' || c == ';' || c.is_whitespace())
				.map_or(body.len(), |offset| start + offset);
			Some(start..end)
		}
	}
}

impl Dialect for JavaScriptDialect {
	fn kind(&self) -> DialectKind {
		DialectKind::JavaScript
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
			let Some(span) = version_span(body) else {
				output.push_str(line);
				continue;
			};

			let version = &body[span.clone()];
			if version == metadata.version {
				output.push_str(line);
			} else {
				tracing::debug!(from = %version, to = %metadata.version, "updating javascript property");
				output.push_str(&body[..span.start]);
				output.push_str(&metadata.version);
				output.push_str(&body[span.end..]);
				output.push_str(ending);
				changed = true;
			}
			previous_version = Some(version.to_string());
		}

		if previous_version.is_none() {
			return Err(VersionedError::VersionFieldNotFound {
				path: path.display().to_string(),
				marker: VERSION_KEY.to_string(),
			});
		}

		Ok(Rewrite {
			content: output,
			changed,
			previous_version,
		})
	}
}
