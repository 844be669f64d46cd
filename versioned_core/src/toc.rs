use std::collections::HashMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::VersionedError;
use crate::VersionedResult;
use crate::files::read_regular_file;
use crate::files::write_with_permissions;
use crate::sync::split_line_ending;

pub const TOC_BEGIN_MARKER: &str = "<!-- begin-markdown-toc -->";
pub const TOC_END_MARKER: &str = "<!-- end-markdown-toc -->";
pub const TOC_TITLE: &str = "## Table of Contents";

const ANCHOR_CHARS: &str = "0123456789abcdefghijklmnopqrstuvwxyz-";

#[derive(Debug, Clone, PartialEq, Eq)]
struct TocEntry {
	title: String,
	depth: usize,
}

/// A Markdown table of contents built from heading lines.
#[derive(Debug, Clone, Default)]
pub struct TableOfContents {
	entries: Vec<TocEntry>,
	min_depth: Option<usize>,
	last_depth: Option<usize>,
}

impl TableOfContents {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Add a `#`-prefixed heading line. A heading may be at most one level
	/// deeper than the one before it.
	pub fn add_heading(&mut self, line: &str) -> VersionedResult<()> {
		if line.is_empty() {
			return Err(VersionedError::InvalidHeading(
				"cannot add an empty string".to_string(),
			));
		}

		let line = line.trim();
		if !line.starts_with('#') {
			return Err(VersionedError::InvalidHeading(format!(
				"heading must start with a pound: {line}"
			)));
		}

		let depth = line.chars().take_while(|c| *c == '#').count();
		let title = line[depth..].trim().to_string();

		if let Some(previous) = self.last_depth {
			if depth > previous + 1 {
				return Err(VersionedError::HeadingLevelSkipped {
					previous,
					current: depth,
				});
			}
		}

		self.last_depth = Some(depth);
		self.min_depth = Some(self.min_depth.map_or(depth, |min| min.min(depth)));
		self.entries.push(TocEntry { title, depth });

		Ok(())
	}

	/// One `* [title](#anchor)` line per heading.
	pub fn render(&self) -> String {
		let min_depth = self.min_depth.unwrap_or_default();
		let mut seen = HashMap::<String, usize>::new();
		let mut output = String::new();

		for entry in &self.entries {
			let anchor = unique_anchor(&entry.title, &mut seen);
			output.push_str(&"  ".repeat(entry.depth - min_depth));
			output.push_str(&format!("* [{}]({anchor})\n", entry.title));
		}

		output
	}
}

/// GitHub style heading anchor, without de-duplication.
pub fn anchor(title: &str) -> String {
	let mut anchor = String::from("#");
	for c in title.to_lowercase().chars() {
		if c == ' ' {
			anchor.push('-');
		} else if ANCHOR_CHARS.contains(c) {
			anchor.push(c);
		}
	}
	anchor
}

fn unique_anchor(title: &str, seen: &mut HashMap<String, usize>) -> String {
	let base = anchor(title);
	match seen.get_mut(&base) {
		Some(count) => {
			let suffixed = format!("{base}-{count}");
			*count += 1;
			suffixed
		}
		None => {
			seen.insert(base.clone(), 1);
			base
		}
	}
}

/// Outcome of [`update_toc`].
#[derive(Debug, Clone, Serialize)]
pub struct TocReport {
	pub path: PathBuf,
	pub original: String,
	pub updated: String,
	pub headings: usize,
	pub written: bool,
}

impl TocReport {
	pub fn changed(&self) -> bool {
		self.original != self.updated
	}
}

/// Regenerate the table of contents block in the Markdown file at `path`.
///
/// The block between [`TOC_BEGIN_MARKER`] and [`TOC_END_MARKER`] is replaced.
/// Without a block, one is inserted before the first second level (or
/// deeper) heading. The file is only written when its content changes and
/// `dry_run` is off.
pub fn update_toc(path: &Path, dry_run: bool) -> VersionedResult<TocReport> {
	let (original, permissions) = read_regular_file(path)?;
	let lines: Vec<&str> = original.split_inclusive('\n').collect();
	let newline = lines
		.first()
		.map(|line| split_line_ending(line).1)
		.filter(|ending| !ending.is_empty())
		.unwrap_or("\n");

	let mut toc = TableOfContents::new();
	let mut block: Option<(usize, usize)> = None;
	let mut block_start = None;
	let mut first_heading = None;
	let mut in_fence = false;

	for (index, line) in lines.iter().enumerate() {
		let (body, _) = split_line_ending(line);
		let trimmed = body.trim();

		if let Some(start) = block_start {
			if trimmed == TOC_END_MARKER {
				block = Some((start, index));
				block_start = None;
			}
			continue;
		}
		if block.is_none() && trimmed == TOC_BEGIN_MARKER {
			block_start = Some(index);
			continue;
		}

		if trimmed.starts_with("```") || trimmed.starts_with("~~~") {
			in_fence = !in_fence;
			continue;
		}
		if in_fence || !body.starts_with("##") {
			continue;
		}

		first_heading.get_or_insert(index);
		toc.add_heading(body)?;
	}

	if block_start.is_some() {
		return Err(VersionedError::UnterminatedToc(path.display().to_string()));
	}

	let mut block_lines = vec![
		TOC_BEGIN_MARKER.to_string(),
		TOC_TITLE.to_string(),
		String::new(),
	];
	if !toc.is_empty() {
		block_lines.extend(toc.render().lines().map(ToString::to_string));
		block_lines.push(String::new());
	}
	block_lines.push(TOC_END_MARKER.to_string());
	let rendered = block_lines.join(newline);

	let updated = match (block, first_heading) {
		(Some((start, end)), _) => {
			let ending = split_line_ending(lines[end]).1;
			format!(
				"{}{rendered}{ending}{}",
				lines[..start].concat(),
				lines[end + 1..].concat()
			)
		}
		(None, Some(first)) => {
			format!(
				"{}{rendered}{newline}{newline}{}",
				lines[..first].concat(),
				lines[first..].concat()
			)
		}
		(None, None) => original.clone(),
	};

	let written = updated != original && !dry_run;
	if written {
		write_with_permissions(path, &updated, permissions)?;
		tracing::info!(path = %path.display(), headings = toc.len(), "updated table of contents");
	} else {
		tracing::debug!(path = %path.display(), dry_run, "table of contents unchanged on disk");
	}

	Ok(TocReport {
		path: path.to_path_buf(),
		original,
		updated,
		headings: toc.len(),
		written,
	})
}
