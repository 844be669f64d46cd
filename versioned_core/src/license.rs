//! Add and strip license header comments.

use std::fmt;
use std::path::Path;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

use crate::VersionedError;
use crate::VersionedResult;
use crate::files::read_regular_file;
use crate::files::write_with_permissions;

/// Extra bytes read past the expected header length when looking for an
/// existing header.
const INSPECT_SLACK: usize = 100;

/// Supported license texts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LicenseKind {
	#[default]
	Apache,
	Asl,
	Mit,
	Gpl3,
}

impl LicenseKind {
	pub fn name(self) -> &'static str {
		match self {
			Self::Apache => "apache",
			Self::Asl => "asl",
			Self::Mit => "mit",
			Self::Gpl3 => "gpl3",
		}
	}

	/// A sentence present in every header of this kind.
	pub fn clue(self) -> &'static str {
		match self {
			Self::Apache => "Licensed under the Apache License, Version 2.0",
			Self::Asl => "Licensed under the Amazon Software License",
			Self::Mit => "Licensed under the MIT License",
			Self::Gpl3 => "Licensed under the GPLv3 License",
		}
	}

	fn template(self) -> &'static str {
		match self {
			Self::Apache => APACHE_TEMPLATE,
			Self::Asl => ASL_TEMPLATE,
			Self::Mit => MIT_TEMPLATE,
			Self::Gpl3 => GPL3_TEMPLATE,
		}
	}
}

impl FromStr for LicenseKind {
	type Err = VersionedError;

	/// An empty name selects the default Apache license.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.trim().to_ascii_lowercase().as_str() {
			"" | "apache" => Ok(Self::Apache),
			"asl" => Ok(Self::Asl),
			"mit" => Ok(Self::Mit),
			"gpl3" | "gplv3" => Ok(Self::Gpl3),
			_ => Err(VersionedError::UnsupportedLicense(s.to_string())),
		}
	}
}

impl fmt::Display for LicenseKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// How a header is framed as a comment in a given language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CommentStyle {
	open: &'static str,
	prefix: &'static str,
	close: &'static str,
}

impl CommentStyle {
	fn for_extension(extension: &str) -> Option<Self> {
		let style = match extension {
			"go" | "swift" | "rs" => {
				Self {
					open: "",
					prefix: "// ",
					close: "",
				}
			}
			"py" => {
				Self {
					open: "#",
					prefix: "# ",
					close: "#",
				}
			}
			"js" | "ts" | "tsx" | "mjs" => {
				Self {
					open: "/**",
					prefix: " * ",
					close: " */",
				}
			}
			_ => return None,
		};
		Some(style)
	}
}

/// What [`add_license`] and [`strip_license`] did to a file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LicenseOutcome {
	Added,
	Stripped,
	Unchanged,
}

/// The result of looking for an existing header at the top of a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inspection {
	/// A header of this kind, or any copyright notice, is present.
	pub found: bool,
	/// The present header matches the expected one, ignoring years and
	/// whitespace.
	pub matches: bool,
	/// The inspected head of the file, without shebang and encoding lines.
	pub head: String,
}

/// A license header to apply to a single file.
#[derive(Debug, Clone)]
pub struct LicenseHeader {
	path: PathBuf,
	extension: Option<String>,
	license: LicenseKind,
	holder: String,
	year: u64,
}

impl LicenseHeader {
	pub fn new(
		path: impl Into<PathBuf>,
		license: LicenseKind,
		holder: impl Into<String>,
		year: u64,
	) -> VersionedResult<Self> {
		let path = path.into();
		let holder = holder.into();
		if path.as_os_str().is_empty() {
			return Err(VersionedError::InvalidLicenseOption(
				"file path is empty".to_string(),
			));
		}
		if holder.trim().is_empty() {
			return Err(VersionedError::InvalidLicenseOption(
				"copyright holder is empty".to_string(),
			));
		}
		if year == 0 {
			return Err(VersionedError::InvalidLicenseOption(
				"copyright year is empty".to_string(),
			));
		}

		Ok(Self {
			path,
			extension: None,
			license,
			holder,
			year,
		})
	}

	/// Use `extension` instead of the path's extension to pick the comment
	/// style.
	#[must_use]
	pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
		let extension = extension.into();
		self.extension = Some(extension.trim_start_matches('.').to_string());
		self
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn license(&self) -> LicenseKind {
		self.license
	}

	fn extension(&self) -> String {
		self.extension.clone().unwrap_or_else(|| {
			self.path
				.extension()
				.map(|e| e.to_string_lossy().to_string())
				.unwrap_or_default()
		})
	}

	fn comment_style(&self) -> VersionedResult<CommentStyle> {
		let extension = self.extension();
		CommentStyle::for_extension(&extension).ok_or_else(|| {
			VersionedError::UnsupportedFormat {
				path: self.path.display().to_string(),
				extension: format!(".{extension}"),
			}
		})
	}

	/// Render the full comment block, followed by one blank line.
	pub fn render(&self) -> VersionedResult<String> {
		let style = self.comment_style()?;
		let text = render_template(self.license.template(), &self.holder, self.year)?;

		let mut header = String::new();
		if !style.open.is_empty() {
			header.push_str(style.open);
			header.push('\n');
		}
		for line in text.lines() {
			header.push_str(format!("{}{line}", style.prefix).trim_end());
			header.push('\n');
		}
		if !style.close.is_empty() {
			header.push_str(style.close);
			header.push('\n');
		}
		header.push('\n');

		Ok(header)
	}

	/// Look for an existing header in `content`.
	pub fn inspect(&self, content: &str) -> VersionedResult<Inspection> {
		let expected = self.render()?;
		let mut end = (expected.len() + INSPECT_SLACK).min(content.len());
		while !content.is_char_boundary(end) {
			end -= 1;
		}

		let head = shebang_pattern().replace_all(&content[..end], "");
		let head = coding_pattern().replace_all(&head, "");
		let head = head.trim().to_string();

		let mut inspection = Inspection::default();
		if head.contains(self.license.clue()) {
			inspection.found = true;
			inspection.matches = head.contains(expected.trim()) || loosely_contains(&head, &expected);
		} else if head.contains("Copyright ") {
			inspection.found = true;
		}
		inspection.head = head;

		Ok(inspection)
	}
}

/// Add the header to its file unless one is already present. A present but
/// different header is an error.
pub fn add_license(header: &LicenseHeader) -> VersionedResult<LicenseOutcome> {
	let path = header.path();
	let (content, permissions) = read_regular_file(path)?;
	let expected = header.render()?;
	let inspection = header.inspect(&content)?;

	if inspection.found {
		if inspection.matches {
			tracing::debug!(path = %path.display(), "license header already present");
			return Ok(LicenseOutcome::Unchanged);
		}
		return Err(VersionedError::LicenseMismatch {
			path: path.display().to_string(),
			found: inspection.head,
			expected,
		});
	}

	let updated = if header.extension() == "py" {
		let preamble = python_preamble_end(&content);
		if preamble == 0 {
			format!("{expected}{content}")
		} else {
			format!("{}\n{expected}{}", &content[..preamble], &content[preamble..])
		}
	} else {
		format!("{expected}{content}")
	};

	write_with_permissions(path, &updated, permissions)?;
	tracing::info!(path = %path.display(), license = %header.license(), "added license header");

	Ok(LicenseOutcome::Added)
}

/// Remove the header from its file. The header ends at the first comment
/// close followed by a blank line.
pub fn strip_license(header: &LicenseHeader) -> VersionedResult<LicenseOutcome> {
	let path = header.path();
	let style = header.comment_style()?;
	let (content, permissions) = read_regular_file(path)?;
	if !header.inspect(&content)?.found {
		return Ok(LicenseOutcome::Unchanged);
	}

	let preamble = if header.extension() == "py" {
		python_preamble_end(&content)
	} else {
		0
	};

	let body = &content[preamble..];
	let header_end = ["\n\n", "\r\r", "\r\n\r\n"].iter().find_map(|blank| {
		let terminator = format!("{}{blank}", style.close);
		body.find(&terminator)
			.filter(|offset| *offset > 0)
			.map(|offset| preamble + offset + terminator.len())
	});

	let Some(header_end) = header_end else {
		return Ok(LicenseOutcome::Unchanged);
	};

	let updated = format!("{}{}", &content[..preamble], &content[header_end..]);
	write_with_permissions(path, &updated, permissions)?;
	tracing::info!(path = %path.display(), "stripped license header");

	Ok(LicenseOutcome::Stripped)
}

fn render_template(template: &str, holder: &str, year: u64) -> VersionedResult<String> {
	let mut env = minijinja::Environment::new();
	env.add_template("__license__", template)
		.map_err(|e| VersionedError::TemplateRender(e.to_string()))?;

	let template = env
		.get_template("__license__")
		.map_err(|e| VersionedError::TemplateRender(e.to_string()))?;

	template
		.render(minijinja::context! { year, holder })
		.map_err(|e| VersionedError::TemplateRender(e.to_string()))
}

/// Compare ignoring copyright years and all whitespace.
fn loosely_contains(actual: &str, expected: &str) -> bool {
	let normalize = |text: &str| {
		let without_years = year_pattern().replace_all(text, " ");
		without_years
			.chars()
			.filter(|c| !c.is_whitespace())
			.collect::<String>()
	};
	normalize(actual).contains(&normalize(expected))
}

/// Byte offset just past the shebang and encoding declaration lines at the
/// top of a Python file, or `0` when there are none.
fn python_preamble_end(content: &str) -> usize {
	let mut end = 0;
	for (index, line) in content.split_inclusive('\n').take(2).enumerate() {
		let is_shebang = index == 0 && line.starts_with("#!");
		let is_coding = line.starts_with('#') && (line.contains("coding:") || line.contains("coding="));
		if !(is_shebang || is_coding) || !line.ends_with('\n') {
			break;
		}
		end += line.len();
	}
	end
}

fn shebang_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| Regex::new(r"#!/.*\n").expect("shebang pattern is valid"))
}

fn coding_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| Regex::new(r"#.*coding: .*\n").expect("coding pattern is valid"))
}

fn year_pattern() -> &'static Regex {
	static PATTERN: OnceLock<Regex> = OnceLock::new();
	PATTERN.get_or_init(|| Regex::new(r"\s\d{4}\s").expect("year pattern is valid"))
}

const APACHE_TEMPLATE: &str = r#"Copyright {{ year }} {{ holder }}

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License."#;

const ASL_TEMPLATE: &str = r#"Copyright {{ year }} {{ holder }}. All Rights Reserved.

Licensed under the Amazon Software License (the "License").
You may not use this file except in compliance with the License.
A copy of the License is located at

    http://aws.amazon.com/asl/

or in the "license" file accompanying this file. This file is distributed
on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either
express or implied. See the License for the specific language governing
permissions and limitations under the License."#;

const MIT_TEMPLATE: &str = r#"Copyright (c) {{ year }} {{ holder }}

Licensed under the MIT License.

Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:

The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.

THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE."#;

const GPL3_TEMPLATE: &str = r#"Copyright (C) {{ year }} {{ holder }}

Licensed under the GPLv3 License.

This program is free software: you can redistribute it and/or modify
it under the terms of the GNU General Public License as published by
the Free Software Foundation, either version 3 of the License, or
(at your option) any later version.

This program is distributed in the hope that it will be useful,
but WITHOUT ANY WARRANTY; without even the implied warranty of
MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
GNU General Public License for more details.

You should have received a copy of the GNU General Public License
along with this program.  If not, see <https://www.gnu.org/licenses/>."#;
