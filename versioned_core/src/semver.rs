use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::VersionedError;
use crate::VersionedResult;

/// A `major.minor.patch` version triple.
///
/// The textual form is always exactly `"{major}.{minor}.{patch}"`. Pre-release
/// and build suffixes are not supported.
///
/// ```rust
/// use versioned_core::SemVer;
///
/// let mut version: SemVer = "1.0.1".parse().unwrap();
/// version.increment_minor(1);
/// assert_eq!(version.to_string(), "1.1.0");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SemVer {
	pub major: u64,
	pub minor: u64,
	pub patch: u64,
}

impl SemVer {
	/// The version written by `versioned init`.
	pub const INITIAL: Self = Self::new(1, 0, 0);

	pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
		Self {
			major,
			minor,
			patch,
		}
	}

	/// Parse `major.minor.patch` text. Surrounding whitespace is not trimmed.
	pub fn parse(text: &str) -> VersionedResult<Self> {
		if text.is_empty() {
			return Err(VersionedError::EmptyInput);
		}

		let parts: Vec<&str> = text.split('.').collect();
		let [major, minor, patch] = parts[..] else {
			return Err(VersionedError::MalformedVersion(text.to_string()));
		};

		Ok(Self {
			major: parse_component(major)
				.ok_or_else(|| VersionedError::InvalidMajor(major.to_string()))?,
			minor: parse_component(minor)
				.ok_or_else(|| VersionedError::InvalidMinor(minor.to_string()))?,
			patch: parse_component(patch)
				.ok_or_else(|| VersionedError::InvalidPatch(patch.to_string()))?,
		})
	}

	/// Advance the major component by `by` and reset minor and patch to zero.
	pub fn increment_major(&mut self, by: u64) {
		self.major = self.major.saturating_add(by);
		self.minor = 0;
		self.patch = 0;
	}

	/// Advance the minor component by `by` and reset patch to zero.
	pub fn increment_minor(&mut self, by: u64) {
		self.minor = self.minor.saturating_add(by);
		self.patch = 0;
	}

	/// Advance the patch component by `by`.
	pub fn increment_patch(&mut self, by: u64) {
		self.patch = self.patch.saturating_add(by);
	}
}

/// Components are plain ASCII digits. `u64::from_str` alone would also take a
/// leading `+`.
fn parse_component(part: &str) -> Option<u64> {
	if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
		return None;
	}

	part.parse().ok()
}

impl fmt::Display for SemVer {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
	}
}

impl FromStr for SemVer {
	type Err = VersionedError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::parse(s)
	}
}

impl TryFrom<String> for SemVer {
	type Error = VersionedError;

	fn try_from(value: String) -> Result<Self, Self::Error> {
		Self::parse(&value)
	}
}

impl From<SemVer> for String {
	fn from(value: SemVer) -> Self {
		value.to_string()
	}
}
