use std::fmt;
use std::fmt::Write;

use serde::Serialize;

/// Metadata describing a package: its version plus the git and build
/// details it was produced from.
///
/// Every setter takes an explicit value and a default; a non-empty explicit
/// value wins, otherwise the default is stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PackageMetadata {
	pub name: String,
	pub version: String,
	pub description: String,
	pub documentation: String,
	pub git: GitMetadata,
	pub build: BuildMetadata,
}

/// Git details recorded in [`PackageMetadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GitMetadata {
	pub branch: String,
	pub commit: String,
}

/// Build details recorded in [`PackageMetadata`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildMetadata {
	pub operating_system: String,
	pub architecture: String,
	pub user: String,
	pub date: String,
}

/// Values injected at build time, typically through `option_env!`.
///
/// Constructed once at process start and applied with
/// [`PackageMetadata::apply_build_info`].
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildInfo<'a> {
	pub version: Option<&'a str>,
	pub git_branch: Option<&'a str>,
	pub git_commit: Option<&'a str>,
	pub build_user: Option<&'a str>,
	pub build_date: Option<&'a str>,
}

fn choose(explicit: &str, default: &str) -> String {
	if explicit.is_empty() {
		default.to_string()
	} else {
		explicit.to_string()
	}
}

impl PackageMetadata {
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn set_version(&mut self, explicit: &str, default: &str) {
		self.version = choose(explicit, default);
	}

	pub fn set_description(&mut self, explicit: &str, default: &str) {
		self.description = choose(explicit, default);
	}

	pub fn set_documentation(&mut self, explicit: &str, default: &str) {
		self.documentation = choose(explicit, default);
	}

	pub fn set_git_branch(&mut self, explicit: &str, default: &str) {
		self.git.branch = choose(explicit, default);
	}

	pub fn set_git_commit(&mut self, explicit: &str, default: &str) {
		self.git.commit = choose(explicit, default);
	}

	pub fn set_build_user(&mut self, explicit: &str, default: &str) {
		self.build.user = choose(explicit, default);
	}

	pub fn set_build_date(&mut self, explicit: &str, default: &str) {
		self.build.date = choose(explicit, default);
	}

	pub fn set_build_os(&mut self, explicit: &str, default: &str) {
		self.build.operating_system = choose(explicit, default);
	}

	pub fn set_build_arch(&mut self, explicit: &str, default: &str) {
		self.build.architecture = choose(explicit, default);
	}

	/// Apply build-time values over `defaults`. Missing or empty build-time
	/// values fall back to the matching field of `defaults`.
	pub fn apply_build_info(&mut self, info: &BuildInfo<'_>, defaults: &BuildInfo<'_>) {
		let value = |v: Option<&str>| v.unwrap_or_default().to_string();
		self.set_version(&value(info.version), &value(defaults.version));
		self.set_git_branch(&value(info.git_branch), &value(defaults.git_branch));
		self.set_git_commit(&value(info.git_commit), &value(defaults.git_commit));
		self.set_build_user(&value(info.build_user), &value(defaults.build_user));
		self.set_build_date(&value(info.build_date), &value(defaults.build_date));
	}

	/// One-line description including git and build details when known.
	pub fn banner(&self) -> String {
		let mut banner = self.short_banner();
		if !self.git.branch.is_empty() {
			let _ = write!(banner, ", branch: {}", self.git.branch);
		}
		if !self.git.commit.is_empty() {
			let _ = write!(banner, ", commit: {}", self.git.commit);
		}
		if !self.build.user.is_empty() && !self.build.date.is_empty() {
			let _ = write!(
				banner,
				", build on {} by {}",
				self.build.date, self.build.user
			);
			if !self.build.operating_system.is_empty() && !self.build.architecture.is_empty() {
				let _ = write!(
					banner,
					" for {}/{}",
					self.build.operating_system, self.build.architecture
				);
			}
			let _ = write!(
				banner,
				" ({}/{})",
				std::env::consts::OS,
				std::env::consts::ARCH
			);
		}
		banner
	}

	/// `"{name} {version}"`.
	pub fn short_banner(&self) -> String {
		format!("{} {}", self.name, self.version)
	}
}

impl fmt::Display for PackageMetadata {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.banner())
	}
}
