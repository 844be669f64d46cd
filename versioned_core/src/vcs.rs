use std::path::Path;
use std::path::PathBuf;
use std::process::Command;

use crate::VersionedError;
use crate::VersionedResult;

/// Source of the commit description and branch name recorded during sync.
pub trait VcsProvider {
	/// A human readable description of the current commit, e.g.
	/// `v1.0.22-3-g230de95`.
	fn describe(&self) -> VersionedResult<String>;

	/// The name of the currently checked out branch.
	fn branch(&self) -> VersionedResult<String>;
}

/// [`VcsProvider`] backed by the `git` executable.
#[derive(Debug, Clone)]
pub struct GitCli {
	root: PathBuf,
}

impl GitCli {
	pub fn new(root: impl Into<PathBuf>) -> Self {
		Self { root: root.into() }
	}

	pub fn root(&self) -> &Path {
		&self.root
	}
}

impl VcsProvider for GitCli {
	fn describe(&self) -> VersionedResult<String> {
		run_first_line(&self.root, &["git", "describe", "--always"])
	}

	fn branch(&self) -> VersionedResult<String> {
		run_first_line(&self.root, &["git", "rev-parse", "--abbrev-ref", "HEAD", "--"])
	}
}

/// Fixed values, for callers that already know the branch and commit.
#[derive(Debug, Clone, Default)]
pub struct StaticVcs {
	pub branch: String,
	pub commit: String,
}

impl VcsProvider for StaticVcs {
	fn describe(&self) -> VersionedResult<String> {
		Ok(self.commit.clone())
	}

	fn branch(&self) -> VersionedResult<String> {
		Ok(self.branch.clone())
	}
}

/// Run `args` in `root` and return the first line of its standard output.
fn run_first_line(root: &Path, args: &[&str]) -> VersionedResult<String> {
	let command = args.join(" ");
	let Some((program, rest)) = args.split_first() else {
		return Err(VersionedError::VcsCommand {
			command,
			reason: "empty command".to_string(),
		});
	};

	tracing::debug!(%command, root = %root.display(), "running vcs command");
	let output = Command::new(program)
		.args(rest)
		.current_dir(root)
		.output()
		.map_err(|e| {
			VersionedError::VcsCommand {
				command: command.clone(),
				reason: e.to_string(),
			}
		})?;

	if !output.status.success() {
		let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
		let reason = if stderr.is_empty() {
			format!(
				"command exited with status {}",
				output
					.status
					.code()
					.map_or_else(|| "unknown".to_string(), |code| code.to_string())
			)
		} else {
			stderr
		};

		return Err(VersionedError::VcsCommand { command, reason });
	}

	let stdout = String::from_utf8_lossy(&output.stdout);
	Ok(stdout.lines().next().unwrap_or_default().trim_end().to_string())
}
