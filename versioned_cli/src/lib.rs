use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	name = "versioned",
	author,
	disable_version_flag = true,
	about = "Simplified package metadata management.",
	long_about = "versioned keeps a semantic version in a plain text file and propagates it, \
	              together with git branch and commit details, into Go, Python and JavaScript \
	              sources.\n\nQuick start:\n  versioned init          Create a VERSION file\n  \
	              versioned bump --patch  Increment the patch version\n  versioned sync main.go  \
	              Update the version literals in a source file\n  versioned toc           \
	              Regenerate the README table of contents",
	after_help = "Documentation: https://github.com/greenpau/versioned/"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct VersionedCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// The "source of truth" file with version info, relative to the project
	/// root. Defaults to `source` from `versioned.toml`, then `VERSION`.
	#[arg(long, short, global = true)]
	pub source: Option<PathBuf>,

	/// Suppress progress messages.
	#[arg(long, global = true, default_value_t = false)]
	pub silent: bool,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,

	/// Print version information and exit.
	#[arg(long, short = 'V', default_value_t = false)]
	pub version: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Print the current version from the version file.
	Show,
	/// Create the version file with version `1.0.0`.
	///
	/// If a readable version file already exists, it is left untouched and
	/// the command exits successfully.
	Init,
	/// Increment the version and write it back to the version file.
	///
	/// Increments are applied in major, minor, patch order. A major
	/// increment resets minor and patch, a minor increment resets patch.
	Bump(BumpArgs),
	/// Synchronize the version file and git metadata into a source file.
	///
	/// Go files must import the package manager module and construct it in
	/// `func init()`; the `SetVersion`, `SetGitBranch` and `SetGitCommit`
	/// literals that follow are updated. Python files have their
	/// `__version__` dunder updated and JavaScript or TypeScript files their
	/// `Version:` property.
	Sync(SyncArgs),
	/// Update the table of contents of a Markdown file.
	///
	/// The block between `<!-- begin-markdown-toc -->` and
	/// `<!-- end-markdown-toc -->` is regenerated from the `##` and deeper
	/// headings. Without a block, one is inserted before the first heading.
	Toc {
		/// The Markdown file. Defaults to `[toc] file` from `versioned.toml`,
		/// then `README.md`.
		file: Option<PathBuf>,

		/// Show the changes without writing the file.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Add or strip license headers in source files.
	#[command(subcommand)]
	License(LicenseCommands),
	/// Print the package metadata of the current project.
	Info {
		/// Output format. Use `text` for a human-readable banner or `json`
		/// for programmatic consumption.
		#[arg(long, value_enum, default_value_t = InfoOutputFormat::Text)]
		format: InfoOutputFormat,
	},
}

#[derive(Args)]
#[allow(clippy::struct_excessive_bools)]
pub struct BumpArgs {
	/// Increment the major version.
	#[arg(long, default_value_t = false)]
	pub major: bool,

	/// Increment the minor version.
	#[arg(long, default_value_t = false)]
	pub minor: bool,

	/// Increment the patch version.
	#[arg(long, default_value_t = false)]
	pub patch: bool,

	/// Increase factor. Defaults to `factor` from `versioned.toml`, then 1.
	#[arg(long)]
	pub factor: Option<u64>,
}

#[derive(Args)]
pub struct SyncArgs {
	/// The source file to synchronize.
	pub file: PathBuf,

	/// Synchronize according to a specific language, i.e. `py`, `js`, `go`,
	/// `ts`. Defaults to the file extension.
	#[arg(long)]
	pub format: Option<String>,

	/// Print a diff of the changes without writing the file.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Git branch to record instead of asking git.
	#[arg(long)]
	pub git_branch: Option<String>,

	/// Git commit description to record instead of asking git.
	#[arg(long)]
	pub git_commit: Option<String>,
}

#[derive(Subcommand)]
pub enum LicenseCommands {
	/// Add a license header to each file that lacks one.
	Add(LicenseArgs),
	/// Remove the license header from each file.
	Strip(LicenseArgs),
}

#[derive(Args)]
pub struct LicenseArgs {
	/// The source files to process.
	#[arg(required = true)]
	pub files: Vec<PathBuf>,

	/// License type: `apache`, `asl`, `mit` or `gpl3`. Defaults to
	/// `[license] type` from `versioned.toml`, then `apache`.
	#[arg(long)]
	pub license: Option<String>,

	/// Copyright holder. Defaults to `[license] holder` from
	/// `versioned.toml`.
	#[arg(long)]
	pub holder: Option<String>,

	/// Copyright year. Defaults to `[license] year` from `versioned.toml`,
	/// then the current year.
	#[arg(long)]
	pub year: Option<u64>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum InfoOutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
