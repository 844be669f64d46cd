use std::path::Path;
use std::path::PathBuf;
use std::process;

use chrono::Datelike;
use clap::Parser;
use owo_colors::OwoColorize;
use tracing_subscriber::EnvFilter;
use versioned_cli::BumpArgs;
use versioned_cli::Commands;
use versioned_cli::InfoOutputFormat;
use versioned_cli::LicenseArgs;
use versioned_cli::LicenseCommands;
use versioned_cli::SyncArgs;
use versioned_cli::VersionedCli;
use versioned_core::BuildInfo;
use versioned_core::GitCli;
use versioned_core::LicenseHeader;
use versioned_core::LicenseKind;
use versioned_core::LicenseOutcome;
use versioned_core::PackageMetadata;
use versioned_core::SourceSync;
use versioned_core::StaticVcs;
use versioned_core::SyncOptions;
use versioned_core::VcsProvider;
use versioned_core::VersionFile;
use versioned_core::VersionedConfig;
use versioned_core::VersionedError;
use versioned_core::add_license;
use versioned_core::strip_license;
use versioned_core::update_toc;

type CliResult = Result<(), Box<dyn std::error::Error>>;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

/// Values embedded at build time, e.g.
/// `VERSIONED_GIT_COMMIT=$(git describe --always) cargo build`.
const BUILD_INFO: BuildInfo<'static> = BuildInfo {
	version: option_env!("VERSIONED_VERSION"),
	git_branch: option_env!("VERSIONED_GIT_BRANCH"),
	git_commit: option_env!("VERSIONED_GIT_COMMIT"),
	build_user: option_env!("VERSIONED_BUILD_USER"),
	build_date: option_env!("VERSIONED_BUILD_DATE"),
};

const BUILD_DEFAULTS: BuildInfo<'static> = BuildInfo {
	version: Some(env!("CARGO_PKG_VERSION")),
	git_branch: Some("main"),
	git_commit: None,
	build_user: None,
	build_date: None,
};

fn main() {
	let args = VersionedCli::parse();

	// Respect NO_COLOR env var, --no-color flag and terminal support.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stderr).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if args.version {
		println!("{}", tool_metadata().banner());
		return;
	}

	let result = match &args.command {
		None | Some(Commands::Show) => run_show(&args),
		Some(Commands::Init) => run_init(&args),
		Some(Commands::Bump(bump)) => run_bump(&args, bump),
		Some(Commands::Sync(sync)) => run_sync(&args, sync),
		Some(Commands::Toc { file, dry_run }) => run_toc(&args, file.as_deref(), *dry_run),
		Some(Commands::License(LicenseCommands::Add(license))) => run_license(&args, license, true),
		Some(Commands::License(LicenseCommands::Strip(license))) => {
			run_license(&args, license, false)
		}
		Some(Commands::Info { format }) => run_info(&args, *format),
	};

	if let Err(e) = result {
		// Render engine errors through miette for error codes and help text.
		match e.downcast::<VersionedError>() {
			Ok(versioned_err) => {
				let report: miette::Report = (*versioned_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env("VERSIONED_LOG").unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(color_enabled())
		.with_target(verbose)
		.init();
}

fn tool_metadata() -> PackageMetadata {
	let mut metadata = PackageMetadata::new("versioned");
	metadata.set_description("", "Simplified package metadata management.");
	metadata.set_documentation("", "https://github.com/greenpau/versioned/");
	metadata.apply_build_info(&BUILD_INFO, &BUILD_DEFAULTS);
	metadata
}

fn resolve_root(args: &VersionedCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_config(root: &Path) -> Result<VersionedConfig, VersionedError> {
	Ok(VersionedConfig::load(root)?.unwrap_or_default())
}

fn version_file_path(args: &VersionedCli, root: &Path, config: &VersionedConfig) -> PathBuf {
	let source = args.source.clone().unwrap_or_else(|| config.source_path());
	root.join(source)
}

/// Print a progress message to stderr unless `--silent` was given.
fn progress(args: &VersionedCli, message: impl std::fmt::Display) {
	if !args.silent {
		eprintln!("{message}");
	}
}

fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}

fn run_show(args: &VersionedCli) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let file = VersionFile::load(version_file_path(args, &root, &config))?;
	println!("{}", file.version());

	Ok(())
}

fn run_init(args: &VersionedCli) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let (file, created) = VersionFile::init(version_file_path(args, &root, &config))?;

	if created {
		progress(
			args,
			format!(
				"{} version file {}, version: {}",
				colored!("created", green),
				make_relative(file.path(), &root),
				file.version()
			),
		);
	} else {
		progress(
			args,
			format!("version file already exists, version: {}", file.version()),
		);
	}

	Ok(())
}

fn run_bump(args: &VersionedCli, bump: &BumpArgs) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let mut file = VersionFile::load(version_file_path(args, &root, &config))?;
	let previous = file.version();
	let factor = bump.factor.or(config.factor).unwrap_or(1);

	if !bump.major && !bump.minor && !bump.patch {
		progress(
			args,
			format!(
				"{} nothing to increment, pass --major, --minor or --patch",
				colored!("warning:", yellow)
			),
		);
		println!("{previous}");
		return Ok(());
	}

	if bump.major {
		file.increment_major(factor);
		progress(
			args,
			format!(
				"increased major version by {factor}, current version: {}",
				file.version()
			),
		);
	}

	if bump.minor {
		file.increment_minor(factor);
		progress(
			args,
			format!(
				"increased minor version by {factor}, current version: {}",
				file.version()
			),
		);
	}

	if bump.patch {
		file.increment_patch(factor);
		progress(
			args,
			format!(
				"increased patch version by {factor}, current version: {}",
				file.version()
			),
		);
	}

	file.write()?;
	progress(
		args,
		format!(
			"updated version: {}, previous version: {previous}",
			colored!(file.version(), bold)
		),
	);

	Ok(())
}

fn run_sync(args: &VersionedCli, sync: &SyncArgs) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let file = VersionFile::load(version_file_path(args, &root, &config))?;

	let (branch, commit) = match (&sync.git_branch, &sync.git_commit) {
		(Some(branch), Some(commit)) => {
			let vcs = StaticVcs {
				branch: branch.clone(),
				commit: commit.clone(),
			};
			(vcs.branch()?, vcs.describe()?)
		}
		(branch, commit) => {
			let git = GitCli::new(&root);
			let commit = match commit {
				Some(commit) => commit.clone(),
				None => git.describe()?,
			};
			let branch = match branch {
				Some(branch) => branch.clone(),
				None => git.branch()?,
			};
			(branch, commit)
		}
	};

	let mut metadata = PackageMetadata::new("");
	metadata.set_version(&file.version().to_string(), "");
	metadata.set_git_branch(&branch, "");
	metadata.set_git_commit(&commit, "");

	let path = if sync.file.is_absolute() {
		sync.file.clone()
	} else {
		root.join(&sync.file)
	};
	let options = SyncOptions {
		format: sync.format.clone(),
		dry_run: sync.dry_run,
	};

	let report = SourceSync::new(&config.sync).sync_file(&path, &metadata, &options)?;
	let relative = make_relative(&report.path, &root);

	if !report.changed() {
		progress(
			args,
			format!("{relative} is already up to date, version: {}", metadata.version),
		);
		return Ok(());
	}

	if sync.dry_run {
		println!("Dry run: would update {relative} ({}):", report.dialect);
		print!("{}", report.diff());
		return Ok(());
	}

	let previous = report.previous_version.as_deref().unwrap_or("unknown");
	progress(
		args,
		format!(
			"{} {relative}, version: {}, previous version: {previous}",
			colored!("synchronized", green),
			metadata.version
		),
	);

	Ok(())
}

fn run_toc(args: &VersionedCli, file: Option<&Path>, dry_run: bool) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let file = file.map_or_else(|| config.toc_path(), Path::to_path_buf);
	let path = if file.is_absolute() {
		file
	} else {
		root.join(file)
	};

	let report = update_toc(&path, dry_run)?;
	let relative = make_relative(&report.path, &root);

	if !report.changed() {
		progress(
			args,
			format!("table of contents in {relative} is already up to date"),
		);
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would update the table of contents in {relative} ({} heading(s))",
			report.headings
		);
		return Ok(());
	}

	progress(
		args,
		format!(
			"{} table of contents in {relative} ({} heading(s))",
			colored!("updated", green),
			report.headings
		),
	);

	Ok(())
}

fn run_license(args: &VersionedCli, license: &LicenseArgs, add: bool) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;

	let kind: LicenseKind = license
		.license
		.as_deref()
		.or(config.license.license_type.as_deref())
		.unwrap_or_default()
		.parse()?;
	let holder = license
		.holder
		.clone()
		.or_else(|| config.license.holder.clone())
		.unwrap_or_default();
	let year = license
		.year
		.or(config.license.year)
		.unwrap_or_else(current_year);

	for file in &license.files {
		let path = if file.is_absolute() {
			file.clone()
		} else {
			root.join(file)
		};
		let relative = make_relative(&path, &root);
		let header = LicenseHeader::new(&path, kind, holder.as_str(), year)?;
		let outcome = if add {
			add_license(&header)?
		} else {
			strip_license(&header)?
		};

		match outcome {
			LicenseOutcome::Added => {
				progress(
					args,
					format!("{} {kind} license header to {relative}", colored!("added", green)),
				);
			}
			LicenseOutcome::Stripped => {
				progress(
					args,
					format!("{} license header from {relative}", colored!("stripped", green)),
				);
			}
			LicenseOutcome::Unchanged => {
				progress(args, format!("{relative} is unchanged"));
			}
		}
	}

	Ok(())
}

fn current_year() -> u64 {
	u64::try_from(chrono::Local::now().year()).unwrap_or_default()
}

fn run_info(args: &VersionedCli, format: InfoOutputFormat) -> CliResult {
	let root = resolve_root(args);
	let config = load_config(&root)?;
	let file = VersionFile::load(version_file_path(args, &root, &config))?;

	let name = root
		.canonicalize()
		.unwrap_or_else(|_| root.clone())
		.file_name()
		.map(|name| name.to_string_lossy().to_string())
		.unwrap_or_default();

	let mut metadata = PackageMetadata::new(name);
	metadata.set_version(&file.version().to_string(), "");

	// Git details are optional here; outside a repository they stay empty.
	let git = GitCli::new(&root);
	match (git.branch(), git.describe()) {
		(Ok(branch), Ok(commit)) => {
			metadata.set_git_branch(&branch, "");
			metadata.set_git_commit(&commit, "");
		}
		(Err(e), _) | (_, Err(e)) => {
			tracing::debug!(error = %e, "git metadata unavailable");
		}
	}

	match format {
		InfoOutputFormat::Text => {
			println!("{}", colored!(metadata.banner(), bold));
			println!("{:<16} {}", "Version file", make_relative(file.path(), &root));
			println!("{:<16} {}", "Project root", root.display());
		}
		InfoOutputFormat::Json => {
			let output = serde_json::json!({
				"metadata": metadata,
				"version_file": make_relative(file.path(), &root),
				"root": root.display().to_string(),
			});
			println!("{}", serde_json::to_string_pretty(&output)?);
		}
	}

	Ok(())
}
