mod common;

use std::path::Path;

use similar_asserts::assert_eq;
use versioned_core::AnyEmptyResult;

const GO_SOURCE: &str = "package main

import \"github.com/greenpau/versioned\"

func init() {
\tapp = versioned.NewPackageManager(\"demo\")
\tapp.SetVersion(appVersion, \"1.0.0\")
\tapp.SetGitBranch(gitBranch, \"main\")
\tapp.SetGitCommit(gitCommit, \"v1.0.0\")
}
";

fn sync_cmd(root: &Path, file: &str) -> assert_cmd::Command {
	let mut cmd = common::versioned_cmd();
	cmd.arg("sync")
		.arg(file)
		.arg("--git-branch")
		.arg("release")
		.arg("--git-commit")
		.arg("v2.0.0-0-gabc1234")
		.arg("--path")
		.arg(root);
	cmd
}

#[test]
fn sync_updates_go_source() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "2.0.0")?;
	std::fs::write(tmp.path().join("main.go"), GO_SOURCE)?;

	sync_cmd(tmp.path(), "main.go")
		.assert()
		.success()
		.stderr(predicates::str::contains(
			"synchronized main.go, version: 2.0.0, previous version: 1.0.0",
		));

	let content = std::fs::read_to_string(tmp.path().join("main.go"))?;
	assert!(content.contains("app.SetVersion(appVersion, \"2.0.0\")"));
	assert!(content.contains("app.SetGitBranch(gitBranch, \"release\")"));
	assert!(content.contains("app.SetGitCommit(gitCommit, \"v2.0.0-0-gabc1234\")"));

	Ok(())
}

#[test]
fn sync_updates_python_source_with_format() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "2.0.0")?;
	std::fs::write(tmp.path().join("version.txt"), "__version__ = \"1.0.0\"\n")?;

	sync_cmd(tmp.path(), "version.txt")
		.arg("--format")
		.arg("python")
		.assert()
		.success();

	let content = std::fs::read_to_string(tmp.path().join("version.txt"))?;
	assert_eq!(content, "__version__ = '2.0.0'\n");

	Ok(())
}

#[test]
fn sync_is_noop_when_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.0.0")?;
	std::fs::write(tmp.path().join("pkg.ts"), "export const pkg = { Version: '1.0.0' };\n")?;

	sync_cmd(tmp.path(), "pkg.ts")
		.assert()
		.success()
		.stderr(predicates::str::contains("pkg.ts is already up to date"));

	Ok(())
}

#[test]
fn sync_dry_run_prints_diff() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "2.0.0")?;
	std::fs::write(tmp.path().join("main.go"), GO_SOURCE)?;

	sync_cmd(tmp.path(), "main.go")
		.arg("--dry-run")
		.assert()
		.success()
		.stdout(predicates::str::contains("Dry run: would update main.go (go)"))
		.stdout(predicates::str::contains(
			"+\tapp.SetVersion(appVersion, \"2.0.0\")",
		));

	let content = std::fs::read_to_string(tmp.path().join("main.go"))?;
	assert_eq!(content, GO_SOURCE);

	Ok(())
}

#[test]
fn sync_rejects_unsupported_extension() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "2.0.0")?;
	std::fs::write(tmp.path().join("notes.txt"), "1.0.0\n")?;

	sync_cmd(tmp.path(), "notes.txt")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("versioned::unsupported_format"));

	Ok(())
}

#[test]
fn sync_leaves_file_untouched_on_mismatch() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = "package main\n\nfunc main() {}\n";
	std::fs::write(tmp.path().join("VERSION"), "2.0.0")?;
	std::fs::write(tmp.path().join("main.go"), source)?;

	sync_cmd(tmp.path(), "main.go")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("versioned::package_not_referenced"));

	let content = std::fs::read_to_string(tmp.path().join("main.go"))?;
	assert_eq!(content, source);

	Ok(())
}
