mod common;

use rstest::rstest;
use similar_asserts::assert_eq;
use versioned_core::AnyEmptyResult;

#[rstest]
#[case::patch(&["--patch"], "1.2.4")]
#[case::minor(&["--minor"], "1.3.0")]
#[case::major(&["--major"], "2.0.0")]
#[case::all_in_order(&["--patch", "--minor", "--major"], "2.1.1")]
#[case::factor(&["--patch", "--factor", "5"], "1.2.8")]
fn bump_increments_version(#[case] flags: &[&str], #[case] expected: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.2.3")?;

	common::versioned_cmd()
		.arg("bump")
		.args(flags)
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains(format!(
			"updated version: {expected}, previous version: 1.2.3"
		)));

	let content = std::fs::read_to_string(tmp.path().join("VERSION"))?;
	assert_eq!(content, expected);

	Ok(())
}

#[test]
fn bump_reports_each_increment() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.0.0")?;

	common::versioned_cmd()
		.arg("bump")
		.arg("--major")
		.arg("--patch")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains(
			"increased major version by 1, current version: 2.0.0",
		))
		.stderr(predicates::str::contains(
			"increased patch version by 1, current version: 2.0.1",
		));

	Ok(())
}

#[test]
fn bump_uses_factor_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.0.0")?;
	std::fs::write(tmp.path().join("versioned.toml"), "factor = 10\n")?;

	common::versioned_cmd()
		.arg("bump")
		.arg("--minor")
		.arg("--silent")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::is_empty());

	let content = std::fs::read_to_string(tmp.path().join("VERSION"))?;
	assert_eq!(content, "1.10.0");

	Ok(())
}

#[test]
fn bump_without_flags_leaves_file_untouched() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.0.0\n")?;

	common::versioned_cmd()
		.arg("bump")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout("1.0.0\n");

	let content = std::fs::read_to_string(tmp.path().join("VERSION"))?;
	assert_eq!(content, "1.0.0\n");

	Ok(())
}

#[test]
fn bump_rejects_invalid_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.0.0")?;
	std::fs::write(tmp.path().join("versioned.toml"), "factor = \"many\"\n")?;

	common::versioned_cmd()
		.arg("bump")
		.arg("--patch")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("versioned::config_parse"));

	let content = std::fs::read_to_string(tmp.path().join("VERSION"))?;
	assert_eq!(content, "1.0.0");

	Ok(())
}
