mod common;

use similar_asserts::assert_eq;
use versioned_core::AnyEmptyResult;

#[test]
fn can_init() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::versioned_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("created version file VERSION"));

	let content = std::fs::read_to_string(tmp.path().join("VERSION"))?;
	assert_eq!(content, "1.0.0");

	Ok(())
}

#[test]
fn init_does_not_overwrite() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "2.3.4\n")?;

	common::versioned_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains(
			"version file already exists, version: 2.3.4",
		));

	let content = std::fs::read_to_string(tmp.path().join("VERSION"))?;
	assert_eq!(content, "2.3.4\n");

	Ok(())
}

#[test]
fn init_honors_source_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("versioned.toml"), "source = \"APP_VERSION\"\n")?;

	common::versioned_cmd()
		.arg("init")
		.arg("--silent")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::is_empty());

	assert!(tmp.path().join("APP_VERSION").is_file());
	assert!(!tmp.path().join("VERSION").exists());

	Ok(())
}
