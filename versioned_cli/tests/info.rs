mod common;

use versioned_core::AnyEmptyResult;

#[test]
fn info_prints_json_metadata() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.4.0")?;

	let output = common::versioned_cmd()
		.arg("info")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.output()?;
	assert!(output.status.success());

	let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(value["metadata"]["version"], "1.4.0");
	assert_eq!(value["version_file"], "VERSION");

	Ok(())
}

#[test]
fn info_prints_banner() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("VERSION"), "1.4.0")?;

	common::versioned_cmd()
		.arg("info")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains(" 1.4.0"))
		.stdout(predicates::str::contains("Version file     VERSION"));

	Ok(())
}
