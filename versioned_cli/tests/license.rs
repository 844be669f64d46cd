mod common;

use similar_asserts::assert_eq;
use versioned_core::AnyEmptyResult;

#[test]
fn license_add_then_strip() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let source = "package main\n";
	std::fs::write(tmp.path().join("main.go"), source)?;

	common::versioned_cmd()
		.arg("license")
		.arg("add")
		.arg("main.go")
		.arg("--holder")
		.arg("Jane Doe")
		.arg("--year")
		.arg("2024")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("added apache license header to main.go"));

	let content = std::fs::read_to_string(tmp.path().join("main.go"))?;
	assert!(content.starts_with("// Copyright 2024 Jane Doe\n"));
	assert!(content.ends_with("limitations under the License.\n\npackage main\n"));

	common::versioned_cmd()
		.arg("license")
		.arg("strip")
		.arg("main.go")
		.arg("--holder")
		.arg("Jane Doe")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stderr(predicates::str::contains("stripped license header from main.go"));

	let content = std::fs::read_to_string(tmp.path().join("main.go"))?;
	assert_eq!(content, source);

	Ok(())
}

#[test]
fn license_reads_defaults_from_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("app.ts"), "export {};\n")?;
	std::fs::write(
		tmp.path().join("versioned.toml"),
		"[license]\ntype = \"mit\"\nholder = \"Acme\"\nyear = 2021\n",
	)?;

	common::versioned_cmd()
		.arg("license")
		.arg("add")
		.arg("app.ts")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let content = std::fs::read_to_string(tmp.path().join("app.ts"))?;
	assert!(content.starts_with("/**\n * Copyright (c) 2021 Acme\n"));

	Ok(())
}

#[test]
fn license_requires_holder() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("main.go"), "package main\n")?;

	common::versioned_cmd()
		.arg("license")
		.arg("add")
		.arg("main.go")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("versioned::invalid_license_option"));

	Ok(())
}

#[test]
fn license_rejects_unknown_type() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("main.go"), "package main\n")?;

	common::versioned_cmd()
		.arg("license")
		.arg("add")
		.arg("main.go")
		.arg("--license")
		.arg("bsd")
		.arg("--holder")
		.arg("Jane Doe")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.code(1)
		.stderr(predicates::str::contains("versioned::unsupported_license"));

	Ok(())
}
