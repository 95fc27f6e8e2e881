mod common;

use mdgather_core::AnyEmptyResult;

#[test]
fn check_fails_before_first_build() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_minimal_project(tmp.path())?;

	let mut cmd = common::mdgather_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(predicates::str::contains("out of date"))
		.stderr(predicates::str::contains("[missing]"));

	Ok(())
}

#[test]
fn check_passes_after_build() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_minimal_project(tmp.path())?;

	let mut cmd = common::mdgather_cmd();
	cmd.arg("build")
		.arg("--skip-lint")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	let mut cmd = common::mdgather_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("up to date"));

	Ok(())
}

#[test]
fn check_detects_edited_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_minimal_project(tmp.path())?;

	let mut cmd = common::mdgather_cmd();
	cmd.arg("build")
		.arg("--skip-lint")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	// Hand-edit one output behind the builder's back.
	std::fs::write(
		tmp.path().join("docs/workflows/intro.md"),
		"# Intro\n\nEdited by hand.\n",
	)?;

	let mut cmd = common::mdgather_cmd();
	cmd.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure()
		.stderr(predicates::str::contains("[stale]"));

	Ok(())
}

#[test]
fn check_json_reports_stale_entries() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_minimal_project(tmp.path())?;

	let mut cmd = common::mdgather_cmd();
	let assert = cmd
		.arg("check")
		.arg("--format")
		.arg("json")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.failure();

	let stdout = String::from_utf8(assert.get_output().stdout.clone())?;
	let value: serde_json::Value = serde_json::from_str(stdout.trim())?;
	assert_eq!(value["ok"], serde_json::Value::Bool(false));
	assert!(!value["stale"].as_array().expect("stale array").is_empty());

	Ok(())
}
