mod common;

use mdgather_core::AnyEmptyResult;

#[test]
fn lint_reports_missing_tool_without_failing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_minimal_project(tmp.path())?;
	// Point the lint command at an executable that cannot exist so the
	// outcome is deterministic regardless of what is installed.
	std::fs::write(
		tmp.path().join("mdgather.toml"),
		"[lint]\nprogram = \"mdgather-test-missing-linter\"\n",
	)?;

	let mut cmd = common::mdgather_cmd();
	cmd.arg("lint")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("`mdgather-test-missing-linter` not found"));

	Ok(())
}
