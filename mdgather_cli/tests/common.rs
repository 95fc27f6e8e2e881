use assert_cmd::Command;

pub fn mdgather_cmd() -> Command {
	let mut cmd = Command::cargo_bin("mdgather").expect("mdgather binary builds");
	cmd.env("NO_COLOR", "1");
	cmd
}

/// Create the minimal project tree used across the integration tests: one
/// categorized workflow plus a root readme.
pub fn write_minimal_project(root: &std::path::Path) -> std::io::Result<()> {
	std::fs::create_dir_all(root.join("workflows/01_data_wrangling"))?;
	std::fs::write(root.join("workflows/01_data_wrangling/intro.md"), "# Intro\n")?;
	std::fs::write(root.join("README.md"), "# My Project\n")?;
	Ok(())
}
