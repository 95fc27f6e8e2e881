use std::path::Path;
use std::path::PathBuf;

use crate::pipeline::CopiedDoc;

/// Shorthand for building a [`CopiedDoc`] from string paths.
pub fn doc(source: &str, dest: &str) -> CopiedDoc {
	CopiedDoc {
		source: PathBuf::from(source),
		dest: PathBuf::from(dest),
	}
}

/// A workflow body carrying every anchor the rewrites look for: a
/// `# Workflow:` title and a `## Summary` heading.
pub const WRANGLING_WORKFLOW: &str = "# Workflow: Tidy Field Data\n\nIntro paragraph.\n\n## \
                                      Steps\n\n1. Import the raw survey sheet.\n\n## \
                                      Summary\n\nClean data, ready for plotting.\n";

/// A workflow body with both a `# Workflow:` title and a `**Goal:**` line.
pub const VIZ_WORKFLOW: &str = "# Workflow: Plot Survey Trends\n\n**Goal:** Chart species counts \
                                over time.\n\nBody.\n";

/// Write a small but representative project tree: a root readme, two
/// categorized workflows, and one example. The `rules/` and `manuscript/`
/// directories are deliberately absent.
pub fn write_sample_project(root: &Path) -> std::io::Result<()> {
	std::fs::create_dir_all(root.join("workflows/01_data_wrangling"))?;
	std::fs::create_dir_all(root.join("workflows/02_visualization"))?;
	std::fs::create_dir_all(root.join("examples"))?;

	std::fs::write(root.join("README.md"), "# Sample Project\n")?;
	std::fs::write(
		root.join("workflows/01_data_wrangling/data_wrangling_intro.md"),
		WRANGLING_WORKFLOW,
	)?;
	std::fs::write(
		root.join("workflows/02_visualization/visualization_basics.md"),
		VIZ_WORKFLOW,
	)?;
	std::fs::write(root.join("examples/coral_survey.md"), "# Coral Survey Example\n")?;

	Ok(())
}
