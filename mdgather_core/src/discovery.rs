use std::path::Path;
use std::path::PathBuf;

use tracing::debug;

use crate::GatherResult;
use crate::config::GatherConfig;

/// Find all markdown files that feed the documentation build: `*.md` files
/// directly in the project root, everything under the workflow tree, and
/// everything under each auxiliary source directory.
///
/// Missing directories are not an error — there is simply nothing to
/// discover there. Ordering follows the directory traversal and is not
/// guaranteed stable; downstream consumers sort where ordering matters.
pub fn discover_markdown_files(
	root: &Path,
	config: &GatherConfig,
) -> GatherResult<Vec<PathBuf>> {
	let mut files = Vec::new();

	// Top-level files only; subdirectories are scanned selectively below.
	for entry in std::fs::read_dir(root)? {
		let entry = entry?;
		let path = entry.path();
		if path.is_file() && is_markdown_file(&path) {
			files.push(path);
		}
	}

	let workflows = root.join(&config.workflows_dir);
	if workflows.is_dir() {
		walk_dir(&workflows, &mut files)?;
	}

	for subdir in &config.aux_dirs {
		let dir = root.join(subdir);
		if dir.is_dir() {
			walk_dir(&dir, &mut files)?;
		}
	}

	debug!(count = files.len(), "discovered markdown files");
	Ok(files)
}

fn walk_dir(dir: &Path, files: &mut Vec<PathBuf>) -> GatherResult<()> {
	for entry in std::fs::read_dir(dir)? {
		let entry = entry?;
		let path = entry.path();

		if path.is_dir() {
			walk_dir(&path, files)?;
		} else if is_markdown_file(&path) {
			files.push(path);
		}
	}

	Ok(())
}

fn is_markdown_file(path: &Path) -> bool {
	path.extension().and_then(|ext| ext.to_str()) == Some("md")
}
