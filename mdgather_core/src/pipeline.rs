use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::GatherError;
use crate::GatherResult;
use crate::badges::inject_badges;
use crate::config::GatherConfig;
use crate::crossref::inject_cross_references;
use crate::crossref::workflow_link_map;
use crate::discovery::discover_markdown_files;
use crate::index::render_index;
use crate::linkcheck::BrokenLink;
use crate::lint::LintOutcome;

/// A markdown file routed into the docs tree.
#[derive(Debug, Clone)]
pub struct CopiedDoc {
	/// Path of the source file, relative to the project root. Category
	/// resolution inspects this path so the numeric-prefixed source
	/// directories stay visible after the copy flattens file names.
	pub source: PathBuf,
	/// Destination path under the docs directory.
	pub dest: PathBuf,
}

/// Copied files grouped by destination category.
#[derive(Debug, Clone, Default)]
pub struct FileMap {
	pub workflows: Vec<CopiedDoc>,
	pub examples: Vec<CopiedDoc>,
	pub rules: Vec<CopiedDoc>,
	pub main: Vec<CopiedDoc>,
}

impl FileMap {
	/// Iterate every copied file across all categories.
	pub fn all(&self) -> impl Iterator<Item = &CopiedDoc> {
		self.workflows
			.iter()
			.chain(&self.examples)
			.chain(&self.rules)
			.chain(&self.main)
	}

	/// Total number of copied files.
	pub fn len(&self) -> usize {
		self.workflows.len() + self.examples.len() + self.rules.len() + self.main.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}

/// The fully computed result of a documentation build, before anything is
/// written to disk.
///
/// `outputs` holds the final content for every destination path — copies
/// with badges and cross-references applied, plus the generated index. The
/// split between computing a plan and [`write_plan`] is what backs the
/// `check` and `--dry-run` surfaces.
#[derive(Debug)]
pub struct BuildPlan {
	/// Project root the plan was computed from.
	pub root: PathBuf,
	/// Path of the docs output directory.
	pub docs_path: PathBuf,
	/// Copied files grouped by category.
	pub files: FileMap,
	/// Final content for every destination path, index included.
	pub outputs: BTreeMap<PathBuf, String>,
}

/// Summary of a completed build: per-category counts plus the diagnostics
/// collected after writing.
#[derive(Debug, Serialize)]
pub struct BuildReport {
	pub workflow_count: usize,
	pub example_count: usize,
	pub rule_count: usize,
	pub main_count: usize,
	/// Broken internal links found in the copied files. Collected, never
	/// fatal.
	pub broken_links: Vec<BrokenLink>,
	/// Outcome of the external lint invocation, when it ran.
	pub lint: Option<LintOutcome>,
}

impl BuildReport {
	/// Build a report carrying the plan's counts, with no diagnostics yet.
	pub fn new(plan: &BuildPlan) -> Self {
		Self {
			workflow_count: plan.files.workflows.len(),
			example_count: plan.files.examples.len(),
			rule_count: plan.files.rules.len(),
			main_count: plan.files.main.len(),
			broken_links: Vec::new(),
			lint: None,
		}
	}

	/// True when no broken links were found and lint (if it ran) passed.
	pub fn is_clean(&self) -> bool {
		self.broken_links.is_empty() && self.lint.as_ref().is_none_or(LintOutcome::is_pass)
	}
}

/// A destination file whose on-disk content differs from what the current
/// plan would produce.
#[derive(Debug, Serialize)]
pub struct StaleOutput {
	/// Destination path of the output file.
	pub dest: PathBuf,
	/// Content currently on disk; empty when the file is missing.
	pub current: String,
	/// Content the plan would write.
	pub expected: String,
	/// True when the file does not exist on disk at all.
	pub missing: bool,
}

enum Route {
	Workflows,
	Examples,
	Rules,
	Main,
}

/// Compute a full documentation build in memory.
///
/// Pipeline order follows the build steps: discover, route and copy,
/// inject badges, inject cross-references, render the index. The generated
/// index replaces any copied top-level `README.md` in the plan
/// unconditionally.
pub fn plan_build(root: &Path, config: &GatherConfig) -> GatherResult<BuildPlan> {
	if !root.is_dir() {
		return Err(GatherError::MissingRoot(root.display().to_string()));
	}

	let docs_path = root.join(&config.docs_dir);
	let discovered = discover_markdown_files(root, config)?;

	let mut files = FileMap::default();
	let mut outputs: BTreeMap<PathBuf, String> = BTreeMap::new();

	for path in discovered {
		let relative = path.strip_prefix(root).unwrap_or(&path).to_path_buf();
		let relative_str = relative.to_string_lossy().replace('\\', "/");
		let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
			continue;
		};

		let route = if relative_str.contains("workflows") {
			Some(Route::Workflows)
		} else if relative_str.contains("examples") {
			Some(Route::Examples)
		} else if relative_str.contains("rules") {
			Some(Route::Rules)
		} else if config.main_files.iter().any(|main| main == name) {
			Some(Route::Main)
		} else {
			None
		};

		let Some(route) = route else {
			// Files outside every category are dropped from the docs tree.
			debug!(file = %relative.display(), "skipping uncategorized file");
			continue;
		};

		let dest = match route {
			Route::Workflows => docs_path.join("workflows").join(name),
			Route::Examples => docs_path.join("examples").join(name),
			Route::Rules => docs_path.join("rules").join(name),
			Route::Main => docs_path.join(name),
		};

		let content = std::fs::read_to_string(&path).map_err(|error| GatherError::CopyFile {
			src: relative.display().to_string(),
			reason: error.to_string(),
		})?;

		outputs.insert(dest.clone(), content);
		let doc = CopiedDoc {
			source: relative,
			dest,
		};
		match route {
			Route::Workflows => files.workflows.push(doc),
			Route::Examples => files.examples.push(doc),
			Route::Rules => files.rules.push(doc),
			Route::Main => files.main.push(doc),
		}
	}

	// Badge injection, workflow files only.
	for doc in &files.workflows {
		if let Some(updated) = outputs
			.get(&doc.dest)
			.and_then(|content| inject_badges(config, content))
		{
			outputs.insert(doc.dest.clone(), updated);
		}
	}

	// Cross-references between workflows.
	let links = workflow_link_map(&files.workflows);
	for doc in &files.workflows {
		if let Some(updated) = outputs
			.get(&doc.dest)
			.and_then(|content| inject_cross_references(config, &doc.source, content, &links))
		{
			outputs.insert(doc.dest.clone(), updated);
		}
	}

	// The generated index replaces any copied top-level README.
	let index = render_index(config, &files, &outputs);
	outputs.insert(docs_path.join("README.md"), index);

	debug!(
		files = files.len(),
		outputs = outputs.len(),
		"computed build plan"
	);

	Ok(BuildPlan {
		root: root.to_path_buf(),
		docs_path,
		files,
		outputs,
	})
}

/// Persist a plan: create destination directories on demand and write every
/// output file, overwriting unconditionally.
pub fn write_plan(plan: &BuildPlan) -> GatherResult<()> {
	for (dest, content) in &plan.outputs {
		if let Some(parent) = dest.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(dest, content)?;
	}

	Ok(())
}

/// Compare a plan against what is currently on disk.
///
/// Every output whose on-disk content differs (or is missing) is returned;
/// an empty result means a build would change nothing.
pub fn stale_outputs(plan: &BuildPlan) -> Vec<StaleOutput> {
	let mut stale = Vec::new();

	for (dest, expected) in &plan.outputs {
		match std::fs::read_to_string(dest) {
			Ok(current) if &current == expected => {}
			Ok(current) => stale.push(StaleOutput {
				dest: dest.clone(),
				current,
				expected: expected.clone(),
				missing: false,
			}),
			Err(_) => stale.push(StaleOutput {
				dest: dest.clone(),
				current: String::new(),
				expected: expected.clone(),
				missing: true,
			}),
		}
	}

	stale
}
