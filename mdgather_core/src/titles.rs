use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::category::title_case;

/// Title patterns for workflow files, in precedence order: the explicit
/// `# Workflow:` heading, then a `**Goal:**` line, then any top-level
/// heading.
static WORKFLOW_TITLE_PATTERNS: LazyLock<[Regex; 3]> = LazyLock::new(|| {
	[
		Regex::new(r"(?m)^# Workflow: (.+)$").expect("workflow title pattern is valid"),
		Regex::new(r"(?m)^\*\*Goal:\*\* (.+)$").expect("goal pattern is valid"),
		Regex::new(r"(?m)^# (.+)$").expect("heading pattern is valid"),
	]
});

static HEADING_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"(?m)^# (.+)$").expect("heading pattern is valid"));

/// Extract the title of a workflow file, trying each pattern in precedence
/// order and falling back to the filename.
pub fn extract_workflow_title(path: &Path, content: &str) -> String {
	for pattern in WORKFLOW_TITLE_PATTERNS.iter() {
		if let Some(title) = pattern.captures(content).and_then(|captures| captures.get(1)) {
			return title.as_str().trim().to_string();
		}
	}

	fallback_title(path)
}

/// Extract the title of any markdown file from its first top-level heading,
/// falling back to the filename.
pub fn extract_title(path: &Path, content: &str) -> String {
	HEADING_PATTERN
		.captures(content)
		.and_then(|captures| captures.get(1))
		.map_or_else(
			|| fallback_title(path),
			|title| title.as_str().trim().to_string(),
		)
}

/// Derive a display title from a file name: underscores become spaces, then
/// title-case.
pub fn fallback_title(path: &Path) -> String {
	let stem = path
		.file_stem()
		.and_then(|stem| stem.to_str())
		.unwrap_or_default();
	title_case(&stem.replace('_', " "))
}
