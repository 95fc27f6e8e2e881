use std::collections::BTreeMap;
use std::path::Path;

use tracing::trace;

use crate::category::normalize_category;
use crate::category::resolve_category;
use crate::category::title_case;
use crate::config::CROSS_REFERENCE_HEADING;
use crate::config::GatherConfig;
use crate::pipeline::CopiedDoc;

/// Build the map of workflow file stem to its docs-root-relative link target
/// (`"intro"` → `"workflows/intro.md"`). The first file claiming a stem
/// wins; iteration over the map is ordered for deterministic output.
pub fn workflow_link_map(workflows: &[CopiedDoc]) -> BTreeMap<String, String> {
	let mut links = BTreeMap::new();

	for doc in workflows {
		let Some(stem) = doc.dest.file_stem().and_then(|stem| stem.to_str()) else {
			continue;
		};
		let Some(name) = doc.dest.file_name().and_then(|name| name.to_str()) else {
			continue;
		};

		links
			.entry(stem.to_string())
			.or_insert_with(|| format!("workflows/{name}"));
	}

	links
}

/// Insert a "Related Workflows" section into a workflow file.
///
/// Returns `None` when nothing changed: the section already exists (the
/// [`CROSS_REFERENCE_HEADING`] sentinel makes injection idempotent, though a
/// stale section is never refreshed), or no related workflows were found.
/// The section lands just before the last `## ` heading containing
/// "Summary"; files without one get it appended at the end.
pub fn inject_cross_references(
	config: &GatherConfig,
	source: &Path,
	content: &str,
	links: &BTreeMap<String, String>,
) -> Option<String> {
	if content.contains(CROSS_REFERENCE_HEADING) {
		return None;
	}

	let related = find_related(config, source, links);
	if related.is_empty() {
		return None;
	}

	let mut section = format!("\n{CROSS_REFERENCE_HEADING}\n\n");
	for (title, path) in &related {
		section.push_str(&format!("- [{title}]({path})\n"));
	}
	section.push('\n');

	let lines: Vec<&str> = content.split('\n').collect();
	let summary = lines
		.iter()
		.rposition(|line| line.starts_with("## ") && line.contains("Summary"));

	let Some(index) = summary else {
		return Some(format!("{content}{section}"));
	};

	let mut out: Vec<String> = lines.into_iter().map(str::to_string).collect();
	for (offset, line) in section.split('\n').enumerate() {
		out.insert(index + offset, line.to_string());
	}

	Some(out.join("\n"))
}

/// Collect `(title, link)` pairs for workflows related to `source`.
///
/// The source's category is normalized and looked up in the relationship
/// table; every known workflow whose stem contains one of the related
/// fragments (case-insensitive) is included, first occurrence of a title
/// wins. A workflow whose own stem contains a related fragment links to
/// itself.
fn find_related(
	config: &GatherConfig,
	source: &Path,
	links: &BTreeMap<String, String>,
) -> Vec<(String, String)> {
	let category = resolve_category(config, &source.to_string_lossy());
	let Some(fragments) = config.relationships.get(normalize_category(&category)) else {
		return Vec::new();
	};

	let mut related: Vec<(String, String)> = Vec::new();
	for fragment in fragments {
		for (stem, path) in links {
			if !stem.to_lowercase().contains(fragment.as_str()) {
				continue;
			}

			let title = title_case(&stem.replace('_', " "));
			if !related.iter().any(|(existing, _)| existing == &title) {
				related.push((title, path.clone()));
			}
		}
	}

	trace!(
		source = %source.display(),
		category = %category,
		count = related.len(),
		"resolved related workflows"
	);
	related
}
