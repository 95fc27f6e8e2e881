use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::pipeline::BuildPlan;

/// Markdown link syntax: `[text](target)`. Image links match on their inner
/// `[alt](src)` pair, which is fine — image sources are URLs and get
/// skipped by the scheme check.
static LINK_PATTERN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern is valid"));

/// A link target that resolves to no known file in the docs tree.
#[derive(Debug, Clone, Serialize)]
pub struct BrokenLink {
	/// File name of the document containing the link.
	pub file: String,
	/// The link text.
	pub text: String,
	/// The unresolved link target.
	pub target: String,
}

impl BrokenLink {
	/// Human-readable diagnostic line.
	pub fn message(&self) -> String {
		format!("Broken link in {}: [{}]({})", self.file, self.text, self.target)
	}
}

/// Validate internal links across every copied file in the plan.
///
/// A target is known when it matches either a copied file's name or its
/// docs-relative path. Targets starting with `http` are external and
/// skipped. Results are diagnostics for the operator — never fatal.
pub fn validate_links(plan: &BuildPlan) -> Vec<BrokenLink> {
	let mut known: HashSet<String> = HashSet::new();
	for doc in plan.files.all() {
		if let Some(name) = doc.dest.file_name().and_then(|name| name.to_str()) {
			known.insert(name.to_string());
		}
		if let Ok(relative) = doc.dest.strip_prefix(&plan.docs_path) {
			known.insert(relative.to_string_lossy().replace('\\', "/"));
		}
	}

	let mut broken = Vec::new();
	for doc in plan.files.all() {
		let Some(content) = plan.outputs.get(&doc.dest) else {
			continue;
		};
		let file = doc
			.dest
			.file_name()
			.and_then(|name| name.to_str())
			.unwrap_or_default()
			.to_string();

		for captures in LINK_PATTERN.captures_iter(content) {
			let text = &captures[1];
			let target = &captures[2];

			if target.starts_with("http") {
				continue;
			}

			if !known.contains(target) {
				broken.push(BrokenLink {
					file: file.clone(),
					text: text.to_string(),
					target: target.to_string(),
				});
			}
		}
	}

	broken
}
