use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::PathBuf;

use crate::category::resolve_category;
use crate::config::GatherConfig;
use crate::pipeline::CopiedDoc;
use crate::pipeline::FileMap;
use crate::titles::extract_title;
use crate::titles::extract_workflow_title;
use crate::titles::fallback_title;

/// Render the documentation index (`docs/README.md`).
///
/// Workflow entries are sorted by `(category, file name)` so each category
/// heading is emitted exactly once, followed by the static examples, rules,
/// and main-file sections and the fixed closing block. `contents` maps every
/// destination path to its final (badge- and cross-reference-injected)
/// content, which is where the link titles come from.
pub fn render_index(
	config: &GatherConfig,
	files: &FileMap,
	contents: &BTreeMap<PathBuf, String>,
) -> String {
	let mut index = header(config);

	// Workflows, grouped by category.
	let mut workflows: Vec<(String, &CopiedDoc)> = files
		.workflows
		.iter()
		.map(|doc| {
			(
				resolve_category(config, &doc.source.to_string_lossy()),
				doc,
			)
		})
		.collect();
	workflows.sort_by(|a, b| a.0.cmp(&b.0).then_with(|| a.1.dest.cmp(&b.1.dest)));

	let mut current_category: Option<&str> = None;
	for (category, doc) in &workflows {
		if current_category != Some(category.as_str()) {
			current_category = Some(category.as_str());
			let label = config
				.categories
				.get(category)
				.map_or(category.as_str(), String::as_str);
			index.push('\n');
			let _ = writeln!(index, "#### {label}");
			index.push('\n');
		}

		let title = contents.get(&doc.dest).map_or_else(
			|| fallback_title(&doc.dest),
			|content| extract_workflow_title(&doc.dest, content),
		);
		let _ = writeln!(index, "- [{title}](workflows/{})", file_name(doc));
	}

	index.push_str("\n\n### 📖 Examples & Templates\n\n");
	push_doc_links(&mut index, &files.examples, contents, Some("examples"));

	index.push_str("\n\n### 📋 Rules & Guidelines\n\n");
	push_doc_links(&mut index, &files.rules, contents, Some("rules"));

	index.push_str("\n\n### 🏠 Main Documentation\n\n");
	push_doc_links(&mut index, &files.main, contents, None);

	index.push_str(&closing(config));
	index
}

fn header(config: &GatherConfig) -> String {
	let mut out = String::new();
	let _ = writeln!(out, "# 🌱 {}: Documentation Index", config.title);
	out.push('\n');
	let _ = writeln!(
		out,
		"Welcome to the complete documentation for **{}**! This index provides organized access \
		 to all workflows, examples, and guidelines for agentic AI-assisted ecological analysis.",
		config.title
	);
	out.push('\n');
	let _ = writeln!(
		out,
		"[![Reproducible](https://img.shields.io/badge/Reproducible-Yes-brightgreen)]({})",
		config.repo_url
	);
	out.push_str("[![R](https://img.shields.io/badge/R-4.0+-blue)](https://www.r-project.org/)\n");
	out.push_str(
		"[![Tidyverse](https://img.shields.io/badge/Tidyverse-Compatible-orange)](https://www.tidyverse.org/)\n",
	);
	out.push_str(
		"[![License](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)\n",
	);
	out.push_str("\n## 🎯 Quick Start\n\n");
	out.push_str(
		"1. **For AI Agents**: Copy any workflow template and paste into your AI coding \
		 environment\n",
	);
	out.push_str("2. **For Researchers**: Clone the repository and follow the structured workflows\n");
	out.push_str("3. **For Contributors**: Check the rules and contributing guidelines\n");
	out.push_str("\n## 📚 Documentation Structure\n\n### 🔬 Workflow Categories\n");
	out
}

/// Append `- [Title](prefix/name)` lines for a sorted category bucket.
fn push_doc_links(
	index: &mut String,
	docs: &[CopiedDoc],
	contents: &BTreeMap<PathBuf, String>,
	prefix: Option<&str>,
) {
	let mut sorted: Vec<&CopiedDoc> = docs.iter().collect();
	sorted.sort_by(|a, b| a.dest.cmp(&b.dest));

	for doc in sorted {
		let title = contents.get(&doc.dest).map_or_else(
			|| fallback_title(&doc.dest),
			|content| extract_title(&doc.dest, content),
		);
		let name = file_name(doc);
		let _ = match prefix {
			Some(prefix) => writeln!(index, "- [{title}]({prefix}/{name})"),
			None => writeln!(index, "- [{title}]({name})"),
		};
	}
}

fn file_name(doc: &CopiedDoc) -> &str {
	doc.dest
		.file_name()
		.and_then(|name| name.to_str())
		.unwrap_or_default()
}

fn closing(config: &GatherConfig) -> String {
	let mut out = String::new();
	out.push_str("\n\n## 🔄 Workflow Dependencies\n\n");
	out.push_str("The workflows are designed to build upon each other:\n\n");
	out.push_str("```mermaid\n");
	out.push_str("graph TD\n");
	out.push_str("    A[00_agentic_prompt_templates] --> B[01_data_wrangling]\n");
	out.push_str("    B --> C[02_visualization]\n");
	out.push_str("    B --> D[03_univariate_models]\n");
	out.push_str("    B --> E[04_multivariate_analysis]\n");
	out.push_str("    E --> F[05_diversity_metrics]\n");
	out.push_str("    D --> G[06_mixed_effects_models]\n");
	out.push_str("    F --> H[08_spatial_analysis]\n");
	out.push_str("    H --> I[09_species_distribution]\n");
	out.push_str("    G --> J[10_population_simulation]\n");
	out.push_str("    H --> K[07_time_series_analysis]\n");
	out.push_str("```\n\n");
	out.push_str("## 🧪 Quality Assurance\n\n");
	out.push_str("All documentation has been:\n\n");
	out.push_str("- ✅ **Linted** with markdownlint for consistency\n");
	out.push_str("- ✅ **Cross-referenced** for workflow interconnections\n");
	out.push_str("- ✅ **Badge-enhanced** for reproducibility tracking\n");
	out.push_str("- ✅ **Organized** in logical categories\n");
	out.push_str("- ✅ **Validated** for internal link integrity\n\n");
	out.push_str("## 🚀 Getting Started\n\n");
	out.push_str("### For AI Agents\n\n");
	out.push_str("1. Browse the workflow categories above\n");
	out.push_str("2. Copy the relevant workflow template\n");
	out.push_str("3. Paste into your AI coding environment\n");
	out.push_str("4. Adapt to your specific research question\n\n");
	out.push_str("### For Manual Use\n\n");
	let _ = writeln!(out, "1. Clone the repository: `git clone {}`", config.repo_url);
	out.push_str("2. Navigate to the workflow of interest\n");
	out.push_str("3. Follow the workflow structure from setup through reproduction\n\n");
	out.push_str("## 📞 Support\n\n");
	let _ = writeln!(
		out,
		"- **Issues**: Report bugs or request features on [GitHub Issues]({}/issues)",
		config.repo_url
	);
	let _ = writeln!(
		out,
		"- **Discussions**: Join the conversation on [GitHub Discussions]({}/discussions)",
		config.repo_url
	);
	out.push_str("- **Contributing**: See [CONTRIBUTING.md](rules/CONTRIBUTING.md)\n\n");
	out.push_str("---\n\n");
	out.push_str("*Generated automatically by mdgather*\n");
	out
}
