use std::collections::BTreeMap;
use std::path::Path;
use std::path::PathBuf;

use rstest::rstest;
use similar_asserts::assert_eq;

use super::__fixtures::*;
use super::*;
use crate::badges::inject_badges;
use crate::crossref::inject_cross_references;
use crate::crossref::workflow_link_map;

fn sample_links() -> BTreeMap<String, String> {
	workflow_link_map(&[
		doc(
			"workflows/01_data_wrangling/data_wrangling_intro.md",
			"docs/workflows/data_wrangling_intro.md",
		),
		doc(
			"workflows/02_visualization/visualization_basics.md",
			"docs/workflows/visualization_basics.md",
		),
	])
}

#[test]
fn badge_injection_inserts_block_after_first_heading() {
	let config = GatherConfig::default();
	let updated = inject_badges(&config, "# Intro\n\nBody.\n").expect("badges inserted");

	let expected = format!(
		"# Intro\n\n[{BADGE_MARKER}]({})\n[![R](https://img.shields.io/badge/R-4.0+-blue)](https://www.r-project.org/)\n[![Tidyverse](https://img.shields.io/badge/Tidyverse-Compatible-orange)](https://www.tidyverse.org/)\n[![License](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)\n\n\n\nBody.\n",
		config.repo_url
	);
	assert_eq!(updated, expected);
}

#[test]
fn badge_injection_is_idempotent() {
	let config = GatherConfig::default();
	let first = inject_badges(&config, "# Intro\n\nBody.\n").expect("badges inserted");

	assert!(inject_badges(&config, &first).is_none());
}

#[test]
fn badge_injection_requires_heading_in_first_ten_lines() {
	let config = GatherConfig::default();
	let content = format!("{}# Late Heading\n", "prose line\n".repeat(10));

	assert!(inject_badges(&config, &content).is_none());
}

#[test]
fn badge_injection_anchors_on_any_heading_level() {
	let config = GatherConfig::default();
	let updated = inject_badges(&config, "prose\n\n## Setup\n\nBody.\n").expect("badges inserted");

	let heading = updated.find("## Setup").expect("heading kept");
	let badges = updated.find(BADGE_MARKER).expect("badges present");
	assert!(badges > heading);
}

#[test]
fn crossref_appends_section_when_no_summary_heading() {
	let config = GatherConfig::default();
	let links = sample_links();
	let content = "# Workflow: Tidy Field Data\n\nIntro only.\n";
	let updated = inject_cross_references(
		&config,
		Path::new("workflows/01_data_wrangling/data_wrangling_intro.md"),
		content,
		&links,
	)
	.expect("section appended");

	let expected = format!(
		"{content}\n## Related Workflows\n\n- [Visualization \
		 Basics](workflows/visualization_basics.md)\n\n"
	);
	assert_eq!(updated, expected);
}

#[test]
fn crossref_inserts_before_last_summary_heading() {
	let config = GatherConfig::default();
	let links = sample_links();
	let updated = inject_cross_references(
		&config,
		Path::new("workflows/01_data_wrangling/data_wrangling_intro.md"),
		WRANGLING_WORKFLOW,
		&links,
	)
	.expect("section inserted");

	let section = updated.find("## Related Workflows").expect("section present");
	let summary = updated.find("## Summary").expect("summary kept");
	assert!(section < summary);
	assert!(updated.contains("- [Visualization Basics](workflows/visualization_basics.md)"));
}

#[test]
fn crossref_is_idempotent() {
	let config = GatherConfig::default();
	let links = sample_links();
	let source = Path::new("workflows/01_data_wrangling/data_wrangling_intro.md");
	let first = inject_cross_references(&config, source, WRANGLING_WORKFLOW, &links)
		.expect("section inserted");

	assert!(inject_cross_references(&config, source, &first, &links).is_none());
	assert_eq!(first.matches("## Related Workflows").count(), 1);
}

#[test]
fn crossref_skips_categories_without_relationships() {
	let config = GatherConfig::default();
	let links = sample_links();
	let updated = inject_cross_references(
		&config,
		Path::new("workflows/00_agentic_prompt_templates/prompt_basics.md"),
		"# Prompt Basics\n",
		&links,
	);

	assert!(updated.is_none());
}

#[rstest]
#[case::path_key("workflows/08_spatial_analysis/zebra.md", "08_spatial_analysis")]
#[case::path_key_wins_over_filename("workflows/08_spatial_analysis/diversity_notes.md", "08_spatial_analysis")]
#[case::keyword_tidy("docs/workflows/tidy_plots.md", "01_data_wrangling")]
#[case::keyword_plot("notes/plot_styles.md", "02_visualization")]
#[case::keyword_ladder_order("misc/spatial_time_series.md", "08_spatial_analysis")]
#[case::fallback("notes/random.md", "00_other")]
fn resolves_categories(#[case] path: &str, #[case] expected: &str) {
	let config = GatherConfig::default();
	assert_eq!(resolve_category(&config, path), expected);
}

#[rstest]
#[case("01_data_wrangling", "data_wrangling")]
#[case("10_population_simulation", "population_simulation")]
#[case("00_other", "other")]
#[case("population", "population")]
fn normalizes_category_keys(#[case] category: &str, #[case] expected: &str) {
	assert_eq!(normalize_category(category), expected);
}

#[rstest]
#[case("tidy data", "Tidy Data")]
#[case("01 intro", "01 Intro")]
#[case("mixedCASE word", "Mixedcase Word")]
#[case("", "")]
fn title_cases_strings(#[case] input: &str, #[case] expected: &str) {
	assert_eq!(title_case(input), expected);
}

#[rstest]
#[case::workflow_prefix("# Workflow: Spatial Joins\n\n**Goal:** ignored\n", "Spatial Joins")]
#[case::goal_outranks_generic_heading("**Goal:** Clean the data\n\n# Another Title\n", "Clean the data")]
#[case::generic_heading("# Plain Title\n\nBody.\n", "Plain Title")]
#[case::filename_fallback("no headings here\n", "Field Notes")]
fn extracts_workflow_titles(#[case] content: &str, #[case] expected: &str) {
	let title = extract_workflow_title(Path::new("field_notes.md"), content);
	assert_eq!(title, expected);
}

#[test]
fn generic_title_ignores_goal_lines() {
	let content = "**Goal:** not a title\n\n# Another Title\n";
	assert_eq!(extract_title(Path::new("field_notes.md"), content), "Another Title");
	assert_eq!(extract_title(Path::new("field_notes.md"), "prose\n"), "Field Notes");
}

#[test]
fn link_validation_reports_unknown_targets() {
	let mut files = FileMap::default();
	files
		.workflows
		.push(doc("workflows/01_data_wrangling/intro.md", "docs/workflows/intro.md"));
	let mut outputs = BTreeMap::new();
	outputs.insert(
		PathBuf::from("docs/workflows/intro.md"),
		"# Intro\n\n[text](nonexistent.md)\n\nSee [GitHub](https://github.com/example).\n"
			.to_string(),
	);
	let plan = BuildPlan {
		root: PathBuf::from("."),
		docs_path: PathBuf::from("docs"),
		files,
		outputs,
	};

	let broken = validate_links(&plan);
	assert_eq!(broken.len(), 1);
	assert_eq!(broken[0].file, "intro.md");
	assert_eq!(broken[0].target, "nonexistent.md");
	assert_eq!(
		broken[0].message(),
		"Broken link in intro.md: [text](nonexistent.md)"
	);
}

#[test]
fn link_validation_accepts_names_and_docs_relative_paths() {
	let mut files = FileMap::default();
	files
		.workflows
		.push(doc("workflows/01_data_wrangling/intro.md", "docs/workflows/intro.md"));
	files
		.workflows
		.push(doc("workflows/02_visualization/plots.md", "docs/workflows/plots.md"));
	let mut outputs = BTreeMap::new();
	outputs.insert(
		PathBuf::from("docs/workflows/intro.md"),
		"[by path](workflows/plots.md) and [by name](plots.md)\n".to_string(),
	);
	outputs.insert(PathBuf::from("docs/workflows/plots.md"), "# Plots\n".to_string());
	let plan = BuildPlan {
		root: PathBuf::from("."),
		docs_path: PathBuf::from("docs"),
		files,
		outputs,
	};

	assert!(validate_links(&plan).is_empty());
}

#[test]
fn index_groups_workflows_by_category() {
	let config = GatherConfig::default();
	let mut files = FileMap::default();
	files.workflows.push(doc(
		"workflows/01_data_wrangling/data_wrangling_intro.md",
		"docs/workflows/data_wrangling_intro.md",
	));
	files.workflows.push(doc(
		"workflows/01_data_wrangling/data_tidying.md",
		"docs/workflows/data_tidying.md",
	));
	files.workflows.push(doc(
		"workflows/02_visualization/visualization_basics.md",
		"docs/workflows/visualization_basics.md",
	));
	let mut contents = BTreeMap::new();
	contents.insert(
		PathBuf::from("docs/workflows/data_wrangling_intro.md"),
		WRANGLING_WORKFLOW.to_string(),
	);
	contents.insert(
		PathBuf::from("docs/workflows/data_tidying.md"),
		"# Tidying\n".to_string(),
	);
	contents.insert(
		PathBuf::from("docs/workflows/visualization_basics.md"),
		VIZ_WORKFLOW.to_string(),
	);

	let index = render_index(&config, &files, &contents);

	// One heading per category, in key order, despite two files in the
	// first category.
	assert_eq!(index.matches("#### 🧹 Data Wrangling").count(), 1);
	assert_eq!(index.matches("#### 📊 Visualization").count(), 1);
	let wrangling = index.find("#### 🧹 Data Wrangling").expect("wrangling heading");
	let visualization = index.find("#### 📊 Visualization").expect("viz heading");
	assert!(wrangling < visualization);

	assert!(index.contains("- [Tidy Field Data](workflows/data_wrangling_intro.md)"));
	assert!(index.contains("- [Tidying](workflows/data_tidying.md)"));
	assert!(index.contains("- [Plot Survey Trends](workflows/visualization_basics.md)"));

	// Static sections and closing block.
	assert!(index.contains("### 📖 Examples & Templates"));
	assert!(index.contains("### 📋 Rules & Guidelines"));
	assert!(index.contains("### 🏠 Main Documentation"));
	assert!(index.contains("```mermaid"));
	assert!(index.contains("*Generated automatically by mdgather*"));
}

#[test]
fn discovery_skips_missing_directories() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_sample_project(tmp.path())?;

	let config = GatherConfig::default();
	let files = discover_markdown_files(tmp.path(), &config)?;

	let mut names: Vec<String> = files
		.iter()
		.filter_map(|path| path.file_name().and_then(|name| name.to_str()))
		.map(str::to_string)
		.collect();
	names.sort();
	assert_eq!(
		names,
		[
			"README.md",
			"coral_survey.md",
			"data_wrangling_intro.md",
			"visualization_basics.md",
		]
	);

	Ok(())
}

#[test]
fn build_produces_badged_copy_and_grouped_index() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join("workflows/01_data_wrangling"))?;
	std::fs::write(
		tmp.path().join("workflows/01_data_wrangling/intro.md"),
		"# Intro\n",
	)?;

	let config = GatherConfig::default();
	let plan = plan_build(tmp.path(), &config)?;
	write_plan(&plan)?;

	let copy = std::fs::read_to_string(tmp.path().join("docs/workflows/intro.md"))?;
	assert!(copy.starts_with("# Intro\n\n[![Reproducible]"));
	assert!(copy.contains(BADGE_MARKER));

	let index = std::fs::read_to_string(tmp.path().join("docs/README.md"))?;
	let heading = index.find("#### 🧹 Data Wrangling").expect("category heading");
	let link = index.find("- [Intro](workflows/intro.md)").expect("workflow link");
	assert!(heading < link);

	Ok(())
}

#[test]
fn rebuild_over_written_tree_changes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_sample_project(tmp.path())?;

	let config = GatherConfig::default();
	let plan = plan_build(tmp.path(), &config)?;
	write_plan(&plan)?;

	let second = plan_build(tmp.path(), &config)?;
	assert!(stale_outputs(&second).is_empty());

	Ok(())
}

#[test]
fn uncategorized_files_are_dropped() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_sample_project(tmp.path())?;
	std::fs::create_dir_all(tmp.path().join("manuscript"))?;
	std::fs::write(tmp.path().join("manuscript/chapter_one.md"), "# Chapter One\n")?;

	let config = GatherConfig::default();
	let plan = plan_build(tmp.path(), &config)?;

	assert_eq!(plan.files.len(), 4);
	assert!(
		!plan
			.outputs
			.keys()
			.any(|dest| dest.file_name().is_some_and(|name| name == "chapter_one.md"))
	);

	Ok(())
}

#[test]
fn config_defaults_carry_full_tables() {
	let config = GatherConfig::default();
	assert_eq!(config.categories.len(), 11);
	assert_eq!(config.relationships.len(), 10);
	assert_eq!(config.keyword_rules.len(), 10);
	assert_eq!(config.lint.program, "markdownlint");
}

#[test]
fn config_file_overrides_presentation_values() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(
		tmp.path().join("mdgather.toml"),
		"repo_url = \"https://github.com/example/project\"\ntitle = \"Project \
		 Docs\"\n\n[lint]\nprogram = \"custom-lint\"\n",
	)?;

	let config = GatherConfig::load(tmp.path())?;
	assert_eq!(config.repo_url, "https://github.com/example/project");
	assert_eq!(config.title, "Project Docs");
	assert_eq!(config.lint.program, "custom-lint");
	// Untouched values keep their defaults.
	assert_eq!(config.docs_dir, "docs");
	assert_eq!(config.categories.len(), 11);

	Ok(())
}

#[test]
fn invalid_config_file_is_a_parse_error() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("mdgather.toml"), "repo_url = [not valid\n")?;

	let result = GatherConfig::load(tmp.path());
	assert!(matches!(result, Err(GatherError::ConfigParse(_))));

	Ok(())
}

#[test]
fn missing_lint_tool_is_a_distinct_outcome() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let mut config = GatherConfig::default();
	config.lint.program = "mdgather-test-missing-linter".into();

	let outcome = run_markdown_lint(tmp.path(), &config);
	assert!(matches!(
		outcome,
		LintOutcome::ToolMissing { ref program } if program == "mdgather-test-missing-linter"
	));

	Ok(())
}
