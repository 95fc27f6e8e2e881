use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::GatherError;
use crate::GatherResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"mdgather.toml",
	".mdgather.toml",
	".config/mdgather.toml",
];

/// Sentinel substring that marks a file as already carrying the reproduction
/// badge block. Badge injection is skipped when this occurs anywhere in the
/// content, which is what makes reruns over a partially built tree safe.
pub const BADGE_MARKER: &str =
	"![Reproducible](https://img.shields.io/badge/Reproducible-Yes-brightgreen)";

/// Sentinel heading that marks a file as already cross-referenced.
pub const CROSS_REFERENCE_HEADING: &str = "## Related Workflows";

/// Category assigned to workflow files that match neither a category key nor
/// any filename keyword rule.
pub const FALLBACK_CATEGORY: &str = "00_other";

/// One ordered filename-keyword rule used as a fallback when no category key
/// occurs in a file's path. Rules are tested in order and the first rule with
/// any matching keyword wins.
#[derive(Debug, Clone)]
pub struct KeywordRule {
	/// Substrings tested against the lowercased file stem.
	pub keywords: Vec<String>,
	/// Category key assigned when any keyword matches.
	pub category: String,
}

/// The external markdown lint invocation: program plus its fixed arguments.
#[derive(Debug, Clone)]
pub struct LintCommand {
	/// Executable name resolved through `PATH`.
	pub program: String,
	/// Value passed to `--config`.
	pub config: String,
	/// Glob argument handed to the tool verbatim (the tool expands it).
	pub glob: String,
}

/// Configuration for a documentation build.
///
/// All category, relationship, and keyword tables are carried here as
/// immutable data and passed explicitly into the functions that need them.
/// [`GatherConfig::default`] supplies the built-in tables; an optional
/// `mdgather.toml` can override the presentation-level values (repository
/// URL, index title, source directories, main filenames, and the lint
/// command) but never the tables themselves.
#[derive(Debug, Clone)]
pub struct GatherConfig {
	/// Repository URL used in badges and the generated index.
	pub repo_url: String,
	/// Project title used in the generated index header.
	pub title: String,
	/// Name of the output directory, relative to the project root.
	pub docs_dir: String,
	/// Name of the workflow source tree, relative to the project root.
	pub workflows_dir: String,
	/// Auxiliary source directories scanned recursively for markdown.
	pub aux_dirs: Vec<String>,
	/// Top-level filenames routed to the docs root.
	pub main_files: Vec<String>,
	/// Category key to display label. Keys sort in pipeline order because of
	/// their numeric prefixes.
	pub categories: BTreeMap<String, String>,
	/// Normalized category key to the related category fragments used for
	/// cross-reference lookup.
	pub relationships: BTreeMap<String, Vec<String>>,
	/// Ordered filename-keyword fallback rules for category resolution.
	pub keyword_rules: Vec<KeywordRule>,
	/// External lint invocation.
	pub lint: LintCommand,
}

impl Default for GatherConfig {
	fn default() -> Self {
		Self {
			repo_url: "https://github.com/fabbiologia/vibe-coding-for-ecology".into(),
			title: "Ecology Analysis Workflows".into(),
			docs_dir: "docs".into(),
			workflows_dir: "workflows".into(),
			aux_dirs: vec!["examples".into(), "rules".into(), "manuscript".into()],
			main_files: vec!["README.md".into(), "CODE_OF_CONDUCT.md".into()],
			categories: default_categories(),
			relationships: default_relationships(),
			keyword_rules: default_keyword_rules(),
			lint: LintCommand {
				program: "markdownlint".into(),
				config: ".markdownlint.json".into(),
				glob: "docs/**/*.md".into(),
			},
		}
	}
}

impl GatherConfig {
	/// Load configuration for a project root.
	///
	/// Returns the built-in defaults when no config file exists. The first
	/// file found in [`CONFIG_FILE_CANDIDATES`] order wins; later candidates
	/// are not consulted.
	pub fn load(root: &Path) -> GatherResult<Self> {
		let mut config = Self::default();

		for candidate in CONFIG_FILE_CANDIDATES {
			let path = root.join(candidate);
			if !path.is_file() {
				continue;
			}

			let content = std::fs::read_to_string(&path)?;
			let raw: RawConfig = toml::from_str(&content)
				.map_err(|error| GatherError::ConfigParse(error.to_string()))?;
			config.apply(raw);
			break;
		}

		Ok(config)
	}

	fn apply(&mut self, raw: RawConfig) {
		if let Some(repo_url) = raw.repo_url {
			self.repo_url = repo_url;
		}
		if let Some(title) = raw.title {
			self.title = title;
		}
		if let Some(source) = raw.source {
			if let Some(aux_dirs) = source.aux_dirs {
				self.aux_dirs = aux_dirs;
			}
			if let Some(main_files) = source.main_files {
				self.main_files = main_files;
			}
		}
		if let Some(lint) = raw.lint {
			if let Some(program) = lint.program {
				self.lint.program = program;
			}
			if let Some(config) = lint.config {
				self.lint.config = config;
			}
			if let Some(glob) = lint.glob {
				self.lint.glob = glob;
			}
		}
	}
}

/// Raw shape of an `mdgather.toml` file. Every key is optional; absent keys
/// keep their built-in defaults.
///
/// ```toml
/// repo_url = "https://github.com/example/project"
/// title = "Project Workflows"
///
/// [source]
/// aux_dirs = ["examples", "rules"]
/// main_files = ["README.md"]
///
/// [lint]
/// program = "markdownlint"
/// config = ".markdownlint.json"
/// glob = "docs/**/*.md"
/// ```
#[derive(Debug, Default, Deserialize)]
struct RawConfig {
	repo_url: Option<String>,
	title: Option<String>,
	#[serde(default)]
	source: Option<RawSourceConfig>,
	#[serde(default)]
	lint: Option<RawLintConfig>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSourceConfig {
	#[serde(default)]
	aux_dirs: Option<Vec<String>>,
	#[serde(default)]
	main_files: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize)]
struct RawLintConfig {
	#[serde(default)]
	program: Option<String>,
	#[serde(default)]
	config: Option<String>,
	#[serde(default)]
	glob: Option<String>,
}

fn default_categories() -> BTreeMap<String, String> {
	[
		("00_agentic_prompt_templates", "🤖 Agentic AI Templates"),
		("01_data_wrangling", "🧹 Data Wrangling"),
		("02_visualization", "📊 Visualization"),
		("03_univariate_models", "📈 Univariate Models"),
		("04_multivariate_analysis", "🔬 Multivariate Analysis"),
		("05_diversity_metrics", "🌿 Diversity Metrics"),
		("06_mixed_effects_models", "🔄 Mixed Effects Models"),
		("07_time_series_analysis", "⏰ Time Series Analysis"),
		("08_spatial_analysis", "🗺️ Spatial Analysis"),
		("09_species_distribution", "🦋 Species Distribution"),
		("10_population_simulation", "🔢 Population Simulation"),
	]
	.into_iter()
	.map(|(key, label)| (key.to_string(), label.to_string()))
	.collect()
}

fn default_relationships() -> BTreeMap<String, Vec<String>> {
	let entries: [(&str, [&str; 3]); 10] = [
		("data_wrangling", ["visualization", "univariate", "multivariate"]),
		("visualization", ["data_wrangling", "univariate", "multivariate"]),
		("univariate", ["data_wrangling", "visualization", "multivariate"]),
		("multivariate", ["data_wrangling", "visualization", "diversity"]),
		("diversity", ["multivariate", "spatial", "mixed_effects"]),
		("mixed_effects", ["univariate", "diversity", "population"]),
		("spatial", ["diversity", "species_distribution", "time_series"]),
		("species_distribution", ["spatial", "multivariate", "mixed_effects"]),
		("time_series", ["spatial", "mixed_effects", "population"]),
		("population", ["mixed_effects", "time_series", "species_distribution"]),
	];

	entries
		.into_iter()
		.map(|(key, related)| {
			(
				key.to_string(),
				related.iter().map(|fragment| (*fragment).to_string()).collect(),
			)
		})
		.collect()
}

fn rule(keywords: &[&str], category: &str) -> KeywordRule {
	KeywordRule {
		keywords: keywords.iter().map(|keyword| (*keyword).to_string()).collect(),
		category: category.to_string(),
	}
}

fn default_keyword_rules() -> Vec<KeywordRule> {
	// Order matters: the first rule with a matching keyword wins, so e.g. a
	// stem containing both "spatial" and "series" resolves to spatial
	// analysis.
	vec![
		rule(&["data", "wrangle", "tidy"], "01_data_wrangling"),
		rule(&["viz", "plot", "ggplot"], "02_visualization"),
		rule(&["model", "lm", "glm"], "03_univariate_models"),
		rule(&["pca", "ordination", "multivariate"], "04_multivariate_analysis"),
		rule(&["diversity", "shannon", "richness"], "05_diversity_metrics"),
		rule(&["mixed", "lmm", "glmm"], "06_mixed_effects_models"),
		rule(&["spatial", "gis", "raster"], "08_spatial_analysis"),
		rule(&["species", "distribution", "sdm"], "09_species_distribution"),
		rule(&["time", "series", "temporal"], "07_time_series_analysis"),
		rule(&["population", "simulation", "agent"], "10_population_simulation"),
	]
}
