use std::path::Path;

use crate::config::FALLBACK_CATEGORY;
use crate::config::GatherConfig;

/// Resolve the category of a workflow file from its path string.
///
/// The first category key that occurs as a substring of `path` wins. When no
/// key matches, the ordered filename-keyword rules are tested against the
/// lowercased file stem (first rule with any matching keyword wins). Files
/// matching nothing fall back to [`FALLBACK_CATEGORY`].
pub fn resolve_category(config: &GatherConfig, path: &str) -> String {
	for key in config.categories.keys() {
		if path.contains(key.as_str()) {
			return key.clone();
		}
	}

	let stem = file_stem_lowercase(path);
	for rule in &config.keyword_rules {
		if rule.keywords.iter().any(|keyword| stem.contains(keyword.as_str())) {
			return rule.category.clone();
		}
	}

	FALLBACK_CATEGORY.to_string()
}

/// Strip the numeric ordering prefix from a category key, producing the name
/// used to key the relationship table (`"01_data_wrangling"` becomes
/// `"data_wrangling"`).
pub fn normalize_category(category: &str) -> &str {
	category.split_once('_').map_or(category, |(_, rest)| rest)
}

/// Title-case a string: every alphabetic character that follows a
/// non-alphabetic one is uppercased, the rest are lowercased. Callers
/// replace underscores with spaces first, so `"tidy data"` becomes
/// `"Tidy Data"`.
pub fn title_case(input: &str) -> String {
	let mut out = String::with_capacity(input.len());
	let mut prev_is_alpha = false;

	for ch in input.chars() {
		if ch.is_alphabetic() {
			if prev_is_alpha {
				out.extend(ch.to_lowercase());
			} else {
				out.extend(ch.to_uppercase());
			}
			prev_is_alpha = true;
		} else {
			out.push(ch);
			prev_is_alpha = false;
		}
	}

	out
}

fn file_stem_lowercase(path: &str) -> String {
	Path::new(path)
		.file_stem()
		.and_then(|stem| stem.to_str())
		.unwrap_or_default()
		.to_lowercase()
}
