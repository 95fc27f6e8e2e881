use crate::config::BADGE_MARKER;
use crate::config::GatherConfig;

/// The badge block spliced in after a workflow's first heading: a blank
/// separator line, the four badge lines, and two trailing blank lines.
fn badge_lines(config: &GatherConfig) -> [String; 7] {
	[
		String::new(),
		format!("[{BADGE_MARKER}]({})", config.repo_url),
		"[![R](https://img.shields.io/badge/R-4.0+-blue)](https://www.r-project.org/)".into(),
		"[![Tidyverse](https://img.shields.io/badge/Tidyverse-Compatible-orange)](https://www.tidyverse.org/)"
			.into(),
		"[![License](https://img.shields.io/badge/License-MIT-yellow.svg)](https://opensource.org/licenses/MIT)"
			.into(),
		String::new(),
		String::new(),
	]
}

/// Insert the reproduction badge block after the first heading found within
/// the first 10 lines of `content`.
///
/// Returns `None` when nothing changed: either the content already carries
/// the [`BADGE_MARKER`] sentinel (injection is idempotent), or no heading
/// occurs early enough to anchor the block.
pub fn inject_badges(config: &GatherConfig, content: &str) -> Option<String> {
	if content.contains(BADGE_MARKER) {
		return None;
	}

	let lines: Vec<&str> = content.split('\n').collect();
	let heading = lines
		.iter()
		.take(10)
		.position(|line| line.starts_with('#'))?;

	let mut out: Vec<String> = lines.into_iter().map(str::to_string).collect();
	for (offset, line) in badge_lines(config).into_iter().enumerate() {
		out.insert(heading + 1 + offset, line);
	}

	Some(out.join("\n"))
}
