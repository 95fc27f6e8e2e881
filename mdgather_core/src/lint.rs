use std::io::ErrorKind;
use std::path::Path;
use std::process::Command;

use serde::Serialize;
use tracing::debug;

use crate::config::GatherConfig;

/// Outcome of the external markdown lint invocation.
///
/// A missing executable is a distinct outcome rather than an error: the
/// build completes either way, and the operator gets an actionable
/// diagnostic instead of a crash.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum LintOutcome {
	/// The tool exited with status zero.
	Passed,
	/// The tool exited non-zero; its captured standard output is attached.
	Failed { output: String },
	/// The tool executable was not found on `PATH`.
	ToolMissing { program: String },
}

impl LintOutcome {
	pub fn is_pass(&self) -> bool {
		matches!(self, Self::Passed)
	}
}

/// Run the configured markdown linter from the project root.
///
/// The glob argument is passed to the tool verbatim (no shell is involved;
/// the tool expands it itself). No timeout is enforced.
pub fn run_markdown_lint(root: &Path, config: &GatherConfig) -> LintOutcome {
	let lint = &config.lint;
	debug!(program = %lint.program, glob = %lint.glob, "running markdown lint");

	let result = Command::new(&lint.program)
		.arg("--config")
		.arg(&lint.config)
		.arg(&lint.glob)
		.current_dir(root)
		.output();

	match result {
		Ok(output) if output.status.success() => LintOutcome::Passed,
		Ok(output) => LintOutcome::Failed {
			output: String::from_utf8_lossy(&output.stdout).into_owned(),
		},
		Err(error) if error.kind() == ErrorKind::NotFound => LintOutcome::ToolMissing {
			program: lint.program.clone(),
		},
		Err(error) => LintOutcome::Failed {
			output: error.to_string(),
		},
	}
}
