use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Gather project markdown into a unified docs folder.",
	long_about = "mdgather collects markdown files from a project tree into a unified docs/ \
	              folder: workflow, example, and rule files are copied into category \
	              subdirectories, workflow files gain reproduction badges and Related Workflows \
	              cross-references, and a generated index ties everything together.\n\nQuick \
	              start:\n  mdgather build  Build the docs/ tree\n  mdgather check  Verify docs/ \
	              is up to date\n  mdgather list   Show which files a build would gather\n  \
	              mdgather lint   Run the external markdown linter"
)]
pub struct MdGatherCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Build the docs/ tree from the project's markdown files.
	///
	/// Discovers markdown under the project root, the workflows tree, and the
	/// auxiliary source directories; copies everything into category
	/// subdirectories of docs/; injects reproduction badges and Related
	/// Workflows sections into workflow files; generates the documentation
	/// index; then validates internal links and runs the external markdown
	/// linter. Link problems and a missing lint tool are reported as
	/// diagnostics — the build itself always completes.
	Build {
		/// Preview the files a build would write without writing them.
		#[arg(long, default_value_t = false)]
		dry_run: bool,

		/// Skip the external markdownlint invocation.
		#[arg(long, default_value_t = false)]
		skip_lint: bool,
	},
	/// Check that docs/ matches what a build would produce.
	///
	/// Computes the full build in memory and compares every output file
	/// against what is currently on disk. Exits with a non-zero status code
	/// when any output is stale or missing, which makes this suitable for CI
	/// pipelines. Use `--diff` to see exactly what changed.
	Check {
		/// Show a unified diff for each stale output file.
		#[arg(long, default_value_t = false)]
		diff: bool,

		/// Output format for check results. Use `text` for human-readable
		/// output or `json` for programmatic consumption.
		#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
		format: OutputFormat,
	},
	/// List the files a build would gather, grouped by category.
	///
	/// Runs discovery and categorization without writing anything. Useful
	/// for auditing which files end up in docs/ and which are dropped as
	/// uncategorized.
	List,
	/// Run only the external markdown linter over docs/.
	///
	/// Invokes the configured lint command from the project root. A missing
	/// lint executable is reported as a diagnostic, not a failure.
	Lint,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption.
	Json,
}
