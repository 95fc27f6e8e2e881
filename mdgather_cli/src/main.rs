use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use mdgather_cli::Commands;
use mdgather_cli::MdGatherCli;
use mdgather_cli::OutputFormat;
use mdgather_core::BuildPlan;
use mdgather_core::BuildReport;
use mdgather_core::GatherConfig;
use mdgather_core::LintOutcome;
use mdgather_core::StaleOutput;
use mdgather_core::plan_build;
use mdgather_core::run_markdown_lint;
use mdgather_core::stale_outputs;
use mdgather_core::validate_links;
use mdgather_core::write_plan;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = MdGatherCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_writer(std::io::stderr)
		.init();

	let result = match args.command {
		Some(Commands::Build { dry_run, skip_lint }) => run_build(&args, dry_run, skip_lint),
		Some(Commands::Check { diff, format }) => run_check(&args, diff, format),
		Some(Commands::List) => run_list(&args),
		Some(Commands::Lint) => run_lint(&args),
		None => {
			eprintln!("No subcommand specified. Run `mdgather --help` for usage.");
			process::exit(1);
		}
	};

	if let Err(e) = result {
		// Render through miette for rich diagnostics with help text and
		// error codes.
		match e.downcast::<mdgather_core::GatherError>() {
			Ok(gather_err) => {
				let report: miette::Report = (*gather_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

fn resolve_root(args: &MdGatherCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

fn load_plan(args: &MdGatherCli) -> Result<(GatherConfig, BuildPlan), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = GatherConfig::load(&root)?;
	let plan = plan_build(&root, &config)?;

	if args.verbose {
		println!(
			"Gathered {} file(s): {} workflow(s), {} example(s), {} rule(s), {} main",
			plan.files.len(),
			plan.files.workflows.len(),
			plan.files.examples.len(),
			plan.files.rules.len(),
			plan.files.main.len(),
		);
	}

	Ok((config, plan))
}

fn run_build(
	args: &MdGatherCli,
	dry_run: bool,
	skip_lint: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let (config, plan) = load_plan(args)?;

	if dry_run {
		println!("Dry run: would write {} file(s):", plan.outputs.len());
		for dest in plan.outputs.keys() {
			println!("  {}", make_relative(dest, &root));
		}
		return Ok(());
	}

	write_plan(&plan)?;

	if args.verbose {
		for dest in plan.outputs.keys() {
			println!("  wrote {}", make_relative(dest, &root));
		}
	}

	let mut report = BuildReport::new(&plan);
	report.broken_links = validate_links(&plan);
	if !skip_lint {
		report.lint = Some(run_markdown_lint(&root, &config));
	}

	println!("Documentation build complete.");
	println!(
		"  index:     {}",
		make_relative(&plan.docs_path.join("README.md"), &root)
	);
	println!("  workflows: {} file(s)", report.workflow_count);
	println!("  examples:  {} file(s)", report.example_count);
	println!("  rules:     {} file(s)", report.rule_count);
	println!("  main:      {} file(s)", report.main_count);

	if report.broken_links.is_empty() {
		println!("All internal links are valid.");
	} else {
		println!(
			"{} {} link validation issue(s):",
			colored!("warning:", yellow),
			report.broken_links.len()
		);
		for broken in &report.broken_links {
			println!("  - {}", broken.message());
		}
	}

	match &report.lint {
		Some(LintOutcome::Passed) => {
			println!("All markdown files pass linting.");
		}
		Some(LintOutcome::Failed { output }) => {
			println!("{} markdown linting issues:", colored!("warning:", yellow));
			for line in output.lines() {
				println!("  {line}");
			}
		}
		Some(LintOutcome::ToolMissing { program }) => {
			println!(
				"{} `{program}` not found. Install it with: npm install -g markdownlint-cli",
				colored!("warning:", yellow)
			);
		}
		None => {}
	}

	Ok(())
}

fn run_check(
	args: &MdGatherCli,
	show_diff: bool,
	format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let (_, plan) = load_plan(args)?;
	let stale = stale_outputs(&plan);

	if stale.is_empty() {
		match format {
			OutputFormat::Json => println!("{{\"ok\":true,\"stale\":[]}}"),
			OutputFormat::Text => println!("Check passed: docs/ is up to date."),
		}
		return Ok(());
	}

	match format {
		OutputFormat::Json => {
			let entries: Vec<serde_json::Value> = stale
				.iter()
				.map(|entry| {
					serde_json::json!({
						"file": make_relative(&entry.dest, &root),
						"missing": entry.missing,
					})
				})
				.collect();
			let output = serde_json::json!({ "ok": false, "stale": entries });
			println!("{output}");
		}
		OutputFormat::Text => {
			eprintln!("Check failed.");
			eprintln!();
			eprintln!("Stale outputs:");
			for entry in &stale {
				let rel = make_relative(&entry.dest, &root);
				let status = if entry.missing { "missing" } else { "stale" };
				eprintln!("  {rel} [{status}]");

				if show_diff {
					print_diff(entry);
				}
			}
			eprintln!();
			eprintln!(
				"{} output file(s) are out of date. Run `mdgather build` to fix.",
				stale.len()
			);
		}
	}

	process::exit(1);
}

fn run_list(args: &MdGatherCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let (_, plan) = load_plan(args)?;

	if plan.files.is_empty() {
		println!("No markdown files found to gather.");
		return Ok(());
	}

	let sections = [
		("Workflows:", &plan.files.workflows),
		("Examples:", &plan.files.examples),
		("Rules:", &plan.files.rules),
		("Main:", &plan.files.main),
	];

	let mut first = true;
	for (heading, docs) in sections {
		if docs.is_empty() {
			continue;
		}
		if !first {
			println!();
		}
		first = false;

		println!("{}", colored!(heading, bold));
		let mut sorted: Vec<_> = docs.iter().collect();
		sorted.sort_by(|a, b| a.source.cmp(&b.source));
		for doc in sorted {
			println!(
				"  {} -> {}",
				doc.source.display(),
				make_relative(&doc.dest, &root)
			);
		}
	}

	println!(
		"\n{} workflow(s), {} example(s), {} rule(s), {} main file(s)",
		plan.files.workflows.len(),
		plan.files.examples.len(),
		plan.files.rules.len(),
		plan.files.main.len(),
	);

	Ok(())
}

fn run_lint(args: &MdGatherCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let config = GatherConfig::load(&root)?;

	match run_markdown_lint(&root, &config) {
		LintOutcome::Passed => {
			println!("All markdown files pass linting.");
			Ok(())
		}
		LintOutcome::Failed { output } => {
			eprintln!("{} markdown linting issues:", colored!("error:", red));
			for line in output.lines() {
				eprintln!("  {line}");
			}
			process::exit(1);
		}
		LintOutcome::ToolMissing { program } => {
			println!(
				"{} `{program}` not found. Install it with: npm install -g markdownlint-cli",
				colored!("warning:", yellow)
			);
			Ok(())
		}
	}
}

/// Print a unified diff between the on-disk and expected content, colorized.
fn print_diff(entry: &StaleOutput) {
	let diff = TextDiff::from_lines(&entry.current, &entry.expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}

/// Make a path relative to root for display purposes.
fn make_relative(path: &Path, root: &Path) -> String {
	path.strip_prefix(root)
		.unwrap_or(path)
		.display()
		.to_string()
}
