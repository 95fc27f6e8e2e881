//! `mdgather_core` is the core library for the `mdgather` documentation
//! aggregator. It collects markdown files from a project tree into a unified
//! `docs/` folder, injects reproduction badges and "Related Workflows"
//! cross-references, generates an index page, validates internal links, and
//! invokes an external markdown linter.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Project tree
//!   → Discovery (root *.md + workflows/ + auxiliary directories)
//!   → Copy & categorize (route into docs/ subdirectories)
//!   → Badge injection (reproduction badges after the first heading)
//!   → Cross-references (Related Workflows sections)
//!   → Index generation (docs/README.md)
//!   → Link validation + markdownlint
//! ```
//!
//! The pipeline is computed in memory first ([`plan_build`]) and persisted
//! afterwards ([`write_plan`]), which is what backs dry runs and staleness
//! checks. No step is fatal: missing source directories are skipped,
//! uncategorized files are dropped, files without an early heading keep
//! their content untouched, and broken links or a missing lint tool are
//! collected as diagnostics.
//!
//! ## Modules
//!
//! - [`config`] — [`GatherConfig`] with the category/relationship/keyword
//!   tables as explicit immutable data, plus optional `mdgather.toml`
//!   overrides for the presentation-level values.
//! - [`pipeline`] — plan computation, persistence, and staleness checks.
//! - [`badges`] / [`crossref`] — the sentinel-guarded content rewrites.
//! - [`index`] — the generated documentation index.
//! - [`titles`] — title extraction with its fixed pattern precedence.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use mdgather_core::GatherConfig;
//! use mdgather_core::LintOutcome;
//! use mdgather_core::plan_build;
//! use mdgather_core::run_markdown_lint;
//! use mdgather_core::validate_links;
//! use mdgather_core::write_plan;
//!
//! let root = Path::new(".");
//! let config = GatherConfig::load(root).unwrap();
//! let plan = plan_build(root, &config).unwrap();
//! write_plan(&plan).unwrap();
//!
//! for broken in validate_links(&plan) {
//! 	eprintln!("{}", broken.message());
//! }
//! if let LintOutcome::Failed { output } = run_markdown_lint(root, &config) {
//! 	eprintln!("{output}");
//! }
//! ```

pub use badges::*;
pub use category::*;
pub use config::*;
pub use crossref::*;
pub use discovery::*;
pub use error::*;
pub use index::*;
pub use linkcheck::*;
pub use lint::*;
pub use pipeline::*;
pub use titles::*;

pub mod badges;
pub mod category;
pub mod config;
pub mod crossref;
mod discovery;
mod error;
pub mod index;
mod linkcheck;
mod lint;
pub mod pipeline;
pub mod titles;

#[cfg(test)]
mod __fixtures;
#[cfg(test)]
mod __tests;
