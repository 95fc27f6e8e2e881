use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum GatherError {
	#[error(transparent)]
	#[diagnostic(code(mdgather::io_error))]
	Io(#[from] std::io::Error),

	#[error("project root is not a directory: `{0}`")]
	#[diagnostic(
		code(mdgather::missing_root),
		help("pass an existing project directory with `--path`")
	)]
	MissingRoot(String),

	#[error("failed to read `{src}`: {reason}")]
	#[diagnostic(code(mdgather::copy_file))]
	CopyFile { src: String, reason: String },

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(mdgather::config_parse),
		help("check that mdgather.toml is valid TOML; every key is optional")
	)]
	ConfigParse(String),
}

pub type GatherResult<T> = Result<T, GatherError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
