use miette::Diagnostic;
use thiserror::Error;

use crate::MarkerRole;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum AmalgamError {
	#[error("failed to read `{path}`")]
	#[diagnostic(
		code(amalgam::read),
		help("check that the file exists, is readable, and contains valid UTF-8 text")
	)]
	Read {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write `{path}`")]
	#[diagnostic(
		code(amalgam::write),
		help("check that the target directory is writable and has free space")
	)]
	Write {
		path: String,
		#[source]
		source: std::io::Error,
	},

	#[error("{role} {marker:?} not found in `{file}`")]
	#[diagnostic(
		code(amalgam::marker_not_found),
		help(
			"add the {role} verbatim to `{file}` or configure it under [markers] in amalgam.toml; \
			 markers match byte for byte, so a file with CRLF line endings does not match a marker \
			 written with LF"
		)
	)]
	MarkerNotFound {
		role: MarkerRole,
		marker: String,
		file: String,
	},

	#[error("the {0} must not be empty")]
	#[diagnostic(
		code(amalgam::invalid_marker),
		help("set a non-empty value under [markers] in amalgam.toml")
	)]
	InvalidMarker(MarkerRole),

	#[error("failed to parse config file `{path}`: {reason}")]
	#[diagnostic(
		code(amalgam::config_parse),
		help("check that amalgam.toml is valid TOML with [paths] and/or [markers] sections")
	)]
	ConfigParse { path: String, reason: String },
}

impl AmalgamError {
	/// Returns true when the failure is a missing boundary token or anchor
	/// marker rather than an I/O or configuration problem.
	pub fn is_marker_not_found(&self) -> bool {
		matches!(self, Self::MarkerNotFound { .. })
	}
}

pub type AmalgamResult<T> = Result<T, AmalgamError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
