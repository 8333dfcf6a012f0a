use std::fmt;

use crate::AmalgamError;
use crate::AmalgamResult;

/// The line in the modular header after which the amalgamated payload
/// begins. The token's own line is never part of the payload.
pub const BOUNDARY_TOKEN: &str = "#include <nlohmann/json.hpp>";

/// The banner in the single-include header that the payload is spliced
/// after. Everything following it is replaced on every merge.
pub const ANCHOR_MARKER: &str =
	"\n// LunarECL (Minseok Kim)\n// https://github.com/LunarECL/LunarLog\n";

/// Which of the two literals a marker plays in a merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MarkerRole {
	/// Searched for in the source file.
	Boundary,
	/// Searched for in the target file.
	Anchor,
}

impl fmt::Display for MarkerRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Boundary => write!(f, "boundary token"),
			Self::Anchor => write!(f, "anchor marker"),
		}
	}
}

/// The pair of literals that form the contract between the source and
/// target files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Markers {
	boundary: String,
	anchor: String,
}

impl Default for Markers {
	fn default() -> Self {
		Self {
			boundary: BOUNDARY_TOKEN.to_string(),
			anchor: ANCHOR_MARKER.to_string(),
		}
	}
}

impl Markers {
	/// Build a marker pair. Empty literals are rejected since they match at
	/// offset zero of every file.
	pub fn new(boundary: impl Into<String>, anchor: impl Into<String>) -> AmalgamResult<Self> {
		let boundary = boundary.into();
		let anchor = anchor.into();

		if boundary.is_empty() {
			return Err(AmalgamError::InvalidMarker(MarkerRole::Boundary));
		}

		if anchor.is_empty() {
			return Err(AmalgamError::InvalidMarker(MarkerRole::Anchor));
		}

		Ok(Self { boundary, anchor })
	}

	pub fn boundary(&self) -> &str {
		&self.boundary
	}

	pub fn anchor(&self) -> &str {
		&self.anchor
	}

	/// Returns the literal for the given role.
	pub fn get(&self, role: MarkerRole) -> &str {
		match role {
			MarkerRole::Boundary => self.boundary(),
			MarkerRole::Anchor => self.anchor(),
		}
	}
}
