use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::AmalgamError;
use crate::AmalgamResult;
use crate::Markers;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["amalgam.toml", ".amalgam.toml", ".config/amalgam.toml"];

/// Source file used when neither the command line nor the config names one.
pub const DEFAULT_SOURCE_PATH: &str = "../include/lunar_log.hpp";

/// Target file used when neither the command line nor the config names one.
pub const DEFAULT_TARGET_PATH: &str = "../single_include/lunar_log.hpp";

/// Configuration loaded from an `amalgam.toml` file.
///
/// ```toml
/// [paths]
/// source = "include/lunar_log.hpp"
/// target = "single_include/lunar_log.hpp"
///
/// [markers]
/// boundary = "#include <nlohmann/json.hpp>"
/// anchor = "\n// LunarECL (Minseok Kim)\n// https://github.com/LunarECL/LunarLog\n"
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct AmalgamConfig {
	/// File locations, relative to the project root.
	#[serde(default)]
	pub paths: PathsConfig,
	/// Overrides for the boundary token and the anchor marker.
	#[serde(default)]
	pub markers: MarkersConfig,
}

#[derive(Debug, Default, Deserialize)]
pub struct PathsConfig {
	pub source: Option<PathBuf>,
	pub target: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
pub struct MarkersConfig {
	pub boundary: Option<String>,
	pub anchor: Option<String>,
}

/// The source and target a merge runs against once command line, config and
/// defaults have been combined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePaths {
	pub source: PathBuf,
	pub target: PathBuf,
}

impl AmalgamConfig {
	/// Resolve the first config file found at `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if there is no config file.
	pub fn load(root: &Path) -> AmalgamResult<Option<AmalgamConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path).map_err(|source| {
			AmalgamError::Read {
				path: config_path.display().to_string(),
				source,
			}
		})?;
		let config: AmalgamConfig =
			toml::from_str(&content).map_err(|e| AmalgamError::ConfigParse {
				path: config_path.display().to_string(),
				reason: e.to_string(),
			})?;

		tracing::debug!(path = %config_path.display(), "loaded config");

		Ok(Some(config))
	}

	/// Build the markers, falling back to the built-in literals for any key
	/// that is not set.
	pub fn markers(&self) -> AmalgamResult<Markers> {
		let defaults = Markers::default();
		let boundary = self
			.markers
			.boundary
			.as_deref()
			.unwrap_or(defaults.boundary());
		let anchor = self.markers.anchor.as_deref().unwrap_or(defaults.anchor());

		Markers::new(boundary, anchor)
	}
}

/// Combine explicit paths with the config and the built-in defaults.
///
/// Explicit paths are used as given. Paths from the config and the defaults
/// are resolved against `root`.
pub fn resolve_merge_paths(
	root: &Path,
	config: Option<&AmalgamConfig>,
	source: Option<PathBuf>,
	target: Option<PathBuf>,
) -> MergePaths {
	let paths = config.map(|config| &config.paths);

	let source = source.unwrap_or_else(|| {
		root.join(
			paths
				.and_then(|paths| paths.source.as_deref())
				.unwrap_or(Path::new(DEFAULT_SOURCE_PATH)),
		)
	});
	let target = target.unwrap_or_else(|| {
		root.join(
			paths
				.and_then(|paths| paths.target.as_deref())
				.unwrap_or(Path::new(DEFAULT_TARGET_PATH)),
		)
	});

	MergePaths { source, target }
}

/// Markers from the config, or the built-in markers when there is no config.
pub fn load_markers(config: Option<&AmalgamConfig>) -> AmalgamResult<Markers> {
	config.map_or_else(|| Ok(Markers::default()), AmalgamConfig::markers)
}
