use std::path::PathBuf;

use rstest::fixture;
use tempfile::TempDir;

use crate::ANCHOR_MARKER;
use crate::BOUNDARY_TOKEN;

pub const SOURCE_TEXT: &str =
	"intro\n#include <nlohmann/json.hpp>\nPAYLOAD_LINE_1\nPAYLOAD_LINE_2\n";

pub const TARGET_TEXT: &str =
	"header\n// LunarECL (Minseok Kim)\n// https://github.com/LunarECL/LunarLog\nOLD_TAIL\n";

pub const MERGED_TEXT: &str = "header\n// LunarECL (Minseok Kim)\n// \
                               https://github.com/LunarECL/LunarLog\nPAYLOAD_LINE_1\nPAYLOAD_LINE_2\n";

/// A temporary project holding a modular header and its single-include
/// counterpart.
pub struct Workspace {
	pub dir: TempDir,
	pub source: PathBuf,
	pub target: PathBuf,
}

impl Workspace {
	pub fn with_contents(source: &str, target: &str) -> Self {
		let dir = tempfile::tempdir().unwrap_or_else(|e| panic!("tempdir: {e}"));
		let include = dir.path().join("include");
		let single_include = dir.path().join("single_include");
		std::fs::create_dir_all(&include).unwrap_or_else(|e| panic!("create include: {e}"));
		std::fs::create_dir_all(&single_include)
			.unwrap_or_else(|e| panic!("create single_include: {e}"));

		let source_path = include.join("lunar_log.hpp");
		let target_path = single_include.join("lunar_log.hpp");
		std::fs::write(&source_path, source).unwrap_or_else(|e| panic!("write source: {e}"));
		std::fs::write(&target_path, target).unwrap_or_else(|e| panic!("write target: {e}"));

		Self {
			dir,
			source: source_path,
			target: target_path,
		}
	}

	pub fn read_target(&self) -> String {
		std::fs::read_to_string(&self.target).unwrap_or_else(|e| panic!("read target: {e}"))
	}
}

#[fixture]
pub fn workspace() -> Workspace {
	Workspace::with_contents(SOURCE_TEXT, TARGET_TEXT)
}

/// A modular header shaped like the real library: license banner, includes,
/// then the library body after the json include.
pub fn modular_header(body: &str) -> String {
	format!(
		"#ifndef LUNAR_LOG_HPP\n#define LUNAR_LOG_HPP\n\n#include <string>\n{BOUNDARY_TOKEN}\n{body}"
	)
}

/// A single-include header with its banner and stale content after it.
pub fn single_include_header(stale: &str) -> String {
	format!("// Single include amalgamation{ANCHOR_MARKER}{stale}")
}
