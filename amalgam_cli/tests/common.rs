#![allow(dead_code)]

use std::path::PathBuf;

use assert_cmd::Command;
use tempfile::TempDir;

pub const SOURCE_TEXT: &str =
	"intro\n#include <nlohmann/json.hpp>\nPAYLOAD_LINE_1\nPAYLOAD_LINE_2\n";

pub const TARGET_TEXT: &str =
	"header\n// LunarECL (Minseok Kim)\n// https://github.com/LunarECL/LunarLog\nOLD_TAIL\n";

pub const MERGED_TEXT: &str = "header\n// LunarECL (Minseok Kim)\n// \
                               https://github.com/LunarECL/LunarLog\nPAYLOAD_LINE_1\nPAYLOAD_LINE_2\n";

pub fn amalgam_cmd() -> Command {
	let mut cmd = Command::cargo_bin("amalgam").unwrap_or_else(|e| panic!("amalgam binary: {e}"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// A temporary checkout laid out like the library repository: `include/`,
/// `single_include/` and a `tools/` directory to run from.
pub struct Project {
	pub dir: TempDir,
}

impl Project {
	pub fn new(source: &str, target: &str) -> std::io::Result<Self> {
		let dir = tempfile::tempdir()?;
		std::fs::create_dir_all(dir.path().join("include"))?;
		std::fs::create_dir_all(dir.path().join("single_include"))?;
		std::fs::create_dir_all(dir.path().join("tools"))?;
		std::fs::write(dir.path().join("include/lunar_log.hpp"), source)?;
		std::fs::write(dir.path().join("single_include/lunar_log.hpp"), target)?;

		Ok(Self { dir })
	}

	pub fn root(&self) -> PathBuf {
		self.dir.path().to_path_buf()
	}

	pub fn tools(&self) -> PathBuf {
		self.dir.path().join("tools")
	}

	pub fn source(&self) -> PathBuf {
		self.dir.path().join("include/lunar_log.hpp")
	}

	pub fn target(&self) -> PathBuf {
		self.dir.path().join("single_include/lunar_log.hpp")
	}

	pub fn read_target(&self) -> std::io::Result<String> {
		std::fs::read_to_string(self.target())
	}
}
