use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Build the single-include header from the modular library header.",
	long_about = "amalgam copies everything after the `#include <nlohmann/json.hpp>` line of \
	              the modular header into the single-include header, right after its LunarECL \
	              banner. Whatever followed the banner is replaced.\n\nQuick start:\n  amalgam \
	              merge          Merge the default files\n  amalgam merge SRC DST  Merge \
	              explicit files\n  amalgam check          Verify the single-include header \
	              is up to date"
)]
pub struct AmalgamCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Project root used to discover `amalgam.toml` and to resolve the
	/// default source and target paths. Defaults to the current directory.
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
	/// Splice the source payload into the target file.
	///
	/// Reads the source, takes everything after the boundary token's line,
	/// and rewrites the target so that the payload directly follows the
	/// anchor marker. The new content is computed in full before the target
	/// is replaced through a temporary file and a rename.
	///
	/// This is the default when no subcommand is given.
	Merge {
		#[command(flatten)]
		files: FileArgs,

		/// Preview changes without writing the target. Prints a unified diff
		/// of the target's current and merged content.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that the target already contains the current source payload.
	///
	/// Computes the merge without writing and exits with a non-zero status
	/// code if the target would change. Ideal for CI pipelines that must
	/// not ship a stale single-include header.
	Check {
		#[command(flatten)]
		files: FileArgs,

		/// Show a unified diff between the current and the expected target.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
}

#[derive(Args, Debug, Clone, Default)]
pub struct FileArgs {
	/// The modular header holding the boundary token. Defaults to
	/// `[paths].source` from `amalgam.toml`, then
	/// `../include/lunar_log.hpp`.
	pub source: Option<PathBuf>,

	/// The single-include header holding the anchor marker. Defaults to
	/// `[paths].target` from `amalgam.toml`, then
	/// `../single_include/lunar_log.hpp`.
	pub target: Option<PathBuf>,
}
