use std::path::Path;
use std::path::PathBuf;
use std::process;

use amalgam_cli::AmalgamCli;
use amalgam_cli::Commands;
use amalgam_cli::FileArgs;
use amalgam_core::AmalgamConfig;
use amalgam_core::MergePlan;
use amalgam_core::compute_merge;
use amalgam_core::load_markers;
use amalgam_core::resolve_merge_paths;
use amalgam_core::write_merge;
use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

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
}

fn main() {
	let args = AmalgamCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

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

	let result = match &args.command {
		Some(Commands::Merge { files, dry_run }) => run_merge(&args, files, *dry_run),
		Some(Commands::Check { files, diff }) => run_check(&args, files, *diff),
		None => run_merge(&args, &FileArgs::default(), false),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<amalgam_core::AmalgamError>() {
			Ok(amalgam_err) => {
				let report: miette::Report = (*amalgam_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Log to stderr. `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.without_time()
		.init();
}

fn resolve_root(args: &AmalgamCli) -> PathBuf {
	args.path
		.clone()
		.unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Resolve the files and markers for this invocation and compute the merge
/// without writing anything.
fn plan_merge(args: &AmalgamCli, files: &FileArgs) -> Result<MergePlan, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	tracing::debug!(root = %root.display(), "resolving merge inputs");
	let config = AmalgamConfig::load(&root)?;
	let markers = load_markers(config.as_ref())?;
	let paths = resolve_merge_paths(
		&root,
		config.as_ref(),
		files.source.clone(),
		files.target.clone(),
	);

	if args.verbose {
		match AmalgamConfig::resolve_path(&root) {
			Some(config_path) => println!("Config: {}", config_path.display()),
			None => println!("Config: none (using built-in defaults)"),
		}
		println!("Source: {}", paths.source.display());
		println!("Target: {}", paths.target.display());
	}

	Ok(compute_merge(&paths.source, &paths.target, &markers)?)
}

fn run_merge(
	args: &AmalgamCli,
	files: &FileArgs,
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let plan = plan_merge(args, files)?;
	let root = resolve_root(args);
	let source = make_relative(&plan.source, &root);
	let target = make_relative(&plan.target, &root);

	if !plan.is_changed() {
		println!("{target} is already up to date.");
		return Ok(());
	}

	if dry_run {
		println!(
			"Dry run: would update {target} with a {} byte payload from {source}.",
			plan.payload_len
		);
		print_diff(&plan.original, &plan.content);
		return Ok(());
	}

	let outcome = write_merge(&plan)?;
	println!("Merged {source} into {target}.");

	if args.verbose {
		println!(
			"  payload: {} bytes, target: {} bytes",
			outcome.payload_len, outcome.bytes
		);
	}

	Ok(())
}

fn run_check(
	args: &AmalgamCli,
	files: &FileArgs,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let plan = plan_merge(args, files)?;
	let root = resolve_root(args);
	let source = make_relative(&plan.source, &root);
	let target = make_relative(&plan.target, &root);

	if !plan.is_changed() {
		println!("Check passed: {target} is up to date with {source}.");
		return Ok(());
	}

	eprintln!(
		"{} {target} is out of date with {source}",
		colored!("stale:", yellow)
	);

	if show_diff {
		print_diff(&plan.original, &plan.content);
	}

	eprintln!();
	eprintln!("Run `amalgam merge` to regenerate it.");
	process::exit(1);
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
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
