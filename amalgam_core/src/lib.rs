//! `amalgam_core` builds the single-include distribution of a modular header
//! library. It takes everything after a boundary token in the modular header
//! and splices it into the single-include header right after an anchor
//! banner, replacing whatever followed the banner before.
//!
//! ## Processing Pipeline
//!
//! ```text
//! source header
//!   → extract_payload (text after the boundary token's line)
//! target header
//!   → splice (text through the anchor marker + payload)
//!   → MergePlan (complete new content, nothing written yet)
//!   → write_merge (temporary file + rename over the target)
//! ```
//!
//! The content being moved is never parsed. Splicing is plain text
//! manipulation anchored on two literals, see [`Markers`].
//!
//! ## Modules
//!
//! - [`config`] — Optional `amalgam.toml` with default paths and marker
//!   overrides.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use amalgam_core::merge;
//! use std::path::Path;
//!
//! let outcome = merge(
//! 	Path::new("include/lunar_log.hpp"),
//! 	Path::new("single_include/lunar_log.hpp"),
//! )
//! .unwrap();
//!
//! if outcome.written {
//! 	println!("updated {}", outcome.target.display());
//! }
//! ```

pub use config::*;
pub use engine::*;
pub use error::*;
pub use markers::*;

pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod markers;

#[cfg(test)]
mod __fixtures;
