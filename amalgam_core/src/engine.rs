use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use tempfile::NamedTempFile;

use crate::AmalgamError;
use crate::AmalgamResult;
use crate::MarkerRole;
use crate::Markers;

/// A fully computed merge that has not been written yet.
///
/// Holding the complete new content before any write is what guarantees the
/// target is either rewritten in full or left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePlan {
	/// The file the payload was extracted from.
	pub source: PathBuf,
	/// The file that will be rewritten.
	pub target: PathBuf,
	/// The target content as it was read.
	pub original: String,
	/// The target content after splicing in the payload.
	pub content: String,
	/// Length in bytes of the payload taken from the source.
	pub payload_len: usize,
}

impl MergePlan {
	/// Returns true if writing the plan would change the target file.
	pub fn is_changed(&self) -> bool {
		self.original != self.content
	}
}

/// Result of persisting a [`MergePlan`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeOutcome {
	/// The file that was merged into.
	pub target: PathBuf,
	/// Whether the target's bytes were replaced. `false` when the target was
	/// already up to date.
	pub written: bool,
	/// Size in bytes of the target content after the merge.
	pub bytes: usize,
	/// Length in bytes of the payload taken from the source.
	pub payload_len: usize,
}

/// Returns the part of `source` that follows the line holding the first
/// occurrence of `boundary`, or `None` when the boundary is absent.
///
/// A boundary on the last line without a line terminator yields an empty
/// payload.
pub fn extract_payload<'a>(source: &'a str, boundary: &str) -> Option<&'a str> {
	let start = source.find(boundary)?;
	let rest = &source[start + boundary.len()..];

	if boundary.ends_with('\n') {
		return Some(rest);
	}

	match rest.find('\n') {
		Some(newline) => Some(&rest[newline + 1..]),
		None => Some(""),
	}
}

/// Returns `target` truncated right after the first occurrence of `anchor`
/// with `payload` appended, or `None` when the anchor is absent.
pub fn splice(target: &str, anchor: &str, payload: &str) -> Option<String> {
	let start = target.find(anchor)?;
	let end = start + anchor.len();

	let mut content = String::with_capacity(end + payload.len());
	content.push_str(&target[..end]);
	content.push_str(payload);

	Some(content)
}

/// Read both files and compute the new target content using the given
/// markers. Nothing is written.
pub fn compute_merge(source: &Path, target: &Path, markers: &Markers) -> AmalgamResult<MergePlan> {
	let source_text = read_text(source)?;
	warn_on_duplicates(&source_text, markers, MarkerRole::Boundary, source);
	let payload = extract_payload(&source_text, markers.boundary())
		.ok_or_else(|| marker_not_found(markers, MarkerRole::Boundary, source))?;

	tracing::debug!(
		source = %source.display(),
		payload_len = payload.len(),
		"extracted payload"
	);

	let target_text = read_text(target)?;
	warn_on_duplicates(&target_text, markers, MarkerRole::Anchor, target);
	let content = splice(&target_text, markers.anchor(), payload)
		.ok_or_else(|| marker_not_found(markers, MarkerRole::Anchor, target))?;

	tracing::debug!(
		path = %target.display(),
		content_len = content.len(),
		"spliced payload after anchor"
	);

	Ok(MergePlan {
		source: source.to_path_buf(),
		target: target.to_path_buf(),
		original: target_text,
		payload_len: payload.len(),
		content,
	})
}

/// Persist a computed plan. The target is replaced through a temporary file
/// in the same directory followed by a rename, so readers never observe a
/// partially written target. On failure the target and its directory are left
/// as they were. Unchanged targets are not touched.
pub fn write_merge(plan: &MergePlan) -> AmalgamResult<MergeOutcome> {
	let written = plan.is_changed();

	if written {
		write_atomic(&plan.target, &plan.content)?;
		tracing::info!(path = %plan.target.display(), bytes = plan.content.len(), "wrote target");
	} else {
		tracing::info!(path = %plan.target.display(), "target already up to date");
	}

	Ok(MergeOutcome {
		target: plan.target.clone(),
		written,
		bytes: plan.content.len(),
		payload_len: plan.payload_len,
	})
}

/// Merge `source` into `target` using the built-in markers.
pub fn merge(source: &Path, target: &Path) -> AmalgamResult<MergeOutcome> {
	merge_with_markers(source, target, &Markers::default())
}

/// Merge `source` into `target` using custom markers.
pub fn merge_with_markers(
	source: &Path,
	target: &Path,
	markers: &Markers,
) -> AmalgamResult<MergeOutcome> {
	let plan = compute_merge(source, target, markers)?;
	write_merge(&plan)
}

fn read_text(path: &Path) -> AmalgamResult<String> {
	std::fs::read_to_string(path).map_err(|source| AmalgamError::Read {
		path: path.display().to_string(),
		source,
	})
}

fn marker_not_found(markers: &Markers, role: MarkerRole, file: &Path) -> AmalgamError {
	AmalgamError::MarkerNotFound {
		role,
		marker: markers.get(role).to_string(),
		file: file.display().to_string(),
	}
}

fn warn_on_duplicates(text: &str, markers: &Markers, role: MarkerRole, file: &Path) {
	let count = text.matches(markers.get(role)).count();
	if count > 1 {
		tracing::warn!(
			file = %file.display(),
			count,
			"{role} occurs more than once; using the first occurrence"
		);
	}
}

fn write_atomic(path: &Path, content: &str) -> AmalgamResult<()> {
	let write_error = |source: std::io::Error| {
		AmalgamError::Write {
			path: path.display().to_string(),
			source,
		}
	};

	let dir = path
		.parent()
		.filter(|parent| !parent.as_os_str().is_empty())
		.unwrap_or(Path::new("."));
	let permissions = std::fs::metadata(path).ok().map(|meta| meta.permissions());

	// The temporary file is removed on drop, so every early return below
	// leaves the directory as it was.
	let mut temp = NamedTempFile::new_in(dir).map_err(write_error)?;
	temp.write_all(content.as_bytes()).map_err(write_error)?;
	temp.as_file().sync_all().map_err(write_error)?;

	if let Some(permissions) = permissions {
		std::fs::set_permissions(temp.path(), permissions).map_err(write_error)?;
	}

	temp.persist(path).map_err(|e| write_error(e.error))?;

	Ok(())
}
