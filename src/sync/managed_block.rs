//! Managed block upsert
//!
//! A managed block is the region of a target document between (and
//! including) a begin and an end marker. It is the only part of the
//! document this tool writes; everything around it belongs to the user.

use std::path::Path;

use tracing::debug;

use super::WriteOutcome;
use super::file_ops::{read_if_exists, write_file};
use crate::error::Result;
use crate::target::ManagedBlockSpec;

/// Render the full block, markers included
pub fn render_block(begin: &str, end: &str, body: &str) -> String {
    format!("{begin}\n{}\n{end}", body.trim())
}

/// Compute the new document content for an upsert of `block`.
///
/// - no existing document: just the block
/// - both markers present, begin before end: the marked region is replaced
///   and the surrounding text is rejoined with blank-line separators
/// - otherwise: the block is appended after a blank line
pub fn upsert_block(existing: Option<&str>, begin: &str, end: &str, block: &str) -> String {
    let Some(existing) = existing else {
        return format!("{block}\n");
    };

    if let Some((start, stop)) = find_region(existing, begin, end) {
        let before = existing[..start].trim_end();
        let after = existing[stop..].trim();

        let mut merged = [before, block, after]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n");
        if after.is_empty() || existing.ends_with('\n') {
            merged.push('\n');
        }
        return merged;
    }

    if existing.trim().is_empty() {
        return format!("{block}\n");
    }

    format!("{}\n\n{block}\n", existing.trim_end())
}

/// Byte range of the marked region, end marker included. A stray begin
/// marker ahead of the region is not part of it.
fn find_region(text: &str, begin: &str, end: &str) -> Option<(usize, usize)> {
    let first = text.find(begin)?;
    let body_start = first + begin.len();
    let end_at = body_start + text[body_start..].find(end)?;
    let start = text[body_start..end_at]
        .rfind(begin)
        .map_or(first, |inner| body_start + inner);
    Some((start, end_at + end.len()))
}

/// Upsert the block described by `spec` into the document at `path`.
/// The file is not touched when the content would not change.
pub fn sync_managed_block(path: &Path, spec: &ManagedBlockSpec, body: &str) -> Result<WriteOutcome> {
    let existing = read_if_exists(path)?;
    let block = render_block(spec.begin, spec.end, body);
    let updated = upsert_block(existing.content(), spec.begin, spec.end, &block);

    if existing.content() == Some(updated.as_str()) {
        debug!(path = %path.display(), "Managed block unchanged");
        return Ok(WriteOutcome::Unchanged);
    }

    write_file(path, &updated, None)?;
    Ok(if existing.exists() {
        WriteOutcome::Updated
    } else {
        WriteOutcome::Created
    })
}
