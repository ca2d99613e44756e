//! Local file naming for downloads.
//!
//! Provides extension extraction for the allow-list gate, the
//! normalize-and-force-extension sanitizer, and the check that keeps
//! local names inside the output directory.

use std::path::{Component, Path};

/// Fallback stem when sanitizing leaves nothing behind.
const EMPTY_STEM_FALLBACK: &str = "unnamed";

/// Returns the lower-cased extension of the last path segment, with its dot.
///
/// Everything from the last `.` of the final segment counts, so
/// `"key.asc-ma1"` yields `".asc-ma1"`. Returns an empty string when the
/// segment has no dot.
#[must_use]
pub fn extension_of(name: &str) -> String {
    let segment = name.rsplit('/').next().unwrap_or(name);
    segment
        .rfind('.')
        .map(|dot| segment[dot..].to_lowercase())
        .unwrap_or_default()
}

/// Maps a raw link target to a safe local file name ending in `extension`.
///
/// The input is lower-cased, an existing `extension` suffix is detached,
/// every run of characters outside `[a-z0-9]` becomes one `_`, repeated
/// underscores collapse, one leading and any trailing `_` are stripped,
/// and `extension` is appended. The mapping is pure and is a fixed point
/// on its own output.
///
/// `"Sheet A/B (1).PDF"` with `".pdf"` becomes `"sheet_a_b_1.pdf"`.
#[must_use]
pub fn sanitize_name(raw: &str, extension: &str) -> String {
    let lowered = raw.to_lowercase();
    let stem = lowered.strip_suffix(extension).unwrap_or(&lowered);

    let mut replaced = String::with_capacity(stem.len());
    let mut in_run = false;
    for ch in stem.chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            replaced.push(ch);
            in_run = false;
        } else if !in_run {
            replaced.push('_');
            in_run = true;
        }
    }

    let collapsed = collapse_underscores(&replaced);
    let trimmed = collapsed.strip_prefix('_').unwrap_or(&collapsed);
    let trimmed = trimmed.trim_end_matches('_');
    let stem = if trimmed.is_empty() {
        EMPTY_STEM_FALLBACK
    } else {
        trimmed
    };

    format!("{stem}{extension}")
}

// Separate normalization pass; a no-op on the run-replaced string.
fn collapse_underscores(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_underscore = false;
    for ch in value.chars() {
        if ch == '_' {
            if !prev_underscore {
                out.push(ch);
            }
            prev_underscore = true;
        } else {
            out.push(ch);
            prev_underscore = false;
        }
    }
    out
}

/// Returns true if `name` joined onto a directory names a file inside it.
///
/// `.` components are harmless; `..`, roots, and prefixes are not. At least
/// one normal component is required so the name cannot be the directory.
pub(crate) fn is_safe_relative_name(name: &str) -> bool {
    let mut has_normal = false;
    for component in Path::new(name).components() {
        match component {
            Component::Normal(_) => has_normal = true,
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return false,
        }
    }
    has_normal
}
