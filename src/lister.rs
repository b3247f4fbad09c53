//! Directory enumeration
//!
//! Walks an object type's subdirectory within a theme, applying the
//! resolver's validation to every entry before extension filtering. A
//! single escaping entry anywhere in the tree aborts the whole walk:
//! safety is prioritized over partial results, and the caller must fix or
//! remove the offending link before listing succeeds.

use crate::error::Result;
use crate::resolver;
use std::io;
use std::path::Path;
use tracing::debug;
use walkdir::WalkDir;

/// Enumerate relative file names with allowed extensions under
/// `theme_root/subdirectory`.
///
/// Symlinks are followed, so a linked directory inside the boundary is
/// enumerated like a real one; every entry (directories included) is
/// bounds-checked against the canonical base. Returned names are in
/// traversal order, not sorted.
pub(crate) fn walk(
    theme_root: &Path,
    subdirectory: &str,
    allowed_extensions: &[String],
    recursive: bool,
) -> Result<Vec<String>> {
    let base = theme_root.join(subdirectory);
    if !base.is_dir() {
        return Ok(Vec::new());
    }
    let real_base = base.canonicalize().map_err(io::Error::from)?;

    let max_depth = if recursive { usize::MAX } else { 1 };
    let mut found = Vec::new();

    for entry in WalkDir::new(&base)
        .follow_links(true)
        .min_depth(1)
        .max_depth(max_depth)
    {
        let entry = entry.map_err(io::Error::from)?;
        let rel_name = relative_name(entry.path(), &base);

        resolver::validate_file_name(&rel_name)?;
        resolver::check_bounds(&real_base, entry.path(), &rel_name)?;

        if !entry.file_type().is_file() {
            continue;
        }

        let extension_allowed = entry
            .path()
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| allowed_extensions.iter().any(|a| a == e))
            .unwrap_or(false);

        if extension_allowed {
            found.push(rel_name);
        }
    }

    debug!(
        "Walked {}/{} ({} matching files, recursive={})",
        theme_root.display(),
        subdirectory,
        found.len(),
        recursive
    );

    Ok(found)
}

/// Relative name with `/` separators regardless of platform.
fn relative_name(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.iter()
        .map(|c| c.to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}
