//! Safe path resolution
//!
//! Maps a caller-supplied logical file name plus a theme root and object
//! subdirectory onto a canonical absolute path, or fails. Stateless: the
//! only filesystem state consulted is symlink resolution.
//!
//! # Rules
//! - Characters outside `[A-Za-z0-9_\-./]` are rejected
//! - Any `..` sequence is rejected
//! - Absolute names (leading separator) are rejected
//! - Symlinks anywhere along the path are resolved to their real target,
//!   which must remain within the real path of `theme_root/subdirectory`

use crate::error::{Result, StoreError};
use regex::Regex;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Character whitelist for logical file names.
const FILE_NAME_PATTERN: &str = r"^[A-Za-z0-9_\-./]+$";

fn file_name_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(FILE_NAME_PATTERN).unwrap())
}

/// Validate a logical file name against the character and traversal rules.
///
/// This is the pre-filesystem half of resolution; [`resolve`] additionally
/// performs the symlink containment check.
///
/// # Examples
///
/// ```
/// use themestore::resolver::validate_file_name;
///
/// assert!(validate_file_name("subdir/obj.html").is_ok());
/// assert!(validate_file_name("../somefile").is_err());
/// assert!(validate_file_name("/somefile").is_err());
/// assert!(validate_file_name("@name").is_err());
/// ```
pub fn validate_file_name(file_name: &str) -> Result<()> {
    if file_name.is_empty() {
        return Err(StoreError::InvalidFileName(file_name.to_string()));
    }

    if file_name.starts_with('/') || file_name.starts_with('\\') {
        return Err(StoreError::InvalidFileName(file_name.to_string()));
    }

    if file_name.contains("..") {
        return Err(StoreError::InvalidFileName(file_name.to_string()));
    }

    if !file_name_regex().is_match(file_name) {
        return Err(StoreError::InvalidFileName(file_name.to_string()));
    }

    Ok(())
}

/// Resolve `file_name` within `theme_root/subdirectory` to a canonical
/// absolute path.
///
/// Symlinks along the path (the file itself and intermediate directories)
/// are resolved to their real targets before the containment check, so a
/// nominally legal name whose link target escapes the boundary fails with
/// `InvalidFileName`. The returned path is the real path; it does not have
/// to exist (missing trailing components are tolerated so save targets can
/// be resolved).
pub fn resolve(theme_root: &Path, subdirectory: &str, file_name: &str) -> Result<PathBuf> {
    validate_file_name(file_name)?;

    let base = theme_root.join(subdirectory);
    let real_base = resolve_real(&base)?;
    let real_path = resolve_real(&base.join(file_name))?;

    if !real_path.starts_with(&real_base) {
        return Err(StoreError::InvalidFileName(file_name.to_string()));
    }

    Ok(real_path)
}

/// Verify that an already-discovered path (e.g. a directory walk entry)
/// really lives under `real_base` once symlinks are resolved.
pub(crate) fn check_bounds(real_base: &Path, candidate: &Path, file_name: &str) -> Result<PathBuf> {
    let real_path = resolve_real(candidate)?;
    if !real_path.starts_with(real_base) {
        return Err(StoreError::InvalidFileName(file_name.to_string()));
    }
    Ok(real_path)
}

/// Canonicalize a path, tolerating a non-existent tail: the longest
/// existing prefix is resolved through symlinks and the remaining
/// components are appended verbatim. Traversal segments have already been
/// rejected by the time this runs.
pub(crate) fn resolve_real(path: &Path) -> Result<PathBuf> {
    match path.canonicalize() {
        Ok(real) => Ok(real),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            let parent = path
                .parent()
                .ok_or_else(|| StoreError::InvalidFileName(path.display().to_string()))?;
            let tail = path
                .file_name()
                .ok_or_else(|| StoreError::InvalidFileName(path.display().to_string()))?;
            Ok(resolve_real(parent)?.join(tail))
        }
        Err(e) => Err(e.into()),
    }
}
