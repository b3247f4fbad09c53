//! Theme handles
//!
//! A theme is a named directory tree containing all content objects for one
//! site skin. This crate only needs a resolved directory path; discovery and
//! configuration of themes belong to the host application.

use std::path::{Path, PathBuf};
use tracing::debug;

/// A resolved theme directory.
///
/// Loading a theme never touches the filesystem; a handle for a directory
/// that does not exist is representable, and object loads against it return
/// the not-found sentinel rather than an error.
///
/// # Examples
///
/// ```rust,no_run
/// use themestore::Theme;
///
/// let theme = Theme::load("/var/www/themes", "demo");
/// assert!(theme.exists());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    root: PathBuf,
}

impl Theme {
    /// Load a named theme from a themes base directory.
    pub fn load<P: AsRef<Path>>(base: P, name: &str) -> Theme {
        let root = base.as_ref().join(name);
        debug!("Loading theme '{}' at {:?}", name, root);
        Theme { root }
    }

    /// Wrap an already-resolved theme directory.
    pub fn attach<P: Into<PathBuf>>(root: P) -> Theme {
        Theme { root: root.into() }
    }

    /// Absolute path of the theme's directory tree.
    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Whether the theme directory is actually present on disk.
    pub fn exists(&self) -> bool {
        self.root.is_dir()
    }
}
