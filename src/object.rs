//! Content object data model

use crate::error::Result;
use crate::frontmatter::FrontMatter;
use crate::theme::Theme;
use serde::Serialize;
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A loaded (or to-be-saved) content file, bound to one theme and one
/// object-type subdirectory.
///
/// Created by [`ObjectStore::load`](crate::ObjectStore::load) or
/// [`ObjectStore::in_theme`](crate::ObjectStore::in_theme); mutated via
/// [`ObjectStore::fill`](crate::ObjectStore::fill); persisted or removed
/// via [`ObjectStore::save`](crate::ObjectStore::save) and
/// [`ObjectStore::delete`](crate::ObjectStore::delete).
#[derive(Debug, Clone)]
pub struct ContentObject {
    theme: Theme,
    subdirectory: String,
    file_name: Option<String>,
    content: String,
    mtime: u64,
    loaded_from_cache: bool,
    /// File name the object was loaded under; differs from `file_name`
    /// when a pending rename has not been saved yet.
    loaded_file_name: Option<String>,
}

impl ContentObject {
    pub(crate) fn new_unsaved(theme: Theme, subdirectory: String) -> Self {
        ContentObject {
            theme,
            subdirectory,
            file_name: None,
            content: String::new(),
            mtime: 0,
            loaded_from_cache: false,
            loaded_file_name: None,
        }
    }

    pub(crate) fn loaded(
        theme: Theme,
        subdirectory: String,
        file_name: String,
        content: String,
        mtime: u64,
        loaded_from_cache: bool,
    ) -> Self {
        ContentObject {
            theme,
            subdirectory,
            file_name: Some(file_name.clone()),
            content,
            mtime,
            loaded_from_cache,
            loaded_file_name: Some(file_name),
        }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Relative file name within the object type's subdirectory, if set.
    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// File modification time in epoch seconds, as reported by the
    /// filesystem at load or save time. Zero for unsaved objects.
    pub fn mtime(&self) -> u64 {
        self.mtime
    }

    /// Whether the last load was served from the cache without reading
    /// the file's content from disk.
    pub fn is_loaded_from_cache(&self) -> bool {
        self.loaded_from_cache
    }

    /// Nominal absolute path of the backing file
    /// (`theme/subdirectory/file_name`). `None` until a file name is set.
    pub fn file_path(&self) -> Option<PathBuf> {
        self.file_name
            .as_ref()
            .map(|name| self.theme.path().join(&self.subdirectory).join(name))
    }

    /// Parse the object's content into structured settings plus body.
    pub fn front_matter(&self) -> Result<FrontMatter> {
        FrontMatter::parse(&self.content)
    }

    pub(crate) fn set_file_name(&mut self, file_name: String) {
        self.file_name = Some(file_name);
    }

    pub(crate) fn set_content(&mut self, content: String) {
        self.content = content;
    }

    pub(crate) fn loaded_file_name(&self) -> Option<&str> {
        self.loaded_file_name.as_deref()
    }

    pub(crate) fn mark_saved(&mut self, file_name: String, mtime: u64) {
        self.file_name = Some(file_name.clone());
        self.loaded_file_name = Some(file_name);
        self.mtime = mtime;
        self.loaded_from_cache = false;
    }
}

/// Lightweight record produced by bulk listing: the relative file path
/// plus extracted front-matter settings. Missing dotted paths map to
/// `Value::Null`, so index builders can rely on key presence.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ListEntry {
    pub file: String,
    pub settings: Map<String, Value>,
}
