//! Object store
//!
//! CRUD over content objects backed by files in a theme subdirectory. One
//! store handles one object type ([`ObjectKind`]); all path construction
//! goes through the resolver and all cached reads through the shared
//! [`MtimeCache`].

use crate::cache::{CacheEntry, MtimeCache};
use crate::error::{Result, StoreError};
use crate::frontmatter::FrontMatter;
use crate::kind::ObjectKind;
use crate::lister;
use crate::object::{ContentObject, ListEntry};
use crate::resolver;
use crate::theme::Theme;
use serde_json::Map;
use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;
use tracing::debug;

/// File-backed store for one object type.
///
/// # Examples
///
/// ```rust,no_run
/// use std::sync::Arc;
/// use themestore::{MtimeCache, ObjectKind, ObjectStore, Theme};
///
/// # fn main() -> themestore::Result<()> {
/// let cache = Arc::new(MtimeCache::new());
/// let pages = ObjectStore::new(
///     ObjectKind::new("pages").extensions(["htm", "html"]),
///     cache,
/// );
///
/// let theme = Theme::load("/var/www/themes", "demo");
/// if let Some(page) = pages.load(&theme, "index.htm")? {
///     println!("{}", page.content());
/// }
/// # Ok(())
/// # }
/// ```
pub struct ObjectStore {
    kind: ObjectKind,
    cache: std::sync::Arc<MtimeCache>,
}

impl ObjectStore {
    pub fn new(kind: ObjectKind, cache: std::sync::Arc<MtimeCache>) -> Self {
        ObjectStore { kind, cache }
    }

    pub fn kind(&self) -> &ObjectKind {
        &self.kind
    }

    /// Load an object by file name.
    ///
    /// Returns `Ok(None)` when the theme directory or the file is absent;
    /// a name without an extension is probed against each allowed
    /// extension in order. Path rule violations fail with
    /// `InvalidFileName`, other read failures with `Io`.
    pub fn load(&self, theme: &Theme, file_name: &str) -> Result<Option<ContentObject>> {
        resolver::validate_file_name(file_name)?;
        if !theme.exists() {
            return Ok(None);
        }

        for candidate in self.candidates(file_name) {
            let path = self.resolve(theme, &candidate)?;
            let meta = match stat_file(&path)? {
                Some(meta) => meta,
                None => continue,
            };

            debug!("Loading {} from {:?}", candidate, theme.path());
            let content = fs::read_to_string(&path)?;
            let mtime = mtime_secs(&meta)?;
            return Ok(Some(ContentObject::loaded(
                theme.clone(),
                self.kind.subdirectory().to_string(),
                candidate,
                content,
                mtime,
                false,
            )));
        }

        Ok(None)
    }

    /// As [`load`](Self::load), but consults the cache first.
    ///
    /// The file is always re-stat'ed; a cache hit whose recorded mtime
    /// matches the live one is served without reading the content from
    /// disk and comes back with `is_loaded_from_cache() == true`. A miss
    /// or stale hit reloads, re-caches, and reports `false`.
    pub fn load_cached(&self, theme: &Theme, file_name: &str) -> Result<Option<ContentObject>> {
        resolver::validate_file_name(file_name)?;
        if !theme.exists() {
            return Ok(None);
        }

        for candidate in self.candidates(file_name) {
            let path = self.resolve(theme, &candidate)?;
            let meta = match stat_file(&path)? {
                Some(meta) => meta,
                None => continue,
            };

            let mtime = mtime_secs(&meta)?;
            let cache_key = format!("{}/{}", self.kind.subdirectory(), candidate);

            if let Some(entry) = self.cache.get(theme.path(), &cache_key) {
                if entry.mtime == mtime {
                    debug!("Cache hit for {} @ {:?}", cache_key, theme.path());
                    return Ok(Some(ContentObject::loaded(
                        theme.clone(),
                        self.kind.subdirectory().to_string(),
                        candidate,
                        entry.content,
                        mtime,
                        true,
                    )));
                }
                debug!("Stale cache entry for {} @ {:?}", cache_key, theme.path());
            }

            let content = fs::read_to_string(&path)?;
            self.cache.put(
                theme.path(),
                &cache_key,
                CacheEntry {
                    content: content.clone(),
                    mtime,
                },
            );
            return Ok(Some(ContentObject::loaded(
                theme.clone(),
                self.kind.subdirectory().to_string(),
                candidate,
                content,
                mtime,
                false,
            )));
        }

        Ok(None)
    }

    /// Construct an empty, unsaved object bound to a theme. No file name
    /// is assigned until [`fill`](Self::fill) or a save.
    pub fn in_theme(&self, theme: &Theme) -> ContentObject {
        ContentObject::new_unsaved(theme.clone(), self.kind.subdirectory().to_string())
    }

    /// Bulk-assign attributes from untrusted input.
    ///
    /// Only keys named in the kind's fillable whitelist are applied;
    /// anything else is silently ignored. A file name supplied without an
    /// extension gets the kind's default extension appended. Validation
    /// is deferred to [`save`](Self::save).
    pub fn fill(&self, object: &mut ContentObject, attributes: &[(&str, &str)]) {
        for (key, value) in attributes {
            if !self.kind.is_fillable(key) {
                continue;
            }
            match *key {
                "file_name" => {
                    let mut name = value.trim().to_string();
                    if !name.is_empty() && extension_of(&name).is_none() {
                        name = format!("{name}.{}", self.kind.default_extension());
                    }
                    object.set_file_name(name);
                }
                "content" => object.set_content((*value).to_string()),
                // Fillable keys beyond the built-in attributes carry no storage.
                _ => {}
            }
        }
    }

    /// Persist the object to its theme.
    ///
    /// Validates before touching disk: a blank file name fails with
    /// `Validation` ("required"), character or traversal violations with
    /// `Validation` ("invalid file name"). When the file name differs
    /// from the one the object was loaded under, the save is a rename: a
    /// collision with an existing destination fails with `AlreadyExists`
    /// and leaves both files untouched; otherwise the old file is removed
    /// only after the new one is written. A crash between write and
    /// removal leaves both files present.
    pub fn save(&self, object: &mut ContentObject) -> Result<()> {
        let file_name = object.file_name().unwrap_or("").to_string();
        if file_name.trim().is_empty() {
            return Err(StoreError::Validation(
                "the file name field is required".to_string(),
            ));
        }
        resolver::validate_file_name(&file_name)
            .map_err(|_| StoreError::Validation(format!("invalid file name '{file_name}'")))?;

        let theme = object.theme().clone();
        let previous_name = object.loaded_file_name().map(str::to_string);
        let destination = self.resolve(&theme, &file_name)?;

        let renaming = previous_name
            .as_deref()
            .is_some_and(|loaded| loaded != file_name);
        if renaming && destination.exists() {
            return Err(StoreError::AlreadyExists(destination));
        }

        if let Some(parent) = destination.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing {} to {:?}", file_name, theme.path());
        fs::write(&destination, object.content())?;

        if let (true, Some(loaded)) = (renaming, previous_name.as_deref()) {
            // The original is removed only once the new file is on disk.
            let original = self.resolve(&theme, loaded)?;
            debug!("Removing renamed original {:?}", original);
            fs::remove_file(&original)?;
        }

        let mtime = mtime_secs(&fs::metadata(&destination)?)?;
        object.mark_saved(file_name, mtime);
        Ok(())
    }

    /// Remove the object's backing file. Fails with `Validation` for an
    /// object that has never been saved, and with `Io` if the file is
    /// already gone.
    pub fn delete(&self, object: &ContentObject) -> Result<()> {
        let file_name = object.loaded_file_name().ok_or_else(|| {
            StoreError::Validation("cannot delete an object that has never been saved".to_string())
        })?;
        let path = self.resolve(object.theme(), file_name)?;
        debug!("Deleting {} from {:?}", file_name, object.theme().path());
        fs::remove_file(&path)?;
        Ok(())
    }

    /// Enumerate and fully load every object of this kind in the theme.
    ///
    /// Recurses into subdirectories only when `recursive` is true. An
    /// escaping symlink anywhere in the tree aborts the whole listing
    /// with `InvalidFileName`. Ordering follows directory traversal.
    pub fn list_in_theme(&self, theme: &Theme, recursive: bool) -> Result<Vec<ContentObject>> {
        if !theme.exists() {
            return Ok(Vec::new());
        }

        let names = lister::walk(
            theme.path(),
            self.kind.subdirectory(),
            self.kind.allowed_extensions(),
            recursive,
        )?;

        let mut objects = Vec::with_capacity(names.len());
        for name in names {
            // A file can vanish between the walk and the load; skip it.
            if let Some(object) = self.load(theme, &name)? {
                objects.push(object);
            }
        }
        Ok(objects)
    }

    /// Enumerate objects as lightweight index records instead of full
    /// loads: relative file path plus dotted-path settings extracted from
    /// front matter. The kind's default index settings are always
    /// included; `extra_settings` maps additional dotted paths to output
    /// keys, with absent paths yielding `Value::Null`. Always recursive.
    pub fn list_in_theme_array(
        &self,
        theme: &Theme,
        extra_settings: &[(&str, &str)],
    ) -> Result<Vec<ListEntry>> {
        if !theme.exists() {
            return Ok(Vec::new());
        }

        let names = lister::walk(
            theme.path(),
            self.kind.subdirectory(),
            self.kind.allowed_extensions(),
            true,
        )?;

        let mut entries = Vec::with_capacity(names.len());
        for name in names {
            let path = self.resolve(theme, &name)?;
            let raw = fs::read_to_string(&path)?;
            let front_matter = FrontMatter::parse(&raw)?;

            let mut settings = Map::new();
            for (dotted, key) in self.kind.index_settings() {
                settings.insert(key.clone(), front_matter.lookup_json(dotted));
            }
            for (dotted, key) in extra_settings {
                settings.insert((*key).to_string(), front_matter.lookup_json(dotted));
            }

            entries.push(ListEntry {
                file: name,
                settings,
            });
        }
        Ok(entries)
    }

    fn resolve(&self, theme: &Theme, file_name: &str) -> Result<std::path::PathBuf> {
        resolver::resolve(theme.path(), self.kind.subdirectory(), file_name)
    }

    /// File names to probe for a load: the name itself when it carries an
    /// allowed extension, one candidate per allowed extension when it
    /// carries none, and nothing at all for a disallowed extension.
    fn candidates(&self, file_name: &str) -> Vec<String> {
        match extension_of(file_name) {
            Some(ext) if self.kind.is_allowed_extension(ext) => vec![file_name.to_string()],
            Some(_) => Vec::new(),
            None => self
                .kind
                .allowed_extensions()
                .iter()
                .map(|ext| format!("{file_name}.{ext}"))
                .collect(),
        }
    }
}

fn extension_of(file_name: &str) -> Option<&str> {
    Path::new(file_name).extension().and_then(|e| e.to_str())
}

/// Stat a path, mapping "absent" (and "not a regular file") to `None`.
fn stat_file(path: &Path) -> Result<Option<fs::Metadata>> {
    match fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(Some(meta)),
        Ok(_) => Ok(None),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn mtime_secs(meta: &fs::Metadata) -> Result<u64> {
    let modified = meta.modified()?;
    Ok(modified
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn store() -> ObjectStore {
        ObjectStore::new(
            ObjectKind::new("testobjects").extensions(["htm", "html"]),
            Arc::new(MtimeCache::new()),
        )
    }

    #[test]
    fn test_candidates_probe_extensions() {
        let store = store();
        assert_eq!(store.candidates("plain.html"), ["plain.html"]);
        assert_eq!(store.candidates("none"), ["none.htm", "none.html"]);
        assert!(store.candidates("script.php").is_empty());
    }

    #[test]
    fn test_fill_appends_default_extension() {
        let store = store();
        let theme = Theme::load("/themes", "apitest");
        let mut obj = store.in_theme(&theme);

        store.fill(&mut obj, &[("file_name", "mytestobj"), ("content", "c")]);
        assert_eq!(obj.file_name(), Some("mytestobj.htm"));
        assert_eq!(obj.content(), "c");

        store.fill(&mut obj, &[("file_name", "sub/other.html")]);
        assert_eq!(obj.file_name(), Some("sub/other.html"));
    }

    #[test]
    fn test_fill_ignores_non_fillable_keys() {
        let store = store();
        let theme = Theme::load("/themes", "apitest");
        let mut obj = store.in_theme(&theme);

        store.fill(&mut obj, &[("something", "mytestobj"), ("content", "c")]);
        assert_eq!(obj.file_name(), None);
        assert_eq!(obj.content(), "c");
    }

    #[test]
    fn test_fill_trims_to_blank_name() {
        let store = store();
        let theme = Theme::load("/themes", "apitest");
        let mut obj = store.in_theme(&theme);

        store.fill(&mut obj, &[("file_name", " ")]);
        assert_eq!(obj.file_name(), Some(""));
    }
}
