//! Object type configuration
//!
//! Each category of content object (page, partial, layout, content block)
//! is described by an [`ObjectKind`]: the subdirectory it lives in under a
//! theme, the file extensions it accepts, the attribute names that may be
//! bulk-assigned, and the front-matter settings extracted by default when
//! building index records.

/// Configuration for one object type.
///
/// # Examples
///
/// ```
/// use themestore::ObjectKind;
///
/// let pages = ObjectKind::new("pages")
///     .extensions(["htm", "html"])
///     .index_setting("settings.url", "pattern");
///
/// assert_eq!(pages.subdirectory(), "pages");
/// assert_eq!(pages.default_extension(), "htm");
/// ```
#[derive(Debug, Clone)]
pub struct ObjectKind {
    subdirectory: String,
    allowed_extensions: Vec<String>,
    fillable: Vec<String>,
    index_settings: Vec<(String, String)>,
}

impl ObjectKind {
    /// Create a kind stored under `subdirectory` within each theme.
    ///
    /// Defaults: extension whitelist `["htm"]`, fillable attributes
    /// `["file_name", "content"]`, no default index settings.
    pub fn new(subdirectory: impl Into<String>) -> Self {
        ObjectKind {
            subdirectory: subdirectory.into(),
            allowed_extensions: vec!["htm".to_string()],
            fillable: vec!["file_name".to_string(), "content".to_string()],
            index_settings: Vec::new(),
        }
    }

    /// Replace the extension whitelist. The first entry is the default
    /// extension appended to file names supplied without one. An empty
    /// iterator is ignored: the whitelist is never allowed to be empty.
    pub fn extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let extensions: Vec<String> = extensions.into_iter().map(Into::into).collect();
        if !extensions.is_empty() {
            self.allowed_extensions = extensions;
        }
        self
    }

    /// Replace the fillable attribute whitelist.
    pub fn fillable<I, S>(mut self, fillable: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fillable = fillable.into_iter().map(Into::into).collect();
        self
    }

    /// Add a default dotted-path extraction for index records, e.g.
    /// `("settings.url", "pattern")`.
    pub fn index_setting(
        mut self,
        path: impl Into<String>,
        output_key: impl Into<String>,
    ) -> Self {
        self.index_settings.push((path.into(), output_key.into()));
        self
    }

    pub fn subdirectory(&self) -> &str {
        &self.subdirectory
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    /// First entry of the extension whitelist.
    pub fn default_extension(&self) -> &str {
        &self.allowed_extensions[0]
    }

    pub fn is_fillable(&self, key: &str) -> bool {
        self.fillable.iter().any(|f| f == key)
    }

    pub fn is_allowed_extension(&self, extension: &str) -> bool {
        self.allowed_extensions.iter().any(|e| e == extension)
    }

    pub fn index_settings(&self) -> &[(String, String)] {
        &self.index_settings
    }
}
