//! Front-matter parsing
//!
//! Content files may begin with a settings section: TOML-compatible
//! key/value lines terminated by a separator line of two or more `=`
//! characters, followed by the body. Files without a separator are all
//! body. Only a `settings` table with dotted-path lookup is required by
//! the store; anything richer belongs to the host application.
//!
//! ```text
//! url = "/test-page"
//! [section]
//! test = "a page test"
//! ==
//! <h1>This page is test</h1>
//! ```

use crate::error::Result;
use serde_json::Value as JsonValue;
use toml::Value as TomlValue;

/// Parsed representation of a content file: structured settings plus body.
#[derive(Debug, Clone, Default)]
pub struct FrontMatter {
    pub settings: toml::Table,
    pub body: String,
}

impl FrontMatter {
    /// Split raw content into settings and body.
    ///
    /// # Examples
    ///
    /// ```
    /// use themestore::FrontMatter;
    ///
    /// let fm = FrontMatter::parse("url = \"/apage\"\n==\n<h1>hi</h1>").unwrap();
    /// assert_eq!(fm.body, "<h1>hi</h1>");
    /// assert_eq!(fm.lookup("settings.url").unwrap().as_str(), Some("/apage"));
    /// ```
    pub fn parse(raw: &str) -> Result<FrontMatter> {
        let (settings_src, body) = split_sections(raw);

        let settings = match settings_src {
            Some(src) => src.parse::<toml::Table>()?,
            None => toml::Table::new(),
        };

        Ok(FrontMatter {
            settings,
            body: body.to_string(),
        })
    }

    /// Resolve a dotted settings path such as `settings.section.test`.
    ///
    /// A leading `settings` segment addresses the settings table itself.
    /// Returns `None` for absent paths.
    pub fn lookup(&self, dotted: &str) -> Option<&TomlValue> {
        let mut segments = dotted.split('.').peekable();
        if segments.peek() == Some(&"settings") {
            segments.next();
        }

        let first = segments.next()?;
        let mut current = self.settings.get(first)?;
        for segment in segments {
            current = current.as_table()?.get(segment)?;
        }
        Some(current)
    }

    /// As [`lookup`](Self::lookup), but converted to a JSON value with
    /// `Null` for absent paths, as used in index records.
    pub fn lookup_json(&self, dotted: &str) -> JsonValue {
        match self.lookup(dotted) {
            Some(value) => serde_json::to_value(value).unwrap_or(JsonValue::Null),
            None => JsonValue::Null,
        }
    }
}

/// Split on the first line consisting of two or more `=` characters.
/// Returns (settings source, body); no separator means no settings.
fn split_sections(raw: &str) -> (Option<&str>, &str) {
    let mut offset = 0;
    for line in raw.split_inclusive('\n') {
        let trimmed = line.trim();
        if trimmed.len() >= 2 && trimmed.bytes().all(|b| b == b'=') {
            return (Some(&raw[..offset]), &raw[offset + line.len()..]);
        }
        offset += line.len();
    }
    (None, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_content_has_no_settings() {
        let fm = FrontMatter::parse("<p>This is a test HTML content file.</p>").unwrap();
        assert!(fm.settings.is_empty());
        assert_eq!(fm.body, "<p>This is a test HTML content file.</p>");
        assert!(fm.lookup("settings.url").is_none());
    }

    #[test]
    fn test_settings_and_body_split() {
        let fm = FrontMatter::parse("url = \"/test-page\"\n==\n<h1>This page is test</h1>").unwrap();
        assert_eq!(fm.lookup("settings.url").unwrap().as_str(), Some("/test-page"));
        assert_eq!(fm.body, "<h1>This page is test</h1>");
    }

    #[test]
    fn test_longer_separator_lines() {
        let fm = FrontMatter::parse("url = \"/x\"\n====\nbody").unwrap();
        assert_eq!(fm.lookup("url").unwrap().as_str(), Some("/x"));
        assert_eq!(fm.body, "body");
    }

    #[test]
    fn test_nested_section_lookup() {
        let raw = "layout = \"a/a-layout\"\n[section]\ntest = \"a page test\"\n==\nbody";
        let fm = FrontMatter::parse(raw).unwrap();
        assert_eq!(
            fm.lookup("settings.section.test").unwrap().as_str(),
            Some("a page test")
        );
        assert_eq!(fm.lookup_json("settings.layout"), serde_json::json!("a/a-layout"));
        assert_eq!(fm.lookup_json("settings.missing"), serde_json::Value::Null);
    }

    #[test]
    fn test_malformed_settings_error() {
        let err = FrontMatter::parse("url = = broken\n==\nbody").unwrap_err();
        assert!(matches!(err, crate::StoreError::FrontMatter(_)));
    }

    #[test]
    fn test_separator_without_trailing_newline() {
        let fm = FrontMatter::parse("url = \"/x\"\n==").unwrap();
        assert_eq!(fm.body, "");
        assert_eq!(fm.lookup("url").unwrap().as_str(), Some("/x"));
    }
}
