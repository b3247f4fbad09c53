//! Integration tests for listing and index-record extraction

use std::fs;
use std::sync::Arc;
use tempfile::TempDir;
use themestore::{MtimeCache, ObjectKind, ObjectStore, StoreError, Theme};

/// Build a themes base directory with a "testpaths" theme holding two
/// pages with front matter, one nested under pages/a/.
fn fixture_themes() -> TempDir {
    let base = tempfile::tempdir().unwrap();
    let pages = base.path().join("testpaths/pages");
    fs::create_dir_all(pages.join("a")).unwrap();

    fs::write(
        pages.join("root-page.htm"),
        concat!(
            "url = \"/root-page\"\n",
            "[section]\n",
            "test = \"root page test\"\n",
            "==\n",
            "<h1>Root page</h1>\n",
        ),
    )
    .unwrap();

    fs::write(
        pages.join("a/a-page.htm"),
        concat!(
            "url = \"/apage\"\n",
            "layout = \"a/a-layout\"\n",
            "[section]\n",
            "test = \"a page test\"\n",
            "==\n",
            "<h1>A page</h1>\n",
        ),
    )
    .unwrap();

    base
}

fn pages_store() -> ObjectStore {
    ObjectStore::new(
        ObjectKind::new("pages")
            .extensions(["htm", "html"])
            .index_setting("settings.url", "pattern"),
        Arc::new(MtimeCache::new()),
    )
}

#[test]
fn test_list_in_theme_counts() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "testpaths");
    let store = pages_store();

    assert_eq!(store.list_in_theme(&theme, false).unwrap().len(), 1);
    assert_eq!(store.list_in_theme(&theme, true).unwrap().len(), 2);
}

#[test]
fn test_list_in_theme_loads_full_objects() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "testpaths");
    let store = pages_store();

    let mut objects = store.list_in_theme(&theme, true).unwrap();
    objects.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    assert_eq!(objects[0].file_name(), Some("a/a-page.htm"));
    assert!(objects[0].content().contains("<h1>A page</h1>"));

    let front_matter = objects[0].front_matter().unwrap();
    assert_eq!(
        front_matter.lookup("settings.url").unwrap().as_str(),
        Some("/apage")
    );
}

#[test]
fn test_list_missing_theme_is_empty() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "none");
    let store = pages_store();

    assert!(store.list_in_theme(&theme, true).unwrap().is_empty());
    assert!(store.list_in_theme_array(&theme, &[]).unwrap().is_empty());
}

#[cfg(unix)]
#[test]
fn test_path_resolve_out_of_bounds() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "testpaths");
    let store = pages_store();

    assert_eq!(store.list_in_theme(&theme, true).unwrap().len(), 2);

    // A symlink inside pages/ whose target sits outside the pages boundary.
    let target = theme.path().join("test.htm");
    fs::write(&target, "url = \"/test-page\"\n==\n<h1>This page is test</h1>").unwrap();
    std::os::unix::fs::symlink(&target, theme.path().join("pages/link.htm")).unwrap();

    let err = store.list_in_theme(&theme, true).unwrap_err();
    assert!(matches!(err, StoreError::InvalidFileName(_)));

    // Direct loads are rejected the same way.
    let err = store.load(&theme, "link.htm").unwrap_err();
    assert!(matches!(err, StoreError::InvalidFileName(_)));
}

#[cfg(unix)]
#[test]
fn test_path_resolve_in_bounds() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "testpaths");
    let store = pages_store();

    assert_eq!(store.list_in_theme(&theme, true).unwrap().len(), 2);

    let target = theme.path().join("pages/test.htm");
    fs::write(&target, "url = \"/test-page\"\n==\n<h1>This page is test</h1>").unwrap();
    std::os::unix::fs::symlink(&target, theme.path().join("pages/a/link.htm")).unwrap();

    // Both the real file and the in-bounds link are listed.
    assert_eq!(store.list_in_theme(&theme, true).unwrap().len(), 4);
}

#[test]
fn test_list_in_theme_array_defaults() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "testpaths");
    let store = pages_store();

    let mut entries = store.list_in_theme_array(&theme, &[]).unwrap();
    entries.sort_by(|a, b| a.file.cmp(&b.file));

    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].file, "a/a-page.htm");
    assert_eq!(entries[0].settings["pattern"], serde_json::json!("/apage"));

    assert_eq!(entries[1].file, "root-page.htm");
    assert_eq!(entries[1].settings["pattern"], serde_json::json!("/root-page"));
}

#[test]
fn test_list_in_theme_array_extra_settings() {
    let base = fixture_themes();
    let theme = Theme::load(base.path(), "testpaths");
    let store = pages_store();

    let mut entries = store
        .list_in_theme_array(
            &theme,
            &[
                ("settings.layout", "layout"),
                ("settings.section.test", "testKey"),
            ],
        )
        .unwrap();
    entries.sort_by(|a, b| a.file.cmp(&b.file));

    assert_eq!(entries.len(), 2);

    assert_eq!(entries[0].settings["layout"], serde_json::json!("a/a-layout"));
    assert_eq!(entries[0].settings["testKey"], serde_json::json!("a page test"));

    // root-page.htm has no layout setting: present as null, not absent.
    assert_eq!(entries[1].settings["layout"], serde_json::Value::Null);
    assert_eq!(
        entries[1].settings["testKey"],
        serde_json::json!("root page test")
    );
}
