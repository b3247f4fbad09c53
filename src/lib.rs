//! # Themestore - File-Backed Themed Content Object Store
//!
//! `themestore` maps logical theme objects (pages, partials, layouts,
//! content fragments) onto files within a theme's directory tree:
//!
//! - **Safe path resolution** with a character whitelist, traversal
//!   rejection, and symlink containment checks
//! - **Mtime-validated caching** of loaded objects across a request scope
//! - **Whitelisted bulk assignment** of attributes from untrusted input
//! - **Rename-aware saves** that never clobber an existing destination
//! - **Bulk listing** into full objects or lightweight index records
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use themestore::{MtimeCache, ObjectKind, ObjectStore, Theme};
//!
//! # fn main() -> themestore::Result<()> {
//! let cache = Arc::new(MtimeCache::new());
//! let pages = ObjectStore::new(
//!     ObjectKind::new("pages")
//!         .extensions(["htm", "html"])
//!         .index_setting("settings.url", "pattern"),
//!     cache,
//! );
//!
//! let theme = Theme::load("/var/www/themes", "demo");
//!
//! // Read-through cached load
//! if let Some(page) = pages.load_cached(&theme, "index.htm")? {
//!     println!("{} ({})", page.content(), page.mtime());
//! }
//!
//! // Create and save a new object
//! let mut about = pages.in_theme(&theme);
//! pages.fill(&mut about, &[("file_name", "about"), ("content", "<h1>About</h1>")]);
//! pages.save(&mut about)?;
//!
//! // Build an index without materializing full objects
//! for entry in pages.list_in_theme_array(&theme, &[("settings.layout", "layout")])? {
//!     println!("{} -> {:?}", entry.file, entry.settings.get("pattern"));
//! }
//! # Ok(())
//! # }
//! ```
//!
//! The web request lifecycle, template rendering, and theme discovery are
//! host concerns; this crate is only the object-to-file mapping engine.

pub mod cache;
pub mod error;
pub mod frontmatter;
pub mod kind;
mod lister;
pub mod object;
pub mod resolver;
pub mod store;
pub mod theme;

pub use cache::{CacheEntry, MtimeCache};
pub use error::{Result, StoreError};
pub use frontmatter::FrontMatter;
pub use kind::ObjectKind;
pub use object::{ContentObject, ListEntry};
pub use store::ObjectStore;
pub use theme::Theme;
