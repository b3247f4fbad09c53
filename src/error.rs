use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    /// File name fails the character whitelist, contains a traversal
    /// segment, is absolute, or resolves (via symlink) outside the
    /// permitted directory boundary.
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),

    /// Save-boundary validation failure; raised before any I/O occurs.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Rename target collides with an existing file; neither file is touched.
    #[error("A file already exists at {}", .0.display())]
    AlreadyExists(PathBuf),

    /// Unclassified filesystem failure. Surfaced to the caller, not retried.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed settings section in a content file.
    #[error("Front matter error: {0}")]
    FrontMatter(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, StoreError>;
