//! Error types for rendering.

use std::path::PathBuf;

use patternbook_catalog::CatalogError;
use thiserror::Error;

/// Errors that can occur while producing a document.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The catalog failed to load or validate; nothing was rendered.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("formatting error: {0}")]
    Fmt(#[from] std::fmt::Error),
}

/// Result type for rendering operations.
pub type Result<T> = std::result::Result<T, RenderError>;
