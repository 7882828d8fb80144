//! Error types for catalog loading and validation.

use std::fmt;
use std::ops::Range;
use std::path::PathBuf;

use thiserror::Error;

/// Identifies the entry a validation failure belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntryRef {
    /// 1-based position in the catalog source
    pub position: usize,
    /// Entry name, when the entry has a usable one
    pub name: Option<String>,
}

impl fmt::Display for EntryRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.name {
            Some(name) => write!(f, "entry `{}`", name),
            None => write!(f, "entry #{}", self.position),
        }
    }
}

/// Errors that can occur while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not well-formed TOML/JSON or does not have the catalog shape.
    #[error("invalid catalog syntax: {message}")]
    Syntax {
        message: String,
        span: Option<Range<usize>>,
    },

    #[error("{entry} is missing required field `{field}`")]
    MissingField { entry: EntryRef, field: &'static str },

    /// A required field or a list item is present but blank.
    #[error("{entry} has an empty `{field}`")]
    EmptyField { entry: EntryRef, field: String },

    /// A field holds text that cannot be rendered where it is used.
    #[error("{entry} has an invalid `{field}`: {reason}")]
    InvalidField {
        entry: EntryRef,
        field: &'static str,
        reason: &'static str,
    },

    /// Two entries share a name. Positions are 1-based.
    #[error("duplicate entry `{name}` (entries #{first} and #{second})")]
    DuplicateEntry {
        name: String,
        first: usize,
        second: usize,
    },
}

impl CatalogError {
    /// 1-based position of the offending entry, for entry-level failures.
    pub fn position(&self) -> Option<usize> {
        match self {
            CatalogError::MissingField { entry, .. }
            | CatalogError::EmptyField { entry, .. }
            | CatalogError::InvalidField { entry, .. } => Some(entry.position),
            CatalogError::DuplicateEntry { second, .. } => Some(*second),
            CatalogError::Io { .. } | CatalogError::Syntax { .. } => None,
        }
    }
}

/// Result type for catalog operations.
pub type Result<T> = std::result::Result<T, CatalogError>;
