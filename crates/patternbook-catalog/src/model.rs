//! Data model for pattern catalogs
//!
//! A catalog is an ordered list of independent pattern entries. `Catalog`
//! values only come out of validation, so names are unique and required
//! fields are non-blank for every catalog in memory.

use serde::Serialize;

use crate::error::Result;
use crate::source::{validate, RawCatalog};

/// One documented design pattern
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatternEntry {
    /// Pattern name, unique within its catalog
    pub name: String,
    /// Short prose summary
    pub description: String,
    /// Situations where the pattern fits
    pub when_to_use: Vec<String>,
    /// Situations where it does not
    pub when_not_to_use: Vec<String>,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    /// Illustrative code sample
    pub example: Example,
}

/// A code sample tagged with the language it is written in
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Example {
    pub language: String,
    pub code: String,
}

impl PatternEntry {
    /// Create an entry with empty guidance lists
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        example: Example,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            when_to_use: Vec::new(),
            when_not_to_use: Vec::new(),
            pros: Vec::new(),
            cons: Vec::new(),
            example,
        }
    }
}

impl Example {
    pub fn new(language: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            code: code.into(),
        }
    }
}

/// The ordered collection of pattern entries
///
/// Serializes to the same shape the JSON source format accepts, so a dumped
/// catalog can be loaded again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Catalog {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(rename = "pattern")]
    entries: Vec<PatternEntry>,
}

impl Catalog {
    /// Build a catalog from entries assembled in code.
    ///
    /// Runs the same validation as a catalog source, returning the first
    /// failure.
    pub fn from_entries(title: Option<String>, entries: Vec<PatternEntry>) -> Result<Self> {
        let raw = RawCatalog {
            title,
            pattern: entries.into_iter().map(Into::into).collect(),
        };
        match validate(raw) {
            Ok(catalog) => Ok(catalog),
            Err(mut errors) => Err(errors.remove(0)),
        }
    }

    pub(crate) fn new_unchecked(title: Option<String>, entries: Vec<PatternEntry>) -> Self {
        Self { title, entries }
    }

    /// Document title, if the source sets one
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn entries(&self) -> &[PatternEntry] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PatternEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Look up an entry by its exact name
    pub fn get(&self, name: &str) -> Option<&PatternEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a PatternEntry;
    type IntoIter = std::slice::Iter<'a, PatternEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
