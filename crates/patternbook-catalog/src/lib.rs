//! Pattern catalog model and loader.
//!
//! A catalog source is a TOML (or JSON) document holding an ordered list of
//! `[[pattern]]` entries. Loading is all-or-nothing: the source is validated
//! eagerly and any malformed entry fails the whole load.

pub mod error;
pub mod model;
pub mod source;

pub use error::{CatalogError, EntryRef, Result};
pub use model::{Catalog, Example, PatternEntry};
pub use source::{check, load, parse, parse_json, parse_toml, Diagnostic, SourceFormat};
