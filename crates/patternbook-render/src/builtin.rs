//! The bundled pattern catalog
//!
//! Fifteen classic object-oriented patterns, compiled into the binary so the
//! guide renders without any input file.

use patternbook_catalog::{parse_toml, Catalog, Result};

/// Canonical order of the bundled patterns
pub const PATTERN_NAMES: [&str; 15] = [
    "Singleton",
    "Factory",
    "Observer",
    "Strategy",
    "Decorator",
    "Adapter",
    "Bridge",
    "Composite",
    "Facade",
    "Flyweight",
    "Proxy",
    "Chain of Responsibility",
    "Command",
    "Iterator",
    "State",
];

/// Get the bundled catalog source (TOML)
pub fn source() -> &'static str {
    include_str!("patterns.toml")
}

/// Parse and validate the bundled catalog
pub fn catalog() -> Result<Catalog> {
    parse_toml(source())
}
