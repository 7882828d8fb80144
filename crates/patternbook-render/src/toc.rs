//! Table of contents and anchor generation
//!
//! Anchors are slugs of the entry names, made unique within one document by
//! numeric suffixes assigned in catalog order.

use std::collections::HashSet;

use patternbook_catalog::Catalog;

/// One table-of-contents line: the entry name and the anchor of its section
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocItem {
    pub name: String,
    pub anchor: String,
}

/// Build the table of contents for a catalog, in catalog order.
pub fn table_of_contents(catalog: &Catalog) -> Vec<TocItem> {
    catalog
        .iter()
        .zip(anchors(catalog))
        .map(|(entry, anchor)| TocItem {
            name: entry.name.clone(),
            anchor,
        })
        .collect()
}

/// One unique anchor per entry, in catalog order.
pub fn anchors(catalog: &Catalog) -> Vec<String> {
    let mut taken = HashSet::new();
    let mut anchors = Vec::with_capacity(catalog.len());

    for entry in catalog {
        let base = slugify(&entry.name);
        let mut anchor = base.clone();
        let mut suffix = 1;
        while taken.contains(&anchor) {
            anchor = format!("{}-{}", base, suffix);
            suffix += 1;
        }
        taken.insert(anchor.clone());
        anchors.push(anchor);
    }

    anchors
}

/// Lowercase slug: alphanumerics kept, separator runs become one `-`.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else if c.is_whitespace() || c == '-' || c == '_' {
            pending_dash = true;
        }
    }

    if slug.is_empty() {
        "pattern".to_string()
    } else {
        slug
    }
}
