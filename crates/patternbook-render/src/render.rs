//! Output formats and the renderer interface.

use std::fmt;
use std::path::Path;

use patternbook_catalog::Catalog;

use crate::error::Result;
use crate::html::HtmlRenderer;
use crate::markdown::MarkdownRenderer;
use crate::toc::{table_of_contents, TocItem};

/// Title used when neither the catalog nor the caller provides one
pub const DEFAULT_TITLE: &str = "Design Patterns";

/// Document format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Format {
    #[default]
    Markdown,
    Html,
}

impl Format {
    /// Infer the format from a destination path. `.html`/`.htm` is HTML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm") => {
                Format::Html
            }
            _ => Format::Markdown,
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Format::Markdown => write!(f, "markdown"),
            Format::Html => write!(f, "html"),
        }
    }
}

/// A catalog ready to be rendered: resolved title and anchors
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    pub title: &'a str,
    pub catalog: &'a Catalog,
    /// One item per catalog entry, same order
    pub toc: &'a [TocItem],
}

/// Turns a document into text in one pass.
///
/// Implementations must be deterministic: the same document always yields
/// the same bytes.
pub trait DocumentRenderer {
    fn render(&mut self, document: &Document<'_>) -> Result<String>;
}

/// Render a catalog in the given format.
///
/// `title` overrides the catalog's own title; without either the document is
/// titled [`DEFAULT_TITLE`].
pub fn render(catalog: &Catalog, format: Format, title: Option<&str>) -> Result<String> {
    let toc = table_of_contents(catalog);
    let document = Document {
        title: title.or(catalog.title()).unwrap_or(DEFAULT_TITLE),
        catalog,
        toc: &toc,
    };
    render_document(&document, format)
}

/// Render a prepared document in the given format.
pub fn render_document(document: &Document<'_>, format: Format) -> Result<String> {
    match format {
        Format::Markdown => MarkdownRenderer::new().render(document),
        Format::Html => HtmlRenderer::new().render(document),
    }
}
