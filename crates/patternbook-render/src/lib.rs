//! Pattern catalog renderer
//!
//! Turns a validated pattern catalog into one navigable document: a title,
//! a table of contents with anchors, then one section per entry in catalog
//! order. Markdown and standalone HTML are supported.

pub mod builtin;
pub mod driver;
pub mod error;
pub mod html;
pub mod markdown;
pub mod render;
pub mod toc;

pub use driver::{CatalogSource, RenderOptions, RenderOutput, Renderer};
pub use error::{RenderError, Result};
pub use html::HtmlRenderer;
pub use markdown::MarkdownRenderer;
pub use render::{render, render_document, Document, DocumentRenderer, Format, DEFAULT_TITLE};
pub use toc::{anchors, slugify, table_of_contents, TocItem};
