//! Render driver
//!
//! Loads a catalog, validates it and renders it entirely in memory. Nothing
//! touches the destination until a complete document exists, and the
//! document then replaces it in a single rename.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use patternbook_catalog::Catalog;

use crate::builtin;
use crate::error::{RenderError, Result};
use crate::render::{render_document, Document, Format, DEFAULT_TITLE};
use crate::toc::{table_of_contents, TocItem};

/// Where the catalog comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// A TOML or JSON catalog file
    File(PathBuf),
    /// The fifteen patterns bundled with this crate
    Builtin,
}

/// Options for a render run
#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub source: CatalogSource,
    /// Destination path, used to infer the format
    pub output: Option<PathBuf>,
    /// Explicit format; wins over inference from `output`
    pub format: Option<Format>,
    /// Overrides the catalog's title
    pub title: Option<String>,
}

impl RenderOptions {
    /// Render the catalog file at `input`
    pub fn new(input: impl Into<PathBuf>) -> Self {
        Self::with_source(CatalogSource::File(input.into()))
    }

    /// Render the bundled catalog
    pub fn builtin() -> Self {
        Self::with_source(CatalogSource::Builtin)
    }

    pub fn with_source(source: CatalogSource) -> Self {
        Self {
            source,
            output: None,
            format: None,
            title: None,
        }
    }

    pub fn output(mut self, path: impl Into<PathBuf>) -> Self {
        self.output = Some(path.into());
        self
    }

    pub fn format(mut self, format: Format) -> Self {
        self.format = Some(format);
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Explicit format, else inferred from the output path, else Markdown
    pub fn resolved_format(&self) -> Format {
        self.format
            .or_else(|| self.output.as_deref().map(Format::from_path))
            .unwrap_or_default()
    }
}

/// A fully rendered document
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub document: String,
    pub format: Format,
    pub title: String,
    pub toc: Vec<TocItem>,
}

impl RenderOutput {
    /// Number of entries rendered
    pub fn entry_count(&self) -> usize {
        self.toc.len()
    }

    /// Write the document to `path`, creating parent directories.
    ///
    /// The document goes to a temporary file next to `path` first, so readers
    /// see either the previous file or the complete new one.
    pub fn write_to(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let write_err = |source| RenderError::Write {
            path: path.to_path_buf(),
            source,
        };

        let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
            Some(parent) => {
                fs::create_dir_all(parent).map_err(write_err)?;
                parent
            }
            None => Path::new("."),
        };

        let mut file = tempfile::Builder::new()
            .prefix(".patternbook")
            .tempfile_in(dir)
            .map_err(write_err)?;
        file.write_all(self.document.as_bytes()).map_err(write_err)?;
        // Temp files are created owner-only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            file.as_file()
                .set_permissions(fs::Permissions::from_mode(0o644))
                .map_err(write_err)?;
        }
        file.persist(path).map_err(|err| write_err(err.error))?;

        tracing::info!(path = %path.display(), bytes = self.document.len(), "wrote document");
        Ok(())
    }
}

/// Runs load, validation and rendering for one set of options
pub struct Renderer {
    options: RenderOptions,
}

impl Renderer {
    pub fn new(options: RenderOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// Load and validate the catalog without rendering it
    pub fn load(&self) -> Result<Catalog> {
        let catalog = match &self.options.source {
            CatalogSource::File(path) => patternbook_catalog::load(path)?,
            CatalogSource::Builtin => builtin::catalog()?,
        };
        Ok(catalog)
    }

    /// Load, validate and render
    pub fn render(&self) -> Result<RenderOutput> {
        let catalog = self.load()?;
        self.render_catalog(&catalog)
    }

    /// Render an already loaded catalog with these options
    pub fn render_catalog(&self, catalog: &Catalog) -> Result<RenderOutput> {
        let format = self.options.resolved_format();
        let title = self
            .options
            .title
            .as_deref()
            .or(catalog.title())
            .unwrap_or(DEFAULT_TITLE)
            .to_string();

        tracing::debug!(%format, entries = catalog.len(), "rendering catalog");
        let toc = table_of_contents(catalog);
        let document = render_document(
            &Document {
                title: &title,
                catalog,
                toc: &toc,
            },
            format,
        )?;

        Ok(RenderOutput {
            document,
            format,
            title,
            toc,
        })
    }
}
