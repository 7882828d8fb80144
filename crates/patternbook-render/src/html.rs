//! Standalone HTML rendering

use std::fmt::Write as _;

use html_escape::{encode_double_quoted_attribute, encode_text};
use patternbook_catalog::PatternEntry;

use crate::error::Result;
use crate::render::{Document, DocumentRenderer};

/// HTML document generator
pub struct HtmlRenderer {
    /// Indentation level for pretty-printing
    indent: usize,
    /// Output buffer
    output: String,
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self {
            indent: 0,
            output: String::new(),
        }
    }

    fn generate_toc(&mut self, document: &Document<'_>) -> Result<()> {
        self.line("<nav>")?;
        self.indent += 1;
        self.line("<h2>Table of Contents</h2>")?;
        self.line("<ol>")?;
        self.indent += 1;
        for item in document.toc {
            let line = format!(
                "<li><a href=\"#{}\">{}</a></li>",
                encode_double_quoted_attribute(&item.anchor),
                encode_text(&item.name)
            );
            self.line(&line)?;
        }
        self.indent -= 1;
        self.line("</ol>")?;
        self.indent -= 1;
        self.line("</nav>")
    }

    fn generate_entry(&mut self, entry: &PatternEntry, anchor: &str) -> Result<()> {
        self.line(&format!("<section id=\"{}\">", encode_double_quoted_attribute(anchor)))?;
        self.indent += 1;
        self.line(&format!("<h2>{}</h2>", encode_text(&entry.name)))?;
        self.line(&format!("<p>{}</p>", encode_text(&entry.description)))?;

        self.generate_list("When to use", &entry.when_to_use)?;
        self.generate_list("When not to use", &entry.when_not_to_use)?;
        self.generate_list("Pros", &entry.pros)?;
        self.generate_list("Cons", &entry.cons)?;

        self.line("<h3>Example</h3>")?;
        // Code lines inside <pre> are never indented
        self.write_indent();
        writeln!(
            self.output,
            "<pre><code class=\"language-{}\">{}</code></pre>",
            encode_double_quoted_attribute(&entry.example.language),
            encode_text(&entry.example.code)
        )?;

        self.indent -= 1;
        self.line("</section>")
    }

    fn generate_list(&mut self, heading: &str, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        self.line(&format!("<h3>{}</h3>", heading))?;
        self.line("<ul>")?;
        self.indent += 1;
        for item in items {
            self.line(&format!("<li>{}</li>", encode_text(item)))?;
        }
        self.indent -= 1;
        self.line("</ul>")
    }

    /// Write one indented line
    fn line(&mut self, text: &str) -> Result<()> {
        self.write_indent();
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.output.push_str("  ");
        }
    }
}

impl DocumentRenderer for HtmlRenderer {
    fn render(&mut self, document: &Document<'_>) -> Result<String> {
        let title = encode_text(document.title);

        self.line("<!DOCTYPE html>")?;
        self.line("<html lang=\"en\">")?;
        self.line("<head>")?;
        self.indent += 1;
        self.line("<meta charset=\"utf-8\">")?;
        self.line(&format!("<title>{}</title>", title))?;
        self.indent -= 1;
        self.line("</head>")?;
        self.line("<body>")?;
        self.indent += 1;
        self.line(&format!("<h1>{}</h1>", title))?;
        self.generate_toc(document)?;

        for (entry, item) in document.catalog.iter().zip(document.toc) {
            self.generate_entry(entry, &item.anchor)?;
        }

        self.indent -= 1;
        self.line("</body>")?;
        self.line("</html>")?;

        Ok(std::mem::take(&mut self.output))
    }
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self::new()
    }
}
