//! Markdown rendering
//!
//! Produces a title, a linked table of contents, then one `##` section per
//! entry. Each section is preceded by an explicit `<a id>` so the table of
//! contents links resolve no matter how the viewer slugs headings.

use std::fmt::Write as _;

use patternbook_catalog::PatternEntry;

use crate::error::Result;
use crate::render::{Document, DocumentRenderer};

/// Markdown document generator
pub struct MarkdownRenderer {
    /// Output buffer
    output: String,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self {
            output: String::new(),
        }
    }

    fn generate_toc(&mut self, document: &Document<'_>) -> Result<()> {
        self.output.push_str("## Table of Contents\n\n");
        for item in document.toc {
            writeln!(self.output, "- [{}](#{})", escape_link_text(&item.name), item.anchor)?;
        }
        if !document.toc.is_empty() {
            self.output.push('\n');
        }
        Ok(())
    }

    fn generate_entry(&mut self, entry: &PatternEntry, anchor: &str) -> Result<()> {
        writeln!(self.output, "<a id=\"{}\"></a>", anchor)?;
        writeln!(self.output, "## {}\n", escape_heading(&entry.name))?;
        writeln!(self.output, "{}\n", entry.description)?;

        self.generate_list("When to use", &entry.when_to_use)?;
        self.generate_list("When not to use", &entry.when_not_to_use)?;
        self.generate_list("Pros", &entry.pros)?;
        self.generate_list("Cons", &entry.cons)?;

        let fence = code_fence(&entry.example.code);
        self.output.push_str("### Example\n\n");
        writeln!(self.output, "{}{}", fence, entry.example.language)?;
        writeln!(self.output, "{}", entry.example.code)?;
        writeln!(self.output, "{}\n", fence)?;
        Ok(())
    }

    /// Bulleted list under a `###` heading; nothing for an empty list
    fn generate_list(&mut self, heading: &str, items: &[String]) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }
        writeln!(self.output, "### {}\n", heading)?;
        for item in items {
            writeln!(self.output, "- {}", item)?;
        }
        self.output.push('\n');
        Ok(())
    }
}

impl DocumentRenderer for MarkdownRenderer {
    fn render(&mut self, document: &Document<'_>) -> Result<String> {
        writeln!(self.output, "# {}\n", document.title)?;
        self.generate_toc(document)?;

        for (entry, item) in document.catalog.iter().zip(document.toc) {
            self.generate_entry(entry, &item.anchor)?;
        }

        // Exactly one trailing newline
        let len = self.output.trim_end_matches('\n').len();
        self.output.truncate(len);
        self.output.push('\n');

        Ok(std::mem::take(&mut self.output))
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Backtick fence one longer than the longest backtick run in `code`
fn code_fence(code: &str) -> String {
    let longest = code
        .split(|c| c != '`')
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat((longest + 1).max(3))
}

/// Keep a trailing `#` run in the heading text instead of letting it close
/// the ATX heading
fn escape_heading(text: &str) -> String {
    let stripped = text.trim_end_matches('#');
    if stripped.len() < text.len() && (stripped.is_empty() || stripped.ends_with(' ')) {
        format!("{}\\{}", stripped, &text[stripped.len()..])
    } else {
        text.to_string()
    }
}

/// Escape the characters that would end or break a link label
fn escape_link_text(text: &str) -> String {
    text.replace('\\', "\\\\")
        .replace('[', "\\[")
        .replace(']', "\\]")
}
