//! Catalog sources: parsing TOML/JSON text and validating it into a `Catalog`.

use std::collections::HashMap;
use std::fs;
use std::ops::Range;
use std::path::Path;

use serde::Deserialize;

use crate::error::{CatalogError, EntryRef, Result};
use crate::model::{Catalog, Example, PatternEntry};

/// Text format of a catalog source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    Toml,
    Json,
}

impl SourceFormat {
    /// Pick the format from a file extension. Anything but `.json` is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => SourceFormat::Json,
            _ => SourceFormat::Toml,
        }
    }
}

/// A validation failure with the byte range of the source it refers to.
#[derive(Debug)]
pub struct Diagnostic {
    pub error: CatalogError,
    /// Byte range in the source, when it can be located
    pub span: Option<Range<usize>>,
}

/// Catalog document as written, before validation
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawCatalog {
    pub(crate) title: Option<String>,
    #[serde(default)]
    pub(crate) pattern: Vec<RawEntry>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawEntry {
    name: Option<String>,
    description: Option<String>,
    #[serde(default)]
    when_to_use: Vec<String>,
    #[serde(default)]
    when_not_to_use: Vec<String>,
    #[serde(default)]
    pros: Vec<String>,
    #[serde(default)]
    cons: Vec<String>,
    example: Option<RawExample>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawExample {
    language: Option<String>,
    code: Option<String>,
}

impl From<PatternEntry> for RawEntry {
    fn from(entry: PatternEntry) -> Self {
        Self {
            name: Some(entry.name),
            description: Some(entry.description),
            when_to_use: entry.when_to_use,
            when_not_to_use: entry.when_not_to_use,
            pros: entry.pros,
            cons: entry.cons,
            example: Some(RawExample {
                language: Some(entry.example.language),
                code: Some(entry.example.code),
            }),
        }
    }
}

/// Parse and validate a catalog, returning the first failure.
pub fn parse(input: &str, format: SourceFormat) -> Result<Catalog> {
    let raw = deserialize(input, format)?;
    tracing::debug!(?format, entries = raw.pattern.len(), "parsed catalog source");

    validate(raw).map_err(|mut errors| errors.remove(0))
}

pub fn parse_toml(input: &str) -> Result<Catalog> {
    parse(input, SourceFormat::Toml)
}

pub fn parse_json(input: &str) -> Result<Catalog> {
    parse(input, SourceFormat::Json)
}

/// Read a catalog file, choosing the format from its extension.
pub fn load(path: impl AsRef<Path>) -> Result<Catalog> {
    let path = path.as_ref();
    let input = fs::read_to_string(path).map_err(|source| CatalogError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let catalog = parse(&input, SourceFormat::from_path(path))?;
    tracing::info!(path = %path.display(), entries = catalog.len(), "loaded catalog");
    Ok(catalog)
}

/// Collect every failure in a catalog source, each located where possible.
///
/// An empty result means the source loads cleanly.
pub fn check(input: &str, format: SourceFormat) -> Vec<Diagnostic> {
    let raw = match deserialize(input, format) {
        Ok(raw) => raw,
        Err(error) => {
            let span = match &error {
                CatalogError::Syntax { span, .. } => span.clone(),
                _ => None,
            };
            return vec![Diagnostic { error, span }];
        }
    };

    let spans = match format {
        SourceFormat::Toml => entry_spans(input, raw.pattern.len()),
        SourceFormat::Json => json_entry_spans(input, raw.pattern.len()),
    };

    match validate(raw) {
        Ok(_) => Vec::new(),
        Err(errors) => errors
            .into_iter()
            .map(|error| {
                let span = error
                    .position()
                    .and_then(|pos| spans.as_ref().and_then(|s| s.get(pos - 1).cloned()));
                Diagnostic { error, span }
            })
            .collect(),
    }
}

fn deserialize(input: &str, format: SourceFormat) -> Result<RawCatalog> {
    match format {
        SourceFormat::Toml => toml::from_str(input).map_err(|e| CatalogError::Syntax {
            message: e.message().to_string(),
            span: e.span(),
        }),
        SourceFormat::Json => serde_json::from_str(input).map_err(|e| {
            let offset = line_col_to_offset(input, e.line(), e.column());
            CatalogError::Syntax {
                message: e.to_string(),
                span: offset.map(|start| start..(start + 1).min(input.len())),
            }
        }),
    }
}

/// Check every entry, collecting all failures in source order.
pub(crate) fn validate(raw: RawCatalog) -> std::result::Result<Catalog, Vec<CatalogError>> {
    let mut errors = Vec::new();
    let mut entries = Vec::with_capacity(raw.pattern.len());
    let mut seen: HashMap<String, usize> = HashMap::new();

    for (index, raw_entry) in raw.pattern.into_iter().enumerate() {
        let position = index + 1;
        let trimmed = raw_entry
            .name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty());
        // Headers are single lines, so a name with a line break can't be one
        let name = trimmed
            .filter(|name| !name.chars().any(char::is_control))
            .map(str::to_string);
        let entry_ref = EntryRef {
            position,
            name: name.clone(),
        };
        let before = errors.len();

        match (raw_entry.name.as_deref(), trimmed) {
            (None, _) => errors.push(CatalogError::MissingField {
                entry: entry_ref.clone(),
                field: "name",
            }),
            (Some(_), None) => errors.push(CatalogError::EmptyField {
                entry: entry_ref.clone(),
                field: "name".to_string(),
            }),
            (Some(_), Some(_)) if name.is_none() => errors.push(CatalogError::InvalidField {
                entry: entry_ref.clone(),
                field: "name",
                reason: "contains a line break or control character",
            }),
            (Some(_), Some(_)) => {}
        }

        let description = required_text(&mut errors, &entry_ref, "description", raw_entry.description);

        let example = match raw_entry.example {
            None => {
                errors.push(CatalogError::MissingField {
                    entry: entry_ref.clone(),
                    field: "example",
                });
                None
            }
            Some(example) => {
                let language =
                    required_text(&mut errors, &entry_ref, "example.language", example.language)
                        .filter(|language| {
                            let valid = is_language_tag(language);
                            if !valid {
                                errors.push(CatalogError::InvalidField {
                                    entry: entry_ref.clone(),
                                    field: "example.language",
                                    reason: "must be a single word without backticks",
                                });
                            }
                            valid
                        });
                let code = required_text(&mut errors, &entry_ref, "example.code", example.code);
                match (language, code) {
                    (Some(language), Some(code)) => Some(Example {
                        language,
                        code: normalize_code(&code),
                    }),
                    _ => None,
                }
            }
        };

        let when_to_use = text_list(&mut errors, &entry_ref, "when_to_use", raw_entry.when_to_use);
        let when_not_to_use =
            text_list(&mut errors, &entry_ref, "when_not_to_use", raw_entry.when_not_to_use);
        let pros = text_list(&mut errors, &entry_ref, "pros", raw_entry.pros);
        let cons = text_list(&mut errors, &entry_ref, "cons", raw_entry.cons);

        if let Some(name) = &name {
            if let Some(&first) = seen.get(name) {
                errors.push(CatalogError::DuplicateEntry {
                    name: name.clone(),
                    first,
                    second: position,
                });
            } else {
                seen.insert(name.clone(), position);
            }
        }

        if errors.len() > before {
            continue;
        }
        if let (Some(name), Some(description), Some(example)) = (name, description, example) {
            entries.push(PatternEntry {
                name,
                description,
                when_to_use,
                when_not_to_use,
                pros,
                cons,
                example,
            });
        }
    }

    if !errors.is_empty() {
        return Err(errors);
    }

    let title = raw
        .title
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty());
    Ok(Catalog::new_unchecked(title, entries))
}

fn required_text(
    errors: &mut Vec<CatalogError>,
    entry: &EntryRef,
    field: &'static str,
    value: Option<String>,
) -> Option<String> {
    match value {
        None => {
            errors.push(CatalogError::MissingField {
                entry: entry.clone(),
                field,
            });
            None
        }
        Some(text) if text.trim().is_empty() => {
            errors.push(CatalogError::EmptyField {
                entry: entry.clone(),
                field: field.to_string(),
            });
            None
        }
        Some(text) => Some(text.trim().to_string()),
    }
}

fn text_list(
    errors: &mut Vec<CatalogError>,
    entry: &EntryRef,
    field: &str,
    items: Vec<String>,
) -> Vec<String> {
    let mut list = Vec::with_capacity(items.len());
    for (i, item) in items.into_iter().enumerate() {
        let item = item.trim();
        if item.is_empty() {
            errors.push(CatalogError::EmptyField {
                entry: entry.clone(),
                field: format!("{}[{}]", field, i),
            });
        } else {
            list.push(item.to_string());
        }
    }
    list
}

/// A language tag is one token: it ends up in a code fence info string and
/// an HTML class name.
fn is_language_tag(language: &str) -> bool {
    !language
        .chars()
        .any(|c| c.is_whitespace() || c.is_control() || c == '`')
}

/// Drop blank leading lines and trailing whitespace, keeping indentation.
fn normalize_code(code: &str) -> String {
    let code = code.trim_end();
    let first_content = code
        .lines()
        .position(|line| !line.trim().is_empty())
        .unwrap_or(0);
    code.lines().skip(first_content).collect::<Vec<_>>().join("\n")
}

/// Byte ranges of each `[[pattern]]` header, if they line up with the entries.
fn entry_spans(input: &str, expected: usize) -> Option<Vec<Range<usize>>> {
    let mut spans = Vec::new();
    let mut offset = 0;
    for line in input.split_inclusive('\n') {
        let content = line.split('#').next().unwrap_or("");
        let compact: String = content.chars().filter(|c| !c.is_whitespace()).collect();
        if compact == "[[pattern]]" {
            let trimmed = line.trim_end_matches(['\n', '\r']);
            spans.push(offset..offset + trimmed.len());
        }
        offset += line.len();
    }
    (spans.len() == expected).then_some(spans)
}

/// Byte ranges of each object in the top-level `"pattern"` array, if they
/// line up with the entries.
fn json_entry_spans(input: &str, expected: usize) -> Option<Vec<Range<usize>>> {
    let mut spans = Vec::new();
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;
    let mut string_start = 0;
    let mut last_key = None;
    let mut in_patterns = false;
    let mut entry_start = None;

    for (i, byte) in input.bytes().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if byte == b'\\' {
                escaped = true;
            } else if byte == b'"' {
                in_string = false;
                if depth == 1 {
                    last_key = Some(&input[string_start..i]);
                }
            }
            continue;
        }
        match byte {
            b'"' => {
                in_string = true;
                string_start = i + 1;
            }
            b'{' | b'[' => {
                depth += 1;
                if depth == 2 && byte == b'[' && last_key == Some("pattern") {
                    in_patterns = true;
                } else if depth == 3 && byte == b'{' && in_patterns {
                    entry_start = Some(i);
                }
            }
            b'}' | b']' => {
                if depth == 3 && byte == b'}' {
                    if let Some(start) = entry_start.take() {
                        spans.push(start..i + 1);
                    }
                } else if depth == 2 {
                    in_patterns = false;
                }
                depth = depth.checked_sub(1)?;
            }
            _ => {}
        }
    }
    (spans.len() == expected).then_some(spans)
}

/// Convert serde_json's 1-based line/column into a byte offset.
fn line_col_to_offset(input: &str, line: usize, column: usize) -> Option<usize> {
    if line == 0 {
        return None;
    }
    let mut offset = 0;
    for (i, text) in input.split_inclusive('\n').enumerate() {
        if i + 1 == line {
            return Some((offset + column.saturating_sub(1)).min(input.len()));
        }
        offset += text.len();
    }
    Some(input.len())
}
