//! Integration tests for catalog rendering

use patternbook_catalog::CatalogError;
use patternbook_render::{builtin, Format, RenderError, RenderOptions, Renderer};
use pretty_assertions::assert_eq;

/// Helper to render a catalog source string through a temp file
fn render_source(source: &str, format: Format) -> Result<String, RenderError> {
    let temp_dir = std::env::temp_dir();
    let test_file = temp_dir.join(format!("catalog_{}.toml", rand::random::<u32>()));
    std::fs::write(&test_file, source).expect("failed to write temp catalog");

    let options = RenderOptions::new(&test_file).format(format);
    let result = Renderer::new(options).render().map(|output| output.document);

    let _ = std::fs::remove_file(&test_file);
    result
}

const SINGLETON_FACTORY: &str = r#"
[[pattern]]
name = "Singleton"
description = "One instance."
example = { language = "rust", code = "static ONE: u8 = 1;" }

[[pattern]]
name = "Factory"
description = "Creation by intent."
example = { language = "rust", code = "fn make() {}" }
"#;

#[test]
fn test_toc_order_and_headers() {
    let doc = render_source(SINGLETON_FACTORY, Format::Markdown).expect("render failed");

    let toc_singleton = doc.find("- [Singleton](#singleton)").unwrap();
    let toc_factory = doc.find("- [Factory](#factory)").unwrap();
    assert!(toc_singleton < toc_factory);

    let headers: Vec<_> = doc
        .lines()
        .filter_map(|line| line.strip_prefix("## "))
        .filter(|header| *header != "Table of Contents")
        .collect();
    assert_eq!(headers, ["Singleton", "Factory"]);
}

#[test]
fn test_rendering_is_deterministic() {
    for format in [Format::Markdown, Format::Html] {
        let first = render_source(SINGLETON_FACTORY, format).unwrap();
        let second = render_source(SINGLETON_FACTORY, format).unwrap();
        assert_eq!(first, second);
    }
}

#[test]
fn test_toc_count_matches_entries() {
    let output = Renderer::new(RenderOptions::builtin()).render().unwrap();
    assert_eq!(output.entry_count(), builtin::PATTERN_NAMES.len());

    let toc_lines = output
        .document
        .lines()
        .filter(|line| line.starts_with("- [") && line.contains("](#"))
        .count();
    assert_eq!(toc_lines, 15);
}

#[test]
fn test_every_anchor_resolves_to_one_section() {
    let output = Renderer::new(RenderOptions::builtin().format(Format::Html))
        .render()
        .unwrap();

    for item in &output.toc {
        let target = format!("<section id=\"{}\">", item.anchor);
        assert_eq!(output.document.matches(&target).count(), 1, "{}", item.anchor);
    }
}

#[test]
fn test_empty_catalog_renders() {
    let doc = render_source("", Format::Markdown).expect("empty catalog should render");
    assert_eq!(doc, "# Design Patterns\n\n## Table of Contents\n");
}

#[test]
fn test_duplicate_entry_fails() {
    let source = format!("{}{}", SINGLETON_FACTORY, SINGLETON_FACTORY);
    match render_source(&source, Format::Markdown) {
        Err(RenderError::Catalog(CatalogError::DuplicateEntry { name, .. })) => {
            assert_eq!(name, "Singleton");
        }
        other => panic!("expected duplicate entry error, got {:?}", other),
    }
}

#[test]
fn test_missing_example_fails_naming_entry() {
    let source = r#"
[[pattern]]
name = "Iterator"
description = "Walk a collection."
"#;
    let err = render_source(source, Format::Markdown).unwrap_err();
    assert_eq!(
        err.to_string(),
        "entry `Iterator` is missing required field `example`"
    );
}

#[test]
fn test_write_creates_directories() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("site").join("patterns.html");

    let options = RenderOptions::builtin().output(&path);
    let output = Renderer::new(options).render().unwrap();
    assert_eq!(output.format, Format::Html);
    output.write_to(&path).unwrap();

    let written = std::fs::read_to_string(&path).unwrap();
    assert_eq!(written, output.document);
    assert!(written.starts_with("<!DOCTYPE html>"));
}

#[test]
fn test_write_replaces_existing_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("patterns.md");
    std::fs::write(&path, "stale contents that are longer than nothing").unwrap();

    let output = Renderer::new(RenderOptions::builtin()).render().unwrap();
    output.write_to(&path).unwrap();
    output.write_to(&path).unwrap();

    assert_eq!(std::fs::read_to_string(&path).unwrap(), output.document);
    let names: Vec<_> = std::fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, ["patterns.md"]);
}

#[test]
fn test_output_toc_matches_document_anchors() {
    let source = r#"
[[pattern]]
name = "Proxy"
description = "Stand-in."
example = { language = "rust", code = "struct Proxy;" }

[[pattern]]
name = "proxy"
description = "Lowercase stand-in."
example = { language = "rust", code = "struct Lower;" }
"#;
    let catalog = patternbook_catalog::parse_toml(source).unwrap();
    let output = Renderer::new(RenderOptions::builtin())
        .render_catalog(&catalog)
        .unwrap();

    let anchors: Vec<_> = output.toc.iter().map(|item| item.anchor.as_str()).collect();
    assert_eq!(anchors, ["proxy", "proxy-1"]);
    for item in &output.toc {
        let link = format!("](#{})", item.anchor);
        let target = format!("<a id=\"{}\"></a>", item.anchor);
        assert_eq!(output.document.matches(&link).count(), 1, "{}", item.anchor);
        assert_eq!(output.document.matches(&target).count(), 1, "{}", item.anchor);
    }
}

#[test]
fn test_invalid_catalog_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("bad.toml");
    let dest = dir.path().join("out.md");
    std::fs::write(&input, "[[pattern]]\nname = \"Lonely\"\n").unwrap();

    let renderer = Renderer::new(RenderOptions::new(&input).output(&dest));
    assert!(renderer.render().is_err());
    assert!(!dest.exists());
}

#[test]
fn test_title_override() {
    let options = RenderOptions::builtin().title("My Patterns");
    let output = Renderer::new(options).render().unwrap();
    assert_eq!(output.title, "My Patterns");
    assert!(output.document.starts_with("# My Patterns\n"));
}

#[test]
fn test_json_input() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("catalog.json");
    std::fs::write(
        &input,
        r#"{"pattern": [{"name": "State", "description": "Behavior follows state.",
            "example": {"language": "rust", "code": "enum Light { Red, Green }"}}]}"#,
    )
    .unwrap();

    let output = Renderer::new(RenderOptions::new(&input)).render().unwrap();
    assert_eq!(output.format, Format::Markdown);
    assert!(output.document.contains("```rust\nenum Light { Red, Green }\n```"));
}
