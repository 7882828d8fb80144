use std::ops::Range;

use patternbook_catalog::{check, SourceFormat};
use tower_lsp::jsonrpc::Result;
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, LanguageServer, LspService, Server};
use tracing_subscriber::EnvFilter;

#[derive(Clone)]
struct Backend {
    client: Client,
}

impl Backend {
    fn new(client: Client) -> Self {
        Self { client }
    }

    async fn publish_diagnostics(&self, uri: Url, text: String, version: Option<i32>) {
        let format = source_format(&uri);
        let diagnostics = compute_diagnostics(&text, format);
        tracing::debug!(%uri, count = diagnostics.len(), "publishing diagnostics");
        self.client
            .publish_diagnostics(uri, diagnostics, version)
            .await;
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, _: InitializeParams) -> Result<InitializeResult> {
        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Kind(
                    TextDocumentSyncKind::FULL,
                )),
                ..ServerCapabilities::default()
            },
            server_info: Some(ServerInfo {
                name: "patternbook-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "patternbook LSP ready")
            .await;
    }

    async fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        let doc = params.text_document;
        self.publish_diagnostics(doc.uri, doc.text, Some(doc.version))
            .await;
    }

    async fn did_change(&self, params: DidChangeTextDocumentParams) {
        let uri = params.text_document.uri;
        let version = params.text_document.version;
        let Some(text) = params.content_changes.into_iter().last().map(|c| c.text) else {
            return;
        };
        self.publish_diagnostics(uri, text, Some(version)).await;
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        self.client
            .publish_diagnostics(params.text_document.uri, Vec::new(), None)
            .await;
    }
}

/// JSON for `.json` documents, TOML otherwise
fn source_format(uri: &Url) -> SourceFormat {
    if uri.path().to_ascii_lowercase().ends_with(".json") {
        SourceFormat::Json
    } else {
        SourceFormat::Toml
    }
}

fn compute_diagnostics(text: &str, format: SourceFormat) -> Vec<Diagnostic> {
    check(text, format)
        .into_iter()
        .map(|diag| Diagnostic {
            range: diag
                .span
                .map(|span| to_range(text, span))
                .unwrap_or_default(),
            severity: Some(DiagnosticSeverity::ERROR),
            source: Some("patternbook".to_string()),
            message: diag.error.to_string(),
            ..Diagnostic::default()
        })
        .collect()
}

fn to_range(text: &str, span: Range<usize>) -> tower_lsp::lsp_types::Range {
    tower_lsp::lsp_types::Range {
        start: to_position(text, span.start),
        end: to_position(text, span.end),
    }
}

/// Byte offset to an LSP position (0-based line, UTF-16 column)
fn to_position(text: &str, offset: usize) -> Position {
    let mut offset = offset.min(text.len());
    while !text.is_char_boundary(offset) {
        offset -= 1;
    }
    let before = &text[..offset];
    let line = before.matches('\n').count();
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let character = text[line_start..offset].encode_utf16().count();
    Position::new(line as u32, character as u32)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting patternbook LSP");

    let (stdin, stdout) = (tokio::io::stdin(), tokio::io::stdout());
    let (service, socket) = LspService::new(Backend::new);
    Server::new(stdin, stdout, socket).serve(service).await;
}
