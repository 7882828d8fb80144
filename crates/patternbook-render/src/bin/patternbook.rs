//! patternbook CLI

use std::path::PathBuf;
use std::process;

use anyhow::Context;
use clap::Parser;
use patternbook_render::{Format, RenderOptions, RenderOutput, Renderer};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "patternbook")]
#[command(about = "Render a design pattern catalog into a navigable Markdown or HTML document")]
#[command(version)]
struct Args {
    /// Catalog file (TOML or JSON); the bundled catalog when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Destination document; stdout when omitted
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,

    /// Output format; inferred from --output when omitted
    #[arg(short, long, value_enum)]
    format: Option<Format>,

    /// Override the document title
    #[arg(long)]
    title: Option<String>,

    /// Validate the catalog and exit without rendering
    #[arg(long, conflicts_with = "dump_catalog")]
    check: bool,

    /// Print the validated catalog as JSON and exit
    #[arg(long)]
    dump_catalog: bool,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);

    if let Err(e) = run(&args) {
        eprintln!("patternbook: {:#}", e);
        process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn run(args: &Args) -> anyhow::Result<()> {
    let mut options = match &args.input {
        Some(path) => RenderOptions::new(path),
        None => RenderOptions::builtin(),
    };
    if let Some(output) = &args.output {
        options = options.output(output);
    }
    if let Some(format) = args.format {
        options = options.format(format);
    }
    if let Some(title) = &args.title {
        options = options.title(title);
    }

    let renderer = Renderer::new(options);
    let catalog = renderer.load().context("failed to load catalog")?;

    if args.check {
        println!("Catalog OK: {} entries", catalog.len());
        return Ok(());
    }

    if args.dump_catalog {
        let json = serde_json::to_string_pretty(&catalog).context("failed to serialize catalog")?;
        println!("{}", json);
        return Ok(());
    }

    let output = renderer.render_catalog(&catalog)?;
    match &args.output {
        Some(path) => {
            output.write_to(path)?;
            report(&output, args.verbose);
            println!("Wrote {} to {}", output.format, path.display());
        }
        None => print!("{}", output.document),
    }

    Ok(())
}

fn report(output: &RenderOutput, verbose: bool) {
    if !verbose {
        return;
    }
    println!("Rendered \"{}\"", output.title);
    println!("  Format: {}", output.format);
    println!("  Entries: {}", output.entry_count());
    for item in &output.toc {
        println!("    {} (#{})", item.name, item.anchor);
    }
}
