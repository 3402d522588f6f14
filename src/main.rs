//! gomark — generate a markdown README from the doc comments of a Go file.
//!
//! Reads one `.go` file, collects the documented top-level types and
//! functions, and writes them out as a markdown document with an index:
//!
//! - `gomark` reads `./main.go` and writes `./README.md`
//! - `gomark -f pkg/server.go -o docs/server.md -t .` titles the document
//!   with the package name
//!
//! `//` comments render as prose; `/* */` comments render as `golang` code
//! examples.

mod error;
mod model;
mod parser;
mod render;
mod toc;

use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "gomark",
    about = "Generate markdown documentation from the doc comments of a Go source file"
)]
struct Cli {
    /// Go source file to parse
    #[arg(short = 'f', long = "file", env = "GOMARK_FILE", default_value = "./main.go")]
    file: PathBuf,

    /// Output markdown file (overwritten if it exists)
    #[arg(short = 'o', long, env = "GOMARK_OUTPUT", default_value = "./README.md")]
    output: PathBuf,

    /// Markdown title. "." uses the package name.
    #[arg(short = 't', long, env = "GOMARK_TITLE", default_value = "goMark📑")]
    title: String,

    /// Only log warnings and errors
    #[arg(short = 'q', long)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.quiet);

    let content =
        fs::read(&cli.file).with_context(|| format!("failed to read {}", cli.file.display()))?;

    let markdown = generate(&cli.file, &content, &render::Title::from_flag(&cli.title))?;
    save(&cli.output, &markdown)?;

    tracing::info!("wrote {}", cli.output.display());
    Ok(())
}

/// Diagnostics go to stderr. `RUST_LOG` overrides the default level.
fn init_logging(quiet: bool) {
    let default = if quiet { "warn" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .without_time()
        .init();
}

/// Scan + render pipeline, kept free of I/O. Source that is not UTF-8 is
/// a parse failure.
fn generate(path: &Path, content: &[u8], title: &render::Title) -> Result<String> {
    let content = std::str::from_utf8(content)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    let file = parser::parse_file(path, content)?;
    Ok(render::render_file(&file, title))
}

fn save(path: &Path, markdown: &str) -> Result<()> {
    fs::write(path, markdown).with_context(|| format!("failed to write {}", path.display()))
}
