//! Parser module — Go source into a [`SourceFile`].

pub mod go;
pub mod lexer;

use crate::model::{Declaration, SourceFile};
use anyhow::{Context, Result};
use std::path::Path;

/// Scan a Go source file, logging a summary of what was found.
pub fn parse_file(path: &Path, content: &str) -> Result<SourceFile> {
    let file =
        go::parse(content).with_context(|| format!("failed to parse {}", path.display()))?;

    let documented = file
        .declarations
        .iter()
        .filter(|d| d.doc().is_some())
        .count();
    tracing::debug!(
        package = %file.package_name,
        declarations = file.declarations.len(),
        documented,
        comment_groups = file.comments.len(),
        "scanned {}",
        path.display()
    );
    if file.declarations.iter().all(|d| matches!(d, Declaration::Other(_))) {
        tracing::debug!("{} has no type or func declarations", path.display());
    }

    Ok(file)
}
