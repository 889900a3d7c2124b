//! Generated artifact rendering
//!
//! The article index is written as a source file for the rendering layer:
//! either Rust (a type plus a static slice of literals) or JSON. The output
//! only depends on the index, so rebuilding unchanged posts yields an
//! identical file.

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::{ArticleEntry, ArticleIndex};
use crate::config::ArtifactFormat;

/// First line of every generated Rust artifact
pub const GENERATED_HEADER: &str = "// @generated by blog-index. Do not edit.";

const ENTRY_TYPE: &str = r#"#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArticleEntry {
    pub path: &'static str,
    pub author: &'static str,
    pub date: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub tags: &'static [&'static str],
}
"#;

/// Location of the artifact: `output_dir/<package dirs>/<file_stem>.<ext>`.
///
/// Package segments may be separated by `::` or `.`.
pub fn artifact_path(
    output_dir: &Path,
    package: &str,
    file_stem: &str,
    format: ArtifactFormat,
) -> PathBuf {
    let mut path = output_dir.to_path_buf();
    for segment in package
        .split("::")
        .flat_map(|s| s.split('.'))
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        path.push(segment);
    }
    path.push(format!("{}.{}", file_stem, format.extension()));
    path
}

/// Render the index in the given format
pub fn render(index: &ArticleIndex, format: ArtifactFormat) -> Result<String> {
    match format {
        ArtifactFormat::Rust => Ok(render_rust(index)),
        ArtifactFormat::Json => {
            let mut json = serde_json::to_string_pretty(index)?;
            json.push('\n');
            Ok(json)
        }
    }
}

/// Render the index as Rust source
pub fn render_rust(index: &ArticleIndex) -> String {
    let mut out = String::new();
    out.push_str(GENERATED_HEADER);
    out.push_str("\n\n");
    out.push_str(ENTRY_TYPE);
    out.push('\n');

    if index.is_empty() {
        out.push_str("pub static ENTRIES: &[ArticleEntry] = &[];\n");
        return out;
    }

    out.push_str("pub static ENTRIES: &[ArticleEntry] = &[\n");
    for entry in index {
        out.push_str(&render_entry(entry));
    }
    out.push_str("];\n");
    out
}

fn render_entry(entry: &ArticleEntry) -> String {
    let tags = entry
        .tags
        .iter()
        .map(|t| string_literal(t))
        .collect::<Vec<_>>()
        .join(", ");

    format!(
        "    ArticleEntry {{\n        path: {},\n        author: {},\n        date: {},\n        title: {},\n        description: {},\n        tags: &[{}],\n    }},\n",
        string_literal(&entry.route),
        string_literal(&entry.author),
        string_literal(&entry.date),
        string_literal(&entry.title),
        string_literal(&entry.description),
        tags,
    )
}

/// A Rust string literal for arbitrary text
fn string_literal(s: &str) -> String {
    // Debug output escapes quotes, backslashes and control characters
    format!("{:?}", s)
}

/// Write the artifact, replacing any previous one
pub fn write_artifact(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory {:?}", parent))?;
    }
    fs::write(path, contents).with_context(|| format!("Failed to write artifact {:?}", path))?;
    tracing::debug!("Wrote: {:?}", path);
    Ok(())
}
