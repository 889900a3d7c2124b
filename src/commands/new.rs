//! Create a new post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::helpers;
use crate::BlogIndex;

/// Scaffold a markdown post with the front-matter the index needs
pub fn create_post(
    site: &BlogIndex,
    title: &str,
    description: &str,
    tags: &[String],
) -> Result<PathBuf> {
    let slug = slug::slugify(title);
    if slug.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    fs::create_dir_all(&site.posts_dir)?;
    let file_path = site.posts_dir.join(format!("{}.md", slug));

    // Check if file already exists
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    fs::write(&file_path, scaffold(title, description, &helpers::today(), tags))?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Markdown source of a new post
fn scaffold(title: &str, description: &str, date: &str, tags: &[String]) -> String {
    let mut content = String::from("---\n");
    content.push_str(&format!("title: {}\n", yaml_string(title)));
    content.push_str(&format!("description: {}\n", yaml_string(description)));
    content.push_str(&format!("date: {}\n", date));
    if tags.is_empty() {
        content.push_str("tags: []\n");
    } else {
        content.push_str("tags:\n");
        for tag in tags {
            content.push_str(&format!("  - {}\n", yaml_string(tag)));
        }
    }
    content.push_str("---\n\n");
    content
}

/// Double-quoted YAML scalar; JSON string syntax is valid YAML
fn yaml_string(s: &str) -> String {
    serde_json::Value::from(s).to_string()
}
