//! Content loader - loads markdown documents from the posts directory

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::document::{apply_route_override, route_for, ROUTE_OVERRIDE_KEY};
use super::{FrontMatter, MarkdownDocument};
use crate::BlogIndex;

/// Loads markdown documents from a directory tree
pub struct DocumentLoader {
    posts_dir: PathBuf,
    route_prefix: String,
}

impl DocumentLoader {
    /// Create a new loader
    pub fn new<P: AsRef<Path>>(posts_dir: P, route_prefix: &str) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            route_prefix: route_prefix.to_string(),
        }
    }

    /// Create a loader for a site's posts directory
    pub fn for_site(site: &BlogIndex) -> Self {
        Self::new(&site.posts_dir, &site.config.route_prefix)
    }

    /// Load every markdown document under the posts directory.
    ///
    /// Files that cannot be read or whose front-matter is malformed are
    /// logged and left out.
    pub fn load(&self) -> Result<Vec<MarkdownDocument>> {
        if !self.posts_dir.exists() {
            tracing::warn!("Posts directory {:?} does not exist", self.posts_dir);
            return Ok(Vec::new());
        }

        let mut documents = Vec::new();

        for entry in WalkDir::new(&self.posts_dir)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = e.path().unwrap_or(self.posts_dir.as_path());
                    tracing::warn!("Failed to read {:?}: {}", path, e);
                    continue;
                }
            };
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_document(path) {
                    Ok(document) => documents.push(document),
                    Err(e) => {
                        tracing::warn!("Failed to load document {:?}: {:#}", path, e);
                    }
                }
            }
        }

        tracing::debug!(
            "Loaded {} documents from {:?}",
            documents.len(),
            self.posts_dir
        );

        Ok(documents)
    }

    /// Load a single document from a file
    fn load_document(&self, path: &Path) -> Result<MarkdownDocument> {
        let content = fs::read_to_string(path)?;
        let (front_matter, body) = FrontMatter::parse(&content)?;

        let relative = path.strip_prefix(&self.posts_dir).unwrap_or(path);
        let mut route = route_for(relative, &self.route_prefix);
        if let Some(route_override) = front_matter.single(ROUTE_OVERRIDE_KEY) {
            route = apply_route_override(&route, route_override);
        }

        Ok(MarkdownDocument::new(route, front_matter, body))
    }
}

/// Load documents from a path, attaching the directory to any error
pub fn load_documents(posts_dir: &Path, route_prefix: &str) -> Result<Vec<MarkdownDocument>> {
    DocumentLoader::new(posts_dir, route_prefix)
        .load()
        .with_context(|| format!("Failed to load documents from {:?}", posts_dir))
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e == "md" || e == "markdown")
        .unwrap_or(false)
}
