//! Index configuration (blog-index.yml)

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Author used when a post's front matter does not name one
pub const DEFAULT_AUTHOR: &str = "Preetam";

/// Main index configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    // Input
    pub posts_dir: String,
    pub route_prefix: String,

    // Output
    pub output_dir: String,
    pub package: String,
    pub file_stem: String,
    pub format: ArtifactFormat,

    // Field fallbacks
    pub defaults: FieldDefaults,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            posts_dir: "posts".to_string(),
            route_prefix: "/blog".to_string(),

            output_dir: "generated".to_string(),
            package: "pages::blog".to_string(),
            file_stem: "generated_blog_data".to_string(),
            format: ArtifactFormat::default(),

            defaults: FieldDefaults::default(),
        }
    }
}

impl IndexConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: IndexConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        Ok(config)
    }
}

/// Values substituted for optional front-matter fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldDefaults {
    pub author: String,
    pub tags: Vec<String>,
}

impl Default for FieldDefaults {
    fn default() -> Self {
        Self {
            author: DEFAULT_AUTHOR.to_string(),
            tags: Vec::new(),
        }
    }
}

/// Format of the generated artifact
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactFormat {
    /// Rust source with a static `ENTRIES` slice
    #[default]
    Rust,
    /// Pretty-printed JSON array
    Json,
}

impl ArtifactFormat {
    /// File extension for the artifact
    pub fn extension(self) -> &'static str {
        match self {
            ArtifactFormat::Rust => "rs",
            ArtifactFormat::Json => "json",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = IndexConfig::default();
        assert_eq!(config.posts_dir, "posts");
        assert_eq!(config.package, "pages::blog");
        assert_eq!(config.format, ArtifactFormat::Rust);
        assert_eq!(config.defaults.author, DEFAULT_AUTHOR);
        assert!(config.defaults.tags.is_empty());
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
posts_dir: content/posts
format: json
defaults:
  author: Test User
"#;
        let config: IndexConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.posts_dir, "content/posts");
        assert_eq!(config.format, ArtifactFormat::Json);
        assert_eq!(config.defaults.author, "Test User");
        // Unset keys keep their defaults
        assert_eq!(config.route_prefix, "/blog");
        assert!(config.defaults.tags.is_empty());
    }

    #[test]
    fn test_load_invalid_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("blog-index.yml");
        fs::write(&path, "format: [not, a, format]").unwrap();

        let err = IndexConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config"));
    }
}
