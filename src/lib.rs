//! blog-index: build-time article index generator for a markdown blog
//!
//! Posts are markdown files with YAML front-matter. The index builder reads
//! them, keeps the ones with a single `title`, `description` and `date`, sorts
//! them newest first and writes a generated source file the site's home page
//! iterates to list articles.

pub mod commands;
pub mod config;
pub mod content;
pub mod helpers;
pub mod index;

use anyhow::Result;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up in the base directory
pub const CONFIG_FILE: &str = "blog-index.yml";

/// A blog project rooted at a base directory
#[derive(Clone)]
pub struct BlogIndex {
    /// Index configuration
    pub config: config::IndexConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Markdown posts directory
    pub posts_dir: PathBuf,
    /// Root directory of generated files
    pub output_dir: PathBuf,
}

impl BlogIndex {
    /// Create a new instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::IndexConfig::load(&config_path)?
        } else {
            config::IndexConfig::default()
        };

        Ok(Self::with_config(base_dir, config))
    }

    /// Create an instance with an explicit configuration
    pub fn with_config<P: AsRef<Path>>(base_dir: P, config: config::IndexConfig) -> Self {
        let base_dir = base_dir.as_ref().to_path_buf();
        let posts_dir = base_dir.join(&config.posts_dir);
        let output_dir = base_dir.join(&config.output_dir);

        Self {
            config,
            base_dir,
            posts_dir,
            output_dir,
        }
    }

    /// Path of the configuration file
    pub fn config_path(&self) -> PathBuf {
        self.base_dir.join(CONFIG_FILE)
    }

    /// Path of the generated artifact
    pub fn artifact_path(&self) -> PathBuf {
        index::emit::artifact_path(
            &self.output_dir,
            &self.config.package,
            &self.config.file_stem,
            self.config.format,
        )
    }

    /// Load the posts and build the article index without writing anything
    pub fn build(&self) -> Result<index::BuildReport> {
        let documents = content::loader::DocumentLoader::for_site(self).load()?;
        Ok(index::build_index(&documents, &self.config.defaults))
    }

    /// Build the index and write the generated artifact
    pub fn generate(&self) -> Result<PathBuf> {
        commands::generate::run(self)
    }

    /// Remove the generated artifact
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Scaffold a new post
    pub fn new_post(&self, title: &str, description: &str, tags: &[String]) -> Result<PathBuf> {
        commands::new::create_post(self, title, description, tags)
    }
}
