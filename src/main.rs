//! CLI entry point for blog-index

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "blog-index")]
#[command(version)]
#[command(about = "Generate the article index of a markdown blog", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the article index artifact
    #[command(alias = "g")]
    Generate {
        /// Watch for file changes
        #[arg(short, long)]
        watch: bool,
    },

    /// List the articles the index contains
    List,

    /// Create a new post
    New {
        /// Title of the new post
        title: String,

        /// One-line summary shown on the home page
        #[arg(short = 'D', long, default_value = "")]
        description: String,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,
    },

    /// Remove the generated artifact
    Clean,

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "blog_index=debug,info"
    } else {
        "blog_index=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Failed to read current directory")?,
    };

    match cli.command {
        Commands::Generate { watch } => {
            let site = blog_index::BlogIndex::new(&base_dir)?;
            tracing::info!("Generating article index...");

            let path = site.generate()?;
            println!("Generated {}", path.display());

            if watch {
                blog_index::commands::generate::watch(&site)?;
            }
        }

        Commands::List => {
            let site = blog_index::BlogIndex::new(&base_dir)?;
            blog_index::commands::list::run(&site)?;
        }

        Commands::New {
            title,
            description,
            tags,
        } => {
            let site = blog_index::BlogIndex::new(&base_dir)?;
            tracing::info!("Creating new post with title: {}", title);
            let path = site.new_post(&title, &description, &tags)?;
            println!("Created: {}", path.display());
        }

        Commands::Clean => {
            let site = blog_index::BlogIndex::new(&base_dir)?;
            tracing::info!("Cleaning generated artifact...");
            site.clean()?;
            println!("Cleaned successfully!");
        }

        Commands::Version => {
            println!("blog-index version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
