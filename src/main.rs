//! CLI entry point for md-blog

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "md-blog")]
#[command(version)]
#[command(about = "Load markdown posts, print their outlines and render them", long_about = None)]
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
    /// List posts, tags or categories
    List {
        /// Type of content to list (post, tag, category)
        #[arg(default_value = "post")]
        r#type: String,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Print the heading outline of a post
    Toc {
        /// Slug of the post
        slug: String,

        /// Only the top-level entries
        #[arg(long)]
        top: bool,

        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Render a post body to HTML
    Render {
        /// Slug of the post
        slug: String,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Compute reading progress for a scroll position
    Progress {
        /// Top of the content region in the document
        #[arg(long, allow_hyphen_values = true)]
        top: f64,

        /// Height of the content region
        #[arg(long)]
        height: f64,

        /// Window height
        #[arg(long)]
        viewport: f64,

        /// Vertical scroll offset
        #[arg(long, allow_hyphen_values = true)]
        scroll: f64,

        /// Subtracted from the region's top (defaults to `progress_offset`)
        #[arg(long, allow_hyphen_values = true)]
        offset: Option<f64>,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "md_blog=debug,info"
    } else {
        "md_blog=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Determine base directory
    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir().context("Cannot determine the current directory")?,
    };

    match cli.command {
        Commands::List { r#type, json } => {
            let blog = md_blog::Blog::new(&base_dir)?;
            md_blog::commands::list::run(&blog, &r#type, json)?;
        }

        Commands::Toc { slug, top, json } => {
            let blog = md_blog::Blog::new(&base_dir)?;
            md_blog::commands::toc::run(&blog, &slug, top, json)?;
        }

        Commands::Render { slug, output } => {
            let blog = md_blog::Blog::new(&base_dir)?;
            md_blog::commands::render::run(&blog, &slug, output.as_deref())?;
        }

        Commands::Progress {
            top,
            height,
            viewport,
            scroll,
            offset,
        } => {
            let blog = md_blog::Blog::new(&base_dir)?;
            let args = md_blog::commands::progress::ProgressArgs {
                top,
                height,
                viewport,
                scroll,
                offset,
            };
            md_blog::commands::progress::run(&blog, args)?;
        }

        Commands::Version => {
            println!("md-blog version {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
