//! # statue CLI
//!
//! Command-line interface for the statue content pipeline.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "statue")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "statue.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the search index, reusing unchanged entries
    Index {
        /// Rebuild every entry even if the source is unchanged
        #[arg(long)]
        force: bool,

        /// Write the index here instead of the configured location
        #[arg(long)]
        output: Option<PathBuf>,
    },

    /// List every path a static export should render
    Paths,

    /// Print the document served at a URL
    Show {
        /// Site-relative URL (e.g., /blog/first-post)
        url: String,

        /// Language to look in (only used when i18n is enabled)
        #[arg(long)]
        lang: Option<String>,
    },

    /// List documents in a directory and its subdirectories
    List {
        /// Directory relative to the language root ("root" for top-level pages)
        directory: String,

        /// Language to look in (only used when i18n is enabled)
        #[arg(long)]
        lang: Option<String>,
    },

    /// Search the generated index
    Search {
        /// Search query
        query: String,

        /// Maximum results to return
        #[arg(long, default_value_t = 10)]
        limit: usize,

        /// Return JSON for machine consumption
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to initialize logging: {}", err);
    }

    if let Err(err) = run(cli) {
        tracing::error!("{:#}", err);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Commands::Index { force, output } => commands::generate_index(&cli.config, force, output),
        Commands::Paths => commands::list_paths(&cli.config),
        Commands::Show { url, lang } => commands::show_entry(&cli.config, &url, lang.as_deref()),
        Commands::List { directory, lang } => {
            commands::list_directory(&cli.config, &directory, lang.as_deref())
        }
        Commands::Search { query, limit, json } => {
            commands::search_index(&cli.config, &query, limit, json)
        }
    }
}
