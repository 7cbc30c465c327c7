//! Handbook CLI
//!
//! Search corpus tooling for the multi-language product manual.
//!
//! This is the binary entry point. The library functionality is in `lib.rs`.

use clap::Parser;
use color_eyre::eyre::Result;

/// Command-line interface for Handbook.
#[derive(Parser)]
#[command(
    name = "handbook",
    version,
    about = "Search corpus tooling for the product manual"
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "handbook.toml")]
    config: std::path::PathBuf,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

/// Available CLI commands.
#[derive(clap::Subcommand)]
enum Commands {
    /// Write the search corpus of every language in the rendered site
    Extract {
        /// Rendered site directory (defaults to site.dist_dir)
        #[arg(short, long)]
        site: Option<std::path::PathBuf>,
    },
    /// Search a corpus file
    Search {
        /// Corpus JSON file
        corpus: std::path::PathBuf,
        /// Query words
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
        /// Show at most this many results
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print the results page markup instead of a listing
        #[arg(long)]
        html: bool,
    },
    /// Validate configuration and search corpora
    Check {
        /// Rendered site directory (defaults to site.dist_dir)
        #[arg(short, long)]
        site: Option<std::path::PathBuf>,
        /// Treat warnings as errors
        #[arg(long)]
        strict: bool,
    },
    /// Serve the rendered site for local preview
    Serve {
        /// Rendered site directory (defaults to site.dist_dir)
        #[arg(short, long)]
        site: Option<std::path::PathBuf>,
        /// Port to listen on
        #[arg(short, long, default_value_t = 3000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();
    handbook::init_tracing(cli.verbose);

    match cli.command {
        Commands::Extract { site } => {
            handbook::cmd::extract::run(&cli.config, site.as_deref())?;
        }
        Commands::Search {
            corpus,
            query,
            limit,
            html,
        } => {
            handbook::cmd::search::run(&cli.config, &corpus, &query.join(" "), limit, html).await?;
        }
        Commands::Check { site, strict } => {
            handbook::cmd::check::run(&cli.config, site.as_deref(), strict)?;
        }
        Commands::Serve { site, port } => {
            handbook::cmd::serve::run(&cli.config, site.as_deref(), port).await?;
        }
    }

    Ok(())
}
