use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lexis")]
#[command(version)]
#[command(about = "Ranked catalog search with typo suggestions")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command
#[derive(Args, Debug, Clone)]
pub struct CatalogArgs {
    /// Catalog JSONL file, one {lang, id, title, tags, summary} record per line
    #[arg(short, long)]
    pub catalog: PathBuf,

    /// Search configuration JSON (defaults apply for missing keys)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Strip common English suffixes before indexing and searching
    #[arg(long)]
    pub stemmed: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Rank catalog entries against a query
    Search {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Language code
        #[arg(short, long)]
        lang: String,

        /// Maximum results (configured default if omitted)
        #[arg(long)]
        limit: Option<usize>,

        query: String,
    },

    /// Suggest vocabulary words close to a misspelled query
    Suggest {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[arg(short, long)]
        lang: String,

        /// Maximum edit distance (configured default if omitted)
        #[arg(long)]
        max_distance: Option<u32>,

        query: String,
    },

    /// Print the single closest vocabulary word
    Nearest {
        #[command(flatten)]
        catalog: CatalogArgs,

        #[arg(short, long)]
        lang: String,

        /// Maximum edit distance (configured default if omitted)
        #[arg(long)]
        max_distance: Option<u32>,

        query: String,
    },

    /// Show index sizes per language
    Stats {
        #[command(flatten)]
        catalog: CatalogArgs,

        /// Only this language
        #[arg(short, long)]
        lang: Option<String>,
    },
}
