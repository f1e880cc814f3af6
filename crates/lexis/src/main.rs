mod catalog;
mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Search {
            catalog,
            lang,
            limit,
            query,
        } => commands::search::run(&catalog, &lang, &query, limit),
        Commands::Suggest {
            catalog,
            lang,
            max_distance,
            query,
        } => commands::suggest::run(&catalog, &lang, &query, max_distance),
        Commands::Nearest {
            catalog,
            lang,
            max_distance,
            query,
        } => commands::suggest::run_nearest(&catalog, &lang, &query, max_distance),
        Commands::Stats { catalog, lang } => commands::stats::run(&catalog, lang.as_deref()),
    }
}
