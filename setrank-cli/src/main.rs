//! Command-line front end for the setrank ranking engine.
//!
//! Plays the roles the engine treats as external collaborators: corpus source
//! (a JSON file), input capture (the query argument) and presentation (table
//! or JSON output).

mod corpus;
mod output;

use std::path::PathBuf;

use is_terminal::IsTerminal;

use clap::{Parser, Subcommand};
use colored::Colorize;
use serde_json::json;
use tracing::{debug, error};

use setrank::config::{ConfigLoader, LogLevel, SetrankConfig};
use setrank::filter::TagFilter;
use setrank::session::RankingSession;

#[derive(Parser)]
#[command(name = "setrank-cli")]
#[command(about = "Relevance ranking for searchable item libraries", long_about = None)]
#[command(version = setrank::VERSION)]
struct Cli {
    /// Corpus file: a JSON array of items in corpus order
    #[arg(long, short = 'C', global = true)]
    corpus: Option<PathBuf>,

    /// Configuration file (TOML or JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format (table, json) - use json for tool integration
    #[arg(long, short, default_value = "table", global = true)]
    output: String,

    /// Verbose output (debug level logging)
    #[arg(long, short, global = true)]
    verbose: bool,

    /// Quiet mode (suppress all logging output)
    #[arg(long, short, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Display version information
    Version,

    /// Rank the corpus against a query
    Rank {
        /// The query string; may be empty for the corpus's natural order
        query: String,

        /// Only show items carrying at least one of these tags
        #[arg(long, short, value_delimiter = ',')]
        tags: Vec<String>,

        /// Maximum number of results to show (overrides configuration)
        #[arg(long, short)]
        limit: Option<usize>,
    },

    /// Show frequency-model statistics for the corpus
    Stats {
        /// How many rarest/most common words to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
}

// Helper function to output errors in the appropriate format
fn output_error(error_msg: &str, output_format: &str) {
    if output_format == "json" {
        let error_response = json!({
            "error": true,
            "message": error_msg,
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&error_response).unwrap_or_else(|_| "{}".to_string())
        );
    } else {
        error!("{}", error_msg);
        if std::io::stderr().is_terminal() {
            eprintln!("{} {}", "error:".color(output::CliColors::error()).bold(), error_msg);
        } else {
            eprintln!("error: {}", error_msg);
        }
    }
}

fn load_config(cli: &Cli) -> setrank::Result<SetrankConfig> {
    let mut loader = ConfigLoader::new();
    loader.load_default_files();
    if let Some(path) = &cli.config {
        loader.load_file(path)?;
    }
    loader.load_env();

    let mut config = loader.extract()?;

    // CLI flags win over file and environment
    if cli.verbose {
        config.logging.level = LogLevel::Debug;
    }
    if cli.quiet {
        config.logging.stdout = false;
        config.logging.level = LogLevel::Error;
    }
    if cli.output == "json" {
        // Keep stdout parseable
        config.logging.stdout = false;
    }

    Ok(config)
}

fn run(cli: &Cli) -> setrank::Result<()> {
    let config = load_config(cli)?;
    setrank::logging::init(&config.logging)?;

    if let Commands::Version = cli.command {
        println!("setrank {}", setrank::VERSION);
        return Ok(());
    }

    let corpus_path = cli.corpus.as_ref().ok_or_else(|| {
        setrank::SetrankError::Corpus("no corpus file given (use --corpus)".to_string())
    })?;
    let items = corpus::load_corpus(corpus_path)?;
    debug!(items = items.len(), corpus = %corpus_path.display(), "loaded corpus");

    let session = RankingSession::with_tags(&items);
    let color = cli.output != "json" && std::io::stdout().is_terminal();

    match &cli.command {
        Commands::Rank { query, tags, limit } => {
            let filter = if tags.is_empty() {
                TagFilter::none()
            } else {
                TagFilter::new(tags.clone())
            };
            let ranking = session.rank_tagged(&items, query, &filter)?;
            let limit = limit.or(config.ranking.limit);

            if cli.output == "json" {
                let value =
                    output::ranking_to_json(&ranking, &items, config.ranking.excluded, limit);
                println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            } else {
                print!(
                    "{}",
                    output::render_ranking(&ranking, &items, config.ranking.excluded, limit, color)
                );
            }
        }

        Commands::Stats { top } => {
            if cli.output == "json" {
                let value = output::stats_to_json(session.word_table(), session.tag_table());
                println!("{}", serde_json::to_string_pretty(&value).unwrap_or_default());
            } else {
                print!(
                    "{}",
                    output::render_stats(session.word_table(), session.tag_table(), *top)
                );
            }
        }

        Commands::Version => unreachable!("handled above"),
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(&cli) {
        output_error(&e.to_string(), &cli.output);
        std::process::exit(1);
    }
}
