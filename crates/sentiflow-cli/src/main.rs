//! SentiFlow CLI - Conversational sentiment analysis

use anyhow::Result;
use clap::{Parser, Subcommand};
use sentiflow_core::Config;

mod commands;
mod journal;
mod reply;

#[derive(Parser)]
#[command(name = "sentiflow")]
#[command(author = "Era Laboratories")]
#[command(version)]
#[command(about = "Sentiment and mood tracking for chat conversations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Verbose output (show timings and debug info)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat interactively; type quit, exit or bye to finish
    Chat {
        /// Don't write the conversation to the journal
        #[arg(long)]
        no_journal: bool,
    },

    /// Print the cleaned form of a statement
    Clean {
        /// Text to clean
        text: String,

        /// Also list the tokens
        #[arg(long)]
        tokens: bool,
    },

    /// Score a single statement
    Score {
        /// Text to score
        text: String,

        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// Analyse a transcript file (one user statement per line)
    File {
        /// Path to transcript
        path: String,

        /// Print the conversation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Train a naive Bayes model from `label<TAB>text` lines
    Train {
        /// Path to labelled TSV file
        path: String,

        /// Where to write the model (defaults to the configured model path)
        #[arg(short, long)]
        output: Option<String>,

        /// Laplace smoothing
        #[arg(long, default_value = "1.0")]
        alpha: f64,
    },

    /// List journalled conversations
    History {
        /// Number of most recent conversations to show
        #[arg(short = 'n', long, default_value = "10")]
        limit: usize,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show config file path
    Path,

    /// Write the current configuration to the config file
    Init,

    /// Set the statement scorer
    SetBackend {
        /// Backend name (lexicon, naive-bayes)
        backend: String,
    },

    /// Set the elongation cap (e.g. 2 turns "soooo" into "soo")
    SetElongation {
        /// Maximum repeated characters kept
        cap: usize,
    },

    /// Set how many words a negation reaches
    SetNegationWindow {
        /// Window in words
        window: usize,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(log_level)
        .with_target(false)
        .init();

    // Load configuration
    let config_path = cli.config.as_deref();
    let mut config = Config::load(config_path)?;

    match cli.command {
        Commands::Chat { no_journal } => commands::chat::run(&config, no_journal, cli.verbose),

        Commands::Clean { text, tokens } => commands::text::clean(&config, &text, tokens),

        Commands::Score { text, json } => commands::text::score(&config, &text, json),

        Commands::File { path, json } => commands::file::run(&config, &path, json),

        Commands::Train {
            path,
            output,
            alpha,
        } => commands::train::run(&config, &path, output.as_deref(), alpha),

        Commands::History { limit } => commands::history::run(&config, limit),

        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::show(&config),
            ConfigAction::Path => commands::config::show_path(config_path),
            ConfigAction::Init => commands::config::init(&config, config_path),
            ConfigAction::SetBackend { backend } => {
                commands::config::set_backend(&mut config, config_path, &backend)
            }
            ConfigAction::SetElongation { cap } => {
                commands::config::set_elongation(&mut config, config_path, cap)
            }
            ConfigAction::SetNegationWindow { window } => {
                commands::config::set_negation_window(&mut config, config_path, window)
            }
        },
    }
}
