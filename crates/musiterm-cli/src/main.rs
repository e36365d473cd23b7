//! musiterm CLI: quiz yourself on musical terms from the terminal.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use musiterm_core::Category;

mod commands;
mod terminal;

#[derive(Parser)]
#[command(name = "musiterm", version, about = "Musical terms quiz and dictionary")]
struct Cli {
    /// Config file path
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Take a test (type `:q` to leave early)
    Quiz {
        /// complete, tempo, expression, dynamics, general, articulation, signs
        #[arg(long)]
        category: Option<Category>,

        /// Seed for a reproducible question order
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Browse a dictionary
    Dictionary {
        #[arg(long)]
        category: Option<Category>,

        /// Only show terms or definitions containing this text
        #[arg(long)]
        search: Option<String>,
    },

    /// Show or clear past test results
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,

        /// Output format: text, json, markdown
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show or change sound settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Toggle between the dark and light theme
    Theme,

    /// Create a starter config and sample dictionaries
    Init,
}

#[derive(Subcommand)]
enum HistoryAction {
    /// Delete every recorded test
    Clear {
        /// Do not ask for confirmation
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print the current settings
    Show,

    /// Change volumes (values are clamped to 0.0..=1.0)
    Set {
        #[arg(long)]
        master: Option<f64>,
        #[arg(long)]
        click: Option<f64>,
        #[arg(long)]
        correct: Option<f64>,
        #[arg(long)]
        incorrect: Option<f64>,
        #[arg(long)]
        typing: Option<f64>,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("musiterm=warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.config;

    let result = match cli.command {
        Commands::Quiz { category, seed } => commands::quiz::execute(config, category, seed),
        Commands::Dictionary { category, search } => {
            commands::dictionary::execute(config, category, search)
        }
        Commands::History { action, format } => match action {
            Some(HistoryAction::Clear { yes }) => commands::history::clear(config, yes),
            None => commands::history::show(config, format),
        },
        Commands::Settings { action } => match action {
            SettingsAction::Show => commands::settings::show(config),
            SettingsAction::Set {
                master,
                click,
                correct,
                incorrect,
                typing,
            } => commands::settings::set(
                config,
                commands::settings::VolumeChanges {
                    master,
                    click,
                    correct,
                    incorrect,
                    typing,
                },
            ),
        },
        Commands::Theme => commands::theme::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
