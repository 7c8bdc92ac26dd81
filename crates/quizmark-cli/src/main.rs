//! quizmark CLI: the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "quizmark", version, about = "Self-graded quizzes with saved progress")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the model answers for a section
    Show {
        /// Section id (e.g. "probability")
        #[arg(long)]
        section: String,

        /// Print an HTML fragment instead of text
        #[arg(long)]
        html: bool,

        /// Answer table file or directory (overrides config)
        #[arg(long)]
        answer_table: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade answers for a section and save the score
    Submit {
        /// Section id (e.g. "probability")
        #[arg(long)]
        section: String,

        /// One answer per question, in order (repeatable)
        #[arg(long = "answer", allow_hyphen_values = true)]
        answers: Vec<String>,

        /// Print an HTML fragment instead of text
        #[arg(long)]
        html: bool,

        /// Answer table file or directory (overrides config)
        #[arg(long)]
        answer_table: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Grade a file of submissions and write reports
    Grade {
        /// TOML file with [[submissions]] entries
        #[arg(long)]
        submissions: PathBuf,

        /// Output directory
        #[arg(long, default_value = "./quizmark-results")]
        output: PathBuf,

        /// Output format: json, html, markdown, all
        #[arg(long, default_value = "json")]
        format: String,

        /// Also save each section's score as progress
        #[arg(long)]
        save: bool,

        /// Answer table file or directory (overrides config)
        #[arg(long)]
        answer_table: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List saved progress
    Progress {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Remove all saved progress
    Clear {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate an answer table (the built-in one if no path is given)
    Validate {
        /// Answer table file or directory
        #[arg(long)]
        answer_table: Option<PathBuf>,
    },

    /// Create starter config and example answer table
    Init,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show {
            section,
            html,
            answer_table,
            config,
        } => commands::show::execute(section, html, answer_table, config),
        Commands::Submit {
            section,
            answers,
            html,
            answer_table,
            config,
        } => commands::submit::execute(section, answers, html, answer_table, config),
        Commands::Grade {
            submissions,
            output,
            format,
            save,
            answer_table,
            config,
        } => commands::grade::execute(submissions, output, format, save, answer_table, config),
        Commands::Progress { config } => commands::progress::execute(config),
        Commands::Clear { config } => commands::clear::execute(config),
        Commands::Validate { answer_table } => commands::validate::execute(answer_table),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
