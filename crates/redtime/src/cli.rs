use clap::{ArgAction, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "redtime", version, about = "CLI for Redmine time entries")]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "REDTIME_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Redmine base URL (overrides config file)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Redmine API key (overrides config file)
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG takes precedence.
    #[arg(long, short = 'v', action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Time entry operations
    #[command(visible_alias = "te")]
    Entry {
        #[command(subcommand)]
        action: EntryCommands,
    },
    /// Inspect the resolved configuration
    #[command(visible_alias = "cfg")]
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    /// Generate shell completions and write to stdout
    pub fn generate_completions(shell: Shell) {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "redtime", &mut std::io::stdout());
    }
}

#[derive(Subcommand, Debug)]
pub enum EntryCommands {
    /// List time entries of a project
    #[command(visible_alias = "ls")]
    List {
        /// Numeric project ID
        #[arg(long, short = 'p')]
        project: u64,
        /// Maximum number of entries to return (overrides config)
        #[arg(long)]
        limit: Option<u32>,
        /// Number of entries to skip (overrides config)
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Get a time entry by ID
    Get {
        /// Time entry ID
        id: u64,
    },
    /// Log a new time entry
    #[command(visible_alias = "log")]
    Create {
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Update an existing time entry (unset flags keep their current value)
    Update {
        /// Time entry ID
        id: u64,
        #[command(flatten)]
        fields: EntryFields,
    },
    /// Delete a time entry
    #[command(visible_alias = "rm")]
    Delete {
        /// Time entry ID
        id: u64,
    },
}

/// Writable time entry fields shared by create and update
#[derive(clap::Args, Debug, Default, Clone)]
pub struct EntryFields {
    /// Issue ID the time was spent on
    #[arg(long, short = 'i')]
    pub issue: Option<u64>,
    /// Project ID (required by Redmine when no issue is given)
    #[arg(long, short = 'p')]
    pub project: Option<u64>,
    /// Date the time was spent (YYYY-MM-DD, create defaults to today)
    #[arg(long)]
    pub spent_on: Option<String>,
    /// Hours spent (required for create)
    #[arg(long, short = 'H')]
    pub hours: Option<f32>,
    /// Activity ID
    #[arg(long, short = 'a')]
    pub activity: Option<u64>,
    /// Free-form comment
    #[arg(long, short = 'm')]
    pub comments: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the resolved configuration (API key masked)
    Show,
    /// Print the config file search paths
    Path,
}
