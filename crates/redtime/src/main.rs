mod cli;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands, ConfigCommands, EntryCommands, OutputFormat};
use config::Config;
use output::{output_error, output_result};
use redmine_backend::RedmineClient;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    output::init_color(cli.color);
    logging::init(cli.verbose);

    if let Err(e) = run(&cli) {
        output_error(&e, cli.format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: &Cli) -> Result<()> {
    // Commands that don't need a Redmine connection
    let action = match &cli.command {
        Commands::Completions { shell } => {
            Cli::generate_completions(*shell);
            return Ok(());
        }
        Commands::Config { action } => return handle_config(cli, action),
        Commands::Entry { action } => action,
    };

    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(cli.url.clone(), cli.key.clone());
    if let EntryCommands::List { limit, offset, .. } = action {
        config.limit = limit.or(config.limit);
        config.offset = offset.or(config.offset);
    }
    config.validate()?;

    let client = RedmineClient::new(config.client_config()?);
    debug!(endpoint = %client.config().endpoint, "client ready");

    commands::entry::handle_entry(&client, action, cli.format)
}

fn handle_config(cli: &Cli, action: &ConfigCommands) -> Result<()> {
    match action {
        ConfigCommands::Show => {
            let mut config = Config::load(cli.config.clone())?;
            config.merge_with_cli(cli.url.clone(), cli.key.clone());
            output_result(&config.masked(), cli.format);
        }
        ConfigCommands::Path => {
            let paths = config::config_paths(cli.config.as_deref());
            match cli.format {
                OutputFormat::Json => {
                    println!("{}", serde_json::to_string_pretty(&paths)?);
                }
                OutputFormat::Text => {
                    for path in paths {
                        let marker = if path.exists() { " (found)" } else { "" };
                        println!("{}{}", path.display(), marker);
                    }
                }
            }
        }
    }
    Ok(())
}
