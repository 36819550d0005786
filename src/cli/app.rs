//! Main CLI application structure

use std::io::{self, BufRead, Write};

use anyhow::Result;
use clap::{Parser, Subcommand};

use super::output::{Output, OutputFormat};
use super::ask;
use crate::api::ApiClient;
use crate::storage::Config;

#[derive(Parser)]
#[command(name = "shellmate")]
#[command(author, version, about = "Terminal assistant for shell questions")]
#[command(propagate_version = true)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'f', global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Ignore previous history when asking
    #[arg(long, short = 'n')]
    pub new: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,

    /// The question to ask
    #[arg(trailing_var_arg = true)]
    pub question: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store an auth token for the assistant API
    Login,

    /// Set the persona the assistant answers as ("default" reverts)
    Become {
        /// Persona description, e.g. "angry pirate"
        #[arg(required = true)]
        persona: Vec<String>,
    },

    /// Inspect or change settings
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the current settings
    Show,

    /// Change a setting (persona, command_color, comment_color, run, meta)
    Set {
        /// Setting name
        key: String,

        /// New value
        value: String,
    },
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    let output = Output::new(cli.format, cli.verbose);

    output.verbose("Shellmate starting");

    match cli.command {
        Some(Commands::Login) => login(&output)?,

        Some(Commands::Become { persona }) => set_persona(&output, &persona.join(" "))?,

        Some(Commands::Config(cmd)) => match cmd {
            ConfigCommands::Show => show_config(&output)?,
            ConfigCommands::Set { key, value } => set_config(&output, &key, &value)?,
        },

        None => {
            let question = cli.question.join(" ");
            if question.trim().is_empty() {
                anyhow::bail!("Nothing to ask. Try: shellmate how do I list open ports");
            }
            ask::run(&output, &question, cli.new)?;
        }
    }

    output.verbose("Command completed successfully");
    Ok(())
}

/// Reads a token from stdin, validates it against the API, and stores it
fn login(output: &Output) -> Result<()> {
    print!("Auth token: ");
    io::stdout().flush()?;

    let mut token = String::new();
    io::stdin().lock().read_line(&mut token)?;
    let token = token.trim().to_string();

    if token.is_empty() {
        anyhow::bail!("No token provided");
    }

    let client = ApiClient::new()?;
    client.login(&token)?;

    let mut config = Config::load()?;
    config.token = Some(token);
    config.save()?;

    output.success("Authentication successful.");
    Ok(())
}

/// Stores a new persona in the config
fn set_persona(output: &Output, persona: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.persona = persona.to_string();
    config.save()?;

    if persona == "default" {
        output.success("Back to plain answers.");
    } else {
        output.success(&format!("New persona confirmed: {}", persona));
    }
    Ok(())
}

fn show_config(output: &Output) -> Result<()> {
    let config = Config::load()?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "authenticated": config.is_authenticated(),
            "persona": config.persona,
            "command_color": config.command_color,
            "comment_color": config.comment_color,
            "run": config.run,
            "meta": config.meta,
        }));
    } else {
        println!("{:<15} {}", "authenticated", config.is_authenticated());
        println!("{:<15} {}", "persona", config.persona);
        println!("{:<15} {}", "command_color", config.command_color);
        println!("{:<15} {}", "comment_color", config.comment_color);
        println!("{:<15} {}", "run", config.run);
        println!("{:<15} {}", "meta", config.meta);
    }

    Ok(())
}

fn set_config(output: &Output, key: &str, value: &str) -> Result<()> {
    let mut config = Config::load()?;
    config.set(key, value)?;
    config.save()?;

    output.success(&format!("Set {} = {}", key, value));
    Ok(())
}
