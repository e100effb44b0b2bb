//! # sab CLI entry point
//!
//! Terminal front end for the address book form. Each subcommand mounts
//! the form against the configured API, replays the user's input as form
//! events, and prints the resulting banner and address table.

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use sab_client::config::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use sab_client::render::render;
use sab_client::{AddressBookClient, ClientConfig, Field, FormController};
use sab_core::DEFAULT_COUNTRY;

/// Smart Address Book command-line client.
#[derive(Parser, Debug)]
#[command(name = "sab", version, about, long_about = None)]
struct Cli {
    /// Enable verbose output. Repeat for more verbosity (-v, -vv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Base URL of the address book API.
    #[arg(long, env = "SAB_API_URL", default_value = DEFAULT_API_URL, global = true)]
    api_url: String,

    /// Request timeout in seconds.
    #[arg(long, env = "SAB_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS, global = true)]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show every saved address.
    List,

    /// Look up the city and state for a PIN code.
    Pin {
        /// Six-digit postal code.
        code: String,
    },

    /// Save a new address. City and state are filled from the PIN code
    /// unless given explicitly.
    Add {
        /// Street line.
        #[arg(long)]
        line1: String,
        /// Postal code.
        #[arg(long)]
        pin: String,
        /// City; overrides the PIN lookup.
        #[arg(long)]
        city: Option<String>,
        /// State; overrides the PIN lookup.
        #[arg(long)]
        state: Option<String>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        _ => EnvFilter::new("debug"),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli).await {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            tracing::error!("{e:#}");
            eprintln!("error: {e:#}");
            ExitCode::from(2)
        }
    }
}

/// Returns `Ok(false)` when the form ends with a banner showing.
async fn run(cli: Cli) -> anyhow::Result<bool> {
    let config = ClientConfig::new(&cli.api_url)?.with_timeout_secs(cli.timeout_secs);
    tracing::debug!(?config, "client configured");
    let client = AddressBookClient::new(config)?;
    let mut form = FormController::new(client, DEFAULT_COUNTRY);

    match cli.command {
        Commands::List => {
            form.mount().await;
            print!("{}", render(form.state()));
        }
        Commands::Pin { code } => {
            form.change_pin_code(code).await;
            match form.state().banner() {
                Some(banner) => println!("! {banner}"),
                None => {
                    let fields = form.state().fields();
                    if fields.city.is_empty() {
                        println!("PIN code must be 6 characters to look up.");
                        return Ok(false);
                    }
                    println!("{}, {}", fields.city, fields.state);
                }
            }
        }
        Commands::Add {
            line1,
            pin,
            city,
            state,
        } => {
            form.mount().await;
            form.edit(Field::AddressLine1, line1).await;
            form.change_pin_code(pin).await;
            if let Some(city) = city {
                form.edit(Field::City, city).await;
            }
            if let Some(state) = state {
                form.edit(Field::State, state).await;
            }
            if let Some(saved) = form.submit().await {
                println!("Saved address {}", saved.id);
            }
            print!("{}", render(form.state()));
        }
    }

    Ok(form.state().banner().is_none())
}
