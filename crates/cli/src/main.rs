//! Registrar - terminal front-end for the registration service.
//!
//! Plays the UI layer: collects form values, renders the user table and
//! answers the delete confirmation.

mod args;
mod session;

use std::io;

use clap::Parser;

use common::{AppResult, RegistrationConfig};

use crate::args::Cli;
use crate::session::Session;

fn main() {
    // Parse CLI arguments
    let cli = Cli::parse();

    let result = load_config(&cli).and_then(|config| {
        // Initialize tracing (verbose mode sets debug level)
        common::init_tracing(cli.verbose, &config.log_level);
        tracing::debug!(?config, "Configuration loaded");
        run(&cli, &config)
    });

    // Handle errors
    if let Err(e) = result {
        eprintln!("Error: {}", e.user_message());
        tracing::error!("Command failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from the environment, then apply flag overrides
fn load_config(cli: &Cli) -> AppResult<RegistrationConfig> {
    let config = RegistrationConfig::from_env()?;
    match cli.allowed_domains.as_deref() {
        Some(raw) => config.with_allowed_domains(raw),
        None => Ok(config),
    }
}

fn run(cli: &Cli, config: &RegistrationConfig) -> AppResult<()> {
    let service = registration_service_lib::from_config(config);
    let stdin = io::stdin();
    let stdout = io::stdout();

    let mut session = Session::new(service, stdin.lock(), stdout.lock(), cli.json);
    session.run()
}
