// SPDX-FileCopyrightText: 2026 Kapterka Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Kapterka -- a Telegram request desk for field equipment, repairs, and
//! consumables.
//!
//! This is the binary entry point.

use clap::{Parser, Subcommand};

mod serve;

/// Kapterka -- a Telegram request desk.
#[derive(Parser, Debug)]
#[command(name = "kapterka", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the request desk bot.
    Serve,
    /// Print the resolved configuration (token redacted).
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match kapterka_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            kapterka_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(error) = serve::run_serve(config).await {
                eprintln!("kapterka serve failed: {error}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => print_config(&config),
        None => println!("kapterka: use --help for available commands"),
    }
}

fn print_config(config: &kapterka_config::KapterkaConfig) {
    println!("service.name = {}", config.service.name);
    println!("service.log_level = {}", config.service.log_level);
    println!(
        "telegram.bot_token = {}",
        if config.telegram.bot_token.is_some() {
            "<set>"
        } else {
            "<missing>"
        }
    );
    println!(
        "telegram.poll_timeout_secs = {}",
        config.telegram.poll_timeout_secs
    );
    println!("tables.dir = {}", config.tables.dir);
    for (capability, ids) in config.access.bootstrap_sets() {
        println!("access.{capability:?} = {} bootstrap id(s)", ids.len());
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn default_config_is_valid() {
        let config = kapterka_config::load_and_validate_str("")
            .expect("default config should be valid");
        assert_eq!(config.service.name, "kapterka");
    }
}
