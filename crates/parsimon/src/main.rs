// SPDX-FileCopyrightText: 2026 Parsimon Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Parsimon - a cost-aware request router for chat-completion models.
//!
//! This is the binary entry point for the Parsimon CLI.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod chat;
mod config_cmd;
mod route;

/// Parsimon - route chat requests between a light and a heavy model.
#[derive(Parser, Debug)]
#[command(name = "parsimon", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Route a conversation and relay the selected model's reply.
    Chat {
        /// Path to a JSON request file; reads stdin when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Route a conversation and print the decision without generating.
    Route {
        /// Path to a JSON request file; reads stdin when omitted.
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print the resolved configuration as TOML.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match parsimon_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            parsimon_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    init_tracing(&config.log_level);

    let result = match cli.command {
        Some(Commands::Chat { input }) => chat::run_chat(config, input.as_deref()).await,
        Some(Commands::Route { input }) => route::run_route(config, input.as_deref()).await,
        Some(Commands::Config) => config_cmd::run_config(&config),
        None => {
            println!("parsimon: use --help for available commands");
            Ok(())
        }
    };

    if let Err(err) = result {
        eprintln!("parsimon: {err}");
        std::process::exit(1);
    }
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("parsimon={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
