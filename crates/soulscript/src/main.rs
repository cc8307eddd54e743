// SPDX-FileCopyrightText: 2026 Soulscript Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Soulscript - a mental-health journaling platform.
//!
//! This is the binary entry point for the Soulscript server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;
mod shutdown;

/// Soulscript - a mental-health journaling platform.
#[derive(Parser, Debug)]
#[command(name = "soulscript", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Soulscript API server.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match soulscript_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            soulscript_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("soulscript serve: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_config(&config);
        }
        None => {
            println!("soulscript: use --help for available commands");
        }
    }
}

/// Print the resolved configuration with secrets redacted.
fn print_config(config: &soulscript_config::SoulscriptConfig) {
    println!("server.host = {}", config.server.host);
    println!("server.port = {}", config.server.port);
    println!("server.log_level = {}", config.server.log_level);
    println!(
        "auth.token_secret = {}",
        if config.auth.token_secret.is_some() {
            "[redacted]"
        } else {
            "(unset)"
        }
    );
    println!("auth.token_ttl_days = {}", config.auth.token_ttl_days);
    println!("storage.database_path = {}", config.storage.database_path);
    println!("storage.wal_mode = {}", config.storage.wal_mode);
    println!("classifier.base_url = {}", config.classifier.base_url);
    println!(
        "email.smtp_host = {}",
        config.email.smtp_host.as_deref().unwrap_or("(unset)")
    );
    println!(
        "sms.account_sid = {}",
        if config.sms.account_sid.is_some() {
            "[redacted]"
        } else {
            "(unset)"
        }
    );
    println!("alerts.queue_depth = {}", config.alerts.queue_depth);
}
