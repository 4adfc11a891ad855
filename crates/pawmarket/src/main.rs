// SPDX-FileCopyrightText: 2026 PawMarket Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! PawMarket - a dog marketplace.
//!
//! This is the binary entry point for the PawMarket server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod password;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use pawmarket_config::PawmarketConfig;

/// PawMarket - browse dogs for sale, send inquiries, manage listings.
#[derive(Parser, Debug)]
#[command(name = "pawmarket", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the HTTP server (default).
    Serve,
    /// Load and validate configuration, then print the resolved settings.
    CheckConfig,
    /// Hash an admin password for `admin.password_hash`.
    HashPassword,
}

fn load_config(path: Option<&PathBuf>) -> PawmarketConfig {
    let loaded = match path {
        Some(path) => pawmarket_config::load_and_validate_path(path),
        None => pawmarket_config::load_and_validate(),
    };
    match loaded {
        Ok(config) => config,
        Err(errors) => {
            pawmarket_config::render_errors(&errors);
            std::process::exit(1);
        }
    }
}

fn print_config(config: &PawmarketConfig) {
    println!("pawmarket: configuration OK");
    println!("  app.name            = {}", config.app.name);
    println!("  app.log_level       = {}", config.app.log_level);
    println!("  storage.database    = {}", config.storage.database_path);
    println!("  storage.wal_mode    = {}", config.storage.wal_mode);
    println!("  server.listen       = {}:{}", config.server.host, config.server.port);
    println!("  admin.username      = {}", config.admin.username);
    println!(
        "  admin.login         = {}",
        if config.admin.password_hash.is_some() {
            "enabled"
        } else {
            "disabled (no password_hash)"
        }
    );
    println!("  admin.session_ttl   = {}s", config.admin.session_ttl_secs);
    println!(
        "  images.max_size     = {}x{}",
        config.images.max_width, config.images.max_height
    );
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => {
            let config = load_config(cli.config.as_ref());
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
        Commands::CheckConfig => {
            let config = load_config(cli.config.as_ref());
            print_config(&config);
        }
        Commands::HashPassword => {
            if let Err(e) = password::run_hash_password() {
                eprintln!("error: {e}");
                std::process::exit(1);
            }
        }
    }
}
