//! Command-line interface definitions using clap
//!
//! This module defines the CLI structure for geoip2-extras using clap's derive macros.

use clap::{Parser, Subcommand};

/// geoip2-extras - GeoIP2 request annotation middleware for actix-web
#[derive(Parser)]
#[command(name = "geoip2-extras")]
#[command(version)]
#[command(about = "GeoIP2 request annotation middleware for actix-web", long_about = None)]
pub struct Cli {
    /// Configuration file path
    #[arg(long, short = 'c', global = true, default_value = "config.toml")]
    pub config: String,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Start the demo HTTP server (default)
    Serve,

    /// Resolve a single IP address and print the record as JSON
    Lookup {
        /// IP address to resolve
        ip: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

/// Configuration management commands
#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: print to stdout)
        output_path: Option<String>,
    },
}
