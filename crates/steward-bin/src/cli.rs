// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! CLI argument parsing and command definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// =============================================================================
// Main CLI Structure
// =============================================================================

/// Steward - generated management console for stored entities
#[derive(Parser, Debug)]
#[command(
    name = "steward",
    author = "Sylvex <contact@sylvex.io>",
    version = steward_core::VERSION,
    about = "Embeddable admin console generator",
    long_about = None,
    propagate_version = true
)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(
        short,
        long,
        default_value = "info",
        env = "STEWARD_LOG_LEVEL",
        global = true
    )]
    pub log_level: String,

    /// Log format (text, json, compact)
    #[arg(long, default_value = "text", env = "STEWARD_LOG_FORMAT", global = true)]
    pub log_format: LogFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Serve the demo admin console (default)
    Serve(ServeArgs),

    /// Print version information
    Version,
}

/// Arguments for the `serve` command.
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Address to bind
    #[arg(short, long, default_value = "127.0.0.1:8080", env = "STEWARD_BIND")]
    pub bind: String,

    /// Optional YAML file with the admin configuration
    #[arg(short, long, env = "STEWARD_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base path the console is mounted under
    #[arg(long, default_value = "/admin")]
    pub base_path: String,

    /// Disable the session gate (development only)
    #[arg(long, default_value_t = false)]
    pub no_auth: bool,

    /// Administrator username
    #[arg(long, default_value = "admin", env = "STEWARD_ADMIN_USER")]
    pub admin_username: String,

    /// Administrator password
    #[arg(long, default_value = "admin", env = "STEWARD_ADMIN_PASSWORD")]
    pub admin_password: String,
}

/// Log output format.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// Human-readable text output
    Text,
    /// JSON output for log aggregation
    Json,
    /// Compact single-line output
    Compact,
}

// =============================================================================
// Tests
// =============================================================================
