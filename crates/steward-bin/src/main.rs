// SPDX-License-Identifier: PolyForm-Noncommercial-1.0.0
// Copyright (c) 2025 Sylvex. All rights reserved.

//! Steward - embeddable admin console generator
//!
//! Main binary entry point for the demo admin server.

mod cli;
mod demo;
mod logging;

use clap::Parser;
use tracing::info;

use steward_web::{AdminConfig, AdminSite};

use crate::cli::{Cli, Commands, ServeArgs};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logging(&cli.log_level, cli.log_format);

    let result = match cli.command {
        Some(Commands::Version) => {
            println!("steward v{}", steward_core::VERSION);
            Ok(())
        }
        Some(Commands::Serve(args)) => serve(args).await,
        None => serve_defaults().await,
    };

    if let Err(message) = result {
        tracing::error!("{}", message);
        std::process::exit(1);
    }
}

async fn serve_defaults() -> Result<(), String> {
    serve(ServeArgs {
        bind: "127.0.0.1:8080".to_string(),
        config: None,
        base_path: "/admin".to_string(),
        no_auth: false,
        admin_username: "admin".to_string(),
        admin_password: "admin".to_string(),
    })
    .await
}

/// Runs the demo admin server until interrupted.
async fn serve(args: ServeArgs) -> Result<(), String> {
    let config = load_config(&args)?;
    info!(base_path = %config.base_path, "Configuring admin site");

    let mut site = AdminSite::new(config);
    site.add_views(demo::demo_entities())
        .await
        .map_err(|e| format!("Failed to register demo entities: {}", e))?;

    let router = site.router();
    let listener = tokio::net::TcpListener::bind(&args.bind)
        .await
        .map_err(|e| format!("Failed to bind {}: {}", args.bind, e))?;

    info!(bind = %args.bind, "Admin console listening");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| format!("Server error: {}", e))?;

    info!("Admin console shut down");
    Ok(())
}

/// Loads the admin configuration from the YAML file when given, falling
/// back to CLI flags.
fn load_config(args: &ServeArgs) -> Result<AdminConfig, String> {
    match &args.config {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .map_err(|e| format!("Failed to read {}: {}", path.display(), e))?;
            serde_yaml::from_str(&raw)
                .map_err(|e| format!("Failed to parse {}: {}", path.display(), e))
        }
        None => Ok(AdminConfig::new()
            .with_base_path(&args.base_path)
            .with_authentication(!args.no_auth)
            .with_admin("Administrator", &args.admin_username, &args.admin_password)),
    }
}

/// Resolves on SIGINT (Ctrl+C).
async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
