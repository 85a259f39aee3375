// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Docket server binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use docket_server::{create_app_state, create_router};
use docket_server_config::LogFormat;
use tower_http::{
	cors::{Any, CorsLayer},
	trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod version;

/// Docket server - HTTP server for Docket projects and tickets.
#[derive(Parser, Debug)]
#[command(name = "docket-server", about = "Docket project and ticket server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/docket/server.toml)
	#[arg(long, env = "DOCKET_SERVER_CONFIG")]
	config: Option<PathBuf>,

	/// Subcommands for docket-server (e.g., `version`)
	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version and build information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	// Parse CLI arguments
	let args = Args::parse();

	// Handle subcommands that should not start the server
	if let Some(Command::Version) = args.command {
		println!("{}", version::format_version_info());
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	// Load configuration
	let config = match &args.config {
		Some(path) => docket_server_config::load_config_with_file(path)?,
		None => docket_server_config::load_config()?,
	};

	// Setup tracing
	let registry = tracing_subscriber::registry().with(
		tracing_subscriber::EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| config.logging.level.clone().into()),
	);
	match config.logging.format {
		LogFormat::Json => registry
			.with(tracing_subscriber::fmt::layer().json())
			.init(),
		LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
	}

	tracing::info!(
		host = %config.http.host,
		port = config.http.port,
		database = %config.database.url,
		"starting docket-server"
	);

	// Create database pool
	let pool = docket_server::db::create_pool(&config.database.url).await?;

	// Run database migrations
	docket_server::db::run_migrations(&pool).await?;

	let state = create_app_state(pool, &config)?;

	let app = create_router(state)
		.layer(TraceLayer::new_for_http())
		.layer(
			CorsLayer::new()
				.allow_origin(Any)
				.allow_methods(Any)
				.allow_headers(Any),
		);

	// Start server
	let addr = config.socket_addr();
	tracing::info!("listening on {}", addr);

	let listener = tokio::net::TcpListener::bind(&addr).await?;

	tokio::select! {
		result = axum::serve(listener, app) => {
			if let Err(e) = result {
				tracing::error!(error = %e, "Server error");
			}
		}
		_ = tokio::signal::ctrl_c() => {
			tracing::info!("Received shutdown signal");
		}
	}

	tracing::info!("Server shutdown complete");
	Ok(())
}
