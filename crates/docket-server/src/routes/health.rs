// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Health HTTP handler.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::api::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthStatus {
	Healthy,
	Unhealthy,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
	pub status: HealthStatus,
	pub timestamp: String,
	pub database: HealthStatus,
	pub version: &'static str,
}

/// GET /health - Liveness plus a database round trip.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
	let database = match sqlx::query("SELECT 1").execute(&state.pool).await {
		Ok(_) => HealthStatus::Healthy,
		Err(e) => {
			tracing::error!(error = %e, "health check: database unreachable");
			HealthStatus::Unhealthy
		}
	};

	let (http_status, status) = match database {
		HealthStatus::Healthy => (StatusCode::OK, HealthStatus::Healthy),
		HealthStatus::Unhealthy => (StatusCode::SERVICE_UNAVAILABLE, HealthStatus::Unhealthy),
	};

	let response = HealthResponse {
		status,
		timestamp: chrono::Utc::now().to_rfc3339(),
		database,
		version: env!("CARGO_PKG_VERSION"),
	};

	(http_status, Json(response))
}
