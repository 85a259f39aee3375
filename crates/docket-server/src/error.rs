// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Server error types and HTTP response conversions.

use axum::{
	http::StatusCode,
	response::{IntoResponse, Response},
	Json,
};
use docket_server_auth::{AuthzError, PolicyError};
use docket_server_db::DbError;
use serde::Serialize;

/// Server error types for project and ticket operations.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
	/// Database operation failed.
	#[error("Database error: {0}")]
	Db(#[from] sqlx::Error),

	/// Database error from docket-server-db.
	#[error("Database error: {0}")]
	DbError(DbError),

	/// Authorization could not be evaluated.
	#[error("Authorization error: {0}")]
	Authz(#[from] AuthzError),

	/// A named policy could not be built or resolved.
	#[error("Policy error: {0}")]
	Policy(#[from] PolicyError),

	/// Entity not found.
	#[error("Not found: {0}")]
	NotFound(String),

	/// Entity already exists.
	#[error("Conflict: {0}")]
	Conflict(String),

	/// Invalid request payload.
	#[error("Invalid request: {0}")]
	BadRequest(String),

	/// Unauthorized (no identity on the request).
	#[error("Unauthorized: {0}")]
	Unauthorized(String),

	/// Forbidden (insufficient permissions).
	#[error("Forbidden: {0}")]
	Forbidden(String),

	/// Internal server error.
	#[error("Internal error: {0}")]
	Internal(String),
}

impl From<DbError> for ServerError {
	fn from(err: DbError) -> Self {
		match err {
			DbError::NotFound(what) => ServerError::NotFound(what),
			DbError::Conflict(what) => ServerError::Conflict(what),
			other => ServerError::DbError(other),
		}
	}
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
	pub error: String,
	pub message: String,
}

impl ErrorResponse {
	pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
		Self {
			error: error.into(),
			message: message.into(),
		}
	}
}

fn internal() -> (StatusCode, ErrorResponse) {
	(
		StatusCode::INTERNAL_SERVER_ERROR,
		ErrorResponse::new("internal_error", "An internal error occurred"),
	)
}

impl IntoResponse for ServerError {
	fn into_response(self) -> Response {
		let (status, error_response) = match &self {
			ServerError::Db(e) => {
				tracing::error!(error = %e, "database error");
				internal()
			}
			ServerError::DbError(e) => {
				tracing::error!(error = %e, "database error");
				internal()
			}
			ServerError::Authz(e) => {
				tracing::error!(error = %e, "authorization lookup failed");
				internal()
			}
			ServerError::Policy(e) => {
				tracing::error!(error = %e, "policy error");
				internal()
			}
			ServerError::Internal(msg) => {
				tracing::error!(error = %msg, "internal error");
				internal()
			}
			ServerError::NotFound(what) => (
				StatusCode::NOT_FOUND,
				ErrorResponse::new("not_found", format!("Not found: {what}")),
			),
			ServerError::Conflict(what) => (
				StatusCode::CONFLICT,
				ErrorResponse::new("conflict", what.clone()),
			),
			ServerError::BadRequest(msg) => (
				StatusCode::BAD_REQUEST,
				ErrorResponse::new("bad_request", msg.clone()),
			),
			ServerError::Unauthorized(msg) => (
				StatusCode::UNAUTHORIZED,
				ErrorResponse::new("unauthorized", msg.clone()),
			),
			ServerError::Forbidden(msg) => (
				StatusCode::FORBIDDEN,
				ErrorResponse::new("forbidden", msg.clone()),
			),
		};

		(status, Json(error_response)).into_response()
	}
}
