// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use docket_server_auth::LookupError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
	#[error("Database error: {0}")]
	Sqlx(#[from] sqlx::Error),

	#[error("Not found: {0}")]
	NotFound(String),

	#[error("Conflict: {0}")]
	Conflict(String),

	#[error("Internal: {0}")]
	Internal(String),
}

pub type Result<T> = std::result::Result<T, DbError>;

impl From<DbError> for LookupError {
	fn from(err: DbError) -> Self {
		LookupError::with_source("membership query failed", err)
	}
}

/// Maps a unique-constraint violation to [`DbError::Conflict`].
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: impl FnOnce() -> String) -> DbError {
	match &err {
		sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Conflict(what()),
		_ => DbError::Sqlx(err),
	}
}
