// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Database setup for the server binary and integration tests.

use sqlx::sqlite::SqlitePool;

use crate::error::ServerError;

pub use docket_server_db::create_pool;

const MIGRATIONS: &[(&str, &str)] = &[
	(
		"001_create_projects",
		include_str!("../migrations/001_create_projects.sql"),
	),
	(
		"002_create_project_memberships",
		include_str!("../migrations/002_create_project_memberships.sql"),
	),
	(
		"003_create_tickets",
		include_str!("../migrations/003_create_tickets.sql"),
	),
];

/// Apply all migrations. Every statement is `IF NOT EXISTS`, so running this
/// against an existing database is a no-op.
#[tracing::instrument(skip(pool))]
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), ServerError> {
	for (name, sql) in MIGRATIONS {
		for stmt in statements(sql) {
			sqlx::query(stmt).execute(pool).await?;
		}
		tracing::debug!(migration = *name, "migration applied");
	}
	Ok(())
}

/// Splits a migration file on `;`, dropping comment-only fragments.
fn statements(sql: &str) -> impl Iterator<Item = &str> {
	sql.split(';').filter(|stmt| {
		stmt
			.lines()
			.map(str::trim)
			.any(|line| !line.is_empty() && !line.starts_with("--"))
	})
}
