// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

pub async fn create_test_pool() -> SqlitePool {
	let options = SqliteConnectOptions::from_str(":memory:")
		.unwrap()
		.create_if_missing(true);

	let pool = SqlitePoolOptions::new()
		.max_connections(1)
		.connect_with(options)
		.await
		.expect("Failed to create test pool");

	create_projects_table(&pool).await;
	create_project_memberships_table(&pool).await;
	create_tickets_table(&pool).await;
	pool
}

pub async fn create_projects_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS projects (
			id TEXT PRIMARY KEY,
			name TEXT NOT NULL,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_project_memberships_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS project_memberships (
			id TEXT PRIMARY KEY,
			project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
			user_id TEXT NOT NULL,
			role TEXT NOT NULL,
			is_owner INTEGER NOT NULL DEFAULT 0,
			created_at TEXT NOT NULL,
			UNIQUE(project_id, user_id)
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

pub async fn create_tickets_table(pool: &SqlitePool) {
	sqlx::query(
		r#"
		CREATE TABLE IF NOT EXISTS tickets (
			id TEXT PRIMARY KEY,
			project_id TEXT NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
			title TEXT NOT NULL,
			description TEXT NOT NULL DEFAULT '',
			status TEXT NOT NULL DEFAULT 'open',
			submitter_id TEXT NOT NULL,
			assigned_id TEXT,
			created_at TEXT NOT NULL,
			updated_at TEXT NOT NULL
		)
		"#,
	)
	.execute(pool)
	.await
	.unwrap();
}

/// Writes a membership row with an arbitrary role string, bypassing the
/// repository's typed API.
pub async fn insert_raw_membership(pool: &SqlitePool, project_id: &str, user_id: &str, role: &str) {
	sqlx::query(
		r#"
		INSERT INTO project_memberships (id, project_id, user_id, role, is_owner, created_at)
		VALUES (?, ?, ?, ?, 0, ?)
		"#,
	)
	.bind(uuid::Uuid::new_v4().to_string())
	.bind(project_id)
	.bind(user_id)
	.bind(role)
	.bind(chrono::Utc::now().to_rfc3339())
	.execute(pool)
	.await
	.unwrap();
}
