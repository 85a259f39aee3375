// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project repository.

use async_trait::async_trait;
use chrono::Utc;
use docket_server_auth::{Project, ProjectId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[async_trait]
pub trait ProjectStore: Send + Sync {
	async fn create_project(&self, project: &Project) -> Result<(), DbError>;
	async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError>;
}

#[derive(Clone)]
pub struct ProjectRepository {
	pool: SqlitePool,
}

impl ProjectRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Create a new project.
	///
	/// # Errors
	/// Returns `DbError::Conflict` if a project with the same id exists.
	#[tracing::instrument(skip(self, project), fields(project_id = %project.id))]
	pub async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO projects (id, name, created_at, updated_at)
			VALUES (?, ?, ?, ?)
			"#,
		)
		.bind(project.id.to_string())
		.bind(&project.name)
		.bind(project.created_at.to_rfc3339())
		.bind(project.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| crate::error::conflict_on_unique(e, || format!("project {}", project.id)))?;

		tracing::debug!(project_id = %project.id, "project created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(project_id = %id))]
	pub async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, name, created_at, updated_at
			FROM projects
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_project(&r)).transpose()
	}
}

fn row_to_project(row: &sqlx::sqlite::SqliteRow) -> Result<Project, DbError> {
	let id_str: String = row.get("id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	let id =
		Uuid::parse_str(&id_str).map_err(|e| DbError::Internal(format!("Invalid project id: {e}")))?;

	Ok(Project {
		id: ProjectId::new(id),
		name: row.get("name"),
		created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
			.map_err(|e| DbError::Internal(format!("Invalid created_at: {e}")))?
			.with_timezone(&Utc),
		updated_at: chrono::DateTime::parse_from_rfc3339(&updated_at)
			.map_err(|e| DbError::Internal(format!("Invalid updated_at: {e}")))?
			.with_timezone(&Utc),
	})
}

#[async_trait]
impl ProjectStore for ProjectRepository {
	async fn create_project(&self, project: &Project) -> Result<(), DbError> {
		self.create_project(project).await
	}

	async fn get_project_by_id(&self, id: &ProjectId) -> Result<Option<Project>, DbError> {
		self.get_project_by_id(id).await
	}
}
