// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Project membership repository.
//!
//! Memberships carry the role string exactly as stored. Legacy rows with
//! values outside the project role vocabulary are returned as
//! [`StoredRole::Unrecognized`] and are never rewritten here.
//!
//! [`MembershipRepository`] is also the production [`MembershipLookup`] used by
//! the authorization engine.

use async_trait::async_trait;
use chrono::Utc;
use docket_server_auth::{
	LookupError, MembershipLookup, ProjectId, ProjectMembership, ProjectRole, StoredRole, UserId,
};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[async_trait]
pub trait MembershipStore: Send + Sync {
	async fn get_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<ProjectMembership>, DbError>;
	async fn add_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: ProjectRole,
	) -> Result<ProjectMembership, DbError>;
	async fn update_member_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: ProjectRole,
	) -> Result<(), DbError>;
	async fn remove_member(&self, project_id: &ProjectId, user_id: &UserId)
		-> Result<bool, DbError>;
	async fn list_members(&self, project_id: &ProjectId) -> Result<Vec<ProjectMembership>, DbError>;
}

/// Repository for project membership rows.
///
/// All IDs are UUIDs stored as strings in SQLite.
#[derive(Clone)]
pub struct MembershipRepository {
	pool: SqlitePool,
}

impl MembershipRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	/// Get a user's membership in a project.
	///
	/// # Returns
	/// `None` if the user is not a participant.
	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn get_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<ProjectMembership>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT project_id, user_id, role, is_owner, created_at
			FROM project_memberships
			WHERE project_id = ? AND user_id = ?
			"#,
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_membership(&r)).transpose()
	}

	/// Add a participant to a project.
	///
	/// `is_owner` is set when the role is [`ProjectRole::Owner`].
	///
	/// # Errors
	/// Returns `DbError::Conflict` if the user is already a participant, or if
	/// `role` is [`ProjectRole::Owner`] and the project already has an owner.
	///
	/// # Database Constraints
	/// - (`project_id`, `user_id`) must be unique
	/// - `project_id` must reference an existing project
	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id, role = %role))]
	pub async fn add_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: ProjectRole,
	) -> Result<ProjectMembership, DbError> {
		if role == ProjectRole::Owner {
			self.ensure_no_other_owner(project_id, user_id).await?;
		}

		let membership = ProjectMembership::new(*project_id, *user_id, role);
		sqlx::query(
			r#"
			INSERT INTO project_memberships (id, project_id, user_id, role, is_owner, created_at)
			VALUES (?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(Uuid::new_v4().to_string())
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.bind(membership.role.as_str())
		.bind(membership.is_owner as i32)
		.bind(membership.created_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| {
			crate::error::conflict_on_unique(e, || {
				format!("user {user_id} is already a member of project {project_id}")
			})
		})?;

		tracing::debug!(project_id = %project_id, user_id = %user_id, role = %role, "member added to project");
		Ok(membership)
	}

	/// Update a participant's role.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the user is not a participant, and
	/// `DbError::Conflict` when promoting to owner while another member holds
	/// ownership.
	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id, role = %role))]
	pub async fn update_member_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: ProjectRole,
	) -> Result<(), DbError> {
		if role == ProjectRole::Owner {
			self.ensure_no_other_owner(project_id, user_id).await?;
		}

		let result = sqlx::query(
			r#"
			UPDATE project_memberships
			SET role = ?, is_owner = ?
			WHERE project_id = ? AND user_id = ?
			"#,
		)
		.bind(role.as_str())
		.bind((role == ProjectRole::Owner) as i32)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!(
				"membership of user {user_id} in project {project_id}"
			)));
		}

		tracing::debug!(project_id = %project_id, user_id = %user_id, role = %role, "member role updated");
		Ok(())
	}

	/// Remove a participant from a project.
	///
	/// # Returns
	/// `true` if a member was removed, `false` if not found.
	#[tracing::instrument(skip(self), fields(project_id = %project_id, user_id = %user_id))]
	pub async fn remove_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		let result = sqlx::query(
			r#"
			DELETE FROM project_memberships
			WHERE project_id = ? AND user_id = ?
			"#,
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.execute(&self.pool)
		.await?;

		let removed = result.rows_affected() > 0;
		if removed {
			tracing::debug!(project_id = %project_id, user_id = %user_id, "member removed from project");
		}
		Ok(removed)
	}

	/// A project has at most one owner.
	async fn ensure_no_other_owner(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<(), DbError> {
		let existing: Option<String> = sqlx::query_scalar(
			r#"
			SELECT user_id
			FROM project_memberships
			WHERE project_id = ? AND is_owner = 1 AND user_id != ?
			LIMIT 1
			"#,
		)
		.bind(project_id.to_string())
		.bind(user_id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		match existing {
			Some(owner) => Err(DbError::Conflict(format!(
				"project {project_id} already has owner {owner}"
			))),
			None => Ok(()),
		}
	}

	/// List all participants of a project ordered by join date.
	#[tracing::instrument(skip(self), fields(project_id = %project_id))]
	pub async fn list_members(
		&self,
		project_id: &ProjectId,
	) -> Result<Vec<ProjectMembership>, DbError> {
		let rows = sqlx::query(
			r#"
			SELECT project_id, user_id, role, is_owner, created_at
			FROM project_memberships
			WHERE project_id = ?
			ORDER BY created_at ASC
			"#,
		)
		.bind(project_id.to_string())
		.fetch_all(&self.pool)
		.await?;

		rows.iter().map(row_to_membership).collect()
	}
}

fn row_to_membership(row: &sqlx::sqlite::SqliteRow) -> Result<ProjectMembership, DbError> {
	let project_id_str: String = row.get("project_id");
	let user_id_str: String = row.get("user_id");
	let role_str: String = row.get("role");
	let is_owner: i32 = row.get("is_owner");
	let created_at: String = row.get("created_at");

	let project_id = Uuid::parse_str(&project_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid project_id: {e}")))?;
	let user_id = Uuid::parse_str(&user_id_str)
		.map_err(|e| DbError::Internal(format!("Invalid user_id: {e}")))?;

	let role = StoredRole::from(role_str);
	if let StoredRole::Unrecognized(raw) = &role {
		tracing::debug!(role = %raw, "membership has unrecognized role");
	}

	Ok(ProjectMembership {
		project_id: ProjectId::new(project_id),
		user_id: UserId::new(user_id),
		role,
		is_owner: is_owner != 0,
		created_at: chrono::DateTime::parse_from_rfc3339(&created_at)
			.map_err(|e| DbError::Internal(format!("Invalid created_at: {e}")))?
			.with_timezone(&Utc),
	})
}

#[async_trait]
impl MembershipStore for MembershipRepository {
	async fn get_membership(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<Option<ProjectMembership>, DbError> {
		self.get_membership(project_id, user_id).await
	}

	async fn add_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: ProjectRole,
	) -> Result<ProjectMembership, DbError> {
		self.add_member(project_id, user_id, role).await
	}

	async fn update_member_role(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
		role: ProjectRole,
	) -> Result<(), DbError> {
		self.update_member_role(project_id, user_id, role).await
	}

	async fn remove_member(
		&self,
		project_id: &ProjectId,
		user_id: &UserId,
	) -> Result<bool, DbError> {
		self.remove_member(project_id, user_id).await
	}

	async fn list_members(&self, project_id: &ProjectId) -> Result<Vec<ProjectMembership>, DbError> {
		self.list_members(project_id).await
	}
}

#[async_trait]
impl MembershipLookup for MembershipRepository {
	async fn find(
		&self,
		project_id: ProjectId,
		user_id: UserId,
	) -> Result<Option<ProjectMembership>, LookupError> {
		self
			.get_membership(&project_id, &user_id)
			.await
			.map_err(|e| {
				tracing::error!(error = %e, %project_id, %user_id, "membership lookup failed");
				LookupError::from(e)
			})
	}
}
