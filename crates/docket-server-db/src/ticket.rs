// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket repository.

use async_trait::async_trait;
use chrono::Utc;
use docket_server_auth::{ProjectId, Ticket, TicketId, TicketStatus, UserId};
use sqlx::{sqlite::SqlitePool, Row};
use uuid::Uuid;

use crate::error::DbError;

#[async_trait]
pub trait TicketStore: Send + Sync {
	async fn create_ticket(&self, ticket: &Ticket) -> Result<(), DbError>;
	async fn get_ticket_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DbError>;
	async fn update_ticket(&self, ticket: &Ticket) -> Result<(), DbError>;
	async fn close_ticket(&self, id: &TicketId) -> Result<(), DbError>;
	async fn delete_ticket(&self, id: &TicketId) -> Result<bool, DbError>;
}

#[derive(Clone)]
pub struct TicketRepository {
	pool: SqlitePool,
}

impl TicketRepository {
	pub fn new(pool: SqlitePool) -> Self {
		Self { pool }
	}

	#[tracing::instrument(skip(self, ticket), fields(ticket_id = %ticket.id, project_id = %ticket.project_id))]
	pub async fn create_ticket(&self, ticket: &Ticket) -> Result<(), DbError> {
		sqlx::query(
			r#"
			INSERT INTO tickets (id, project_id, title, description, status, submitter_id, assigned_id, created_at, updated_at)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
			"#,
		)
		.bind(ticket.id.to_string())
		.bind(ticket.project_id.to_string())
		.bind(&ticket.title)
		.bind(&ticket.description)
		.bind(ticket.status.as_str())
		.bind(ticket.submitter_id.to_string())
		.bind(ticket.assigned_id.map(|id| id.to_string()))
		.bind(ticket.created_at.to_rfc3339())
		.bind(ticket.updated_at.to_rfc3339())
		.execute(&self.pool)
		.await
		.map_err(|e| crate::error::conflict_on_unique(e, || format!("ticket {}", ticket.id)))?;

		tracing::debug!(ticket_id = %ticket.id, "ticket created");
		Ok(())
	}

	#[tracing::instrument(skip(self), fields(ticket_id = %id))]
	pub async fn get_ticket_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DbError> {
		let row = sqlx::query(
			r#"
			SELECT id, project_id, title, description, status, submitter_id, assigned_id, created_at, updated_at
			FROM tickets
			WHERE id = ?
			"#,
		)
		.bind(id.to_string())
		.fetch_optional(&self.pool)
		.await?;

		row.map(|r| row_to_ticket(&r)).transpose()
	}

	/// Persist the editable fields of a ticket (title, description, assignee).
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the ticket does not exist.
	#[tracing::instrument(skip(self, ticket), fields(ticket_id = %ticket.id))]
	pub async fn update_ticket(&self, ticket: &Ticket) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE tickets
			SET title = ?, description = ?, assigned_id = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(&ticket.title)
		.bind(&ticket.description)
		.bind(ticket.assigned_id.map(|id| id.to_string()))
		.bind(Utc::now().to_rfc3339())
		.bind(ticket.id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("ticket {}", ticket.id)));
		}

		tracing::debug!(ticket_id = %ticket.id, "ticket updated");
		Ok(())
	}

	/// Mark a ticket closed. Closing an already closed ticket is a no-op.
	///
	/// # Errors
	/// Returns `DbError::NotFound` if the ticket does not exist.
	#[tracing::instrument(skip(self), fields(ticket_id = %id))]
	pub async fn close_ticket(&self, id: &TicketId) -> Result<(), DbError> {
		let result = sqlx::query(
			r#"
			UPDATE tickets
			SET status = ?, updated_at = ?
			WHERE id = ?
			"#,
		)
		.bind(TicketStatus::Closed.as_str())
		.bind(Utc::now().to_rfc3339())
		.bind(id.to_string())
		.execute(&self.pool)
		.await?;

		if result.rows_affected() == 0 {
			return Err(DbError::NotFound(format!("ticket {id}")));
		}

		tracing::debug!(ticket_id = %id, "ticket closed");
		Ok(())
	}

	/// # Returns
	/// `true` if a ticket was deleted, `false` if not found.
	#[tracing::instrument(skip(self), fields(ticket_id = %id))]
	pub async fn delete_ticket(&self, id: &TicketId) -> Result<bool, DbError> {
		let result = sqlx::query("DELETE FROM tickets WHERE id = ?")
			.bind(id.to_string())
			.execute(&self.pool)
			.await?;

		let deleted = result.rows_affected() > 0;
		if deleted {
			tracing::debug!(ticket_id = %id, "ticket deleted");
		}
		Ok(deleted)
	}
}

fn parse_uuid(value: &str, column: &str) -> Result<Uuid, DbError> {
	Uuid::parse_str(value).map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))
}

fn parse_timestamp(value: &str, column: &str) -> Result<chrono::DateTime<Utc>, DbError> {
	Ok(
		chrono::DateTime::parse_from_rfc3339(value)
			.map_err(|e| DbError::Internal(format!("Invalid {column}: {e}")))?
			.with_timezone(&Utc),
	)
}

fn row_to_ticket(row: &sqlx::sqlite::SqliteRow) -> Result<Ticket, DbError> {
	let id: String = row.get("id");
	let project_id: String = row.get("project_id");
	let status: String = row.get("status");
	let submitter_id: String = row.get("submitter_id");
	let assigned_id: Option<String> = row.get("assigned_id");
	let created_at: String = row.get("created_at");
	let updated_at: String = row.get("updated_at");

	Ok(Ticket {
		id: TicketId::new(parse_uuid(&id, "ticket id")?),
		project_id: ProjectId::new(parse_uuid(&project_id, "project_id")?),
		title: row.get("title"),
		description: row.get("description"),
		status: status.parse::<TicketStatus>().map_err(DbError::Internal)?,
		submitter_id: UserId::new(parse_uuid(&submitter_id, "submitter_id")?),
		assigned_id: assigned_id
			.map(|a| parse_uuid(&a, "assigned_id").map(UserId::new))
			.transpose()?,
		created_at: parse_timestamp(&created_at, "created_at")?,
		updated_at: parse_timestamp(&updated_at, "updated_at")?,
	})
}

#[async_trait]
impl TicketStore for TicketRepository {
	async fn create_ticket(&self, ticket: &Ticket) -> Result<(), DbError> {
		self.create_ticket(ticket).await
	}

	async fn get_ticket_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, DbError> {
		self.get_ticket_by_id(id).await
	}

	async fn update_ticket(&self, ticket: &Ticket) -> Result<(), DbError> {
		self.update_ticket(ticket).await
	}

	async fn close_ticket(&self, id: &TicketId) -> Result<(), DbError> {
		self.close_ticket(id).await
	}

	async fn delete_ticket(&self, id: &TicketId) -> Result<bool, DbError> {
		self.delete_ticket(id).await
	}
}
