// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Ticket HTTP handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use docket_server_auth::{Ticket, TicketAction, TicketId, TicketResource, UserId};
use serde::Deserialize;

use super::projects::load_project;
use crate::{
	api::AppState,
	auth_middleware::RequireIdentity,
	authz_middleware::{authorize_ticket, authorize_ticket_resource},
	error::ServerError,
};

pub const MAX_TITLE_LEN: usize = 200;

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
	pub title: String,
	#[serde(default)]
	pub description: String,
	#[serde(default)]
	pub assigned_id: Option<UserId>,
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketRequest {
	pub title: Option<String>,
	pub description: Option<String>,
	/// Absent leaves the assignee unchanged; `null` unassigns.
	#[serde(default, deserialize_with = "deserialize_optional_nullable")]
	pub assigned_id: Option<Option<UserId>>,
}

fn deserialize_optional_nullable<'de, D>(deserializer: D) -> Result<Option<Option<UserId>>, D::Error>
where
	D: serde::Deserializer<'de>,
{
	Option::<UserId>::deserialize(deserializer).map(Some)
}

fn validate_title(title: &str) -> Result<String, ServerError> {
	let title = title.trim();
	if title.is_empty() {
		return Err(ServerError::BadRequest("title must not be empty".to_string()));
	}
	if title.chars().count() > MAX_TITLE_LEN {
		return Err(ServerError::BadRequest(format!(
			"title must be at most {MAX_TITLE_LEN} characters"
		)));
	}
	Ok(title.to_string())
}

/// Loads a ticket by its path id. A malformed id is reported as not found.
async fn load_ticket(state: &AppState, raw_id: &str) -> Result<Ticket, ServerError> {
	let not_found = || ServerError::NotFound(format!("ticket {raw_id}"));
	let id: TicketId = raw_id.parse().map_err(|_| not_found())?;
	state
		.ticket_repo
		.get_ticket_by_id(&id)
		.await?
		.ok_or_else(not_found)
}

/// POST /api/projects/{project_id}/tickets
///
/// Authorized against a draft with no submitter or assignee, so only project
/// membership can grant creation.
#[tracing::instrument(skip(state, identity, req), fields(user_id = %identity.user_id))]
pub async fn create_ticket(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Json(req): Json<CreateTicketRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let project = load_project(&state, &project_id).await?;
	authorize_ticket_resource(
		&state,
		&identity,
		&TicketResource::draft(project.id),
		TicketAction::Create,
	)
	.await?;

	let title = validate_title(&req.title)?;
	let mut ticket = Ticket::new(project.id, identity.user_id, title, req.description);
	ticket.assigned_id = req.assigned_id;
	state.ticket_repo.create_ticket(&ticket).await?;

	tracing::info!(ticket_id = %ticket.id, project_id = %project.id, "ticket created");
	Ok((StatusCode::CREATED, Json(ticket)))
}

/// GET /api/tickets/{ticket_id}
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn get_ticket(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(ticket_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let ticket = load_ticket(&state, &ticket_id).await?;
	authorize_ticket(&state, &identity, &ticket, TicketAction::Read).await?;
	Ok(Json(ticket))
}

/// PATCH /api/tickets/{ticket_id}
#[tracing::instrument(skip(state, identity, req), fields(user_id = %identity.user_id))]
pub async fn update_ticket(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(ticket_id): Path<String>,
	Json(req): Json<UpdateTicketRequest>,
) -> Result<impl IntoResponse, ServerError> {
	let mut ticket = load_ticket(&state, &ticket_id).await?;
	authorize_ticket(&state, &identity, &ticket, TicketAction::Edit).await?;

	if let Some(title) = req.title {
		ticket.title = validate_title(&title)?;
	}
	if let Some(description) = req.description {
		ticket.description = description;
	}
	if let Some(assigned_id) = req.assigned_id {
		ticket.assigned_id = assigned_id;
	}

	state.ticket_repo.update_ticket(&ticket).await?;
	let updated = load_ticket(&state, &ticket_id).await?;
	Ok(Json(updated))
}

/// POST /api/tickets/{ticket_id}/close
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn close_ticket(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(ticket_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let ticket = load_ticket(&state, &ticket_id).await?;
	authorize_ticket(&state, &identity, &ticket, TicketAction::Close).await?;

	state.ticket_repo.close_ticket(&ticket.id).await?;
	tracing::info!(ticket_id = %ticket.id, "ticket closed");

	let closed = load_ticket(&state, &ticket_id).await?;
	Ok(Json(closed))
}

/// DELETE /api/tickets/{ticket_id}
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn delete_ticket(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(ticket_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	let ticket = load_ticket(&state, &ticket_id).await?;
	authorize_ticket(&state, &identity, &ticket, TicketAction::Delete).await?;

	if !state.ticket_repo.delete_ticket(&ticket.id).await? {
		return Err(ServerError::NotFound(format!("ticket {ticket_id}")));
	}

	tracing::info!(ticket_id = %ticket.id, "ticket deleted");
	Ok(StatusCode::NO_CONTENT)
}
