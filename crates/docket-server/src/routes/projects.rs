// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Project HTTP handlers.

use axum::{
	extract::{Path, State},
	http::StatusCode,
	response::IntoResponse,
	Json,
};
use docket_server_auth::{Project, ProjectId, ProjectMembership, ProjectRole, UserId};
use serde::{Deserialize, Serialize};

use crate::{
	api::AppState, auth_middleware::RequireIdentity, authz_middleware::authorize_project,
	error::ServerError,
};

#[derive(Debug, Serialize)]
pub struct MembersResponse {
	pub members: Vec<ProjectMembership>,
}

#[derive(Debug, Deserialize)]
pub struct AddMemberRequest {
	pub user_id: UserId,
	pub role: ProjectRole,
}

/// Loads a project by its path id. A malformed id is reported as not found.
pub(crate) async fn load_project(state: &AppState, raw_id: &str) -> Result<Project, ServerError> {
	let not_found = || ServerError::NotFound(format!("project {raw_id}"));
	let id: ProjectId = raw_id.parse().map_err(|_| not_found())?;
	state
		.project_repo
		.get_project_by_id(&id)
		.await?
		.ok_or_else(not_found)
}

/// GET /api/projects/{project_id}
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn get_project(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	authorize_project(
		&state,
		&identity,
		project_id.as_str(),
		&state.policies.view_project,
	)
	.await?;

	let project = load_project(&state, &project_id).await?;
	Ok(Json(project))
}

/// GET /api/projects/{project_id}/members
#[tracing::instrument(skip(state, identity), fields(user_id = %identity.user_id))]
pub async fn list_members(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ServerError> {
	authorize_project(
		&state,
		&identity,
		project_id.as_str(),
		&state.policies.view_project,
	)
	.await?;

	let project = load_project(&state, &project_id).await?;
	let members = state.membership_repo.list_members(&project.id).await?;
	Ok(Json(MembersResponse { members }))
}

/// POST /api/projects/{project_id}/members
#[tracing::instrument(skip(state, identity, req), fields(user_id = %identity.user_id))]
pub async fn add_member(
	RequireIdentity(identity): RequireIdentity,
	State(state): State<AppState>,
	Path(project_id): Path<String>,
	Json(req): Json<AddMemberRequest>,
) -> Result<impl IntoResponse, ServerError> {
	authorize_project(
		&state,
		&identity,
		project_id.as_str(),
		&state.policies.manage_members,
	)
	.await?;

	let project = load_project(&state, &project_id).await?;
	let membership = state
		.membership_repo
		.add_member(&project.id, &req.user_id, req.role)
		.await?;

	tracing::info!(
		project_id = %project.id,
		member_id = %req.user_id,
		role = %req.role,
		"member added"
	);
	Ok((StatusCode::CREATED, Json(membership)))
}
