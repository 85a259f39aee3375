// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Authorization helpers for route handlers.
//!
//! Handlers ask the [`AuthorizationGate`](docket_server_auth::AuthorizationGate)
//! for a [`Decision`] and turn it into a `Result` with these helpers:
//!
//! - allowed: `Ok(())`
//! - denied: 403 Forbidden with a generic body. The decision reason is only
//!   logged, never returned to the client.
//! - lookup failure: 500 Internal Server Error
//!
//! # Example
//!
//! ```ignore
//! async fn close_ticket(
//!     RequireIdentity(identity): RequireIdentity,
//!     State(state): State<AppState>,
//!     Path(ticket_id): Path<String>,
//! ) -> Result<impl IntoResponse, ServerError> {
//!     let ticket = load_ticket(&state, &ticket_id).await?;
//!     authorize_ticket(&state, &identity, &ticket, TicketAction::Close).await?;
//!     // ... mutate
//! }
//! ```

use docket_server_auth::{
	Decision, Identity, ProjectPolicy, ProjectResource, Ticket, TicketAction, TicketResource,
};
use tracing::instrument;

use crate::{api::AppState, error::ServerError};

pub const FORBIDDEN_MESSAGE: &str = "Insufficient permissions";

/// Converts a decision into a handler result.
pub fn check_decision(decision: Decision) -> Result<(), ServerError> {
	if decision.succeeded() {
		tracing::debug!(reason = ?decision.reason, "Authorization check passed");
		Ok(())
	} else {
		tracing::info!("Authorization denied");
		tracing::debug!(reason = ?decision.reason, "denial reason");
		Err(ServerError::Forbidden(FORBIDDEN_MESSAGE.to_string()))
	}
}

/// Requires `identity` to satisfy `policy` on the project.
#[instrument(
	level = "debug",
	skip(state, identity, resource, policy),
	fields(user_id = %identity.user_id, policy = policy.name())
)]
pub async fn authorize_project<'a>(
	state: &AppState,
	identity: &Identity,
	resource: impl Into<ProjectResource<'a>>,
	policy: &ProjectPolicy,
) -> Result<(), ServerError> {
	let decision = state
		.gate
		.authorize_project(identity, resource, policy)
		.await?;
	check_decision(decision)
}

/// Requires `identity` to be allowed `action` on a loaded ticket.
#[instrument(
	level = "debug",
	skip(state, identity, ticket),
	fields(user_id = %identity.user_id, ticket_id = %ticket.id, action = %action)
)]
pub async fn authorize_ticket(
	state: &AppState,
	identity: &Identity,
	ticket: &Ticket,
	action: TicketAction,
) -> Result<(), ServerError> {
	authorize_ticket_resource(state, identity, &TicketResource::from(ticket), action).await
}

/// Requires `identity` to be allowed `action` on a ticket-shaped resource,
/// such as the draft used for creation.
pub async fn authorize_ticket_resource(
	state: &AppState,
	identity: &Identity,
	resource: &TicketResource,
	action: TicketAction,
) -> Result<(), ServerError> {
	let decision = state
		.gate
		.authorize_ticket(identity, resource, action)
		.await?;
	check_decision(decision)
}
