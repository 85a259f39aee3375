// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Application state and router for project and ticket operations.

use std::sync::Arc;

use axum::{
	middleware::from_fn_with_state,
	routing::{get, post},
	Router,
};
use docket_server_auth::{
	authz::registry::{ANY_PROJECT_ROLE, OWNER_OR_MANAGER},
	AuthorizationGate, MembershipLookup, PolicyRegistry, ProjectPolicy,
};
use docket_server_config::{AuthConfig, ServerConfig};
use docket_server_db::{MembershipRepository, ProjectRepository, TicketRepository};
use sqlx::SqlitePool;

use crate::{auth_middleware::dev_identity_layer, error::ServerError, routes};

/// Policies the routes require, resolved once from the registry.
#[derive(Debug, Clone)]
pub struct RoutePolicies {
	/// Viewing a project and its member list.
	pub view_project: ProjectPolicy,
	/// Adding members to a project.
	pub manage_members: ProjectPolicy,
}

impl RoutePolicies {
	pub fn resolve(gate: &AuthorizationGate) -> Result<Self, ServerError> {
		Ok(Self {
			view_project: gate.policy(ANY_PROJECT_ROLE)?,
			manage_members: gate.policy(OWNER_OR_MANAGER)?,
		})
	}
}

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
	pub pool: SqlitePool,
	pub gate: AuthorizationGate,
	pub project_repo: Arc<ProjectRepository>,
	pub membership_repo: Arc<MembershipRepository>,
	pub ticket_repo: Arc<TicketRepository>,
	pub policies: RoutePolicies,
	pub auth_config: AuthConfig,
}

/// Builds the application state.
///
/// Configured policies are merged over the built-ins here; an unknown role
/// name in configuration fails startup.
pub fn create_app_state(pool: SqlitePool, config: &ServerConfig) -> Result<AppState, ServerError> {
	let registry = PolicyRegistry::with_overrides(&config.authz.policies)?;
	tracing::debug!(
		policies = ?registry.names().collect::<Vec<_>>(),
		"policy registry built"
	);

	let membership_repo = Arc::new(MembershipRepository::new(pool.clone()));
	let lookup: Arc<dyn MembershipLookup> = membership_repo.clone();
	let gate = AuthorizationGate::new(lookup, registry);
	let policies = RoutePolicies::resolve(&gate)?;

	if config.auth.dev_mode {
		tracing::warn!("dev mode enabled: identities are read from request headers");
	}

	Ok(AppState {
		project_repo: Arc::new(ProjectRepository::new(pool.clone())),
		ticket_repo: Arc::new(TicketRepository::new(pool.clone())),
		membership_repo,
		gate,
		policies,
		auth_config: config.auth.clone(),
		pool,
	})
}

/// Builds the router.
///
/// Routes expect an [`Identity`](docket_server_auth::Identity) in the request
/// extensions. Outside dev mode the embedding service is responsible for
/// inserting it with its own layer.
pub fn create_router(state: AppState) -> Router {
	let api = Router::new()
		.route("/api/projects/{project_id}", get(routes::projects::get_project))
		.route(
			"/api/projects/{project_id}/members",
			get(routes::projects::list_members).post(routes::projects::add_member),
		)
		.route(
			"/api/projects/{project_id}/tickets",
			post(routes::tickets::create_ticket),
		)
		.route(
			"/api/tickets/{ticket_id}",
			get(routes::tickets::get_ticket)
				.patch(routes::tickets::update_ticket)
				.delete(routes::tickets::delete_ticket),
		)
		.route(
			"/api/tickets/{ticket_id}/close",
			post(routes::tickets::close_ticket),
		)
		.layer(from_fn_with_state(state.clone(), dev_identity_layer));

	Router::new()
		.route("/health", get(routes::health::health_check))
		.merge(api)
		.with_state(state)
}
