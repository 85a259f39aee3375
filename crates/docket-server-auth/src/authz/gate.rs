// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Single entry point used by request handlers.

use std::sync::Arc;
use tracing::instrument;

use super::engine::{ProjectAccessEvaluator, TicketAccessEvaluator};
use super::lookup::MembershipLookup;
use super::registry::{PolicyRegistry, ProjectPolicy};
use super::types::{Decision, Identity, ProjectResource, TicketAction, TicketResource};
use crate::error::{AuthzError, PolicyError};

/// One authorization question.
#[derive(Debug, Clone, Copy)]
pub enum AccessRequest<'a> {
	Project {
		resource: ProjectResource<'a>,
		policy: &'a ProjectPolicy,
	},
	Ticket {
		resource: &'a TicketResource,
		action: TicketAction,
	},
}

/// Routes access requests to the project or ticket evaluator.
///
/// Cheap to clone; share one gate across handlers.
#[derive(Clone)]
pub struct AuthorizationGate {
	projects: ProjectAccessEvaluator,
	tickets: TicketAccessEvaluator,
	registry: Arc<PolicyRegistry>,
}

impl AuthorizationGate {
	pub fn new(lookup: Arc<dyn MembershipLookup>, registry: PolicyRegistry) -> Self {
		Self {
			projects: ProjectAccessEvaluator::new(lookup.clone()),
			tickets: TicketAccessEvaluator::new(lookup),
			registry: Arc::new(registry),
		}
	}

	/// Resolves a named policy. Call at startup so a bad name fails early.
	pub fn policy(&self, name: &str) -> Result<ProjectPolicy, PolicyError> {
		self.registry.get(name)
	}

	pub fn registry(&self) -> &PolicyRegistry {
		&self.registry
	}

	#[instrument(level = "debug", skip(self, identity, request), fields(user_id = %identity.user_id))]
	pub async fn authorize(
		&self,
		identity: &Identity,
		request: AccessRequest<'_>,
	) -> Result<Decision, AuthzError> {
		match request {
			AccessRequest::Project { resource, policy } => {
				tracing::debug!(policy = policy.name(), "authorizing project request");
				self.projects.evaluate(identity, resource, policy.roles()).await
			}
			AccessRequest::Ticket { resource, action } => {
				self.tickets.evaluate(identity, resource, action).await
			}
		}
	}

	pub async fn authorize_project<'a>(
		&self,
		identity: &Identity,
		resource: impl Into<ProjectResource<'a>>,
		policy: &ProjectPolicy,
	) -> Result<Decision, AuthzError> {
		self.authorize(
			identity,
			AccessRequest::Project {
				resource: resource.into(),
				policy,
			},
		)
		.await
	}

	pub async fn authorize_ticket(
		&self,
		identity: &Identity,
		resource: &TicketResource,
		action: TicketAction,
	) -> Result<Decision, AuthzError> {
		self.authorize(identity, AccessRequest::Ticket { resource, action })
			.await
	}
}
