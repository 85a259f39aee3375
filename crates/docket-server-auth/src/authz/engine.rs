// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access evaluators for projects and tickets.
//!
//! Both evaluators run the same three phases:
//!
//! 1. **Global role check**: a global Admin is allowed before anything else
//! 2. **Membership lookup**: one read through [`MembershipLookup`]
//! 3. **Resource policy**: a pure function from [`super::policies`]
//!
//! A lookup failure is returned as [`AuthzError`], never folded into a denial.

use std::sync::Arc;
use tracing::instrument;

use super::lookup::MembershipLookup;
use super::policies::{project, ticket};
use super::types::{
	Decision, DecisionReason, Identity, ProjectResource, RoleSet, TicketAction, TicketResource,
};
use crate::error::AuthzError;

/// Checks global role permissions that apply across all resources.
fn check_global_roles(identity: &Identity) -> Option<Decision> {
	identity
		.is_admin()
		.then(|| Decision::allow(DecisionReason::GlobalAdmin))
}

/// Decides whether an identity holds an acceptable role in a project.
#[derive(Clone)]
pub struct ProjectAccessEvaluator {
	lookup: Arc<dyn MembershipLookup>,
}

impl ProjectAccessEvaluator {
	pub fn new(lookup: Arc<dyn MembershipLookup>) -> Self {
		Self { lookup }
	}

	#[instrument(
		level = "debug",
		skip(self, identity, resource, acceptable),
		fields(
			user_id = %identity.user_id,
			global_role = %identity.global_role,
			acceptable = %acceptable,
		)
	)]
	pub async fn evaluate(
		&self,
		identity: &Identity,
		resource: ProjectResource<'_>,
		acceptable: &RoleSet,
	) -> Result<Decision, AuthzError> {
		if let Some(decision) = check_global_roles(identity) {
			tracing::debug!(reason = ?decision.reason, "project access allowed");
			return Ok(decision);
		}

		let Some(project_id) = resource.project_id() else {
			tracing::debug!("project access denied: malformed project id");
			return Ok(Decision::deny(DecisionReason::InvalidProjectId));
		};

		let membership = self.lookup.find(project_id, identity.user_id).await?;
		let decision = project::evaluate(membership.as_ref(), acceptable);

		tracing::debug!(
			%project_id,
			allowed = decision.allowed,
			reason = ?decision.reason,
			"project access evaluated"
		);
		Ok(decision)
	}
}

/// Decides whether an identity may perform a ticket action.
#[derive(Clone)]
pub struct TicketAccessEvaluator {
	lookup: Arc<dyn MembershipLookup>,
}

impl TicketAccessEvaluator {
	pub fn new(lookup: Arc<dyn MembershipLookup>) -> Self {
		Self { lookup }
	}

	#[instrument(
		level = "debug",
		skip(self, identity, resource),
		fields(
			user_id = %identity.user_id,
			project_id = %resource.project_id,
			action = %action,
		)
	)]
	pub async fn evaluate(
		&self,
		identity: &Identity,
		resource: &TicketResource,
		action: TicketAction,
	) -> Result<Decision, AuthzError> {
		if let Some(decision) = check_global_roles(identity) {
			tracing::debug!(reason = ?decision.reason, "ticket access allowed");
			return Ok(decision);
		}

		let membership = self
			.lookup
			.find(resource.project_id, identity.user_id)
			.await?;
		let decision = ticket::evaluate(identity.user_id, membership.as_ref(), resource, action);

		tracing::debug!(
			allowed = decision.allowed,
			reason = ?decision.reason,
			"ticket access evaluated"
		);
		Ok(decision)
	}
}
