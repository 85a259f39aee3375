// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Types consumed and produced by the authorization engine.
//!
//! - [`Identity`]: the verified caller, passed explicitly into every evaluation
//! - [`ProjectResource`] / [`TicketResource`]: what is being accessed
//! - [`RoleSet`]: the project roles a policy accepts
//! - [`TicketAction`]: the ticket operations with distinct rules
//! - [`Decision`]: the allow/deny outcome with a diagnostic [`DecisionReason`]

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::project::Project;
use crate::types::{GlobalRole, ProjectId, ProjectRole, UserId};

// =============================================================================
// Identity
// =============================================================================

/// The verified caller of a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
	pub user_id: UserId,
	pub global_role: GlobalRole,
}

impl Identity {
	pub fn new(user_id: UserId, global_role: GlobalRole) -> Self {
		Self {
			user_id,
			global_role,
		}
	}

	pub fn is_admin(&self) -> bool {
		self.global_role == GlobalRole::Admin
	}
}

// =============================================================================
// Resources
// =============================================================================

/// A project named in one of the shapes callers naturally hold.
#[derive(Debug, Clone, Copy)]
pub enum ProjectResource<'a> {
	Id(ProjectId),
	/// An identifier straight from a path or payload, not yet parsed.
	StringId(&'a str),
	Entity(&'a Project),
}

impl ProjectResource<'_> {
	/// Normalizes the resource to a project identifier.
	///
	/// Returns `None` for a string that is not a valid project identifier.
	pub fn project_id(&self) -> Option<ProjectId> {
		match self {
			ProjectResource::Id(id) => Some(*id),
			ProjectResource::StringId(raw) => raw.parse().ok(),
			ProjectResource::Entity(project) => Some(project.id),
		}
	}
}

impl From<ProjectId> for ProjectResource<'_> {
	fn from(id: ProjectId) -> Self {
		ProjectResource::Id(id)
	}
}

impl<'a> From<&'a str> for ProjectResource<'a> {
	fn from(raw: &'a str) -> Self {
		ProjectResource::StringId(raw)
	}
}

impl<'a> From<&'a Project> for ProjectResource<'a> {
	fn from(project: &'a Project) -> Self {
		ProjectResource::Entity(project)
	}
}

/// The authorization-relevant attributes of a ticket.
///
/// Built from a loaded [`crate::Ticket`], or with [`TicketResource::draft`] for a
/// ticket that does not exist yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TicketResource {
	pub project_id: ProjectId,
	pub submitter_id: Option<UserId>,
	pub assigned_id: Option<UserId>,
}

impl TicketResource {
	pub fn new(
		project_id: ProjectId,
		submitter_id: Option<UserId>,
		assigned_id: Option<UserId>,
	) -> Self {
		Self {
			project_id,
			submitter_id,
			assigned_id,
		}
	}

	/// A ticket about to be created. It has no submitter or assignee, so only
	/// project membership can authorize its creation.
	pub fn draft(project_id: ProjectId) -> Self {
		Self::new(project_id, None, None)
	}

	pub fn is_submitter(&self, user_id: UserId) -> bool {
		self.submitter_id == Some(user_id)
	}

	pub fn is_assigned(&self, user_id: UserId) -> bool {
		self.assigned_id == Some(user_id)
	}
}

// =============================================================================
// Role sets
// =============================================================================

/// The set of project roles a policy accepts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoleSet(BTreeSet<ProjectRole>);

impl RoleSet {
	pub fn new() -> Self {
		Self(BTreeSet::new())
	}

	/// Every project role.
	pub fn all() -> Self {
		ProjectRole::all().iter().copied().collect()
	}

	/// Roles that work tickets: Owner, ProjectManager and Developer.
	pub fn project_staff() -> Self {
		[
			ProjectRole::Owner,
			ProjectRole::ProjectManager,
			ProjectRole::Developer,
		]
		.into_iter()
		.collect()
	}

	pub fn with(mut self, role: ProjectRole) -> Self {
		self.0.insert(role);
		self
	}

	pub fn insert(&mut self, role: ProjectRole) -> bool {
		self.0.insert(role)
	}

	pub fn contains(&self, role: ProjectRole) -> bool {
		self.0.contains(&role)
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = ProjectRole> + '_ {
		self.0.iter().copied()
	}
}

impl FromIterator<ProjectRole> for RoleSet {
	fn from_iter<I: IntoIterator<Item = ProjectRole>>(iter: I) -> Self {
		Self(iter.into_iter().collect())
	}
}

impl From<ProjectRole> for RoleSet {
	fn from(role: ProjectRole) -> Self {
		Self::new().with(role)
	}
}

impl fmt::Display for RoleSet {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut first = true;
		for role in self.iter() {
			if !first {
				f.write_str("|")?;
			}
			first = false;
			f.write_str(role.as_str())?;
		}
		Ok(())
	}
}

// =============================================================================
// Actions and decisions
// =============================================================================

/// Ticket operations, each with its own eligibility rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketAction {
	Read,
	Create,
	Edit,
	Close,
	Delete,
}

impl TicketAction {
	pub fn all() -> &'static [TicketAction] {
		&[
			TicketAction::Read,
			TicketAction::Create,
			TicketAction::Edit,
			TicketAction::Close,
			TicketAction::Delete,
		]
	}
}

impl fmt::Display for TicketAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let s = match self {
			TicketAction::Read => "read",
			TicketAction::Create => "create",
			TicketAction::Edit => "edit",
			TicketAction::Close => "close",
			TicketAction::Delete => "delete",
		};
		f.write_str(s)
	}
}

/// Why a decision came out the way it did. Diagnostic only, never shown to the
/// caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionReason {
	GlobalAdmin,
	RoleAccepted(ProjectRole),
	/// ProjectManager accepted where Owner is required.
	InheritedFromOwner,
	ProjectMember,
	Submitter,
	Assignee,
	NoMembership,
	UnrecognizedRole,
	RoleNotAccepted(ProjectRole),
	AdminOnly,
	InvalidProjectId,
}

/// The outcome of an authorization evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
	pub allowed: bool,
	pub reason: DecisionReason,
}

impl Decision {
	pub fn allow(reason: DecisionReason) -> Self {
		Self {
			allowed: true,
			reason,
		}
	}

	pub fn deny(reason: DecisionReason) -> Self {
		Self {
			allowed: false,
			reason,
		}
	}

	pub fn succeeded(&self) -> bool {
		self.allowed
	}
}
