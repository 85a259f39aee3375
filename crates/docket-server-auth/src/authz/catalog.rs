// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role catalog: decides whether a stored role satisfies a set of acceptable
//! project roles.
//!
//! Roles have no rank. Matching is set membership plus exactly one named
//! inheritance rule, [`MANAGER_ACTS_AS_OWNER`]: a ProjectManager is eligible
//! wherever Owner is accepted. The rule is one-directional and does not chain.

use super::types::{DecisionReason, RoleSet};
use crate::types::{ProjectRole, StoredRole};

/// A single "also eligible" relation between two project roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InheritanceRule {
	/// The role that gains eligibility.
	pub holder: ProjectRole,
	/// The role whose acceptance it inherits.
	pub inherits: ProjectRole,
}

pub const MANAGER_ACTS_AS_OWNER: InheritanceRule = InheritanceRule {
	holder: ProjectRole::ProjectManager,
	inherits: ProjectRole::Owner,
};

/// How a stored role matched (or failed to match) a role set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleMatch {
	Direct(ProjectRole),
	ManagerAsOwner,
	NoMatch(ProjectRole),
	Unrecognized,
}

impl RoleMatch {
	pub fn is_match(&self) -> bool {
		matches!(self, RoleMatch::Direct(_) | RoleMatch::ManagerAsOwner)
	}

	pub fn reason(&self) -> DecisionReason {
		match self {
			RoleMatch::Direct(role) => DecisionReason::RoleAccepted(*role),
			RoleMatch::ManagerAsOwner => DecisionReason::InheritedFromOwner,
			RoleMatch::NoMatch(role) => DecisionReason::RoleNotAccepted(*role),
			RoleMatch::Unrecognized => DecisionReason::UnrecognizedRole,
		}
	}
}

/// Classifies how `actual` relates to `acceptable`.
pub fn match_role(actual: &StoredRole, acceptable: &RoleSet) -> RoleMatch {
	let Some(role) = actual.known() else {
		return RoleMatch::Unrecognized;
	};

	if acceptable.contains(role) {
		return RoleMatch::Direct(role);
	}

	if role == MANAGER_ACTS_AS_OWNER.holder && acceptable.contains(MANAGER_ACTS_AS_OWNER.inherits) {
		return RoleMatch::ManagerAsOwner;
	}

	RoleMatch::NoMatch(role)
}

/// Returns `true` if `actual` is eligible under `acceptable`.
pub fn satisfies(actual: &StoredRole, acceptable: &RoleSet) -> bool {
	match_role(actual, acceptable).is_match()
}
