// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project access policy.

use crate::authz::catalog;
use crate::authz::{Decision, DecisionReason, RoleSet};
use crate::project::ProjectMembership;

/// Evaluates project access for a non-admin caller whose membership has
/// already been looked up.
pub fn evaluate(membership: Option<&ProjectMembership>, acceptable: &RoleSet) -> Decision {
	let Some(membership) = membership else {
		return Decision::deny(DecisionReason::NoMembership);
	};

	let matched = catalog::match_role(&membership.role, acceptable);
	if matched.is_match() {
		Decision::allow(matched.reason())
	} else {
		Decision::deny(matched.reason())
	}
}
