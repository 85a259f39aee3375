// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket access policy.
//!
//! | Action | Eligible when |
//! |--------|---------------|
//! | Read   | any membership, or submitter, or assignee |
//! | Create | same as Read |
//! | Edit   | Owner/ProjectManager/Developer, or submitter, or assignee |
//! | Close  | Owner/ProjectManager/Developer only |
//! | Delete | global Admin only (handled before this policy runs) |

use crate::authz::catalog;
use crate::authz::{Decision, DecisionReason, RoleSet, TicketAction, TicketResource};
use crate::project::ProjectMembership;
use crate::types::UserId;

/// Evaluates a ticket action for a non-admin caller whose membership in the
/// ticket's project has already been looked up.
pub fn evaluate(
	user_id: UserId,
	membership: Option<&ProjectMembership>,
	ticket: &TicketResource,
	action: TicketAction,
) -> Decision {
	let is_submitter = ticket.is_submitter(user_id);
	let is_assigned = ticket.is_assigned(user_id);

	match action {
		TicketAction::Read | TicketAction::Create => {
			if membership.is_some() {
				Decision::allow(DecisionReason::ProjectMember)
			} else {
				participant(is_submitter, is_assigned)
			}
		}
		TicketAction::Edit => {
			let staff = staff_decision(membership);
			if staff.succeeded() {
				return staff;
			}
			let by_participation = participant(is_submitter, is_assigned);
			if by_participation.succeeded() {
				by_participation
			} else {
				staff
			}
		}
		TicketAction::Close => staff_decision(membership),
		TicketAction::Delete => Decision::deny(DecisionReason::AdminOnly),
	}
}

fn participant(is_submitter: bool, is_assigned: bool) -> Decision {
	if is_submitter {
		Decision::allow(DecisionReason::Submitter)
	} else if is_assigned {
		Decision::allow(DecisionReason::Assignee)
	} else {
		Decision::deny(DecisionReason::NoMembership)
	}
}

fn staff_decision(membership: Option<&ProjectMembership>) -> Decision {
	let Some(membership) = membership else {
		return Decision::deny(DecisionReason::NoMembership);
	};

	let matched = catalog::match_role(&membership.role, &RoleSet::project_staff());
	if matched.is_match() {
		Decision::allow(matched.reason())
	} else {
		Decision::deny(matched.reason())
	}
}
