// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain types and authorization for the Docket server.
//!
//! This crate provides:
//! - Type-safe identifiers and role enums ([`types`])
//! - Project, membership and ticket entities
//! - The resource-scoped authorization engine ([`authz`]): role catalog,
//!   membership lookup, project and ticket evaluators, named policies and the
//!   [`AuthorizationGate`] that handlers call
//!
//! Authentication is not handled here. Callers construct an [`Identity`] from
//! whatever verified the request and pass it into every evaluation.

pub mod authz;
pub mod error;
pub mod project;
pub mod ticket;
pub mod types;

pub use authz::{
	AccessRequest, AuthorizationGate, Decision, DecisionReason, Identity, InMemoryMembershipLookup,
	MembershipLookup, PolicyRegistry, ProjectAccessEvaluator, ProjectPolicy, ProjectResource,
	RoleSet, TicketAccessEvaluator, TicketAction, TicketResource,
};
pub use error::{AuthzError, LookupError, PolicyError};
pub use project::{Project, ProjectMembership};
pub use ticket::{Ticket, TicketStatus};
pub use types::{GlobalRole, ProjectId, ProjectRole, StoredRole, TicketId, UnknownRoleError, UserId};
