// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource-scoped authorization.
//!
//! Decides, for a verified [`Identity`] and a project- or ticket-shaped
//! resource, whether an operation is permitted. Project access is governed by
//! named [`ProjectPolicy`] role sets; ticket access by a fixed per-action rule
//! table that also honors submitter and assignee status.
//!
//! # Example
//!
//! ```ignore
//! let gate = AuthorizationGate::new(lookup, PolicyRegistry::builtin());
//! let manage = gate.policy("owner-or-manager")?;
//! if gate.authorize_project(&identity, project_id, &manage).await?.succeeded() {
//!     // mutate
//! }
//! ```

pub mod catalog;
mod engine;
mod gate;
mod lookup;
pub mod policies;
pub mod registry;
mod types;

pub use catalog::{match_role, satisfies, RoleMatch};
pub use engine::{ProjectAccessEvaluator, TicketAccessEvaluator};
pub use gate::{AccessRequest, AuthorizationGate};
pub use lookup::{InMemoryMembershipLookup, MembershipLookup};
pub use registry::{PolicyRegistry, ProjectPolicy};
pub use types::{
	Decision, DecisionReason, Identity, ProjectResource, RoleSet, TicketAction, TicketResource,
};
