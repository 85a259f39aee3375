// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Membership lookup: the engine's only read path into persisted state.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::error::LookupError;
use crate::project::ProjectMembership;
use crate::types::{ProjectId, UserId};

/// Reads the membership of a user in a project.
///
/// Absence is `Ok(None)`. Implementations must not cache; every call reflects
/// the store at the time of the call.
#[async_trait]
pub trait MembershipLookup: Send + Sync {
	async fn find(
		&self,
		project_id: ProjectId,
		user_id: UserId,
	) -> Result<Option<ProjectMembership>, LookupError>;
}

/// A membership lookup backed by a map, for embedders and tests.
#[derive(Debug, Default)]
pub struct InMemoryMembershipLookup {
	memberships: RwLock<HashMap<(ProjectId, UserId), ProjectMembership>>,
}

impl InMemoryMembershipLookup {
	pub fn new() -> Self {
		Self::default()
	}

	/// Inserts or replaces the membership for its (project, user) pair.
	pub async fn insert(&self, membership: ProjectMembership) {
		self
			.memberships
			.write()
			.await
			.insert((membership.project_id, membership.user_id), membership);
	}

	pub async fn remove(&self, project_id: ProjectId, user_id: UserId) -> Option<ProjectMembership> {
		self.memberships.write().await.remove(&(project_id, user_id))
	}
}

#[async_trait]
impl MembershipLookup for InMemoryMembershipLookup {
	async fn find(
		&self,
		project_id: ProjectId,
		user_id: UserId,
	) -> Result<Option<ProjectMembership>, LookupError> {
		Ok(self.memberships.read().await.get(&(project_id, user_id)).cloned())
	}
}
