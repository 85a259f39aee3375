// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Project and membership entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{ProjectId, ProjectRole, StoredRole, UserId};

/// A loaded project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
	pub id: ProjectId,
	pub name: String,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Project {
	pub fn new(name: impl Into<String>) -> Self {
		let now = Utc::now();
		Self {
			id: ProjectId::generate(),
			name: name.into(),
			created_at: now,
			updated_at: now,
		}
	}
}

/// A user's participation in one project.
///
/// At most one membership exists per (project, user) pair. `is_owner` is
/// stored alongside the role and is read as-is; nothing in this crate keeps
/// the two in sync.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMembership {
	pub project_id: ProjectId,
	pub user_id: UserId,
	pub role: StoredRole,
	pub is_owner: bool,
	pub created_at: DateTime<Utc>,
}

impl ProjectMembership {
	pub fn new(project_id: ProjectId, user_id: UserId, role: impl Into<StoredRole>) -> Self {
		let role = role.into();
		Self {
			project_id,
			user_id,
			is_owner: role.known() == Some(ProjectRole::Owner),
			role,
			created_at: Utc::now(),
		}
	}

	/// The membership created for the user who creates a project.
	pub fn owner(project_id: ProjectId, user_id: UserId) -> Self {
		Self::new(project_id, user_id, ProjectRole::Owner)
	}

	pub fn known_role(&self) -> Option<ProjectRole> {
		self.role.known()
	}
}
