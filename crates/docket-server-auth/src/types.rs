// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for Docket's domain and authorization layer.
//!
//! This module defines the foundational types used throughout the engine:
//!
//! - **ID newtypes**: Type-safe wrappers around UUIDs ([`UserId`], [`ProjectId`],
//!   [`TicketId`]) preventing accidental mixing
//! - **Global roles**: Account-wide roles ([`GlobalRole`]) independent of any project
//! - **Project roles**: Roles scoped to one project via membership ([`ProjectRole`])
//! - **Stored roles**: The role value exactly as persisted ([`StoredRole`]), which may
//!   carry legacy strings outside the project role vocabulary
//!
//! All ID types implement transparent serde serialization (as UUID strings) and
//! provide conversion to/from [`uuid::Uuid`].

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

// =============================================================================
// ID Newtypes
// =============================================================================

macro_rules! define_id_type {
	($name:ident, $doc:expr) => {
		#[doc = $doc]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
		#[serde(transparent)]
		pub struct $name(Uuid);

		impl $name {
			/// Create a new ID from a UUID.
			pub fn new(id: Uuid) -> Self {
				Self(id)
			}

			/// Generate a new random ID.
			pub fn generate() -> Self {
				Self(Uuid::new_v4())
			}

			/// Get the inner UUID value.
			pub fn into_inner(self) -> Uuid {
				self.0
			}

			/// Get a reference to the inner UUID.
			pub fn as_uuid(&self) -> &Uuid {
				&self.0
			}
		}

		impl fmt::Display for $name {
			fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
				write!(f, "{}", self.0)
			}
		}

		impl FromStr for $name {
			type Err = uuid::Error;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				Uuid::parse_str(s).map(Self)
			}
		}

		impl From<Uuid> for $name {
			fn from(id: Uuid) -> Self {
				Self(id)
			}
		}

		impl From<$name> for Uuid {
			fn from(id: $name) -> Self {
				id.0
			}
		}
	};
}

define_id_type!(UserId, "Unique identifier for a user.");
define_id_type!(ProjectId, "Unique identifier for a project.");
define_id_type!(TicketId, "Unique identifier for a ticket.");

// =============================================================================
// Global Roles
// =============================================================================

/// Account-wide role carried by a verified identity.
///
/// Only [`GlobalRole::Admin`] changes authorization outcomes: it bypasses every
/// project and ticket check. The remaining variants mirror the project role names
/// but grant nothing on their own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GlobalRole {
	/// Full access to every project and ticket.
	Admin,
	ProjectManager,
	Developer,
	User,
}

impl GlobalRole {
	/// Returns all available global roles.
	pub fn all() -> &'static [GlobalRole] {
		&[
			GlobalRole::Admin,
			GlobalRole::ProjectManager,
			GlobalRole::Developer,
			GlobalRole::User,
		]
	}

	pub fn as_str(&self) -> &'static str {
		match self {
			GlobalRole::Admin => "admin",
			GlobalRole::ProjectManager => "project_manager",
			GlobalRole::Developer => "developer",
			GlobalRole::User => "user",
		}
	}
}

impl fmt::Display for GlobalRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for GlobalRole {
	type Err = UnknownRoleError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		GlobalRole::all()
			.iter()
			.copied()
			.find(|role| role.as_str() == s)
			.ok_or_else(|| UnknownRoleError(s.to_string()))
	}
}

// =============================================================================
// Project Roles
// =============================================================================

/// Roles within a project, granted through a membership row.
///
/// Roles do not form a hierarchy. The derived `Ord` exists only so roles can be
/// kept in ordered sets; the single relation between two different roles lives in
/// [`crate::authz::catalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectRole {
	/// Created or was handed the project.
	Owner,
	/// Manages participants and ticket flow.
	ProjectManager,
	/// Works tickets.
	Developer,
	/// Participant with read access and ticket submission.
	User,
}

impl ProjectRole {
	/// Returns all available project roles.
	pub fn all() -> &'static [ProjectRole] {
		&[
			ProjectRole::Owner,
			ProjectRole::ProjectManager,
			ProjectRole::Developer,
			ProjectRole::User,
		]
	}

	/// The exact string persisted for this role.
	pub fn as_str(&self) -> &'static str {
		match self {
			ProjectRole::Owner => "owner",
			ProjectRole::ProjectManager => "project_manager",
			ProjectRole::Developer => "developer",
			ProjectRole::User => "user",
		}
	}
}

impl fmt::Display for ProjectRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for ProjectRole {
	type Err = UnknownRoleError;

	/// Parses by exact string identity. `"Owner"`, `" owner"` and `"own"` are all
	/// rejected.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		ProjectRole::all()
			.iter()
			.copied()
			.find(|role| role.as_str() == s)
			.ok_or_else(|| UnknownRoleError(s.to_string()))
	}
}

/// A role string that is not part of the role vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRoleError(pub String);

// =============================================================================
// Stored Roles
// =============================================================================

/// A membership role exactly as read from storage.
///
/// Legacy rows may hold free-text values such as `"Contributor"`. Those are kept
/// verbatim as [`StoredRole::Unrecognized`] and never satisfy any role requirement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StoredRole {
	Known(ProjectRole),
	Unrecognized(String),
}

impl StoredRole {
	/// Classifies a persisted role string.
	pub fn from_stored(value: &str) -> Self {
		match value.parse::<ProjectRole>() {
			Ok(role) => StoredRole::Known(role),
			Err(_) => StoredRole::Unrecognized(value.to_string()),
		}
	}

	/// The recognized project role, if any.
	pub fn known(&self) -> Option<ProjectRole> {
		match self {
			StoredRole::Known(role) => Some(*role),
			StoredRole::Unrecognized(_) => None,
		}
	}

	/// The string to persist for this role.
	pub fn as_str(&self) -> &str {
		match self {
			StoredRole::Known(role) => role.as_str(),
			StoredRole::Unrecognized(raw) => raw,
		}
	}
}

impl From<ProjectRole> for StoredRole {
	fn from(role: ProjectRole) -> Self {
		StoredRole::Known(role)
	}
}

impl From<String> for StoredRole {
	fn from(value: String) -> Self {
		match value.parse::<ProjectRole>() {
			Ok(role) => StoredRole::Known(role),
			Err(_) => StoredRole::Unrecognized(value),
		}
	}
}

impl From<StoredRole> for String {
	fn from(role: StoredRole) -> Self {
		match role {
			StoredRole::Known(role) => role.as_str().to_string(),
			StoredRole::Unrecognized(raw) => raw,
		}
	}
}

impl fmt::Display for StoredRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
