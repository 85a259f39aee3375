// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Named project policies.
//!
//! Routes name the policy they require (`"owner-or-manager"`) and resolve it
//! once at startup. Definitions are validated when they enter the registry, so
//! a resolved [`ProjectPolicy`] always carries a non-empty role set.

use std::collections::BTreeMap;
use std::fmt;

use super::types::RoleSet;
use crate::error::PolicyError;
use crate::types::ProjectRole;

pub const OWNER: &str = "owner";
pub const OWNER_OR_MANAGER: &str = "owner-or-manager";
pub const PROJECT_STAFF: &str = "project-staff";
pub const ANY_PROJECT_ROLE: &str = "any-project-role";

/// A named, validated set of acceptable project roles.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPolicy {
	name: String,
	roles: RoleSet,
}

impl ProjectPolicy {
	pub fn new(name: impl Into<String>, roles: RoleSet) -> Result<Self, PolicyError> {
		let name = name.into();
		validate_name(&name)?;
		if roles.is_empty() {
			return Err(PolicyError::EmptyRoleSet(name));
		}
		Ok(Self { name, roles })
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn roles(&self) -> &RoleSet {
		&self.roles
	}
}

impl fmt::Display for ProjectPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}={}", self.name, self.roles)
	}
}

/// Policy names are lowercase ASCII letters, digits and `-`, and cannot start
/// or end with `-`.
pub fn validate_name(name: &str) -> Result<(), PolicyError> {
	let valid_chars = name
		.chars()
		.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-');
	if name.is_empty() || !valid_chars || name.starts_with('-') || name.ends_with('-') {
		return Err(PolicyError::InvalidName(name.to_string()));
	}
	Ok(())
}

#[derive(Debug, Clone)]
pub struct PolicyRegistry {
	policies: BTreeMap<String, ProjectPolicy>,
}

impl PolicyRegistry {
	/// A registry holding only the built-in policies.
	pub fn builtin() -> Self {
		let builtin = [
			(OWNER, RoleSet::from(ProjectRole::Owner)),
			(
				OWNER_OR_MANAGER,
				RoleSet::from(ProjectRole::Owner).with(ProjectRole::ProjectManager),
			),
			(PROJECT_STAFF, RoleSet::project_staff()),
			(ANY_PROJECT_ROLE, RoleSet::all()),
		];

		let policies = builtin
			.into_iter()
			.map(|(name, roles)| {
				(
					name.to_string(),
					ProjectPolicy {
						name: name.to_string(),
						roles,
					},
				)
			})
			.collect();

		Self { policies }
	}

	/// Adds a policy, replacing any existing policy with the same name.
	pub fn define(&mut self, name: &str, roles: RoleSet) -> Result<(), PolicyError> {
		let policy = ProjectPolicy::new(name, roles)?;
		if self.policies.contains_key(name) {
			tracing::info!(policy = %policy, "overriding policy");
		} else {
			tracing::debug!(policy = %policy, "defining policy");
		}
		self.policies.insert(policy.name.clone(), policy);
		Ok(())
	}

	/// Adds a policy from role strings as they appear in configuration.
	///
	/// Role strings must match the persisted role names exactly.
	pub fn define_from_strings<S: AsRef<str>>(
		&mut self,
		name: &str,
		roles: &[S],
	) -> Result<(), PolicyError> {
		let mut set = RoleSet::new();
		for role in roles {
			let role = role.as_ref();
			let parsed = role
				.parse::<ProjectRole>()
				.map_err(|_| PolicyError::UnknownRole {
					policy: name.to_string(),
					role: role.to_string(),
				})?;
			set.insert(parsed);
		}
		self.define(name, set)
	}

	/// Builds a registry from the built-ins plus configured definitions.
	pub fn with_overrides<'a, I, S>(overrides: I) -> Result<Self, PolicyError>
	where
		I: IntoIterator<Item = (&'a String, &'a Vec<S>)>,
		S: AsRef<str> + 'a,
	{
		let mut registry = Self::builtin();
		for (name, roles) in overrides {
			registry.define_from_strings(name, roles)?;
		}
		Ok(registry)
	}

	pub fn get(&self, name: &str) -> Result<ProjectPolicy, PolicyError> {
		self
			.policies
			.get(name)
			.cloned()
			.ok_or_else(|| PolicyError::UnknownPolicy(name.to_string()))
	}

	pub fn names(&self) -> impl Iterator<Item = &str> {
		self.policies.keys().map(String::as_str)
	}
}

impl Default for PolicyRegistry {
	fn default() -> Self {
		Self::builtin()
	}
}
