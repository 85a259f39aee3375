// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization policy configuration.
//!
//! Adds or overrides named project policies on top of the built-ins:
//!
//! ```toml
//! [authz.policies]
//! triage = ["project_manager", "developer"]
//! owner = ["owner"]
//! ```
//!
//! The environment form is `DOCKET_SERVER_AUTHZ_POLICIES="triage=project_manager|developer;owner=owner"`.
//!
//! Only the shape is checked here. Role names are checked against the role
//! vocabulary when the server builds its policy registry.

use serde::Deserialize;
use std::collections::BTreeMap;

use crate::error::ConfigError;

/// Authorization configuration (runtime, fully resolved).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthzConfig {
	pub policies: BTreeMap<String, Vec<String>>,
}

/// Authorization configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthzConfigLayer {
	#[serde(default)]
	pub policies: Option<BTreeMap<String, Vec<String>>>,
}

impl AuthzConfigLayer {
	/// Policies merge by name; a later layer replaces a policy's role list.
	pub fn merge(&mut self, other: AuthzConfigLayer) {
		match (self.policies.as_mut(), other.policies) {
			(Some(mine), Some(theirs)) => mine.extend(theirs),
			(None, Some(theirs)) => self.policies = Some(theirs),
			_ => {}
		}
	}

	pub fn finalize(self) -> Result<AuthzConfig, ConfigError> {
		let policies = self.policies.unwrap_or_default();
		// Name grammar and role vocabulary are checked when the policy registry
		// is built.
		for (name, roles) in &policies {
			if name.trim().is_empty() {
				return Err(ConfigError::Policy("policy with a blank name".to_string()));
			}
			if roles.is_empty() {
				return Err(ConfigError::Policy(format!(
					"policy '{name}' has an empty role list"
				)));
			}
			if let Some(blank) = roles.iter().find(|r| r.trim().is_empty()) {
				return Err(ConfigError::Policy(format!(
					"policy '{name}' has a blank role '{blank}'"
				)));
			}
		}
		Ok(AuthzConfig { policies })
	}
}

/// Parses `name=role|role;name=role`.
pub fn parse_policy_list(key: &str, value: &str) -> Result<BTreeMap<String, Vec<String>>, ConfigError> {
	let mut policies = BTreeMap::new();
	for entry in value.split(';').map(str::trim).filter(|e| !e.is_empty()) {
		let Some((name, roles)) = entry.split_once('=') else {
			return Err(ConfigError::InvalidValue {
				key: key.to_string(),
				message: format!("expected 'name=role|role', got '{entry}'"),
			});
		};
		let roles = roles
			.split('|')
			.map(str::trim)
			.filter(|r| !r.is_empty())
			.map(str::to_string)
			.collect();
		policies.insert(name.trim().to_string(), roles);
	}
	Ok(policies)
}
