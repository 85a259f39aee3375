// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authentication configuration.
//!
//! Docket does not authenticate requests itself. `dev_mode` enables a
//! header-based identity for local development only.

use serde::Deserialize;

/// Authentication configuration (runtime, fully resolved).
#[derive(Debug, Clone)]
pub struct AuthConfig {
	pub dev_mode: bool,
	pub environment: String,
}

impl Default for AuthConfig {
	fn default() -> Self {
		Self {
			dev_mode: false,
			environment: "development".to_string(),
		}
	}
}

/// Authentication configuration layer (partial, for merging).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthConfigLayer {
	#[serde(default)]
	pub dev_mode: Option<bool>,
	#[serde(default)]
	pub environment: Option<String>,
}

impl AuthConfigLayer {
	pub fn merge(&mut self, other: AuthConfigLayer) {
		if other.dev_mode.is_some() {
			self.dev_mode = other.dev_mode;
		}
		if other.environment.is_some() {
			self.environment = other.environment;
		}
	}

	pub fn finalize(self) -> AuthConfig {
		AuthConfig {
			dev_mode: self.dev_mode.unwrap_or(false),
			environment: self
				.environment
				.unwrap_or_else(|| "development".to_string()),
		}
	}
}
