// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Error types for the authorization engine.
//!
//! A denied request is never an error. These types describe infrastructure
//! failures ([`LookupError`], [`AuthzError`]) and invalid policy definitions
//! ([`PolicyError`]), which are surfaced at startup.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The membership store could not answer a lookup.
#[derive(Debug, Error)]
#[error("membership lookup failed: {message}")]
pub struct LookupError {
	message: String,
	#[source]
	source: Option<BoxError>,
}

impl LookupError {
	pub fn new(message: impl Into<String>) -> Self {
		Self {
			message: message.into(),
			source: None,
		}
	}

	/// Wraps an underlying storage error, keeping it as the error source.
	pub fn with_source(
		message: impl Into<String>,
		source: impl std::error::Error + Send + Sync + 'static,
	) -> Self {
		Self {
			message: message.into(),
			source: Some(Box::new(source)),
		}
	}

	pub fn message(&self) -> &str {
		&self.message
	}
}

/// Errors raised while evaluating an access request.
#[derive(Debug, Error)]
pub enum AuthzError {
	#[error(transparent)]
	Lookup(#[from] LookupError),
}

impl AuthzError {
	/// All evaluation errors are infrastructure failures and map to a 5xx.
	pub fn is_internal(&self) -> bool {
		match self {
			AuthzError::Lookup(_) => true,
		}
	}
}

/// Errors raised while defining or resolving a named policy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PolicyError {
	#[error("unknown policy: {0}")]
	UnknownPolicy(String),

	#[error("policy '{0}' has an empty role set")]
	EmptyRoleSet(String),

	#[error("policy '{policy}' references unknown role '{role}'")]
	UnknownRole { policy: String, role: String },

	#[error("invalid policy name '{0}': use lowercase letters, digits and '-'")]
	InvalidName(String),
}

pub type Result<T> = std::result::Result<T, AuthzError>;
