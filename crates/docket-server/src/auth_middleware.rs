// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Identity extraction for Axum.
//!
//! Docket does not authenticate requests itself. An upstream layer verifies
//! the caller and inserts an [`Identity`] into the request extensions; handlers
//! read it back with [`RequireIdentity`].
//!
//! # Dev Mode
//!
//! When `DOCKET_SERVER_AUTH_DEV_MODE=1`, [`dev_identity_layer`] builds the
//! identity from two headers:
//!
//! - `x-docket-user-id`: the caller's user id (UUID)
//! - `x-docket-global-role`: `admin`, `project_manager`, `developer` or `user`
//!   (defaults to `user`)
//!
//! Anyone can set these headers. Dev mode MUST NOT be enabled in production;
//! configuration loading refuses the combination.
//!
//! # Usage
//!
//! ```ignore
//! async fn protected_handler(RequireIdentity(identity): RequireIdentity) -> impl IntoResponse {
//!     format!("Hello, {}!", identity.user_id)
//! }
//! ```

use axum::{
	body::Body,
	extract::{FromRequestParts, State},
	http::{request::Parts, HeaderMap, Request, StatusCode},
	middleware::Next,
	response::{IntoResponse, Response},
	Json,
};
use docket_server_auth::{GlobalRole, Identity, UserId};
use tracing::instrument;

use crate::{api::AppState, error::ErrorResponse};

pub const USER_ID_HEADER: &str = "x-docket-user-id";
pub const GLOBAL_ROLE_HEADER: &str = "x-docket-global-role";

/// Builds an identity from the dev-mode headers.
///
/// Returns `None` when the user id header is missing or malformed, or when the
/// role header names an unknown role.
pub fn identity_from_headers(headers: &HeaderMap) -> Option<Identity> {
	let user_id = headers
		.get(USER_ID_HEADER)?
		.to_str()
		.ok()?
		.parse::<UserId>()
		.ok()?;

	let global_role = match headers.get(GLOBAL_ROLE_HEADER) {
		Some(value) => value.to_str().ok()?.parse::<GlobalRole>().ok()?,
		None => GlobalRole::User,
	};

	Some(Identity::new(user_id, global_role))
}

/// Inserts a header-derived [`Identity`] when dev mode is on.
///
/// An identity already present in the extensions is left untouched.
pub async fn dev_identity_layer(
	State(state): State<AppState>,
	mut request: Request<Body>,
	next: Next,
) -> Response {
	if state.auth_config.dev_mode && request.extensions().get::<Identity>().is_none() {
		match identity_from_headers(request.headers()) {
			Some(identity) => {
				tracing::debug!(
					user_id = %identity.user_id,
					global_role = %identity.global_role,
					"dev mode identity"
				);
				request.extensions_mut().insert(identity);
			}
			None if request.headers().contains_key(USER_ID_HEADER) => {
				tracing::debug!("ignoring malformed dev identity headers");
			}
			None => {}
		}
	}

	next.run(request).await
}

/// Extractor that requires an identity.
///
/// Returns 401 Unauthorized if no identity was placed on the request.
pub struct RequireIdentity(pub Identity);

impl<S> FromRequestParts<S> for RequireIdentity
where
	S: Send + Sync,
{
	type Rejection = Response;

	#[instrument(name = "RequireIdentity::from_request_parts", skip_all)]
	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		match parts.extensions.get::<Identity>().copied() {
			Some(identity) => {
				tracing::debug!(user_id = %identity.user_id, "identity present");
				Ok(RequireIdentity(identity))
			}
			None => {
				tracing::debug!("Authentication required: no identity on request");
				let response = (
					StatusCode::UNAUTHORIZED,
					Json(ErrorResponse::new(
						"unauthorized",
						"Authentication required",
					)),
				);
				Err(response.into_response())
			}
		}
	}
}
