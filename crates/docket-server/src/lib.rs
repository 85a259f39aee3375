// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! Docket project and ticket server.
//!
//! This crate provides an HTTP server over the Docket authorization engine.
//! Every project and ticket route resolves the caller's [`Identity`], asks the
//! [`AuthorizationGate`](docket_server_auth::AuthorizationGate) for a decision
//! and only then touches the database.
//!
//! [`Identity`]: docket_server_auth::Identity

pub mod api;
pub mod auth_middleware;
pub mod authz_middleware;
pub mod db;
pub mod error;
pub mod routes;

pub use api::{create_app_state, create_router, AppState, RoutePolicies};
pub use auth_middleware::RequireIdentity;
pub use docket_server_config::ServerConfig;
pub use error::{ErrorResponse, ServerError};
