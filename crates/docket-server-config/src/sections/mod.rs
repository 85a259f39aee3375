// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections for docket-server.

pub mod auth;
pub mod authz;
pub mod database;
pub mod http;
pub mod logging;

pub use auth::{AuthConfig, AuthConfigLayer};
pub use authz::{AuthzConfig, AuthzConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use http::{HttpConfig, HttpConfigLayer};
pub use logging::{LogFormat, LoggingConfig, LoggingConfigLayer};
