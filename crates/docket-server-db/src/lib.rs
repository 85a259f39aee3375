// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! # docket-server-db
//!
//! Persistence layer for the Docket server using SQLite via sqlx.
//!
//! ## Repository Pattern
//!
//! Each domain has two components:
//! - **`*Store` trait**: Defines the interface (e.g., `ProjectStore`, `TicketStore`)
//! - **`*Repository` struct**: Concrete implementation holding a `SqlitePool`
//!
//! [`MembershipRepository`] additionally implements
//! [`docket_server_auth::MembershipLookup`], which is how the authorization
//! engine reads roles.
//!
//! ## Error Handling
//!
//! | Variant | When to use |
//! |---------|-------------|
//! | `NotFound` | Resource must exist but doesn't (update by ID) |
//! | `Conflict` | Unique constraint violation |
//! | `Sqlx` | Let sqlx errors propagate via `?` for unexpected database errors |
//! | `Internal` | Invalid stored data (e.g., unparseable UUID or timestamp) |
//!
//! Lookups where absence is normal return `Result<Option<T>>`.
//!
//! ## Testing
//!
//! Tests use in-memory SQLite with manually created schemas from the
//! `testing` module. Schema changes must also land in
//! `docket-server/migrations/NNN_*.sql`.

mod error;
pub mod membership;
pub mod pool;
pub mod project;
pub mod ticket;

#[cfg(test)]
pub mod testing;

pub use error::{DbError, Result};
pub use membership::{MembershipRepository, MembershipStore};
pub use pool::create_pool;
pub use project::{ProjectRepository, ProjectStore};
pub use ticket::{TicketRepository, TicketStore};
