// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP route handlers.
//!
//! Ticket handlers load the ticket before authorizing, so an unknown or
//! malformed ticket id is a 404. Project handlers authorize against the raw
//! path id first; the engine denies ids that do not parse.

pub mod health;
pub mod projects;
pub mod tickets;
