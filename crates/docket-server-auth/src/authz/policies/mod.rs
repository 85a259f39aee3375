// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Resource-specific policy modules.
//!
//! Each policy is a pure function over a preloaded membership. The global
//! admin bypass has already been applied by the time a policy runs.

pub mod project;
pub mod ticket;
