// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Ticket entity.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::authz::TicketResource;
use crate::types::{ProjectId, TicketId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TicketStatus {
	Open,
	Closed,
}

impl TicketStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			TicketStatus::Open => "open",
			TicketStatus::Closed => "closed",
		}
	}
}

impl fmt::Display for TicketStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for TicketStatus {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"open" => Ok(TicketStatus::Open),
			"closed" => Ok(TicketStatus::Closed),
			other => Err(format!("unknown ticket status: {other}")),
		}
	}
}

/// A loaded ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
	pub id: TicketId,
	pub project_id: ProjectId,
	pub title: String,
	pub description: String,
	pub status: TicketStatus,
	pub submitter_id: UserId,
	pub assigned_id: Option<UserId>,
	pub created_at: DateTime<Utc>,
	pub updated_at: DateTime<Utc>,
}

impl Ticket {
	pub fn new(
		project_id: ProjectId,
		submitter_id: UserId,
		title: impl Into<String>,
		description: impl Into<String>,
	) -> Self {
		let now = Utc::now();
		Self {
			id: TicketId::generate(),
			project_id,
			title: title.into(),
			description: description.into(),
			status: TicketStatus::Open,
			submitter_id,
			assigned_id: None,
			created_at: now,
			updated_at: now,
		}
	}

	pub fn is_closed(&self) -> bool {
		self.status == TicketStatus::Closed
	}
}

impl From<&Ticket> for TicketResource {
	fn from(ticket: &Ticket) -> Self {
		TicketResource::new(ticket.project_id, Some(ticket.submitter_id), ticket.assigned_id)
	}
}
