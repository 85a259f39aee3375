// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for ticket routes.
//!
//! The ticket matrix is not uniform:
//! - Read and Create: any membership, or submitter/assignee of the ticket
//! - Edit: Owner/ProjectManager/Developer, or submitter/assignee
//! - Close: Owner/ProjectManager/Developer only
//! - Delete: global admin only
//!
//! Tickets are loaded before authorizing, so unknown or malformed ticket ids
//! are 404 for everyone.

use axum::http::{Method, StatusCode};
use docket_server_auth::{ProjectId, TicketId};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp, TestUser};

fn cases_for(
	method: Method,
	path: &str,
	body: Option<serde_json::Value>,
	users: &[(&'static str, TestUser, StatusCode)],
) -> Vec<AuthzCase> {
	users
		.iter()
		.map(|(name, user, expected_status)| AuthzCase {
			name: *name,
			method: method.clone(),
			path: path.to_string(),
			user: Some(*user),
			body: body.clone(),
			expected_status: *expected_status,
		})
		.collect()
}

// ============================================================================
// GET /api/tickets/{ticket_id}
// ============================================================================

#[tokio::test]
async fn read_ticket_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);

	let cases = cases_for(
		Method::GET,
		&path,
		None,
		&[
			("submitter_developer_can_read", f.developer, StatusCode::OK),
			("assignee_can_read", f.member, StatusCode::OK),
			("owner_can_read", f.owner, StatusCode::OK),
			("manager_can_read", f.manager, StatusCode::OK),
			("uninvolved_user_role_can_read", f.viewer, StatusCode::OK),
			("legacy_contributor_membership_can_read", f.contributor, StatusCode::OK),
			("admin_can_read", f.admin, StatusCode::OK),
			("outsider_cannot_read", f.outsider, StatusCode::FORBIDDEN),
		],
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn non_member_submitter_can_read_own_ticket_only() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = [
		AuthzCase {
			name: "reporter_can_read_own_ticket",
			method: Method::GET,
			path: format!("/api/tickets/{}", f.reporter_ticket.id),
			user: Some(f.reporter),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "reporter_cannot_read_other_ticket",
			method: Method::GET,
			path: format!("/api/tickets/{}", f.ticket.id),
			user: Some(f.reporter),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "member_of_other_project_cannot_read",
			method: Method::GET,
			path: format!("/api/tickets/{}", f.other_ticket.id),
			user: Some(f.developer),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unauthenticated_cannot_read",
			method: Method::GET,
			path: format!("/api/tickets/{}", f.ticket.id),
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn unknown_and_malformed_ticket_ids_are_not_found() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = [
		AuthzCase {
			name: "malformed_ticket_id",
			method: Method::GET,
			path: "/api/tickets/not-a-uuid".to_string(),
			user: Some(f.owner),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "unknown_ticket_id",
			method: Method::GET,
			path: format!("/api/tickets/{}", TicketId::generate()),
			user: Some(f.admin),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// POST /api/projects/{project_id}/tickets
// ============================================================================

#[tokio::test]
async fn create_ticket_requires_membership() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}/tickets", f.project.id);
	let body = json!({ "title": "Search is slow", "description": "p95 over 2s" });

	let cases = cases_for(
		Method::POST,
		&path,
		Some(body),
		&[
			("developer_can_create", f.developer, StatusCode::CREATED),
			("user_role_can_create", f.viewer, StatusCode::CREATED),
			("legacy_contributor_can_create", f.contributor, StatusCode::CREATED),
			("admin_can_create", f.admin, StatusCode::CREATED),
			("outsider_cannot_create", f.outsider, StatusCode::FORBIDDEN),
			(
				"prior_submitter_without_membership_cannot_create",
				f.reporter,
				StatusCode::FORBIDDEN,
			),
		],
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn created_ticket_is_submitted_by_caller() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			&format!("/api/projects/{}/tickets", f.project.id),
			Some(&f.viewer),
			Some(json!({ "title": "  Export button missing  " })),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);

	let json = body_json(response).await;
	assert_eq!(json["submitter_id"], f.viewer.id().to_string().as_str());
	assert_eq!(json["title"], "Export button missing");
	assert_eq!(json["status"], "open");
	assert!(json["assigned_id"].is_null());
}

#[tokio::test]
async fn create_ticket_validation_and_missing_project() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let cases = [
		AuthzCase {
			name: "blank_title_is_bad_request",
			method: Method::POST,
			path: format!("/api/projects/{}/tickets", f.project.id),
			user: Some(f.developer),
			body: Some(json!({ "title": "   " })),
			expected_status: StatusCode::BAD_REQUEST,
		},
		AuthzCase {
			name: "outsider_gets_forbidden_before_validation",
			method: Method::POST,
			path: format!("/api/projects/{}/tickets", f.project.id),
			user: Some(f.outsider),
			body: Some(json!({ "title": "   " })),
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unknown_project_is_not_found",
			method: Method::POST,
			path: format!("/api/projects/{}/tickets", ProjectId::generate()),
			user: Some(f.admin),
			body: Some(json!({ "title": "Lost" })),
			expected_status: StatusCode::NOT_FOUND,
		},
	];
	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// PATCH /api/tickets/{ticket_id}
// ============================================================================

#[tokio::test]
async fn edit_ticket_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);
	let body = json!({ "description": "Reproduced on staging" });

	let cases = cases_for(
		Method::PATCH,
		&path,
		Some(body),
		&[
			("submitter_can_edit", f.developer, StatusCode::OK),
			("user_role_assignee_can_edit", f.member, StatusCode::OK),
			("owner_can_edit", f.owner, StatusCode::OK),
			("manager_can_edit", f.manager, StatusCode::OK),
			("admin_can_edit", f.admin, StatusCode::OK),
			("uninvolved_user_role_cannot_edit", f.viewer, StatusCode::FORBIDDEN),
			("legacy_contributor_cannot_edit", f.contributor, StatusCode::FORBIDDEN),
			("outsider_cannot_edit", f.outsider, StatusCode::FORBIDDEN),
		],
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn non_member_submitter_can_edit_but_not_close() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.reporter_ticket.id);

	let cases = [
		AuthzCase {
			name: "reporter_can_edit_own_ticket",
			method: Method::PATCH,
			path: path.clone(),
			user: Some(f.reporter),
			body: Some(json!({ "title": "Typo on the pricing page" })),
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "reporter_cannot_close_own_ticket",
			method: Method::POST,
			path: format!("{path}/close"),
			user: Some(f.reporter),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn edit_persists_changes() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);

	let response = app
		.patch(
			&path,
			Some(&f.developer),
			json!({ "title": "Login fails on Safari", "assigned_id": f.viewer.id() }),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(app.get(&path, Some(&f.owner)).await).await;
	assert_eq!(json["title"], "Login fails on Safari");
	assert_eq!(json["description"], "500 on submit");
	assert_eq!(json["assigned_id"], f.viewer.id().to_string().as_str());
}

#[tokio::test]
async fn reassignment_moves_edit_right() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);

	let response = app
		.patch(&path, Some(&f.owner), json!({ "assigned_id": f.viewer.id() }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let cases = cases_for(
		Method::PATCH,
		&path,
		Some(json!({ "description": "updated" })),
		&[
			("new_assignee_can_edit", f.viewer, StatusCode::OK),
			("previous_assignee_cannot_edit", f.member, StatusCode::FORBIDDEN),
		],
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn null_assignee_unassigns_and_revokes_edit() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);

	let response = app
		.patch(&path, Some(&f.owner), json!({ "assigned_id": null }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert!(json["assigned_id"].is_null());

	let response = app
		.patch(&path, Some(&f.member), json!({ "description": "still mine?" }))
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn omitted_assignee_is_left_unchanged() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);

	let response = app
		.patch(&path, Some(&f.owner), json!({ "title": "Renamed" }))
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["assigned_id"], f.member.id().to_string());
}

// ============================================================================
// POST /api/tickets/{ticket_id}/close
// ============================================================================

#[tokio::test]
async fn close_ticket_matrix() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}/close", f.ticket.id);

	let cases = cases_for(
		Method::POST,
		&path,
		None,
		&[
			("user_role_assignee_cannot_close", f.member, StatusCode::FORBIDDEN),
			("uninvolved_user_role_cannot_close", f.viewer, StatusCode::FORBIDDEN),
			("legacy_contributor_cannot_close", f.contributor, StatusCode::FORBIDDEN),
			("outsider_cannot_close", f.outsider, StatusCode::FORBIDDEN),
			("developer_submitter_can_close", f.developer, StatusCode::OK),
			("manager_can_close", f.manager, StatusCode::OK),
			("owner_can_close", f.owner, StatusCode::OK),
			("admin_can_close", f.admin, StatusCode::OK),
		],
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn close_marks_ticket_closed() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			&format!("/api/tickets/{}/close", f.ticket.id),
			Some(&f.developer),
			None,
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);
	let json = body_json(response).await;
	assert_eq!(json["status"], "closed");
}

// ============================================================================
// DELETE /api/tickets/{ticket_id}
// ============================================================================

#[tokio::test]
async fn only_admin_can_delete() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/tickets/{}", f.ticket.id);

	let cases = cases_for(
		Method::DELETE,
		&path,
		None,
		&[
			("owner_cannot_delete", f.owner, StatusCode::FORBIDDEN),
			("manager_cannot_delete", f.manager, StatusCode::FORBIDDEN),
			("submitter_cannot_delete", f.developer, StatusCode::FORBIDDEN),
			("assignee_cannot_delete", f.member, StatusCode::FORBIDDEN),
			("outsider_cannot_delete", f.outsider, StatusCode::FORBIDDEN),
			("admin_can_delete", f.admin, StatusCode::NO_CONTENT),
			("deleted_ticket_is_not_found", f.admin, StatusCode::NOT_FOUND),
		],
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn reporter_cannot_delete_own_ticket() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.delete(
			&format!("/api/tickets/{}", f.reporter_ticket.id),
			Some(&f.reporter),
		)
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let still_there = app
		.get(
			&format!("/api/tickets/{}", f.reporter_ticket.id),
			Some(&f.reporter),
		)
		.await;
	assert_eq!(still_there.status(), StatusCode::OK);
}
