// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Authorization tests for project routes.
//!
//! Tests verify access control for project operations:
//! - Any recognized project role can view the project and its members
//! - Only owners and project managers can add members
//! - A project never gains a second owner
//! - A legacy free-text role grants no project access
//! - Global admins bypass membership entirely
//! - Malformed project ids are denied for members and not found for admins

use axum::http::{Method, StatusCode};
use docket_server_auth::{ProjectId, UserId};
use serde_json::json;

use super::support::{body_json, run_authz_cases, AuthzCase, TestApp};

// ============================================================================
// GET /api/projects/{project_id}
// ============================================================================

#[tokio::test]
async fn every_project_role_can_view_project() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}", f.project.id);

	let cases = [
		("owner", f.owner),
		("manager", f.manager),
		("developer", f.developer),
		("member", f.member),
		("admin", f.admin),
	]
	.map(|(name, user)| AuthzCase {
		name,
		method: Method::GET,
		path: path.clone(),
		user: Some(user),
		body: None,
		expected_status: StatusCode::OK,
	});
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn non_members_cannot_view_project() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}", f.project.id);

	let cases = [
		AuthzCase {
			name: "outsider_cannot_view_project",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.outsider),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "ticket_submitter_without_membership_cannot_view_project",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.reporter),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "legacy_contributor_role_cannot_view_project",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.contributor),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "member_of_other_project_is_denied",
			method: Method::GET,
			path: format!("/api/projects/{}", f.other_project.id),
			user: Some(f.owner),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "unauthenticated_cannot_view_project",
			method: Method::GET,
			path,
			user: None,
			body: None,
			expected_status: StatusCode::UNAUTHORIZED,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn forbidden_body_is_generic() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.get(&format!("/api/projects/{}", f.project.id), Some(&f.contributor))
		.await;
	assert_eq!(response.status(), StatusCode::FORBIDDEN);

	let json = body_json(response).await;
	assert_eq!(json["error"], "forbidden");
	assert_eq!(json["message"], "Insufficient permissions");
}

#[tokio::test]
async fn malformed_and_unknown_project_ids() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let unknown = ProjectId::generate();

	let cases = [
		AuthzCase {
			name: "member_with_malformed_id_is_denied",
			method: Method::GET,
			path: "/api/projects/not-a-uuid".to_string(),
			user: Some(f.developer),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
		AuthzCase {
			name: "admin_with_malformed_id_gets_not_found",
			method: Method::GET,
			path: "/api/projects/not-a-uuid".to_string(),
			user: Some(f.admin),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "admin_with_unknown_id_gets_not_found",
			method: Method::GET,
			path: format!("/api/projects/{unknown}"),
			user: Some(f.admin),
			body: None,
			expected_status: StatusCode::NOT_FOUND,
		},
		AuthzCase {
			name: "non_member_with_unknown_id_is_denied",
			method: Method::GET,
			path: format!("/api/projects/{unknown}"),
			user: Some(f.developer),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];
	run_authz_cases(&app, &cases).await;
}

// ============================================================================
// GET /api/projects/{project_id}/members
// ============================================================================

#[tokio::test]
async fn members_list_requires_project_role() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}/members", f.project.id);

	let cases = [
		AuthzCase {
			name: "viewer_can_list_members",
			method: Method::GET,
			path: path.clone(),
			user: Some(f.viewer),
			body: None,
			expected_status: StatusCode::OK,
		},
		AuthzCase {
			name: "outsider_cannot_list_members",
			method: Method::GET,
			path,
			user: Some(f.outsider),
			body: None,
			expected_status: StatusCode::FORBIDDEN,
		},
	];
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn members_list_preserves_legacy_roles() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.get(
			&format!("/api/projects/{}/members", f.project.id),
			Some(&f.owner),
		)
		.await;
	assert_eq!(response.status(), StatusCode::OK);

	let json = body_json(response).await;
	let members = json["members"].as_array().expect("members should be array");
	assert_eq!(members.len(), 6);

	let contributor_id = f.contributor.id().to_string();
	let contributor = members
		.iter()
		.find(|m| m["user_id"] == contributor_id.as_str())
		.expect("contributor should be listed");
	assert_eq!(contributor["role"], "Contributor");

	let owner_id = f.owner.id().to_string();
	let owner = members
		.iter()
		.find(|m| m["user_id"] == owner_id.as_str())
		.expect("owner should be listed");
	assert_eq!(owner["role"], "owner");
	assert_eq!(owner["is_owner"], true);
}

// ============================================================================
// POST /api/projects/{project_id}/members
// ============================================================================

fn add_member_body(role: &str) -> serde_json::Value {
	json!({ "user_id": UserId::generate(), "role": role })
}

#[tokio::test]
async fn owner_manager_and_admin_can_add_members() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}/members", f.project.id);

	let cases = [("owner", f.owner), ("manager", f.manager), ("admin", f.admin)].map(
		|(name, user)| AuthzCase {
			name,
			method: Method::POST,
			path: path.clone(),
			user: Some(user),
			body: Some(add_member_body("developer")),
			expected_status: StatusCode::CREATED,
		},
	);
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn other_roles_cannot_add_members() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}/members", f.project.id);

	let cases = [
		("developer", f.developer),
		("member", f.member),
		("contributor", f.contributor),
		("outsider", f.outsider),
	]
	.map(|(name, user)| AuthzCase {
		name,
		method: Method::POST,
		path: path.clone(),
		user: Some(user),
		body: Some(add_member_body("user")),
		expected_status: StatusCode::FORBIDDEN,
	});
	run_authz_cases(&app, &cases).await;
}

#[tokio::test]
async fn added_member_gains_access() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let newcomer = super::support::TestUser::new(docket_server_auth::GlobalRole::User);
	let project_path = format!("/api/projects/{}", f.project.id);

	let before = app.get(&project_path, Some(&newcomer)).await;
	assert_eq!(before.status(), StatusCode::FORBIDDEN);

	let response = app
		.post(
			&format!("{project_path}/members"),
			Some(&f.owner),
			Some(json!({ "user_id": newcomer.id(), "role": "developer" })),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CREATED);
	let json = body_json(response).await;
	assert_eq!(json["role"], "developer");
	assert_eq!(json["is_owner"], false);

	let after = app.get(&project_path, Some(&newcomer)).await;
	assert_eq!(after.status(), StatusCode::OK);
}

#[tokio::test]
async fn adding_existing_member_conflicts() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			&format!("/api/projects/{}/members", f.project.id),
			Some(&f.owner),
			Some(json!({ "user_id": f.developer.id(), "role": "user" })),
		)
		.await;
	assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn second_owner_cannot_be_added() {
	let app = TestApp::new().await;
	let f = &app.fixtures;
	let path = format!("/api/projects/{}/members", f.project.id);

	let cases = [("owner", f.owner), ("manager", f.manager), ("admin", f.admin)].map(
		|(name, user)| AuthzCase {
			name,
			method: Method::POST,
			path: path.clone(),
			user: Some(user),
			body: Some(add_member_body("owner")),
			expected_status: StatusCode::CONFLICT,
		},
	);
	run_authz_cases(&app, &cases).await;

	let response = app.get(&path, Some(&f.owner)).await;
	let json = body_json(response).await;
	let owners: Vec<_> = json["members"]
		.as_array()
		.unwrap()
		.iter()
		.filter(|m| m["is_owner"] == true)
		.collect();
	assert_eq!(owners.len(), 1);
	assert_eq!(owners[0]["user_id"], f.owner.id().to_string());
}

#[tokio::test]
async fn unknown_role_in_body_is_rejected() {
	let app = TestApp::new().await;
	let f = &app.fixtures;

	let response = app
		.post(
			&format!("/api/projects/{}/members", f.project.id),
			Some(&f.owner),
			Some(add_member_body("Contributor")),
		)
		.await;
	assert!(response.status().is_client_error());
	assert_ne!(response.status(), StatusCode::FORBIDDEN);
}
