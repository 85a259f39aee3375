// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use axum::{
	body::Body,
	http::{Method, Request, StatusCode},
	response::Response,
	Router,
};
use docket_server_auth::{
	GlobalRole, Identity, Project, ProjectRole, Ticket, UserId,
};
use tempfile::TempDir;
use tower::ServiceExt;

use docket_server::{
	api::{create_app_state, create_router, AppState},
	auth_middleware::{GLOBAL_ROLE_HEADER, USER_ID_HEADER},
	ServerConfig,
};

#[derive(Clone, Copy)]
pub struct TestUser {
	pub identity: Identity,
}

impl TestUser {
	pub fn new(global_role: GlobalRole) -> Self {
		Self {
			identity: Identity::new(UserId::generate(), global_role),
		}
	}

	pub fn id(&self) -> UserId {
		self.identity.user_id
	}
}

/// Project A with one user per role, plus users with no membership.
#[derive(Clone)]
pub struct Fixtures {
	pub project: Project,
	pub owner: TestUser,
	pub manager: TestUser,
	pub developer: TestUser,
	/// `User` role; assignee of `ticket`.
	pub member: TestUser,
	/// `User` role; no relation to any ticket.
	pub viewer: TestUser,
	/// Legacy free-text role `Contributor`.
	pub contributor: TestUser,
	/// No membership anywhere.
	pub outsider: TestUser,
	/// No membership; submitter of `reporter_ticket`.
	pub reporter: TestUser,
	/// Global admin with no membership.
	pub admin: TestUser,
	/// Submitted by `developer`, assigned to `member`.
	pub ticket: Ticket,
	pub reporter_ticket: Ticket,
	/// A project none of the users above belong to.
	pub other_project: Project,
	pub other_ticket: Ticket,
}

pub struct TestApp {
	pub router: Router,
	pub fixtures: Fixtures,
	pub state: AppState,
	_temp_dir: TempDir,
}

impl TestApp {
	pub async fn new() -> Self {
		let temp_dir = tempfile::tempdir().unwrap();
		let db_path = temp_dir.path().join("test_authz.db");
		let db_url = format!("sqlite:{}?mode=rwc", db_path.display());

		let pool = docket_server::db::create_pool(&db_url).await.unwrap();
		docket_server::db::run_migrations(&pool).await.unwrap();

		let mut config = ServerConfig::default();
		config.auth.dev_mode = true;
		let state = create_app_state(pool, &config).unwrap();

		let fixtures = create_fixtures(&state).await;
		let router = create_router(state.clone());

		Self {
			router,
			fixtures,
			state,
			_temp_dir: temp_dir,
		}
	}

	pub async fn get(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self.request(Method::GET, path, user, None).await
	}

	pub async fn post(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: Option<serde_json::Value>,
	) -> Response<Body> {
		self.request(Method::POST, path, user, body).await
	}

	pub async fn patch(
		&self,
		path: &str,
		user: Option<&TestUser>,
		body: serde_json::Value,
	) -> Response<Body> {
		self.request(Method::PATCH, path, user, Some(body)).await
	}

	pub async fn delete(&self, path: &str, user: Option<&TestUser>) -> Response<Body> {
		self.request(Method::DELETE, path, user, None).await
	}

	pub async fn request(
		&self,
		method: Method,
		path: &str,
		user: Option<&TestUser>,
		body: Option<serde_json::Value>,
	) -> Response<Body> {
		let mut builder = Request::builder().method(method).uri(path);

		if let Some(test_user) = user {
			builder = builder
				.header(USER_ID_HEADER, test_user.identity.user_id.to_string())
				.header(GLOBAL_ROLE_HEADER, test_user.identity.global_role.as_str());
		}

		let request_body = match body {
			Some(b) => {
				builder = builder.header("content-type", "application/json");
				Body::from(serde_json::to_string(&b).unwrap())
			}
			None => Body::empty(),
		};

		let request = builder.body(request_body).unwrap();
		self.router.clone().oneshot(request).await.unwrap()
	}
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
	let body = axum::body::to_bytes(response.into_body(), usize::MAX)
		.await
		.unwrap();
	serde_json::from_slice(&body).unwrap()
}

pub struct AuthzCase {
	pub name: &'static str,
	pub method: Method,
	pub path: String,
	pub user: Option<TestUser>,
	pub body: Option<serde_json::Value>,
	pub expected_status: StatusCode,
}

pub async fn run_authz_cases(app: &TestApp, cases: &[AuthzCase]) {
	for case in cases {
		let response = app
			.request(
				case.method.clone(),
				&case.path,
				case.user.as_ref(),
				case.body.clone(),
			)
			.await;

		if response.status() != case.expected_status {
			// Read the response body for debugging
			let (parts, body) = response.into_parts();
			let body_bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
			let body_str = String::from_utf8_lossy(&body_bytes);
			panic!(
				"Case '{}': {} {} - expected {}, got {}\nResponse body: {}",
				case.name, case.method, case.path, case.expected_status, parts.status, body_str
			);
		}
	}
}

async fn create_fixtures(state: &AppState) -> Fixtures {
	let project = Project::new("Project A");
	state.project_repo.create_project(&project).await.unwrap();

	let owner = add_member(state, &project, ProjectRole::Owner).await;
	let manager = add_member(state, &project, ProjectRole::ProjectManager).await;
	let developer = add_member(state, &project, ProjectRole::Developer).await;
	let member = add_member(state, &project, ProjectRole::User).await;
	let viewer = add_member(state, &project, ProjectRole::User).await;

	let contributor = TestUser::new(GlobalRole::Developer);
	insert_raw_membership(state, &project, &contributor, "Contributor").await;

	let outsider = TestUser::new(GlobalRole::User);
	let reporter = TestUser::new(GlobalRole::User);
	let admin = TestUser::new(GlobalRole::Admin);

	let mut ticket = Ticket::new(project.id, developer.id(), "Login fails", "500 on submit");
	ticket.assigned_id = Some(member.id());
	state.ticket_repo.create_ticket(&ticket).await.unwrap();

	let reporter_ticket = Ticket::new(project.id, reporter.id(), "Typo on pricing page", "");
	state
		.ticket_repo
		.create_ticket(&reporter_ticket)
		.await
		.unwrap();

	let other_project = Project::new("Project B");
	state
		.project_repo
		.create_project(&other_project)
		.await
		.unwrap();
	let other_owner = add_member(state, &other_project, ProjectRole::Owner).await;
	let other_ticket = Ticket::new(other_project.id, other_owner.id(), "Other project", "");
	state.ticket_repo.create_ticket(&other_ticket).await.unwrap();

	Fixtures {
		project,
		owner,
		manager,
		developer,
		member,
		viewer,
		contributor,
		outsider,
		reporter,
		admin,
		ticket,
		reporter_ticket,
		other_project,
		other_ticket,
	}
}

/// Adds a member with a non-admin global role, so only the project role counts.
async fn add_member(state: &AppState, project: &Project, role: ProjectRole) -> TestUser {
	let user = TestUser::new(GlobalRole::User);
	state
		.membership_repo
		.add_member(&project.id, &user.id(), role)
		.await
		.unwrap();
	user
}

/// Writes a membership row with a role string outside the role vocabulary.
async fn insert_raw_membership(state: &AppState, project: &Project, user: &TestUser, role: &str) {
	sqlx::query(
		r#"
		INSERT INTO project_memberships (id, project_id, user_id, role, is_owner, created_at)
		VALUES (?, ?, ?, ?, 0, ?)
		"#,
	)
	.bind(uuid::Uuid::new_v4().to_string())
	.bind(project.id.to_string())
	.bind(user.id().to_string())
	.bind(role)
	.bind(chrono::Utc::now().to_rfc3339())
	.execute(&state.pool)
	.await
	.unwrap();
}
