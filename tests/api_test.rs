//! Integration tests for API endpoints.
//!
//! The router is driven with `oneshot` against hand-written fake services,
//! so no database is needed. Tokens are issued by the real `TokenCodec`.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use axum::Router;
use chrono::Utc;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use learning_portal::api::{create_router, AppState};
use learning_portal::config::Config;
use learning_portal::domain::{
    validate_rating, Assignment, AssignmentIssue, AssignmentOutcome, CourseRating,
    CourseRatingSummary, CourseRequest, Decision, EnrolledCourse, NewCourseRequest,
    RateableCourse, RatingUpsert, RequestOverview, RequestStatus, User, UserRole,
};
use learning_portal::errors::{AppError, AppResult};
use learning_portal::services::{
    AssessmentService, AssignmentService, AuthService, CourseService, RatingService,
    ReportService, RequestService, ServiceContainer, UploadService, UserService,
};

const TEST_SECRET: &str = "test-secret-key-for-testing-only-32chars";

// =============================================================================
// Fake Services
// =============================================================================

/// In-memory course requests
#[derive(Default)]
struct FakeRequests {
    requests: Mutex<Vec<CourseRequest>>,
}

#[async_trait]
impl RequestService for FakeRequests {
    async fn submit(&self, manager_id: Uuid, request: NewCourseRequest) -> AppResult<CourseRequest> {
        let created = CourseRequest {
            id: Uuid::new_v4(),
            title: request.title,
            description: request.description,
            concept: request.concept,
            duration: request.duration,
            status: RequestStatus::Pending,
            manager_id,
            created_at: Utc::now(),
        };
        self.requests.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn list_all(&self) -> AppResult<Vec<RequestOverview>> {
        let requests = self.requests.lock().unwrap().clone();
        Ok(requests
            .into_iter()
            .map(|r| RequestOverview::new(r, None, None))
            .collect())
    }

    async fn get(&self, id: Uuid) -> AppResult<RequestOverview> {
        let request = self
            .requests
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Course request"))?;
        Ok(RequestOverview::new(request, None, None))
    }

    async fn decide(&self, id: Uuid, decision: Decision) -> AppResult<CourseRequest> {
        let mut requests = self.requests.lock().unwrap();
        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::not_found("Course request"))?;
        request.status = request.decide(decision)?;
        Ok(request.clone())
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut requests = self.requests.lock().unwrap();
        let before = requests.len();
        requests.retain(|r| r.id != id);
        if requests.len() == before {
            return Err(AppError::not_found("Course request"));
        }
        Ok(())
    }

    async fn list_for_manager(&self, manager_id: Uuid) -> AppResult<Vec<RequestOverview>> {
        let requests = self.requests.lock().unwrap().clone();
        Ok(requests
            .into_iter()
            .filter(|r| r.manager_id == manager_id)
            .map(|r| RequestOverview::new(r, None, None))
            .collect())
    }
}

/// In-memory ratings with the same upsert rule as the real service
#[derive(Default)]
struct FakeRatings {
    ratings: Mutex<Vec<CourseRating>>,
}

#[async_trait]
impl RatingService for FakeRatings {
    async fn rate(
        &self,
        employee_id: Uuid,
        course_id: Uuid,
        rating: i32,
        review: Option<String>,
    ) -> AppResult<RatingUpsert> {
        validate_rating(rating)?;
        let mut ratings = self.ratings.lock().unwrap();
        match ratings
            .iter_mut()
            .find(|r| r.employee_id == employee_id && r.course_id == course_id)
        {
            Some(existing) => {
                existing.revise(rating, review);
                Ok(RatingUpsert::Updated(existing.clone()))
            }
            None => {
                let created = CourseRating::new(course_id, employee_id, rating, review);
                ratings.push(created.clone());
                Ok(RatingUpsert::Created(created))
            }
        }
    }

    async fn course_ratings(&self, _course_id: Uuid) -> AppResult<CourseRatingSummary> {
        unreachable!("course ratings are not exercised here")
    }
}

/// In-memory assignments over a fixed roster of employee ids
#[derive(Default)]
struct FakeAssignments {
    employees: Mutex<Vec<Uuid>>,
    assignments: Mutex<Vec<Assignment>>,
}

impl FakeAssignments {
    fn enroll(&self, employee_id: Uuid) {
        self.employees.lock().unwrap().push(employee_id);
    }
}

#[async_trait]
impl AssignmentService for FakeAssignments {
    async fn assign(
        &self,
        manager_id: Uuid,
        course_id: Uuid,
        employee_ids: Vec<Uuid>,
    ) -> AppResult<AssignmentOutcome> {
        if employee_ids.is_empty() {
            return Err(AppError::bad_request(
                "Employee IDs should be an array and not empty",
            ));
        }

        let employees = self.employees.lock().unwrap().clone();
        let mut stored = self.assignments.lock().unwrap();
        let mut outcome = AssignmentOutcome::default();
        for employee_id in employee_ids {
            if !employees.contains(&employee_id) {
                outcome.errors.push(AssignmentIssue::not_an_employee(employee_id));
                continue;
            }
            if let Some(existing) = stored
                .iter()
                .find(|a| a.course_id == course_id && a.employee_id == employee_id)
            {
                outcome.errors.push(AssignmentIssue::already_assigned(existing));
                continue;
            }
            let created = Assignment::new(course_id, employee_id, manager_id);
            stored.push(created.clone());
            outcome.assignments.push(created);
        }
        Ok(outcome)
    }

    async fn assigned_employee_ids(&self, _course_id: Uuid) -> AppResult<Vec<Uuid>> {
        unreachable!("assigned employee ids are not exercised here")
    }

    async fn update_progress(
        &self,
        _employee_id: Uuid,
        _course_id: Uuid,
        _progress: i32,
    ) -> AppResult<Assignment> {
        unreachable!("progress updates are not exercised here")
    }

    async fn complete(&self, _employee_id: Uuid, _course_id: Uuid) -> AppResult<Assignment> {
        unreachable!("completion is not exercised here")
    }

    async fn my_courses(&self, _employee_id: Uuid) -> AppResult<Vec<EnrolledCourse>> {
        unreachable!("enrolled courses are not exercised here")
    }

    async fn available_for_rating(&self, _employee_id: Uuid) -> AppResult<Vec<RateableCourse>> {
        unreachable!("rateable courses are not exercised here")
    }
}

/// Container exposing only the fakes above
#[derive(Default)]
struct FakeServices {
    requests: Arc<FakeRequests>,
    ratings: Arc<FakeRatings>,
    assignments: Arc<FakeAssignments>,
}

impl ServiceContainer for FakeServices {
    fn auth(&self) -> Arc<dyn AuthService> {
        unreachable!("auth service is not exercised here")
    }

    fn users(&self) -> Arc<dyn UserService> {
        unreachable!("user service is not exercised here")
    }

    fn requests(&self) -> Arc<dyn RequestService> {
        self.requests.clone()
    }

    fn courses(&self) -> Arc<dyn CourseService> {
        unreachable!("course service is not exercised here")
    }

    fn assessments(&self) -> Arc<dyn AssessmentService> {
        unreachable!("assessment service is not exercised here")
    }

    fn assignments(&self) -> Arc<dyn AssignmentService> {
        self.assignments.clone()
    }

    fn ratings(&self) -> Arc<dyn RatingService> {
        self.ratings.clone()
    }

    fn reports(&self) -> Arc<dyn ReportService> {
        unreachable!("report service is not exercised here")
    }

    fn uploads(&self) -> Arc<dyn UploadService> {
        unreachable!("upload service is not exercised here")
    }
}

// =============================================================================
// Test Helpers
// =============================================================================

struct TestApp {
    router: Router,
    state: AppState,
    services: Arc<FakeServices>,
}

impl TestApp {
    fn new() -> Self {
        let config = Config::new("postgres://unused", TEST_SECRET);
        let services = Arc::new(FakeServices::default());
        let state = AppState::new(services.clone(), &config);
        Self {
            router: create_router(state.clone()),
            state,
            services,
        }
    }

    fn token_for(&self, role: UserRole) -> String {
        let user = User {
            id: Uuid::new_v4(),
            employee_code: "EMP-1".to_string(),
            name: "Test User".to_string(),
            email: "test@example.com".to_string(),
            designation: "Engineer".to_string(),
            username: "tester".to_string(),
            password_hash: "hashed".to_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        self.state.tokens.issue(&user).unwrap()
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };
        (status, body)
    }
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::empty()).unwrap()
}

fn send_json(method: &str, uri: &str, token: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn request_body() -> Value {
    json!({
        "title": "Secure coding",
        "description": "OWASP basics for backend teams",
        "concept": "Threat modelling",
        "duration": "2 weeks"
    })
}

// =============================================================================
// Public Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_health_returns_static_payload() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/health", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok", "message": "Server is running"}));
}

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap().contains("Learning Portal"));
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/api-docs/openapi.json", None)).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/course/assign"].is_object());
}

// =============================================================================
// Authentication and Authorization Tests
// =============================================================================

#[tokio::test]
async fn test_missing_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, body) = app.send(get("/api/course-requests/requests", None)).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn test_garbage_token_is_unauthorized() {
    let app = TestApp::new();
    let (status, _) = app
        .send(get("/api/course-requests/requests", Some("not-a-jwt")))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_other_secret_is_unauthorized() {
    let app = TestApp::new();
    let other = Config::new("postgres://unused", "another-secret-key-that-is-32-chars-long");
    let foreign = AppState::new(Arc::new(FakeServices::default()), &other);
    let user = User {
        id: Uuid::new_v4(),
        employee_code: "EMP-2".to_string(),
        name: "Intruder".to_string(),
        email: "intruder@example.com".to_string(),
        designation: "Unknown".to_string(),
        username: "intruder".to_string(),
        password_hash: "hashed".to_string(),
        role: UserRole::Admin,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };
    let token = foreign.tokens.issue(&user).unwrap();

    let (status, _) = app
        .send(get("/api/course-requests/requests", Some(&token)))
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_wrong_role_is_forbidden_with_rule_message() {
    let app = TestApp::new();
    let token = app.token_for(UserRole::Employee);

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/course-requests/create",
            &token,
            request_body(),
        ))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"]["code"], "FORBIDDEN");
    assert_eq!(
        body["error"]["message"],
        "Only managers can submit course requests"
    );
}

// =============================================================================
// Course Request Flow Tests
// =============================================================================

#[tokio::test]
async fn test_manager_submits_and_admin_approves_request() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);
    let admin = app.token_for(UserRole::Admin);

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/course-requests/create",
            &manager,
            request_body(),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["status"], "Pending");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = app
        .send(send_json(
            "PATCH",
            &format!("/api/course-requests/approve/{id}"),
            &admin,
            json!({}),
        ))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "Approved");

    let (status, body) = app
        .send(get("/api/course-requests/requests", Some(&admin)))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["courseCreated"], false);
}

#[tokio::test]
async fn test_deciding_twice_is_rejected() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);
    let admin = app.token_for(UserRole::Admin);

    let (_, body) = app
        .send(send_json(
            "POST",
            "/api/course-requests/create",
            &manager,
            request_body(),
        ))
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let reject = format!("/api/course-requests/reject/{id}");
    let (status, _) = app
        .send(send_json("PATCH", &reject, &admin, json!({})))
        .await;
    assert_eq!(status, StatusCode::OK);

    let approve = format!("/api/course-requests/approve/{id}");
    let (status, body) = app
        .send(send_json("PATCH", &approve, &admin, json!({})))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]["message"].is_string());
}

#[tokio::test]
async fn test_blank_title_fails_validation() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);
    let mut body = request_body();
    body["title"] = json!("");

    let (status, body) = app
        .send(send_json("POST", "/api/course-requests/create", &manager, body))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_id_is_bad_request() {
    let app = TestApp::new();
    let admin = app.token_for(UserRole::Admin);

    let (status, body) = app
        .send(get("/api/course-requests/request/not-a-uuid", Some(&admin)))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_unknown_request_is_not_found() {
    let app = TestApp::new();
    let admin = app.token_for(UserRole::Admin);
    let uri = format!("/api/course-requests/request/{}", Uuid::new_v4());

    let (status, body) = app.send(get(&uri, Some(&admin))).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

// =============================================================================
// Bulk Assignment Tests
// =============================================================================

#[tokio::test]
async fn test_assignment_with_no_valid_employees_is_bad_request() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);
    let course_id = Uuid::new_v4();
    let (stranger, other) = (Uuid::new_v4(), Uuid::new_v4());

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/course/assign",
            &manager,
            json!({"courseId": course_id, "employeeIds": [stranger, other]}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "No valid assignments made");
    assert!(body["data"]["assignments"].as_array().unwrap().is_empty());
    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["employeeId"], stranger.to_string());
}

#[tokio::test]
async fn test_partial_assignment_reports_created_and_skipped() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);
    let course_id = Uuid::new_v4();
    let (alice, bob, stranger) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());
    app.services.assignments.enroll(alice);
    app.services.assignments.enroll(bob);

    let (status, _) = app
        .send(send_json(
            "POST",
            "/api/course/assign",
            &manager,
            json!({"courseId": course_id, "employeeIds": [alice]}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/course/assign",
            &manager,
            json!({"courseId": course_id, "employeeIds": [alice, bob, stranger]}),
        ))
        .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    let assignments = body["data"]["assignments"].as_array().unwrap();
    assert_eq!(assignments.len(), 1);
    assert_eq!(assignments[0]["employeeId"], bob.to_string());

    let errors = body["data"]["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[0]["employeeId"], alice.to_string());
    assert!(errors[0]["assignedOn"].is_string());
    assert_eq!(errors[1]["employeeId"], stranger.to_string());
    assert!(errors[1].get("assignedOn").is_none());
}

#[tokio::test]
async fn test_empty_employee_list_is_bad_request() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);

    let (status, body) = app
        .send(send_json(
            "POST",
            "/api/course/assign",
            &manager,
            json!({"courseId": Uuid::new_v4(), "employeeIds": []}),
        ))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "BAD_REQUEST");
}

// =============================================================================
// Rating Upsert Tests
// =============================================================================

#[tokio::test]
async fn test_rating_twice_updates_existing_rating() {
    let app = TestApp::new();
    let employee = app.token_for(UserRole::Employee);
    let uri = format!("/api/employee/rate-course/{}", Uuid::new_v4());

    let (status, first) = app
        .send(send_json(
            "POST",
            &uri,
            &employee,
            json!({"rating": 3, "review": "Decent"}),
        ))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(first["message"], "Course rated successfully");

    let (status, second) = app
        .send(send_json("POST", &uri, &employee, json!({"rating": 5})))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(second["message"], "Rating updated successfully");
    assert_eq!(second["data"]["id"], first["data"]["id"]);
    assert_eq!(second["data"]["rating"], 5);
    assert_eq!(second["data"]["review"], "Decent");
}

#[tokio::test]
async fn test_rating_out_of_range_is_rejected() {
    let app = TestApp::new();
    let employee = app.token_for(UserRole::Employee);
    let uri = format!("/api/employee/rate-course/{}", Uuid::new_v4());

    let (status, body) = app
        .send(send_json("POST", &uri, &employee, json!({"rating": 9})))
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_managers_cannot_rate_courses() {
    let app = TestApp::new();
    let manager = app.token_for(UserRole::Manager);
    let uri = format!("/api/employee/rate-course/{}", Uuid::new_v4());

    let (status, _) = app
        .send(send_json("POST", &uri, &manager, json!({"rating": 4})))
        .await;

    assert_eq!(status, StatusCode::FORBIDDEN);
}
