//! Course request workflow: Managers propose, Admins decide.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use super::container::parallel;
use crate::domain::{CourseRequest, Decision, NewCourseRequest, RequestOverview, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::UnitOfWork;

#[async_trait]
pub trait RequestService: Send + Sync {
    async fn submit(&self, manager_id: Uuid, request: NewCourseRequest) -> AppResult<CourseRequest>;

    /// Every request, annotated with its manager and course state.
    async fn list_all(&self) -> AppResult<Vec<RequestOverview>>;

    async fn get(&self, id: Uuid) -> AppResult<RequestOverview>;

    /// Approve or reject a pending request.
    async fn decide(&self, id: Uuid, decision: Decision) -> AppResult<CourseRequest>;

    /// Delete a rejected request.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn list_for_manager(&self, manager_id: Uuid) -> AppResult<Vec<RequestOverview>>;
}

pub struct RequestWorkflow<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> RequestWorkflow<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }

    async fn find(&self, id: Uuid) -> AppResult<CourseRequest> {
        self.uow
            .requests()
            .find_by_id(id)
            .await?
            .ok_or_not_found("Request")
    }

    async fn annotate(&self, requests: Vec<CourseRequest>) -> AppResult<Vec<RequestOverview>> {
        let mut manager_ids: Vec<Uuid> = requests.iter().map(|r| r.manager_id).collect();
        manager_ids.sort();
        manager_ids.dedup();
        let request_ids: Vec<Uuid> = requests.iter().map(|r| r.id).collect();

        let users = self.uow.users();
        let courses = self.uow.courses();
        let (managers, courses) = parallel::join2(
            users.find_by_ids(manager_ids),
            courses.find_by_requests(request_ids),
        )
        .await?;

        let managers: HashMap<Uuid, User> = managers.into_iter().map(|u| (u.id, u)).collect();
        let mut course_by_request: HashMap<Uuid, Uuid> = HashMap::new();
        for course in courses {
            course_by_request.entry(course.request_id).or_insert(course.id);
        }

        Ok(requests
            .into_iter()
            .map(|request| {
                let manager = managers.get(&request.manager_id).map(User::summary);
                let course_id = course_by_request.get(&request.id).copied();
                RequestOverview::new(request, manager, course_id)
            })
            .collect())
    }
}

#[async_trait]
impl<U: UnitOfWork> RequestService for RequestWorkflow<U> {
    async fn submit(&self, manager_id: Uuid, request: NewCourseRequest) -> AppResult<CourseRequest> {
        let created = self.uow.requests().create(manager_id, request).await?;
        tracing::info!(request_id = %created.id, manager_id = %manager_id, "Course request submitted");
        Ok(created)
    }

    async fn list_all(&self) -> AppResult<Vec<RequestOverview>> {
        let requests = self.uow.requests().list().await?;
        self.annotate(requests).await
    }

    async fn get(&self, id: Uuid) -> AppResult<RequestOverview> {
        let request = self.find(id).await?;
        let mut annotated = self.annotate(vec![request]).await?;
        annotated.pop().ok_or_not_found("Request")
    }

    async fn decide(&self, id: Uuid, decision: Decision) -> AppResult<CourseRequest> {
        let request = self.find(id).await?;
        let status = request.decide(decision)?;

        let updated = self.uow.requests().update_status(id, status).await?;
        tracing::info!(request_id = %id, status = %status, "Course request decided");
        Ok(updated)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let request = self.find(id).await?;
        request.ensure_deletable()?;

        self.uow.requests().delete(id).await?;
        tracing::info!(request_id = %id, "Rejected course request deleted");
        Ok(())
    }

    async fn list_for_manager(&self, manager_id: Uuid) -> AppResult<Vec<RequestOverview>> {
        let requests = self.uow.requests().list_by_manager(manager_id).await?;
        self.annotate(requests).await
    }
}
