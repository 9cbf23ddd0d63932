//! Course catalog: creating courses from approved requests and editing them.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{ensure_no_existing_course, Course, CourseContent, CourseWithAuthor, User};
use crate::errors::{AppResult, OptionExt};
use crate::infra::storage::filename_from_url;
use crate::infra::{FileStore, UnitOfWork};

#[async_trait]
pub trait CourseService: Send + Sync {
    /// Create the course for an approved request. At most one per request.
    async fn create(
        &self,
        admin_id: Uuid,
        request_id: Uuid,
        content: CourseContent,
    ) -> AppResult<Course>;

    async fn edit(&self, course_id: Uuid, content: CourseContent) -> AppResult<Course>;

    async fn list(&self) -> AppResult<Vec<CourseWithAuthor>>;
}

pub struct CourseCatalog<U: UnitOfWork> {
    uow: Arc<U>,
    files: Arc<dyn FileStore>,
}

impl<U: UnitOfWork> CourseCatalog<U> {
    pub fn new(uow: Arc<U>, files: Arc<dyn FileStore>) -> Self {
        Self { uow, files }
    }

    /// Drop a PDF that an edit replaced. Failures only get logged.
    async fn discard_pdf(&self, url: &str) {
        let Some(filename) = filename_from_url(url) else {
            return;
        };
        if let Err(e) = self.files.delete_pdf(filename).await {
            tracing::warn!(filename, error = %e, "Could not remove replaced PDF");
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> CourseService for CourseCatalog<U> {
    async fn create(
        &self,
        admin_id: Uuid,
        request_id: Uuid,
        content: CourseContent,
    ) -> AppResult<Course> {
        let request = self
            .uow
            .requests()
            .find_by_id(request_id)
            .await?
            .ok_or_not_found("Course request")?;
        request.ensure_approved()?;

        let courses = self.uow.courses();
        let existing = courses.find_by_request(request_id).await?;
        ensure_no_existing_course(existing.as_ref())?;

        let course = courses
            .create(Course::from_content(content, admin_id, request_id))
            .await?;
        tracing::info!(course_id = %course.id, request_id = %request_id, "Course created");
        Ok(course)
    }

    async fn edit(&self, course_id: Uuid, content: CourseContent) -> AppResult<Course> {
        let courses = self.uow.courses();
        let mut course = courses
            .find_by_id(course_id)
            .await?
            .ok_or_not_found("Course")?;

        let replaced_pdf = course.apply(content);
        let course = courses.update(course).await?;

        if let Some(old) = replaced_pdf {
            self.discard_pdf(&old).await;
        }

        tracing::info!(course_id = %course.id, "Course updated");
        Ok(course)
    }

    async fn list(&self) -> AppResult<Vec<CourseWithAuthor>> {
        let courses = self.uow.courses().list().await?;

        let mut author_ids: Vec<Uuid> = courses.iter().map(|c| c.created_by).collect();
        author_ids.sort();
        author_ids.dedup();
        let authors: HashMap<Uuid, User> = self
            .uow
            .users()
            .find_by_ids(author_ids)
            .await?
            .into_iter()
            .map(|u| (u.id, u))
            .collect();

        Ok(courses
            .into_iter()
            .map(|course| CourseWithAuthor {
                author: authors.get(&course.created_by).map(User::summary),
                course,
            })
            .collect())
    }
}
