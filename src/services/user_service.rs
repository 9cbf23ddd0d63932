//! User service - Profiles and the employee directory.

use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::{Password, ProfileChanges, User, UserRole};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::UnitOfWork;

/// Requested profile edits with the password still in plain text.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub designation: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_profile(&self, id: Uuid) -> AppResult<User>;

    /// Update the caller's own profile. The role never changes.
    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> AppResult<User>;

    async fn list_employees(&self) -> AppResult<Vec<User>>;

    /// A single employee; any other role reads as not found.
    async fn get_employee(&self, id: Uuid) -> AppResult<User>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>) -> Self {
        Self { uow }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_profile(&self, id: Uuid) -> AppResult<User> {
        self.uow.users().find_by_id(id).await?.ok_or_not_found("User")
    }

    async fn update_profile(&self, id: Uuid, update: ProfileUpdate) -> AppResult<User> {
        let users = self.uow.users();
        let current = users.find_by_id(id).await?.ok_or_not_found("User")?;

        if let Some(email) = update.email.as_deref().filter(|e| *e != current.email) {
            if users.find_by_email(email).await?.is_some() {
                return Err(AppError::bad_request("Email already in use"));
            }
        }
        if let Some(username) = update.username.as_deref().filter(|u| *u != current.username) {
            if users.find_by_username(username).await?.is_some() {
                return Err(AppError::bad_request("Username already in use"));
            }
        }

        let password_hash = match update.password.as_deref() {
            Some(plain) => Some(Password::new(plain)?.into_string()),
            None => None,
        };

        let changes = ProfileChanges {
            name: update.name,
            designation: update.designation,
            username: update.username,
            email: update.email,
            password_hash,
        };
        if changes.is_empty() {
            return Ok(current);
        }

        let user = users.update_profile(id, changes).await?;
        tracing::info!(user_id = %user.id, "Profile updated");
        Ok(user)
    }

    async fn list_employees(&self) -> AppResult<Vec<User>> {
        self.uow.users().list_by_role(UserRole::Employee).await
    }

    async fn get_employee(&self, id: Uuid) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .filter(User::is_employee)
            .ok_or_not_found("Employee")
    }
}
