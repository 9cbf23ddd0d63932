//! Authentication service - Registration, login and token handling.
//!
//! Password hashing lives in the domain `Password` value object; this
//! service only orchestrates it with the user repository and JWTs.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::config::{Config, SECONDS_PER_HOUR, TOKEN_TYPE_BEARER};
use crate::domain::{NewUser, Password, User, UserResponse, UserRole};
use crate::errors::{AppError, AppResult};
use crate::infra::UnitOfWork;

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub sub: Uuid,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

/// Token response returned after successful login
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    /// JWT access token
    #[schema(example = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...")]
    pub token: String,
    #[schema(example = "Bearer")]
    pub token_type: String,
    /// Token lifetime in seconds
    #[schema(example = 2592000)]
    pub expires_in: i64,
    pub user: UserResponse,
}

/// Signs and verifies HS256 tokens with the configured secret.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    expiration_hours: i64,
}

impl TokenCodec {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding: EncodingKey::from_secret(config.jwt_secret_bytes()),
            decoding: DecodingKey::from_secret(config.jwt_secret_bytes()),
            expiration_hours: config.jwt_expiration_hours,
        }
    }

    pub fn expires_in(&self) -> i64 {
        self.expiration_hours * SECONDS_PER_HOUR
    }

    pub fn issue(&self, user: &User) -> AppResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            role: user.role.to_string(),
            exp: (now + Duration::hours(self.expiration_hours)).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(&Header::default(), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let token_data = decode::<Claims>(token, &self.decoding, &Validation::default())?;
        Ok(token_data.claims)
    }
}

/// Everything needed to open an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub employee_code: String,
    pub name: String,
    pub email: String,
    pub designation: String,
    pub username: String,
    pub password: String,
    pub role: UserRole,
    pub invite_code: Option<String>,
}

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user. Admin and Manager accounts need the invite code.
    async fn register(&self, registration: Registration) -> AppResult<User>;

    /// Login and return a signed token with the user's profile
    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse>;
}

/// Concrete implementation of AuthService using Unit of Work.
pub struct Authenticator<U: UnitOfWork> {
    uow: Arc<U>,
    tokens: TokenCodec,
    invite_code: Option<String>,
}

impl<U: UnitOfWork> Authenticator<U> {
    pub fn new(uow: Arc<U>, config: &Config) -> Self {
        Self {
            uow,
            tokens: TokenCodec::new(config),
            invite_code: config.invite_code().map(str::to_string),
        }
    }

    fn invite_accepted(&self, supplied: Option<&str>) -> bool {
        match (self.invite_code.as_deref(), supplied) {
            (Some(expected), Some(given)) => expected == given,
            _ => false,
        }
    }
}

#[async_trait]
impl<U: UnitOfWork> AuthService for Authenticator<U> {
    async fn register(&self, registration: Registration) -> AppResult<User> {
        let users = self.uow.users();

        if users.find_by_email(&registration.email).await?.is_some() {
            return Err(AppError::bad_request("Email already exists"));
        }
        if users.find_by_username(&registration.username).await?.is_some() {
            return Err(AppError::bad_request("Username already exists"));
        }

        if registration.role.is_privileged()
            && !self.invite_accepted(registration.invite_code.as_deref())
        {
            tracing::warn!(email = %registration.email, role = %registration.role, "Rejected privileged registration");
            return Err(AppError::forbidden("Invalid invitation code"));
        }

        let password_hash = Password::new(&registration.password)?.into_string();
        let user = users
            .create(NewUser {
                employee_code: registration.employee_code,
                name: registration.name,
                email: registration.email,
                designation: registration.designation,
                username: registration.username,
                password_hash,
                role: registration.role,
            })
            .await?;

        tracing::info!(user_id = %user.id, role = %user.role, "User registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<TokenResponse> {
        let found = self.uow.users().find_by_email(&email).await?;

        // Unknown emails still pay for a hash verification.
        let stored = match &found {
            Some(user) => Password::from_hash(user.password_hash.clone()),
            None => Password::placeholder(),
        };
        let password_valid = stored.verify(&password);

        let user = match found {
            Some(user) if password_valid => user,
            _ => return Err(AppError::InvalidCredentials),
        };

        let token = self.tokens.issue(&user)?;
        tracing::debug!(user_id = %user.id, "Login succeeded");

        Ok(TokenResponse {
            token,
            token_type: TOKEN_TYPE_BEARER.to_string(),
            expires_in: self.tokens.expires_in(),
            user: UserResponse::from(user),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::repositories::MockUserRepository;
    use crate::infra::unit_of_work::MockUnitOfWork;
    use crate::infra::UserRepository;

    const SECRET: &str = "unit-test-secret-with-at-least-32-characters";

    fn config() -> Config {
        Config::new("postgres://localhost/test".to_string(), SECRET.to_string())
            .with_invite_code("let-me-in")
    }

    fn user(role: UserRole, password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            employee_code: "E-100".to_string(),
            name: "Dana".to_string(),
            email: "dana@example.com".to_string(),
            designation: "Engineer".to_string(),
            username: "dana".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            role,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn registration(role: UserRole, invite: Option<&str>) -> Registration {
        Registration {
            employee_code: "E-200".to_string(),
            name: "Sam".to_string(),
            email: "sam@example.com".to_string(),
            designation: "Lead".to_string(),
            username: "sam".to_string(),
            password: "secret-pass".to_string(),
            role,
            invite_code: invite.map(str::to_string),
        }
    }

    fn service(repo: MockUserRepository) -> Authenticator<MockUnitOfWork> {
        let mut uow = MockUnitOfWork::new();
        uow.expect_users()
            .return_const(Arc::new(repo) as Arc<dyn UserRepository>);
        Authenticator::new(Arc::new(uow), &config())
    }

    fn empty_directory() -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().returning(|_| Ok(None));
        repo.expect_find_by_username().returning(|_| Ok(None));
        repo
    }

    #[tokio::test]
    async fn test_register_employee_without_invite() {
        let mut repo = empty_directory();
        repo.expect_create().times(1).returning(|new_user| {
            assert_ne!(new_user.password_hash, "secret-pass");
            Ok(User {
                id: Uuid::new_v4(),
                employee_code: new_user.employee_code,
                name: new_user.name,
                email: new_user.email,
                designation: new_user.designation,
                username: new_user.username,
                password_hash: new_user.password_hash,
                role: new_user.role,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            })
        });

        let created = service(repo)
            .register(registration(UserRole::Employee, None))
            .await
            .unwrap();
        assert_eq!(created.role, UserRole::Employee);
    }

    #[tokio::test]
    async fn test_register_manager_requires_invite() {
        let mut repo = empty_directory();
        repo.expect_create().never();

        let err = service(repo)
            .register(registration(UserRole::Manager, Some("wrong")))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(|_| Ok(Some(user(UserRole::Employee, "whatever1"))));

        let err = service(repo)
            .register(registration(UserRole::Employee, None))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref m) if m == "Email already exists"));
    }

    #[tokio::test]
    async fn test_login_issues_verifiable_token() {
        let account = user(UserRole::Manager, "correct-horse");
        let id = account.id;
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |_| Ok(Some(account.clone())));

        let response = service(repo)
            .login("dana@example.com".to_string(), "correct-horse".to_string())
            .await
            .unwrap();

        assert_eq!(response.token_type, "Bearer");
        assert_eq!(response.expires_in, 720 * 3600);
        let claims = TokenCodec::new(&config()).verify(&response.token).unwrap();
        assert_eq!(claims.sub, id);
        assert_eq!(claims.role, "Manager");
    }

    #[tokio::test]
    async fn test_login_rejects_bad_password_and_unknown_email() {
        let account = user(UserRole::Employee, "correct-horse");
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email()
            .returning(move |email| {
                Ok((email == "dana@example.com").then(|| account.clone()))
            });
        let service = service(repo);

        let wrong = service
            .login("dana@example.com".to_string(), "battery-staple".to_string())
            .await;
        assert!(matches!(wrong, Err(AppError::InvalidCredentials)));

        let unknown = service
            .login("nobody@example.com".to_string(), "correct-horse".to_string())
            .await;
        assert!(matches!(unknown, Err(AppError::InvalidCredentials)));
    }

    #[test]
    fn test_token_rejects_foreign_secret() {
        let account = user(UserRole::Admin, "abcdefgh");
        let token = TokenCodec::new(&config()).issue(&account).unwrap();

        let other = Config::new(
            "postgres://localhost/test".to_string(),
            "a-completely-different-secret-of-32-chars".to_string(),
        );
        assert!(matches!(TokenCodec::new(&other).verify(&token), Err(AppError::Jwt(_))));
    }
}
