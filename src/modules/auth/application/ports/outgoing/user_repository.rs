use async_trait::async_trait;
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;

#[derive(Debug, Clone)]
pub struct CreateUserData {
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub activation_token: String,
}

/// How the role of a new account is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleAssignment {
    /// Admin when the table is empty, `user` otherwise. Decided inside
    /// the insert transaction.
    FirstUserBecomesAdmin,
    Fixed(Role),
}

#[derive(Debug, Clone, PartialEq)]
pub struct UserResult {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UserRepositoryError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Full name already registered")]
    FullNameAlreadyExists,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Database error: {0}")]
    DatabaseError(String),
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create_user(
        &self,
        data: CreateUserData,
        assignment: RoleAssignment,
    ) -> Result<UserResult, UserRepositoryError>;
}
