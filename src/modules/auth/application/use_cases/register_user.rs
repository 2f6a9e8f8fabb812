use async_trait::async_trait;
use email_address::EmailAddress;
use rand::{distributions::Alphanumeric, Rng};
use std::sync::Arc;

use crate::auth::application::ports::outgoing::{
    CreateUserData, PasswordHasher, RoleAssignment, UserQuery, UserRepository,
    UserRepositoryError, UserResult,
};

pub const MAX_FULL_NAME_LEN: usize = 100;
const ACTIVATION_TOKEN_LEN: usize = 32;

// ========================= Register Request =========================
/// Validated sign-up data. Email is trimmed and lower-cased.
#[derive(Debug, Clone)]
pub struct RegisterUserRequest {
    full_name: String,
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegisterRequestError {
    #[error("Full name cannot be empty")]
    EmptyFullName,

    #[error("Full name cannot exceed {MAX_FULL_NAME_LEN} characters")]
    FullNameTooLong,

    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,

    #[error("Passwords do not match")]
    PasswordMismatch,
}

impl RegisterUserRequest {
    pub fn new(
        full_name: String,
        email: String,
        password: String,
        confirm_password: String,
    ) -> Result<Self, RegisterRequestError> {
        let full_name = full_name.trim();
        if full_name.is_empty() {
            return Err(RegisterRequestError::EmptyFullName);
        }
        if full_name.chars().count() > MAX_FULL_NAME_LEN {
            return Err(RegisterRequestError::FullNameTooLong);
        }

        let email = email.trim();
        if email.is_empty() {
            return Err(RegisterRequestError::EmptyEmail);
        }
        if !EmailAddress::is_valid(email) {
            return Err(RegisterRequestError::InvalidEmailFormat);
        }

        if password.is_empty() {
            return Err(RegisterRequestError::EmptyPassword);
        }
        if password != confirm_password {
            return Err(RegisterRequestError::PasswordMismatch);
        }

        Ok(Self {
            full_name: full_name.to_string(),
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Register Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RegisterUserError {
    #[error("Email already registered")]
    EmailAlreadyExists,

    #[error("Full name already registered")]
    FullNameAlreadyExists,

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),

    #[error("Repository error: {0}")]
    RepositoryError(String),
}

impl From<UserRepositoryError> for RegisterUserError {
    fn from(e: UserRepositoryError) -> Self {
        match e {
            UserRepositoryError::EmailAlreadyExists => RegisterUserError::EmailAlreadyExists,
            UserRepositoryError::FullNameAlreadyExists => RegisterUserError::FullNameAlreadyExists,
            UserRepositoryError::UserAlreadyExists => RegisterUserError::EmailAlreadyExists,
            UserRepositoryError::DatabaseError(msg) => RegisterUserError::RepositoryError(msg),
        }
    }
}

// ============================ Use Case =============================
#[async_trait]
pub trait IRegisterUserUseCase: Send + Sync {
    /// Self sign-up. The first account ever created becomes admin.
    async fn execute(&self, request: RegisterUserRequest) -> Result<UserResult, RegisterUserError>;
}

#[derive(Clone)]
pub struct RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    query: Q,
    repository: R,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl<Q, R> RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    pub fn new(query: Q, repository: R, password_hasher: Arc<dyn PasswordHasher>) -> Self {
        Self {
            query,
            repository,
            password_hasher,
        }
    }

    /// Shared by self sign-up and staff creation; only the role decision
    /// differs.
    pub(crate) async fn register(
        &self,
        request: RegisterUserRequest,
        assignment: RoleAssignment,
    ) -> Result<UserResult, RegisterUserError> {
        // Friendly pre-checks; the unique indexes still settle races.
        if self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| RegisterUserError::QueryError(e.to_string()))?
            .is_some()
        {
            return Err(RegisterUserError::EmailAlreadyExists);
        }

        if self
            .query
            .find_by_full_name(request.full_name())
            .await
            .map_err(|e| RegisterUserError::QueryError(e.to_string()))?
            .is_some()
        {
            return Err(RegisterUserError::FullNameAlreadyExists);
        }

        let password_hash = self
            .password_hasher
            .hash_password(request.password())
            .await
            .map_err(|e| RegisterUserError::HashingFailed(e.to_string()))?;

        let data = CreateUserData {
            full_name: request.full_name().to_string(),
            email: request.email().to_string(),
            password_hash,
            activation_token: generate_activation_token(),
        };

        Ok(self.repository.create_user(data, assignment).await?)
    }
}

#[async_trait]
impl<Q, R> IRegisterUserUseCase for RegisterUserUseCase<Q, R>
where
    Q: UserQuery,
    R: UserRepository,
{
    async fn execute(&self, request: RegisterUserRequest) -> Result<UserResult, RegisterUserError> {
        self.register(request, RoleAssignment::FirstUserBecomesAdmin)
            .await
    }
}

fn generate_activation_token() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ACTIVATION_TOKEN_LEN)
        .map(char::from)
        .collect()
}
