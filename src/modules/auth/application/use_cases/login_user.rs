use async_trait::async_trait;
use email_address::EmailAddress;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::{
    PasswordHasher, TokenProvider, TokenSubject, UserQuery,
};

// ========================= Login Request =========================
/// Validated login request. Email is normalized to lower case.
#[derive(Debug, Clone)]
pub struct LoginRequest {
    email: String,
    password: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginRequestError {
    #[error("Email cannot be empty")]
    EmptyEmail,

    #[error("Invalid email format")]
    InvalidEmailFormat,

    #[error("Password cannot be empty")]
    EmptyPassword,
}

impl LoginRequest {
    pub fn new(email: String, password: String) -> Result<Self, LoginRequestError> {
        let email = email.trim();

        if email.is_empty() {
            return Err(LoginRequestError::EmptyEmail);
        }

        if !EmailAddress::is_valid(email) {
            return Err(LoginRequestError::InvalidEmailFormat);
        }

        if password.is_empty() {
            return Err(LoginRequestError::EmptyPassword);
        }

        Ok(Self {
            email: email.to_lowercase(),
            password,
        })
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}

// ====================== Login Error =============================
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoginError {
    /// Unknown email and wrong password are deliberately indistinguishable.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Password verification failed: {0}")]
    PasswordVerificationFailed(String),

    #[error("Token generation failed: {0}")]
    TokenGenerationFailed(String),

    #[error("Query error: {0}")]
    QueryError(String),
}

// ============================ Login Response =================================
#[derive(Debug, Clone, PartialEq)]
pub struct LoggedInUser {
    pub full_name: String,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoginUserResponse {
    pub token: String,
    pub user: LoggedInUser,
}

// ============================ Login User Use Case =============================
#[async_trait]
pub trait ILoginUserUseCase: Send + Sync {
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError>;
}

#[derive(Clone)]
pub struct LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
    password_hasher: Arc<dyn PasswordHasher>,
    token_provider: Arc<dyn TokenProvider>,
    decoy_hash: Arc<OnceCell<String>>,
}

const DECOY_PASSWORD: &str = "decoy-password-for-unknown-accounts";

impl<Q> LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(
        query: Q,
        password_hasher: Arc<dyn PasswordHasher>,
        token_provider: Arc<dyn TokenProvider>,
    ) -> Self {
        Self {
            query,
            password_hasher,
            token_provider,
            decoy_hash: Arc::new(OnceCell::new()),
        }
    }

    /// Unknown emails are checked against a hash made with the same hasher,
    /// so they cost about as much as a wrong password.
    async fn verify_decoy(&self, password: &str) {
        let decoy = self
            .decoy_hash
            .get_or_try_init(|| self.password_hasher.hash_password(DECOY_PASSWORD))
            .await;

        if let Ok(decoy) = decoy {
            let _ = self.password_hasher.verify_password(password, decoy).await;
        }
    }
}

#[async_trait]
impl<Q> ILoginUserUseCase for LoginUserUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self, request: LoginRequest) -> Result<LoginUserResponse, LoginError> {
        let user = self
            .query
            .find_by_email(request.email())
            .await
            .map_err(|e| LoginError::QueryError(e.to_string()))?;

        let Some(user) = user else {
            self.verify_decoy(request.password()).await;
            return Err(LoginError::InvalidCredentials);
        };

        let is_valid = self
            .password_hasher
            .verify_password(request.password(), &user.password_hash)
            .await
            .map_err(|e| LoginError::PasswordVerificationFailed(e.to_string()))?;

        if !is_valid {
            return Err(LoginError::InvalidCredentials);
        }

        let token = self
            .token_provider
            .generate_access_token(&TokenSubject {
                user_id: user.id,
                email: user.email.clone(),
                role: user.role,
            })
            .map_err(|e| LoginError::TokenGenerationFailed(e.to_string()))?;

        Ok(LoginUserResponse {
            token,
            user: LoggedInUser {
                full_name: user.full_name,
                email: user.email,
                role: user.role,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::adapter::outgoing::jwt::{JwtConfig, JwtTokenService};
    use crate::auth::application::ports::outgoing::{
        HashError, UserQueryError, UserQueryResult,
    };
    use chrono::Utc;
    use std::sync::Mutex;
    use uuid::Uuid;

    // ==================== LoginRequest Tests ====================
    #[test]
    fn test_login_request_email_normalized() {
        let request =
            LoginRequest::new("  Test@Example.COM  ".to_string(), "password123".to_string())
                .unwrap();

        assert_eq!(request.email(), "test@example.com");
        assert_eq!(request.password(), "password123");
    }

    #[test]
    fn test_login_request_validation() {
        assert_eq!(
            LoginRequest::new("".to_string(), "pw".to_string()).unwrap_err(),
            LoginRequestError::EmptyEmail
        );
        assert_eq!(
            LoginRequest::new("invalid-email".to_string(), "pw".to_string()).unwrap_err(),
            LoginRequestError::InvalidEmailFormat
        );
        assert_eq!(
            LoginRequest::new("a@b.com".to_string(), "".to_string()).unwrap_err(),
            LoginRequestError::EmptyPassword
        );
    }

    // ==================== LoginUserUseCase Tests ====================
    #[derive(Default)]
    struct MockUserQuery {
        user: Option<UserQueryResult>,
        should_fail: bool,
    }

    #[async_trait]
    impl UserQuery for MockUserQuery {
        async fn find_by_id(&self, _: Uuid) -> Result<Option<UserQueryResult>, UserQueryError> {
            Ok(None)
        }

        async fn find_by_email(
            &self,
            email: &str,
        ) -> Result<Option<UserQueryResult>, UserQueryError> {
            if self.should_fail {
                return Err(UserQueryError::DatabaseError("Database error".to_string()));
            }
            Ok(self.user.clone().filter(|u| u.email == email))
        }

        async fn find_by_full_name(
            &self,
            _: &str,
        ) -> Result<Option<UserQueryResult>, UserQueryError> {
            Ok(None)
        }

        async fn list_users(&self) -> Result<Vec<UserQueryResult>, UserQueryError> {
            Ok(vec![])
        }
    }

    struct MockPasswordHasher {
        result: Result<bool, HashError>,
        hashed: Mutex<Vec<String>>,
        verified_against: Mutex<Vec<String>>,
    }

    impl MockPasswordHasher {
        fn returning(result: Result<bool, HashError>) -> Self {
            Self {
                result,
                hashed: Mutex::new(Vec::new()),
                verified_against: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl PasswordHasher for MockPasswordHasher {
        async fn hash_password(&self, password: &str) -> Result<String, HashError> {
            self.hashed.lock().unwrap().push(password.to_string());
            Ok(format!("hash-of-{password}"))
        }

        async fn verify_password(&self, _: &str, hash: &str) -> Result<bool, HashError> {
            self.verified_against.lock().unwrap().push(hash.to_string());
            self.result.clone()
        }
    }

    fn jwt_service() -> Arc<JwtTokenService> {
        Arc::new(JwtTokenService::new(JwtConfig {
            secret_key: "test_secret_key_min_32_characters_long".to_string(),
            issuer: "stock-shop".to_string(),
            access_token_expiry: 3600,
        }))
    }

    fn stored_user(role: Role) -> UserQueryResult {
        UserQueryResult {
            id: Uuid::new_v4(),
            full_name: "Ana Torres".to_string(),
            email: "test@example.com".to_string(),
            password_hash: "hashed_password".to_string(),
            role,
            is_activated: false,
            created_at: Utc::now(),
        }
    }

    fn use_case(query: MockUserQuery, verify: Result<bool, HashError>) -> LoginUserUseCase<MockUserQuery> {
        LoginUserUseCase::new(
            query,
            Arc::new(MockPasswordHasher::returning(verify)),
            jwt_service(),
        )
    }

    fn request() -> LoginRequest {
        LoginRequest::new("Test@Example.com".to_string(), "password123".to_string()).unwrap()
    }

    #[tokio::test]
    async fn test_login_success_token_carries_stored_role() {
        let user = stored_user(Role::Employee);
        let user_id = user.id;
        let uc = use_case(
            MockUserQuery {
                user: Some(user),
                should_fail: false,
            },
            Ok(true),
        );

        let response = uc.execute(request()).await.unwrap();

        assert_eq!(response.user.full_name, "Ana Torres");
        assert_eq!(response.user.role, Role::Employee);

        let claims = jwt_service().verify_token(&response.token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.role, Role::Employee);
        assert_eq!(claims.email, "test@example.com");
    }

    #[tokio::test]
    async fn test_unknown_email_and_wrong_password_look_the_same() {
        let unknown = use_case(MockUserQuery::default(), Ok(true))
            .execute(request())
            .await;
        let wrong_password = use_case(
            MockUserQuery {
                user: Some(stored_user(Role::User)),
                should_fail: false,
            },
            Ok(false),
        )
        .execute(request())
        .await;

        assert_eq!(unknown, Err(LoginError::InvalidCredentials));
        assert_eq!(wrong_password, Err(LoginError::InvalidCredentials));
    }

    #[tokio::test]
    async fn test_unknown_email_still_runs_one_verification() {
        let hasher = Arc::new(MockPasswordHasher::returning(Ok(true)));
        let uc = LoginUserUseCase::new(MockUserQuery::default(), hasher.clone(), jwt_service());

        assert_eq!(uc.execute(request()).await, Err(LoginError::InvalidCredentials));
        assert_eq!(uc.execute(request()).await, Err(LoginError::InvalidCredentials));

        // The decoy hash is made once and reused.
        let decoy = format!("hash-of-{DECOY_PASSWORD}");
        assert_eq!(*hasher.hashed.lock().unwrap(), vec![DECOY_PASSWORD.to_string()]);
        assert_eq!(*hasher.verified_against.lock().unwrap(), vec![decoy.clone(), decoy]);
    }

    #[tokio::test]
    async fn test_known_email_verifies_stored_hash_only() {
        let hasher = Arc::new(MockPasswordHasher::returning(Ok(false)));
        let query = MockUserQuery {
            user: Some(stored_user(Role::User)),
            should_fail: false,
        };
        let uc = LoginUserUseCase::new(query, hasher.clone(), jwt_service());

        assert_eq!(uc.execute(request()).await, Err(LoginError::InvalidCredentials));
        assert!(hasher.hashed.lock().unwrap().is_empty());
        assert_eq!(
            *hasher.verified_against.lock().unwrap(),
            vec!["hashed_password".to_string()]
        );
    }

    #[tokio::test]
    async fn test_login_query_error() {
        let uc = use_case(
            MockUserQuery {
                user: None,
                should_fail: true,
            },
            Ok(true),
        );

        assert!(matches!(
            uc.execute(request()).await,
            Err(LoginError::QueryError(_))
        ));
    }

    #[tokio::test]
    async fn test_login_password_verification_error() {
        let uc = use_case(
            MockUserQuery {
                user: Some(stored_user(Role::User)),
                should_fail: false,
            },
            Err(HashError::MalformedHash),
        );

        assert!(matches!(
            uc.execute(request()).await,
            Err(LoginError::PasswordVerificationFailed(_))
        ));
    }
}
