use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HashError {
    #[error("Password hashing failed")]
    HashFailed,

    /// The stored hash is not a parseable PHC string.
    #[error("Stored password hash is malformed")]
    MalformedHash,

    #[error("Password verification failed")]
    VerifyFailed,

    #[error("Background task failed")]
    TaskFailed,
}

#[async_trait]
pub trait PasswordHasher: Send + Sync {
    async fn hash_password(&self, password: &str) -> Result<String, HashError>;

    /// `Ok(false)` means the password does not match; `Err` means the
    /// check itself could not run.
    async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, HashError>;
}
