use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::auth::application::domain::entities::Role;
use crate::auth::application::ports::outgoing::UserQuery;

/// Account summary without credentials or activation token.
#[derive(Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_activated: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ListUsersError {
    #[error("Query error: {0}")]
    QueryError(String),
}

#[async_trait]
pub trait IListUsersUseCase: Send + Sync {
    async fn execute(&self) -> Result<Vec<UserSummary>, ListUsersError>;
}

#[derive(Clone)]
pub struct ListUsersUseCase<Q>
where
    Q: UserQuery,
{
    query: Q,
}

impl<Q> ListUsersUseCase<Q>
where
    Q: UserQuery,
{
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q> IListUsersUseCase for ListUsersUseCase<Q>
where
    Q: UserQuery,
{
    async fn execute(&self) -> Result<Vec<UserSummary>, ListUsersError> {
        let users = self
            .query
            .list_users()
            .await
            .map_err(|e| ListUsersError::QueryError(e.to_string()))?;

        Ok(users
            .into_iter()
            .map(|u| UserSummary {
                id: u.id,
                full_name: u.full_name,
                email: u.email,
                role: u.role,
                is_activated: u.is_activated,
                created_at: u.created_at,
            })
            .collect())
    }
}
