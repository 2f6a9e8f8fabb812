use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AdminUser;
use crate::auth::application::domain::entities::Role;
use crate::auth::application::use_cases::list_users::UserSummary;
use crate::shared::api::ApiResponse;
use crate::AppState;
use actix_web::{get, web, Responder};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListItem {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub role: Role,
    pub is_activated: bool,
    pub created_at: DateTime<Utc>,
}

impl From<UserSummary> for UserListItem {
    fn from(u: UserSummary) -> Self {
        Self {
            id: u.id.to_string(),
            full_name: u.full_name,
            email: u.email,
            role: u.role,
            is_activated: u.is_activated,
            created_at: u.created_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<UserListItem>,
}

/// List accounts
///
/// Admin only. Password hashes and activation tokens are never included.
#[utoipa::path(
    get,
    path = "/api/auth/users",
    tag = "users",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "All accounts", body = inline(SuccessResponse<UserListResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
    )
)]
#[get("/api/auth/users")]
pub async fn list_users_handler(_admin: AdminUser, data: web::Data<AppState>) -> impl Responder {
    match data.list_users_use_case.execute().await {
        Ok(users) => ApiResponse::success(UserListResponse {
            users: users.into_iter().map(UserListItem::from).collect(),
        }),
        Err(e) => {
            error!(error = %e, "Failed to list users");
            ApiResponse::internal_error()
        }
    }
}
