use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::auth::application::domain::entities::Role;
use crate::shared::api::ApiResponse;
use actix_web::{get, Responder};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Serialize, ToSchema)]
pub struct VerifiedTokenUser {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,

    #[schema(example = "ana@example.com")]
    pub email: String,

    pub role: Role,
}

#[derive(Serialize, ToSchema)]
pub struct VerifyTokenResponse {
    pub user: VerifiedTokenUser,
}

/// Check a bearer token
///
/// Echoes the identity carried by a valid token.
#[utoipa::path(
    get,
    path = "/api/auth/verify-token",
    tag = "auth",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "Token is valid", body = inline(SuccessResponse<VerifyTokenResponse>)),
        (status = 401, description = "Missing, malformed or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/auth/verify-token")]
pub async fn verify_token_handler(user: AuthenticatedUser) -> impl Responder {
    ApiResponse::success(VerifyTokenResponse {
        user: VerifiedTokenUser {
            id: user.user_id.to_string(),
            email: user.email,
            role: user.role,
        },
    })
}
