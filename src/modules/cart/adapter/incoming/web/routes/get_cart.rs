use actix_web::{get, web, Responder};

use super::cart_dto::CartResponse;
use super::map_cart_error;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Current cart
///
/// Lines whose product was deleted are dropped first.
#[utoipa::path(
    get,
    path = "/api/cart",
    tag = "cart",
    security(("BearerAuth" = [])),
    responses(
        (status = 200, description = "The caller's cart", body = inline(SuccessResponse<CartResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[get("/api/cart")]
pub async fn get_cart_handler(user: AuthenticatedUser, data: web::Data<AppState>) -> impl Responder {
    match data.cart.get.execute(user.user_id).await {
        Ok(lines) => ApiResponse::success(CartResponse::from(lines)),
        Err(e) => map_cart_error(e, user.user_id),
    }
}
