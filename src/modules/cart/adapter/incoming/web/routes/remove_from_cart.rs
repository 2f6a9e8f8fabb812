use actix_web::{delete, web, Responder};

use super::cart_dto::CartResponse;
use super::{map_cart_error, parse_path_product_id};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Remove a line from the cart
///
/// Removing a product that is not in the cart succeeds.
#[utoipa::path(
    delete,
    path = "/api/cart/{productId}",
    tag = "cart",
    security(("BearerAuth" = [])),
    params(("productId" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Updated cart", body = inline(SuccessResponse<CartResponse>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
    )
)]
#[delete("/api/cart/{productId}")]
pub async fn remove_from_cart_handler(
    user: AuthenticatedUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = match parse_path_product_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match data.cart.remove.execute(user.user_id, product_id).await {
        Ok(lines) => ApiResponse::success(CartResponse::from(lines)),
        Err(e) => map_cart_error(e, user.user_id),
    }
}
