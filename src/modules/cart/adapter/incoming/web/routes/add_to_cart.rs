use actix_web::{post, web, Responder};

use super::cart_dto::{AddToCartRequest, CartResponse};
use super::{invalid_quantity, map_cart_error};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::AuthenticatedUser;
use crate::cart::application::domain::entities::coerce_positive_quantity;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Add a product to the cart
///
/// Adding a product already in the cart increases its quantity.
#[utoipa::path(
    post,
    path = "/api/cart",
    tag = "cart",
    security(("BearerAuth" = [])),
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = inline(SuccessResponse<CartResponse>)),
        (status = 400, description = "Missing product id or invalid quantity", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Not enough stock", body = ErrorResponse),
    )
)]
#[post("/api/cart")]
pub async fn add_to_cart_handler(
    user: AuthenticatedUser,
    req: web::Json<AddToCartRequest>,
    data: web::Data<AppState>,
) -> impl Responder {
    let req = req.into_inner();
    let Some(product_id) = req.product_id else {
        return ApiResponse::bad_request("VALIDATION_ERROR", "productId is required");
    };
    let quantity = match coerce_positive_quantity(req.quantity.as_ref()) {
        Ok(q) => q,
        Err(e) => return invalid_quantity(e),
    };

    match data.cart.add.execute(user.user_id, product_id, quantity).await {
        Ok(lines) => ApiResponse::success(CartResponse::from(lines)),
        Err(e) => map_cart_error(e, user.user_id),
    }
}
