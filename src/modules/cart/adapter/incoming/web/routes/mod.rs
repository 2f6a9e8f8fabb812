pub mod add_to_cart;
pub mod cart_dto;
pub mod get_cart;
pub mod remove_from_cart;
pub mod set_cart_quantity;

use actix_web::HttpResponse;
use tracing::error;
use uuid::Uuid;

use crate::cart::application::domain::entities::QuantityError;
use crate::cart::application::ports::incoming::use_cases::CartError;
use crate::shared::api::ApiResponse;

pub use add_to_cart::{add_to_cart_handler, __path_add_to_cart_handler};
pub use cart_dto::{AddToCartRequest, CartLineDto, CartResponse, SetQuantityRequest};
pub use get_cart::{get_cart_handler, __path_get_cart_handler};
pub use remove_from_cart::{remove_from_cart_handler, __path_remove_from_cart_handler};
pub use set_cart_quantity::{set_cart_quantity_handler, __path_set_cart_quantity_handler};

pub(crate) fn parse_path_product_id(raw: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiResponse::bad_request("VALIDATION_ERROR", "Invalid product id"))
}

pub(crate) fn invalid_quantity(e: QuantityError) -> HttpResponse {
    ApiResponse::bad_request("INVALID_QUANTITY", &e.to_string())
}

pub(crate) fn map_cart_error(err: CartError, user_id: Uuid) -> HttpResponse {
    match err {
        CartError::ProductNotFound => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "The product does not exist or was removed")
        }
        CartError::CartItemNotFound => {
            ApiResponse::not_found("CART_ITEM_NOT_FOUND", "The product is not in the cart")
        }
        CartError::InsufficientStock {
            product_name,
            available,
            in_cart,
        } => {
            let message = if in_cart > 0 {
                format!(
                    "Insufficient stock for {product_name}. You already have {in_cart} in the cart. Available: {available}"
                )
            } else {
                format!("Insufficient stock for {product_name}. Available: {available}")
            };
            ApiResponse::conflict("INSUFFICIENT_STOCK", &message)
        }
        other => {
            error!(user_id = %user_id, error = %other, "Cart operation failed");
            ApiResponse::internal_error()
        }
    }
}
