use actix_web::{get, web, Responder};
use tracing::error;

use super::parse_product_id;
use super::product_dto::{ProductResponse, SingleProductResponse};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::catalog::application::ports::incoming::use_cases::GetSingleProductError;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Get one product
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "products",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "The product", body = inline(SuccessResponse<SingleProductResponse>)),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
#[get("/api/products/{id}")]
pub async fn get_single_product_handler(
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = match parse_product_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match data.catalog.get_single.execute(product_id).await {
        Ok(product) => ApiResponse::success(SingleProductResponse {
            product: ProductResponse::from(product),
        }),
        Err(GetSingleProductError::NotFound) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "Product not found")
        }
        Err(e) => {
            error!(product_id = %product_id, error = %e, "Failed to load product");
            ApiResponse::internal_error()
        }
    }
}
