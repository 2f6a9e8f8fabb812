use actix_web::{delete, web, Responder};
use tracing::{error, info};

use super::parse_product_id;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::StaffUser;
use crate::catalog::application::ports::incoming::use_cases::DeleteProductError;
use crate::shared::api::{ApiResponse, MessageBody};
use crate::AppState;

/// Delete a product
///
/// Its image file is removed too unless another product shares it.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "products",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = inline(SuccessResponse<MessageBody>)),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
    )
)]
#[delete("/api/products/{id}")]
pub async fn delete_product_handler(
    staff: StaffUser,
    path: web::Path<String>,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = match parse_product_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match data.catalog.delete.execute(product_id).await {
        Ok(product) => {
            info!(product_id = %product.id, by = %staff.user.user_id, "Product deleted via API");
            ApiResponse::success(MessageBody::new("Product deleted"))
        }
        Err(DeleteProductError::NotFound) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "Product not found")
        }
        Err(e) => {
            error!(product_id = %product_id, error = %e, "Failed to delete product");
            ApiResponse::internal_error()
        }
    }
}
