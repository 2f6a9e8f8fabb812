use actix_multipart::Multipart;
use actix_web::{put, web, Responder};
use tracing::{error, info};

use super::parse_product_id;
use super::product_dto::{ProductResponse, SingleProductResponse};
use super::product_form::read_product_form;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::StaffUser;
use crate::catalog::application::ports::incoming::use_cases::{
    UpdateProductCommand, UpdateProductError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Update a product
///
/// Multipart form; every field is optional. A new `image` replaces the
/// old file once the record points at it.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "products",
    security(("BearerAuth" = [])),
    params(("id" = String, Path, description = "Product id")),
    request_body(content_type = "multipart/form-data", description = "Any of name, price, stock, image"),
    responses(
        (status = 200, description = "Product updated", body = inline(SuccessResponse<SingleProductResponse>)),
        (status = 400, description = "Invalid field or image", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
        (status = 404, description = "Product not found", body = ErrorResponse),
        (status = 409, description = "Name taken or identical image rejected", body = ErrorResponse),
    )
)]
#[put("/api/products/{id}")]
pub async fn update_product_handler(
    staff: StaffUser,
    path: web::Path<String>,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let product_id = match parse_product_id(&path) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let form = match read_product_form(payload, &data.image_policy)
        .await
        .and_then(|form| form.validate())
    {
        Ok(form) => form,
        Err(response) => return response,
    };

    let command = UpdateProductCommand {
        name: form.name,
        price: form.price,
        stock: form.stock,
        image: form.image,
    };

    match data.catalog.update.execute(product_id, command).await {
        Ok(product) => {
            info!(product_id = %product.id, by = %staff.user.user_id, "Product updated via API");
            ApiResponse::success(SingleProductResponse {
                product: ProductResponse::from(product),
            })
        }
        Err(UpdateProductError::NotFound) => {
            ApiResponse::not_found("PRODUCT_NOT_FOUND", "Product not found")
        }
        Err(UpdateProductError::NameAlreadyExists) => {
            ApiResponse::conflict("PRODUCT_NAME_EXISTS", "A product with this name already exists")
        }
        Err(UpdateProductError::DuplicateImage { existing }) => ApiResponse::conflict(
            "DUPLICATE_IMAGE",
            &format!("An identical image already exists: {existing}"),
        ),
        Err(e) => {
            error!(product_id = %product_id, error = %e, "Failed to update product");
            ApiResponse::internal_error()
        }
    }
}
