use actix_multipart::Multipart;
use actix_web::{post, web, Responder};
use tracing::{error, info, warn};

use super::product_dto::{ProductResponse, SingleProductResponse};
use super::product_form::read_product_form;
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::StaffUser;
use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductCommand, CreateProductError,
};
use crate::shared::api::ApiResponse;
use crate::AppState;

/// Create a product
///
/// Multipart form with `name`, `price`, `stock` and an `image` file.
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "products",
    security(("BearerAuth" = [])),
    request_body(content_type = "multipart/form-data", description = "name, price, stock, image"),
    responses(
        (status = 201, description = "Product created", body = inline(SuccessResponse<SingleProductResponse>)),
        (status = 400, description = "Missing or invalid field, image missing, wrong type or too large", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not staff", body = ErrorResponse),
        (status = 409, description = "Name taken or identical image rejected", body = ErrorResponse),
    )
)]
#[post("/api/products")]
pub async fn create_product_handler(
    staff: StaffUser,
    payload: Multipart,
    data: web::Data<AppState>,
) -> impl Responder {
    let form = match read_product_form(payload, &data.image_policy).await {
        Ok(form) => form,
        Err(response) => return response,
    };

    let form = match form.validate() {
        Ok(form) => form,
        Err(response) => return response,
    };

    let (Some(name), Some(price), Some(stock)) = (form.name, form.price, form.stock) else {
        return ApiResponse::bad_request("VALIDATION_ERROR", "name, price and stock are required");
    };
    let Some(image) = form.image else {
        return ApiResponse::bad_request("IMAGE_REQUIRED", "A product image is required");
    };

    let command = CreateProductCommand {
        name,
        price,
        stock,
        image,
    };

    match data.catalog.create.execute(command).await {
        Ok(product) => {
            info!(product_id = %product.id, by = %staff.user.user_id, "Product created via API");
            ApiResponse::created(SingleProductResponse {
                product: ProductResponse::from(product),
            })
        }
        Err(CreateProductError::NameAlreadyExists) => {
            warn!("Product name already exists");
            ApiResponse::conflict("PRODUCT_NAME_EXISTS", "A product with this name already exists")
        }
        Err(CreateProductError::DuplicateImage { existing }) => ApiResponse::conflict(
            "DUPLICATE_IMAGE",
            &format!("An identical image already exists: {existing}"),
        ),
        Err(e) => {
            error!(error = %e, "Failed to create product");
            ApiResponse::internal_error()
        }
    }
}
