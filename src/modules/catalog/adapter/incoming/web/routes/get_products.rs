use actix_web::{get, web, Responder};
use tracing::{debug, error};

use super::product_dto::{ProductListResponse, ProductResponse};
use crate::api::schemas::{ErrorResponse, SuccessResponse};
use crate::auth::adapter::incoming::web::extractors::OptionalUser;
use crate::shared::api::ApiResponse;
use crate::AppState;

/// List products
///
/// Public. Ordered by name. A bearer token is accepted but not required.
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "products",
    responses(
        (status = 200, description = "All products", body = inline(SuccessResponse<ProductListResponse>)),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    )
)]
#[get("/api/products")]
pub async fn get_products_handler(viewer: OptionalUser, data: web::Data<AppState>) -> impl Responder {
    if let OptionalUser(Some(user)) = &viewer {
        debug!(user_id = %user.user_id, "Catalog requested by signed-in user");
    }

    match data.catalog.get_list.execute().await {
        Ok(products) => ApiResponse::success(ProductListResponse {
            products: products.into_iter().map(ProductResponse::from).collect(),
        }),
        Err(e) => {
            error!(error = %e, "Failed to list products");
            ApiResponse::internal_error()
        }
    }
}
