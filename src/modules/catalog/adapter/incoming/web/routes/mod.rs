pub mod create_product;
pub mod delete_product;
pub mod get_products;
pub mod get_single_product;
pub mod product_dto;
pub mod product_form;
pub mod update_product;

use actix_web::HttpResponse;
use uuid::Uuid;

use crate::shared::api::ApiResponse;

pub use create_product::{create_product_handler, __path_create_product_handler};
pub use delete_product::{delete_product_handler, __path_delete_product_handler};
pub use get_products::{get_products_handler, __path_get_products_handler};
pub use get_single_product::{get_single_product_handler, __path_get_single_product_handler};
pub use product_dto::{ProductListResponse, ProductResponse, SingleProductResponse, IMAGES_PATH};
pub use update_product::{update_product_handler, __path_update_product_handler};

pub(crate) fn parse_product_id(raw: &str) -> Result<Uuid, HttpResponse> {
    Uuid::parse_str(raw.trim())
        .map_err(|_| ApiResponse::bad_request("VALIDATION_ERROR", "Invalid product id"))
}
