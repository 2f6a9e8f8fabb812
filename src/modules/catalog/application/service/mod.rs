pub mod create_product_service;
pub mod delete_product_service;
pub mod get_products_service;
pub mod get_single_product_service;
mod image_release;
pub mod update_product_service;

#[cfg(test)]
pub(crate) mod test_doubles;

pub use create_product_service::CreateProductService;
pub use delete_product_service::DeleteProductService;
pub use get_products_service::GetProductsService;
pub use get_single_product_service::GetSingleProductService;
pub use update_product_service::UpdateProductService;
