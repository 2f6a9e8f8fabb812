pub mod create_product;
pub mod delete_product;
pub mod get_products;
pub mod get_single_product;
pub mod update_product;

pub use create_product::{CreateProductCommand, CreateProductError, CreateProductUseCase};
pub use delete_product::{DeleteProductError, DeleteProductUseCase};
pub use get_products::{GetProductsError, GetProductsUseCase};
pub use get_single_product::{GetSingleProductError, GetSingleProductUseCase};
pub use update_product::{UpdateProductCommand, UpdateProductError, UpdateProductUseCase};
