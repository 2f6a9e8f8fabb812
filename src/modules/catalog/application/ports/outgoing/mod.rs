pub mod image_storage;
pub mod product_query;
pub mod product_repository;

pub use image_storage::{ImageStorage, ImageStorageError, ImageUpload, StoredImage};
pub use product_query::{ProductQuery, ProductQueryError};
pub use product_repository::{
    CreateProductData, PatchProductData, ProductRepository, ProductRepositoryError,
};
