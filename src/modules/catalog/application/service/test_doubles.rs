use async_trait::async_trait;
use chrono::Utc;
use mockall::mock;
use rust_decimal::Decimal;
use std::collections::HashSet;
use uuid::Uuid;

use crate::catalog::application::domain::entities::{Price, Product, ProductName, Stock};
use crate::catalog::application::ports::outgoing::{
    CreateProductData, ImageStorage, ImageStorageError, ImageUpload, PatchProductData,
    ProductQuery, ProductQueryError, ProductRepository, ProductRepositoryError, StoredImage,
};

mock! {
    pub ProductRepositoryMock {}
    #[async_trait]
    impl ProductRepository for ProductRepositoryMock {
        async fn create_product(&self, data: CreateProductData) -> Result<Product, ProductRepositoryError>;
        async fn patch_product(&self, product_id: Uuid, data: PatchProductData) -> Result<Product, ProductRepositoryError>;
        async fn delete_product(&self, product_id: Uuid) -> Result<Product, ProductRepositoryError>;
    }
}

mock! {
    pub ProductQueryMock {}
    #[async_trait]
    impl ProductQuery for ProductQueryMock {
        async fn list_products(&self) -> Result<Vec<Product>, ProductQueryError>;
        async fn find_by_id(&self, product_id: Uuid) -> Result<Option<Product>, ProductQueryError>;
        async fn find_by_name(&self, name: &str) -> Result<Option<Product>, ProductQueryError>;
        async fn find_existing_ids(&self, ids: &[Uuid]) -> Result<HashSet<Uuid>, ProductQueryError>;
        async fn image_in_use(&self, filename: &str) -> Result<bool, ProductQueryError>;
    }
}

mock! {
    pub ImageStorageMock {}
    #[async_trait]
    impl ImageStorage for ImageStorageMock {
        async fn store(&self, upload: &ImageUpload) -> Result<StoredImage, ImageStorageError>;
        async fn remove(&self, filename: &str) -> Result<(), ImageStorageError>;
    }
}

pub fn product(name: &str, stock: i32, image: Option<&str>) -> Product {
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        price: Decimal::new(1050, 2),
        stock,
        image: image.map(str::to_string),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

pub fn upload() -> ImageUpload {
    ImageUpload {
        bytes: vec![0x89, b'P', b'N', b'G'],
        extension: ".png".to_string(),
    }
}

pub fn name(raw: &str) -> ProductName {
    ProductName::new(raw).unwrap()
}

pub fn price(raw: &str) -> Price {
    Price::parse(raw).unwrap()
}

pub fn stock(units: i64) -> Stock {
    Stock::new(units).unwrap()
}
