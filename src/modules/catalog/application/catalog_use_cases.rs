use std::sync::Arc;

use crate::catalog::application::ports::incoming::use_cases::{
    CreateProductUseCase, DeleteProductUseCase, GetProductsUseCase, GetSingleProductUseCase,
    UpdateProductUseCase,
};

#[derive(Clone)]
pub struct CatalogUseCases {
    pub create: Arc<dyn CreateProductUseCase + Send + Sync>,
    pub update: Arc<dyn UpdateProductUseCase + Send + Sync>,
    pub delete: Arc<dyn DeleteProductUseCase + Send + Sync>,
    pub get_list: Arc<dyn GetProductsUseCase + Send + Sync>,
    pub get_single: Arc<dyn GetSingleProductUseCase + Send + Sync>,
}
