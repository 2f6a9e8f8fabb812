use async_trait::async_trait;
use uuid::Uuid;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::incoming::use_cases::{
    GetSingleProductError, GetSingleProductUseCase,
};
use crate::catalog::application::ports::outgoing::ProductQuery;

pub struct GetSingleProductService<Q: ProductQuery> {
    query: Q,
}

impl<Q: ProductQuery> GetSingleProductService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q: ProductQuery> GetSingleProductUseCase for GetSingleProductService<Q> {
    async fn execute(&self, product_id: Uuid) -> Result<Product, GetSingleProductError> {
        self.query
            .find_by_id(product_id)
            .await
            .map_err(|e| GetSingleProductError::QueryError(e.to_string()))?
            .ok_or(GetSingleProductError::NotFound)
    }
}
