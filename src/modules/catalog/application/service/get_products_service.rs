use async_trait::async_trait;

use crate::catalog::application::domain::entities::Product;
use crate::catalog::application::ports::incoming::use_cases::{
    GetProductsError, GetProductsUseCase,
};
use crate::catalog::application::ports::outgoing::ProductQuery;

pub struct GetProductsService<Q: ProductQuery> {
    query: Q,
}

impl<Q: ProductQuery> GetProductsService<Q> {
    pub fn new(query: Q) -> Self {
        Self { query }
    }
}

#[async_trait]
impl<Q: ProductQuery> GetProductsUseCase for GetProductsService<Q> {
    async fn execute(&self) -> Result<Vec<Product>, GetProductsError> {
        self.query
            .list_products()
            .await
            .map_err(|e| GetProductsError::QueryError(e.to_string()))
    }
}
