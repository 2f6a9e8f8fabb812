use async_trait::async_trait;
use uuid::Uuid;

use super::CartError;
use crate::cart::application::domain::entities::CartLine;

#[async_trait]
pub trait GetCartUseCase: Send + Sync {
    /// Lines still backed by an existing product.
    async fn execute(&self, user_id: Uuid) -> Result<Vec<CartLine>, CartError>;
}
