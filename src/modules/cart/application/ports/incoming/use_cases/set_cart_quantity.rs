use async_trait::async_trait;
use uuid::Uuid;

use super::CartError;
use crate::cart::application::domain::entities::CartLine;

#[async_trait]
pub trait SetCartQuantityUseCase: Send + Sync {
    /// Zero removes the line.
    async fn execute(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<Vec<CartLine>, CartError>;
}
