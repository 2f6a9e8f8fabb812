use async_trait::async_trait;
use uuid::Uuid;

use super::CartError;
use crate::cart::application::domain::entities::{CartLine, Quantity};

#[async_trait]
pub trait AddToCartUseCase: Send + Sync {
    async fn execute(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Vec<CartLine>, CartError>;
}
