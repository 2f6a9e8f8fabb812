use async_trait::async_trait;
use uuid::Uuid;

use crate::cart::application::domain::entities::Cart;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartStoreError {
    #[error("Cart store unavailable: {0}")]
    Backend(String),

    #[error("Stored cart is unreadable: {0}")]
    Corrupt(String),
}

/// Where carts live between requests. Callers serialize access per user
/// with `CartLocks`; implementations only need atomic single calls.
#[async_trait]
pub trait CartStore: Send + Sync {
    /// The user's cart, empty when none was saved.
    async fn load(&self, user_id: Uuid) -> Result<Cart, CartStoreError>;

    /// Replaces the stored cart. Saving an empty cart deletes it.
    async fn save(&self, user_id: Uuid, cart: &Cart) -> Result<(), CartStoreError>;

    async fn clear(&self, user_id: Uuid) -> Result<(), CartStoreError>;

    /// Round trip to the backend for readiness checks.
    async fn ping(&self) -> Result<(), CartStoreError>;
}
