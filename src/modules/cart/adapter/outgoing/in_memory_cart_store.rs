use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::cart::application::domain::entities::Cart;
use crate::cart::application::ports::outgoing::{CartStore, CartStoreError};

/// Process-local carts. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<Uuid, Cart>>,
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CartStore for InMemoryCartStore {
    async fn load(&self, user_id: Uuid) -> Result<Cart, CartStoreError> {
        Ok(self
            .carts
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default())
    }

    async fn save(&self, user_id: Uuid, cart: &Cart) -> Result<(), CartStoreError> {
        let mut carts = self.carts.write().await;
        if cart.is_empty() {
            carts.remove(&user_id);
        } else {
            carts.insert(user_id, cart.clone());
        }
        Ok(())
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), CartStoreError> {
        self.carts.write().await.remove(&user_id);
        Ok(())
    }

    async fn ping(&self) -> Result<(), CartStoreError> {
        Ok(())
    }
}
