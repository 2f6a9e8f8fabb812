use async_trait::async_trait;
use deadpool_redis::{redis::AsyncCommands, Pool};
use std::sync::Arc;
use uuid::Uuid;

use crate::cart::application::domain::entities::{Cart, CartLine};
use crate::cart::application::ports::outgoing::{CartStore, CartStoreError};

/// Carts shared across instances through Redis.
///
/// ```text
/// cart:{user_id} -> JSON array of {"productId", "quantity"}
/// ```
///
/// Keys carry no TTL; an empty cart deletes its key.
#[derive(Clone)]
pub struct RedisCartStore {
    pool: Arc<Pool>,
}

impl RedisCartStore {
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    fn key(user_id: Uuid) -> String {
        format!("cart:{user_id}")
    }

    async fn get_conn(&self) -> Result<deadpool_redis::Connection, CartStoreError> {
        self.pool
            .get()
            .await
            .map_err(|e| CartStoreError::Backend(format!("Pool error: {e}")))
    }
}

fn backend(e: deadpool_redis::redis::RedisError) -> CartStoreError {
    CartStoreError::Backend(e.to_string())
}

#[async_trait]
impl CartStore for RedisCartStore {
    async fn load(&self, user_id: Uuid) -> Result<Cart, CartStoreError> {
        let mut conn = self.get_conn().await?;
        let raw: Option<String> = conn.get(Self::key(user_id)).await.map_err(backend)?;

        match raw {
            None => Ok(Cart::default()),
            Some(json) => serde_json::from_str::<Vec<CartLine>>(&json)
                .map(Cart::from_lines)
                .map_err(|e| CartStoreError::Corrupt(format!("cart {user_id}: {e}"))),
        }
    }

    async fn save(&self, user_id: Uuid, cart: &Cart) -> Result<(), CartStoreError> {
        if cart.is_empty() {
            return self.clear(user_id).await;
        }

        let json = serde_json::to_string(cart.lines())
            .map_err(|e| CartStoreError::Corrupt(e.to_string()))?;
        let mut conn = self.get_conn().await?;
        conn.set::<_, _, ()>(Self::key(user_id), json)
            .await
            .map_err(backend)
    }

    async fn clear(&self, user_id: Uuid) -> Result<(), CartStoreError> {
        let mut conn = self.get_conn().await?;
        conn.del::<_, ()>(Self::key(user_id)).await.map_err(backend)
    }

    async fn ping(&self) -> Result<(), CartStoreError> {
        let mut conn = self.get_conn().await?;
        deadpool_redis::redis::cmd("PING")
            .query_async::<String>(&mut *conn)
            .await
            .map(|_| ())
            .map_err(backend)
    }
}
