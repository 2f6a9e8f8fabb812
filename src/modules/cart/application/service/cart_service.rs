use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info};
use uuid::Uuid;

use crate::cart::application::cart_locks::CartLocks;
use crate::cart::application::domain::entities::{Cart, CartLine, Quantity};
use crate::cart::application::ports::incoming::use_cases::{
    AddToCartUseCase, CartError, GetCartUseCase, RemoveFromCartUseCase, SetCartQuantityUseCase,
};
use crate::cart::application::ports::outgoing::{CartStore, CartStoreError};
use crate::catalog::application::ports::outgoing::{ProductQuery, ProductQueryError};

impl From<CartStoreError> for CartError {
    fn from(e: CartStoreError) -> Self {
        CartError::StoreError(e.to_string())
    }
}

impl From<ProductQueryError> for CartError {
    fn from(e: ProductQueryError) -> Self {
        CartError::QueryError(e.to_string())
    }
}

/// Loads the user's cart and drops lines whose product was deleted,
/// persisting the cleaned cart when anything changed. Callers hold the
/// user's `CartLocks` guard.
pub async fn load_reconciled<Q>(
    store: &dyn CartStore,
    products: &Q,
    user_id: Uuid,
) -> Result<Cart, CartError>
where
    Q: ProductQuery + ?Sized,
{
    let mut cart = store.load(user_id).await?;
    if cart.is_empty() {
        return Ok(cart);
    }

    let existing = products.find_existing_ids(&cart.product_ids()).await?;
    let dropped = cart.retain_existing(&existing);
    if dropped > 0 {
        info!(user_id = %user_id, dropped, "Removed deleted products from cart");
        store.save(user_id, &cart).await?;
    }

    Ok(cart)
}

/// Implements every cart operation over an injected store.
pub struct CartService<Q: ProductQuery> {
    store: Arc<dyn CartStore>,
    products: Q,
    locks: Arc<CartLocks>,
}

impl<Q: ProductQuery> CartService<Q> {
    pub fn new(store: Arc<dyn CartStore>, products: Q, locks: Arc<CartLocks>) -> Self {
        Self {
            store,
            products,
            locks,
        }
    }
}

#[async_trait]
impl<Q: ProductQuery> GetCartUseCase for CartService<Q> {
    async fn execute(&self, user_id: Uuid) -> Result<Vec<CartLine>, CartError> {
        let _guard = self.locks.lock(user_id).await;
        let cart = load_reconciled(self.store.as_ref(), &self.products, user_id).await?;
        Ok(cart.into_lines())
    }
}

#[async_trait]
impl<Q: ProductQuery> AddToCartUseCase for CartService<Q> {
    async fn execute(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: Quantity,
    ) -> Result<Vec<CartLine>, CartError> {
        let _guard = self.locks.lock(user_id).await;

        let product = self
            .products
            .find_by_id(product_id)
            .await?
            .ok_or(CartError::ProductNotFound)?;

        let mut cart = self.store.load(user_id).await?;
        let in_cart = cart.quantity_of(product_id);
        let wanted = u64::from(in_cart) + u64::from(quantity.get());
        if wanted > u64::try_from(product.stock).unwrap_or(0) {
            return Err(CartError::InsufficientStock {
                product_name: product.name,
                available: product.stock,
                in_cart,
            });
        }

        cart.add(product_id, quantity);
        self.store.save(user_id, &cart).await?;
        debug!(user_id = %user_id, product_id = %product_id, quantity = quantity.get(), "Added to cart");

        Ok(cart.into_lines())
    }
}

#[async_trait]
impl<Q: ProductQuery> SetCartQuantityUseCase for CartService<Q> {
    async fn execute(
        &self,
        user_id: Uuid,
        product_id: Uuid,
        quantity: u32,
    ) -> Result<Vec<CartLine>, CartError> {
        let _guard = self.locks.lock(user_id).await;

        let mut cart = self.store.load(user_id).await?;
        if !cart.contains(product_id) {
            return Err(CartError::CartItemNotFound);
        }

        let Some(quantity) = Quantity::new(quantity) else {
            cart.remove(product_id);
            self.store.save(user_id, &cart).await?;
            return Ok(cart.into_lines());
        };

        let Some(product) = self.products.find_by_id(product_id).await? else {
            cart.remove(product_id);
            self.store.save(user_id, &cart).await?;
            return Err(CartError::ProductNotFound);
        };

        if i64::from(quantity.get()) > i64::from(product.stock) {
            return Err(CartError::InsufficientStock {
                product_name: product.name,
                available: product.stock,
                in_cart: cart.quantity_of(product_id),
            });
        }

        cart.set(product_id, quantity);
        self.store.save(user_id, &cart).await?;
        Ok(cart.into_lines())
    }
}

#[async_trait]
impl<Q: ProductQuery> RemoveFromCartUseCase for CartService<Q> {
    async fn execute(&self, user_id: Uuid, product_id: Uuid) -> Result<Vec<CartLine>, CartError> {
        let _guard = self.locks.lock(user_id).await;

        let mut cart = self.store.load(user_id).await?;
        if cart.remove(product_id) {
            self.store.save(user_id, &cart).await?;
        }
        Ok(cart.into_lines())
    }
}
