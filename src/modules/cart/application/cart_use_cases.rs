use std::sync::Arc;

use crate::cart::application::ports::incoming::use_cases::{
    AddToCartUseCase, GetCartUseCase, RemoveFromCartUseCase, SetCartQuantityUseCase,
};

#[derive(Clone)]
pub struct CartUseCases {
    pub get: Arc<dyn GetCartUseCase + Send + Sync>,
    pub add: Arc<dyn AddToCartUseCase + Send + Sync>,
    pub set_quantity: Arc<dyn SetCartQuantityUseCase + Send + Sync>,
    pub remove: Arc<dyn RemoveFromCartUseCase + Send + Sync>,
}

impl CartUseCases {
    /// Wires one service behind every cart operation.
    pub fn from_service<S>(service: Arc<S>) -> Self
    where
        S: GetCartUseCase
            + AddToCartUseCase
            + SetCartQuantityUseCase
            + RemoveFromCartUseCase
            + Send
            + Sync
            + 'static,
    {
        Self {
            get: service.clone(),
            add: service.clone(),
            set_quantity: service.clone(),
            remove: service,
        }
    }
}
