#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CartError {
    #[error("Product not found")]
    ProductNotFound,

    #[error("Product is not in the cart")]
    CartItemNotFound,

    #[error("Insufficient stock for {product_name}: {available} available, {in_cart} already in cart")]
    InsufficientStock {
        product_name: String,
        available: i32,
        in_cart: u32,
    },

    #[error("Cart store error: {0}")]
    StoreError(String),

    #[error("Product query error: {0}")]
    QueryError(String),
}
