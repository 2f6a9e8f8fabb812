pub mod in_memory_cart_store;
pub mod redis_cart_store;
