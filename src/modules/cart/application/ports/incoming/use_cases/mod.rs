pub mod add_to_cart;
pub mod cart_error;
pub mod get_cart;
pub mod remove_from_cart;
pub mod set_cart_quantity;

pub use add_to_cart::AddToCartUseCase;
pub use cart_error::CartError;
pub use get_cart::GetCartUseCase;
pub use remove_from_cart::RemoveFromCartUseCase;
pub use set_cart_quantity::SetCartQuantityUseCase;
