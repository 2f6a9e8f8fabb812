pub mod cart_service;

pub use cart_service::{load_reconciled, CartService};
