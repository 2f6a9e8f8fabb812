pub mod checkout;

pub use checkout::{checkout_handler, __path_checkout_handler, DegradedCheckoutResponse};
