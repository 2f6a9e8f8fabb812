pub mod checkout;

pub use checkout::{Buyer, CheckoutError, CheckoutOutcome, CheckoutUseCase};
