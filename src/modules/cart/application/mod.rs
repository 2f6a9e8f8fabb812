pub mod cart_locks;
pub mod cart_use_cases;
pub mod domain;
pub mod ports;
pub mod service;
