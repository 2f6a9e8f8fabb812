pub mod catalog_use_cases;
pub mod domain;
pub mod image_claims;
pub mod ports;
pub mod service;
