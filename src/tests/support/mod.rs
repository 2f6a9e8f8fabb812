pub mod app_state_builder;
pub mod auth_helper;
pub mod multipart;
pub mod stubs;
