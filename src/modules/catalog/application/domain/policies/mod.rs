pub mod image_upload_policy;

pub use image_upload_policy::{ImageDedup, ImageRejection, ImageUploadPolicy};
