use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use utoipa::ToSchema;

use crate::catalog::application::domain::entities::Product;

/// Public path prefix the image directory is served under.
pub const IMAGES_PATH: &str = "/images";

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    #[schema(example = "123e4567-e89b-12d3-a456-426614174000")]
    pub id: String,

    #[schema(example = "Yerba Mate 1kg")]
    pub name: String,

    #[schema(value_type = f64, example = 10.5)]
    pub price: Decimal,

    #[schema(example = 12)]
    pub stock: i32,

    /// Stored file name
    pub image: Option<String>,

    /// Path the image is served from
    #[schema(example = "/images/0b7c2d1e-6a7e-4d6f-9d1a-2f1c3e4b5a69.png")]
    pub image_url: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Product> for ProductResponse {
    fn from(p: Product) -> Self {
        let image_url = p.image.as_ref().map(|f| format!("{IMAGES_PATH}/{f}"));
        Self {
            id: p.id.to_string(),
            name: p.name,
            price: p.price,
            stock: p.stock,
            image: p.image,
            image_url,
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize, ToSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductResponse>,
}

#[derive(Serialize, ToSchema)]
pub struct SingleProductResponse {
    pub product: ProductResponse,
}
