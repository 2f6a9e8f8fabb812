use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::cart::application::domain::entities::CartLine;

#[derive(Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartRequest {
    /// Also accepted as `id`
    #[serde(alias = "id")]
    #[schema(value_type = String, example = "123e4567-e89b-12d3-a456-426614174000")]
    pub product_id: Option<Uuid>,

    /// Positive whole number or numeric string, defaults to 1
    #[schema(value_type = Option<u32>, example = 2)]
    pub quantity: Option<Value>,
}

#[derive(Deserialize, ToSchema)]
pub struct SetQuantityRequest {
    /// Zero removes the line
    #[schema(value_type = u32, example = 3)]
    pub quantity: Option<Value>,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CartLineDto {
    pub product_id: String,
    pub quantity: u32,
}

#[derive(Serialize, ToSchema)]
pub struct CartResponse {
    pub cart: Vec<CartLineDto>,
}

impl From<Vec<CartLine>> for CartResponse {
    fn from(lines: Vec<CartLine>) -> Self {
        Self {
            cart: lines
                .into_iter()
                .map(|l| CartLineDto {
                    product_id: l.product_id.to_string(),
                    quantity: l.quantity,
                })
                .collect(),
        }
    }
}
