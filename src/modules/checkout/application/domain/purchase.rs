use rust_decimal::Decimal;
use std::collections::HashMap;
use uuid::Uuid;

use crate::cart::application::domain::entities::CartLine;
use crate::catalog::application::domain::entities::Product;

/// One validated cart line, priced from the locked product row.
#[derive(Debug, Clone, PartialEq)]
pub struct PurchaseLine {
    pub product_id: Uuid,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    /// Stock before this purchase.
    pub stock: i32,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PurchaseViolation {
    #[error("Some products are no longer available: {}", list_ids(.0))]
    Unavailable(Vec<Uuid>),

    #[error("Invalid quantity for product {product_name}")]
    InvalidQuantity { product_name: String },

    #[error("Insufficient stock for {product_name}. Available: {available}")]
    InsufficientStock {
        product_name: String,
        available: i32,
        requested: u32,
    },
}

fn list_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(|id| format!("ID {id}"))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Checks every cart line against the current product rows.
///
/// Lines are visited in cart order. A bad quantity or short stock stops
/// at the first offending line; missing products are collected and
/// reported together once every present line has passed.
pub fn plan_purchase(
    lines: &[CartLine],
    products: &HashMap<Uuid, Product>,
) -> Result<Vec<PurchaseLine>, PurchaseViolation> {
    let mut planned = Vec::with_capacity(lines.len());
    let mut missing = Vec::new();

    for line in lines {
        let Some(product) = products.get(&line.product_id) else {
            missing.push(line.product_id);
            continue;
        };

        if line.quantity == 0 {
            return Err(PurchaseViolation::InvalidQuantity {
                product_name: product.name.clone(),
            });
        }

        let fits = i32::try_from(line.quantity).is_ok_and(|q| q <= product.stock);
        if !fits {
            return Err(PurchaseViolation::InsufficientStock {
                product_name: product.name.clone(),
                available: product.stock,
                requested: line.quantity,
            });
        }

        planned.push(PurchaseLine {
            product_id: product.id,
            name: product.name.clone(),
            unit_price: product.price,
            quantity: line.quantity,
            stock: product.stock,
        });
    }

    if !missing.is_empty() {
        return Err(PurchaseViolation::Unavailable(missing));
    }

    Ok(planned)
}
