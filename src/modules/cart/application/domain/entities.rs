use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;
use uuid::Uuid;

/// Upper bound for a single line, matching the `INTEGER` stock column.
pub const MAX_QUANTITY: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product_id: Uuid,
    pub quantity: u32,
}

/// One user's cart. Line order is insertion order; quantities are
/// always positive.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self {
            lines: lines.into_iter().filter(|l| l.quantity > 0).collect(),
        }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<CartLine> {
        self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn product_ids(&self) -> Vec<Uuid> {
        self.lines.iter().map(|l| l.product_id).collect()
    }

    pub fn contains(&self, product_id: Uuid) -> bool {
        self.lines.iter().any(|l| l.product_id == product_id)
    }

    /// Units of `product_id` already in the cart, zero when absent.
    pub fn quantity_of(&self, product_id: Uuid) -> u32 {
        self.lines
            .iter()
            .find(|l| l.product_id == product_id)
            .map_or(0, |l| l.quantity)
    }

    /// Adds to an existing line or appends a new one.
    pub fn add(&mut self, product_id: Uuid, quantity: Quantity) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity = line.quantity.saturating_add(quantity.get()).min(MAX_QUANTITY),
            None => self.lines.push(CartLine {
                product_id,
                quantity: quantity.get(),
            }),
        }
    }

    /// Overwrites an existing line. Returns false when the product is not
    /// in the cart.
    pub fn set(&mut self, product_id: Uuid, quantity: Quantity) -> bool {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => {
                line.quantity = quantity.get();
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: Uuid) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id != product_id);
        self.lines.len() != before
    }

    /// Drops lines whose product is not in `existing`. Returns how many
    /// were dropped.
    pub fn retain_existing(&mut self, existing: &HashSet<Uuid>) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| existing.contains(&l.product_id));
        before - self.lines.len()
    }
}

/// A strictly positive quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quantity(u32);

impl Quantity {
    pub const ONE: Quantity = Quantity(1);

    pub fn new(units: u32) -> Option<Self> {
        (1..=MAX_QUANTITY).contains(&units).then_some(Self(units))
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QuantityError {
    #[error("Quantity must be a whole number")]
    NotAnInteger,

    #[error("Quantity must be greater than zero")]
    NotPositive,

    #[error("Quantity cannot be negative")]
    Negative,

    #[error("Quantity is too large")]
    TooLarge,
}

/// Reads a non-negative whole number from a JSON number or a numeric
/// string (`2`, `"2"`, `2.0`).
pub fn coerce_quantity(value: &Value) -> Result<u32, QuantityError> {
    let units: i64 = match value {
        Value::Number(n) => match (n.as_i64(), n.as_f64()) {
            (Some(i), _) => i,
            (None, Some(f)) if f.fract() == 0.0 && f.abs() < 1e18 => f as i64,
            _ => return Err(QuantityError::NotAnInteger),
        },
        Value::String(s) => s
            .trim()
            .parse::<i64>()
            .map_err(|_| QuantityError::NotAnInteger)?,
        _ => return Err(QuantityError::NotAnInteger),
    };

    if units < 0 {
        return Err(QuantityError::Negative);
    }
    u32::try_from(units)
        .ok()
        .filter(|u| *u <= MAX_QUANTITY)
        .ok_or(QuantityError::TooLarge)
}

/// Like [`coerce_quantity`] but rejects zero. An absent value means one.
pub fn coerce_positive_quantity(value: Option<&Value>) -> Result<Quantity, QuantityError> {
    match value {
        None | Some(Value::Null) => Ok(Quantity::ONE),
        Some(v) => {
            let units = coerce_quantity(v)?;
            Quantity::new(units).ok_or(QuantityError::NotPositive)
        }
    }
}
