use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;
use uuid::Uuid;

pub const MAX_PRODUCT_NAME_LEN: usize = 255;

/// Largest value a `NUMERIC(12,2)` column holds.
pub fn max_price() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub price: Decimal,
    pub stock: i32,
    /// File name inside the image directory.
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProductValidationError {
    #[error("Product name cannot be empty")]
    EmptyName,

    #[error("Product name cannot exceed {MAX_PRODUCT_NAME_LEN} characters")]
    NameTooLong,

    #[error("Price must be a number: {0}")]
    InvalidPrice(String),

    #[error("Price must be between 0 and 9999999999.99")]
    PriceOutOfRange,

    #[error("Stock must be a whole number: {0}")]
    InvalidStock(String),

    #[error("Stock cannot be negative")]
    NegativeStock,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductName(String);

impl ProductName {
    pub fn new(raw: &str) -> Result<Self, ProductValidationError> {
        let name = raw.trim();
        if name.is_empty() {
            return Err(ProductValidationError::EmptyName);
        }
        if name.chars().count() > MAX_PRODUCT_NAME_LEN {
            return Err(ProductValidationError::NameTooLong);
        }
        Ok(Self(name.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Non-negative amount with at most two decimals, rounded half away
/// from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Price(Decimal);

impl Price {
    pub fn new(amount: Decimal) -> Result<Self, ProductValidationError> {
        let mut amount = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        amount.rescale(2);
        if amount < Decimal::ZERO || amount > max_price() {
            return Err(ProductValidationError::PriceOutOfRange);
        }
        Ok(Self(amount))
    }

    pub fn parse(raw: &str) -> Result<Self, ProductValidationError> {
        let raw = raw.trim();
        let amount = Decimal::from_str(raw)
            .or_else(|_| Decimal::from_scientific(raw))
            .map_err(|_| ProductValidationError::InvalidPrice(raw.to_string()))?;
        Self::new(amount)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stock(i32);

impl Stock {
    pub fn new(units: i64) -> Result<Self, ProductValidationError> {
        if units < 0 {
            return Err(ProductValidationError::NegativeStock);
        }
        i32::try_from(units)
            .map(Self)
            .map_err(|_| ProductValidationError::InvalidStock(units.to_string()))
    }

    pub fn parse(raw: &str) -> Result<Self, ProductValidationError> {
        let raw = raw.trim();
        let units = raw
            .parse::<i64>()
            .map_err(|_| ProductValidationError::InvalidStock(raw.to_string()))?;
        Self::new(units)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_trimmed_and_bounded() {
        assert_eq!(ProductName::new("  Mate  ").unwrap().as_str(), "Mate");
        assert_eq!(ProductName::new("   "), Err(ProductValidationError::EmptyName));
        assert_eq!(
            ProductName::new(&"a".repeat(MAX_PRODUCT_NAME_LEN + 1)),
            Err(ProductValidationError::NameTooLong)
        );
        assert!(ProductName::new(&"a".repeat(MAX_PRODUCT_NAME_LEN)).is_ok());
    }

    #[test]
    fn price_rounds_to_cents() {
        assert_eq!(Price::parse("10.5").unwrap().value().to_string(), "10.50");
        assert_eq!(Price::parse("0.005").unwrap().value().to_string(), "0.01");
        assert_eq!(Price::parse("2.344").unwrap().value().to_string(), "2.34");
        assert_eq!(Price::parse("0").unwrap().value(), Decimal::ZERO);
    }

    #[test]
    fn price_rejects_garbage_and_negatives() {
        assert!(matches!(
            Price::parse("ten"),
            Err(ProductValidationError::InvalidPrice(_))
        ));
        assert_eq!(
            Price::parse("-1"),
            Err(ProductValidationError::PriceOutOfRange)
        );
        assert_eq!(
            Price::parse("10000000000"),
            Err(ProductValidationError::PriceOutOfRange)
        );
    }

    #[test]
    fn max_price_matches_column_precision() {
        assert_eq!(max_price().to_string(), "9999999999.99");
        assert_eq!(Price::parse("9999999999.99").unwrap().value(), max_price());
    }

    #[test]
    fn stock_must_be_non_negative_integer() {
        assert_eq!(Stock::parse(" 7 ").unwrap().value(), 7);
        assert_eq!(Stock::parse("-1"), Err(ProductValidationError::NegativeStock));
        assert!(matches!(
            Stock::parse("1.5"),
            Err(ProductValidationError::InvalidStock(_))
        ));
        assert!(matches!(
            Stock::new(i64::from(i32::MAX) + 1),
            Err(ProductValidationError::InvalidStock(_))
        ));
    }
}
