use rust_decimal::{Decimal, RoundingStrategy};

use super::purchase::PurchaseLine;

#[derive(Debug, Clone, PartialEq)]
pub struct ReceiptRow {
    pub name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub subtotal: Decimal,
}

/// Priced summary of a committed purchase, shared by the CSV ticket and
/// the confirmation email.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub rows: Vec<ReceiptRow>,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ReceiptError {
    #[error("Amount overflow while pricing {0}")]
    Overflow(String),
}

impl Receipt {
    pub fn from_purchase(lines: &[PurchaseLine]) -> Result<Self, ReceiptError> {
        let mut rows = Vec::with_capacity(lines.len());
        let mut total = Decimal::ZERO;

        for line in lines {
            let subtotal = line
                .unit_price
                .checked_mul(Decimal::from(line.quantity))
                .ok_or_else(|| ReceiptError::Overflow(line.name.clone()))?;
            total = total
                .checked_add(subtotal)
                .ok_or_else(|| ReceiptError::Overflow(line.name.clone()))?;

            rows.push(ReceiptRow {
                name: line.name.clone(),
                quantity: line.quantity,
                unit_price: line.unit_price,
                subtotal,
            });
        }

        Ok(Self { rows, total })
    }
}

/// Two decimals, half away from zero.
pub fn money(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn line(name: &str, price: Decimal, quantity: u32) -> PurchaseLine {
        PurchaseLine {
            product_id: Uuid::new_v4(),
            name: name.to_string(),
            unit_price: price,
            quantity,
            stock: 100,
        }
    }

    #[test]
    fn totals_subtotals() {
        let receipt = Receipt::from_purchase(&[
            line("A", Decimal::new(1050, 2), 2),
            line("B", Decimal::new(199, 2), 3),
        ])
        .unwrap();

        assert_eq!(receipt.rows[0].subtotal, Decimal::new(2100, 2));
        assert_eq!(receipt.rows[1].subtotal, Decimal::new(597, 2));
        assert_eq!(receipt.total, Decimal::new(2697, 2));
    }

    #[test]
    fn overflow_is_an_error() {
        let err = Receipt::from_purchase(&[line("Huge", Decimal::MAX, 2)]).unwrap_err();
        assert_eq!(err, ReceiptError::Overflow("Huge".to_string()));
    }

    #[test]
    fn money_pads_and_rounds_half_away_from_zero() {
        assert_eq!(money(Decimal::new(21, 0)), "21.00");
        assert_eq!(money(Decimal::new(105, 1)), "10.50");
        assert_eq!(money(Decimal::new(1005, 3)), "1.01");
        assert_eq!(money(Decimal::new(-1005, 3)), "-1.01");
    }
}
