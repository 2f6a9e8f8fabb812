use chrono::{DateTime, Utc};

use super::receipt::{money, Receipt};

const HEADER: [&str; 4] = ["cantidad", "nombre", "precio_unitario", "subtotal"];

/// CSV purchase ticket returned to the buyer as a download.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticket {
    pub filename: String,
    pub content: String,
}

impl Ticket {
    pub fn render(receipt: &Receipt, issued_at: DateTime<Utc>) -> Self {
        let mut rows = Vec::with_capacity(receipt.rows.len() + 2);
        rows.push(csv_row(&HEADER.map(String::from)));

        for row in &receipt.rows {
            rows.push(csv_row(&[
                row.quantity.to_string(),
                row.name.clone(),
                money(row.unit_price),
                money(row.subtotal),
            ]));
        }

        rows.push(csv_row(&[
            String::new(),
            "TOTAL".to_string(),
            String::new(),
            money(receipt.total),
        ]));

        Self {
            filename: filename_for(issued_at),
            content: rows.join("\r\n"),
        }
    }
}

/// `ticket-2024-05-01T12-30-00-123Z.csv`
pub fn filename_for(issued_at: DateTime<Utc>) -> String {
    format!("ticket-{}.csv", issued_at.format("%Y-%m-%dT%H-%M-%S-%3fZ"))
}

fn csv_row(fields: &[String]) -> String {
    fields
        .iter()
        .map(|f| csv_field(f))
        .collect::<Vec<_>>()
        .join(",")
}

fn csv_field(field: &str) -> String {
    if field.contains([',', '"']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
