use crate::checkout::application::domain::receipt::money;
use crate::checkout::application::domain::Receipt;

pub const PURCHASE_SUBJECT: &str = "Purchase confirmation";

const CELL: &str = "padding: 12px; border-bottom: 1px solid #e5e7eb;";

/// HTML summary of a purchase: one table row per product and the total.
pub fn render_purchase_email(recipient: &str, receipt: &Receipt) -> String {
    let rows: String = receipt
        .rows
        .iter()
        .map(|row| {
            format!(
                "<tr><td style=\"{CELL}\">{name}</td>\
                 <td style=\"{CELL} text-align: center;\">{qty}</td>\
                 <td style=\"{CELL} text-align: right;\">${price}</td>\
                 <td style=\"{CELL} text-align: right; font-weight: 600;\">${subtotal}</td></tr>",
                name = escape_html(&row.name),
                qty = row.quantity,
                price = money(row.unit_price),
                subtotal = money(row.subtotal),
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="UTF-8"><title>{PURCHASE_SUBJECT}</title></head>
<body style="margin: 0; padding: 0; font-family: Arial, sans-serif; background-color: #f3f4f6;">
<div style="max-width: 600px; margin: 0 auto; background-color: #ffffff; padding: 30px;">
<h1 style="color: #374151;">Thank you for your purchase</h1>
<p>Hello <strong>{recipient}</strong>, your order has been processed.</p>
<table style="width: 100%; border-collapse: collapse;">
<thead><tr>
<th style="{CELL} text-align: left;">Product</th>
<th style="{CELL} text-align: center;">Qty</th>
<th style="{CELL} text-align: right;">Price</th>
<th style="{CELL} text-align: right;">Subtotal</th>
</tr></thead>
<tbody>{rows}</tbody>
</table>
<p style="text-align: right; font-size: 18px;">Total: <strong>${total}</strong></p>
</div>
</body>
</html>"#,
        recipient = escape_html(recipient),
        total = money(receipt.total),
    )
}

fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
