//! Order receipt renderer

use shared::models::OrderWithCustomer;
use shared::util::format_number;

const TITLE: &str = "LAUNDRY RECEIPT";
const FOOTER: &str = "Thank you!";

/// Narrowest width that still fits a label and a value
const MIN_WIDTH: usize = 20;

/// Receipt renderer
///
/// Common widths:
/// - 58mm paper: 32 characters
/// - 80mm paper: 48 characters
#[derive(Debug, Clone, Copy)]
pub struct ReceiptRenderer {
    width: usize,
}

impl ReceiptRenderer {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(MIN_WIDTH),
        }
    }

    /// Render an order receipt as plain text
    pub fn render(&self, o: &OrderWithCustomer) -> String {
        let order = &o.order;
        let mut lines = Vec::new();

        // Header
        lines.push(self.center(TITLE));
        lines.push("=".repeat(self.width));
        lines.push(self.pair("No", &format!("#{}", order.id)));
        lines.push(self.pair("Date", &order.created_at.format("%Y-%m-%d %H:%M").to_string()));
        lines.push(self.pair("Customer", non_empty(o.customer_name.as_deref())));
        lines.push(self.pair("Phone", non_empty(o.customer_phone.as_deref())));
        lines.push("-".repeat(self.width));

        // Amounts
        lines.push(self.pair("Weight", &format!("{} kg", format_number(order.weight))));
        lines.push(self.pair("Price/kg", &format!("Rp {}", format_number(order.price_per_kg))));
        lines.push(self.pair("Total", &format!("Rp {}", format_number(order.total))));
        lines.push(self.pair("Status", order.status.as_str()));
        if let Some(due) = order.due_date.as_deref() {
            lines.push(self.pair("Due", due));
        }
        if !order.note.is_empty() {
            lines.push(format!("Note: {}", order.note));
        }

        // Footer
        lines.push("-".repeat(self.width));
        lines.push(self.center(FOOTER));

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Label on the left, value flush right
    fn pair(&self, label: &str, value: &str) -> String {
        let used = label.chars().count() + value.chars().count();
        let gap = self.width.saturating_sub(used).max(1);
        format!("{label}{}{value}", " ".repeat(gap))
    }

    fn center(&self, text: &str) -> String {
        let pad = self.width.saturating_sub(text.chars().count()) / 2;
        format!("{}{text}", " ".repeat(pad))
    }
}

fn non_empty(value: Option<&str>) -> &str {
    value.filter(|v| !v.is_empty()).unwrap_or("-")
}
