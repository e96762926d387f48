//! CSV export of orders.
//!
//! Fields are quoted per RFC 4180 when they contain a comma, a double quote
//! or a line break, so customer and package names can't shift columns.

use crate::types::Order;
use chrono::NaiveDate;

/// Fixed header row.
pub const CSV_HEADER: &str = "ID Pesanan,Tanggal,Pelanggan,Paket,Berat (kg),Total (Rp),Status";

/// A rendered export, ready to save.
#[derive(Clone, Debug, PartialEq)]
pub struct CsvExport {
    pub file_name: String,
    pub content: String,
}

/// `laporan_<start>_<end>.csv` with ISO dates.
pub fn export_file_name(start: NaiveDate, end: NaiveDate) -> String {
    format!(
        "laporan_{}_{}.csv",
        start.format("%Y-%m-%d"),
        end.format("%Y-%m-%d")
    )
}

/// Render orders as CSV: header, then one line per order, each `\n`-terminated.
pub fn render_orders_csv(orders: &[Order]) -> String {
    let mut out = String::with_capacity(CSV_HEADER.len() + 1 + orders.len() * 64);
    out.push_str(CSV_HEADER);
    out.push('\n');

    for order in orders {
        let date = order.created_at.0.format("%-d/%-m/%Y").to_string();
        let fields = [
            escape(&order.id),
            escape(&date),
            escape(&order.customer_name),
            escape(&order.package_name),
            order.weight.to_string(),
            order.total_cost.to_string(),
            escape(order.status.label()),
        ];
        out.push_str(&fields.join(","));
        out.push('\n');
    }

    out
}

fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
