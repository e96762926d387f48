//! Aggregation and reporting.
//!
//! Everything here is a pure function over record snapshots, recomputed from
//! scratch on each call. Callers fetch the snapshots from the repository.

mod csv;
mod dashboard;
mod range;
mod ranking;
mod search;

pub use csv::{export_file_name, render_orders_csv, CsvExport, CSV_HEADER};
pub use dashboard::{AdminDashboard, CustomerDashboard};
pub use range::{DateRange, Dated};
pub use ranking::{top_packages, PackageStats, ReportSummary};
pub use search::{newest_first, search_customers, search_orders};
