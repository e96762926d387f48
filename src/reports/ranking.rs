//! Per-package revenue ranking and the operational report summary.

use crate::reports::range::DateRange;
use crate::types::Order;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

/// Orders and revenue for one package.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageStats {
    pub package_id: String,
    /// Package name as snapshotted on the first order seen.
    pub name: String,
    pub orders: usize,
    pub revenue: f64,
}

/// Group orders by package and keep the `limit` highest-revenue groups.
///
/// Revenue is the sum of `total_cost`. Ties keep first-seen order.
pub fn top_packages(orders: &[Order], limit: usize) -> Vec<PackageStats> {
    let mut slots: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<PackageStats> = Vec::new();

    for order in orders {
        match slots.get(order.package_id.as_str()) {
            Some(&i) => {
                stats[i].orders += 1;
                stats[i].revenue += order.total_cost;
            }
            None => {
                slots.insert(&order.package_id, stats.len());
                stats.push(PackageStats {
                    package_id: order.package_id.clone(),
                    name: order.package_name.clone(),
                    orders: 1,
                    revenue: order.total_cost,
                });
            }
        }
    }

    stats.sort_by(|a, b| b.revenue.partial_cmp(&a.revenue).unwrap_or(Ordering::Equal));
    stats.truncate(limit);
    stats
}

/// Operational report over a date range.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_orders: usize,
    /// Sum of `total_cost` over the orders in range, paid or not.
    pub total_revenue: f64,
    /// Distinct customers with at least one order in range.
    pub active_customers: usize,
    pub top_packages: Vec<PackageStats>,
}

impl ReportSummary {
    pub fn compute(orders: &[Order], range: &DateRange, top_limit: usize) -> Self {
        let orders = range.filter(orders);
        let customers: HashSet<&str> = orders.iter().map(|o| o.customer_id.as_str()).collect();

        Self {
            total_orders: orders.len(),
            total_revenue: orders.iter().map(|o| o.total_cost).sum(),
            active_customers: customers.len(),
            top_packages: top_packages(&orders, top_limit),
        }
    }
}
