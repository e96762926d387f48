//! Admin and customer dashboard figures.

use crate::reports::search::newest_first;
use crate::types::{Order, PaymentStatus, Role, Transaction, User};
use serde::Serialize;

/// Shop-wide totals shown to administrators.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminDashboard {
    pub total_customers: usize,
    pub total_orders: usize,
    /// Sum over paid transactions.
    pub total_revenue: f64,
    /// Orders queued or in process.
    pub active_orders: usize,
    /// Latest transactions by date, newest first.
    pub recent_transactions: Vec<Transaction>,
}

impl AdminDashboard {
    pub fn compute(
        users: &[User],
        orders: &[Order],
        transactions: &[Transaction],
        recent_limit: usize,
    ) -> Self {
        let mut recent = transactions.to_vec();
        recent.sort_by(|a, b| b.date.cmp(&a.date));
        recent.truncate(recent_limit);

        Self {
            total_customers: users.iter().filter(|u| u.role == Role::Customer).count(),
            total_orders: orders.len(),
            total_revenue: paid_total(transactions),
            active_orders: orders.iter().filter(|o| o.status.is_active()).count(),
            recent_transactions: recent,
        }
    }
}

/// One customer's own figures.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDashboard {
    pub total_orders: usize,
    pub ongoing_orders: usize,
    pub completed_orders: usize,
    /// Sum over this customer's paid transactions.
    pub total_spent: f64,
    pub recent_orders: Vec<Order>,
}

impl CustomerDashboard {
    /// `orders` and `transactions` must already be narrowed to one customer.
    pub fn compute(orders: &[Order], transactions: &[Transaction], recent_limit: usize) -> Self {
        let mut recent = newest_first(orders.to_vec());
        recent.truncate(recent_limit);

        Self {
            total_orders: orders.len(),
            ongoing_orders: orders.iter().filter(|o| o.status.is_active()).count(),
            completed_orders: orders.iter().filter(|o| o.status.is_completed()).count(),
            total_spent: paid_total(transactions),
            recent_orders: recent,
        }
    }
}

fn paid_total(transactions: &[Transaction]) -> f64 {
    transactions
        .iter()
        .filter(|t| t.payment_status == PaymentStatus::Paid)
        .map(|t| t.amount)
        .sum()
}
