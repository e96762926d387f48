//! Repository: typed CRUD, lookups and aggregate reads over the four collections.

mod entity;
mod table;

pub use entity::Entity;
pub use table::Table;

use crate::error::Result;
use crate::records::RecordStore;
use crate::types::{Order, OrderStatus, Package, PaymentStatus, Role, Transaction, User};
use std::sync::Arc;

/// Entry point for all record access.
///
/// Holds an injected [`RecordStore`]; there is no global instance.
#[derive(Clone)]
pub struct Repository {
    records: Arc<RecordStore>,
}

impl Repository {
    pub fn new(records: Arc<RecordStore>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &RecordStore {
        &self.records
    }

    pub fn users(&self) -> Table<'_, User> {
        Table::new(&self.records)
    }

    pub fn packages(&self) -> Table<'_, Package> {
        Table::new(&self.records)
    }

    pub fn orders(&self) -> Table<'_, Order> {
        Table::new(&self.records)
    }

    pub fn transactions(&self) -> Table<'_, Transaction> {
        Table::new(&self.records)
    }

    // --- Aggregates ---

    /// Sum of `amount` over paid transactions.
    pub fn total_revenue(&self) -> Result<f64> {
        Ok(self
            .transactions()
            .get_all()?
            .iter()
            .filter(|t| t.payment_status == PaymentStatus::Paid)
            .map(|t| t.amount)
            .sum())
    }

    pub fn total_orders(&self) -> Result<usize> {
        self.orders().count()
    }

    /// Number of users with the customer role.
    pub fn total_customers(&self) -> Result<usize> {
        Ok(self.users().customers()?.len())
    }

    pub fn orders_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        self.orders().get_by_status(status)
    }
}

impl Table<'_, User> {
    /// First user with this username. Uniqueness is not enforced here.
    pub fn get_by_username(&self, username: &str) -> Result<Option<User>> {
        self.find(|u| u.username == username)
    }

    /// Users with the customer role.
    pub fn customers(&self) -> Result<Vec<User>> {
        self.filter(|u| u.role == Role::Customer)
    }
}

impl Table<'_, Order> {
    pub fn get_by_customer_id(&self, customer_id: &str) -> Result<Vec<Order>> {
        self.filter(|o| o.customer_id == customer_id)
    }

    pub fn get_by_status(&self, status: OrderStatus) -> Result<Vec<Order>> {
        self.filter(|o| o.status == status)
    }
}

impl Table<'_, Transaction> {
    pub fn get_by_customer_id(&self, customer_id: &str) -> Result<Vec<Transaction>> {
        self.filter(|t| t.customer_id == customer_id)
    }

    /// First transaction for this order. Duplicates are ignored.
    pub fn get_by_order_id(&self, order_id: &str) -> Result<Option<Transaction>> {
        self.find(|t| t.order_id == order_id)
    }
}
