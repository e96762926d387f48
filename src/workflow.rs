//! Order placement, payment and status changes.
//!
//! Each workflow touches two collections with two independent writes. There
//! is no transaction spanning them: if the process stops in between, an order
//! can exist without its transaction, or a paid transaction can sit next to
//! an order still in the queue.

use crate::clock::{order_id, transaction_id, Clock, IdGenerator};
use crate::error::{Result, StoreError};
use crate::repository::Repository;
use crate::types::{
    Order, OrderPatch, OrderStatus, PaymentMethod, PaymentStatus, Transaction, TransactionPatch,
    User,
};
use std::sync::Arc;

/// What came out of a payment attempt.
#[derive(Clone, Debug, PartialEq)]
pub enum PaymentOutcome {
    /// The transaction is now paid and its order moved to processing.
    Completed(Transaction),
    /// Nothing changed; the transaction was settled earlier.
    AlreadyPaid(Transaction),
    /// No transaction references this order.
    NoTransaction,
}

/// Coupled write sequences over orders and transactions.
pub struct Workflow {
    repo: Repository,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
    turnaround_days: i64,
}

impl Workflow {
    pub fn new(
        repo: Repository,
        clock: Arc<dyn Clock>,
        ids: Arc<IdGenerator>,
        turnaround_days: i64,
    ) -> Self {
        Self {
            repo,
            clock,
            ids,
            turnaround_days,
        }
    }

    /// Place an order for `customer` and create its pending transaction.
    ///
    /// Returns `None` without writing anything if the package doesn't exist.
    /// A weight that is not a positive finite number is rejected up front.
    pub fn place_order(
        &self,
        customer: &User,
        package_id: &str,
        weight: f64,
    ) -> Result<Option<(Order, Transaction)>> {
        if !(weight.is_finite() && weight > 0.0) {
            return Err(StoreError::InvalidOperation(format!(
                "weight must be a positive number, got {weight}"
            )));
        }
        let Some(package) = self.repo.packages().get_by_id(package_id)? else {
            return Ok(None);
        };

        let now = self.clock.now();
        let tick = self.ids.next_tick();
        let total_cost = package.price * weight;

        let order = Order {
            id: order_id(tick),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            package_id: package.id.clone(),
            package_name: package.name.clone(),
            weight,
            total_cost,
            status: OrderStatus::Queued,
            created_at: now,
            updated_at: now,
            estimated_time: now.plus_days(self.turnaround_days),
        };
        self.repo.orders().add(order.clone())?;

        let transaction = Transaction {
            id: transaction_id(tick),
            order_id: order.id.clone(),
            customer_id: customer.id.clone(),
            customer_name: customer.name.clone(),
            amount: total_cost,
            payment_method: String::new(),
            payment_status: PaymentStatus::Pending,
            date: now,
        };
        self.repo.transactions().add(transaction.clone())?;

        tracing::info!(order = %order.id, customer = %customer.id, total_cost, "order placed");
        Ok(Some((order, transaction)))
    }

    /// Pay the transaction attached to `order_id` and start processing the order.
    pub fn complete_payment(&self, order_id: &str, method: PaymentMethod) -> Result<PaymentOutcome> {
        let Some(transaction) = self.repo.transactions().get_by_order_id(order_id)? else {
            return Ok(PaymentOutcome::NoTransaction);
        };
        if transaction.payment_status == PaymentStatus::Paid {
            tracing::warn!(order = order_id, transaction = %transaction.id, "payment already completed");
            return Ok(PaymentOutcome::AlreadyPaid(transaction));
        }

        self.repo.transactions().update(
            &transaction.id,
            TransactionPatch {
                payment_method: Some(method.display_name().to_string()),
                payment_status: Some(PaymentStatus::Paid),
                ..Default::default()
            },
        )?;

        self.repo.orders().update(
            order_id,
            OrderPatch {
                status: Some(OrderStatus::Processing),
                updated_at: Some(self.clock.now()),
                ..Default::default()
            },
        )?;

        tracing::info!(order = order_id, method = method.display_name(), "payment completed");
        let paid = self
            .repo
            .transactions()
            .get_by_id(&transaction.id)?
            .unwrap_or(Transaction {
                payment_method: method.display_name().to_string(),
                payment_status: PaymentStatus::Paid,
                ..transaction
            });
        Ok(PaymentOutcome::Completed(paid))
    }

    /// Set an order's status, any status to any status.
    ///
    /// Returns whether the order exists.
    pub fn set_order_status(&self, order_id: &str, status: OrderStatus) -> Result<bool> {
        let Some(order) = self.repo.orders().get_by_id(order_id)? else {
            return Ok(false);
        };
        if order.status != status && !order.status.follows_intended_flow(status) {
            tracing::debug!(order = order_id, from = %order.status, to = %status, "status override");
        }

        self.repo.orders().update(
            order_id,
            OrderPatch {
                status: Some(status),
                updated_at: Some(self.clock.now()),
                ..Default::default()
            },
        )
    }

    /// A customer's orders whose transaction is still pending.
    pub fn pending_payments(&self, customer_id: &str) -> Result<Vec<Order>> {
        let transactions = self.repo.transactions().get_by_customer_id(customer_id)?;
        let orders = self.repo.orders().get_by_customer_id(customer_id)?;

        Ok(orders
            .into_iter()
            .filter(|order| {
                transactions
                    .iter()
                    .find(|t| t.order_id == order.id)
                    .is_some_and(|t| t.payment_status == PaymentStatus::Pending)
            })
            .collect())
    }
}
