//! Binding between record types and their collections.

use crate::error::{Result, StoreError};
use crate::records::Collection;
use crate::types::{
    Order, OrderPatch, Package, PackagePatch, Transaction, TransactionPatch, User, UserPatch,
};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// A record type stored in one collection.
pub trait Entity: Clone + Serialize + DeserializeOwned {
    /// Collection holding records of this type.
    const COLLECTION: Collection;

    /// Partial update merged by [`Entity::apply`].
    type Patch;

    fn id(&self) -> &str;

    /// Shallow-merge the fields set in `patch`; everything else stays.
    fn apply(&mut self, patch: Self::Patch);

    /// Reject values that would not survive a JSON round trip.
    ///
    /// serde_json writes NaN and infinities as `null`, which then fails to
    /// read back and takes the whole collection down with it.
    fn validate(&self) -> Result<()> {
        Ok(())
    }
}

fn ensure_finite(field: &str, value: f64) -> Result<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(StoreError::InvalidOperation(format!(
            "{field} must be a finite number, got {value}"
        )))
    }
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

impl Entity for User {
    const COLLECTION: Collection = Collection::Users;
    type Patch = UserPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: UserPatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.email, patch.email);
        merge(&mut self.phone, patch.phone);
        merge(&mut self.username, patch.username);
        merge(&mut self.password, patch.password);
        merge(&mut self.role, patch.role);
        merge(&mut self.join_date, patch.join_date);
    }
}

impl Entity for Package {
    const COLLECTION: Collection = Collection::Packages;
    type Patch = PackagePatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: PackagePatch) {
        merge(&mut self.name, patch.name);
        merge(&mut self.price, patch.price);
        merge(&mut self.description, patch.description);
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("price", self.price)
    }
}

impl Entity for Order {
    const COLLECTION: Collection = Collection::Orders;
    type Patch = OrderPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: OrderPatch) {
        merge(&mut self.customer_id, patch.customer_id);
        merge(&mut self.customer_name, patch.customer_name);
        merge(&mut self.package_id, patch.package_id);
        merge(&mut self.package_name, patch.package_name);
        merge(&mut self.weight, patch.weight);
        merge(&mut self.total_cost, patch.total_cost);
        merge(&mut self.status, patch.status);
        merge(&mut self.created_at, patch.created_at);
        merge(&mut self.updated_at, patch.updated_at);
        merge(&mut self.estimated_time, patch.estimated_time);
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("weight", self.weight)?;
        ensure_finite("totalCost", self.total_cost)
    }
}

impl Entity for Transaction {
    const COLLECTION: Collection = Collection::Transactions;
    type Patch = TransactionPatch;

    fn id(&self) -> &str {
        &self.id
    }

    fn apply(&mut self, patch: TransactionPatch) {
        merge(&mut self.order_id, patch.order_id);
        merge(&mut self.customer_id, patch.customer_id);
        merge(&mut self.customer_name, patch.customer_name);
        merge(&mut self.amount, patch.amount);
        merge(&mut self.payment_method, patch.payment_method);
        merge(&mut self.payment_status, patch.payment_status);
        merge(&mut self.date, patch.date);
    }

    fn validate(&self) -> Result<()> {
        ensure_finite("amount", self.amount)
    }
}
