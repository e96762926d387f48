//! Core types for the laundry store.
//!
//! Records are plain data. Relationships between collections are string ids
//! only and are never validated. `Order` and `Transaction` carry snapshot
//! copies of the customer and package names taken at creation time; those
//! copies are history, not a join, and are not re-synced when the source
//! record changes later.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A UTC instant, persisted as an ISO-8601 string with millisecond precision.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(pub DateTime<Utc>);

impl Timestamp {
    /// Current time.
    pub fn now() -> Self {
        Timestamp(Utc::now())
    }

    /// Build from milliseconds since the Unix epoch.
    pub fn from_millis(millis: i64) -> Option<Self> {
        DateTime::<Utc>::from_timestamp_millis(millis).map(Timestamp)
    }

    /// Parse an RFC 3339 string.
    pub fn parse(s: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| Timestamp(dt.with_timezone(&Utc)))
    }

    /// Milliseconds since the Unix epoch.
    pub fn millis(&self) -> i64 {
        self.0.timestamp_millis()
    }

    /// Shift forward by whole days.
    pub fn plus_days(&self, days: i64) -> Self {
        Timestamp(self.0 + Duration::days(days))
    }

    /// ISO-8601 form, e.g. `2024-01-15T08:30:00.000Z`.
    pub fn to_iso(&self) -> String {
        self.0.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.to_iso())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_iso())
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_iso())
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Timestamp::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid timestamp: {raw}")))
    }
}

/// Account role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "pelanggan", alias = "customer")]
    Customer,
    #[serde(rename = "admin")]
    Admin,
}

/// Processing stage of an order.
///
/// The intended flow is Queued -> Processing -> Done / ReadyForPickup, but
/// nothing enforces it: admins may set any status at any time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Antrian", alias = "Queued")]
    Queued,
    #[serde(rename = "Proses", alias = "Processing")]
    Processing,
    #[serde(rename = "Selesai", alias = "Done")]
    Done,
    #[serde(rename = "Siap Diambil", alias = "ReadyForPickup")]
    ReadyForPickup,
}

impl OrderStatus {
    /// Every status, in the intended processing order.
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Queued,
        OrderStatus::Processing,
        OrderStatus::Done,
        OrderStatus::ReadyForPickup,
    ];

    /// Still in the shop's hands.
    pub fn is_active(self) -> bool {
        matches!(self, OrderStatus::Queued | OrderStatus::Processing)
    }

    /// Counted as completed by reporting. Not a lock: further changes are allowed.
    pub fn is_completed(self) -> bool {
        matches!(self, OrderStatus::Done | OrderStatus::ReadyForPickup)
    }

    /// Whether `next` follows the intended order from `self`.
    ///
    /// Informational only; `set_order_status` accepts any target.
    pub fn follows_intended_flow(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Queued, OrderStatus::Processing)
                | (OrderStatus::Processing, OrderStatus::Done)
                | (OrderStatus::Processing, OrderStatus::ReadyForPickup)
                | (OrderStatus::Done, OrderStatus::ReadyForPickup)
        )
    }

    /// Label as persisted and shown to users.
    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Queued => "Antrian",
            OrderStatus::Processing => "Proses",
            OrderStatus::Done => "Selesai",
            OrderStatus::ReadyForPickup => "Siap Diambil",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Settlement state of a transaction. Pending -> Paid only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaymentStatus {
    #[serde(rename = "Pending")]
    Pending,
    #[serde(rename = "Lunas", alias = "Paid")]
    Paid,
}

/// How a customer settles a transaction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    BankTransfer,
    EWallet,
    Cash,
}

impl PaymentMethod {
    /// Name stamped onto the transaction.
    pub fn display_name(self) -> &'static str {
        match self {
            PaymentMethod::BankTransfer => "Transfer Bank",
            PaymentMethod::EWallet => "E-Wallet",
            PaymentMethod::Cash => "Tunai",
        }
    }
}

/// A registered account.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    /// Stored and compared in plain text.
    pub password: String,
    pub role: Role,
    pub join_date: Timestamp,
}

/// Registration form: everything but id, role and join date.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password: String,
}

/// Partial update for a user. Every field but `id` can be replaced.
#[derive(Clone, Debug, Default)]
pub struct UserPatch {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub join_date: Option<Timestamp>,
}

/// A laundry service offered by the shop.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub name: String,
    /// Price per kilogram.
    pub price: f64,
    pub description: String,
}

/// Partial update for a package.
#[derive(Clone, Debug, Default)]
pub struct PackagePatch {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<String>,
}

/// A customer order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: String,
    pub customer_id: String,
    /// Snapshot of the customer's name at order time.
    pub customer_name: String,
    pub package_id: String,
    /// Snapshot of the package name at order time.
    pub package_name: String,
    /// Kilograms.
    pub weight: f64,
    /// `price * weight`, fixed at creation.
    pub total_cost: f64,
    pub status: OrderStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub estimated_time: Timestamp,
}

/// Partial update for an order. Every field but `id` can be replaced.
#[derive(Clone, Debug, Default)]
pub struct OrderPatch {
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub package_id: Option<String>,
    pub package_name: Option<String>,
    pub weight: Option<f64>,
    pub total_cost: Option<f64>,
    pub status: Option<OrderStatus>,
    pub created_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
    pub estimated_time: Option<Timestamp>,
}

/// Payment record paired with exactly one order by `order_id`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub id: String,
    pub order_id: String,
    pub customer_id: String,
    /// Snapshot of the customer's name at order time.
    pub customer_name: String,
    pub amount: f64,
    /// Empty until paid.
    pub payment_method: String,
    pub payment_status: PaymentStatus,
    pub date: Timestamp,
}

/// Partial update for a transaction. Every field but `id` can be replaced.
#[derive(Clone, Debug, Default)]
pub struct TransactionPatch {
    pub order_id: Option<String>,
    pub customer_id: Option<String>,
    pub customer_name: Option<String>,
    pub amount: Option<f64>,
    pub payment_method: Option<String>,
    pub payment_status: Option<PaymentStatus>,
    pub date: Option<Timestamp>,
}
