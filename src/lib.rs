//! # Laundry Store
//!
//! Data-access and reporting core for a laundry-shop management app.
//!
//! ## Core Concepts
//!
//! - **Backend**: whole-value string storage keyed by name (memory or disk)
//! - **Record store**: four named collections, each rewritten whole on every change
//! - **Repository**: typed CRUD, lookups and aggregate reads per collection
//! - **Workflow**: order placement and payment, two writes each, not atomic
//! - **Session**: register, log in, log out, restore
//! - **Reports**: dashboards, date-range summaries, rankings, CSV export
//!
//! ## Example
//!
//! ```ignore
//! use laundry_store::{LaundryShop, PaymentMethod};
//!
//! let shop = LaundryShop::in_memory()?;
//! let admin = shop.session().login("umar", "umar123")?.expect("seeded admin");
//!
//! let (order, _trx) = shop.workflow().place_order(&admin, "2", 3.0)?.expect("package exists");
//! shop.workflow().complete_payment(&order.id, PaymentMethod::Cash)?;
//!
//! let dash = shop.admin_dashboard()?;
//! assert_eq!(dash.total_revenue, 30000.0);
//! ```

pub mod backend;
pub mod clock;
pub mod config;
pub mod error;
pub mod records;
pub mod reports;
pub mod repository;
pub mod session;
pub mod shop;
pub mod subscriptions;
pub mod types;
pub mod workflow;

// Re-exports
pub use backend::{FileBackend, KeyValueStore, MemoryBackend};
pub use clock::{Clock, IdGenerator, ManualClock, SystemClock};
pub use config::{ShopConfig, StoreConfig};
pub use error::{Result, StoreError};
pub use records::{Collection, RecordStore, SeedReport, SESSION_KEY};
pub use reports::{
    AdminDashboard, CsvExport, CustomerDashboard, DateRange, PackageStats, ReportSummary,
};
pub use repository::{Entity, Repository, Table};
pub use session::Session;
pub use shop::LaundryShop;
pub use subscriptions::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId, SubscriptionManager,
};
pub use types::*;
pub use workflow::{PaymentOutcome, Workflow};
