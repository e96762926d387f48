//! Store and shop configuration.

use std::path::PathBuf;

/// Configuration for a file-backed store.
#[derive(Clone, Debug)]
pub struct StoreConfig {
    /// Directory holding one file per key.
    pub path: PathBuf,

    /// Whether to create the directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Seed the admin account and preset packages into empty collections.
    pub seed_defaults: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("./laundry-store"),
            create_if_missing: true,
            seed_defaults: true,
        }
    }
}

/// Business constants used by workflows and reports.
#[derive(Clone, Debug)]
pub struct ShopConfig {
    /// Days from order placement to the estimated completion time.
    pub turnaround_days: i64,

    /// Entries in "recent transactions" on the admin dashboard.
    pub recent_transactions: usize,

    /// Entries in "recent orders" on the customer dashboard.
    pub recent_orders: usize,

    /// Entries in the top-package ranking.
    pub top_packages: usize,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            turnaround_days: 2,
            recent_transactions: 5,
            recent_orders: 5,
            top_packages: 5,
        }
    }
}
