//! Change notifications for store consumers.
//!
//! Every collection write and session change is broadcast so views can
//! re-read whatever derived state they show. Subscriptions support:
//! - Filtering by collection and session events
//! - Bounded buffers with slow-subscriber dropping
//!
//! # Example
//!
//! ```ignore
//! let handle = shop.subscribe(SubscriptionConfig {
//!     filter: SubscriptionFilter::collections(vec![Collection::Orders]),
//!     ..Default::default()
//! });
//!
//! while let Ok(event) = handle.recv() {
//!     match event {
//!         StoreEvent::CollectionWritten { .. } => refresh_order_table(),
//!         StoreEvent::Dropped { .. } => break,
//!         _ => {}
//!     }
//! }
//! ```

mod manager;
mod types;

pub use manager::SubscriptionManager;
pub use types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionFilter, SubscriptionHandle,
    SubscriptionId,
};
