//! Record store: named collections persisted whole on every write.

mod collection;
mod seed;
mod store;

pub use collection::{Collection, SESSION_KEY};
pub use seed::{default_packages, default_users, SeedReport};
pub use store::RecordStore;
