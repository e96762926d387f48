//! Default data written into an empty store.

use crate::records::Collection;
use crate::types::{Package, Role, Timestamp, User};

/// Which collections `initialize` had to seed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub seeded: Vec<Collection>,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.seeded.is_empty()
    }
}

/// The built-in admin account.
pub fn default_users(now: Timestamp) -> Vec<User> {
    vec![User {
        id: "1".into(),
        name: "Admin User".into(),
        email: "admin@laundry.com".into(),
        phone: "08111111111".into(),
        username: "umar".into(),
        password: "umar123".into(),
        role: Role::Admin,
        join_date: now,
    }]
}

/// The four preset packages.
pub fn default_packages() -> Vec<Package> {
    let preset = [
        ("1", "Cuci Kering", 7000.0, "Cuci bersih dan keringkan"),
        ("2", "Cuci Setrika", 10000.0, "Cuci, setrika, dan lipat rapi"),
        ("3", "Setrika Saja", 5000.0, "Setrika dan lipat rapi"),
        ("4", "Cuci Lipat", 8000.0, "Cuci dan lipat rapi"),
    ];

    preset
        .into_iter()
        .map(|(id, name, price, description)| Package {
            id: id.into(),
            name: name.into(),
            price,
            description: description.into(),
        })
        .collect()
}
