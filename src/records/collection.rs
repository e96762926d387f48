//! Collection names and their storage keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage key for the logged-in user.
pub const SESSION_KEY: &str = "currentUser";

/// One of the four record collections.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Collection {
    Users,
    Packages,
    Orders,
    Transactions,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Users,
        Collection::Packages,
        Collection::Orders,
        Collection::Transactions,
    ];

    /// Key the collection is stored under.
    pub fn key(self) -> &'static str {
        match self {
            Collection::Users => "users",
            Collection::Packages => "packages",
            Collection::Orders => "orders",
            Collection::Transactions => "transactions",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
