//! Session and authentication.
//!
//! Credentials are compared in plain text; there is no hashing and no
//! lockout. The logged-in user is kept in memory and mirrored to the
//! session key so it can be restored later.

use crate::clock::{Clock, IdGenerator};
use crate::error::{Result, StoreError};
use crate::repository::Repository;
use crate::types::{NewUser, Role, User};
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the current user and wraps login, registration and logout.
pub struct Session {
    repo: Repository,
    clock: Arc<dyn Clock>,
    ids: Arc<IdGenerator>,
    current: RwLock<Option<User>>,
}

impl Session {
    pub fn new(repo: Repository, clock: Arc<dyn Clock>, ids: Arc<IdGenerator>) -> Self {
        Self {
            repo,
            clock,
            ids,
            current: RwLock::new(None),
        }
    }

    /// The logged-in user, if any.
    pub fn current_user(&self) -> Option<User> {
        self.current.read().clone()
    }

    /// Pick up a persisted session.
    ///
    /// The stored user is re-read by id so later edits are seen. If that user
    /// no longer exists the session key is removed.
    pub fn restore(&self) -> Result<Option<User>> {
        let Some(stored) = self.repo.records().read_session()? else {
            return Ok(None);
        };

        match self.repo.users().get_by_id(&stored.id)? {
            Some(user) => {
                *self.current.write() = Some(user.clone());
                Ok(Some(user))
            }
            None => {
                tracing::info!(user = %stored.id, "stale session removed");
                self.repo.records().clear_session()?;
                Ok(None)
            }
        }
    }

    /// Create a customer account and log it in.
    ///
    /// Fails with [`StoreError::UsernameTaken`] if the username is in use; in
    /// that case nothing is written.
    pub fn register(&self, form: NewUser) -> Result<User> {
        if self.repo.users().get_by_username(&form.username)?.is_some() {
            tracing::info!(username = %form.username, "registration rejected: username taken");
            return Err(StoreError::UsernameTaken(form.username));
        }

        let user = User {
            id: self.ids.plain(),
            name: form.name,
            email: form.email,
            phone: form.phone,
            username: form.username,
            password: form.password,
            role: Role::Customer,
            join_date: self.clock.now(),
        };

        self.repo.users().add(user.clone())?;
        self.start(&user)?;
        tracing::info!(user = %user.id, "customer registered");
        Ok(user)
    }

    /// Log in with a username and password.
    ///
    /// A wrong username or password gives `Ok(None)`.
    pub fn login(&self, username: &str, password: &str) -> Result<Option<User>> {
        match self.repo.users().get_by_username(username)? {
            Some(user) if user.password == password => {
                self.start(&user)?;
                tracing::info!(user = %user.id, "login succeeded");
                Ok(Some(user))
            }
            _ => {
                tracing::info!(username, "login failed");
                Ok(None)
            }
        }
    }

    pub fn logout(&self) -> Result<()> {
        *self.current.write() = None;
        self.repo.records().clear_session()
    }

    /// Re-read the current user from the users collection.
    ///
    /// Keeps the old value if the user has since been deleted.
    pub fn refresh(&self) -> Result<Option<User>> {
        let Some(current) = self.current_user() else {
            return Ok(None);
        };

        match self.repo.users().get_by_id(&current.id)? {
            Some(updated) => {
                self.start(&updated)?;
                Ok(Some(updated))
            }
            None => Ok(Some(current)),
        }
    }

    fn start(&self, user: &User) -> Result<()> {
        *self.current.write() = Some(user.clone());
        self.repo.records().write_session(user)
    }
}
