//! Subscription manager for broadcasting store events.

use crate::records::Collection;
use crossbeam_channel::{bounded, Sender, TrySendError};
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use super::types::{
    DropReason, StoreEvent, SubscriptionConfig, SubscriptionHandle, SubscriptionId,
};

/// Internal subscription state.
struct Subscription {
    config: SubscriptionConfig,
    sender: Sender<StoreEvent>,
}

impl Subscription {
    /// Try to send an event. Returns false if the subscriber should be dropped.
    fn try_send(&self, event: StoreEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(_)) | Err(TrySendError::Disconnected(_)) => false,
        }
    }

    fn matches_collection(&self, collection: Collection) -> bool {
        let filter = &self.config.filter;
        if !filter.include_collections {
            return false;
        }
        match filter.collections {
            Some(ref wanted) => wanted.contains(&collection),
            None => true,
        }
    }

    fn wants_session(&self) -> bool {
        self.config.filter.include_session
    }
}

/// Manages subscriptions and broadcasts events.
pub struct SubscriptionManager {
    subscriptions: RwLock<HashMap<SubscriptionId, Subscription>>,
    next_id: AtomicU64,
}

impl SubscriptionManager {
    pub fn new() -> Self {
        Self {
            subscriptions: RwLock::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Create a new subscription. Only events after this call are delivered.
    pub fn subscribe(&self, config: SubscriptionConfig) -> SubscriptionHandle {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let (sender, receiver) = bounded(config.buffer_size.max(1));

        self.subscriptions
            .write()
            .insert(id, Subscription { config, sender });

        SubscriptionHandle { id, receiver }
    }

    /// Unsubscribe and clean up.
    pub fn unsubscribe(&self, id: SubscriptionId) {
        if let Some(sub) = self.subscriptions.write().remove(&id) {
            let _ = sub.sender.try_send(StoreEvent::Dropped {
                reason: DropReason::Unsubscribed,
            });
        }
    }

    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().len()
    }

    /// Broadcast a collection rewrite.
    pub fn broadcast_collection(&self, collection: Collection, len: usize) {
        let event = StoreEvent::CollectionWritten { collection, len };
        self.broadcast(|sub| sub.matches_collection(collection), event);
    }

    /// Broadcast a session change.
    pub fn broadcast_session(&self, user_id: Option<String>) {
        let event = StoreEvent::SessionChanged { user_id };
        self.broadcast(|sub| sub.wants_session(), event);
    }

    /// Send to matching subscriptions, dropping any that can't keep up.
    fn broadcast<F>(&self, predicate: F, event: StoreEvent)
    where
        F: Fn(&Subscription) -> bool,
    {
        // Fast path: nobody listening.
        if self.subscriptions.read().is_empty() {
            return;
        }

        let mut dropped = Vec::new();
        {
            let subs = self.subscriptions.read();
            for (id, sub) in subs.iter() {
                if predicate(sub) && !sub.try_send(event.clone()) {
                    dropped.push(*id);
                }
            }
        }

        if !dropped.is_empty() {
            let mut subs = self.subscriptions.write();
            for id in dropped {
                if let Some(sub) = subs.remove(&id) {
                    tracing::debug!(subscription = id.0, "dropping slow subscriber");
                    let _ = sub.sender.try_send(StoreEvent::Dropped {
                        reason: DropReason::BufferOverflow,
                    });
                }
            }
        }
    }
}

impl Default for SubscriptionManager {
    fn default() -> Self {
        Self::new()
    }
}
