//! State Change Notifications
//!
//! Every completed show/hide in the `Ready` state is broadcast to listeners
//! as a [`StateChange`]. Listeners are held by the navigator itself (there is
//! no global bus) and are invoked synchronously, in subscription order.
//!
//! Two kinds of listener are supported:
//!
//! - callbacks (`FnMut(&StateChange)`), for hosts that react inline
//! - unbounded channels, for hosts that drain notifications later (e.g. once
//!   per frame). Sending never blocks and needs no async runtime.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::element::{ElementId, Layer};

/// A visibility transition of one element
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateChange {
    /// Element that changed
    pub id: ElementId,
    /// Whether it is now visible
    pub visible: bool,
    /// Whether it took focus
    pub focus: bool,
    /// Layer the element lives on
    pub layer: Layer,
}

impl StateChange {
    /// Notification for a completed show
    #[must_use]
    pub fn shown(id: ElementId, layer: Layer) -> Self {
        Self {
            id,
            visible: true,
            focus: true,
            layer,
        }
    }

    /// Notification for a completed hide
    #[must_use]
    pub fn hidden(id: ElementId, layer: Layer) -> Self {
        Self {
            id,
            visible: false,
            focus: false,
            layer,
        }
    }
}

/// Handle returned by subscribe, used to unsubscribe
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw numeric value
    #[must_use]
    pub fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

enum Listener {
    Callback(Box<dyn FnMut(&StateChange)>),
    Channel(mpsc::UnboundedSender<StateChange>),
}

/// Result of an emission
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitResult {
    /// Listeners that received the notification
    pub delivered: usize,
    /// Channel listeners found closed and removed
    pub dropped: Vec<SubscriptionId>,
}

/// Subscription list owned by the navigator
#[derive(Default)]
pub struct StateChangeChannel {
    listeners: Vec<(SubscriptionId, Listener)>,
    next_id: u64,
}

impl StateChangeChannel {
    /// Create a channel with no listeners
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Register a callback listener
    pub fn subscribe<F>(&mut self, callback: F) -> SubscriptionId
    where
        F: FnMut(&StateChange) + 'static,
    {
        let id = self.allocate_id();
        self.listeners
            .push((id, Listener::Callback(Box::new(callback))));
        tracing::debug!(subscription = %id, "Callback listener subscribed");
        id
    }

    /// Register a channel listener and return its receiving end
    ///
    /// Dropping the receiver unsubscribes on the next emission.
    pub fn subscribe_channel(&mut self) -> (SubscriptionId, mpsc::UnboundedReceiver<StateChange>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let id = self.allocate_id();
        self.listeners.push((id, Listener::Channel(tx)));
        tracing::debug!(subscription = %id, "Channel listener subscribed");
        (id, rx)
    }

    /// Remove a listener
    ///
    /// Returns whether the subscription existed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sub, _)| *sub != id);
        let removed = self.listeners.len() != before;
        if removed {
            tracing::debug!(subscription = %id, "Listener unsubscribed");
        }
        removed
    }

    /// Deliver a notification to every listener, in subscription order
    pub fn emit(&mut self, change: &StateChange) -> EmitResult {
        let mut result = EmitResult::default();

        for (id, listener) in &mut self.listeners {
            match listener {
                Listener::Callback(callback) => {
                    callback(change);
                    result.delivered += 1;
                }
                Listener::Channel(tx) => {
                    if tx.send(change.clone()).is_ok() {
                        result.delivered += 1;
                    } else {
                        result.dropped.push(*id);
                    }
                }
            }
        }

        if !result.dropped.is_empty() {
            self.listeners
                .retain(|(id, _)| !result.dropped.contains(id));
            tracing::debug!(
                dropped = result.dropped.len(),
                "Removed closed channel listeners"
            );
        }

        tracing::trace!(
            element = %change.id,
            visible = change.visible,
            delivered = result.delivered,
            "State change emitted"
        );
        result
    }

    /// Number of listeners
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Drop every listener
    pub fn clear(&mut self) {
        self.listeners.clear();
    }
}

impl fmt::Debug for StateChangeChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateChangeChannel")
            .field("listeners", &self.listeners.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
