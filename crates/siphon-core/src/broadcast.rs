//! Synchronous status broadcasting to registered observers.
//!
//! A [`StateBroadcaster`] holds an ordered registry of observer callbacks.
//! Whenever status-relevant state changes, the owning component builds a
//! [`StatusFrame`] snapshot and calls [`StateBroadcaster::notify`], which
//! invokes every callback in subscription order, synchronously, on the
//! calling thread.
//!
//! Subscription is scope-bound: a consumer subscribes when it begins
//! observing and must unsubscribe (with the [`ObserverId`] it got back)
//! before it stops existing, so a dead observer is never invoked.

use core::fmt;

use siphon_types::{ObserverId, StatusFrame};

/// An observer callback receiving each published status frame.
///
/// The frame is a self-contained snapshot; observers read whatever part of
/// it they care about and must not assume it outlives the call.
pub type StatusCallback = Box<dyn FnMut(&StatusFrame) + Send>;

/// Ordered registry of status observers.
#[derive(Default)]
pub struct StateBroadcaster {
    /// Subscribers in subscription order. Notification preserves this order.
    subscribers: Vec<(ObserverId, StatusCallback)>,
}

impl StateBroadcaster {
    /// Create an empty broadcaster.
    pub const fn new() -> Self {
        Self {
            subscribers: Vec::new(),
        }
    }

    /// Register an observer. Returns the identity to unsubscribe with.
    pub fn subscribe(&mut self, callback: StatusCallback) -> ObserverId {
        let id = ObserverId::new();
        self.subscribers.push((id, callback));
        id
    }

    /// Remove an observer by identity.
    ///
    /// Returns `true` if the observer was registered. Unsubscribing an
    /// unknown identity is a no-op.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() < before
    }

    /// Invoke every subscribed callback with the given frame, in
    /// subscription order.
    pub fn notify(&mut self, frame: &StatusFrame) {
        for (_, callback) in &mut self.subscribers {
            callback(frame);
        }
    }

    /// Number of registered observers.
    pub fn observer_count(&self) -> usize {
        self.subscribers.len()
    }
}

impl fmt::Debug for StateBroadcaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateBroadcaster")
            .field("observers", &self.subscribers.len())
            .finish()
    }
}
