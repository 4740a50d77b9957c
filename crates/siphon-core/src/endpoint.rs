//! Transfer endpoints: entity-owned inventories exposed for clamped
//! deposit and withdrawal.
//!
//! A [`TransferEndpoint`] is anything that can be deposited into or
//! withdrawn from. Its single operation, [`TransferEndpoint::transfer`],
//! takes a signed amount (positive deposits, negative withdraws), clamps
//! the effect so the inventory never leaves `[0, capacity]`, and returns
//! the amount actually moved so the caller can apply the exact magnitude
//! to its own side. There is no failure path: a transfer against a bound
//! simply moves less, down to zero.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use siphon_types::{EntityId, LoadStyles, ObserverId, StatusFrame};
use tracing::debug;

use crate::broadcast::{StateBroadcaster, StatusCallback};
use crate::inventory::Inventory;
use crate::status;

/// All endpoints in a session, keyed by owning entity.
///
/// Target references are held as entity IDs and re-resolved through this
/// registry on every use, so a depleted or removed endpoint can never be
/// reached through a stale handle.
pub type EndpointRegistry = BTreeMap<EntityId, TransferEndpoint>;

/// An entity-owned inventory with clamped transfer semantics.
#[derive(Debug)]
pub struct TransferEndpoint {
    /// The owning entity's identity.
    entity: EntityId,

    /// The bounded load this endpoint guards.
    pub(crate) inventory: Inventory,

    /// Display configuration for the load dimension.
    styles: LoadStyles,

    /// Observers of this endpoint's status.
    broadcast: StateBroadcaster,
}

impl TransferEndpoint {
    /// Create an endpoint for `entity`, filled to `capacity`.
    ///
    /// Supply-side inventories activate full so there is something to
    /// withdraw. Call [`TransferEndpoint::activate`] after wiring up
    /// observers to publish the initial status frame.
    pub fn new(entity: EntityId, capacity: Decimal, styles: LoadStyles) -> Self {
        Self {
            entity,
            inventory: Inventory::filled(capacity),
            styles,
            broadcast: StateBroadcaster::new(),
        }
    }

    /// Publish the initial status frame so displays start out correct.
    pub fn activate(&mut self) {
        self.publish();
    }

    /// The owning entity's identity.
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Read access to the guarded inventory.
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// Whether there is nothing left to withdraw.
    pub fn is_empty(&self) -> bool {
        self.inventory.is_empty()
    }

    /// Whether there is no room left to deposit.
    pub fn is_full(&self) -> bool {
        self.inventory.is_full()
    }

    /// Register a status observer. Returns the identity to unsubscribe with.
    pub fn subscribe(&mut self, callback: StatusCallback) -> ObserverId {
        self.broadcast.subscribe(callback)
    }

    /// Remove a status observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.broadcast.unsubscribe(id)
    }

    /// Move `amount` into (positive) or out of (negative) this endpoint,
    /// clamped to the inventory bounds. Returns the amount actually moved,
    /// with the same sign as the request.
    ///
    /// Depositing into a full endpoint or withdrawing from an empty one
    /// returns zero. The caller applies the negated return value to its
    /// own inventory; that is how conservation holds even at the bounds.
    pub fn transfer(&mut self, amount: Decimal) -> Decimal {
        let actual = if amount > Decimal::ZERO {
            amount.min(self.inventory.headroom())
        } else if amount < Decimal::ZERO {
            // Withdrawal clamps at draining to exactly zero. Negating the
            // current load cannot overflow: Decimal negation flips a sign
            // flag.
            amount.max(
                Decimal::ZERO
                    .checked_sub(self.inventory.current)
                    .unwrap_or(Decimal::ZERO),
            )
        } else {
            Decimal::ZERO
        };

        // Bounded by the clamp above; the fallback never triggers.
        self.inventory.current = self
            .inventory
            .current
            .checked_add(actual)
            .unwrap_or(self.inventory.current);

        debug!(
            entity = %self.entity,
            requested = %amount,
            moved = %actual,
            load = %self.inventory.current,
            "Endpoint transfer"
        );

        self.publish();
        actual
    }

    /// Build and broadcast the current status frame.
    fn publish(&mut self) {
        let frame = StatusFrame {
            entity: self.entity,
            action: None,
            load: status::resolve_load(&self.inventory, self.styles),
            load_level: self.inventory.current(),
            target: None,
        };
        self.broadcast.notify(&frame);
    }
}
