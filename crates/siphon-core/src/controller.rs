//! The actor-side interaction state machine.
//!
//! An [`ActionController`] owns the actor's inventory, tracks the selected
//! target, and reacts to spatial-overlap events. While the actor overlaps
//! its selected target, a repeating schedule withdraws a fixed amount per
//! firing from the target's endpoint and credits the actor, until the
//! target runs dry or the actor fills up.
//!
//! Transition rules, in the order they are checked:
//!
//! - Overlap enter is ignored while running or while no target is set. A
//!   depleted (or vanished) target is abandoned before the identity match;
//!   on a match the loop starts, with the first firing one full interval
//!   after contact.
//! - Overlap exit cancels the loop when the leaving entity is the target,
//!   or when the loop is running with no target left.
//! - Each firing checks continuation before and after its transfer, so a
//!   just-emptied target or just-filled actor halts the loop within the
//!   same firing rather than one interval later.
//!
//! At most one schedule exists per controller; starting is rejected while
//! one is active.

use rust_decimal::Decimal;
use siphon_types::{ActionStyles, EntityId, LoadStyles, ObserverId, StatusFrame};
use tracing::{debug, info};

use crate::broadcast::{StateBroadcaster, StatusCallback};
use crate::config::ActorConfig;
use crate::endpoint::{EndpointRegistry, TransferEndpoint};
use crate::inventory::Inventory;
use crate::schedule::RepeatSchedule;
use crate::status;

/// The currently selected transfer target.
///
/// This is a weak reference: only the entity identity is held. The
/// endpoint itself is re-resolved through the session registry on every
/// use, and the reference is dropped whenever the endpoint reports empty
/// or no longer exists, so a stale handle can never be followed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Target {
    /// The selected entity.
    pub entity: EntityId,
}

/// Actor-side component orchestrating target selection, overlap handling,
/// and the periodic transfer loop.
#[derive(Debug)]
pub struct ActionController {
    /// The actor entity this controller belongs to.
    entity: EntityId,

    /// Whether the periodic transfer loop is active.
    running: bool,

    /// The actor's own load. Starts empty.
    pub(crate) inventory: Inventory,

    /// The selected target, if any.
    target: Option<Target>,

    /// Amount requested from the target per firing.
    amount_per_action: Decimal,

    /// Interval between firings, and the delay before the first.
    period_ms: u64,

    /// Display styles for the action dimension.
    action_styles: ActionStyles,

    /// Display styles for the load dimension.
    load_styles: LoadStyles,

    /// Observers of this controller's status.
    broadcast: StateBroadcaster,

    /// The pending periodic firing, while running.
    pub(crate) schedule: Option<RepeatSchedule>,
}

impl ActionController {
    /// Create an idle controller for `entity` from clamped configuration.
    ///
    /// The inventory starts empty. Call [`ActionController::activate`]
    /// after wiring up observers to publish the initial status frame.
    pub fn new(entity: EntityId, config: &ActorConfig) -> Self {
        Self {
            entity,
            running: false,
            inventory: Inventory::drained(config.capacity),
            target: None,
            amount_per_action: config.amount_per_action,
            period_ms: config.period_ms(),
            action_styles: config.action_styles,
            load_styles: config.load_styles,
            broadcast: StateBroadcaster::new(),
            schedule: None,
        }
    }

    /// Publish the initial status frame (no target, idle, empty).
    pub fn activate(&mut self) {
        self.set_target(None);
    }

    /// The actor entity this controller belongs to.
    pub const fn entity(&self) -> EntityId {
        self.entity
    }

    /// Whether the periodic transfer loop is active.
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Read access to the actor's inventory.
    pub const fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    /// The currently selected target, if any.
    pub const fn target(&self) -> Option<Target> {
        self.target
    }

    /// Register a status observer. Returns the identity to unsubscribe with.
    pub fn subscribe(&mut self, callback: StatusCallback) -> ObserverId {
        self.broadcast.subscribe(callback)
    }

    /// Remove a status observer.
    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.broadcast.unsubscribe(id)
    }

    /// Select a new target, or clear it with `None`.
    ///
    /// The reference is replaced wholesale in either direction. Always
    /// publishes status (the frame carries the target for the name
    /// readout), regardless of whether the loop is running.
    pub fn set_target(&mut self, entity: Option<EntityId>) {
        self.target = entity.map(|entity| Target { entity });
        debug!(actor = %self.entity, target = ?self.target, "Target set");
        self.publish();
    }

    /// React to the actor starting to overlap `other`.
    ///
    /// Starts the periodic loop when `other` is the selected target and
    /// that target still has load to give. Contacts while already running,
    /// without a target, or with a non-target entity are ignored. A
    /// target whose endpoint is empty or missing is abandoned here, before
    /// the identity match.
    pub fn overlap_enter(
        &mut self,
        other: EntityId,
        endpoints: &EndpointRegistry,
        now_ms: u64,
    ) {
        if self.running || self.target.is_none() {
            return;
        }

        if let Some(target) = self.target {
            let depleted = endpoints
                .get(&target.entity)
                .is_none_or(TransferEndpoint::is_empty);
            if depleted {
                self.target = None;
            }
        }

        if self.target.is_some_and(|target| target.entity == other) {
            self.running = true;
            info!(
                actor = %self.entity,
                target = %other,
                period_ms = self.period_ms,
                "Transfer loop started"
            );
            self.publish();
            self.schedule = Some(RepeatSchedule::starting_at(now_ms, self.period_ms));
        } else {
            debug!(actor = %self.entity, other = %other, "Overlap did not match target");
        }
    }

    /// React to the actor no longer overlapping `other`.
    ///
    /// Cancels the loop when the leaving entity is the selected target, or
    /// when the loop is running with no target set. Cancellation drops the
    /// whole schedule: no further firings occur.
    pub fn overlap_exit(&mut self, other: EntityId) {
        let leaving_target = self.target.is_some_and(|target| target.entity == other);
        if (self.target.is_none() && self.running) || (self.running && leaving_target) {
            self.running = false;
            self.schedule = None;
            info!(actor = %self.entity, leaving = %other, "Transfer loop canceled on overlap exit");
            self.publish();
        }
    }

    /// One firing of the periodic transfer.
    ///
    /// Continuation is checked before and after the transfer; a pre-check
    /// stop does not skip the transfer itself, which then saturates to
    /// zero harmlessly.
    pub fn run_action_tick(&mut self, endpoints: &mut EndpointRegistry) {
        self.continue_check(endpoints);

        // Request no more than the actor can hold; the endpoint clamps to
        // what it has. The endpoint reports a negative actual-withdrawn,
        // so the credit is the negation of the negation.
        let request = self.amount_per_action.min(self.inventory.headroom());
        let withdrawn = match self.target.and_then(|t| endpoints.get_mut(&t.entity)) {
            Some(endpoint) => endpoint.transfer(negated(request)),
            None => Decimal::ZERO,
        };
        let received = negated(withdrawn);
        self.inventory.current = self
            .inventory
            .current
            .checked_add(received)
            .unwrap_or(self.inventory.current);

        debug!(
            actor = %self.entity,
            received = %received,
            load = %self.inventory.current,
            "Transfer tick"
        );

        self.continue_check(endpoints);
    }

    /// Stop the loop if the target has nothing left or the actor has no
    /// room left; publish status either way.
    ///
    /// A missing target, or a target entity with no registered endpoint,
    /// counts as having nothing left.
    fn continue_check(&mut self, endpoints: &EndpointRegistry) {
        let target_depleted = self.target.is_none_or(|target| {
            endpoints
                .get(&target.entity)
                .is_none_or(TransferEndpoint::is_empty)
        });

        if target_depleted || self.inventory.is_full() {
            if self.running {
                info!(
                    actor = %self.entity,
                    load = %self.inventory.current,
                    "Transfer loop halted"
                );
            }
            self.running = false;
            self.schedule = None;
        }

        self.publish();
    }

    /// Build and broadcast the current status frame.
    fn publish(&mut self) {
        let frame = StatusFrame {
            entity: self.entity,
            action: status::resolve_action(self.running, self.action_styles),
            load: status::resolve_load(&self.inventory, self.load_styles),
            load_level: self.inventory.current(),
            target: self.target.map(|target| target.entity),
        };
        self.broadcast.notify(&frame);
    }
}

/// Sign-flip helper for Decimal amounts.
///
/// Decimal negation flips a sign flag and cannot overflow; the fallback
/// never triggers.
fn negated(amount: Decimal) -> Decimal {
    Decimal::ZERO.checked_sub(amount).unwrap_or(Decimal::ZERO)
}
