//! Session state and the cooperative drive loop.
//!
//! A [`SessionState`] bundles everything one interaction session owns: the
//! simulation clock, the actor's controller, and the endpoint registry.
//! Two free functions drive it: [`apply_event`] routes an input event to
//! the controller, and [`advance`] moves the clock and fires every
//! periodic transfer that came due, in order.
//!
//! Everything runs synchronously on the calling thread. Each inventory is
//! owned exclusively by its controller or endpoint and cross-entity
//! mutation happens only through the clamped transfer, so no locking is
//! involved anywhere.

use siphon_types::{EntityId, InputEvent};
use tracing::debug;

use crate::controller::ActionController;
use crate::endpoint::{EndpointRegistry, TransferEndpoint};
use crate::schedule::SimClock;

/// The mutable state of one interaction session.
#[derive(Debug)]
pub struct SessionState {
    /// Simulation time.
    pub clock: SimClock,

    /// The actor's controller.
    pub actor: ActionController,

    /// Every endpoint that can be targeted, keyed by entity.
    pub endpoints: EndpointRegistry,
}

impl SessionState {
    /// Create a session around an actor controller, with no endpoints yet.
    pub fn new(actor: ActionController) -> Self {
        Self {
            clock: SimClock::new(),
            actor,
            endpoints: EndpointRegistry::new(),
        }
    }

    /// Register an endpoint, keyed by its owning entity.
    ///
    /// Returns the entity ID for convenience. The endpoint is not
    /// activated here; wire up observers first, then activate.
    pub fn add_endpoint(&mut self, endpoint: TransferEndpoint) -> EntityId {
        let entity = endpoint.entity();
        let _ = self.endpoints.insert(entity, endpoint);
        entity
    }
}

/// Route one input event to the actor's controller.
pub fn apply_event(state: &mut SessionState, event: InputEvent) {
    debug!(?event, "Input event");
    match event {
        InputEvent::SelectTarget { entity } => state.actor.set_target(Some(entity)),
        InputEvent::ClearTarget => state.actor.set_target(None),
        InputEvent::OverlapEnter { entity } => {
            let now_ms = state.clock.now_ms();
            state.actor.overlap_enter(entity, &state.endpoints, now_ms);
        }
        InputEvent::OverlapExit { entity } => state.actor.overlap_exit(entity),
    }
}

/// Advance simulation time by `dt_ms` and fire every periodic transfer
/// that came due, oldest first. Returns the number of firings.
///
/// Cancellation inside a firing drops the schedule, so later firings that
/// were notionally due in the same advance never happen.
pub fn advance(state: &mut SessionState, dt_ms: u64) -> u32 {
    let now_ms = state.clock.advance(dt_ms);
    let mut fired: u32 = 0;

    loop {
        // The schedule borrow must end before the tick body runs.
        let due = match state.actor.schedule.as_mut() {
            Some(schedule) => schedule.fire_if_due(now_ms),
            None => false,
        };
        if !due {
            break;
        }
        state.actor.run_action_tick(&mut state.endpoints);
        fired = fired.saturating_add(1);
    }

    fired
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use siphon_types::{EntityId, LoadStyles};

    use super::*;
    use crate::config::ActorConfig;

    fn make_session(
        actor_capacity: Decimal,
        amount: Decimal,
        node_capacity: Decimal,
    ) -> (SessionState, EntityId) {
        let config = ActorConfig {
            capacity: actor_capacity,
            amount_per_action: amount,
            repeat_interval_secs: Decimal::ONE,
            ..ActorConfig::default()
        };
        let actor = ActionController::new(EntityId::new(), &config);
        let mut state = SessionState::new(actor);
        let node_entity = EntityId::new();
        let node = state.add_endpoint(TransferEndpoint::new(
            node_entity,
            node_capacity,
            LoadStyles::default(),
        ));
        (state, node)
    }

    #[test]
    fn select_and_clear_route_to_the_controller() {
        let (mut state, node) = make_session(dec!(10), dec!(3), dec!(10));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        assert_eq!(state.actor.target().map(|t| t.entity), Some(node));

        apply_event(&mut state, InputEvent::ClearTarget);
        assert!(state.actor.target().is_none());
    }

    #[test]
    fn no_firing_before_the_first_interval_elapses() {
        let (mut state, node) = make_session(dec!(10), dec!(3), dec!(10));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });

        assert_eq!(advance(&mut state, 999), 0);
        assert_eq!(state.actor.inventory().current(), Decimal::ZERO);
        assert_eq!(advance(&mut state, 1), 1);
        assert_eq!(state.actor.inventory().current(), dec!(3));
    }

    #[test]
    fn firing_repeats_every_interval() {
        let (mut state, node) = make_session(dec!(10), dec!(3), dec!(10));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });

        for expected in [dec!(3), dec!(6), dec!(9)] {
            let _ = advance(&mut state, 1000);
            assert_eq!(state.actor.inventory().current(), expected);
        }
    }

    #[test]
    fn large_advance_drains_missed_firings_in_order() {
        let (mut state, node) = make_session(dec!(100), dec!(3), dec!(100));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });

        assert_eq!(advance(&mut state, 3500), 3);
        assert_eq!(state.actor.inventory().current(), dec!(9));
    }

    #[test]
    fn halting_drops_firings_still_due_in_the_same_advance() {
        // Node drains after two firings; a jump spanning five periods
        // must not keep firing into an empty node.
        let (mut state, node) = make_session(dec!(100), dec!(3), dec!(6));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });

        assert_eq!(advance(&mut state, 5000), 2);
        assert_eq!(state.actor.inventory().current(), dec!(6));
        assert!(state.endpoints.get(&node).unwrap().is_empty());
        assert!(!state.actor.is_running());
    }

    #[test]
    fn overlap_exit_cancels_pending_firing() {
        let (mut state, node) = make_session(dec!(10), dec!(3), dec!(10));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });
        let _ = advance(&mut state, 500);
        apply_event(&mut state, InputEvent::OverlapExit { entity: node });

        assert_eq!(advance(&mut state, 2000), 0);
        assert_eq!(state.actor.inventory().current(), Decimal::ZERO);
        assert!(!state.actor.is_running());
    }

    #[test]
    fn double_enter_fires_only_once_per_interval() {
        let (mut state, node) = make_session(dec!(10), dec!(1), dec!(10));

        apply_event(&mut state, InputEvent::SelectTarget { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });
        apply_event(&mut state, InputEvent::OverlapEnter { entity: node });

        assert_eq!(advance(&mut state, 1000), 1);
        assert_eq!(state.actor.inventory().current(), dec!(1));
    }

    #[test]
    fn retarget_between_selection_and_overlap_transfers_nothing() {
        let (mut state, first) = make_session(dec!(10), dec!(3), dec!(10));
        let second = state.add_endpoint(TransferEndpoint::new(
            EntityId::new(),
            dec!(10),
            LoadStyles::default(),
        ));

        apply_event(&mut state, InputEvent::SelectTarget { entity: first });
        apply_event(&mut state, InputEvent::SelectTarget { entity: second });

        // Overlapping the first node no longer matches anything.
        apply_event(&mut state, InputEvent::OverlapEnter { entity: first });
        assert_eq!(advance(&mut state, 5000), 0);
        assert_eq!(state.actor.inventory().current(), Decimal::ZERO);
        assert_eq!(
            state.endpoints.get(&first).unwrap().inventory().current(),
            dec!(10)
        );
        assert_eq!(
            state.endpoints.get(&second).unwrap().inventory().current(),
            dec!(10)
        );
    }
}
