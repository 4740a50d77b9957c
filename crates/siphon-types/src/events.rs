//! Input events delivered to the interaction core.
//!
//! The core is driven entirely through this event vocabulary plus time
//! advancement. Pointer bindings, key bindings, and the physics subsystem
//! that detects overlaps all live outside the core; whatever they are,
//! they reduce to these four events.

use serde::{Deserialize, Serialize};

use crate::ids::EntityId;

/// An input event routed to the actor's controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    /// A target was selected (right-click on a node, in the reference
    /// bindings). Replaces any previous target wholesale.
    SelectTarget {
        /// The entity that was selected.
        entity: EntityId,
    },

    /// The target was deselected (a configured key, in the reference
    /// bindings). Clears the target reference entirely.
    ClearTarget,

    /// The physics subsystem reports the actor started overlapping an
    /// entity.
    OverlapEnter {
        /// The entity now overlapping the actor.
        entity: EntityId,
    },

    /// The physics subsystem reports the actor stopped overlapping an
    /// entity.
    OverlapExit {
        /// The entity no longer overlapping the actor.
        entity: EntityId,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_roundtrip_serde() {
        let event = InputEvent::SelectTarget {
            entity: EntityId::new(),
        };
        let json = serde_json::to_string(&event).ok();
        assert!(json.is_some());
        let restored: Result<InputEvent, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(event));
    }
}
