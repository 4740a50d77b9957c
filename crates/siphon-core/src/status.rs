//! Status resolution: which label each dimension displays.
//!
//! The two dimensions resolve independently and their orderings are fixed.
//! Labels are not mutually exclusive by construction (a zero-capacity
//! inventory is both empty and full), so the check order is part of the
//! observable behavior and is preserved exactly:
//!
//! - Action dimension: the idle check and the busy check both run; with a
//!   consistent `running` flag at most one matches.
//! - Load dimension: "Has Load" (`!empty && !full`) wins outright and stops
//!   evaluation; otherwise Full is checked, then Empty, with a later match
//!   overriding an earlier one.

use siphon_types::{ActionStyles, LoadStyles, StatusLabel, StatusLine};

use crate::inventory::Inventory;

/// Resolve the action-dimension line for a controller.
///
/// Both checks are evaluated; neither returns early. A disabled style
/// suppresses its label entirely.
pub fn resolve_action(running: bool, styles: ActionStyles) -> Option<StatusLine> {
    let mut line = None;
    if !running && styles.idle.enabled {
        line = Some(StatusLine::new(StatusLabel::Idle, styles.idle.color));
    }
    if running && styles.busy.enabled {
        line = Some(StatusLine::new(StatusLabel::Busy, styles.busy.color));
    }
    line
}

/// Resolve the load-dimension line for an inventory.
///
/// Fixed priority: "Has Load" short-circuits, then Full, then Empty.
/// Only one of Full/Empty can hold while "Has Load" is false (except for a
/// zero-capacity inventory, where the Empty check runs last and wins).
pub fn resolve_load(inventory: &Inventory, styles: LoadStyles) -> Option<StatusLine> {
    if !inventory.is_empty() && !inventory.is_full() && styles.has_load.enabled {
        return Some(StatusLine::new(StatusLabel::HasLoad, styles.has_load.color));
    }

    let mut line = None;
    if inventory.is_full() && styles.full.enabled {
        line = Some(StatusLine::new(StatusLabel::Full, styles.full.color));
    }
    if inventory.is_empty() && styles.empty.enabled {
        line = Some(StatusLine::new(StatusLabel::Empty, styles.empty.color));
    }
    line
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal_macros::dec;

    use super::*;

    fn loaded(current: rust_decimal::Decimal, capacity: rust_decimal::Decimal) -> Inventory {
        let mut inv = Inventory::drained(capacity);
        inv.current = current;
        inv
    }

    #[test]
    fn idle_when_not_running() {
        let line = resolve_action(false, ActionStyles::default()).unwrap();
        assert_eq!(line.label, StatusLabel::Idle);
    }

    #[test]
    fn busy_when_running() {
        let line = resolve_action(true, ActionStyles::default()).unwrap();
        assert_eq!(line.label, StatusLabel::Busy);
    }

    #[test]
    fn disabled_idle_resolves_to_nothing() {
        let mut styles = ActionStyles::default();
        styles.idle.enabled = false;
        assert!(resolve_action(false, styles).is_none());
        // Busy is unaffected.
        assert!(resolve_action(true, styles).is_some());
    }

    #[test]
    fn partial_load_shows_has_load() {
        let inv = loaded(dec!(3), dec!(10));
        let line = resolve_load(&inv, LoadStyles::default()).unwrap();
        assert_eq!(line.label, StatusLabel::HasLoad);
    }

    #[test]
    fn full_load_shows_full_not_has_load() {
        let inv = loaded(dec!(10), dec!(10));
        let line = resolve_load(&inv, LoadStyles::default()).unwrap();
        assert_eq!(line.label, StatusLabel::Full);
    }

    #[test]
    fn empty_load_shows_empty() {
        let inv = loaded(dec!(0), dec!(10));
        let line = resolve_load(&inv, LoadStyles::default()).unwrap();
        assert_eq!(line.label, StatusLabel::Empty);
    }

    #[test]
    fn disabled_has_load_falls_through_to_nothing_when_partial() {
        // A partial load matches neither Full nor Empty, so disabling
        // "Has Load" leaves the dimension unresolved.
        let mut styles = LoadStyles::default();
        styles.has_load.enabled = false;
        let inv = loaded(dec!(3), dec!(10));
        assert!(resolve_load(&inv, styles).is_none());
    }

    #[test]
    fn zero_capacity_resolves_to_empty() {
        // Both Full and Empty hold; the Empty check runs last and wins.
        let inv = Inventory::drained(dec!(0));
        let line = resolve_load(&inv, LoadStyles::default()).unwrap();
        assert_eq!(line.label, StatusLabel::Empty);
    }

    #[test]
    fn zero_capacity_with_empty_disabled_shows_full() {
        let mut styles = LoadStyles::default();
        styles.empty.enabled = false;
        let inv = Inventory::drained(dec!(0));
        let line = resolve_load(&inv, styles).unwrap();
        assert_eq!(line.label, StatusLabel::Full);
    }
}
