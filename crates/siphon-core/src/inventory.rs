//! Capacity-bounded scalar inventory.
//!
//! An [`Inventory`] is a single scalar load with a fixed capacity. It does
//! not clamp itself: the invariant `0 <= current <= capacity` is enforced
//! by the two sanctioned mutators (the endpoint transfer operation and the
//! controller's tick), which compute clamped deltas before applying them.
//! The fields are crate-visible for exactly that reason; everything outside
//! this crate reads through the accessors.

use rust_decimal::Decimal;

/// A capacity-bounded scalar resource container.
///
/// Capacity is fixed at construction. The current load starts at zero for
/// actor-side inventories ([`Inventory::drained`]) and at capacity for
/// supply-side inventories ([`Inventory::filled`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory {
    /// Maximum load. Fixed after construction.
    capacity: Decimal,

    /// Current load. Mutated only through clamped transfer arithmetic.
    pub(crate) current: Decimal,
}

impl Inventory {
    /// Create an inventory starting empty (actor side).
    pub const fn drained(capacity: Decimal) -> Self {
        Self {
            capacity,
            current: Decimal::ZERO,
        }
    }

    /// Create an inventory starting at capacity (supply side).
    pub const fn filled(capacity: Decimal) -> Self {
        Self {
            capacity,
            current: capacity,
        }
    }

    /// The current load.
    pub const fn current(&self) -> Decimal {
        self.current
    }

    /// The fixed maximum load.
    pub const fn capacity(&self) -> Decimal {
        self.capacity
    }

    /// Whether the inventory holds nothing.
    pub fn is_empty(&self) -> bool {
        self.current <= Decimal::ZERO
    }

    /// Whether the inventory is at (or beyond) capacity.
    pub fn is_full(&self) -> bool {
        self.current >= self.capacity
    }

    /// Remaining room before the capacity bound.
    ///
    /// Zero when full; never negative.
    pub(crate) fn headroom(&self) -> Decimal {
        self.capacity
            .checked_sub(self.current)
            .unwrap_or(Decimal::ZERO)
            .max(Decimal::ZERO)
    }
}
