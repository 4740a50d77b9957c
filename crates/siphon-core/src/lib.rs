//! Core interaction model for the Siphon workspace.
//!
//! Models a spatially-triggered resource transfer between two
//! capacity-bounded inventories: an actor selects a target, and while
//! physically overlapping it a periodic action withdraws a fixed amount
//! per firing, clamped so neither side ever leaves `[0, capacity]`.
//! Every status-relevant change is broadcast to registered observers.
//!
//! # Modules
//!
//! - [`inventory`] -- the capacity-bounded scalar container
//! - [`endpoint`] -- entity-owned inventories with clamped transfer
//! - [`broadcast`] -- synchronous ordered observer notification
//! - [`status`] -- status-label resolution for both display dimensions
//! - [`controller`] -- the actor-side selection/overlap/transfer machine
//! - [`schedule`] -- cooperative simulation time and periodic scheduling
//! - [`session`] -- session state, event routing, and the drive loop
//! - [`config`] -- YAML configuration with load-time clamping

pub mod broadcast;
pub mod config;
pub mod controller;
pub mod endpoint;
pub mod inventory;
pub mod schedule;
pub mod session;
pub mod status;

pub use broadcast::{StateBroadcaster, StatusCallback};
pub use config::{ActorConfig, ConfigError, LoggingConfig, NodeConfig, SiphonConfig};
pub use controller::{ActionController, Target};
pub use endpoint::{EndpointRegistry, TransferEndpoint};
pub use inventory::Inventory;
pub use schedule::{RepeatSchedule, SimClock};
pub use session::{SessionState, advance, apply_event};
