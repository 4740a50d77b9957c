//! Cosmetic actor naming.
//!
//! Purely for the fun of a fresh test-subject name on every run; nothing
//! in the core depends on it.

use rand::Rng;

/// Generate a random display name for the actor.
pub fn random_actor_name() -> String {
    let mut rng = rand::rng();
    let number: u32 = rng.random_range(1000..=9999);
    format!("Test Subject #{number}")
}
