//! Terminal display sink for status frames.
//!
//! Renders each published [`StatusFrame`] as one colored line per entity:
//! the resolved status labels in their configured colors, the numeric load
//! readout, and the target name for entities that select targets. The
//! core never sees any of this; the sink is just another subscriber.

use std::collections::BTreeMap;

use siphon_types::{Color, EntityId, StatusFrame, StatusLine};

/// A display sink writing status lines to stdout.
#[derive(Debug, Clone)]
pub struct ConsoleSink {
    /// Display names per entity, resolved from configuration.
    names: BTreeMap<EntityId, String>,
}

impl ConsoleSink {
    /// Create a sink with the given entity display names.
    pub const fn new(names: BTreeMap<EntityId, String>) -> Self {
        Self { names }
    }

    /// The display name for an entity, or "Unknown" if none was registered.
    fn name(&self, entity: EntityId) -> &str {
        self.names.get(&entity).map_or("Unknown", String::as_str)
    }

    /// Render one status frame as a line on stdout.
    pub fn render(&self, frame: &StatusFrame) {
        let action = frame.action.map_or_else(String::new, |line| {
            format!(" | {}", Self::paint(line))
        });
        let load = frame.load.map_or_else(String::new, |line| {
            format!(" | {}", Self::paint(line))
        });
        let target = frame.target.map_or_else(
            || String::from(" | Target: None"),
            |entity| format!(" | Target: {}", self.name(entity)),
        );

        // Endpoints have no action dimension and never show a target slot;
        // the actor always shows both.
        let target = if frame.action.is_some() {
            target
        } else {
            String::new()
        };

        println!(
            "[{:<16}] Load: {}{}{}{}",
            self.name(frame.entity),
            frame.load_level,
            action,
            load,
            target
        );
    }

    /// Wrap a status line's text in its color escape codes.
    fn paint(line: StatusLine) -> String {
        format!(
            "{}{}{}",
            line.color.ansi_foreground(),
            line.text(),
            Color::ANSI_RESET
        )
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unknown_entities_render_with_a_placeholder_name() {
        let sink = ConsoleSink::new(BTreeMap::new());
        assert_eq!(sink.name(EntityId::new()), "Unknown");
    }

    #[test]
    fn registered_names_resolve() {
        let entity = EntityId::new();
        let mut names = BTreeMap::new();
        names.insert(entity, String::from("North Cache"));
        let sink = ConsoleSink::new(names);
        assert_eq!(sink.name(entity), "North Cache");
    }
}
