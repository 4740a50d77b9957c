//! Status vocabulary shared between the core and display sinks.
//!
//! State changes are published as [`StatusFrame`] snapshots. A frame carries
//! one resolved line per status dimension (action, inventory load) plus the
//! raw load level and the current target, which is everything a display
//! observer renders. Which line a dimension resolves to is core logic; the
//! types here only name the vocabulary.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::ids::EntityId;

/// The two independent status dimensions an entity can display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusDimension {
    /// Whether the entity is currently performing its periodic action.
    Action,
    /// How loaded the entity's inventory is.
    Load,
}

/// A displayable status label within one of the two dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StatusLabel {
    /// Action dimension: no periodic action is running.
    Idle,
    /// Action dimension: the periodic action is running.
    Busy,
    /// Load dimension: the inventory holds nothing.
    Empty,
    /// Load dimension: the inventory holds something, but has headroom.
    HasLoad,
    /// Load dimension: the inventory is at capacity.
    Full,
}

impl StatusLabel {
    /// The text a display sink shows for this label.
    pub const fn text(self) -> &'static str {
        match self {
            Self::Idle => "Idle",
            Self::Busy => "Busy",
            Self::Empty => "Empty",
            Self::HasLoad => "Has Load",
            Self::Full => "Full",
        }
    }

    /// The dimension this label belongs to.
    pub const fn dimension(self) -> StatusDimension {
        match self {
            Self::Idle | Self::Busy => StatusDimension::Action,
            Self::Empty | Self::HasLoad | Self::Full => StatusDimension::Load,
        }
    }
}

/// Per-label display configuration: whether the label applies to this
/// entity at all, and the color it renders in when it does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusStyle {
    /// If false, this label never displays for the entity.
    pub enabled: bool,
    /// Text color used when the label displays.
    pub color: Color,
}

impl StatusStyle {
    /// An enabled style with the given color.
    pub const fn shown(color: Color) -> Self {
        Self {
            enabled: true,
            color,
        }
    }
}

/// Display configuration for the action dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionStyles {
    /// Style for [`StatusLabel::Idle`].
    pub idle: StatusStyle,
    /// Style for [`StatusLabel::Busy`].
    pub busy: StatusStyle,
}

impl Default for ActionStyles {
    fn default() -> Self {
        Self {
            idle: StatusStyle::shown(Color::GRAY),
            busy: StatusStyle::shown(Color::AMBER),
        }
    }
}

/// Display configuration for the load dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadStyles {
    /// Style for [`StatusLabel::Empty`].
    pub empty: StatusStyle,
    /// Style for [`StatusLabel::HasLoad`].
    pub has_load: StatusStyle,
    /// Style for [`StatusLabel::Full`].
    pub full: StatusStyle,
}

impl Default for LoadStyles {
    fn default() -> Self {
        Self {
            empty: StatusStyle::shown(Color::RED),
            has_load: StatusStyle::shown(Color::GREEN),
            full: StatusStyle::shown(Color::BLUE),
        }
    }
}

/// One resolved status line: which label won the dimension, in what color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLine {
    /// The label that resolved for the dimension.
    pub label: StatusLabel,
    /// The color configured for that label.
    pub color: Color,
}

impl StatusLine {
    /// Construct a line from a label and its configured color.
    pub const fn new(label: StatusLabel, color: Color) -> Self {
        Self { label, color }
    }

    /// The display text for this line.
    pub const fn text(self) -> &'static str {
        self.label.text()
    }
}

/// Snapshot published to status observers on every state change.
///
/// Carries everything a display consumes: the resolved line per dimension
/// (`None` when no enabled label matched, or when the entity has no action
/// dimension at all), the raw load level for the "Load: X" readout, and the
/// currently selected target for the target-name readout (always `None`
/// for entities that do not select targets).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusFrame {
    /// The entity whose state changed.
    pub entity: EntityId,
    /// Resolved action-dimension line, if any.
    pub action: Option<StatusLine>,
    /// Resolved load-dimension line, if any.
    pub load: Option<StatusLine>,
    /// Current inventory load, for the numeric readout.
    pub load_level: Decimal,
    /// Currently selected target, for the target-name readout.
    pub target: Option<EntityId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_map_to_their_dimension() {
        assert_eq!(StatusLabel::Idle.dimension(), StatusDimension::Action);
        assert_eq!(StatusLabel::Busy.dimension(), StatusDimension::Action);
        assert_eq!(StatusLabel::Empty.dimension(), StatusDimension::Load);
        assert_eq!(StatusLabel::HasLoad.dimension(), StatusDimension::Load);
        assert_eq!(StatusLabel::Full.dimension(), StatusDimension::Load);
    }

    #[test]
    fn label_text_is_display_form() {
        assert_eq!(StatusLabel::HasLoad.text(), "Has Load");
        assert_eq!(StatusLabel::Idle.text(), "Idle");
    }

    #[test]
    fn default_styles_are_all_enabled() {
        let action = ActionStyles::default();
        let load = LoadStyles::default();
        assert!(action.idle.enabled);
        assert!(action.busy.enabled);
        assert!(load.empty.enabled);
        assert!(load.has_load.enabled);
        assert!(load.full.enabled);
    }

    #[test]
    fn frame_roundtrip_serde() {
        let frame = StatusFrame {
            entity: EntityId::new(),
            action: Some(StatusLine::new(StatusLabel::Busy, Color::AMBER)),
            load: None,
            load_level: Decimal::ZERO,
            target: None,
        };
        let json = serde_json::to_string(&frame).ok();
        assert!(json.is_some());
        let restored: Result<StatusFrame, _> =
            serde_json::from_str(json.as_deref().unwrap_or(""));
        assert_eq!(restored.ok(), Some(frame));
    }
}
