//! Display colors attached to status labels.
//!
//! Every status category carries a color so that display sinks can render
//! state changes visually. The core never interprets colors; it only
//! forwards them to whatever sink is subscribed.

use serde::{Deserialize, Serialize};

/// An RGB color carried alongside status text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    /// Red channel (0-255).
    pub r: u8,
    /// Green channel (0-255).
    pub g: u8,
    /// Blue channel (0-255).
    pub b: u8,
}

impl Color {
    /// Neutral white, the default for uncategorized text.
    pub const WHITE: Self = Self::new(235, 235, 235);

    /// Muted gray used for the idle action state.
    pub const GRAY: Self = Self::new(150, 150, 150);

    /// Amber used for the busy action state.
    pub const AMBER: Self = Self::new(255, 190, 60);

    /// Green used for a partially loaded inventory.
    pub const GREEN: Self = Self::new(80, 200, 120);

    /// Blue used for a full inventory.
    pub const BLUE: Self = Self::new(90, 160, 255);

    /// Red used for an empty inventory.
    pub const RED: Self = Self::new(230, 80, 80);

    /// Construct a color from raw channel values.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Terminal escape sequence selecting this color as the foreground
    /// (24-bit SGR form).
    pub fn ansi_foreground(self) -> String {
        format!("\x1b[38;2;{};{};{}m", self.r, self.g, self.b)
    }

    /// Terminal escape sequence resetting all styling.
    pub const ANSI_RESET: &'static str = "\x1b[0m";
}
