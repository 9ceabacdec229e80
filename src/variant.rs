//! Game variants and their capability flags
//!
//! The game grew in four small steps. Rather than keep four game loops,
//! every step is a preset over one capability set.

use serde::{Deserialize, Serialize};

/// How a paddle move is checked against the screen bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BoundsCheck {
    /// Move by the full step, then clamp into `[0, screen_height - height]`
    #[default]
    Clamped,
    /// Test the position *before* the move and allow the full step.
    /// A paddle can end up to one step past the edge.
    PreMove,
}

/// Incremental releases of the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Variant {
    /// Paddles and a bouncing ball
    Paddles,
    /// Adds the score counter
    Scoring,
    /// Adds the HUD text
    Text,
    /// Adds ambient and bounce sounds
    #[default]
    Sound,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Paddles => "Paddles",
            Variant::Scoring => "Scoring",
            Variant::Text => "Text",
            Variant::Sound => "Sound",
        }
    }

    /// Capability set for this variant
    pub fn capabilities(&self) -> Capabilities {
        match self {
            Variant::Paddles => Capabilities {
                scoring: false,
                text: false,
                sound: false,
                ..Capabilities::default()
            },
            Variant::Scoring => Capabilities {
                text: false,
                sound: false,
                ..Capabilities::default()
            },
            Variant::Text => Capabilities {
                sound: false,
                ..Capabilities::default()
            },
            Variant::Sound => Capabilities::default(),
        }
    }
}

/// Feature flags consulted by the sim and the frame driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Misses award a point
    pub scoring: bool,
    /// Ambient and bounce samples are played
    pub sound: bool,
    /// HUD text is drawn
    pub text: bool,
    /// Paddle bounds policy
    pub bounds: BoundsCheck,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            scoring: true,
            sound: true,
            text: true,
            bounds: BoundsCheck::Clamped,
        }
    }
}

impl Capabilities {
    /// Same flags with a different bounds policy
    pub fn with_bounds(mut self, bounds: BoundsCheck) -> Self {
        self.bounds = bounds;
        self
    }
}
