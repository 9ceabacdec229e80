//! Pure game simulation
//!
//! All gameplay logic lives here. No rendering, audio or platform
//! dependencies: the frame driver feeds actions in and reacts to the
//! [`GameEvent`]s that come out.

pub mod geometry;
pub mod state;
pub mod tick;

pub use geometry::{GateResult, Rect, gate_crossed, gate_test, touches_wall, within_band};
pub use state::{Ball, Direction, GameEvent, GamePhase, GameState, Paddle, Score, Side};
pub use tick::{Action, apply, tick};
