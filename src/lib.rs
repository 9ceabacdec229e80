//! Ping - a minimal two-player Pong
//!
//! Core modules:
//! - `sim`: Pure game logic (geometry, state machine, tick)
//! - `audio`: Sample loading and the single-voice audio trigger
//! - `input`: Platform-neutral keys, events and control bindings
//! - `platform`: Host contracts plus headless and SDL2 backends
//! - `driver`: Fixed-cadence frame loop tying input, sim, audio and rendering
//! - `ui`: HUD text and the render pass
//! - `variant`: Capability presets for the incremental game variants

pub mod audio;
pub mod driver;
pub mod input;
pub mod platform;
pub mod sim;
pub mod ui;
pub mod variant;

pub use driver::{Flow, FrameDriver, FrameView};
pub use variant::{BoundsCheck, Capabilities, Variant};

/// Game configuration constants
pub mod consts {
    use std::time::Duration;

    /// Window title
    pub const WINDOW_TITLE: &str = "Ping";

    /// Screen dimensions (pixels)
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Paddle defaults
    pub const PADDLE_WIDTH: i32 = 15;
    pub const PADDLE_HEIGHT: i32 = 65;
    /// Distance of each paddle from its side of the screen
    pub const PADDLE_MARGIN: i32 = 20;
    pub const LEFT_PADDLE_X: i32 = PADDLE_MARGIN;
    pub const RIGHT_PADDLE_X: i32 = SCREEN_WIDTH - PADDLE_MARGIN - PADDLE_WIDTH;
    /// Vertical rest position of both paddles (integer arithmetic, 268)
    pub const PADDLE_CENTER_Y: i32 = SCREEN_HEIGHT / 2 - PADDLE_HEIGHT / 2;
    /// Distance a paddle jumps per key press
    pub const MOVE_DELTA: i32 = 30;

    /// Ball defaults
    pub const BALL_WIDTH: i32 = 10;
    pub const BALL_HEIGHT: i32 = 10;
    pub const BALL_CENTER_X: f64 = (SCREEN_WIDTH / 2 - BALL_WIDTH / 2) as f64;
    pub const BALL_CENTER_Y: f64 = (SCREEN_HEIGHT / 2 - BALL_HEIGHT / 2) as f64;
    pub const BALL_SPEED_X: f64 = 5.0;
    pub const BALL_SPEED_Y: f64 = 2.0;

    /// Blocking delay at the end of every tick
    pub const FRAME_DELAY: Duration = Duration::from_millis(15);
    /// Ball diagnostics are logged every N playing ticks
    pub const LOG_EVERY_TICKS: u64 = 10;

    /// HUD text
    pub const HUD_TEXT_SIZE: u16 = 18;
    pub const HUD_TEXT_X: i32 = 10;
    pub const HUD_TEXT_Y: i32 = 10;

    /// Assets
    pub const FONT_PATH: &str = "assets/pixeboy.ttf";
    pub const AMBIENT_SAMPLE_PATH: &str = "assets/audio/backAud.wav";
    pub const BOUNCE_SAMPLE_PATH: &str = "assets/audio/pong2.wav";
}
