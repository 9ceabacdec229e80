//! Platform abstraction layer
//!
//! The host library is a collaborator behind four small contracts:
//! - [`Canvas`]: clear, fill rectangles, draw text, present
//! - [`EventSource`]: a poll-able input queue
//! - [`crate::audio::AudioOutput`]: an exclusive sample device
//! - [`Pacer`]: the blocking per-frame delay
//!
//! `headless` implements them in memory (tests, no-window builds); `sdl`
//! implements them over SDL2 behind the `sdl` feature.

pub mod headless;
#[cfg(feature = "sdl")]
pub mod sdl;

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::input::InputEvent;
use crate::sim::Rect;

/// Opaque RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Text placement and styling for [`Canvas::draw_text`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextStyle {
    pub size: u16,
    pub fg: Color,
    pub bg: Color,
}

/// Fixed-size drawable surface
pub trait Canvas {
    /// Fill the whole surface
    fn clear(&mut self, color: Color);
    /// Fill one rectangle
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Render `text` with its top-left corner at `(x, y)`
    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> Result<(), TextError>;
    /// Show the finished frame
    fn present(&mut self);
}

/// Poll-able input queue
pub trait EventSource {
    /// Next queued event, `None` when the queue is empty
    fn poll_event(&mut self) -> Option<InputEvent>;

    /// Pull every event queued right now
    fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_
    where
        Self: Sized,
    {
        std::iter::from_fn(move || self.poll_event())
    }
}

/// Frame pacing
pub trait Pacer {
    fn delay(&mut self, duration: Duration);
}

/// Wall-clock pacing by sleeping the thread
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Text could not be drawn; the frame carries on without it
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextError {
    FontUnavailable(String),
    Render(String),
}

impl fmt::Display for TextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TextError::FontUnavailable(msg) => write!(f, "font unavailable: {}", msg),
            TextError::Render(msg) => write!(f, "text render failed: {}", msg),
        }
    }
}

impl std::error::Error for TextError {}

/// A host subsystem failed to come up; the process exits with status 1
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartupError {
    Video(String),
    Window(String),
    Text(String),
}

impl fmt::Display for StartupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StartupError::Video(msg) => write!(f, "video subsystem could not initialize: {}", msg),
            StartupError::Window(msg) => write!(f, "window could not be created: {}", msg),
            StartupError::Text(msg) => write!(f, "text subsystem could not initialize: {}", msg),
        }
    }
}

impl std::error::Error for StartupError {}
