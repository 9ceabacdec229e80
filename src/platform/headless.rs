//! In-memory host backend
//!
//! Records what would have been drawn, queues scripted input, and lets the
//! caller play the part of the audio device thread.

use std::collections::VecDeque;
use std::time::Duration;

use super::{Canvas, Color, EventSource, Pacer, TextError, TextStyle};
use crate::audio::{AudioOutput, AudioTrigger, DeviceError, SampleBank, StreamFeed, WavFormat};
use crate::driver::{Flow, FrameDriver, FrameView};
use crate::input::{InputEvent, Key};
use crate::sim::{GameState, Rect};
use crate::variant::Capabilities;

/// A text draw call as recorded by [`MemoryCanvas`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrawnText {
    pub text: String,
    pub x: i32,
    pub y: i32,
    pub style: TextStyle,
}

/// Canvas that keeps the current frame's draw calls
#[derive(Debug, Clone)]
pub struct MemoryCanvas {
    pub background: Color,
    pub rects: Vec<(Rect, Color)>,
    pub texts: Vec<DrawnText>,
    pub presented: u64,
    font_available: bool,
}

impl Default for MemoryCanvas {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryCanvas {
    pub fn new() -> Self {
        Self {
            background: Color::BLACK,
            rects: Vec::new(),
            texts: Vec::new(),
            presented: 0,
            font_available: true,
        }
    }

    /// A canvas whose font failed to load
    pub fn without_font() -> Self {
        Self {
            font_available: false,
            ..Self::new()
        }
    }
}

impl Canvas for MemoryCanvas {
    fn clear(&mut self, color: Color) {
        self.background = color;
        self.rects.clear();
        self.texts.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.rects.push((rect, color));
    }

    fn draw_text(&mut self, text: &str, x: i32, y: i32, style: TextStyle) -> Result<(), TextError> {
        if !self.font_available {
            return Err(TextError::FontUnavailable("no font loaded".into()));
        }
        self.texts.push(DrawnText {
            text: text.to_string(),
            x,
            y,
            style,
        });
        Ok(())
    }

    fn present(&mut self) {
        self.presented += 1;
    }
}

/// Default bound of [`EventQueue`]
pub const EVENT_QUEUE_CAPACITY: usize = 64;

/// Bounded FIFO of input events
#[derive(Debug, Clone)]
pub struct EventQueue {
    queue: VecDeque<InputEvent>,
    capacity: usize,
}

impl Default for EventQueue {
    fn default() -> Self {
        Self::with_capacity(EVENT_QUEUE_CAPACITY)
    }
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Queue an event. Returns `false` and drops it when the queue is full.
    pub fn push(&mut self, event: InputEvent) -> bool {
        if self.queue.len() >= self.capacity {
            log::warn!("Input queue full, dropping {:?}", event);
            return false;
        }
        self.queue.push_back(event);
        true
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

impl EventSource for EventQueue {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.queue.pop_front()
    }
}

/// Audio device driven by hand: the caller decides when the "device thread"
/// asks for bytes.
#[derive(Debug, Default)]
pub struct ManualOutput {
    current: Option<(WavFormat, StreamFeed)>,
    opens: u32,
    closes: u32,
    fail_next: Option<String>,
}

impl ManualOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `open` fail with `message`
    pub fn fail_next_open(&mut self, message: &str) {
        self.fail_next = Some(message.to_string());
    }

    /// Simulate one device request for `len` bytes. Bytes past the end of
    /// the sample are the format's silence. Empty when closed.
    pub fn pull(&mut self, len: usize) -> Vec<u8> {
        let Some((format, feed)) = &self.current else {
            return Vec::new();
        };
        let mut out = vec![format.encoding.silence(); len];
        feed.fill(&mut out);
        out
    }

    pub fn is_open(&self) -> bool {
        self.current.is_some()
    }

    pub fn opens(&self) -> u32 {
        self.opens
    }

    pub fn closes(&self) -> u32 {
        self.closes
    }
}

impl AudioOutput for ManualOutput {
    fn open(&mut self, format: &WavFormat, feed: StreamFeed) -> Result<(), DeviceError> {
        if let Some(message) = self.fail_next.take() {
            return Err(DeviceError(message));
        }
        self.current = Some((*format, feed));
        self.opens += 1;
        Ok(())
    }

    fn close(&mut self) {
        if self.current.take().is_some() {
            self.closes += 1;
        }
    }
}

/// Pacer that never blocks, only adds up the time it was asked to wait
#[derive(Debug, Clone, Copy, Default)]
pub struct InstantPacer {
    pub waited: Duration,
}

impl Pacer for InstantPacer {
    fn delay(&mut self, duration: Duration) {
        self.waited += duration;
    }
}

/// Scripted rally without a window: press start, then let the ball run
/// until the round ends or `max_ticks` have passed.
pub fn run_demo(caps: Capabilities, max_ticks: u64) -> FrameView {
    let mut events = EventQueue::new();
    events.push(InputEvent::KeyDown(Key::Space));

    let bank = if caps.sound {
        SampleBank::load_defaults()
    } else {
        SampleBank::new()
    };
    let mut driver = FrameDriver::new(
        GameState::new(caps),
        MemoryCanvas::new(),
        events,
        AudioTrigger::new(ManualOutput::new(), bank),
        InstantPacer::default(),
    );

    driver.startup();
    while driver.ticks() < max_ticks {
        if driver.step() == Flow::Quit {
            break;
        }
        // The first tick only reads the start key
        if driver.ticks() > 1 && !driver.state().is_playing() {
            break;
        }
    }
    driver.shutdown();
    driver.view()
}
