//! Fixed-cadence frame loop
//!
//! One [`FrameDriver::step`] is one tick, always in this order:
//! 1. draw paddles and ball at their current positions
//! 2. advance the ball, paddle gates, walls (`sim::tick`)
//! 3. draw the HUD line
//! 4. present
//! 5. drain input and apply it
//! 6. release the audio device if the active sample finished
//! 7. block for the frame delay
//! 8. every 10th playing tick, log the ball
//!
//! Pacing is wall-clock throttling, not a fixed-timestep integrator: one
//! tick moves the ball by exactly one velocity step no matter how long the
//! frame took.

use serde::Serialize;

use crate::audio::{AudioOutput, AudioTrigger, PlayError, Sample};
use crate::consts::{FRAME_DELAY, LOG_EVERY_TICKS};
use crate::input::{Command, Controls};
use crate::platform::{Canvas, EventSource, Pacer};
use crate::sim::{self, GameEvent, GamePhase, GameState, Rect};
use crate::ui;

/// Whether the main loop should keep going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// What the renderer needs to know about a frame
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameView {
    pub phase: GamePhase,
    pub left: Rect,
    pub right: Rect,
    pub ball: Rect,
    pub score_left: String,
    pub score_right: String,
    pub hud: Option<String>,
    pub tick: u64,
}

/// Owns the game state and every host collaborator
pub struct FrameDriver<C, E, A, P> {
    state: GameState,
    controls: Controls,
    canvas: C,
    events: E,
    audio: AudioTrigger<A>,
    pacer: P,
    /// Total ticks run
    ticks: u64,
    /// Ticks run while playing, drives the diagnostic log
    playing_ticks: u64,
    /// Tick of the most recent diagnostic ball line
    last_ball_log: Option<u64>,
}

/// Whether the diagnostic ball line is due, given how many playing ticks
/// came before this one
pub fn ball_log_due(playing_ticks: u64) -> bool {
    playing_ticks > 0 && playing_ticks % LOG_EVERY_TICKS == 0
}

impl<C, E, A, P> FrameDriver<C, E, A, P>
where
    C: Canvas,
    E: EventSource,
    A: AudioOutput,
    P: Pacer,
{
    pub fn new(mut state: GameState, canvas: C, events: E, audio: AudioTrigger<A>, pacer: P) -> Self {
        let controls = Controls::default();
        state.bind_controls(&controls);
        Self {
            state,
            controls,
            canvas,
            events,
            audio,
            pacer,
            ticks: 0,
            playing_ticks: 0,
            last_ball_log: None,
        }
    }

    /// Rebind the keys. The paddles take the same bindings, so the help
    /// text always names the keys that are decoded.
    pub fn with_controls(mut self, controls: Controls) -> Self {
        self.state.bind_controls(&controls);
        self.controls = controls;
        self
    }

    /// Run until a quit command, then release the audio device
    pub fn run(&mut self) {
        self.startup();
        while self.step() == Flow::Continue {}
        self.shutdown();
    }

    /// The game opens idle, so the ambient sample starts right away
    pub fn startup(&mut self) {
        if self.state.phase == GamePhase::Idle {
            self.play(Sample::Ambient);
        }
    }

    pub fn shutdown(&mut self) {
        self.audio.cancel();
        log::info!(
            "Shutting down after {} ticks, score {}:{}",
            self.ticks,
            self.state.score.left,
            self.state.score.right
        );
    }

    /// Run one tick
    pub fn step(&mut self) -> Flow {
        ui::draw_field(&mut self.canvas, &self.state);

        for event in sim::tick(&mut self.state) {
            self.on_game_event(event);
        }

        ui::draw_hud(&mut self.canvas, &self.state, &self.controls);
        self.canvas.present();

        let flow = self.handle_input();

        if self.state.caps.sound {
            self.audio.poll_completion();
        }

        self.pacer.delay(FRAME_DELAY);

        if self.state.is_playing() {
            if ball_log_due(self.playing_ticks) {
                let ball = &self.state.ball;
                log::info!(
                    "Ball x {} y {}, speedx {} speedy {}",
                    ball.pos.x,
                    ball.pos.y,
                    ball.vel.x,
                    ball.vel.y
                );
                self.last_ball_log = Some(self.ticks);
            }
            self.playing_ticks += 1;
        }

        self.ticks += 1;
        flow
    }

    fn handle_input(&mut self) -> Flow {
        let mut flow = Flow::Continue;
        let queued: Vec<_> = self.events.drain().collect();
        for event in queued {
            match self.controls.command(event) {
                Some(Command::Quit) => flow = Flow::Quit,
                Some(Command::Game(action)) => {
                    if let Some(game_event) = sim::apply(&mut self.state, action) {
                        self.on_game_event(game_event);
                    }
                }
                None => {}
            }
        }
        flow
    }

    fn on_game_event(&mut self, event: GameEvent) {
        match event {
            GameEvent::Started => {
                if self.state.caps.sound {
                    self.audio.cancel();
                }
            }
            GameEvent::Paused | GameEvent::Point { .. } => self.play(Sample::Ambient),
            GameEvent::PaddleHit(_) => self.play(Sample::Bounce),
        }
    }

    fn play(&mut self, sample: Sample) {
        if !self.state.caps.sound {
            return;
        }
        match self.audio.play(sample) {
            Ok(()) | Err(PlayError::AlreadyPlaying(_)) => {}
            Err(err) => log::debug!("Not playing {}: {}", sample.path(), err),
        }
    }

    /// Snapshot for the renderer / observers
    pub fn view(&self) -> FrameView {
        FrameView {
            phase: self.state.phase,
            left: self.state.left.rect(),
            right: self.state.right.rect(),
            ball: self.state.ball.rect(),
            score_left: self.state.score.left.to_string(),
            score_right: self.state.score.right.to_string(),
            hud: ui::hud_text(&self.state, &self.controls),
            tick: self.ticks,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn canvas(&self) -> &C {
        &self.canvas
    }

    pub fn events_mut(&mut self) -> &mut E {
        &mut self.events
    }

    pub fn audio(&self) -> &AudioTrigger<A> {
        &self.audio
    }

    pub fn audio_mut(&mut self) -> &mut AudioTrigger<A> {
        &mut self.audio
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn playing_ticks(&self) -> u64 {
        self.playing_ticks
    }

    pub fn last_ball_log(&self) -> Option<u64> {
        self.last_ball_log
    }

    pub fn controls(&self) -> &Controls {
        &self.controls
    }
}
