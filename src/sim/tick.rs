//! Per-tick simulation and input actions
//!
//! `tick` covers the simulation half of a frame: advance, right gate, left
//! gate, walls. The order matters for identical trajectories. Reflections are
//! plain sign flips with no angle change.

use super::geometry::{GateResult, gate_test, touches_wall};
use super::state::{Direction, GameEvent, GamePhase, GameState, Side};
use crate::consts::SCREEN_HEIGHT;

/// A state machine input, already decoded from a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Start/pause
    Toggle,
    /// Jump a paddle one step
    Move(Side, Direction),
}

/// Advance the game by one tick. Returns what happened, in order.
pub fn tick(state: &mut GameState) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.phase != GamePhase::Playing {
        return events;
    }

    state.ball.advance();

    for side in [Side::Right, Side::Left] {
        if let Some(event) = check_gate(state, side) {
            events.push(event);
        }
    }

    if state.is_playing() && touches_wall(state.ball.pos.y, SCREEN_HEIGHT) {
        state.ball.vel.y = -state.ball.vel.y;
    }

    events
}

fn check_gate(state: &mut GameState, side: Side) -> Option<GameEvent> {
    if !state.is_playing() {
        return None;
    }

    let paddle = state.paddle(side).rect();
    match gate_test(side, state.ball.pos, &paddle) {
        GateResult::Clear => None,
        GateResult::Hit => {
            state.ball.vel.x = -state.ball.vel.x;
            Some(GameEvent::PaddleHit(side))
        }
        GateResult::Miss => {
            let scorer = side.opposite();
            if state.caps.scoring {
                state.score.award(scorer);
            }
            state.phase = GamePhase::Idle;
            state.reset_positions();
            log::info!("Game ended! {:?} scores, now {}", scorer, state.score.get(scorer));
            Some(GameEvent::Point { scorer })
        }
    }
}

/// Apply one input action. Paddle moves are ignored unless playing.
pub fn apply(state: &mut GameState, action: Action) -> Option<GameEvent> {
    match action {
        Action::Toggle => match state.phase {
            GamePhase::Idle => {
                state.phase = GamePhase::Playing;
                Some(GameEvent::Started)
            }
            GamePhase::Playing => {
                state.phase = GamePhase::Idle;
                Some(GameEvent::Paused)
            }
        },
        Action::Move(side, dir) => {
            if state.is_playing() {
                let bounds = state.caps.bounds;
                state.paddle_mut(side).step(dir, bounds);
            }
            None
        }
    }
}
